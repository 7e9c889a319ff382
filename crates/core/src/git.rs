//! Minimal git plumbing for project registration.
//!
//! Quarry asks exactly one question of git: given a path, which repository
//! encloses it? Branches, worktrees and commits belong to the agents that
//! run inside the repositories, not to quarry.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

/// A path resolved to its enclosing git repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRepo {
    /// Repository root directory
    pub root: PathBuf,
    /// Directory name of the root, used as the default display name
    pub name: String,
}

/// Resolve `path` to the repository that contains it, if any.
///
/// Uses `git rev-parse --show-toplevel`, so a path anywhere inside a
/// repository resolves to the repository root. Returns `None` when the path
/// is not inside a repository or git is not installed.
pub fn resolve_repo(path: &Path) -> Option<ResolvedRepo> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(path)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let root = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
    let name = root.file_name()?.to_string_lossy().to_string();
    Some(ResolvedRepo { root, name })
}
