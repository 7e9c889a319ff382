//! Git repository discovery and display-name normalization.
//!
//! When a user points quarry at a folder, the folder is walked for git
//! repositories and the hits are turned into registrable project entries:
//!
//! 1. Paths are normalized (separator runs collapsed, trailing separators
//!    stripped) and deduplicated case-insensitively, first occurrence wins.
//! 2. Each repository gets a base name (its final path segment, or a name
//!    provided by the caller) and a name relative to the scan root.
//! 3. Repositories whose base names collide are disambiguated by showing
//!    their relative names instead, so two repos both called `api` show up
//!    as `billing/api` and `search/api`.
//!
//! The pipeline is total: empty or malformed paths degrade through fallback
//! rules rather than erroring. Only the filesystem scan itself can fail.

use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};

// =============================================================================
// Types
// =============================================================================

/// A repository reported by a filesystem scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredRepo {
    /// Absolute, OS-native path to the repository root
    pub path: String,
    /// Optional label overriding the path-derived name
    pub name: Option<String>,
}

impl DiscoveredRepo {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
        }
    }
}

/// Intermediate entry produced by [`dedupe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    /// Original path, preserved byte-for-byte for output
    pub path: String,
    /// Final path segment, or the caller-provided name
    pub base_name: String,
    /// Path relative to the scan root, empty if the repo *is* the root
    pub relative_name: String,
}

/// A repository ready to be registered on a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInput {
    pub display_name: String,
    pub git_repo_path: String,
}

// =============================================================================
// Path Normalization
// =============================================================================

/// Collapse separator runs to a single `/` and strip trailing separators.
///
/// Case is preserved; callers lowercase where comparison needs it. A path
/// consisting only of separators normalizes to `/`, never to the empty
/// string, so root paths survive.
pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_sep = false;
    for ch in path.chars() {
        if ch == '/' || ch == '\\' {
            if !prev_sep {
                out.push('/');
            }
            prev_sep = true;
        } else {
            out.push(ch);
            prev_sep = false;
        }
    }
    while out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

/// Make `full` relative to `base`, comparing case-insensitively.
///
/// Returns the empty string when `full` equals `base` (the repo is the scan
/// root itself) and, defensively, when `full` is not nested under `base`.
/// The remainder keeps the original casing of `full`, so case-insensitive
/// filesystems (macOS, Windows) compare loosely but display faithfully.
pub fn relativize(base: &str, full: &str) -> String {
    let base = normalize_path(base);
    let full = normalize_path(full);

    if full.eq_ignore_ascii_case(&base) {
        return String::new();
    }

    let boundary = base.len();
    if full.len() > boundary
        && full.is_char_boundary(boundary)
        && full[..boundary].eq_ignore_ascii_case(&base)
    {
        // A base of "/" already carries its separator; anything else needs
        // one right after the prefix so "/a/repo2" is not under "/a/repo".
        if base.ends_with('/') {
            return full[boundary..].to_string();
        }
        if full.as_bytes()[boundary] == b'/' {
            return full[boundary + 1..].to_string();
        }
    }

    String::new()
}

/// Final path segment, skipping empty segments from trailing separators.
/// Falls back to the whole string when no segment can be extracted.
fn last_segment(path: &str) -> String {
    path.rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
        .to_string()
}

// =============================================================================
// Dedup & Disambiguation
// =============================================================================

/// Drop repositories whose normalized path was already seen.
///
/// Order-preserving: the first occurrence wins and keeps its metadata, later
/// duplicates are discarded silently. Paths are keyed case-insensitively
/// with separators normalized, but each entry carries its original path.
pub fn dedupe(repos: &[DiscoveredRepo], scan_root: &str) -> Vec<RepoEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for repo in repos {
        let key = normalize_path(&repo.path).to_ascii_lowercase();
        if !seen.insert(key) {
            continue;
        }

        let base_name = repo
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| last_segment(&repo.path));

        entries.push(RepoEntry {
            base_name,
            relative_name: relativize(scan_root, &repo.path),
            path: repo.path.clone(),
        });
    }

    entries
}

/// Pick a unique display name for every entry and sort the result.
///
/// Entries whose base name is unique keep it; colliding entries show their
/// relative name instead. A collision that survives that (a scan-root repo
/// whose base name equals a sibling's relative path) gets an ordinal suffix
/// in first-seen order, so display names are always unique and non-empty.
pub fn disambiguate(entries: &[RepoEntry]) -> Vec<RepositoryInput> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.base_name.as_str()).or_default() += 1;
    }

    let mut repos: Vec<RepositoryInput> = entries
        .iter()
        .map(|entry| {
            let collides = counts[entry.base_name.as_str()] > 1;
            let mut display_name = if collides && !entry.relative_name.is_empty() {
                entry.relative_name.clone()
            } else {
                entry.base_name.clone()
            };
            if display_name.is_empty() {
                display_name = entry.relative_name.clone();
            }
            if display_name.is_empty() {
                display_name = "repository".to_string();
            }
            RepositoryInput {
                display_name,
                git_repo_path: entry.path.clone(),
            }
        })
        .collect();

    let mut used: HashMap<String, usize> = HashMap::new();
    for repo in &mut repos {
        let ordinal = used.entry(repo.display_name.clone()).or_insert(0);
        *ordinal += 1;
        let ordinal = *ordinal;
        if ordinal > 1 {
            repo.display_name = format!("{} ({})", repo.display_name, ordinal);
        }
    }

    repos.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
            .then_with(|| a.display_name.cmp(&b.display_name))
    });

    repos
}

/// Full pipeline: dedupe scan results against the scan root, then pick
/// display names. This is what runs when a user selects a folder containing
/// multiple repositories.
pub fn normalize_repos(repos: &[DiscoveredRepo], scan_root: &str) -> Vec<RepositoryInput> {
    disambiguate(&dedupe(repos, scan_root))
}

// =============================================================================
// Filesystem Scan
// =============================================================================

/// Walk `root` and report every git repository under it.
///
/// A directory counts as a repository when it contains a `.git` entry
/// (directory or worktree file). The walk does not descend into a
/// repository, so repos nested below another repo root are not reported.
/// Hidden directories are skipped. Unreadable entries below the root are
/// warned about and skipped; a missing or unreadable root is an error.
/// Finding no repositories is not an error — callers treat the empty list
/// as its own condition.
pub fn scan_git_repos(root: &Path) -> Result<Vec<DiscoveredRepo>> {
    if !root.is_dir() {
        bail!("Not a directory: {}", root.display());
    }
    std::fs::read_dir(root).with_context(|| format!("Failed to read {}", root.display()))?;

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(true)
        .follow_links(false)
        .filter_entry(|entry| {
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return false;
            }
            // Stop descending once a repository root has been entered
            entry.depth() == 0
                || !entry
                    .path()
                    .parent()
                    .is_some_and(|parent| parent.join(".git").exists())
        })
        .build();

    let mut repos = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("{} Skipping unreadable entry: {}", "!".yellow(), err);
                continue;
            }
        };
        let path = entry.path();
        if path.join(".git").exists() {
            repos.push(DiscoveredRepo::new(path.to_string_lossy().to_string()));
        }
    }

    Ok(repos)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn discovered(paths: &[&str]) -> Vec<DiscoveredRepo> {
        paths.iter().map(|path| DiscoveredRepo::new(*path)).collect()
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/a//b/"), "/a/b");
        assert_eq!(normalize_path("C:\\repos\\api\\"), "C:/repos/api");
        assert_eq!(normalize_path("/a/\\/b"), "/a/b");
        assert_eq!(normalize_path(""), "");
    }

    #[test]
    fn test_normalize_path_keeps_root() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("///"), "/");
        assert_eq!(normalize_path("\\"), "/");
    }

    #[test]
    fn test_relativize() {
        assert_eq!(relativize("/a", "/a/b/api"), "b/api");
        assert_eq!(relativize("/a/", "/a/b"), "b");
        assert_eq!(relativize("/a", "/a"), "");
        // Case-insensitive match, original casing preserved
        assert_eq!(relativize("/Work", "/work/Api"), "Api");
        // Not nested under base: defensive empty string
        assert_eq!(relativize("/a", "/elsewhere/api"), "");
        // Sibling with a shared name prefix is not "under" the base
        assert_eq!(relativize("/a/repo", "/a/repo2"), "");
    }

    #[test]
    fn test_relativize_from_filesystem_root() {
        assert_eq!(relativize("/", "/srv/api"), "srv/api");
        assert_eq!(relativize("///", "/srv/api"), "srv/api");
        assert_eq!(relativize("/", "/"), "");
    }

    #[test]
    fn test_pipeline_disambiguates_under_filesystem_root() {
        let repos = discovered(&["/srv/api", "/opt/api"]);
        let out = normalize_repos(&repos, "/");
        let names: Vec<&str> = out.iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, vec!["opt/api", "srv/api"]);
    }

    #[test]
    fn test_last_segment_fallbacks() {
        assert_eq!(last_segment("/a/b/api"), "api");
        assert_eq!(last_segment("/a/b/api/"), "api");
        assert_eq!(last_segment("api"), "api");
        assert_eq!(last_segment("/"), "/");
        assert_eq!(last_segment(""), "");
    }

    #[test]
    fn test_dedupe_first_occurrence_wins() {
        let mut repos = discovered(&["/a/api", "/a/api/", "/a//api"]);
        repos[0].name = Some("first".to_string());
        repos[1].name = Some("second".to_string());

        let entries = dedupe(&repos, "/a");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].base_name, "first");
        assert_eq!(entries[0].path, "/a/api");
    }

    #[test]
    fn test_dedupe_case_insensitive() {
        let entries = dedupe(&discovered(&["/A/Repo", "/a/repo"]), "/a");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "/A/Repo");
    }

    #[test]
    fn test_dedupe_unique_normalized_paths() {
        let repos = discovered(&["/a/x", "/a/X", "/a/y", "/a/y/", "/a/z"]);
        let entries = dedupe(&repos, "/a");
        let mut keys: Vec<String> = entries
            .iter()
            .map(|e| normalize_path(&e.path).to_ascii_lowercase())
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), entries.len());
    }

    #[test]
    fn test_dedupe_idempotent() {
        let repos = discovered(&["/a/b/api", "/a/b/api", "/a/c/api", "/a/svc"]);
        let once = dedupe(&repos, "/a");

        let again: Vec<DiscoveredRepo> = once
            .iter()
            .map(|e| DiscoveredRepo {
                path: e.path.clone(),
                name: Some(e.base_name.clone()),
            })
            .collect();
        assert_eq!(dedupe(&again, "/a"), once);
    }

    #[test]
    fn test_dedupe_blank_name_falls_back_to_segment() {
        let repos = vec![DiscoveredRepo {
            path: "/a/api".to_string(),
            name: Some("  ".to_string()),
        }];
        let entries = dedupe(&repos, "/a");
        assert_eq!(entries[0].base_name, "api");
    }

    #[test]
    fn test_disambiguate_collision_uses_relative_names() {
        let repos = discovered(&["/a/b/api", "/a/c/api"]);
        let out = normalize_repos(&repos, "/a");
        assert_eq!(
            out,
            vec![
                RepositoryInput {
                    display_name: "b/api".to_string(),
                    git_repo_path: "/a/b/api".to_string(),
                },
                RepositoryInput {
                    display_name: "c/api".to_string(),
                    git_repo_path: "/a/c/api".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_disambiguate_no_collision_keeps_base_names() {
        let repos = discovered(&["/a/svc2", "/a/svc1"]);
        let out = normalize_repos(&repos, "/a");
        let names: Vec<&str> = out.iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, vec!["svc1", "svc2"]);
    }

    #[test]
    fn test_disambiguate_root_repo_keeps_base_name() {
        // The scan root is itself a repo named like a nested sibling. Its
        // relative name is empty, so it keeps the bare base name.
        let repos = discovered(&["/work/api", "/work/api/vendor/api"]);
        let out = normalize_repos(&repos, "/work/api");
        assert!(
            out.iter()
                .any(|r| r.display_name == "api" && r.git_repo_path == "/work/api")
        );
        assert!(out.iter().all(|r| !r.display_name.is_empty()));
    }

    #[test]
    fn test_disambiguate_residual_collision_gets_ordinal() {
        // Root repo's base name equals the sibling's relative path.
        let entries = vec![
            RepoEntry {
                path: "/x/api".to_string(),
                base_name: "api".to_string(),
                relative_name: String::new(),
            },
            RepoEntry {
                path: "/x/api/api".to_string(),
                base_name: "api".to_string(),
                relative_name: "api".to_string(),
            },
        ];
        let out = disambiguate(&entries);
        let mut names: Vec<&str> = out.iter().map(|r| r.display_name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["api", "api (2)"]);
    }

    #[test]
    fn test_output_sorted_case_insensitively() {
        let repos = discovered(&["/a/Zebra", "/a/alpha", "/a/Beta"]);
        let out = normalize_repos(&repos, "/a");
        let names: Vec<&str> = out.iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "Beta", "Zebra"]);
    }

    #[test]
    fn test_pipeline_is_total_on_degenerate_input() {
        let repos = vec![
            DiscoveredRepo::new(""),
            DiscoveredRepo::new("/"),
            DiscoveredRepo::new("///"),
        ];
        let out = normalize_repos(&repos, "/");
        assert!(out.iter().all(|r| !r.display_name.is_empty()));
    }

    #[test]
    fn test_repository_input_wire_shape() {
        let repo = RepositoryInput {
            display_name: "b/api".to_string(),
            git_repo_path: "/a/b/api".to_string(),
        };
        let json = serde_json::to_string(&repo).unwrap();
        assert_eq!(
            json,
            r#"{"display_name":"b/api","git_repo_path":"/a/b/api"}"#
        );
    }

    #[test]
    fn test_scan_finds_repos_and_skips_nested() {
        let root = std::env::temp_dir().join("quarry-test-scan");
        std::fs::remove_dir_all(&root).ok();
        for repo in ["one", "two/nested"] {
            std::fs::create_dir_all(root.join(repo).join(".git")).unwrap();
        }
        // A repo below another repo root must not be reported
        std::fs::create_dir_all(root.join("one/vendor/lib/.git")).unwrap();
        // Plain directories are not repos
        std::fs::create_dir_all(root.join("notes")).unwrap();

        let mut found: Vec<String> = scan_git_repos(&root)
            .unwrap()
            .into_iter()
            .map(|r| r.path)
            .collect();
        found.sort();

        let expected = vec![
            root.join("one").to_string_lossy().to_string(),
            root.join("two/nested").to_string_lossy().to_string(),
        ];
        assert_eq!(found, expected);

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_scan_root_that_is_a_repo() {
        let root = std::env::temp_dir().join("quarry-test-scan-root");
        std::fs::remove_dir_all(&root).ok();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::create_dir_all(root.join("sub/.git")).unwrap();

        let found = scan_git_repos(&root).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, root.to_string_lossy().to_string());

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    #[cfg(unix)]
    fn test_scan_unreadable_root_errors() {
        use std::os::unix::fs::PermissionsExt;

        let root = std::env::temp_dir().join("quarry-test-scan-unreadable");
        std::fs::remove_dir_all(&root).ok();
        std::fs::create_dir_all(root.join("repo/.git")).unwrap();
        std::fs::set_permissions(&root, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Root can still be read when running as root; only assert then
        let denied = std::fs::read_dir(&root).is_err();
        let result = scan_git_repos(&root);

        std::fs::set_permissions(&root, std::fs::Permissions::from_mode(0o755)).ok();
        std::fs::remove_dir_all(&root).ok();

        if denied {
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_scan_missing_root_errors() {
        let root = std::env::temp_dir().join("quarry-test-scan-missing");
        std::fs::remove_dir_all(&root).ok();
        assert!(scan_git_repos(&root).is_err());
    }
}
