//! Quarry CLI - project launcher for AI coding agents.
//!
//! Quarry registers projects (named collections of git repositories) and
//! launches task attempts against them with a chosen executor and model.
//!
//! # Workflow
//!
//! 1. `quarry project new ~/code` scans the folder for git repositories,
//!    dedupes and disambiguates them, and registers the selection
//! 2. `quarry attempt web` picks an executor and model and launches the
//!    agent in one of the project's repositories
//!
//! Core functionality (discovery pipeline, executor registry, project
//! store) is in `quarry-core`.

mod cli;
mod commands;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ProjectCommands};
use commands::{attempt, project};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Project { action } => match action {
            ProjectCommands::New { path, name } => {
                project::do_new_project(path.as_deref(), name.as_deref())
            }
            ProjectCommands::List => project::do_list_projects(),
            ProjectCommands::Rm { name } => project::do_rm_project(&name),
        },
        Commands::Attempt {
            project,
            executor,
            model,
            prompt,
            working_dir,
        } => attempt::do_attempt(
            project.as_deref(),
            executor.as_deref(),
            model.as_deref(),
            prompt.as_deref(),
            working_dir,
        ),
        Commands::Scan { path, json } => project::do_scan(&path, json),
        Commands::Models { executor } => attempt::do_list_models(executor.as_deref()),
    }
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Expand a leading `~` to the home directory.
pub fn expand_path(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    path.strip_prefix("~/")
        .and_then(|stripped| dirs::home_dir().map(|home| home.join(stripped)))
        .unwrap_or_else(|| PathBuf::from(path))
}

/// Shorten a path for display by replacing the home prefix with `~`.
pub fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(rest) = path.strip_prefix(&home)
    {
        return format!("~/{}", rest.display());
    }
    path.display().to_string()
}
