//! Project management commands for quarry.
//!
//! This module handles the project lifecycle:
//! - Creating projects from a repository or a folder scan
//! - Listing registered projects
//! - Removing projects

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use quarry_core::{
    Project, ProjectStore, RepositoryInput,
    discovery::{normalize_repos, scan_git_repos},
    git,
};

use crate::{display_path, expand_path};

// =============================================================================
// Project Creation
// =============================================================================

/// Create a project from a repository or a folder of repositories.
///
/// A path that is (or is inside) a git repository becomes a single-repo
/// project named after the repository root. Any other folder is scanned;
/// the discovered repositories are deduplicated and disambiguated before
/// being registered. A scan that finds nothing registers nothing.
pub fn do_new_project(path: Option<&str>, name: Option<&str>) -> Result<()> {
    use dialoguer::{Confirm, Input, theme::ColorfulTheme};

    let theme = ColorfulTheme::default();
    let root = match path {
        Some(p) => expand_path(p),
        None => std::env::current_dir()?,
    };

    let (default_name, repositories) = if let Some(repo) = git::resolve_repo(&root) {
        let display_name = repo.name.clone();
        (
            repo.name,
            vec![RepositoryInput {
                display_name,
                git_repo_path: repo.root.to_string_lossy().to_string(),
            }],
        )
    } else {
        let discovered = scan_git_repos(&root)?;
        if discovered.is_empty() {
            eprintln!(
                "{} No git repositories found under {}",
                "✘".red(),
                display_path(&root)
            );
            std::process::exit(1);
        }

        let default_name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "project".to_string());
        (
            default_name,
            normalize_repos(&discovered, &root.to_string_lossy()),
        )
    };

    println!("{}", "Repositories".blue().bold());
    for repo in &repositories {
        println!(
            "  {}  {}",
            repo.display_name.bold(),
            display_path(&PathBuf::from(&repo.git_repo_path)).dimmed()
        );
    }
    println!();

    let project_name: String = match name {
        Some(n) => n.to_string(),
        None => Input::with_theme(&theme)
            .with_prompt("Project name")
            .default(default_name)
            .interact_text()?,
    };

    let noun = if repositories.len() == 1 {
        "repository"
    } else {
        "repositories"
    };
    let confirmed = Confirm::with_theme(&theme)
        .with_prompt(format!(
            "Register '{}' with {} {}?",
            project_name,
            repositories.len(),
            noun
        ))
        .default(true)
        .interact()?;
    if !confirmed {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }

    let store = ProjectStore::open_default()?;
    store.add(Project::new(project_name.clone(), repositories))?;

    println!("{} {} {}", "✔".green(), "Registered".dimmed(), project_name);
    Ok(())
}

// =============================================================================
// Project Listing & Removal
// =============================================================================

/// List registered projects.
pub fn do_list_projects() -> Result<()> {
    let store = ProjectStore::open_default()?;
    let projects = store.load()?;

    if projects.is_empty() {
        println!("{}", "No projects registered".dimmed());
        return Ok(());
    }

    use comfy_table::{Table, presets::NOTHING};

    let mut table = Table::new();
    table.load_preset(NOTHING);

    for project in projects.values() {
        let repos = project
            .repositories
            .iter()
            .map(|r| r.display_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            project.name.bold().to_string(),
            format!("{}", project.repositories.len()),
            repos.dimmed().to_string(),
            project
                .created_at
                .format("%Y-%m-%d")
                .to_string()
                .dimmed()
                .to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Remove a project from the registry.
pub fn do_rm_project(name: &str) -> Result<()> {
    use dialoguer::{Confirm, theme::ColorfulTheme};

    let store = ProjectStore::open_default()?;
    if store.get(name)?.is_none() {
        eprintln!("{} No such project: {}", "✘".red(), name);
        std::process::exit(1);
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Remove project '{}'?", name))
        .default(false)
        .interact()?;
    if !confirmed {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }

    store.remove(name)?;
    println!("{} {} {}", "✔".green(), "Removed".dimmed(), name);
    Ok(())
}

// =============================================================================
// Scan
// =============================================================================

/// Scan a folder and print the normalized repository entries.
pub fn do_scan(path: &str, json: bool) -> Result<()> {
    let root = expand_path(path);
    let discovered = scan_git_repos(&root)?;

    if discovered.is_empty() {
        eprintln!(
            "{} No git repositories found under {}",
            "✘".red(),
            display_path(&root)
        );
        std::process::exit(1);
    }

    let repos = normalize_repos(&discovered, &root.to_string_lossy());
    if json {
        println!("{}", serde_json::to_string_pretty(&repos)?);
    } else {
        for repo in &repos {
            println!("{}  {}", repo.display_name.bold(), repo.git_repo_path.dimmed());
        }
    }

    Ok(())
}
