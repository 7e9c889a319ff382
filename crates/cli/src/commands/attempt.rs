//! Task attempt commands for quarry.
//!
//! This module handles the attempt workflow: pick a project, an executor,
//! a model and a repository, then launch the agent CLI with the task
//! prompt. Every choice can be supplied as a flag to skip its prompt.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use quarry_core::{AttemptRequest, BaseCodingAgent, ExecutorProfile, Project, ProjectStore};

use crate::display_path;

/// Launch a task attempt against a project repository.
pub fn do_attempt(
    project: Option<&str>,
    executor: Option<&str>,
    model: Option<&str>,
    prompt: Option<&str>,
    working_dir: Option<String>,
) -> Result<()> {
    use dialoguer::{Input, Select, theme::ColorfulTheme};

    let theme = ColorfulTheme::default();
    let store = ProjectStore::open_default()?;
    let projects = store.load()?;

    if projects.is_empty() {
        eprintln!(
            "{} No projects registered. Run '{}' first.",
            "✘".red(),
            "quarry project new".blue()
        );
        std::process::exit(1);
    }

    let project: Project = match project {
        Some(name) => match projects.get(name) {
            Some(found) => found.clone(),
            None => {
                eprintln!("{} No such project: {}", "✘".red(), name);
                std::process::exit(1);
            }
        },
        None => {
            let names: Vec<&String> = projects.keys().collect();
            let selection = Select::with_theme(&theme)
                .with_prompt("Project")
                .items(&names)
                .default(0)
                .interact()?;
            projects[selection].clone()
        }
    };

    let executor = match executor {
        Some(name) => name.parse::<BaseCodingAgent>()?,
        None => {
            let labels: Vec<String> = BaseCodingAgent::ALL
                .iter()
                .map(|agent| {
                    if agent.executor().is_available() {
                        agent.label().to_string()
                    } else {
                        format!("{} {}", agent.label(), "(not on PATH)".dimmed())
                    }
                })
                .collect();
            let selection = Select::with_theme(&theme)
                .with_prompt("Executor")
                .items(&labels)
                .default(0)
                .interact()?;
            BaseCodingAgent::ALL[selection]
        }
    };

    let model = match model {
        Some(m) => m.to_string(),
        None => {
            let models = executor.models();
            let selection = Select::with_theme(&theme)
                .with_prompt("Model")
                .items(models)
                .default(0)
                .interact()?;
            models[selection].to_string()
        }
    };

    let prompt = match prompt {
        Some(p) => p.to_string(),
        None => Input::with_theme(&theme)
            .with_prompt("Task prompt (empty to just open the agent)")
            .allow_empty(true)
            .interact_text()?,
    };

    let repository = if project.repositories.len() == 1 {
        &project.repositories[0]
    } else {
        let names: Vec<&str> = project
            .repositories
            .iter()
            .map(|r| r.display_name.as_str())
            .collect();
        let selection = Select::with_theme(&theme)
            .with_prompt("Repository")
            .items(&names)
            .default(0)
            .interact()?;
        &project.repositories[selection]
    };

    let request = AttemptRequest {
        prompt,
        profile: ExecutorProfile::with_model(executor, model),
        working_dir,
    };

    let repo_root = Path::new(&repository.git_repo_path);
    println!(
        "{} {} {}",
        "▶".green(),
        request.command_line().bold(),
        format!("in {}", display_path(repo_root)).dimmed()
    );

    let status = request.launch(repo_root)?;
    if !status.success() {
        eprintln!("{} {} exited with {}", "✘".red(), executor.label(), status);
        std::process::exit(status.code().unwrap_or(1));
    }

    Ok(())
}

// =============================================================================
// Model Listing
// =============================================================================

/// List executors and the models they support.
pub fn do_list_models(executor: Option<&str>) -> Result<()> {
    use comfy_table::{Table, presets::NOTHING};

    let agents: Vec<BaseCodingAgent> = match executor {
        Some(name) => vec![name.parse()?],
        None => BaseCodingAgent::ALL.to_vec(),
    };

    let mut table = Table::new();
    table.load_preset(NOTHING);

    for agent in agents {
        let available = if agent.executor().is_available() {
            "✔".green().to_string()
        } else {
            "✘".dimmed().to_string()
        };
        table.add_row(vec![
            available,
            agent.label().bold().to_string(),
            agent.slug().dimmed().to_string(),
            agent.models().join(", "),
        ]);
    }

    println!("{table}");
    Ok(())
}
