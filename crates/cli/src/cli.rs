use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quarry")]
#[command(about = "Register multi-repo projects and launch AI coding agents against them")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage projects
    #[command(visible_alias = "projects")]
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },

    /// Launch a task attempt against a project
    Attempt {
        /// Project to run against (prompted if not given)
        project: Option<String>,

        /// Executor to use (claude-code, codex, gemini, opencode)
        #[arg(short, long)]
        executor: Option<String>,

        /// Model override for the selected executor
        #[arg(short, long)]
        model: Option<String>,

        /// Task prompt (prompted if not given)
        #[arg(short, long)]
        prompt: Option<String>,

        /// Run the agent in this path relative to the repository root
        #[arg(short = 'd', long = "working-dir", value_name = "DIR")]
        working_dir: Option<String>,
    },

    /// Scan a folder for git repositories and show the resulting entries
    Scan {
        /// Folder to scan
        path: String,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// List executors and their models
    Models {
        /// Show a single executor
        executor: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a project from a repository or a folder of repositories
    New {
        /// Repository or folder to register (default: current directory)
        path: Option<String>,

        /// Project name (prompted if not given)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List registered projects
    #[command(visible_alias = "ls")]
    List,

    /// Remove a project
    Rm {
        /// Name of the project to remove
        name: String,
    },
}
