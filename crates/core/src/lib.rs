//! Quarry Core - Core library for the quarry project launcher
//!
//! This crate provides the core functionality for quarry including:
//! - Git repository discovery and display-name normalization
//! - The executor and model registry for AI coding agents
//! - Task attempt requests and launch-command building
//! - The on-disk project registry

pub mod attempt;
pub mod discovery;
pub mod executors;
pub mod git;
pub mod project;

// Re-export commonly used types at crate root
pub use attempt::AttemptRequest;
pub use discovery::{DiscoveredRepo, RepositoryInput, normalize_repos, scan_git_repos};
pub use executors::{BaseCodingAgent, Executor, ExecutorProfile};
pub use project::{Project, ProjectStore};
