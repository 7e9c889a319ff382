//! Task attempt requests.
//!
//! An attempt runs one executor against one repository with a task prompt.
//! The request captures everything the user picked in the attempt workflow;
//! launching it spawns the agent CLI in the target repository and waits for
//! it to exit.

use std::{
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use anyhow::{Context, Result, bail};

use crate::executors::ExecutorProfile;

/// Everything needed to launch one task attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptRequest {
    /// Task prompt handed to the agent
    pub prompt: String,
    /// Executor and optional model override
    pub profile: ExecutorProfile,
    /// Optional path relative to the repository root to run the agent in
    pub working_dir: Option<String>,
}

impl AttemptRequest {
    /// Directory the agent runs in: the repository root joined with the
    /// optional relative working dir.
    pub fn effective_dir(&self, repo_root: &Path) -> PathBuf {
        match &self.working_dir {
            Some(rel) => repo_root.join(rel),
            None => repo_root.to_path_buf(),
        }
    }

    /// The full command line, for display before launching.
    pub fn command_line(&self) -> String {
        let executor = self.profile.executor.executor();
        let mut parts = vec![executor.program().to_string()];
        for arg in executor.launch_args(self.profile.resolved_model(), &self.prompt) {
            if arg.contains(char::is_whitespace) {
                // Single quotes for shell safety (handles $, backticks, newlines)
                parts.push(format!("'{}'", arg.replace('\'', "'\\''")));
            } else {
                parts.push(arg);
            }
        }
        parts.join(" ")
    }

    /// Spawn the agent CLI in the repository and wait for it to exit.
    pub fn launch(&self, repo_root: &Path) -> Result<ExitStatus> {
        let executor = self.profile.executor.executor();
        let dir = self.effective_dir(repo_root);
        if !dir.is_dir() {
            bail!("Working directory does not exist: {}", dir.display());
        }

        Command::new(executor.program())
            .args(executor.launch_args(self.profile.resolved_model(), &self.prompt))
            .current_dir(&dir)
            .status()
            .with_context(|| format!("Failed to launch {}", executor.program()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executors::{BaseCodingAgent, ExecutorProfile};

    #[test]
    fn test_effective_dir() {
        let request = AttemptRequest {
            prompt: String::new(),
            profile: ExecutorProfile::new(BaseCodingAgent::ClaudeCode),
            working_dir: None,
        };
        assert_eq!(
            request.effective_dir(Path::new("/repo")),
            PathBuf::from("/repo")
        );

        let request = AttemptRequest {
            working_dir: Some("services/api".to_string()),
            ..request
        };
        assert_eq!(
            request.effective_dir(Path::new("/repo")),
            PathBuf::from("/repo/services/api")
        );
    }

    #[test]
    fn test_command_line_quotes_prompt() {
        let request = AttemptRequest {
            prompt: "Fix the login bug".to_string(),
            profile: ExecutorProfile::with_model(BaseCodingAgent::ClaudeCode, "opus"),
            working_dir: None,
        };
        assert_eq!(
            request.command_line(),
            "claude --model opus 'Fix the login bug'"
        );
    }

    #[test]
    fn test_command_line_uses_default_model() {
        let request = AttemptRequest {
            prompt: String::new(),
            profile: ExecutorProfile::new(BaseCodingAgent::Codex),
            working_dir: None,
        };
        assert_eq!(request.command_line(), "codex -m gpt-5-codex");
    }
}
