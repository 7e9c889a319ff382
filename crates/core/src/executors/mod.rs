//! Executor implementations for AI coding agents.
//!
//! An executor wraps one agent CLI (Claude Code, Codex, Gemini CLI,
//! OpenCode): it knows the binary name, the flag syntax for selecting a
//! model, and how to hand over the task prompt. The model registry is a
//! static table keyed by [`BaseCodingAgent`]; the first model listed for an
//! agent is its default.

mod claude;
mod codex;
mod gemini;
mod opencode;

use std::{fmt, str::FromStr};

use anyhow::bail;
pub use claude::ClaudeCode;
pub use codex::Codex;
pub use gemini::Gemini;
pub use opencode::Opencode;
use serde::{Deserialize, Serialize};

/// The supported coding agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BaseCodingAgent {
    ClaudeCode,
    Codex,
    Gemini,
    Opencode,
}

impl BaseCodingAgent {
    pub const ALL: [BaseCodingAgent; 4] = [
        Self::ClaudeCode,
        Self::Codex,
        Self::Gemini,
        Self::Opencode,
    ];

    /// Human-readable label for prompts and listings
    pub fn label(self) -> &'static str {
        match self {
            Self::ClaudeCode => "Claude Code",
            Self::Codex => "Codex",
            Self::Gemini => "Gemini CLI",
            Self::Opencode => "OpenCode",
        }
    }

    /// Stable identifier used in config and on the command line
    pub fn slug(self) -> &'static str {
        match self {
            Self::ClaudeCode => "claude-code",
            Self::Codex => "codex",
            Self::Gemini => "gemini",
            Self::Opencode => "opencode",
        }
    }

    /// Ordered model identifiers for this agent; the first entry is the
    /// default offered in the attempt workflow.
    pub fn models(self) -> &'static [&'static str] {
        match self {
            Self::ClaudeCode => &["sonnet", "opus", "haiku"],
            Self::Codex => &["gpt-5-codex", "gpt-5", "gpt-5-mini"],
            Self::Gemini => &["gemini-2.5-pro", "gemini-2.5-flash"],
            Self::Opencode => &[
                "anthropic/claude-sonnet-4-5",
                "openai/gpt-5",
                "google/gemini-2.5-pro",
            ],
        }
    }

    pub fn default_model(self) -> &'static str {
        self.models()[0]
    }

    /// The executor implementation for this agent
    pub fn executor(self) -> Box<dyn Executor> {
        match self {
            Self::ClaudeCode => Box::new(ClaudeCode),
            Self::Codex => Box::new(Codex),
            Self::Gemini => Box::new(Gemini),
            Self::Opencode => Box::new(Opencode),
        }
    }
}

impl fmt::Display for BaseCodingAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for BaseCodingAgent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.trim().to_ascii_lowercase().replace('_', "-");
        for agent in Self::ALL {
            if folded == agent.slug() {
                return Ok(agent);
            }
        }
        // Accept the bare binary name as a convenience
        match folded.as_str() {
            "claude" => Ok(Self::ClaudeCode),
            _ => bail!(
                "Unknown executor '{}' (expected one of: claude-code, codex, gemini, opencode)",
                s
            ),
        }
    }
}

/// Executor plus optional model override, as selected for an attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutorProfile {
    pub executor: BaseCodingAgent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ExecutorProfile {
    pub fn new(executor: BaseCodingAgent) -> Self {
        Self {
            executor,
            model: None,
        }
    }

    pub fn with_model(executor: BaseCodingAgent, model: impl Into<String>) -> Self {
        Self {
            executor,
            model: Some(model.into()),
        }
    }

    /// The model override if set, otherwise the agent's default
    pub fn resolved_model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.executor.default_model())
    }
}

/// Trait for agent launch commands
///
/// Each executor knows how to start an interactive session of one agent CLI
/// with a selected model and an initial task prompt.
pub trait Executor {
    /// Executor name for display/config
    fn name(&self) -> &'static str;

    /// Binary looked up on PATH
    fn program(&self) -> &'static str;

    /// Arguments launching an interactive session with the given model and
    /// prompt. An empty prompt launches the agent without an initial task.
    fn launch_args(&self, model: &str, prompt: &str) -> Vec<String>;

    /// Check whether the binary is on PATH
    fn is_available(&self) -> bool {
        let Some(paths) = std::env::var_os("PATH") else {
            return false;
        };
        std::env::split_paths(&paths).any(|dir| dir.join(self.program()).is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slugs_and_aliases() {
        assert_eq!(
            "claude-code".parse::<BaseCodingAgent>().unwrap(),
            BaseCodingAgent::ClaudeCode
        );
        assert_eq!(
            "CLAUDE_CODE".parse::<BaseCodingAgent>().unwrap(),
            BaseCodingAgent::ClaudeCode
        );
        assert_eq!(
            "claude".parse::<BaseCodingAgent>().unwrap(),
            BaseCodingAgent::ClaudeCode
        );
        assert_eq!(
            " codex ".parse::<BaseCodingAgent>().unwrap(),
            BaseCodingAgent::Codex
        );
        assert!("cursor".parse::<BaseCodingAgent>().is_err());
    }

    #[test]
    fn test_every_agent_has_models() {
        for agent in BaseCodingAgent::ALL {
            assert!(!agent.models().is_empty());
            assert_eq!(agent.default_model(), agent.models()[0]);
        }
    }

    #[test]
    fn test_display_round_trips() {
        for agent in BaseCodingAgent::ALL {
            assert_eq!(agent.to_string().parse::<BaseCodingAgent>().unwrap(), agent);
        }
    }

    #[test]
    fn test_serde_representation() {
        let json = serde_json::to_string(&BaseCodingAgent::ClaudeCode).unwrap();
        assert_eq!(json, r#""CLAUDE_CODE""#);
        let parsed: BaseCodingAgent = serde_json::from_str(r#""OPENCODE""#).unwrap();
        assert_eq!(parsed, BaseCodingAgent::Opencode);
    }

    #[test]
    fn test_profile_resolved_model() {
        let profile = ExecutorProfile::new(BaseCodingAgent::ClaudeCode);
        assert_eq!(profile.resolved_model(), "sonnet");

        let profile = ExecutorProfile::with_model(BaseCodingAgent::ClaudeCode, "opus");
        assert_eq!(profile.resolved_model(), "opus");
    }
}
