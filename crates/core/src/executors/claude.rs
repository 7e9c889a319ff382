//! Claude Code executor.
//!
//! Launches the `claude` CLI. Models are selected with `--model` and accept
//! short aliases (`sonnet`, `opus`, `haiku`); the task prompt is passed as
//! the positional argument.

use super::Executor;

/// Claude Code executor
pub struct ClaudeCode;

impl Executor for ClaudeCode {
    fn name(&self) -> &'static str {
        "claude-code"
    }

    fn program(&self) -> &'static str {
        "claude"
    }

    fn launch_args(&self, model: &str, prompt: &str) -> Vec<String> {
        let mut args = vec!["--model".to_string(), model.to_string()];
        if !prompt.is_empty() {
            args.push(prompt.to_string());
        }
        args
    }
}
