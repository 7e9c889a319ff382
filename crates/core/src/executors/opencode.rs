//! OpenCode executor.
//!
//! Launches the `opencode` CLI. OpenCode is multi-provider, so models are
//! qualified as `provider/model` (e.g. `anthropic/claude-sonnet-4-5`); the
//! prompt is handed over with `--prompt`.

use super::Executor;

/// OpenCode executor
pub struct Opencode;

impl Executor for Opencode {
    fn name(&self) -> &'static str {
        "opencode"
    }

    fn program(&self) -> &'static str {
        "opencode"
    }

    fn launch_args(&self, model: &str, prompt: &str) -> Vec<String> {
        let mut args = vec!["--model".to_string(), model.to_string()];
        if !prompt.is_empty() {
            args.push("--prompt".to_string());
            args.push(prompt.to_string());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_args() {
        assert_eq!(
            Opencode.launch_args("openai/gpt-5", "Refactor the parser"),
            vec!["--model", "openai/gpt-5", "--prompt", "Refactor the parser"]
        );
    }
}
