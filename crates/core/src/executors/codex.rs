//! Codex executor.
//!
//! Launches the `codex` CLI. Codex takes the model with the short `-m` flag
//! and the task prompt as a positional argument.

use super::Executor;

/// Codex executor
pub struct Codex;

impl Executor for Codex {
    fn name(&self) -> &'static str {
        "codex"
    }

    fn program(&self) -> &'static str {
        "codex"
    }

    fn launch_args(&self, model: &str, prompt: &str) -> Vec<String> {
        let mut args = vec!["-m".to_string(), model.to_string()];
        if !prompt.is_empty() {
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
            Codex.launch_args("gpt-5-codex", "Add retries"),
            vec!["-m", "gpt-5-codex", "Add retries"]
        );
    }
}
