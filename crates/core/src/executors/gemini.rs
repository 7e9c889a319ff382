//! Gemini CLI executor.
//!
//! Launches the `gemini` CLI. The prompt goes through
//! `--prompt-interactive`, which sends the task and keeps the session open
//! afterwards, matching the behavior of the other executors.

use super::Executor;

/// Gemini CLI executor
pub struct Gemini;

impl Executor for Gemini {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn program(&self) -> &'static str {
        "gemini"
    }

    fn launch_args(&self, model: &str, prompt: &str) -> Vec<String> {
        let mut args = vec!["--model".to_string(), model.to_string()];
        if !prompt.is_empty() {
            args.push("--prompt-interactive".to_string());
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
            Gemini.launch_args("gemini-2.5-pro", "Write docs"),
            vec!["--model", "gemini-2.5-pro", "--prompt-interactive", "Write docs"]
        );
    }

    #[test]
    fn test_empty_prompt_omits_flag() {
        assert_eq!(
            Gemini.launch_args("gemini-2.5-flash", ""),
            vec!["--model", "gemini-2.5-flash"]
        );
    }
}
