//! Real prompter implementation using `dialoguer`.

use anyhow::Result;
use dialoguer::{Input, Password};

use super::Prompter;

/// Real prompter: delegates to `dialoguer` for interactive terminal prompts.
pub struct RealPrompter;

impl Prompter for RealPrompter {
    fn confirm_yes(&self, prompt: &str) -> Result<bool> {
        // An aborted prompt (CTRL-D, closed stdin) counts as "no".
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .unwrap_or_default();
        Ok(answer == "yes")
    }

    fn secret(&self, prompt: &str) -> Result<Option<String>> {
        let value = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .ok();
        Ok(value.filter(|v| !v.is_empty()))
    }
}
