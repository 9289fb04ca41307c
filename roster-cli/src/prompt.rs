//! Terminal implementation of [`Prompter`] backed by dialoguer.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use roster_core::{PromptError, Prompter};

pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

fn map_err(err: dialoguer::Error) -> PromptError {
    match err {
        dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => {
            PromptError::Interrupted
        }
        dialoguer::Error::IO(e) => PromptError::Io(e),
    }
}

impl Prompter for TerminalPrompter {
    fn ask_text(&mut self, prompt: &str) -> Result<String, PromptError> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(map_err)
    }

    fn ask_select_one(&mut self, prompt: &str, options: &[String]) -> Result<String, PromptError> {
        if options.is_empty() {
            return Err(PromptError::NoOptions {
                prompt: prompt.to_string(),
            });
        }
        let idx = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(options)
            .default(0)
            .interact()
            .map_err(map_err)?;
        Ok(options[idx].clone())
    }

    fn ask_select_many(
        &mut self,
        prompt: &str,
        options: &[String],
        defaults: &[String],
    ) -> Result<Vec<String>, PromptError> {
        let checked: Vec<bool> = options.iter().map(|o| defaults.contains(o)).collect();
        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(options)
            .defaults(&checked)
            .interact()
            .map_err(map_err)?;
        Ok(picked.into_iter().map(|i| options[i].clone()).collect())
    }

    fn ask_confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(map_err)
    }
}
