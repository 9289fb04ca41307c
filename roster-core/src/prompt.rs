//! Capability set of the interactive input source.
//!
//! Every call blocks until the user answers; there is no timeout.

use crate::error::PromptError;

pub trait Prompter {
    /// Free text. May be empty.
    fn ask_text(&mut self, prompt: &str) -> Result<String, PromptError>;

    /// Pick exactly one of `options`.
    fn ask_select_one(&mut self, prompt: &str, options: &[String]) -> Result<String, PromptError>;

    /// Pick any subset of `options`; `defaults` are pre-selected.
    /// The result follows option order.
    fn ask_select_many(
        &mut self,
        prompt: &str,
        options: &[String],
        defaults: &[String],
    ) -> Result<Vec<String>, PromptError>;

    fn ask_confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError>;
}
