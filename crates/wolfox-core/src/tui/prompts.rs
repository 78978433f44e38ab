//! Charm-style overwrite confirmation using cliclack

use crate::driver::Prompter;
use crate::error::{Result, ScaffoldError};

/// Asks on the terminal, defaulting to "no"
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfirmPrompter;

impl Prompter for ConfirmPrompter {
    fn confirm(&self, question: &str) -> Result<bool> {
        cliclack::confirm(question)
            .initial_value(false)
            .interact()
            .map_err(ScaffoldError::Prompt)
    }
}
