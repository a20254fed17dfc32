//! Shared helpers for command handlers.

use std::io::IsTerminal;

use crate::error::CliError;

/// Ask for confirmation before a destructive action.
///
/// `--yes` skips the prompt; a non-interactive stdin without `--yes` is
/// an error rather than a hang.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool, CliError> {
    if yes {
        return Ok(true);
    }

    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: prompt.into(),
        });
    }

    Ok(dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

/// Prompt for a line of input when the flag was omitted.
pub fn prompt_or(value: Option<String>, prompt: &str) -> Result<String, CliError> {
    match value {
        Some(v) => Ok(v),
        None => Ok(dialoguer::Input::new().with_prompt(prompt).interact_text()?),
    }
}
