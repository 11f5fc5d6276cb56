use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::cli::core::CommandError;
use crate::cli::output;
use crate::cli::ui::test_mode::{self, TextTestInput};

/// Print an informational message via the standard CLI output helpers.
pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

/// Print a warning message via the standard CLI output helpers.
pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

/// Print an error message via the standard CLI output helpers.
pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

/// Print a success message via the standard CLI output helpers.
pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

/// Prompt the user for confirmation with a yes/no question.
///
/// Scripted runs answer with the next text input (`y`/`yes` confirms).
pub fn confirm_action(prompt: &str, default: bool) -> Result<bool, CommandError> {
    if let Some(scripted) = test_mode::next_text_input(prompt) {
        return Ok(match scripted {
            TextTestInput::Value(value) => {
                matches!(value.trim().to_ascii_lowercase().as_str(), "y" | "yes")
            }
            TextTestInput::Keep => default,
            _ => false,
        });
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}
