use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::cli::core::CommandError;
use crate::cli::output;
use crate::domain::parse_amount;

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Prompt until the user enters a strictly positive decimal amount.
pub fn prompt_positive_amount(theme: &ColorfulTheme, prompt: &str) -> Result<f64, CommandError> {
    let raw = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), &str> {
            match parse_positive_amount(input) {
                Some(_) => Ok(()),
                None => Err("enter an amount greater than zero"),
            }
        })
        .interact_text()?;
    parse_positive_amount(&raw)
        .ok_or_else(|| CommandError::InvalidArguments(format!("invalid amount `{}`", raw)))
}

/// Parses text as a finite amount greater than zero.
pub fn parse_positive_amount(raw: &str) -> Option<f64> {
    parse_amount(raw).filter(|amount| amount.is_finite() && *amount > 0.0)
}

#[cfg(test)]
mod tests {
    use super::parse_positive_amount;

    #[test]
    fn positive_amounts_only() {
        assert_eq!(parse_positive_amount("12.50"), Some(12.5));
        assert_eq!(parse_positive_amount(" 0.01 "), Some(0.01));
        assert_eq!(parse_positive_amount("0"), None);
        assert_eq!(parse_positive_amount("-4"), None);
        assert_eq!(parse_positive_amount("inf"), None);
        assert_eq!(parse_positive_amount("ten"), None);
    }
}
