//! Shared traits and parsing helpers for bill records.

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
///
/// Draft rows carry raw text, so the amount is optional: `None` means the
/// text does not currently parse as a number.
pub trait Amounted {
    fn amount(&self) -> Option<f64>;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Parses a decimal amount, ignoring surrounding whitespace.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}
