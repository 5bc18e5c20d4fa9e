//! Helpers for the fixed `MM/DD` due-date text format.
//!
//! Due dates carry no year. The format check is purely syntactic, so
//! `02/30` passes; calendar validity only matters when a date is advanced.

/// Returns true when `value` is exactly two ASCII digits, `/`, two ASCII digits.
pub fn is_due_date_format(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 5
        && bytes[2] == b'/'
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[3..].iter().all(u8::is_ascii_digit)
}

/// Splits `month/day` text into integers without checking calendar validity.
pub fn parse_month_day(value: &str) -> Option<(u32, u32)> {
    let (month, day) = value.split_once('/')?;
    let month = month.trim().parse::<u32>().ok()?;
    let day = day.trim().parse::<u32>().ok()?;
    Some((month, day))
}

/// Renders a month/day pair as zero-padded `MM/DD`.
pub fn format_month_day(month: u32, day: u32) -> String {
    format!("{:02}/{:02}", month, day)
}
