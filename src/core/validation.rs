use std::fmt;

use crate::domain::{is_due_date_format, parse_amount, Bill, BillDraft, NamedEntity};

/// Why a row was rejected at save time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowErrorReason {
    InvalidAmount,
    InvalidDateFormat,
}

impl fmt::Display for RowErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RowErrorReason::InvalidAmount => "invalid amount",
            RowErrorReason::InvalidDateFormat => "invalid date format",
        };
        f.write_str(label)
    }
}

/// A single rejected row, identified by position and the name as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub index: usize,
    pub name: String,
    pub reason: RowErrorReason,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.trim().is_empty() {
            write!(f, "row {}: {}", self.index + 1, self.reason)
        } else {
            write!(f, "{}: {}", self.name, self.reason)
        }
    }
}

/// Validates every row and returns either all normalised bills or all failures.
///
/// Amount is checked before the date; a row stops at its first failing field
/// but sibling rows are always checked.
pub fn validate_rows(rows: &[BillDraft]) -> Result<Vec<Bill>, Vec<RowError>> {
    let mut bills = Vec::with_capacity(rows.len());
    let mut errors = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match validate_row(row) {
            Ok(bill) => bills.push(bill),
            Err(reason) => errors.push(RowError {
                index,
                name: row.name().to_string(),
                reason,
            }),
        }
    }

    if errors.is_empty() {
        Ok(bills)
    } else {
        Err(errors)
    }
}

fn validate_row(row: &BillDraft) -> Result<Bill, RowErrorReason> {
    // JSON has no representation for inf or NaN.
    let amount = parse_amount(&row.amount)
        .filter(|amount| amount.is_finite())
        .ok_or(RowErrorReason::InvalidAmount)?;
    let due_date = row.due_date.trim();
    if !is_due_date_format(due_date) {
        return Err(RowErrorReason::InvalidDateFormat);
    }
    Ok(Bill {
        amount,
        due_date: due_date.to_string(),
        name: row.name.trim().to_string(),
        paid: row.paid,
    })
}
