use crate::domain::{Amounted, Balance, BillDraft};

/// Derived figures shown after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    /// Sum of amounts over unpaid rows.
    pub unpaid_total: f64,
    /// Balance minus the amounts of rows already marked paid.
    pub remaining_balance: f64,
}

impl Totals {
    pub fn is_over_budget(&self) -> bool {
        self.remaining_balance < 0.0
    }
}

/// Computes totals, skipping rows whose amount text does not parse.
pub fn compute_totals(rows: &[BillDraft], balance: &Balance) -> Totals {
    rows.iter()
        .filter_map(|row| row.amount().map(|amount| (amount, row.paid)))
        .fold(
            Totals {
                unpaid_total: 0.0,
                remaining_balance: balance.balance,
            },
            |mut totals, (amount, paid)| {
                if paid {
                    totals.remaining_balance -= amount;
                } else {
                    totals.unpaid_total += amount;
                }
                totals
            },
        )
}
