//! Month-end rollover: advance every due date by one calendar month, clear
//! paid flags and zero the balance.

use chrono::{Datelike, NaiveDate};

use crate::core::time::{Clock, SystemClock};
use crate::domain::{due_date::format_month_day, parse_month_day, Balance, BillDraft};

/// Advances `MM/DD` text by one month, resolving day counts against `year`.
///
/// Text that is not a real date in `year` (including unparseable text) is
/// returned unchanged. The day is clamped to the length of the next month,
/// so `01/31` becomes `02/28` or `02/29`.
pub fn advance_due_date(mmdd: &str, year: i32) -> String {
    let Some((month, day)) = parse_month_day(mmdd) else {
        return mmdd.to_string();
    };
    let Some(current) = NaiveDate::from_ymd_opt(year, month, day) else {
        return mmdd.to_string();
    };
    let next = shift_one_month(current);
    format_month_day(next.month(), next.day())
}

fn shift_one_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Produces next month's rows and balance, resolving the year from a [`Clock`].
pub struct RolloverEngine {
    clock: Box<dyn Clock>,
}

impl RolloverEngine {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
        }
    }

    /// Advances a single due date using the clock's current year.
    pub fn advance_date(&self, mmdd: &str) -> String {
        advance_due_date(mmdd, self.clock.current_year())
    }

    /// Returns rolled copies of `rows` together with a zeroed balance.
    pub fn roll(&self, rows: &[BillDraft]) -> (Vec<BillDraft>, Balance) {
        let year = self.clock.current_year();
        let rolled = rows
            .iter()
            .map(|row| BillDraft {
                due_date: advance_due_date(&row.due_date, year),
                paid: false,
                ..row.clone()
            })
            .collect();
        (rolled, Balance::default())
    }
}

impl Default for RolloverEngine {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;

    #[test]
    fn end_of_january_clamps_to_february_length() {
        assert_eq!(advance_due_date("01/31", 2023), "02/28");
        assert_eq!(advance_due_date("01/31", 2024), "02/29");
    }

    #[test]
    fn december_wraps_to_january() {
        assert_eq!(advance_due_date("12/15", 2025), "01/15");
        assert_eq!(advance_due_date("12/31", 2025), "01/31");
    }

    #[test]
    fn impossible_dates_are_left_alone() {
        assert_eq!(advance_due_date("13/40", 2025), "13/40");
        assert_eq!(advance_due_date("02/30", 2025), "02/30");
        assert_eq!(advance_due_date("02/29", 2023), "02/29");
        assert_eq!(advance_due_date("", 2025), "");
        assert_eq!(advance_due_date("soon", 2025), "soon");
    }

    #[test]
    fn leap_day_advances_in_leap_year() {
        assert_eq!(advance_due_date("02/29", 2024), "03/29");
    }

    #[test]
    fn output_is_zero_padded() {
        assert_eq!(advance_due_date("4/2", 2025), "05/02");
        assert_eq!(advance_due_date("03/31", 2025), "04/30");
    }

    #[test]
    fn roll_resets_paid_and_balance() {
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        let engine = RolloverEngine::new(clock);
        let rows = vec![BillDraft::new("rent", "03/31", "50").with_paid(true)];

        let (rolled, balance) = engine.roll(&rows);

        assert_eq!(rolled[0].due_date, "04/30");
        assert!(!rolled[0].paid);
        assert_eq!(rolled[0].amount, "50");
        assert_eq!(rolled[0].name, "rent");
        assert_eq!(balance.balance, 0.0);
    }
}
