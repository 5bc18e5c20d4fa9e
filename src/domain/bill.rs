use serde::{Deserialize, Serialize};

use crate::domain::common::{parse_amount, Amounted, Displayable, NamedEntity};

/// A validated recurring bill as stored in the bills document.
///
/// Field order matches the persisted layout: `amount`, `due_date`, `name`, `paid`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub amount: f64,
    pub due_date: String,
    pub name: String,
    pub paid: bool,
}

impl Bill {
    pub fn new(name: impl Into<String>, due_date: impl Into<String>, amount: f64) -> Self {
        Self {
            amount,
            due_date: due_date.into(),
            name: name.into(),
            paid: false,
        }
    }

    pub fn with_paid(mut self, paid: bool) -> Self {
        self.paid = paid;
        self
    }
}

impl Amounted for Bill {
    fn amount(&self) -> Option<f64> {
        Some(self.amount)
    }
}

/// An editable bill row. Amount and date are kept as the raw text the user
/// entered and only checked when the store validates before saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillDraft {
    pub due_date: String,
    pub name: String,
    pub amount: String,
    pub paid: bool,
}

impl BillDraft {
    pub fn new(
        name: impl Into<String>,
        due_date: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            due_date: due_date.into(),
            name: name.into(),
            amount: amount.into(),
            paid: false,
        }
    }

    /// The template used for interactively added rows.
    pub fn blank() -> Self {
        Self::new("", "", "0.00")
    }

    pub fn with_paid(mut self, paid: bool) -> Self {
        self.paid = paid;
        self
    }
}

impl Default for BillDraft {
    fn default() -> Self {
        Self::blank()
    }
}

impl From<&Bill> for BillDraft {
    fn from(bill: &Bill) -> Self {
        Self {
            due_date: bill.due_date.clone(),
            name: bill.name.clone(),
            amount: format!("{:.2}", bill.amount),
            paid: bill.paid,
        }
    }
}

impl From<Bill> for BillDraft {
    fn from(bill: Bill) -> Self {
        Self::from(&bill)
    }
}

impl NamedEntity for BillDraft {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for BillDraft {
    fn amount(&self) -> Option<f64> {
        parse_amount(&self.amount)
    }
}

impl Displayable for BillDraft {
    fn display_label(&self) -> String {
        if self.name.trim().is_empty() {
            format!("(unnamed) due {}", self.due_date)
        } else {
            format!("{} due {}", self.name, self.due_date)
        }
    }
}

/// Bootstrap content written when no bills document exists yet.
pub fn sample_bills() -> Vec<Bill> {
    vec![
        Bill::new("creditone", "04/02", 0.00).with_paid(true),
        Bill::new("vz affirm", "04/03", 21.78),
        Bill::new("chatGPT", "04/05", 21.73),
        Bill::new("alpha", "04/07", 15.79),
        Bill::new("kia", "04/12", 472.42),
        Bill::new("discover", "03/28", 61.00).with_paid(true),
    ]
}
