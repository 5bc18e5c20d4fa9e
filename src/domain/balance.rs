use serde::{Deserialize, Serialize};

/// Tracked available funds, persisted independently of the bill list.
///
/// The value may go negative; that is a display signal, not an error.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Balance {
    #[serde(default)]
    pub balance: f64,
}

impl Balance {
    pub fn new(balance: f64) -> Self {
        Self { balance }
    }

    /// Applies a signed delta to the balance.
    pub fn apply(&mut self, delta: f64) {
        self.balance += delta;
    }

    pub fn reset(&mut self) {
        self.balance = 0.0;
    }
}
