#![doc(test(attr(deny(warnings))))]

//! Bill Tracker keeps a list of recurring bills and a running balance in two
//! JSON documents, with validation on save and a monthly rollover.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod storage;
pub mod utils;

pub use crate::core::{BillError, BillStore, Totals};
pub use crate::domain::{Balance, Bill, BillDraft};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Bill Tracker tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
