//! Bill lifecycle logic: the store, validation, totals and monthly rollover.
//! No terminal I/O; persistence goes through [`crate::storage::StorageBackend`].

pub mod bill_store;
pub mod errors;
pub mod rollover;
pub mod time;
pub mod totals;
pub mod validation;

pub use bill_store::{BillEdit, BillStore, StoreState};
pub use errors::{BillError, Result};
pub use rollover::{advance_due_date, RolloverEngine};
pub use time::{Clock, FixedClock, SystemClock};
pub use totals::{compute_totals, Totals};
pub use validation::{validate_rows, RowError, RowErrorReason};
