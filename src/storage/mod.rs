pub mod json_backend;

use std::path::{Path, PathBuf};

use crate::{
    core::errors::Result,
    domain::{Balance, Bill},
};

pub const BILLS_FILE: &str = "bills.json";
pub const BALANCE_FILE: &str = "balance.json";

/// Abstraction over persistence backends for the bills and balance documents.
///
/// The two documents are written independently; a failure between the two
/// writes can leave them out of step with each other.
pub trait StorageBackend: Send + Sync {
    /// Returns `None` when the bills document does not exist yet.
    fn load_bills(&self) -> Result<Option<Vec<Bill>>>;
    fn save_bills(&self, bills: &[Bill]) -> Result<()>;
    /// Returns `None` when the balance document does not exist yet.
    fn load_balance(&self) -> Result<Option<Balance>>;
    fn save_balance(&self, balance: &Balance) -> Result<()>;

    /// Human readable location, used in logs and the CLI.
    fn describe(&self) -> String;
}

/// Locations of the two persisted documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub bills_file: PathBuf,
    pub balance_file: PathBuf,
}

impl StoragePaths {
    /// Uses the default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            bills_file: dir.join(BILLS_FILE),
            balance_file: dir.join(BALANCE_FILE),
        }
    }
}

pub use json_backend::JsonStorage;
