use std::{fs, path::Path};

use serde::de::DeserializeOwned;

use crate::{
    core::errors::{BillError, Result},
    domain::{Balance, Bill},
    utils::persistence::write_atomic,
};

use super::{StorageBackend, StoragePaths};

/// Filesystem-backed JSON persistence for the bills and balance documents.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    paths: StoragePaths,
}

impl JsonStorage {
    pub fn new(paths: StoragePaths) -> Self {
        Self { paths }
    }

    /// Stores both documents under `dir` with the default file names.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(StoragePaths::in_dir(dir))
    }

    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }
}

impl StorageBackend for JsonStorage {
    fn load_bills(&self) -> Result<Option<Vec<Bill>>> {
        read_document(&self.paths.bills_file)
    }

    fn save_bills(&self, bills: &[Bill]) -> Result<()> {
        let json = serde_json::to_string_pretty(bills)?;
        write_atomic(&self.paths.bills_file, &json)?;
        Ok(())
    }

    fn load_balance(&self) -> Result<Option<Balance>> {
        read_document(&self.paths.balance_file)
    }

    fn save_balance(&self, balance: &Balance) -> Result<()> {
        let json = serde_json::to_string(balance)?;
        write_atomic(&self.paths.balance_file, &json)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "{} + {}",
            self.paths.bills_file.display(),
            self.paths.balance_file.display()
        )
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map(Some).map_err(|err| {
        BillError::StorageError(format!("`{}` is malformed: {}", path.display(), err))
    })
}
