use std::{
    env,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::storage::{StoragePaths, BALANCE_FILE, BILLS_FILE};

/// Overrides the directory holding the bills and balance documents.
pub const HOME_ENV: &str = "BILL_TRACKER_HOME";

/// Stores user-configurable preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the documents. Defaults to `~/Documents`.
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_bills_file")]
    pub bills_file: String,
    #[serde(default = "Config::default_balance_file")]
    pub balance_file: String,
    #[serde(default = "Config::default_true")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_true")]
    pub confirm_rollover: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            bills_file: Self::default_bills_file(),
            balance_file: Self::default_balance_file(),
            ui_color_enabled: true,
            confirm_rollover: true,
        }
    }
}

impl Config {
    pub fn default_bills_file() -> String {
        BILLS_FILE.into()
    }

    pub fn default_balance_file() -> String {
        BALANCE_FILE.into()
    }

    fn default_true() -> bool {
        true
    }

    /// Resolves the documents directory: `BILL_TRACKER_HOME`, then the
    /// configured `data_dir`, then the user's Documents folder.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn storage_paths(&self) -> StoragePaths {
        self.storage_paths_in(&self.resolve_data_dir())
    }

    /// Applies the configured file names inside `dir`.
    pub fn storage_paths_in(&self, dir: &Path) -> StoragePaths {
        StoragePaths {
            bills_file: dir.join(&self.bills_file),
            balance_file: dir.join(&self.balance_file),
        }
    }
}
