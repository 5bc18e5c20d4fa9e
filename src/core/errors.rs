use std::result::Result as StdResult;

use thiserror::Error;

use crate::core::validation::RowError;

/// Unified error type for the core and storage layers.
#[derive(Error, Debug)]
pub enum BillError {
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Invalid entries: {}", format_row_errors(.0))]
    Validation(Vec<RowError>),
    #[error("Row {index} is out of range ({len} bills)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, BillError>;

impl BillError {
    /// Per-row failures when this is a validation error.
    pub fn row_errors(&self) -> Option<&[RowError]> {
        match self {
            BillError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

fn format_row_errors(errors: &[RowError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<std::io::Error> for BillError {
    fn from(err: std::io::Error) -> Self {
        BillError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BillError {
    fn from(err: serde_json::Error) -> Self {
        BillError::StorageError(err.to_string())
    }
}

impl From<crate::config::ConfigError> for BillError {
    fn from(err: crate::config::ConfigError) -> Self {
        match err {
            crate::config::ConfigError::Io(io) => BillError::StorageError(io.to_string()),
            crate::config::ConfigError::Serde(message) => BillError::ConfigError(message),
        }
    }
}
