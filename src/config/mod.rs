//! Persistent user preferences: where the documents live and how the CLI behaves.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
