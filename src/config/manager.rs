use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{
    config::{Config, ConfigError},
    utils::persistence::write_atomic,
};

/// Overrides the location of the configuration file.
pub const CONFIG_ENV: &str = "BILL_TRACKER_CONFIG";

const APP_DIR: &str = "bill_tracker";
const CONFIG_FILE: &str = "config.json";

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Uses `BILL_TRACKER_CONFIG` when set, otherwise the platform config dir.
    pub fn from_env() -> Self {
        if let Some(custom) = env::var_os(CONFIG_ENV) {
            return Self::new(PathBuf::from(custom));
        }
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the config file, falling back to defaults when it is absent.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        write_atomic(&self.config_path, &json)?;
        Ok(())
    }
}
