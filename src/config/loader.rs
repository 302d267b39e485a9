//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "unable to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "unable to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from a JSON file into the caller's config type.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = serde_json::from_str(&content).map_err(ConfigError::Parse)?;

    Ok(config)
}
