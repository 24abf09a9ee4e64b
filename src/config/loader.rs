//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! engine's statutory constants from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::EngineConfig;

/// Loads and provides access to the engine's configuration.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let config = ConfigLoader::load("./config/engine.yaml").unwrap();
/// println!("PT amount: {}", config.config().pt_amount);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the given YAML file.
    ///
    /// Returns `ConfigNotFound` if the file does not exist and
    /// `ConfigParseError` if it exists but is not valid YAML for
    /// [`EngineConfig`]. Fields absent from the file fall back to their
    /// `serde(default)` values, so a partial override file is valid.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })?;

        Ok(Self { config })
    }

    /// Returns a loader wrapping the hardcoded defaults, for callers with
    /// no configuration file to load.
    pub fn defaults() -> Self {
        Self {
            config: EngineConfig::defaults(),
        }
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
