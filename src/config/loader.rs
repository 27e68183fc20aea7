//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::calculation::WorkDetailCalculator;
use crate::error::{EngineError, EngineResult};
use crate::store::{FileStore, KeyValueStore, MemoryStore};

use super::types::{EngineConfig, StoreKind, WorkRules};

/// Loads and provides access to the engine configuration.
///
/// Every section of the file is optional and falls back to its defaults:
///
/// ```text
/// rules:
///   night_window: { start_hour: 22, end_hour: 6 }
///   expense: { threshold_hours: "8", amount_euro: "13.00" }
/// clock:
///   poll_interval_ms: 1000
/// store:
///   kind: file
///   path: ./data
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/shift_engine.yaml").unwrap();
/// let calculator = loader.calculator();
/// let store = loader.open_store().unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - A value is out of range
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shift_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/shift_engine.yaml")?;
    /// # Ok::<(), shift_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let config: EngineConfig = Self::load_yaml(path)?;
        let loader = Self::from_config(config)?;

        info!(
            path = %path.display(),
            night_start_hour = loader.config.rules.night_window.start_hour,
            night_end_hour = loader.config.rules.night_window.end_hour,
            store = ?loader.config.store.kind,
            "Loaded engine configuration"
        );
        Ok(loader)
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> EngineResult<Self> {
        let config: EngineConfig =
            serde_yaml::from_str(yaml).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        Self::from_config(config)
    }

    /// Wraps an already built configuration after validating it.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Loads and parses a single YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the full configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the calculation rules.
    pub fn rules(&self) -> &WorkRules {
        &self.config.rules
    }

    /// Builds a calculator for the configured rules.
    pub fn calculator(&self) -> WorkDetailCalculator {
        WorkDetailCalculator::new(self.config.rules)
    }

    /// Returns how often live tickers should fire.
    pub fn poll_interval(&self) -> Duration {
        self.config.clock.poll_interval()
    }

    /// Opens the configured key-value store.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StoreUnavailable`] if the file store directory
    /// cannot be created.
    pub fn open_store(&self) -> EngineResult<Arc<dyn KeyValueStore>> {
        match (self.config.store.kind, &self.config.store.path) {
            (StoreKind::Memory, _) => Ok(Arc::new(MemoryStore::new())),
            (StoreKind::File, Some(path)) => Ok(Arc::new(FileStore::open(path)?)),
            (StoreKind::File, None) => Err(EngineError::InvalidConfig {
                field: "store.path".to_string(),
                message: "required when store.kind is 'file'".to_string(),
            }),
        }
    }
}
