//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{PayrollError, PayrollResult};

use super::types::AppConfig;

/// Loads and provides access to the service configuration.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml")?;
/// println!("Listening on {}", loader.config().server.bind_address);
/// # Ok::<(), payroll_engine::error::PayrollError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the given YAML file.
    ///
    /// # Errors
    ///
    /// `ConfigNotFound` if the file cannot be read and `ConfigParseError`
    /// if it is not valid YAML of the expected shape.
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml(&path_str, &content)
    }

    /// Loads configuration from the given file, falling back to defaults
    /// when the file does not exist.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        match Self::load(path) {
            Err(PayrollError::ConfigNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Parses configuration from YAML text; `source` names it in errors.
    pub fn from_yaml(source: &str, content: &str) -> PayrollResult<Self> {
        // An empty document deserializes as unit, not as an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config =
            serde_yaml::from_str(content).map_err(|e| PayrollError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> AppConfig {
        self.config
    }
}
