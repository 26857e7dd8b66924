use crate::core::probe::client::ClientOptions;
use crate::core::probe::config::{ProbeOptions, DEFAULT_TIMEOUT_MS};
use crate::core::probe::types::Endpoint;
use crate::core::probe::url::{normalize_locator, validate_locator};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Prober configuration file (`~/.pingcheck/config.toml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-attempt deadline in milliseconds
    pub timeout_ms: u64,
    /// Issue GET when HEAD is not reachable
    pub fallback_to_get: bool,
    /// Follow redirects (up to 10)
    pub follow_redirects: bool,
    /// Honour proxy environment variables
    pub use_system_proxy: bool,
    pub user_agent: String,
    pub endpoints: Vec<Endpoint>,
}

pub fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Config {
    /// Default config location
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(home.join(".pingcheck").join("config.toml"))
    }

    /// Load from the default location, or defaults when the file is missing
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the default config unless one already exists
    ///
    /// Returns the config path.
    pub fn init() -> Result<PathBuf, ConfigError> {
        let path = Self::config_path()?;
        Self::init_at(&path)?;
        Ok(path)
    }

    /// Returns `true` if a new file was written
    pub fn init_at(path: &Path) -> Result<bool, ConfigError> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::default().to_toml()?)?;
        Ok(true)
    }

    pub fn print(&self) -> Result<(), ConfigError> {
        println!("{}", self.to_toml()?);
        Ok(())
    }

    /// Validate timeout and endpoint list
    ///
    /// Endpoints must have a name and a locator that normalizes to a URL
    /// with a host; no two endpoints may normalize to the same URL.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be greater than 0".to_string()));
        }

        let mut seen = HashSet::new();
        for endpoint in &self.endpoints {
            if endpoint.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "endpoint '{}' has an empty name",
                    endpoint.locator
                )));
            }
            validate_locator(&endpoint.locator).map_err(|e| {
                ConfigError::Invalid(format!("endpoint '{}': {}", endpoint.name, e))
            })?;
            let key = normalize_locator(&endpoint.locator);
            if !seen.insert(key.clone()) {
                return Err(ConfigError::Invalid(format!("duplicate locator: {}", key)));
            }
        }
        Ok(())
    }

    /// Replace the endpoint list with ad-hoc locators, each named after itself
    ///
    /// An empty slice keeps the configured endpoints.
    pub fn use_locators(&mut self, locators: &[String]) {
        if locators.is_empty() {
            return;
        }
        self.endpoints = locators
            .iter()
            .map(|locator| Endpoint::new(locator.clone(), locator.clone()))
            .collect();
    }

    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions {
            timeout: Duration::from_millis(self.timeout_ms),
            fallback_to_get: self.fallback_to_get,
        }
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            follow_redirects: self.follow_redirects,
            use_system_proxy: self.use_system_proxy,
            user_agent: self.user_agent.clone(),
        }
    }
}
