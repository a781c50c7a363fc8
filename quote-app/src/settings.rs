//! Application settings file.
//!
//! ```toml
//! [api]
//! backend = "http"
//! base_url = "https://api.thevibecoderagency.online/api/axomitlab"
//! timeout_secs = 10
//!
//! [logging]
//! level = "info"
//! file = "cost-estimator.log"
//! stdout = true
//! ```
//!
//! Every key is optional. The file is looked up in this order: the
//! `--settings` flag, `$COST_ESTIMATOR_SETTINGS`, then `./cost-estimator.toml`
//! if it exists. `$COST_ESTIMATOR_API_URL` overrides `api.base_url`.

use std::fs;
use std::path::{Path, PathBuf};

use quote_core::ApiConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const SETTINGS_ENV: &str = "COST_ESTIMATOR_SETTINGS";
pub const API_URL_ENV: &str = "COST_ESTIMATOR_API_URL";
pub const DEFAULT_SETTINGS_FILE: &str = "cost-estimator.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiSection {
    pub backend: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        let config = ApiConfig::default();
        Self {
            backend: config.backend,
            base_url: config.base_url,
            timeout_secs: config.timeout_secs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// Level or full `EnvFilter` directive.
    pub level: String,
    /// Append log records to this file as well.
    pub file: Option<PathBuf>,
    pub stdout: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            stdout: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppSettings {
    pub api: ApiSection,
    pub logging: LoggingSection,
}

impl AppSettings {
    pub fn parse(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: display.clone(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| SettingsError::Parse {
            path: display,
            source,
        })
    }

    /// Picks the settings file to read, if any.
    ///
    /// An explicit path or environment value is returned even if it does not
    /// exist so that a typo is reported rather than ignored.
    pub fn locate(
        explicit: Option<&Path>,
        env_value: Option<String>,
        default_file: &Path,
    ) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
            return Some(PathBuf::from(value));
        }
        default_file.is_file().then(|| default_file.to_path_buf())
    }

    /// Loads settings from the first location found, applying the base URL
    /// environment override. Returns the file that was read, if any.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), SettingsError> {
        let path = Self::locate(
            explicit,
            std::env::var(SETTINGS_ENV).ok(),
            Path::new(DEFAULT_SETTINGS_FILE),
        );

        let settings = match &path {
            Some(path) => Self::read(path)?,
            None => Self::default(),
        };
        debug!(path = ?path, "settings resolved");

        Ok((
            settings.with_api_url_override(std::env::var(API_URL_ENV).ok()),
            path,
        ))
    }

    /// Replaces the base URL unless `url` is absent or blank.
    pub fn with_api_url_override(
        mut self,
        url: Option<String>,
    ) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        self
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            backend: self.api.backend.clone(),
            base_url: self.api.base_url.clone(),
            timeout_secs: self.api.timeout_secs,
        }
    }
}
