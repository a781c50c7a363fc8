use std::fs;
use std::path::Path;

use quote_core::{AgencyApi, PricingConfig, PricingConfigError};
use thiserror::Error;
use tracing::{info, warn};

use crate::defaults::default_pricing_config;

/// Errors that can occur when reading a pricing configuration.
#[derive(Debug, Error)]
pub enum PricingConfigLoaderError {
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid pricing configuration: {0}")]
    Invalid(#[from] PricingConfigError),

    #[error("Unsupported configuration file '{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where the session's pricing configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Remote,
    Bundled,
    File,
}

/// A validated configuration plus its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPricing {
    pub config: PricingConfig,
    pub source: ConfigSource,
}

/// Loader for pricing configurations.
///
/// Every configuration it returns has passed [`PricingConfig::validate`].
pub struct PricingConfigLoader;

impl PricingConfigLoader {
    pub fn parse_toml(input: &str) -> Result<PricingConfig, PricingConfigLoaderError> {
        let config: PricingConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn parse_json(input: &str) -> Result<PricingConfig, PricingConfigLoaderError> {
        let config: PricingConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a `.toml` or `.json` configuration file.
    pub fn read_file(path: &Path) -> Result<PricingConfig, PricingConfigLoaderError> {
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|source| PricingConfigLoaderError::Io {
            path: display.clone(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::parse_toml(&contents),
            Some("json") => Self::parse_json(&contents),
            _ => Err(PricingConfigLoaderError::UnsupportedFormat(display)),
        }
    }

    /// Fetch the configuration once from `api`, falling back to the bundled
    /// price list when the call fails or returns an unusable payload.
    ///
    /// There is no retry; the first failure falls back immediately. The
    /// error is only ever an unusable bundled price list.
    pub async fn load(api: &dyn AgencyApi) -> Result<LoadedPricing, PricingConfigLoaderError> {
        let fallback_reason = match api.fetch_pricing_config().await {
            Ok(config) => match config.validate() {
                Ok(()) => {
                    info!("using remote pricing configuration");
                    return Ok(LoadedPricing {
                        config,
                        source: ConfigSource::Remote,
                    });
                }
                Err(e) => e.to_string(),
            },
            Err(e) => e.to_string(),
        };

        warn!(reason = %fallback_reason, "remote pricing unavailable; using bundled configuration");
        Ok(LoadedPricing {
            config: default_pricing_config()?,
            source: ConfigSource::Bundled,
        })
    }
}
