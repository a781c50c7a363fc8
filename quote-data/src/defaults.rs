use quote_core::PricingConfig;

use crate::loader::{PricingConfigLoader, PricingConfigLoaderError};

/// The agency's published price list, compiled into the binary.
pub const DEFAULT_PRICING_TOML: &str = include_str!("../data/default_pricing.toml");

/// Parses the bundled price list.
///
/// Fails only if the bundled file itself is broken.
pub fn default_pricing_config() -> Result<PricingConfig, PricingConfigLoaderError> {
    PricingConfigLoader::parse_toml(DEFAULT_PRICING_TOML)
}
