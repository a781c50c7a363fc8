pub mod defaults;
pub mod export;
pub mod loader;

pub use defaults::default_pricing_config;
pub use export::{LeadCsvExporter, LeadCsvRecord, LeadExportError};
pub use loader::{ConfigSource, LoadedPricing, PricingConfigLoader, PricingConfigLoaderError};
