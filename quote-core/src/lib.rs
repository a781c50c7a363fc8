pub mod api;
pub mod calculations;
pub mod dashboard;
pub mod models;

#[cfg(test)]
mod test_support;

pub use api::{AgencyApi, ApiConfig, ApiError, ClientFactory, ClientRegistry};
pub use calculations::{AddOnError, AddOnToggle, QuotationEngine, quote, toggle_addon};
pub use dashboard::{LeadStats, filter_leads, leads_with_status};
pub use models::*;
