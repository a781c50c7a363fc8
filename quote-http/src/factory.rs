use async_trait::async_trait;
use quote_core::{AgencyApi, ApiConfig, ApiError, ClientFactory};

use crate::client::HttpAgencyApi;
use crate::memory::MemoryAgencyApi;

/// [`ClientFactory`] for the hosted JSON service.
///
/// ```rust,no_run
/// use quote_core::ClientRegistry;
/// use quote_http::HttpClientFactory;
///
/// let mut registry = ClientRegistry::new();
/// registry.register(Box::new(HttpClientFactory));
/// ```
pub struct HttpClientFactory;

#[async_trait]
impl ClientFactory for HttpClientFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    /// Builds a client for `config.base_url`; no request is made here.
    async fn create(
        &self,
        config: &ApiConfig,
    ) -> Result<Box<dyn AgencyApi>, ApiError> {
        Ok(Box::new(HttpAgencyApi::new(config)?))
    }
}

/// [`ClientFactory`] for [`MemoryAgencyApi`]. It carries no pricing, so
/// callers run on the bundled configuration.
pub struct MemoryClientFactory;

#[async_trait]
impl ClientFactory for MemoryClientFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &ApiConfig,
    ) -> Result<Box<dyn AgencyApi>, ApiError> {
        Ok(Box::new(MemoryAgencyApi::new()))
    }
}
