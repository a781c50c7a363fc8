use std::collections::HashMap;

use async_trait::async_trait;

use super::client::{AgencyApi, ApiError};

/// Base URL of the agency's hosted lead and pricing service.
pub const DEFAULT_BASE_URL: &str = "https://api.thevibecoderagency.online/api/axomitlab";

/// Backend-agnostic client configuration.
///
/// `backend` must match the [`ClientFactory::backend_name`] of a registered
/// factory. `base_url` and `timeout_secs` are only meaningful to backends
/// that talk to a remote service.
///
/// | backend  | base_url                                   |
/// |----------|--------------------------------------------|
/// | `http`   | `https://api.thevibecoderagency.online/…`  |
/// | `memory` | ignored                                    |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"http"`).
    pub backend: String,
    pub base_url: String,
    /// Per-request timeout; `0` leaves it to the transport.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

/// One implementation per client backend. Each backend crate exports a
/// unit struct implementing this trait, registered with a
/// [`ClientRegistry`] at startup.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Build a ready-to-use client.
    async fn create(
        &self,
        config: &ApiConfig,
    ) -> Result<Box<dyn AgencyApi>, ApiError>;
}

/// Registry of [`ClientFactory`] instances, keyed by backend name.
pub struct ClientRegistry {
    factories: HashMap<&'static str, Box<dyn ClientFactory>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory, replacing any with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn ClientFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory matching `config.backend`.
    ///
    /// # Errors
    /// * [`ApiError::Configuration`] when no factory is registered for the
    ///   requested backend.
    /// * Any error the chosen factory returns.
    pub async fn create(
        &self,
        config: &ApiConfig,
    ) -> Result<Box<dyn AgencyApi>, ApiError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                ApiError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use crate::models::{EstimateSubmission, FollowupStatus, Lead, LeadInfo, PricingConfig};

    use super::{AgencyApi, ApiConfig, ApiError, ClientFactory, ClientRegistry};

    // ── stub client ──────────────────────────────────────────────────────
    // The tests only check routing, so every call reports NotFound.
    struct StubApi;

    #[async_trait]
    impl AgencyApi for StubApi {
        async fn fetch_pricing_config(&self) -> Result<PricingConfig, ApiError> {
            Err(ApiError::NotFound)
        }
        async fn submit_estimate(
            &self,
            _submission: &EstimateSubmission,
        ) -> Result<(), ApiError> {
            Err(ApiError::NotFound)
        }
        async fn submit_contact(
            &self,
            _lead: &LeadInfo,
        ) -> Result<(), ApiError> {
            Err(ApiError::NotFound)
        }
        async fn list_leads(&self) -> Result<Vec<Lead>, ApiError> {
            Ok(Vec::new())
        }
        async fn update_lead_status(
            &self,
            _id: &str,
            _status: FollowupStatus,
        ) -> Result<(), ApiError> {
            Err(ApiError::NotFound)
        }
    }

    struct StubFactory {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl ClientFactory for StubFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }
        async fn create(
            &self,
            _config: &ApiConfig,
        ) -> Result<Box<dyn AgencyApi>, ApiError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(StubApi))
        }
    }

    struct FailingFactory;

    #[async_trait]
    impl ClientFactory for FailingFactory {
        fn backend_name(&self) -> &'static str {
            "failing"
        }
        async fn create(
            &self,
            _config: &ApiConfig,
        ) -> Result<Box<dyn AgencyApi>, ApiError> {
            Err(ApiError::Transport("intentional failure".to_string()))
        }
    }

    fn stub_factory(name: &'static str) -> (Box<dyn ClientFactory>, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Box::new(StubFactory {
                name,
                called: flag.clone(),
            }),
            flag,
        )
    }

    fn config_for(backend: &str) -> ApiConfig {
        ApiConfig {
            backend: backend.to_string(),
            ..ApiConfig::default()
        }
    }

    // ── ApiConfig ────────────────────────────────────────────────────────
    #[test]
    fn default_config_targets_hosted_service() {
        let cfg = ApiConfig::default();
        assert_eq!(cfg.backend, "http");
        assert!(cfg.base_url.ends_with("/axomitlab"));
    }

    // ── registration ─────────────────────────────────────────────────────
    #[test]
    fn new_registry_has_no_backends() {
        assert!(ClientRegistry::new().available_backends().is_empty());
    }

    #[test]
    fn available_backends_is_sorted() {
        let mut reg = ClientRegistry::new();
        let (f1, _) = stub_factory("memory");
        let (f2, _) = stub_factory("http");
        reg.register(f1);
        reg.register(f2);
        assert_eq!(reg.available_backends(), vec!["http", "memory"]);
    }

    #[test]
    fn duplicate_registration_replaces_previous() {
        let mut reg = ClientRegistry::new();
        let (old, _) = stub_factory("http");
        let (new, _) = stub_factory("http");
        reg.register(old);
        reg.register(new);
        assert_eq!(reg.available_backends(), vec!["http"]);
    }

    // ── dispatch ─────────────────────────────────────────────────────────
    #[tokio::test]
    async fn create_calls_only_matching_factory() {
        let mut reg = ClientRegistry::new();
        let (http, http_called) = stub_factory("http");
        let (memory, memory_called) = stub_factory("memory");
        reg.register(http);
        reg.register(memory);

        let client = reg.create(&config_for("memory")).await;

        assert!(client.is_ok());
        assert!(memory_called.load(Ordering::SeqCst));
        assert!(!http_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn configuration_error_names_requested_and_available_backends() {
        let mut reg = ClientRegistry::new();
        let (f, _) = stub_factory("http");
        reg.register(f);

        match reg.create(&config_for("grpc")).await {
            Err(ApiError::Configuration(msg)) => {
                assert!(msg.contains("grpc"), "error should name the requested backend");
                assert!(msg.contains("http"), "error should list available backends");
            }
            Err(other) => panic!("expected Configuration error, got {other:#?}"),
            Ok(_) => panic!("expected Configuration error, got a client"),
        }
    }

    #[tokio::test]
    async fn create_propagates_factory_error() {
        let mut reg = ClientRegistry::new();
        reg.register(Box::new(FailingFactory));

        let result = reg.create(&config_for("failing")).await;

        assert!(matches!(
            result,
            Err(ApiError::Transport(msg)) if msg == "intentional failure"
        ));
    }
}
