pub mod client;
pub mod decimal;
pub mod factory;
pub mod memory;
mod wire;

pub use client::HttpAgencyApi;
pub use factory::{HttpClientFactory, MemoryClientFactory};
pub use memory::MemoryAgencyApi;

use quote_core::ClientRegistry;

/// A registry with every backend this crate provides.
pub fn default_registry() -> ClientRegistry {
    let mut registry = ClientRegistry::new();
    registry.register(Box::new(HttpClientFactory));
    registry.register(Box::new(MemoryClientFactory));
    registry
}
