pub mod client;
pub mod factory;

pub use client::{AgencyApi, ApiError};
pub use factory::{ApiConfig, ClientFactory, ClientRegistry, DEFAULT_BASE_URL};
