use async_trait::async_trait;
use thiserror::Error;

use crate::models::{EstimateSubmission, FollowupStatus, Lead, LeadInfo, PricingConfig};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Record not found")]
    NotFound,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    /// The server answered but reported `success: false`.
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Remote operations of the agency's lead and pricing service.
#[async_trait]
pub trait AgencyApi: Send + Sync {
    // Pricing
    async fn fetch_pricing_config(&self) -> Result<PricingConfig, ApiError>;

    // Lead submission
    async fn submit_estimate(
        &self,
        submission: &EstimateSubmission,
    ) -> Result<(), ApiError>;

    async fn submit_contact(
        &self,
        lead: &LeadInfo,
    ) -> Result<(), ApiError>;

    // Lead administration
    async fn list_leads(&self) -> Result<Vec<Lead>, ApiError>;

    async fn update_lead_status(
        &self,
        id: &str,
        status: FollowupStatus,
    ) -> Result<(), ApiError>;
}
