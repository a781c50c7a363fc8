use std::time::Duration;

use async_trait::async_trait;
use quote_core::{
    AgencyApi, ApiConfig, ApiError, EstimateSubmission, FollowupStatus, Lead, LeadInfo,
    PricingConfig,
};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::wire::{ContactPayload, Envelope, EstimatePayload, LeadDto, StatusPatch};

/// [`AgencyApi`] backed by the agency's JSON service.
///
/// | Operation            | Request                 |
/// |----------------------|-------------------------|
/// | pricing config       | `GET {base}/config`     |
/// | estimate / contact   | `POST {base}/leads`     |
/// | list leads           | `GET {base}/leads`      |
/// | update lead status   | `PATCH {base}/leads/{id}` |
#[derive(Debug, Clone)]
pub struct HttpAgencyApi {
    client: Client,
    base_url: String,
}

impl HttpAgencyApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        if config.base_url.trim().is_empty() {
            return Err(ApiError::Configuration("base URL is empty".to_string()));
        }

        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(
        &self,
        path: &str,
    ) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Reads the body of a 2xx response as an [`Envelope`].
    async fn envelope<T: DeserializeOwned>(response: Response) -> Result<Envelope<T>, ApiError> {
        let response = check_status(response).await?;
        response.json::<Envelope<T>>().await.map_err(transport_error)
    }
}

/// Turns a non-2xx response into [`ApiError::Status`].
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_decode() {
        ApiError::Decode(e.to_string())
    } else {
        ApiError::Transport(e.to_string())
    }
}

#[async_trait]
impl AgencyApi for HttpAgencyApi {
    async fn fetch_pricing_config(&self) -> Result<PricingConfig, ApiError> {
        let response = self
            .client
            .get(self.url("config"))
            .send()
            .await
            .map_err(transport_error)?;

        Self::envelope::<PricingConfig>(response).await?.into_data()
    }

    async fn submit_estimate(
        &self,
        submission: &EstimateSubmission,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("leads"))
            .json(&EstimatePayload::from(submission))
            .send()
            .await
            .map_err(transport_error)?;

        Self::envelope::<serde_json::Value>(response).await?.accepted()?;
        info!(email = %submission.lead_info.email, "estimate submitted");
        Ok(())
    }

    async fn submit_contact(
        &self,
        lead: &LeadInfo,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("leads"))
            .json(&ContactPayload::from(lead))
            .send()
            .await
            .map_err(transport_error)?;

        Self::envelope::<serde_json::Value>(response).await?.accepted()?;
        info!(email = %lead.email, "contact request submitted");
        Ok(())
    }

    async fn list_leads(&self) -> Result<Vec<Lead>, ApiError> {
        let response = self
            .client
            .get(self.url("leads"))
            .send()
            .await
            .map_err(transport_error)?;

        let envelope = Self::envelope::<Vec<LeadDto>>(response).await?.accepted()?;
        if let Some(count) = envelope.count {
            debug!(count, "lead list received");
        }
        envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .map(Lead::try_from)
            .collect()
    }

    async fn update_lead_status(
        &self,
        id: &str,
        status: FollowupStatus,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .patch(self.url(&format!("leads/{}", id)))
            .json(&StatusPatch {
                followup_status: status,
            })
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        check_status(response).await?;
        info!(lead = id, status = %status, "lead status updated");
        Ok(())
    }
}
