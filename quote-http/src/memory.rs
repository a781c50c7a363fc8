use async_trait::async_trait;
use chrono::Utc;
use quote_core::{
    AgencyApi, ApiError, EstimateSubmission, FollowupStatus, FormType, Lead, LeadInfo,
    PricingConfig,
};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Default)]
struct LeadStore {
    leads: Vec<Lead>,
    next_id: u64,
    fail_submissions: bool,
}

impl LeadStore {
    fn insert(
        &mut self,
        form_type: FormType,
        lead_info: LeadInfo,
        submission: Option<&EstimateSubmission>,
    ) -> Result<String, ApiError> {
        if self.fail_submissions {
            return Err(ApiError::Transport("submissions are disabled".to_string()));
        }
        self.next_id += 1;
        let id = format!("mem-{}", self.next_id);
        self.leads.push(Lead {
            id: id.clone(),
            form_type,
            lead_info,
            selection: submission.map(|s| s.selection.clone()),
            quotation: submission.map(|s| s.quotation.clone()),
            followup_status: Some(FollowupStatus::Pending),
            is_customer_connected: false,
            created_at: Some(Utc::now()),
        });
        Ok(id)
    }
}

/// In-process [`AgencyApi`] for offline runs and tests.
///
/// Without a pricing configuration, `fetch_pricing_config` fails the same
/// way an unreachable service would.
#[derive(Debug, Default)]
pub struct MemoryAgencyApi {
    pricing: Option<PricingConfig>,
    store: Mutex<LeadStore>,
}

impl MemoryAgencyApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pricing(pricing: PricingConfig) -> Self {
        Self {
            pricing: Some(pricing),
            ..Self::default()
        }
    }

    /// Seeds the store with existing leads.
    pub fn with_leads(
        self,
        leads: Vec<Lead>,
    ) -> Self {
        let next_id = leads.len() as u64;
        Self {
            store: Mutex::new(LeadStore {
                leads,
                next_id,
                fail_submissions: false,
            }),
            ..self
        }
    }

    /// Makes every subsequent submission fail with a transport error.
    pub async fn set_fail_submissions(
        &self,
        fail: bool,
    ) {
        self.store.lock().await.fail_submissions = fail;
    }

    /// Every lead currently held, oldest first.
    pub async fn leads(&self) -> Vec<Lead> {
        self.store.lock().await.leads.clone()
    }
}

#[async_trait]
impl AgencyApi for MemoryAgencyApi {
    async fn fetch_pricing_config(&self) -> Result<PricingConfig, ApiError> {
        self.pricing
            .clone()
            .ok_or_else(|| ApiError::Transport("no pricing configuration loaded".to_string()))
    }

    async fn submit_estimate(
        &self,
        submission: &EstimateSubmission,
    ) -> Result<(), ApiError> {
        let id = self.store.lock().await.insert(
            FormType::Estimate,
            submission.lead_info.clone(),
            Some(submission),
        )?;
        info!(lead = %id, "estimate stored in memory");
        Ok(())
    }

    async fn submit_contact(
        &self,
        lead: &LeadInfo,
    ) -> Result<(), ApiError> {
        let id = self
            .store
            .lock()
            .await
            .insert(FormType::Contact, lead.clone(), None)?;
        info!(lead = %id, "contact request stored in memory");
        Ok(())
    }

    async fn list_leads(&self) -> Result<Vec<Lead>, ApiError> {
        Ok(self.leads().await)
    }

    async fn update_lead_status(
        &self,
        id: &str,
        status: FollowupStatus,
    ) -> Result<(), ApiError> {
        let mut store = self.store.lock().await;
        let lead = store
            .leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(ApiError::NotFound)?;
        lead.followup_status = Some(status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn contact() -> LeadInfo {
        LeadInfo::new("Asha Rao", "asha@example.com", "9876543210")
    }

    #[tokio::test]
    async fn fetch_without_pricing_is_transport_error() {
        let api = MemoryAgencyApi::new();

        let result = api.fetch_pricing_config().await;

        assert!(matches!(result, Err(ApiError::Transport(_))));
    }

    #[tokio::test]
    async fn submitted_contact_is_listed_as_pending() {
        let api = MemoryAgencyApi::new();

        api.submit_contact(&contact()).await.unwrap();
        let leads = api.list_leads().await.unwrap();

        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].id, "mem-1");
        assert_eq!(leads[0].form_type, FormType::Contact);
        assert_eq!(leads[0].status(), FollowupStatus::Pending);
    }

    #[tokio::test]
    async fn failing_store_rejects_submissions() {
        let api = MemoryAgencyApi::new();
        api.set_fail_submissions(true).await;

        let result = api.submit_contact(&contact()).await;

        assert!(matches!(result, Err(ApiError::Transport(_))));
        assert!(api.leads().await.is_empty());
    }

    #[tokio::test]
    async fn update_status_of_known_and_unknown_leads() {
        let api = MemoryAgencyApi::new();
        api.submit_contact(&contact()).await.unwrap();

        api.update_lead_status("mem-1", FollowupStatus::Converted)
            .await
            .unwrap();
        let missing = api.update_lead_status("mem-9", FollowupStatus::Lost).await;

        assert_eq!(api.leads().await[0].status(), FollowupStatus::Converted);
        assert_eq!(missing, Err(ApiError::NotFound));
    }
}
