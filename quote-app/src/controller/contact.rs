use quote_core::{AgencyApi, LeadField, LeadInfo};
use tracing::{error, info};

use super::ControllerError;
use crate::validation::{FieldErrors, validate_lead};

/// Progress of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactState {
    #[default]
    Editing,
    Submitting,
    Submitted,
}

/// The "get in touch" form: contact details only, no estimate.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    lead: LeadInfo,
    errors: FieldErrors,
    state: ContactState,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lead(&self) -> &LeadInfo {
        &self.lead
    }

    pub fn state(&self) -> ContactState {
        self.state
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn ensure_editing(&self) -> Result<(), ControllerError> {
        match self.state {
            ContactState::Editing => Ok(()),
            ContactState::Submitting => Err(ControllerError::SubmissionInFlight),
            ContactState::Submitted => Err(ControllerError::AlreadySubmitted),
        }
    }

    pub fn set_field(
        &mut self,
        field: LeadField,
        value: impl Into<String>,
    ) -> Result<(), ControllerError> {
        self.ensure_editing()?;
        self.lead.set(field, value);
        self.errors.clear(field);
        Ok(())
    }

    /// Validates and sends the contact details.
    ///
    /// On failure the form stays editable with its contents intact.
    pub async fn submit(
        &mut self,
        api: &dyn AgencyApi,
    ) -> Result<(), ControllerError> {
        self.ensure_editing()?;

        self.errors = validate_lead(&self.lead);
        if !self.errors.is_empty() {
            return Err(ControllerError::Validation(self.errors.clone()));
        }

        let lead = LeadInfo::new(
            self.lead.name.trim(),
            self.lead.email.trim(),
            self.lead.phone.trim(),
        );
        self.state = ContactState::Submitting;

        match api.submit_contact(&lead).await {
            Ok(()) => {
                info!(email = %lead.email, "contact request submitted");
                self.state = ContactState::Submitted;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "contact submission failed");
                self.state = ContactState::Editing;
                Err(ControllerError::Api(e))
            }
        }
    }

    /// Clears the form for another message.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quote_http::MemoryAgencyApi;

    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_field(LeadField::Name, "  Vikram ").unwrap();
        form.set_field(LeadField::Email, "vik@shop.in").unwrap();
        form.set_field(LeadField::Phone, "+91 91234 56780").unwrap();
        form
    }

    #[tokio::test]
    async fn submit_sends_trimmed_details() {
        let api = MemoryAgencyApi::new();
        let mut form = filled();

        form.submit(&api).await.unwrap();

        let leads = api.leads().await;
        assert_eq!(form.state(), ContactState::Submitted);
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].lead_info.name, "Vikram");
    }

    #[tokio::test]
    async fn invalid_details_are_not_sent() {
        let api = MemoryAgencyApi::new();
        let mut form = ContactForm::new();
        form.set_field(LeadField::Email, "vik@shop").unwrap();

        let result = form.submit(&api).await;

        assert!(matches!(result, Err(ControllerError::Validation(ref e)) if e.len() == 3));
        assert!(api.leads().await.is_empty());
        assert_eq!(form.state(), ContactState::Editing);
    }

    #[tokio::test]
    async fn failed_submission_keeps_details() {
        let api = MemoryAgencyApi::new();
        api.set_fail_submissions(true).await;
        let mut form = filled();

        let result = form.submit(&api).await;

        assert!(matches!(result, Err(ControllerError::Api(_))));
        assert_eq!(form.state(), ContactState::Editing);
        assert_eq!(form.lead().email, "vik@shop.in");
    }

    #[tokio::test]
    async fn submitted_form_is_locked_until_reset() {
        let api = MemoryAgencyApi::new();
        let mut form = filled();
        form.submit(&api).await.unwrap();

        assert_eq!(
            form.set_field(LeadField::Name, "Other"),
            Err(ControllerError::AlreadySubmitted)
        );

        form.reset();
        assert_eq!(form.state(), ContactState::Editing);
        assert!(form.lead().name.is_empty());
    }
}
