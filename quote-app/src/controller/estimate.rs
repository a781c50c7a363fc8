//! Estimate wizard controller.
//!
//! Forward navigation is gated per step:
//!
//! | Step | Needs to advance |
//! |------|------------------|
//! | 1 Project type | a project type |
//! | 2 Complexity   | a complexity |
//! | 3 Power-ups    | nothing |
//! | 4 Delivery     | a month count when delivery is custom |
//! | 5 Payment      | valid contact details (to submit) |
//!
//! Backward navigation is always allowed. Every selection change re-prices
//! the estimate and keeps the tenure and custom month count within what the
//! new quotation offers.

use quote_core::{
    AddOnToggle, AgencyApi, ApiError, DeliveryMode, EstimateSubmission, LeadField, PricingConfig,
    Quotation, QuotationEngine, Selection, toggle_addon,
};
use rust_decimal::Decimal;
use tracing::{debug, error, info};

use super::{ControllerError, Overlay, WizardState, WizardStep};
use crate::validation::{FieldErrors, validate_lead};

/// Holds one in-progress estimate and drives it through the wizard.
#[derive(Debug, Clone)]
pub struct EstimateController {
    config: PricingConfig,
    selection: Selection,
    state: WizardState,
    overlay: Overlay,
    errors: FieldErrors,
    submission: Option<EstimateSubmission>,
}

impl EstimateController {
    pub fn new(config: PricingConfig) -> Self {
        let selection = Self::fresh_selection(&config);
        Self {
            config,
            selection,
            state: WizardState::default(),
            overlay: Overlay::default(),
            errors: FieldErrors::default(),
            submission: None,
        }
    }

    fn fresh_selection(config: &PricingConfig) -> Selection {
        Selection {
            tenure_years: config
                .shortest_tenure()
                .map(|t| t.value)
                .unwrap_or(Decimal::ONE),
            ..Selection::default()
        }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    /// Current step, or `None` once the estimate has been handed off.
    pub fn step(&self) -> Option<WizardStep> {
        self.state.step()
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.overlay
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The snapshot sent (or being sent) to the lead service.
    pub fn submission(&self) -> Option<&EstimateSubmission> {
        self.submission.as_ref()
    }

    /// Prices the current selection.
    pub fn quotation(&self) -> Quotation {
        QuotationEngine::new(&self.config).quote(&self.selection)
    }

    // ── Navigation ─────────────────────────────────────────────────────────

    fn editing_step(&self) -> Result<WizardStep, ControllerError> {
        match self.state {
            WizardState::Editing(step) => Ok(step),
            WizardState::Submitting => Err(ControllerError::SubmissionInFlight),
            WizardState::Submitted => Err(ControllerError::AlreadySubmitted),
        }
    }

    /// Whether the choices `step` asks for have been made.
    pub fn is_step_complete(
        &self,
        step: WizardStep,
    ) -> bool {
        match step {
            WizardStep::ProjectType => self.selection.project_type.is_some(),
            WizardStep::Complexity => self.selection.complexity.is_some(),
            WizardStep::AddOns | WizardStep::PaymentAndContact => true,
            WizardStep::Delivery => {
                self.selection.delivery_mode != DeliveryMode::Custom
                    || self.selection.custom_months.is_some()
            }
        }
    }

    /// Moves to the next step. Stays put on the last step.
    pub fn next(&mut self) -> Result<WizardStep, ControllerError> {
        let step = self.editing_step()?;
        if !self.is_step_complete(step) {
            return Err(ControllerError::StepIncomplete(step));
        }

        let next = step.next().unwrap_or(step);
        self.state = WizardState::Editing(next);
        debug!(%next, "wizard advanced");
        Ok(next)
    }

    /// Moves to the previous step. Stays put on the first step.
    pub fn back(&mut self) -> Result<WizardStep, ControllerError> {
        let step = self.editing_step()?;
        let previous = step.previous().unwrap_or(step);
        self.state = WizardState::Editing(previous);
        Ok(previous)
    }

    // ── Selection ──────────────────────────────────────────────────────────

    pub fn select_project_type(
        &mut self,
        id: &str,
    ) -> Result<(), ControllerError> {
        self.editing_step()?;
        if self.config.project_type(id).is_none() {
            return Err(ControllerError::UnknownProjectType(id.to_string()));
        }
        self.selection.project_type = Some(id.to_string());
        self.reconcile();
        Ok(())
    }

    pub fn select_complexity(
        &mut self,
        id: &str,
    ) -> Result<(), ControllerError> {
        self.editing_step()?;
        if self.config.complexity(id).is_none() {
            return Err(ControllerError::UnknownComplexity(id.to_string()));
        }
        self.selection.complexity = Some(id.to_string());
        self.reconcile();
        Ok(())
    }

    /// Selects or deselects an add-on or sub-option.
    ///
    /// Deselecting an add-on also drops its sub-options.
    pub fn toggle_addon(
        &mut self,
        id: &str,
    ) -> Result<AddOnToggle, ControllerError> {
        self.editing_step()?;
        let toggle = toggle_addon(&mut self.selection.addons, &self.config.power_ups, id)?;
        self.reconcile();
        Ok(toggle)
    }

    /// Selects each of `ids`. Ids that are already selected, including
    /// repeats within `ids`, are left as they are.
    pub fn select_addons<'i>(
        &mut self,
        ids: impl IntoIterator<Item = &'i str>,
    ) -> Result<(), ControllerError> {
        self.editing_step()?;
        for id in ids {
            if !self.selection.has_addon(id) {
                self.toggle_addon(id)?;
            }
        }
        Ok(())
    }

    /// Switches delivery mode.
    ///
    /// Leaving custom delivery clears the month count; entering it picks the
    /// fastest month count on offer.
    pub fn set_delivery_mode(
        &mut self,
        mode: DeliveryMode,
    ) -> Result<(), ControllerError> {
        self.editing_step()?;
        let previous = self.selection.delivery_mode;
        self.selection.delivery_mode = mode;

        if mode != DeliveryMode::Custom {
            self.selection.custom_months = None;
        } else if previous != DeliveryMode::Custom {
            self.selection.custom_months = self.quotation().custom_month_options.first().copied();
        }

        self.reconcile();
        Ok(())
    }

    pub fn set_custom_months(
        &mut self,
        months: u32,
    ) -> Result<(), ControllerError> {
        self.editing_step()?;
        if self.selection.delivery_mode != DeliveryMode::Custom {
            return Err(ControllerError::NotCustomDelivery);
        }
        if !self.quotation().custom_month_options.contains(&months) {
            return Err(ControllerError::InvalidCustomMonths(months));
        }
        self.selection.custom_months = Some(months);
        self.reconcile();
        Ok(())
    }

    /// Picks an installment plan length in years.
    pub fn set_tenure(
        &mut self,
        years: Decimal,
    ) -> Result<(), ControllerError> {
        self.editing_step()?;
        if !self.quotation().offers_tenure(years) {
            return Err(ControllerError::TenureUnavailable(years));
        }
        self.selection.tenure_years = years;
        Ok(())
    }

    pub fn set_pay_upfront(
        &mut self,
        pay_upfront: bool,
    ) -> Result<(), ControllerError> {
        self.editing_step()?;
        self.selection.pay_upfront = pay_upfront;
        Ok(())
    }

    /// Updates one contact field and clears that field's error.
    pub fn set_lead_field(
        &mut self,
        field: LeadField,
        value: impl Into<String>,
    ) -> Result<(), ControllerError> {
        self.editing_step()?;
        self.selection.lead.set(field, value);
        self.errors.clear(field);
        Ok(())
    }

    /// Brings the tenure and custom month count back within the offered
    /// options after the price or duration changed.
    fn reconcile(&mut self) {
        let quotation = self.quotation();

        if !quotation.offers_tenure(self.selection.tenure_years)
            && let Some(shortest) = quotation
                .available_tenures
                .iter()
                .min_by(|a, b| a.value.cmp(&b.value))
        {
            debug!(
                from = %self.selection.tenure_years,
                to = %shortest.value,
                "selected tenure no longer offered"
            );
            self.selection.tenure_years = shortest.value;
        }

        if let Some(months) = self.selection.custom_months
            && !quotation.custom_month_options.contains(&months)
        {
            let snapped = quotation.custom_month_options.first().copied();
            debug!(from = months, to = ?snapped, "custom schedule no longer offered");
            self.selection.custom_months = snapped;
        }
    }

    // ── Submission ─────────────────────────────────────────────────────────

    /// Validates the estimate and freezes it for sending.
    ///
    /// On success the wizard is locked in [`WizardState::Submitting`] until
    /// [`finish_submission`](Self::finish_submission) is called.
    pub fn begin_submission(&mut self) -> Result<EstimateSubmission, ControllerError> {
        let step = self.editing_step()?;
        if !step.is_last() {
            return Err(ControllerError::StepIncomplete(step));
        }

        let (Some(project_type), Some(complexity)) = (
            self.selection.project_type.as_deref(),
            self.selection.complexity.as_deref(),
        ) else {
            let missing = if self.selection.project_type.is_none() {
                WizardStep::ProjectType
            } else {
                WizardStep::Complexity
            };
            return Err(ControllerError::StepIncomplete(missing));
        };

        self.errors = validate_lead(&self.selection.lead);
        if !self.errors.is_empty() {
            debug!(errors = %self.errors, "contact details rejected");
            return Err(ControllerError::Validation(self.errors.clone()));
        }

        let submission = EstimateSubmission::snapshot(
            &self.selection,
            project_type,
            complexity,
            &self.quotation(),
            &self.config.currency,
        );
        self.submission = Some(submission.clone());
        self.state = WizardState::Submitting;
        Ok(submission)
    }

    /// Records the lead service's answer.
    ///
    /// A failure returns the wizard to the last step with every field intact.
    /// Only valid after [`begin_submission`](Self::begin_submission).
    pub fn finish_submission(
        &mut self,
        result: Result<(), ApiError>,
    ) -> Result<(), ControllerError> {
        match self.state {
            WizardState::Submitting => {}
            WizardState::Submitted => return Err(ControllerError::AlreadySubmitted),
            WizardState::Editing(_) => return Err(ControllerError::NotSubmitting),
        }

        match result {
            Ok(()) => {
                self.state = WizardState::Submitted;
                info!(
                    email = %self.selection.lead.email.trim(),
                    "estimate submitted"
                );
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "estimate submission failed");
                self.submission = None;
                self.state = WizardState::Editing(WizardStep::PaymentAndContact);
                Err(ControllerError::Api(e))
            }
        }
    }

    /// Validates, sends and records the estimate in one call.
    pub async fn submit(
        &mut self,
        api: &dyn AgencyApi,
    ) -> Result<(), ControllerError> {
        let submission = self.begin_submission()?;
        let result = api.submit_estimate(&submission).await;
        self.finish_submission(result)
    }

    /// Discards the estimate and returns to step 1 with the same pricing.
    pub fn start_over(&mut self) {
        self.selection = Self::fresh_selection(&self.config);
        self.state = WizardState::default();
        self.errors = FieldErrors::default();
        self.submission = None;
    }
}
