use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::{DeliveryMode, LeadInfo, PaymentTenure, Selection};

/// A priced, time-boxed estimate derived from a [`Selection`] and a
/// [`PricingConfig`](super::PricingConfig).
///
/// Recomputed on every evaluation; never stored as independent state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    /// Sum of tier, add-on and sub-option weeks before delivery adjustments.
    pub standard_weeks: Decimal,
    /// `standard_weeks` rounded up to whole weeks.
    pub baseline_weeks: Decimal,
    /// Whole weeks after express compression (equal to baseline otherwise).
    pub delivery_weeks: Decimal,
    /// Human readable delivery time, e.g. `"7 Weeks"` or `"3 Months"`.
    pub delivery_display: String,

    /// Project type multiplier × complexity multiplier.
    pub multiplier: Decimal,
    /// Total after add-ons and delivery premiums, before any discount.
    pub raw_total: Decimal,
    /// Total after the upfront discount, if any.
    pub final_total: Decimal,
    pub min_total: Decimal,
    pub max_total: Decimal,
    /// Whether a custom schedule triggered the rush premium.
    pub rush_applied: bool,

    /// Agreement (setup) charge at the low end of the range.
    pub agreement_charge: Decimal,
    /// Agreement (setup) charge at the high end of the range.
    pub max_agreement_charge: Decimal,
    pub tenure_months: Decimal,
    pub installment_min: Decimal,
    pub installment_max: Decimal,

    /// Annual maintenance range, always derived from `raw_total`.
    pub maintenance_min: Decimal,
    pub maintenance_max: Decimal,

    pub available_tenures: Vec<PaymentTenure>,
    pub custom_month_options: Vec<u32>,
}

impl Quotation {
    /// Returns `true` if a tenure of `years` is offered for this quotation.
    pub fn offers_tenure(
        &self,
        years: Decimal,
    ) -> bool {
        self.available_tenures.iter().any(|t| t.value == years)
    }
}

/// The choices that accompany a submitted estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSummary {
    pub project_type: String,
    pub complexity: String,
    pub addons: Vec<String>,
    pub delivery_mode: DeliveryMode,
    pub tenure_years: Decimal,
    pub pay_upfront: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_months: Option<u32>,
}

/// The figures handed to the lead store, fixed at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationSummary {
    pub currency: String,
    pub total_project_value: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_project_value: Option<Decimal>,
    /// Total before the upfront discount. Kept on local snapshots only; the
    /// lead service does not store it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_total: Option<Decimal>,
    /// Total after the upfront discount. Local snapshots only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_total: Option<Decimal>,
    pub upfront_fee: Decimal,
    pub monthly_subscription: Decimal,
    /// Installment plan length in months; zero when paying upfront.
    pub subscription_duration: u32,
    pub delivery_time: String,
    pub includes_maintenance: bool,
    pub maintenance_cost: Decimal,
}

/// A finalized estimate ready for the lead-submission call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateSubmission {
    pub lead_info: LeadInfo,
    pub selection: SelectionSummary,
    pub quotation: QuotationSummary,
}

impl EstimateSubmission {
    /// Freezes the current selection and quotation.
    ///
    /// `project_type` and `complexity` are taken explicitly because a
    /// submission without them cannot be built; callers validate first.
    pub fn snapshot(
        selection: &Selection,
        project_type: &str,
        complexity: &str,
        quotation: &Quotation,
        currency: &str,
    ) -> Self {
        let subscription_duration = if selection.pay_upfront {
            0
        } else {
            quotation.tenure_months.trunc().to_u32().unwrap_or(0)
        };

        Self {
            lead_info: LeadInfo {
                name: selection.lead.name.trim().to_string(),
                email: selection.lead.email.trim().to_string(),
                phone: selection.lead.phone.trim().to_string(),
            },
            selection: SelectionSummary {
                project_type: project_type.to_string(),
                complexity: complexity.to_string(),
                addons: selection.addons.iter().cloned().collect(),
                delivery_mode: selection.delivery_mode,
                tenure_years: selection.tenure_years,
                pay_upfront: selection.pay_upfront,
                custom_months: selection.custom_months,
            },
            quotation: QuotationSummary {
                currency: currency.to_string(),
                total_project_value: quotation.min_total,
                max_project_value: Some(quotation.max_total),
                raw_total: Some(quotation.raw_total),
                final_total: Some(quotation.final_total),
                upfront_fee: quotation.agreement_charge,
                monthly_subscription: quotation.installment_min,
                subscription_duration,
                delivery_time: quotation.delivery_display.clone(),
                includes_maintenance: true,
                maintenance_cost: quotation.maintenance_min,
            },
        }
    }
}
