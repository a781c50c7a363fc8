//! JSON shapes exchanged with the lead and pricing service.

use chrono::{DateTime, Utc};
use quote_core::{
    ApiError, DeliveryMode, EstimateSubmission, FollowupStatus, FormType, Lead, LeadInfo,
    QuotationSummary, SelectionSummary,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decimal::serialize_number;

/// `{success, count?, data?, message?}` wrapper around every response.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub count: Option<usize>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Fails with [`ApiError::Rejected`] unless the server reported success.
    pub fn accepted(self) -> Result<Self, ApiError> {
        if self.success {
            return Ok(self);
        }
        let reason = self
            .message
            .or(self.error)
            .unwrap_or_else(|| "request was not successful".to_string());
        Err(ApiError::Rejected(reason))
    }

    pub fn into_data(self) -> Result<T, ApiError> {
        self.accepted()?
            .data
            .ok_or_else(|| ApiError::Decode("response has no data".to_string()))
    }
}

// ── outgoing ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EstimatePayload<'a> {
    form_type: &'static str,
    lead_info: &'a LeadInfo,
    selection: SelectionPayload<'a>,
    quotation: QuotationPayload<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectionPayload<'a> {
    project_type: &'a str,
    complexity: &'a str,
    addons: &'a [String],
    delivery_mode: DeliveryMode,
    #[serde(serialize_with = "serialize_number")]
    tenure_years: Decimal,
    pay_upfront: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_months: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuotationPayload<'a> {
    currency: &'a str,
    #[serde(serialize_with = "serialize_number")]
    total_project_value: Decimal,
    #[serde(serialize_with = "serialize_number")]
    upfront_fee: Decimal,
    #[serde(serialize_with = "serialize_number")]
    monthly_subscription: Decimal,
    subscription_duration: u32,
    delivery_time: &'a str,
    includes_maintenance: bool,
    #[serde(serialize_with = "serialize_number")]
    maintenance_cost: Decimal,
}

impl<'a> From<&'a EstimateSubmission> for EstimatePayload<'a> {
    fn from(submission: &'a EstimateSubmission) -> Self {
        let selection = &submission.selection;
        let quotation = &submission.quotation;
        Self {
            form_type: FormType::Estimate.as_str(),
            lead_info: &submission.lead_info,
            selection: SelectionPayload {
                project_type: &selection.project_type,
                complexity: &selection.complexity,
                addons: &selection.addons,
                delivery_mode: selection.delivery_mode,
                tenure_years: selection.tenure_years,
                pay_upfront: selection.pay_upfront,
                custom_months: selection.custom_months,
            },
            quotation: QuotationPayload {
                currency: &quotation.currency,
                total_project_value: quotation.total_project_value,
                upfront_fee: quotation.upfront_fee,
                monthly_subscription: quotation.monthly_subscription,
                subscription_duration: quotation.subscription_duration,
                delivery_time: &quotation.delivery_time,
                includes_maintenance: quotation.includes_maintenance,
                maintenance_cost: quotation.maintenance_cost,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContactPayload<'a> {
    form_type: &'static str,
    lead_info: &'a LeadInfo,
}

impl<'a> From<&'a LeadInfo> for ContactPayload<'a> {
    fn from(lead_info: &'a LeadInfo) -> Self {
        Self {
            form_type: FormType::Contact.as_str(),
            lead_info,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusPatch {
    pub followup_status: FollowupStatus,
}

// ── incoming ────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LeadInfoDto {
    name: String,
    email: String,
    phone: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectionDto {
    #[serde(default)]
    project_type: String,
    #[serde(default)]
    complexity: String,
    #[serde(default)]
    addons: Vec<String>,
    #[serde(default)]
    delivery_mode: Option<String>,
    #[serde(default)]
    tenure_years: Option<Decimal>,
    #[serde(default)]
    pay_upfront: bool,
    #[serde(default)]
    custom_months: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuotationDto {
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    total_project_value: Decimal,
    #[serde(default)]
    max_project_value: Option<Decimal>,
    #[serde(default)]
    upfront_fee: Decimal,
    #[serde(default)]
    monthly_subscription: Decimal,
    #[serde(default)]
    subscription_duration: u32,
    #[serde(default)]
    delivery_time: String,
    #[serde(default)]
    includes_maintenance: bool,
    #[serde(default)]
    maintenance_cost: Decimal,
}

/// A lead as the service returns it (`_id`, loosely typed enums).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LeadDto {
    #[serde(rename = "_id")]
    id: String,
    form_type: String,
    #[serde(default)]
    lead_info: LeadInfoDto,
    #[serde(default)]
    selection: Option<SelectionDto>,
    #[serde(default)]
    quotation: Option<QuotationDto>,
    #[serde(default)]
    followup_status: Option<String>,
    #[serde(default)]
    is_customer_connected: bool,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<LeadDto> for Lead {
    type Error = ApiError;

    fn try_from(dto: LeadDto) -> Result<Self, Self::Error> {
        let form_type = FormType::parse(&dto.form_type).ok_or_else(|| {
            ApiError::Decode(format!(
                "lead '{}' has unknown form type '{}'",
                dto.id, dto.form_type
            ))
        })?;

        let followup_status = dto.followup_status.as_deref().and_then(|raw| {
            let parsed = FollowupStatus::parse(raw);
            if parsed.is_none() {
                warn!(lead = %dto.id, status = raw, "unknown follow-up status ignored");
            }
            parsed
        });

        Ok(Lead {
            id: dto.id,
            form_type,
            lead_info: LeadInfo {
                name: dto.lead_info.name,
                email: dto.lead_info.email,
                phone: dto.lead_info.phone,
            },
            selection: dto.selection.map(|s| SelectionSummary {
                project_type: s.project_type,
                complexity: s.complexity,
                addons: s.addons,
                delivery_mode: s
                    .delivery_mode
                    .as_deref()
                    .and_then(DeliveryMode::parse)
                    .unwrap_or_default(),
                tenure_years: s.tenure_years.unwrap_or(Decimal::ONE),
                pay_upfront: s.pay_upfront,
                custom_months: s.custom_months,
            }),
            quotation: dto.quotation.map(|q| QuotationSummary {
                currency: q.currency.unwrap_or_else(|| "INR".to_string()),
                total_project_value: q.total_project_value,
                max_project_value: q.max_project_value,
                raw_total: None,
                final_total: None,
                upfront_fee: q.upfront_fee,
                monthly_subscription: q.monthly_subscription,
                subscription_duration: q.subscription_duration,
                delivery_time: q.delivery_time,
                includes_maintenance: q.includes_maintenance,
                maintenance_cost: q.maintenance_cost,
            }),
            followup_status,
            is_customer_connected: dto.is_customer_connected,
            created_at: dto.created_at,
        })
    }
}
