//! Summaries over the lead list shown to the agency's staff.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_currency;
use crate::models::{FollowupStatus, FormType, Lead};

/// Headline counts for a set of leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadStats {
    pub total: usize,
    /// Leads that came from the cost calculator.
    pub estimates: usize,
    /// Leads marked as connected with the customer.
    pub connected: usize,
    /// `connected / total` as a whole percentage; 0 for an empty list.
    pub conversion_rate: u32,
}

impl LeadStats {
    pub fn from_leads(leads: &[Lead]) -> Self {
        let total = leads.len();
        let estimates = leads
            .iter()
            .filter(|l| l.form_type == FormType::Estimate)
            .count();
        let connected = leads.iter().filter(|l| l.is_customer_connected).count();

        let conversion_rate = if total == 0 {
            0
        } else {
            let ratio = Decimal::from(connected) / Decimal::from(total);
            round_currency(ratio * Decimal::ONE_HUNDRED)
                .to_u32()
                .unwrap_or(0)
        };

        Self {
            total,
            estimates,
            connected,
            conversion_rate,
        }
    }
}

/// Leads whose name or email contains `term`, ignoring case.
///
/// A blank term matches everything.
pub fn filter_leads<'a>(
    leads: &'a [Lead],
    term: &str,
) -> Vec<&'a Lead> {
    let needle = term.trim().to_lowercase();
    leads
        .iter()
        .filter(|lead| {
            needle.is_empty()
                || lead.lead_info.name.to_lowercase().contains(&needle)
                || lead.lead_info.email.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Leads currently in `status` (unset counts as pending).
pub fn leads_with_status(
    leads: &[Lead],
    status: FollowupStatus,
) -> Vec<&Lead> {
    leads.iter().filter(|l| l.status() == status).collect()
}
