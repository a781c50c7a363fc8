use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LeadInfo, QuotationSummary, SelectionSummary};

/// Which form produced a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    Estimate,
    Contact,
}

impl FormType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Estimate => "estimate",
            Self::Contact => "contact",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "estimate" => Some(Self::Estimate),
            "contact" => Some(Self::Contact),
            _ => None,
        }
    }
}

/// Sales follow-up state of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FollowupStatus {
    #[default]
    Pending,
    Contacted,
    #[serde(rename = "In Progress")]
    InProgress,
    Converted,
    Lost,
}

impl FollowupStatus {
    pub const ALL: [FollowupStatus; 5] = [
        Self::Pending,
        Self::Contacted,
        Self::InProgress,
        Self::Converted,
        Self::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Contacted => "Contacted",
            Self::InProgress => "In Progress",
            Self::Converted => "Converted",
            Self::Lost => "Lost",
        }
    }

    /// Parses a status label. Case, spaces, dashes and underscores are ignored
    /// so `"in-progress"` and `"In Progress"` are equivalent.
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "pending" => Some(Self::Pending),
            "contacted" => Some(Self::Contacted),
            "inprogress" => Some(Self::InProgress),
            "converted" => Some(Self::Converted),
            "lost" => Some(Self::Lost),
            _ => None,
        }
    }
}

impl fmt::Display for FollowupStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lead as held by the remote lead store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub form_type: FormType,
    pub lead_info: LeadInfo,
    pub selection: Option<SelectionSummary>,
    pub quotation: Option<QuotationSummary>,
    pub followup_status: Option<FollowupStatus>,
    pub is_customer_connected: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Lead {
    /// Follow-up status, with unset leads reported as pending.
    pub fn status(&self) -> FollowupStatus {
        self.followup_status.unwrap_or_default()
    }
}
