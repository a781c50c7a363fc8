use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DeliveryMode;

/// One of the three contact fields collected on the final step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadField {
    Name,
    Email,
    Phone,
}

impl LeadField {
    pub const ALL: [LeadField; 3] = [Self::Name, Self::Email, Self::Phone];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }
}

impl fmt::Display for LeadField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact details of a prospective client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl LeadInfo {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn get(
        &self,
        field: LeadField,
    ) -> &str {
        match field {
            LeadField::Name => &self.name,
            LeadField::Email => &self.email,
            LeadField::Phone => &self.phone,
        }
    }

    pub fn set(
        &mut self,
        field: LeadField,
        value: impl Into<String>,
    ) {
        let value = value.into();
        match field {
            LeadField::Name => self.name = value,
            LeadField::Email => self.email = value,
            LeadField::Phone => self.phone = value,
        }
    }
}

/// A user's in-progress choices for one estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub project_type: Option<String>,
    pub complexity: Option<String>,
    /// Parent add-on ids and sub-option ids.
    pub addons: BTreeSet<String>,
    pub delivery_mode: DeliveryMode,
    pub tenure_years: Decimal,
    pub pay_upfront: bool,
    /// Only meaningful while `delivery_mode` is [`DeliveryMode::Custom`].
    pub custom_months: Option<u32>,
    pub lead: LeadInfo,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            project_type: None,
            complexity: None,
            addons: BTreeSet::new(),
            delivery_mode: DeliveryMode::Standard,
            tenure_years: Decimal::ONE,
            pay_upfront: false,
            custom_months: None,
            lead: LeadInfo::default(),
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installment plan length in months.
    pub fn tenure_months(&self) -> Decimal {
        self.tenure_years.saturating_mul(Decimal::from(12))
    }

    pub fn has_addon(
        &self,
        id: &str,
    ) -> bool {
        self.addons.contains(id)
    }
}
