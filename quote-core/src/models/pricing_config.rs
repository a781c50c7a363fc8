use std::collections::HashSet;
use std::fmt;
use std::iter;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ceiling on the costliest quote a configuration can produce (10^15).
pub const MAX_QUOTE_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Ceiling on the longest standard schedule, in weeks.
pub const MAX_QUOTE_WEEKS: Decimal = Decimal::from_parts(5200, 0, 0, false, 0);

/// Errors raised when a pricing configuration fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingConfigError {
    /// The base price must be zero or more.
    #[error("base price must be non-negative, got {0}")]
    NegativeBasePrice(Decimal),

    /// At least one project type must be offered.
    #[error("no project types configured")]
    NoProjectTypes,

    /// At least one complexity level must be offered.
    #[error("no complexity levels configured")]
    NoComplexities,

    /// Cost multipliers must be strictly positive.
    #[error("multiplier for '{id}' must be positive, got {value}")]
    InvalidMultiplier { id: String, value: Decimal },

    /// Week counts and add-on times must be zero or more.
    #[error("duration for '{id}' must be non-negative, got {value}")]
    NegativeWeeks { id: String, value: Decimal },

    /// Add-on and sub-option costs must be zero or more.
    #[error("cost for '{id}' must be non-negative, got {value}")]
    NegativeCost { id: String, value: Decimal },

    /// Ids must be unique within their collection. Add-ons and their
    /// sub-options share a single namespace.
    #[error("duplicate id '{0}'")]
    DuplicateId(String),

    /// Financial parameters are fractions in [0, 1].
    #[error("{name} must be between 0 and 1, got {value}")]
    InvalidFraction { name: &'static str, value: Decimal },

    /// A tenure must cover a positive number of years.
    #[error("tenure '{id}' must span a positive number of years, got {value}")]
    InvalidTenure { id: String, value: Decimal },

    /// Tenure gating thresholds must be zero or more.
    #[error("tenure '{id}' threshold must be non-negative, got {value}")]
    NegativeThreshold { id: String, value: Decimal },

    /// The costliest combination of choices exceeds [`MAX_QUOTE_AMOUNT`].
    #[error("largest possible quote exceeds {limit}")]
    AmountOutOfRange { limit: Decimal },

    /// The longest combination of choices exceeds [`MAX_QUOTE_WEEKS`].
    #[error("longest possible schedule exceeds {limit} weeks")]
    DurationOutOfRange { limit: Decimal },
}

/// A selectable tier that scales both cost and duration.
///
/// Used for project types (web / mobile / both) and complexity levels
/// (mvp / standard / enterprise).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierOption {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Weeks this tier adds to the delivery baseline.
    pub weeks: Decimal,
    /// Factor applied to the base price.
    pub multiplier: Decimal,
}

/// A nested option of an [`AddOn`]. Only chargeable while its parent is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubOption {
    pub id: String,
    pub label: String,
    pub cost: Decimal,
    /// Extra weeks, may be fractional.
    pub time: Decimal,
}

/// An optional project feature ("power-up").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOn {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    pub base_cost: Decimal,
    pub base_time: Decimal,
    #[serde(default)]
    pub subs: Vec<SubOption>,
}

impl AddOn {
    /// Returns the sub-option with the given id, if this add-on owns it.
    pub fn sub(
        &self,
        id: &str,
    ) -> Option<&SubOption> {
        self.subs.iter().find(|s| s.id == id)
    }

    /// Ids of every sub-option of this add-on.
    pub fn sub_ids(&self) -> impl Iterator<Item = &str> {
        self.subs.iter().map(|s| s.id.as_str())
    }
}

/// How fast the project is delivered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Computed schedule, no premium.
    #[default]
    Standard,
    /// Compressed schedule at a premium.
    Express,
    /// User-picked month count; a rush premium applies when faster than standard.
    Custom,
}

impl DeliveryMode {
    pub const ALL: [DeliveryMode; 3] = [Self::Standard, Self::Express, Self::Custom];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::Custom => "custom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Self::Standard),
            "express" => Some(Self::Express),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured delivery mode entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryModeOption {
    #[serde(rename = "id")]
    pub mode: DeliveryMode,
    pub label: String,
    /// Express premium for `express`, rush premium for `custom`.
    pub multiplier: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Fractions that drive discounts, ranges, and schedule limits. All in [0, 1].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTerms {
    /// Discount granted when the whole project is paid upfront.
    pub upfront_discount: Decimal,
    /// Share of the total charged on signing the agreement.
    pub upfront_agreement_percentage: Decimal,
    /// Width of the quoted range above the minimum total.
    pub estimation_buffer: Decimal,
    /// Annual maintenance as a share of the raw total.
    pub maintenance_percentage: Decimal,
    /// Fastest allowed custom schedule as a share of the standard duration.
    pub min_duration_factor: Decimal,
    /// Duration factor applied to the baseline for express delivery.
    pub delivery_express_time_factor: Decimal,
}

impl FinancialTerms {
    fn fractions(&self) -> [(&'static str, Decimal); 6] {
        [
            ("upfrontDiscount", self.upfront_discount),
            ("upfrontAgreementPercentage", self.upfront_agreement_percentage),
            ("estimationBuffer", self.estimation_buffer),
            ("maintenancePercentage", self.maintenance_percentage),
            ("minDurationFactor", self.min_duration_factor),
            ("deliveryExpressTimeFactor", self.delivery_express_time_factor),
        ]
    }
}

/// An installment plan length, offered only above its threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTenure {
    pub id: String,
    pub label: String,
    /// Length in years (1.5 = 18 months).
    pub value: Decimal,
    /// Raw total that must be exceeded before this tenure is offered.
    /// Zero marks the always-available base tenure.
    #[serde(default)]
    pub threshold: Decimal,
}

impl PaymentTenure {
    pub fn months(&self) -> Decimal {
        self.value * Decimal::from(12)
    }
}

fn default_currency() -> String {
    "INR".to_string()
}

/// Server-supplied pricing configuration. Loaded once per session and
/// treated as read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    pub base_price: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub project_types: Vec<TierOption>,
    pub complexities: Vec<TierOption>,
    #[serde(default)]
    pub power_ups: Vec<AddOn>,
    #[serde(default)]
    pub delivery_modes: Vec<DeliveryModeOption>,
    pub financials: FinancialTerms,
    #[serde(default)]
    pub payment_tenures: Vec<PaymentTenure>,
}

impl PricingConfig {
    pub fn project_type(
        &self,
        id: &str,
    ) -> Option<&TierOption> {
        self.project_types.iter().find(|t| t.id == id)
    }

    pub fn complexity(
        &self,
        id: &str,
    ) -> Option<&TierOption> {
        self.complexities.iter().find(|t| t.id == id)
    }

    pub fn power_up(
        &self,
        id: &str,
    ) -> Option<&AddOn> {
        self.power_ups.iter().find(|a| a.id == id)
    }

    /// Returns the add-on that owns the sub-option `sub_id`.
    pub fn parent_of(
        &self,
        sub_id: &str,
    ) -> Option<&AddOn> {
        self.power_ups.iter().find(|a| a.sub(sub_id).is_some())
    }

    /// Cost multiplier for a delivery mode; 1 when the mode is not configured.
    pub fn delivery_multiplier(
        &self,
        mode: DeliveryMode,
    ) -> Decimal {
        self.delivery_modes
            .iter()
            .find(|m| m.mode == mode)
            .map(|m| m.multiplier)
            .unwrap_or(Decimal::ONE)
    }

    /// The shortest configured tenure.
    pub fn shortest_tenure(&self) -> Option<&PaymentTenure> {
        self.payment_tenures.iter().min_by(|a, b| a.value.cmp(&b.value))
    }

    /// Checks the configuration for values the quotation engine cannot use.
    ///
    /// # Errors
    ///
    /// Returns the first [`PricingConfigError`] found.
    pub fn validate(&self) -> Result<(), PricingConfigError> {
        if self.base_price < Decimal::ZERO {
            return Err(PricingConfigError::NegativeBasePrice(self.base_price));
        }
        if self.project_types.is_empty() {
            return Err(PricingConfigError::NoProjectTypes);
        }
        if self.complexities.is_empty() {
            return Err(PricingConfigError::NoComplexities);
        }

        validate_tiers(&self.project_types)?;
        validate_tiers(&self.complexities)?;
        self.validate_power_ups()?;

        for option in &self.delivery_modes {
            if option.multiplier <= Decimal::ZERO {
                return Err(PricingConfigError::InvalidMultiplier {
                    id: option.mode.as_str().to_string(),
                    value: option.multiplier,
                });
            }
        }

        for (name, value) in self.financials.fractions() {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(PricingConfigError::InvalidFraction { name, value });
            }
        }

        let mut seen = HashSet::new();
        for tenure in &self.payment_tenures {
            if !seen.insert(tenure.id.as_str()) {
                return Err(PricingConfigError::DuplicateId(tenure.id.clone()));
            }
            if tenure.value <= Decimal::ZERO {
                return Err(PricingConfigError::InvalidTenure {
                    id: tenure.id.clone(),
                    value: tenure.value,
                });
            }
            if tenure.threshold < Decimal::ZERO {
                return Err(PricingConfigError::NegativeThreshold {
                    id: tenure.id.clone(),
                    value: tenure.threshold,
                });
            }
        }

        self.validate_extremes()
    }

    /// Prices the worst case: the largest tier of each kind, every add-on
    /// and sub-option, the steepest delivery premium and the full buffer.
    fn validate_extremes(&self) -> Result<(), PricingConfigError> {
        let too_long = || PricingConfigError::DurationOutOfRange {
            limit: MAX_QUOTE_WEEKS,
        };
        let too_costly = || PricingConfigError::AmountOutOfRange {
            limit: MAX_QUOTE_AMOUNT,
        };

        let extras = self.power_ups.iter().flat_map(|addon| {
            iter::once((addon.base_cost, addon.base_time))
                .chain(addon.subs.iter().map(|sub| (sub.cost, sub.time)))
        });
        let mut cost = Decimal::ZERO;
        let mut weeks = peak(self.project_types.iter().map(|t| t.weeks))
            .checked_add(peak(self.complexities.iter().map(|t| t.weeks)))
            .ok_or_else(too_long)?;
        for (extra_cost, extra_weeks) in extras {
            cost = cost.checked_add(extra_cost).ok_or_else(too_costly)?;
            weeks = weeks.checked_add(extra_weeks).ok_or_else(too_long)?;
        }
        if weeks > MAX_QUOTE_WEEKS {
            return Err(too_long());
        }

        let premium = peak(self.delivery_modes.iter().map(|o| o.multiplier)).max(Decimal::ONE);
        let buffer = Decimal::ONE + self.financials.estimation_buffer;
        self.base_price
            .checked_mul(peak(self.project_types.iter().map(|t| t.multiplier)))
            .and_then(|v| v.checked_mul(peak(self.complexities.iter().map(|t| t.multiplier))))
            .and_then(|v| v.checked_add(cost))
            .and_then(|v| v.checked_mul(premium))
            .and_then(|v| v.checked_mul(buffer))
            .filter(|worst| *worst <= MAX_QUOTE_AMOUNT)
            .map(|_| ())
            .ok_or_else(too_costly)
    }

    fn validate_power_ups(&self) -> Result<(), PricingConfigError> {
        let mut seen = HashSet::new();
        for addon in &self.power_ups {
            if !seen.insert(addon.id.as_str()) {
                return Err(PricingConfigError::DuplicateId(addon.id.clone()));
            }
            check_cost(&addon.id, addon.base_cost)?;
            check_weeks(&addon.id, addon.base_time)?;
            for sub in &addon.subs {
                if !seen.insert(sub.id.as_str()) {
                    return Err(PricingConfigError::DuplicateId(sub.id.clone()));
                }
                check_cost(&sub.id, sub.cost)?;
                check_weeks(&sub.id, sub.time)?;
            }
        }
        Ok(())
    }
}

fn peak(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.max().unwrap_or(Decimal::ZERO)
}

fn validate_tiers(tiers: &[TierOption]) -> Result<(), PricingConfigError> {
    let mut seen = HashSet::new();
    for tier in tiers {
        if !seen.insert(tier.id.as_str()) {
            return Err(PricingConfigError::DuplicateId(tier.id.clone()));
        }
        if tier.multiplier <= Decimal::ZERO {
            return Err(PricingConfigError::InvalidMultiplier {
                id: tier.id.clone(),
                value: tier.multiplier,
            });
        }
        check_weeks(&tier.id, tier.weeks)?;
    }
    Ok(())
}

fn check_weeks(
    id: &str,
    value: Decimal,
) -> Result<(), PricingConfigError> {
    if value < Decimal::ZERO {
        return Err(PricingConfigError::NegativeWeeks {
            id: id.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_cost(
    id: &str,
    value: Decimal,
) -> Result<(), PricingConfigError> {
    if value < Decimal::ZERO {
        return Err(PricingConfigError::NegativeCost {
            id: id.to_string(),
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::test_support::sample_config;

    // =========================================================================
    // lookup tests
    // =========================================================================

    #[test]
    fn parent_of_finds_owning_add_on() {
        let config = sample_config();

        let parent = config.parent_of("ai-chat").map(|a| a.id.as_str());

        assert_eq!(parent, Some("ai"));
    }

    #[test]
    fn parent_of_returns_none_for_parent_id() {
        let config = sample_config();

        assert!(config.parent_of("ai").is_none());
    }

    #[test]
    fn delivery_multiplier_defaults_to_one_when_missing() {
        let config = PricingConfig {
            delivery_modes: Vec::new(),
            ..sample_config()
        };

        assert_eq!(config.delivery_multiplier(DeliveryMode::Express), Decimal::ONE);
    }

    #[test]
    fn shortest_tenure_is_one_year() {
        let config = sample_config();

        let shortest = config.shortest_tenure().map(|t| t.value);

        assert_eq!(shortest, Some(dec!(1)));
    }

    #[test]
    fn tenure_months_handles_fractional_years() {
        let tenure = PaymentTenure {
            id: "18m".to_string(),
            label: "18 Months".to_string(),
            value: dec!(1.5),
            threshold: dec!(300000),
        };

        assert_eq!(tenure.months(), dec!(18));
    }

    #[test]
    fn delivery_mode_parse_is_case_insensitive() {
        assert_eq!(DeliveryMode::parse("Express"), Some(DeliveryMode::Express));
        assert_eq!(DeliveryMode::parse(" custom "), Some(DeliveryMode::Custom));
        assert_eq!(DeliveryMode::parse("overnight"), None);
    }

    // =========================================================================
    // validate tests
    // =========================================================================

    #[test]
    fn validate_accepts_sample_config() {
        assert_eq!(sample_config().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_base_price() {
        let config = PricingConfig {
            base_price: dec!(-1),
            ..sample_config()
        };

        assert_eq!(
            config.validate(),
            Err(PricingConfigError::NegativeBasePrice(dec!(-1)))
        );
    }

    #[test]
    fn validate_rejects_empty_project_types() {
        let config = PricingConfig {
            project_types: Vec::new(),
            ..sample_config()
        };

        assert_eq!(config.validate(), Err(PricingConfigError::NoProjectTypes));
    }

    #[test]
    fn validate_rejects_zero_multiplier() {
        let mut config = sample_config();
        config.complexities[0].multiplier = dec!(0);

        assert_eq!(
            config.validate(),
            Err(PricingConfigError::InvalidMultiplier {
                id: "mvp".to_string(),
                value: dec!(0),
            })
        );
    }

    #[test]
    fn validate_rejects_sub_id_colliding_with_parent_id() {
        let mut config = sample_config();
        config.power_ups[1].subs[0].id = "ai".to_string();

        assert_eq!(
            config.validate(),
            Err(PricingConfigError::DuplicateId("ai".to_string()))
        );
    }

    #[test]
    fn validate_rejects_negative_sub_time() {
        let mut config = sample_config();
        config.power_ups[0].subs[0].time = dec!(-0.5);

        assert_eq!(
            config.validate(),
            Err(PricingConfigError::NegativeWeeks {
                id: "ai-chat".to_string(),
                value: dec!(-0.5),
            })
        );
    }

    #[test]
    fn validate_rejects_fraction_above_one() {
        let mut config = sample_config();
        config.financials.estimation_buffer = dec!(1.2);

        assert_eq!(
            config.validate(),
            Err(PricingConfigError::InvalidFraction {
                name: "estimationBuffer",
                value: dec!(1.2),
            })
        );
    }

    #[test]
    fn quote_limit_is_ten_to_the_fifteenth() {
        assert_eq!(MAX_QUOTE_AMOUNT, dec!(1_000_000_000_000_000));
    }

    #[test]
    fn validate_rejects_base_price_that_overflows() {
        let config = PricingConfig {
            base_price: Decimal::MAX / dec!(2),
            ..sample_config()
        };

        assert_eq!(
            config.validate(),
            Err(PricingConfigError::AmountOutOfRange {
                limit: MAX_QUOTE_AMOUNT,
            })
        );
    }

    #[test]
    fn validate_rejects_huge_delivery_premium() {
        let mut config = sample_config();
        config.delivery_modes[0].multiplier = dec!(1_000_000_000_000);

        assert_eq!(
            config.validate(),
            Err(PricingConfigError::AmountOutOfRange {
                limit: MAX_QUOTE_AMOUNT,
            })
        );
    }

    #[test]
    fn validate_rejects_add_on_costs_summing_past_decimal_range() {
        let mut config = sample_config();
        config.power_ups[0].base_cost = Decimal::MAX;
        config.power_ups[0].subs[0].cost = Decimal::MAX;

        assert_eq!(
            config.validate(),
            Err(PricingConfigError::AmountOutOfRange {
                limit: MAX_QUOTE_AMOUNT,
            })
        );
    }

    #[test]
    fn validate_rejects_endless_schedule() {
        let mut config = sample_config();
        config.complexities[0].weeks = MAX_QUOTE_WEEKS;

        assert_eq!(
            config.validate(),
            Err(PricingConfigError::DurationOutOfRange {
                limit: MAX_QUOTE_WEEKS,
            })
        );
    }

    #[test]
    fn validate_rejects_zero_length_tenure() {
        let mut config = sample_config();
        config.payment_tenures[0].value = dec!(0);

        assert_eq!(
            config.validate(),
            Err(PricingConfigError::InvalidTenure {
                id: "1y".to_string(),
                value: dec!(0),
            })
        );
    }
}
