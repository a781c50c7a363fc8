//! Quotation engine.
//!
//! Prices a [`Selection`] against a [`PricingConfig`] in a fixed order of
//! steps, each a pure function of the selection, the configuration and the
//! results of the steps before it:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Standard duration: tier weeks + add-on weeks |
//! | 2    | Cost multiplier: project type × complexity |
//! | 3    | Raw total: base × multiplier + add-on costs, then delivery premium |
//! | 4    | Final total: upfront discount, if paying upfront |
//! | 5    | Estimation range: final total and final total + buffer |
//! | 6    | Agreement charge and monthly installments at both ends |
//! | 7    | Annual maintenance, always from the raw total |
//! | 8    | Tenures available for the raw total |
//! | 9    | Month counts available for a custom schedule |
//!
//! The engine never fails. Missing choices contribute nothing (multiplier 1,
//! zero weeks), so a preview can be rendered at any point in the wizard.
//! Arithmetic saturates at [`Decimal::MAX`]; a configuration that passes
//! [`PricingConfig::validate`] stays far below it.
//!
//! # Example
//!
//! ```
//! use quote_core::calculations::QuotationEngine;
//! use quote_core::{PricingConfig, Selection};
//!
//! # fn price(config: &PricingConfig) {
//! let selection = Selection {
//!     project_type: Some("web".to_string()),
//!     complexity: Some("mvp".to_string()),
//!     ..Selection::default()
//! };
//!
//! let quotation = QuotationEngine::new(config).quote(&selection);
//!
//! assert!(quotation.min_total <= quotation.max_total);
//! # }
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::addons::{
    AddOnContribution, resolve_addon_contributions, unknown_addons,
};
use crate::calculations::common::{WEEKS_PER_MONTH, ceil_weeks, round_currency};
use crate::calculations::payment::{available_tenures, installment};
use crate::calculations::schedule::{custom_month_options, delivery_display, express_weeks};
use crate::models::{DeliveryMode, PricingConfig, Quotation, Selection, TierOption};

/// Weeks and cost multiplier contributed by one tier choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TierContribution {
    weeks: Decimal,
    multiplier: Decimal,
}

impl TierContribution {
    const NONE: Self = Self {
        weeks: Decimal::ZERO,
        multiplier: Decimal::ONE,
    };
}

impl From<&TierOption> for TierContribution {
    fn from(tier: &TierOption) -> Self {
        Self {
            weeks: tier.weeks,
            multiplier: tier.multiplier,
        }
    }
}

/// Calculator that prices selections against one configuration.
#[derive(Debug, Clone, Copy)]
pub struct QuotationEngine<'a> {
    config: &'a PricingConfig,
}

impl<'a> QuotationEngine<'a> {
    pub fn new(config: &'a PricingConfig) -> Self {
        Self { config }
    }

    /// Prices `selection`.
    pub fn quote(
        &self,
        selection: &Selection,
    ) -> Quotation {
        let project_type = self.tier(
            "project type",
            selection.project_type.as_deref(),
            &self.config.project_types,
        );
        let complexity = self.tier(
            "complexity",
            selection.complexity.as_deref(),
            &self.config.complexities,
        );
        let addons = self.addon_contribution(selection);

        // Step 1
        let standard_weeks = project_type
            .weeks
            .saturating_add(complexity.weeks)
            .saturating_add(addons.total_weeks);
        let baseline_weeks = ceil_weeks(standard_weeks);

        // Step 2
        let multiplier = project_type.multiplier.saturating_mul(complexity.multiplier);

        // Step 3
        let rush_applied = self.rush_applies(selection, standard_weeks);
        let raw_total = self.raw_total(selection, multiplier, addons, rush_applied);

        // Steps 4 and 5
        let final_total = self.final_total(selection, raw_total);
        let min_total = final_total;
        let max_total = self.with_buffer(final_total);

        // Step 6
        let agreement_charge = self.agreement_charge(min_total);
        let max_agreement_charge = self.agreement_charge(max_total);
        let (installment_min, installment_max) = if selection.pay_upfront {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            (
                installment(min_total, agreement_charge, selection.tenure_years),
                installment(max_total, max_agreement_charge, selection.tenure_years),
            )
        };

        // Step 7
        let maintenance_min = round_currency(
            raw_total.saturating_mul(self.config.financials.maintenance_percentage),
        );
        let maintenance_max = self.with_buffer(maintenance_min);

        // Steps 8 and 9
        let available_tenures = available_tenures(&self.config.payment_tenures, raw_total);
        let custom_month_options =
            custom_month_options(baseline_weeks, self.config.financials.min_duration_factor);

        let delivery_weeks = match selection.delivery_mode {
            DeliveryMode::Express => express_weeks(
                baseline_weeks,
                self.config.financials.delivery_express_time_factor,
            ),
            DeliveryMode::Standard | DeliveryMode::Custom => baseline_weeks,
        };
        let delivery_display =
            delivery_display(selection.delivery_mode, delivery_weeks, selection.custom_months);

        debug!(
            standard_weeks = %standard_weeks,
            multiplier = %multiplier,
            raw_total = %raw_total,
            final_total = %final_total,
            rush_applied,
            "quotation computed"
        );

        Quotation {
            standard_weeks,
            baseline_weeks,
            delivery_weeks,
            delivery_display,
            multiplier,
            raw_total,
            final_total,
            min_total,
            max_total,
            rush_applied,
            agreement_charge,
            max_agreement_charge,
            tenure_months: selection.tenure_months(),
            installment_min,
            installment_max,
            maintenance_min,
            maintenance_max,
            available_tenures,
            custom_month_options,
        }
    }

    /// Looks up a tier choice; absent or unknown ids contribute nothing.
    fn tier(
        &self,
        kind: &'static str,
        id: Option<&str>,
        options: &[TierOption],
    ) -> TierContribution {
        let Some(id) = id else {
            return TierContribution::NONE;
        };
        match options.iter().find(|t| t.id == id) {
            Some(tier) => tier.into(),
            None => {
                warn!(kind, id, "unknown selection ignored");
                TierContribution::NONE
            }
        }
    }

    fn addon_contribution(
        &self,
        selection: &Selection,
    ) -> AddOnContribution {
        for id in unknown_addons(&self.config.power_ups, &selection.addons) {
            warn!(id, "unknown add-on ignored");
        }
        resolve_addon_contributions(&self.config.power_ups, &selection.addons)
    }

    /// A custom schedule shorter than the standard duration carries a premium.
    fn rush_applies(
        &self,
        selection: &Selection,
        standard_weeks: Decimal,
    ) -> bool {
        match (selection.delivery_mode, selection.custom_months) {
            (DeliveryMode::Custom, Some(months)) => {
                Decimal::from(months) * WEEKS_PER_MONTH < standard_weeks
            }
            _ => false,
        }
    }

    fn raw_total(
        &self,
        selection: &Selection,
        multiplier: Decimal,
        addons: AddOnContribution,
        rush_applied: bool,
    ) -> Decimal {
        let subtotal = self
            .config
            .base_price
            .saturating_mul(multiplier)
            .saturating_add(addons.total_cost);
        let delivered = match selection.delivery_mode {
            DeliveryMode::Express => {
                subtotal.saturating_mul(self.config.delivery_multiplier(DeliveryMode::Express))
            }
            DeliveryMode::Custom if rush_applied => {
                subtotal.saturating_mul(self.config.delivery_multiplier(DeliveryMode::Custom))
            }
            DeliveryMode::Standard | DeliveryMode::Custom => subtotal,
        };
        round_currency(delivered)
    }

    fn final_total(
        &self,
        selection: &Selection,
        raw_total: Decimal,
    ) -> Decimal {
        if selection.pay_upfront {
            let kept = Decimal::ONE.saturating_sub(self.config.financials.upfront_discount);
            round_currency(raw_total.saturating_mul(kept))
        } else {
            raw_total
        }
    }

    fn with_buffer(
        &self,
        amount: Decimal,
    ) -> Decimal {
        let factor = Decimal::ONE.saturating_add(self.config.financials.estimation_buffer);
        round_currency(amount.saturating_mul(factor))
    }

    fn agreement_charge(
        &self,
        total: Decimal,
    ) -> Decimal {
        round_currency(total.saturating_mul(self.config.financials.upfront_agreement_percentage))
    }
}

/// Prices `selection` against `config`.
pub fn quote(
    selection: &Selection,
    config: &PricingConfig,
) -> Quotation {
    QuotationEngine::new(config).quote(selection)
}
