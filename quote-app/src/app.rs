//! Glue between the command line and the library crates: client creation,
//! pricing loading and plain-text reports.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use quote_core::{
    AgencyApi, ApiConfig, ClientRegistry, FollowupStatus, Lead, LeadStats, PricingConfig,
    Quotation, Selection, filter_leads, leads_with_status,
};
use quote_data::{ConfigSource, LoadedPricing, PricingConfigLoader};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::utils::{format_inr, format_inr_range};

/// A registry with every client backend the app can use.
pub fn build_registry() -> ClientRegistry {
    quote_http::default_registry()
}

pub async fn connect(config: &ApiConfig) -> Result<Box<dyn AgencyApi>> {
    debug!(backend = %config.backend, url = %config.base_url, "creating client");
    build_registry()
        .create(config)
        .await
        .with_context(|| format!("Failed to create '{}' client", config.backend))
}

/// Loads pricing from `file` when given, otherwise from the lead service with
/// the bundled price list as fallback.
pub async fn load_pricing(
    api: &dyn AgencyApi,
    file: Option<&Path>,
) -> Result<LoadedPricing> {
    let loaded = match file {
        Some(path) => LoadedPricing {
            config: PricingConfigLoader::read_file(path)
                .with_context(|| format!("Failed to load pricing from {}", path.display()))?,
            source: ConfigSource::File,
        },
        None => PricingConfigLoader::load(api)
            .await
            .context("Bundled pricing configuration is unusable")?,
    };
    info!(source = ?loaded.source, currency = %loaded.config.currency, "pricing loaded");
    Ok(loaded)
}

fn percent(fraction: Decimal) -> Decimal {
    (fraction * Decimal::ONE_HUNDRED).normalize()
}

// ─── Estimate report ─────────────────────────────────────────────────────────

/// Plain-text rendering of a quotation, as shown by `cost-estimator estimate`.
pub struct EstimateReport<'a> {
    pub config: &'a PricingConfig,
    pub selection: &'a Selection,
    pub quotation: &'a Quotation,
}

impl EstimateReport<'_> {
    fn tier_label<'c>(
        options: Option<&'c quote_core::TierOption>,
        id: Option<&'c str>,
    ) -> &'c str {
        options
            .map(|t| t.label.as_str())
            .or(id)
            .unwrap_or("(not selected)")
    }

    fn power_ups(&self) -> Vec<String> {
        self.config
            .power_ups
            .iter()
            .filter(|addon| self.selection.has_addon(&addon.id))
            .map(|addon| {
                let subs: Vec<&str> = addon
                    .subs
                    .iter()
                    .filter(|sub| self.selection.has_addon(&sub.id))
                    .map(|sub| sub.label.as_str())
                    .collect();
                if subs.is_empty() {
                    addon.label.clone()
                } else {
                    format!("{} ({})", addon.label, subs.join(", "))
                }
            })
            .collect()
    }
}

impl fmt::Display for EstimateReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let (config, selection, q) = (self.config, self.selection, self.quotation);
        let project_id = selection.project_type.as_deref();
        let complexity_id = selection.complexity.as_deref();

        writeln!(
            f,
            "Project:      {} / {}",
            Self::tier_label(project_id.and_then(|id| config.project_type(id)), project_id),
            Self::tier_label(complexity_id.and_then(|id| config.complexity(id)), complexity_id),
        )?;

        let power_ups = self.power_ups();
        if power_ups.is_empty() {
            writeln!(f, "Power-ups:    none")?;
        } else {
            writeln!(f, "Power-ups:    {}", power_ups.join("; "))?;
        }

        write!(f, "Delivery:     {} ({})", q.delivery_display, selection.delivery_mode)?;
        if q.rush_applied {
            write!(f, ", rush premium applied")?;
        }
        writeln!(f)?;

        writeln!(f, "Estimate:     {}", format_inr_range(q.min_total, q.max_total))?;

        if selection.pay_upfront {
            writeln!(
                f,
                "Payment:      paid upfront ({}% discount)",
                percent(config.financials.upfront_discount)
            )?;
        } else {
            writeln!(
                f,
                "Payment:      {} on signing, then {} / month for {} months",
                format_inr_range(q.agreement_charge, q.max_agreement_charge),
                format_inr_range(q.installment_min, q.installment_max),
                q.tenure_months.normalize(),
            )?;
        }

        writeln!(
            f,
            "Maintenance:  {} / year",
            format_inr_range(q.maintenance_min, q.maintenance_max)
        )?;

        let tenures: Vec<&str> = q.available_tenures.iter().map(|t| t.label.as_str()).collect();
        write!(f, "Plans:        {}", tenures.join(", "))
    }
}

// ─── Lead report ─────────────────────────────────────────────────────────────

/// Leads matching `search` (name or email) and, when given, `status`, in
/// their original order.
pub fn select_leads<'a>(
    leads: &'a [Lead],
    search: Option<&str>,
    status: Option<FollowupStatus>,
) -> Vec<&'a Lead> {
    let matching = filter_leads(leads, search.unwrap_or_default());
    let Some(status) = status else {
        return matching;
    };
    let in_status: HashSet<&str> = leads_with_status(leads, status)
        .into_iter()
        .map(|lead| lead.id.as_str())
        .collect();
    matching
        .into_iter()
        .filter(|lead| in_status.contains(lead.id.as_str()))
        .collect()
}

/// Plain-text lead table with summary statistics.
pub struct LeadReport<'a> {
    pub leads: &'a [&'a Lead],
    pub stats: LeadStats,
}

impl fmt::Display for LeadReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(
            f,
            "{} leads, {} estimates, {} connected ({}% conversion)",
            self.stats.total, self.stats.estimates, self.stats.connected, self.stats.conversion_rate
        )?;

        for lead in self.leads {
            let value = lead
                .quotation
                .as_ref()
                .map(|q| format_inr(q.total_project_value))
                .unwrap_or_else(|| "-".to_string());
            let created = lead
                .created_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            write!(
                f,
                "\n{:<26} {:<10} {:<8} {:<12} {:<24} {:<28} {}",
                lead.id,
                created,
                lead.form_type.as_str(),
                lead.status().as_str(),
                lead.lead_info.name,
                lead.lead_info.email,
                value,
            )?;
        }
        Ok(())
    }
}
