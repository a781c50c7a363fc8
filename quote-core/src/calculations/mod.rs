//! Quotation calculations.
//!
//! This module prices a selection against the agency's configuration:
//! add-on resolution, delivery schedules, payment plans and the engine that
//! combines them.

pub mod addons;
pub mod common;
pub mod payment;
pub mod quotation;
pub mod schedule;

pub use addons::{
    AddOnContribution, AddOnError, AddOnToggle, resolve_addon_contributions, toggle_addon,
    unknown_addons,
};
pub use payment::{available_tenures, installment, tenure_available};
pub use quotation::{QuotationEngine, quote};
pub use schedule::{
    MAX_CUSTOM_MONTHS, custom_month_options, delivery_display, express_weeks, min_custom_months,
};
