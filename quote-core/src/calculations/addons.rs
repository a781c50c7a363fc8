//! Add-on ("power-up") selection rules.
//!
//! Every cost and duration computation goes through
//! [`resolve_addon_contributions`], and every change to the selected set goes
//! through [`toggle_addon`]. A sub-option counts only while its parent is
//! selected, and removing a parent removes its sub-options with it.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::AddOn;

/// Errors raised when changing the add-on selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddOnError {
    /// The id matches neither an add-on nor a sub-option in the catalog.
    #[error("unknown add-on '{0}'")]
    Unknown(String),
}

/// Combined cost and time of the selected add-ons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddOnContribution {
    pub total_cost: Decimal,
    pub total_weeks: Decimal,
}

/// Outcome of a [`toggle_addon`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOnToggle {
    ParentSelected(String),
    /// The parent and any of its sub-options that were selected.
    ParentRemoved { id: String, removed_subs: Vec<String> },
    SubSelected(String),
    SubRemoved(String),
}

/// Sums the cost and weeks of every selected add-on and of each selected
/// sub-option whose parent is also selected.
///
/// Each catalog entry is visited once, so no id is ever counted twice.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::resolve_addon_contributions;
/// use quote_core::{AddOn, SubOption};
///
/// let catalog = vec![AddOn {
///     id: "ai".to_string(),
///     label: "AI Integration".to_string(),
///     info: None,
///     base_cost: dec!(80000),
///     base_time: dec!(2),
///     subs: vec![SubOption {
///         id: "ai-chat".to_string(),
///         label: "Custom Chatbot".to_string(),
///         cost: dec!(30000),
///         time: dec!(1),
///     }],
/// }];
/// let selected: BTreeSet<String> = ["ai", "ai-chat"].iter().map(|s| s.to_string()).collect();
///
/// let contribution = resolve_addon_contributions(&catalog, &selected);
///
/// assert_eq!(contribution.total_cost, dec!(110000));
/// assert_eq!(contribution.total_weeks, dec!(3));
/// ```
pub fn resolve_addon_contributions(
    catalog: &[AddOn],
    selected: &BTreeSet<String>,
) -> AddOnContribution {
    catalog
        .iter()
        .filter(|addon| selected.contains(&addon.id))
        .fold(AddOnContribution::default(), |mut acc, addon| {
            acc.total_cost = acc.total_cost.saturating_add(addon.base_cost);
            acc.total_weeks = acc.total_weeks.saturating_add(addon.base_time);
            for sub in addon.subs.iter().filter(|s| selected.contains(&s.id)) {
                acc.total_cost = acc.total_cost.saturating_add(sub.cost);
                acc.total_weeks = acc.total_weeks.saturating_add(sub.time);
            }
            acc
        })
}

/// Selected ids that match nothing in the catalog.
pub fn unknown_addons<'a>(
    catalog: &[AddOn],
    selected: &'a BTreeSet<String>,
) -> Vec<&'a str> {
    selected
        .iter()
        .filter(|id| {
            !catalog
                .iter()
                .any(|addon| addon.id == **id || addon.sub(id).is_some())
        })
        .map(String::as_str)
        .collect()
}

/// Flips the selection state of an add-on or sub-option.
///
/// - Selecting a parent adds only the parent id.
/// - Deselecting a parent removes the parent and every one of its sub-options.
/// - A sub-option toggles alone; its parent and siblings are untouched.
///
/// # Errors
///
/// Returns [`AddOnError::Unknown`] if `id` is not in the catalog.
pub fn toggle_addon(
    selected: &mut BTreeSet<String>,
    catalog: &[AddOn],
    id: &str,
) -> Result<AddOnToggle, AddOnError> {
    if let Some(parent) = catalog.iter().find(|addon| addon.id == id) {
        if selected.remove(id) {
            let removed_subs = parent
                .sub_ids()
                .filter(|sub_id| selected.remove(*sub_id))
                .map(str::to_string)
                .collect();
            return Ok(AddOnToggle::ParentRemoved {
                id: id.to_string(),
                removed_subs,
            });
        }
        selected.insert(id.to_string());
        return Ok(AddOnToggle::ParentSelected(id.to_string()));
    }

    if catalog.iter().any(|addon| addon.sub(id).is_some()) {
        if selected.remove(id) {
            return Ok(AddOnToggle::SubRemoved(id.to_string()));
        }
        selected.insert(id.to_string());
        return Ok(AddOnToggle::SubSelected(id.to_string()));
    }

    Err(AddOnError::Unknown(id.to_string()))
}
