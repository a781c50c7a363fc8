//! Contact detail validation shared by the estimate wizard and the contact
//! form.
//!
//! | Field | Rule |
//! |-------|------|
//! | name  | non-empty after trimming |
//! | email | `local@domain.tld` shape |
//! | phone | at least 10 digits once non-digits are removed |

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use quote_core::{LeadField, LeadInfo};
use regex::Regex;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Minimum number of digits a phone number must contain.
pub const MIN_PHONE_DIGITS: usize = 10;

// `None` only if the pattern fails to compile, in which case no address
// validates.
static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE
        .as_ref()
        .is_some_and(|re| re.is_match(email.trim()))
}

pub fn phone_digit_count(phone: &str) -> usize {
    phone.chars().filter(char::is_ascii_digit).count()
}

/// Per-field validation messages, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<LeadField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(
        &self,
        field: LeadField,
    ) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn insert(
        &mut self,
        field: LeadField,
        message: impl Into<String>,
    ) {
        self.0.insert(field, message.into());
    }

    /// Drops the message for `field`, leaving the others untouched.
    pub fn clear(
        &mut self,
        field: LeadField,
    ) {
        self.0.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (LeadField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Message for one field, or `None` when the value is acceptable.
pub fn validate_field(
    field: LeadField,
    value: &str,
) -> Option<String> {
    match field {
        LeadField::Name if value.trim().is_empty() => Some("Name is required".to_string()),
        LeadField::Email if !is_valid_email(value) => {
            Some("Enter a valid email address".to_string())
        }
        LeadField::Phone if phone_digit_count(value) < MIN_PHONE_DIGITS => Some(format!(
            "Phone number must have at least {MIN_PHONE_DIGITS} digits"
        )),
        _ => None,
    }
}

/// Validates every contact field.
pub fn validate_lead(lead: &LeadInfo) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in LeadField::ALL {
        if let Some(message) = validate_field(field, lead.get(field)) {
            errors.insert(field, message);
        }
    }
    errors
}
