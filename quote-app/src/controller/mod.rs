//! Selection state for the calculator and the contact form.
//!
//! [`EstimateController`] owns one in-progress [`Selection`](quote_core::Selection),
//! gates the wizard steps and hands a frozen snapshot to the lead service.
//! [`ContactForm`] is the shorter contact-only flow.

pub mod contact;
pub mod estimate;
pub mod overlay;
pub mod wizard;

pub use contact::{ContactForm, ContactState};
pub use estimate::EstimateController;
pub use overlay::{LegalDocument, Overlay};
pub use wizard::{WizardState, WizardStep};

use quote_core::{AddOnError, ApiError};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::validation::FieldErrors;

/// Errors raised by the calculator and contact form controllers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("{0} is incomplete")]
    StepIncomplete(WizardStep),

    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("this form has already been submitted")]
    AlreadySubmitted,

    #[error("no submission is in progress")]
    NotSubmitting,

    #[error("unknown project type '{0}'")]
    UnknownProjectType(String),

    #[error("unknown complexity '{0}'")]
    UnknownComplexity(String),

    #[error(transparent)]
    AddOn(#[from] AddOnError),

    #[error("a {0}-year plan is not available for this estimate")]
    TenureUnavailable(Decimal),

    #[error("custom delivery is not selected")]
    NotCustomDelivery,

    #[error("{0} months is not an available custom schedule")]
    InvalidCustomMonths(u32),

    #[error("please correct the highlighted fields: {0}")]
    Validation(FieldErrors),

    #[error("submission failed: {0}")]
    Api(#[from] ApiError),
}
