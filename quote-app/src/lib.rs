pub mod app;
pub mod controller;
pub mod logging;
pub mod settings;
pub mod utils;
pub mod validation;

pub use controller::{
    ContactForm, ContactState, ControllerError, EstimateController, LegalDocument, Overlay,
    WizardState, WizardStep,
};
pub use settings::{AppSettings, SettingsError};
pub use validation::{FieldErrors, validate_lead};
