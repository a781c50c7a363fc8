mod lead;
mod pricing_config;
mod quotation;
mod selection;

pub use lead::{FollowupStatus, FormType, Lead};
pub use pricing_config::{
    AddOn, DeliveryMode, DeliveryModeOption, FinancialTerms, MAX_QUOTE_AMOUNT, MAX_QUOTE_WEEKS,
    PaymentTenure, PricingConfig, PricingConfigError, SubOption, TierOption,
};
pub use quotation::{EstimateSubmission, Quotation, QuotationSummary, SelectionSummary};
pub use selection::{LeadField, LeadInfo, Selection};
