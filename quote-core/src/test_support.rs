//! Shared fixtures for unit tests.

use rust_decimal_macros::dec;

use crate::models::{
    AddOn, DeliveryMode, DeliveryModeOption, FinancialTerms, PaymentTenure, PricingConfig,
    SubOption, TierOption,
};

fn tier(
    id: &str,
    weeks: rust_decimal::Decimal,
    multiplier: rust_decimal::Decimal,
) -> TierOption {
    TierOption {
        id: id.to_string(),
        label: id.to_string(),
        description: None,
        weeks,
        multiplier,
    }
}

fn sub(
    id: &str,
    cost: rust_decimal::Decimal,
    time: rust_decimal::Decimal,
) -> SubOption {
    SubOption {
        id: id.to_string(),
        label: id.to_string(),
        cost,
        time,
    }
}

fn tenure(
    id: &str,
    value: rust_decimal::Decimal,
    threshold: rust_decimal::Decimal,
) -> PaymentTenure {
    PaymentTenure {
        id: id.to_string(),
        label: id.to_string(),
        value,
        threshold,
    }
}

/// A configuration matching the agency's published price list.
pub(crate) fn sample_config() -> PricingConfig {
    PricingConfig {
        base_price: dec!(150000),
        currency: "INR".to_string(),
        project_types: vec![
            tier("web", dec!(4), dec!(1)),
            tier("mobile", dec!(8), dec!(1.5)),
            tier("both", dec!(12), dec!(2.2)),
        ],
        complexities: vec![
            tier("mvp", dec!(0), dec!(1)),
            tier("standard", dec!(6), dec!(1.5)),
            tier("enterprise", dec!(16), dec!(2.5)),
        ],
        power_ups: vec![
            AddOn {
                id: "ai".to_string(),
                label: "AI Integration".to_string(),
                info: None,
                base_cost: dec!(80000),
                base_time: dec!(2),
                subs: vec![
                    sub("ai-chat", dec!(30000), dec!(1)),
                    sub("ai-rec", dec!(50000), dec!(2)),
                ],
            },
            AddOn {
                id: "payment".to_string(),
                label: "Payment Gateway".to_string(),
                info: None,
                base_cost: dec!(20000),
                base_time: dec!(1),
                subs: vec![
                    sub("pay-dom", dec!(10000), dec!(0.5)),
                    sub("pay-intl", dec!(25000), dec!(1)),
                ],
            },
            AddOn {
                id: "seo".to_string(),
                label: "Advanced SEO".to_string(),
                info: None,
                base_cost: dec!(25000),
                base_time: dec!(1),
                subs: Vec::new(),
            },
        ],
        delivery_modes: vec![
            DeliveryModeOption {
                mode: DeliveryMode::Standard,
                label: "Standard".to_string(),
                multiplier: dec!(1),
                tag: None,
            },
            DeliveryModeOption {
                mode: DeliveryMode::Express,
                label: "Express".to_string(),
                multiplier: dec!(1.20),
                tag: Some("+20% Cost".to_string()),
            },
            DeliveryModeOption {
                mode: DeliveryMode::Custom,
                label: "Custom".to_string(),
                multiplier: dec!(1.15),
                tag: None,
            },
        ],
        financials: FinancialTerms {
            upfront_discount: dec!(0.10),
            upfront_agreement_percentage: dec!(0.10),
            estimation_buffer: dec!(0.20),
            maintenance_percentage: dec!(0.15),
            min_duration_factor: dec!(0.6),
            delivery_express_time_factor: dec!(0.7),
        },
        payment_tenures: vec![
            tenure("1y", dec!(1), dec!(0)),
            tenure("18m", dec!(1.5), dec!(300000)),
            tenure("2y", dec!(2), dec!(500000)),
            tenure("3y", dec!(3), dec!(1000000)),
            tenure("5y", dec!(5), dec!(2000000)),
        ],
    }
}
