//! Integration tests for pricing loading and lead export against the
//! in-memory client backend.

use pretty_assertions::assert_eq;
use quote_core::{AgencyApi, LeadInfo, PricingConfig, filter_leads};
use quote_data::{ConfigSource, LeadCsvExporter, PricingConfigLoader, default_pricing_config};
use quote_http::MemoryAgencyApi;
use rust_decimal_macros::dec;

fn remote_config() -> PricingConfig {
    PricingConfig {
        base_price: dec!(175000),
        ..default_pricing_config().unwrap()
    }
}

#[tokio::test]
async fn load_prefers_remote_configuration() {
    let api = MemoryAgencyApi::with_pricing(remote_config());

    let loaded = PricingConfigLoader::load(&api).await.unwrap();

    assert_eq!(loaded.source, ConfigSource::Remote);
    assert_eq!(loaded.config.base_price, dec!(175000));
}

#[tokio::test]
async fn load_falls_back_when_remote_fails() {
    let api = MemoryAgencyApi::new();

    let loaded = PricingConfigLoader::load(&api).await.unwrap();

    assert_eq!(loaded.source, ConfigSource::Bundled);
    assert_eq!(loaded.config, default_pricing_config().unwrap());
}

#[tokio::test]
async fn load_falls_back_when_remote_payload_is_invalid() {
    let invalid = PricingConfig {
        base_price: dec!(-1),
        ..default_pricing_config().unwrap()
    };
    let api = MemoryAgencyApi::with_pricing(invalid);

    let loaded = PricingConfigLoader::load(&api).await.unwrap();

    assert_eq!(loaded.source, ConfigSource::Bundled);
    assert_eq!(loaded.config.base_price, dec!(150000));
}

#[tokio::test]
async fn load_falls_back_when_remote_prices_cannot_be_computed() {
    let oversized = PricingConfig {
        base_price: dec!(10_000_000_000_000_000_000_000_000),
        ..default_pricing_config().unwrap()
    };
    let api = MemoryAgencyApi::with_pricing(oversized);

    let loaded = PricingConfigLoader::load(&api).await.unwrap();

    assert_eq!(loaded.source, ConfigSource::Bundled);
    assert_eq!(loaded.config.base_price, dec!(150000));
}

#[tokio::test]
async fn export_filtered_leads_from_store() {
    let api = MemoryAgencyApi::new();
    api.submit_contact(&LeadInfo::new("Asha Rao", "asha@example.com", "9876543210"))
        .await
        .unwrap();
    api.submit_contact(&LeadInfo::new("Vikram", "vik@shop.in", "9123456780"))
        .await
        .unwrap();

    let leads = api.list_leads().await.unwrap();
    let selected = filter_leads(&leads, "asha");
    let mut buffer = Vec::new();
    let written = LeadCsvExporter::write(&mut buffer, selected).unwrap();
    let output = String::from_utf8(buffer).unwrap();

    assert_eq!(written, 1);
    assert_eq!(output.lines().count(), 2);
    assert!(output.contains("asha@example.com"));
    assert!(!output.contains("vik@shop.in"));
}
