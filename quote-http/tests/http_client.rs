use pretty_assertions::assert_eq;
use quote_core::{
    AgencyApi, ApiConfig, ApiError, DeliveryMode, EstimateSubmission, FollowupStatus, FormType,
    LeadInfo, QuotationSummary, SelectionSummary,
};
use quote_http::HttpAgencyApi;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpAgencyApi {
    HttpAgencyApi::new(&ApiConfig {
        backend: "http".to_string(),
        base_url: format!("{}/api/axomitlab", server.uri()),
        timeout_secs: 5,
    })
    .unwrap()
}

fn pricing_json() -> serde_json::Value {
    json!({
        "basePrice": 150000,
        "projectTypes": [
            {"id": "web", "label": "Website", "weeks": 4, "multiplier": 1},
            {"id": "mobile", "label": "Mobile App", "weeks": 8, "multiplier": 1.5}
        ],
        "complexities": [
            {"id": "mvp", "label": "MVP", "weeks": 0, "multiplier": 1}
        ],
        "powerUps": [
            {"id": "ai", "label": "AI Integration", "baseCost": 80000, "baseTime": 2,
             "subs": [{"id": "ai-chat", "label": "Custom Chatbot", "cost": 30000, "time": 1}]}
        ],
        "deliveryModes": [
            {"id": "standard", "label": "Standard", "multiplier": 1},
            {"id": "express", "label": "Express", "multiplier": 1.2, "tag": "+20% Cost"}
        ],
        "financials": {
            "upfrontDiscount": 0.1,
            "upfrontAgreementPercentage": 0.1,
            "estimationBuffer": 0.2,
            "maintenancePercentage": 0.15,
            "minDurationFactor": 0.6,
            "deliveryExpressTimeFactor": 0.7
        },
        "paymentTenures": [
            {"id": "1y", "label": "1 Year", "value": 1, "threshold": 0},
            {"id": "2y", "label": "2 Years", "value": 2, "threshold": 500000}
        ]
    })
}

fn submission() -> EstimateSubmission {
    EstimateSubmission {
        lead_info: LeadInfo::new("Asha Rao", "asha@example.com", "9876543210"),
        selection: SelectionSummary {
            project_type: "web".to_string(),
            complexity: "mvp".to_string(),
            addons: Vec::new(),
            delivery_mode: DeliveryMode::Standard,
            tenure_years: dec!(1),
            pay_upfront: false,
            custom_months: None,
        },
        quotation: QuotationSummary {
            currency: "INR".to_string(),
            total_project_value: dec!(150000),
            max_project_value: Some(dec!(180000)),
            raw_total: Some(dec!(150000)),
            final_total: Some(dec!(150000)),
            upfront_fee: dec!(15000),
            monthly_subscription: dec!(11250),
            subscription_duration: 12,
            delivery_time: "4 Weeks".to_string(),
            includes_maintenance: true,
            maintenance_cost: dec!(22500),
        },
    }
}

// =============================================================================
// Pricing configuration
// =============================================================================

#[tokio::test]
async fn fetch_pricing_config_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/axomitlab/config"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": pricing_json()})),
        )
        .mount(&server)
        .await;

    let config = api_for(&server).fetch_pricing_config().await.unwrap();

    assert_eq!(config.base_price, dec!(150000));
    assert_eq!(config.currency, "INR");
    assert_eq!(config.project_types.len(), 2);
    assert_eq!(config.delivery_multiplier(DeliveryMode::Express), dec!(1.2));
    assert_eq!(config.power_ups[0].subs[0].id, "ai-chat");
}

#[tokio::test]
async fn fetch_pricing_config_unsuccessful_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/axomitlab/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let result = api_for(&server).fetch_pricing_config().await;

    assert!(matches!(result, Err(ApiError::Rejected(_))));
}

#[tokio::test]
async fn fetch_pricing_config_server_error_is_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/axomitlab/config"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let result = api_for(&server).fetch_pricing_config().await;

    assert_eq!(
        result.err(),
        Some(ApiError::Status {
            status: 503,
            message: "maintenance".to_string(),
        })
    );
}

#[tokio::test]
async fn fetch_pricing_config_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/axomitlab/config"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = api_for(&server).fetch_pricing_config().await;

    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    let api = HttpAgencyApi::new(&ApiConfig {
        backend: "http".to_string(),
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
    })
    .unwrap();

    let result = api.fetch_pricing_config().await;

    assert!(matches!(result, Err(ApiError::Transport(_))));
}

// =============================================================================
// Lead submission
// =============================================================================

#[tokio::test]
async fn submit_estimate_posts_contract_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/axomitlab/leads"))
        .and(body_json(json!({
            "formType": "estimate",
            "leadInfo": {"name": "Asha Rao", "email": "asha@example.com", "phone": "9876543210"},
            "selection": {
                "projectType": "web",
                "complexity": "mvp",
                "addons": [],
                "deliveryMode": "standard",
                "tenureYears": 1,
                "payUpfront": false
            },
            "quotation": {
                "currency": "INR",
                "totalProjectValue": 150000,
                "upfrontFee": 15000,
                "monthlySubscription": 11250,
                "subscriptionDuration": 12,
                "deliveryTime": "4 Weeks",
                "includesMaintenance": true,
                "maintenanceCost": 22500
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"success": true, "data": {"_id": "abc"}})))
        .expect(1)
        .mount(&server)
        .await;

    let result = api_for(&server).submit_estimate(&submission()).await;

    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn submit_contact_posts_contact_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/axomitlab/leads"))
        .and(body_json(json!({
            "formType": "contact",
            "leadInfo": {"name": "Vik", "email": "vik@shop.in", "phone": "9876543210"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let result = api_for(&server)
        .submit_contact(&LeadInfo::new("Vik", "vik@shop.in", "9876543210"))
        .await;

    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn rejected_submission_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/axomitlab/leads"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Validation failed"})),
        )
        .mount(&server)
        .await;

    let result = api_for(&server).submit_estimate(&submission()).await;

    assert_eq!(result, Err(ApiError::Rejected("Validation failed".to_string())));
}

// =============================================================================
// Lead administration
// =============================================================================

#[tokio::test]
async fn list_leads_converts_every_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/axomitlab/leads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "count": 2,
            "data": [
                {"_id": "1", "formType": "contact", "leadInfo": {"name": "Vik", "email": "vik@shop.in", "phone": "98765 43210"},
                 "isCustomerConnected": true, "createdAt": "2025-01-05T09:30:00Z"},
                {"_id": "2", "formType": "estimate", "leadInfo": {"name": "Asha", "email": "asha@example.com", "phone": "9876543210"},
                 "followupStatus": "Converted"}
            ]
        })))
        .mount(&server)
        .await;

    let leads = api_for(&server).list_leads().await.unwrap();

    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0].form_type, FormType::Contact);
    assert!(leads[0].is_customer_connected);
    assert!(leads[0].created_at.is_some());
    assert_eq!(leads[1].status(), FollowupStatus::Converted);
}

#[tokio::test]
async fn update_lead_status_sends_patch() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/axomitlab/leads/42"))
        .and(body_json(json!({"followupStatus": "In Progress"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let result = api_for(&server)
        .update_lead_status("42", FollowupStatus::InProgress)
        .await;

    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn update_missing_lead_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/axomitlab/leads/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = api_for(&server)
        .update_lead_status("missing", FollowupStatus::Lost)
        .await;

    assert_eq!(result, Err(ApiError::NotFound));
}
