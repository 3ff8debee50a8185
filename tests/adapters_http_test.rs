use httpmock::prelude::*;
use renovation_quote::config::{GeocodingConfig, QuoteConfig};
use renovation_quote::core::debounce::DistanceDebouncer;
use renovation_quote::core::reducer::{FormAction, NumericField};
use renovation_quote::domain::model::{BuildingCondition, ElementType, PropertyType, ServiceCode};
use renovation_quote::domain::ports::{ConfigProvider, DistanceLookup};
use renovation_quote::{
    FallbackLookup, FlowPosition, HttpLeadSink, NominatimLookup, PricingEngine, QuoteSession,
};
use std::sync::Arc;
use std::time::Duration;

fn geocoding(endpoint: String) -> GeocodingConfig {
    GeocodingConfig {
        endpoint,
        user_agent: None,
        country: None,
        debounce_ms: Some(20),
    }
}

/// A varnishing request for five doors, ready to submit.
fn doors_session() -> QuoteSession {
    let mut session = QuoteSession::new(PricingEngine::default());
    let actions = vec![
        FormAction::SetPostalCode("22767".to_string()),
        FormAction::SetPropertyType(PropertyType::House),
        FormAction::ToggleService(ServiceCode::Varnishing),
        FormAction::SetElementType(ElementType::Doors),
        FormAction::SetNumber {
            field: NumericField::ElementCount,
            raw: "5".to_string(),
        },
        FormAction::SetBuildingCondition(BuildingCondition::Standard),
        FormAction::SetContactName("Jonas Weber".to_string()),
        FormAction::SetContactPhone("+49 40 555 0100".to_string()),
        FormAction::SetContactEmail("jonas@example.org".to_string()),
    ];
    for action in actions {
        session.dispatch(action);
    }
    while !session.position().is_terminal() {
        session.next().unwrap();
    }
    session
}

#[tokio::test]
async fn test_session_posts_lead_to_endpoint() {
    let server = MockServer::start();
    let lead_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/leads")
            .body_contains("540€ - 690€")
            .body_contains("\"source\":\"landing-page\"")
            .body_contains("jonas@example.org");
        then.status(201)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"id": 17}));
    });

    let config = QuoteConfig::from_toml_str(&format!(
        "[leads]\nendpoint = \"{}\"\nsource = \"landing-page\"\n",
        server.url("/api/leads")
    ))
    .unwrap();
    let sink = HttpLeadSink::new(config.lead_endpoint().unwrap());

    let mut session = doors_session();
    assert_eq!(session.position(), FlowPosition::Submit);
    let receipt = session.submit(&sink, config.lead_source()).await.unwrap();

    lead_mock.assert();
    assert_eq!(receipt, "17");
    assert!(session.is_submitted());
}

#[tokio::test]
async fn test_rejected_lead_keeps_session_open() {
    let server = MockServer::start();
    let lead_mock = server.mock(|when, then| {
        when.method(POST).path("/api/leads");
        then.status(422).body("invalid phone");
    });

    let sink = HttpLeadSink::new(server.url("/api/leads"));
    let mut session = doors_session();
    let error = session.submit(&sink, "quote-calculator").await.unwrap_err();

    lead_mock.assert();
    assert!(error.to_string().contains("invalid phone"));
    assert!(!session.is_submitted());
    assert_eq!(session.position(), FlowPosition::Submit);
}

#[tokio::test]
async fn test_debounced_lookup_annotates_form() {
    let server = MockServer::start();
    let geo_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("postalcode", "22767")
            .header("user-agent", GeocodingConfig::DEFAULT_USER_AGENT);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([{"lat": "53.5503", "lon": "9.9322"}]));
    });

    let config = QuoteConfig::default();
    let geocoding = geocoding(server.url("/search"));
    let lookup: Arc<dyn DistanceLookup> = Arc::new(FallbackLookup::new(NominatimLookup::new(
        &geocoding,
        config.service_area(),
    )));
    let (mut debouncer, mut results) = DistanceDebouncer::new(lookup, geocoding.debounce());

    let mut session = QuoteSession::new(PricingEngine::default());
    session.dispatch(FormAction::SetPostalCode("22767".to_string()));
    debouncer.schedule(&session.state().postal_code);

    let annotation = tokio::time::timeout(Duration::from_secs(5), results.recv())
        .await
        .unwrap()
        .unwrap();
    session.dispatch(FormAction::AnnotateDistance(annotation));

    geo_mock.assert();
    let distance = session.state().distance.clone().unwrap();
    assert_eq!(distance.postal_code, "22767");
    assert!(distance.distance_km < 10);
    assert!(!distance.outside_service_area);
    assert!(!distance.is_estimate);
}

#[tokio::test]
async fn test_unreachable_geocoder_falls_back_to_estimate() {
    // Nothing listens on this port.
    let lookup = FallbackLookup::new(NominatimLookup::new(
        &geocoding("http://127.0.0.1:9/search".to_string()),
        QuoteConfig::default().service_area(),
    ));

    let annotation = lookup.lookup("28195").await.unwrap().unwrap();
    assert!(annotation.is_estimate);
    assert_eq!(annotation.distance_km, 100);
}
