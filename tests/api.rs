//! End-to-end HTTP tests over the in-memory store.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use eventapp::checkout::{CheckoutError, CheckoutRequest, CheckoutSession};
use eventapp::config::CheckoutConfig;
use eventapp::{app, AppState, CheckoutGateway, InMemoryStore, StripeCheckout};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const MAX_BODY: usize = 64 * 1024;

#[derive(Default)]
struct RecordingGateway {
    requests: Mutex<Vec<CheckoutRequest>>,
}

#[async_trait]
impl CheckoutGateway for RecordingGateway {
    async fn create_session(&self, request: CheckoutRequest) -> Result<CheckoutSession, CheckoutError> {
        self.requests.lock().unwrap().push(request);
        Ok(CheckoutSession {
            id: "cs_test_1".into(),
        })
    }
}

fn test_app() -> (Router, Arc<RecordingGateway>) {
    let gateway = Arc::new(RecordingGateway::default());
    let state = AppState::in_memory(Arc::new(InMemoryStore::new()), gateway.clone());
    (app(state, MAX_BODY), gateway)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Option<String>, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => {
            let text = b.to_string();
            builder
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::CONTENT_LENGTH, text.len())
                .body(Body::from(text))
                .unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, location, json)
}

async fn seed_types(app: &Router) {
    let (status, _, _) = send(app, "POST", "/api/eventtype", Some(json!({"eventTypeName": "Concert"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _, _) = send(app, "POST", "/api/tickettype", Some(json!({"ticketTypeName": "VIP"}))).await;
    assert_eq!(status, StatusCode::CREATED);
}

fn event_body(name: &str, location: &str) -> Value {
    json!({
        "eventName": name,
        "location": location,
        "eventDate": "2025-06-01T19:00:00",
        "description": "Open air",
        "ticketPrice": 25.5,
        "limit": 100,
        "eventTypeId": 1,
        "ticketTypeId": 1
    })
}

#[tokio::test]
async fn health_and_ready_respond() {
    let (app, _) = test_app();
    let (status, _, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let (status, _, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "in_memory");
    assert_eq!(body["latest_schema_version"], 2);
    assert!(body.get("schema").is_none());

    let (status, _, body) = send(&app, "GET", "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "eventapp");
    assert_eq!(body["schema_version"], 2);
}

#[tokio::test]
async fn event_lifecycle() {
    let (app, _) = test_app();
    seed_types(&app).await;

    let (status, location, body) = send(&app, "POST", "/api/events", Some(event_body("Summer Fest", "Central Park"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(location.as_deref(), Some("/api/events/1"));
    assert_eq!(body["data"]["eventId"], 1);
    assert_eq!(body["data"]["description"], "Open air");
    assert_eq!(body["data"]["ticketPrice"], 25.5);

    let (status, _, body) = send(&app, "GET", "/api/events/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["eventName"], "Summer Fest");
    assert_eq!(body["data"]["eventTypeName"], "Concert");
    assert_eq!(body["data"]["ticketTypeName"], "VIP");
    assert!(body.get("meta").is_none());

    let (status, _, body) = send(&app, "PUT", "/api/events/1", Some(json!({"location": "Hyde Park"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["location"], "Hyde Park");
    assert_eq!(body["data"]["eventName"], "Summer Fest");
    assert_eq!(body["data"]["limit"], 100);
    assert_eq!(body["data"]["isDeleted"], false);

    let (status, _, body) = send(&app, "DELETE", "/api/events/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["eventId"], 1);
    assert_eq!(body["data"]["location"], "Hyde Park");

    // Gone from the list, still reachable by id.
    let (status, _, body) = send(&app, "GET", "/api/events", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "No event found.");
    let (status, _, _) = send(&app, "GET", "/api/events/1", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn event_list_filters_by_name_or_location() {
    let (app, _) = test_app();
    seed_types(&app).await;
    send(&app, "POST", "/api/events", Some(event_body("Summer Fest", "Central Park"))).await;
    send(&app, "POST", "/api/events", Some(event_body("Jazz Night", "Blue Note"))).await;

    let (status, _, body) = send(&app, "GET", "/api/events", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], 2);

    let (_, _, body) = send(&app, "GET", "/api/events?filter=Park", None).await;
    assert_eq!(body["meta"]["count"], 1);
    assert_eq!(body["data"][0]["eventName"], "Summer Fest");

    let (_, _, body) = send(&app, "GET", "/api/events?filter=Jazz", None).await;
    assert_eq!(body["data"][0]["location"], "Blue Note");

    let (_, _, body) = send(&app, "GET", "/api/events?filter=", None).await;
    assert_eq!(body["meta"]["count"], 2);

    let (status, _, _) = send(&app, "GET", "/api/events?filter=park", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let (app, _) = test_app();
    seed_types(&app).await;

    let (status, _, body) = send(&app, "GET", "/api/events/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Event with id 42 not found.");
    let (status, _, _) = send(&app, "PUT", "/api/events/42", Some(json!({"location": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(&app, "DELETE", "/api/events/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = send(&app, "GET", "/api/eventtype/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Event type not found.");
    let (status, _, body) = send(&app, "GET", "/api/tickettype/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Ticket type not found.");
}

#[tokio::test]
async fn null_or_malformed_bodies_are_bad_requests() {
    let (app, _) = test_app();
    let (status, _, body) = send(&app, "POST", "/api/eventtype", Some(Value::Null)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "EventTypeDto object is null");

    let (status, _, _) = send(&app, "POST", "/api/events", Some(json!({"limit": "many"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(&app, "GET", "/api/events/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn event_with_missing_type_reference_is_internal_error() {
    let (app, _) = test_app();
    let (status, _, body) = send(&app, "POST", "/api/events", Some(event_body("Orphan", "Nowhere"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Internal server error. Please try again later.");
}

#[tokio::test]
async fn event_type_lifecycle() {
    let (app, _) = test_app();

    let (status, _, body) = send(&app, "GET", "/api/eventtype", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], 0);

    let (status, location, body) = send(&app, "POST", "/api/eventtype", Some(json!({"eventTypeName": "Concert"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(location.as_deref(), Some("/api/eventtype/1"));
    assert_eq!(body["data"]["eventTypeId"], 1);
    assert_eq!(body["data"]["isDeleted"], false);

    let (status, _, body) = send(&app, "PUT", "/api/eventtype/1", Some(json!({"eventTypeName": "Festival"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["eventTypeName"], "Festival");

    // Omitted name clears it.
    let (_, _, body) = send(&app, "PUT", "/api/eventtype/1", Some(json!({}))).await;
    assert_eq!(body["data"]["eventTypeName"], Value::Null);

    let (status, _, body) = send(&app, "DELETE", "/api/eventtype/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["eventTypeId"], 1);

    let (_, _, body) = send(&app, "GET", "/api/eventtype", None).await;
    assert_eq!(body["meta"]["count"], 0);
    let (status, _, body) = send(&app, "GET", "/api/eventtype/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["eventTypeId"], 1);
}

#[tokio::test]
async fn ticket_type_lifecycle() {
    let (app, _) = test_app();

    let (status, _, body) = send(&app, "GET", "/api/tickettype", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "No ticket type found.");

    let (status, location, _) = send(&app, "POST", "/api/tickettype", Some(json!({"ticketTypeName": "VIP"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(location.as_deref(), Some("/api/tickettype/1"));

    // Omitted name keeps the stored one.
    let (status, _, body) = send(&app, "PUT", "/api/tickettype/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ticketTypeName"], "VIP");

    let (_, _, body) = send(&app, "GET", "/api/tickettype", None).await;
    assert_eq!(body["data"][0]["ticketTypeName"], "VIP");

    let (status, _, _) = send(&app, "DELETE", "/api/tickettype/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = send(&app, "GET", "/api/tickettype", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn payment_creates_session_in_minor_units() {
    let (app, gateway) = test_app();
    let (status, _, body) = send(
        &app,
        "POST",
        "/api/payment?eventId=7",
        Some(json!({"eventName": "Summer Fest", "ticketPrice": 25.5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sessionId"], "cs_test_1");

    let requests = gateway.requests.lock().unwrap();
    assert_eq!(
        *requests,
        vec![CheckoutRequest {
            event_name: "Summer Fest".into(),
            unit_amount: 2550,
        }]
    );
}

#[tokio::test]
async fn payment_requires_name_and_price() {
    let (app, gateway) = test_app();
    let (status, _, _) = send(&app, "POST", "/api/payment", Some(json!({"eventName": "Summer Fest"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _, _) = send(&app, "POST", "/api/payment", Some(json!({"ticketPrice": 10}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _, _) = send(
        &app,
        "POST",
        "/api/payment",
        Some(json!({"eventName": "Summer Fest", "ticketPrice": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(gateway.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn payment_without_provider_key_is_internal_error() {
    let state = AppState::in_memory(
        Arc::new(InMemoryStore::new()),
        Arc::new(StripeCheckout::new(CheckoutConfig::default())),
    );
    let app = app(state, MAX_BODY);
    let (status, _, body) = send(
        &app,
        "POST",
        "/api/payment",
        Some(json!({"eventName": "Summer Fest", "ticketPrice": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Internal server error. Please try again later.");
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let (app, _) = test_app();
    let big = "x".repeat(MAX_BODY + 1);
    let (status, _, body) = send(&app, "POST", "/api/eventtype", Some(json!({"eventTypeName": big}))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "payload_too_large");
    assert_eq!(body["error"]["message"], "EventTypeDto body exceeds the size limit");

    let (status, _, _) = send(&app, "GET", "/api/eventtype", None).await;
    assert_eq!(status, StatusCode::OK);
}
