//! Integration tests for the typed API client.
//!
//! These tests run the client against a mock server and verify request
//! shape (paths, bearer headers, bodies) and response decoding, including
//! the status-to-error mapping the demo fallback depends on.

use serde_json::json;
use ticketsmaster_client::api::ApiClient;
use ticketsmaster_client::error::ClientError;
use ticketsmaster_client::types::{EventInput, RegisterRequest};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Test Helpers
// =============================================================================

/// Creates a client pointed at the mock server's `/api` root.
fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(format!("{}/api", server.uri()))
}

/// A wire-format event body as the server would return it.
fn event_body(id: &str, name: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "name": name,
        "date": "2026-12-01",
        "location": "Stadium A",
        "price": 50.0,
        "availableTickets": 100,
        "createdAt": "2026-08-01T10:00:00Z"
    })
}

fn admin_user_body() -> serde_json::Value {
    json!({
        "_id": "u-1",
        "name": "System Administrator",
        "email": "admin@ticketsmaster.com",
        "username": "admin",
        "role": "admin",
        "createdAt": "2026-08-01T10:00:00Z"
    })
}

// =============================================================================
// Event endpoints
// =============================================================================

#[tokio::test]
async fn list_events_decodes_wire_format() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([event_body("evt-1", "Concert Night")])),
        )
        .mount(&mock_server)
        .await;

    let events = client_for(&mock_server).list_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "evt-1");
    assert_eq!(events[0].available_tickets, 100);
}

#[tokio::test]
async fn get_event_maps_404_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Event not found" })),
        )
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).get_event("missing").await;
    match result {
        Err(ClientError::NotFound { message }) => assert_eq!(message, "Event not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn create_event_posts_camel_case_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/events"))
        .and(body_partial_json(json!({
            "name": "X",
            "date": "2026-01-01",
            "location": "Y",
            "availableTickets": 25
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(event_body("evt-new", "X")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let event = client_for(&mock_server)
        .create_event(&EventInput {
            name: "X".to_string(),
            date: "2026-01-01".to_string(),
            location: "Y".to_string(),
            available_tickets: Some(25),
            ..EventInput::default()
        })
        .await
        .unwrap();
    assert_eq!(event.id, "evt-new");
}

#[tokio::test]
async fn server_errors_trigger_demo_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Server error" })),
        )
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).list_events().await.unwrap_err();
    assert!(err.triggers_demo_fallback());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Point at a port nothing listens on.
    let api = ApiClient::new("http://127.0.0.1:9/api".to_string());
    let err = api.list_events().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    assert!(err.triggers_demo_fallback());
}

// =============================================================================
// Authentication endpoints
// =============================================================================

#[tokio::test]
async fn register_decodes_conflict_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "User already exists" })),
        )
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .register(&RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            username: "ada".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Rejected { .. }));
    assert_eq!(err.to_string(), "User already exists");
    // The rejection must not be mistaken for an unreachable server.
    assert!(!err.triggers_demo_fallback());
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .and(body_partial_json(json!({ "username": "admin", "password": "admin123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "token": "jwt-token",
            "user": admin_user_body()
        })))
        .mount(&mock_server)
        .await;

    let response = client_for(&mock_server)
        .login("admin", "admin123")
        .await
        .unwrap();
    assert_eq!(response.token, "jwt-token");
    assert_eq!(response.user.username, "admin");
}

// =============================================================================
// Admin endpoints
// =============================================================================

#[tokio::test]
async fn admin_calls_send_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([admin_user_body()])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let users = client_for(&mock_server)
        .list_users("secret-token")
        .await
        .unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn admin_calls_decode_401_and_403() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/events/reset"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "message": "Access denied. No token provided." })),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/u-2"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "message": "Access denied. Admin only." })),
        )
        .mount(&mock_server)
        .await;

    let api = client_for(&mock_server);

    let reset = api.reset_events("stale").await;
    assert!(matches!(reset, Err(ClientError::Unauthorized { .. })));

    let delete = api.delete_user("stale", "u-2").await;
    assert!(matches!(delete, Err(ClientError::Forbidden { .. })));
}

#[tokio::test]
async fn update_event_puts_to_event_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/events/evt-1"))
        .and(header("Authorization", "Bearer tok"))
        .and(body_partial_json(json!({ "name": "Renamed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(event_body("evt-1", "Renamed")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let event = client_for(&mock_server)
        .update_event(
            "tok",
            "evt-1",
            &EventInput {
                name: "Renamed".to_string(),
                date: "2026-12-01".to_string(),
                location: "Stadium A".to_string(),
                ..EventInput::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(event.name, "Renamed");
}

#[tokio::test]
async fn error_without_json_body_still_decodes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events/evt-1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).get_event("evt-1").await.unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 502, .. }));
}
