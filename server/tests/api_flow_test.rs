//! End-to-end API flow tests.
//!
//! Drives the full router over the in-memory store the way a deployed
//! server is driven over MongoDB: seed on startup, authenticate through the
//! login endpoints, then use the returned tokens against the admin surface.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use ticketsmaster_server::config::Config;
use ticketsmaster_server::routes::{create_router, AppState};
use ticketsmaster_server::seed::{ensure_default_admin, seed_events_if_empty};
use ticketsmaster_server::store::{MemoryStore, Store};

const SECRET: &str = "flow-test-secret";

/// Builds a router over a freshly seeded in-memory store, mirroring the
/// server's startup path.
async fn seeded_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    seed_events_if_empty(store.as_ref()).await.unwrap();
    ensure_default_admin(store.as_ref()).await.unwrap();

    let config = Config::with_values(0, SECRET, "mongodb://unused");
    let app = create_router(AppState::new(config, store.clone()));
    (app, store)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn authed(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"));
    match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn admin_token(app: &Router) -> String {
    let (status, body) = send(
        app,
        post_json(
            "/api/admin/login",
            json!({ "username": "admin", "password": "admin123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn startup_seeds_events_and_default_admin() {
    let (app, store) = seeded_app().await;

    let (status, body) = send(&app, get("/api/events")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 10);

    // The seeded admin can log in through the admin endpoint.
    let token = admin_token(&app).await;
    assert!(!token.is_empty());

    // Seeding again (a restart) must not duplicate anything.
    seed_events_if_empty(store.as_ref()).await.unwrap();
    ensure_default_admin(store.as_ref()).await.unwrap();
    let (_, body) = send(&app, get("/api/events")).await;
    assert_eq!(body.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn registered_user_can_log_in_but_not_reach_admin_routes() {
    let (app, _store) = seeded_app().await;

    let (status, _) = send(
        &app,
        post_json(
            "/api/users/register",
            json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "username": "ada",
                "password": "analytical"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        post_json(
            "/api/users/login",
            json!({ "username": "ada", "password": "analytical" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let user_token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["role"], "user");

    // A perfectly valid user token is not an admin token.
    let (status, body) = send(&app, authed("GET", "/api/admin/users", &user_token, None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access denied. Admin only.");

    // And the plain login endpoint refuses admin privileges to nobody:
    // the admin login rejects this non-admin account outright.
    let (status, _) = send(
        &app,
        post_json(
            "/api/admin/login",
            json!({ "username": "ada", "password": "analytical" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_manages_events_end_to_end() {
    let (app, _store) = seeded_app().await;
    let token = admin_token(&app).await;

    // Create (public endpoint), then update and delete as admin.
    let (status, created) = send(
        &app,
        post_json(
            "/api/events",
            json!({ "name": "Pop-up Show", "date": "2026-09-01", "location": "Warehouse 9" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["_id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        authed(
            "PUT",
            &format!("/api/events/{id}"),
            &token,
            Some(json!({
                "name": "Pop-up Show (moved)",
                "date": "2026-09-02",
                "location": "Warehouse 10",
                "price": 12.5
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Pop-up Show (moved)");
    assert_eq!(updated["price"], 12.5);

    let (status, body) = send(
        &app,
        authed("DELETE", &format!("/api/events/{id}"), &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Event deleted successfully");

    // Deleting again is a 404, never a silent success.
    let (status, _) = send(
        &app,
        authed("DELETE", &format!("/api/events/{id}"), &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reset_restores_the_sample_set() {
    let (app, store) = seeded_app().await;
    let token = admin_token(&app).await;

    // Drift the collection away from the sample set.
    send(
        &app,
        post_json(
            "/api/events",
            json!({ "name": "Drift", "date": "d", "location": "l" }),
        ),
    )
    .await;
    assert_eq!(store.count_events().await.unwrap(), 11);

    let (status, body) = send(&app, authed("POST", "/api/events/reset", &token, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Events reset successfully");
    assert_eq!(body["events"].as_array().unwrap().len(), 10);
    assert_eq!(store.count_events().await.unwrap(), 10);
}

#[tokio::test]
async fn deleted_admin_is_locked_out_immediately() {
    let (app, store) = seeded_app().await;
    let token = admin_token(&app).await;

    let admin = store
        .find_user_by_username("admin")
        .await
        .unwrap()
        .expect("seeded admin");

    // The admin deletes their own account; nothing prevents it.
    let (status, _) = send(
        &app,
        authed(
            "DELETE",
            &format!("/api/admin/users/{}", admin.id),
            &token,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Their unexpired token is now worthless: the gate re-reads the store.
    let (status, _) = send(&app, authed("GET", "/api/admin/users", &token, None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
