//! Wire types for the TicketsMaster REST API, as seen by the client.
//!
//! These mirror the server's serialized representations: document `_id`
//! field names and camelCase members. Users arrive without their password
//! hashes; the client never sees one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// A user as the API returns it (no password field exists on the wire).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Geographic position of an event venue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lng: f64,
}

/// An event record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub date: String,
    pub location: String,
    pub position: Option<GeoPosition>,
    pub description: Option<String>,
    pub price: f64,
    pub available_tickets: i64,
    pub created_at: DateTime<Utc>,
}

/// Fields sent when creating or updating an event.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub name: String,
    pub date: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<GeoPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_tickets: Option<i64>,
}

/// Body of the registration request.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Response of a successful registration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
}

/// Response of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: User,
}

/// Generic `{ "message": ... }` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response of the event reset endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetResponse {
    pub message: String,
    pub events: Vec<Event>,
}
