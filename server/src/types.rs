//! Data model for the TicketsMaster server.
//!
//! `User` and `Event` are the two persisted record types. Both serialize
//! with the document store's `_id` field name and camelCase member names, and
//! the same representation is what the REST API returns, so a stored record
//! and a wire record are identical. The one exception is the password hash:
//! users never leave the server as `User`, only as [`PublicUser`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default ticket price applied when event creation omits one.
pub const DEFAULT_PRICE: f64 = 0.0;

/// Default available-ticket count applied when event creation omits one.
pub const DEFAULT_AVAILABLE_TICKETS: i64 = 100;

// ============================================================================
// Users
// ============================================================================

/// Role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account created through registration.
    #[default]
    User,
    /// Administrator account.
    Admin,
}

impl Role {
    /// Returns `true` for the admin role.
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// A stored user record.
///
/// The `password` field holds an argon2 PHC hash, never a plaintext
/// password. This type must not be serialized into an API response; use
/// [`PublicUser`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (UUID string, stored as the document `_id`).
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name.
    pub name: String,

    /// Email address, unique across all users.
    pub email: String,

    /// Login name, unique across all users.
    pub username: String,

    /// Argon2 hash of the password in PHC string format.
    pub password: String,

    /// Account role.
    #[serde(default)]
    pub role: Role,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user record with a fresh identifier and timestamp.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            username: username.into(),
            password: password_hash.into(),
            role,
            created_at: Utc::now(),
        }
    }
}

/// A user as returned by the API: everything except the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Events
// ============================================================================

/// Geographic position of an event venue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lng: f64,
}

/// A stored event record.
///
/// `date` is a free-text string, not a validated calendar type, and neither
/// `price` nor `available_tickets` is range-checked; both quirks match the
/// published contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier (UUID string, stored as the document `_id`).
    #[serde(rename = "_id")]
    pub id: String,

    /// Event name.
    pub name: String,

    /// Event date as entered.
    pub date: String,

    /// Venue description.
    pub location: String,

    /// Optional venue coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<GeoPosition>,

    /// Optional long-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ticket price.
    pub price: f64,

    /// Remaining ticket count.
    pub available_tickets: i64,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating or updating an event.
///
/// Everything except name, date and location is optional; creation fills in
/// [`DEFAULT_PRICE`] and [`DEFAULT_AVAILABLE_TICKETS`] for omitted values.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub name: String,
    pub date: String,
    pub location: String,
    #[serde(default)]
    pub position: Option<GeoPosition>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub available_tickets: Option<i64>,
}

impl Event {
    /// Creates a new event record from input fields, applying defaults for
    /// omitted price and ticket count.
    #[must_use]
    pub fn from_input(input: EventInput) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            date: input.date,
            location: input.location,
            position: input.position,
            description: input.description,
            price: input.price.unwrap_or(DEFAULT_PRICE),
            available_tickets: input.available_tickets.unwrap_or(DEFAULT_AVAILABLE_TICKETS),
            created_at: Utc::now(),
        }
    }

    /// Applies an update in place: named fields replace current values,
    /// omitted optional fields are left untouched.
    pub fn apply_update(&mut self, input: EventInput) {
        self.name = input.name;
        self.date = input.date;
        self.location = input.location;
        if input.position.is_some() {
            self.position = input.position;
        }
        if input.description.is_some() {
            self.description = input.description;
        }
        if let Some(price) = input.price {
            self.price = price;
        }
        if let Some(available_tickets) = input.available_tickets {
            self.available_tickets = available_tickets;
        }
    }
}

// ============================================================================
// Request / response bodies
// ============================================================================

/// Body of `POST /api/users/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Body of `POST /api/users/login` and `POST /api/admin/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response of a successful registration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
}

/// Response of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

/// Generic `{ "message": ... }` response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response of `POST /api/events/reset`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub message: String,
    pub events: Vec<Event>,
}
