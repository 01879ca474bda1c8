//! HTTP route handlers for the TicketsMaster server.
//!
//! This module provides the REST API endpoints:
//!
//! - `POST /api/users/register` - Create an account
//! - `POST /api/users/login` - Authenticate and receive a session token
//! - `POST /api/admin/login` - Authenticate an admin account
//! - `GET /api/events` - List events, newest first (public)
//! - `POST /api/events` - Create an event (public)
//! - `GET /api/events/{id}` - Fetch one event (public)
//! - `PUT /api/events/{id}` - Update an event (admin)
//! - `DELETE /api/events/{id}` - Delete an event (admin)
//! - `POST /api/events/reset` - Clear and re-seed events (admin)
//! - `GET /api/admin/users` - List users without password hashes (admin)
//! - `DELETE /api/admin/users/{id}` - Delete a user (admin)
//!
//! # Architecture
//!
//! All routes share application state through [`AppState`]: the parsed
//! configuration and the document store behind the [`Store`] trait.
//! Admin-gated routes sit behind the [`require_admin`] middleware, which
//! validates the bearer token and then re-reads the subject's current role
//! from the store, so a role downgrade locks the account out on its very
//! next request even while older tokens are unexpired.

use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::auth::{bearer_token, issue_token, verify_token};
use crate::config::{Config, TOKEN_LIFETIME_SECS};
use crate::error::{ApiError, ApiResult};
use crate::seed::sample_events;
use crate::store::Store;
use crate::types::{
    Event, EventInput, LoginRequest, LoginResponse, MessageResponse, PublicUser, RegisterRequest,
    RegisterResponse, ResetResponse, Role, User,
};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<Config>,

    /// Document store holding users and events.
    pub store: Arc<dyn Store>,
}

impl AppState {
    /// Creates application state over the given store.
    #[must_use]
    pub fn new(config: Config, store: Arc<dyn Store>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("store", &"<Store>")
            .finish()
    }
}

/// The authenticated admin resolved by [`require_admin`], available to
/// admin handlers through request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

// ============================================================================
// Router
// ============================================================================

/// Creates the application router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
        .route("/api/admin/login", post(admin_login))
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/{id}", get(get_event));

    let admin = Router::new()
        .route("/api/events/{id}", put(update_event).delete(delete_event))
        .route("/api/events/reset", post(reset_events))
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/{id}", axum::routing::delete(delete_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    public
        .merge(admin)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Admin gate
// ============================================================================

/// Middleware guarding admin-only routes.
///
/// Rejects with 401 when no bearer token is present or the token fails
/// signature/expiry validation, and with 403 when the subject's *current*
/// role in the store is not admin. The resolved user is attached to request
/// extensions for the downstream handler.
async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| ApiError::unauthorized("Access denied. No token provided."))?;

    let claims = verify_token(token, &state.config.jwt_secret)
        .map_err(|_| ApiError::unauthorized("Invalid token."))?;

    // The role claim inside the token is deliberately ignored here; only the
    // role currently in the store grants access.
    let user = state.store.find_user_by_id(&claims.sub).await?;
    let user = match user {
        Some(user) if user.role == Role::Admin => user,
        Some(user) => {
            warn!(user_id = %user.id, "Non-admin user attempted an admin route");
            return Err(ApiError::forbidden("Access denied. Admin only."));
        }
        None => {
            warn!(user_id = %claims.sub, "Token subject no longer exists");
            return Err(ApiError::forbidden("Access denied. Admin only."));
        }
    };

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

// ============================================================================
// Authentication
// ============================================================================

/// POST /api/users/register - Create an account.
///
/// Fails with a conflict when the email or username is already taken.
/// New accounts always get the `user` role.
async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let existing = state
        .store
        .find_user_by_email_or_username(&body.email, &body.username)
        .await?;
    if existing.is_some() {
        debug!(username = %body.username, "Registration rejected: duplicate email or username");
        return Err(ApiError::conflict("User already exists"));
    }

    let password_hash = crate::auth::hash_password(&body.password)
        .map_err(|err| ApiError::internal(err.to_string()))?;
    let user = User::new(body.name, body.email, body.username, password_hash, Role::User);
    let user_id = user.id.clone();
    state.store.insert_user(user).await?;

    info!(user_id = %user_id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            user_id,
        }),
    ))
}

/// POST /api/users/login - Authenticate and receive a 24h session token.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = state
        .store
        .find_user_by_username(&body.username)
        .await?
        .ok_or_else(|| ApiError::invalid_credentials("Invalid credentials"))?;

    if !crate::auth::verify_password(&body.password, &user.password) {
        debug!(username = %body.username, "Login rejected: password mismatch");
        return Err(ApiError::invalid_credentials("Invalid credentials"));
    }

    let token = issue_token(
        &user.id,
        user.role,
        &state.config.jwt_secret,
        TOKEN_LIFETIME_SECS,
    )
    .map_err(|err| ApiError::internal(err.to_string()))?;

    info!(user_id = %user.id, "User logged in");
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: user.into(),
    }))
}

/// POST /api/admin/login - Authenticate an admin account.
///
/// Identical to login, except that a matched user whose role is not admin
/// is rejected with the same message as an unknown username.
async fn admin_login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = state
        .store
        .find_user_by_username(&body.username)
        .await?
        .filter(|user| user.role == Role::Admin)
        .ok_or_else(|| ApiError::invalid_credentials("Invalid admin credentials"))?;

    if !crate::auth::verify_password(&body.password, &user.password) {
        debug!(username = %body.username, "Admin login rejected: password mismatch");
        return Err(ApiError::invalid_credentials("Invalid admin credentials"));
    }

    let token = issue_token(
        &user.id,
        user.role,
        &state.config.jwt_secret,
        TOKEN_LIFETIME_SECS,
    )
    .map_err(|err| ApiError::internal(err.to_string()))?;

    info!(user_id = %user.id, "Admin logged in");
    Ok(Json(LoginResponse {
        message: "Admin login successful".to_string(),
        token,
        user: user.into(),
    }))
}

// ============================================================================
// Events
// ============================================================================

/// GET /api/events - List all events, newest first. No auth required.
async fn list_events(State(state): State<AppState>) -> ApiResult<Json<Vec<Event>>> {
    let events = state.store.list_events().await?;
    Ok(Json(events))
}

/// POST /api/events - Create an event. No auth required.
///
/// Omitted price and ticket count fall back to the documented defaults.
async fn create_event(
    State(state): State<AppState>,
    Json(input): Json<EventInput>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    let event = Event::from_input(input);
    state.store.insert_event(event.clone()).await?;

    info!(event_id = %event.id, name = %event.name, "Event created");
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/events/{id} - Fetch a single event.
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Event>> {
    let event = state
        .store
        .find_event(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;
    Ok(Json(event))
}

/// PUT /api/events/{id} - Replace the named fields of an event. Admin only.
async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Json(input): Json<EventInput>,
) -> ApiResult<Json<Event>> {
    let mut event = state
        .store
        .find_event(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;

    event.apply_update(input);
    state.store.replace_event(&event).await?;

    info!(event_id = %event.id, admin_id = %admin.id, "Event updated");
    Ok(Json(event))
}

/// DELETE /api/events/{id} - Delete an event. Admin only.
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.store.delete_event(&id).await? {
        return Err(ApiError::not_found("Event not found"));
    }

    info!(event_id = %id, admin_id = %admin.id, "Event deleted");
    Ok(Json(MessageResponse {
        message: "Event deleted successfully".to_string(),
    }))
}

/// POST /api/events/reset - Clear all events and re-seed the sample set.
/// Admin only.
///
/// Delete-all and bulk-insert are separate store operations; a concurrent
/// reader can observe the empty collection between them.
async fn reset_events(
    State(state): State<AppState>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
) -> ApiResult<Json<ResetResponse>> {
    state.store.delete_all_events().await?;
    state.store.insert_events(&sample_events()).await?;
    let events = state.store.list_events().await?;

    info!(admin_id = %admin.id, count = events.len(), "Events reset");
    Ok(Json(ResetResponse {
        message: "Events reset successfully".to_string(),
        events,
    }))
}

// ============================================================================
// Admin user management
// ============================================================================

/// GET /api/admin/users - List all users with password hashes excluded.
/// Admin only.
async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<PublicUser>>> {
    let users = state.store.list_users().await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

/// DELETE /api/admin/users/{id} - Delete a user. Admin only.
///
/// Nothing prevents an admin from deleting their own account or the last
/// remaining admin; the per-request role re-check locks such an account out
/// immediately afterwards.
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.store.delete_user(&id).await? {
        return Err(ApiError::not_found("User not found"));
    }

    info!(user_id = %id, admin_id = %admin.id, "User deleted");
    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}

// ============================================================================
// Tests
// ============================================================================
