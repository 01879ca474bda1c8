//! Typed HTTP client for the TicketsMaster REST API.
//!
//! One method per endpoint, each a single awaited round trip with a fixed
//! request timeout and no retries. Error statuses are decoded into
//! [`ClientError`] variants so callers can distinguish a deliberate
//! rejection from an unreachable server.
//!
//! # Example
//!
//! ```no_run
//! use ticketsmaster_client::api::ApiClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = ApiClient::new("http://localhost:3000/api".to_string());
//!     let events = api.list_events().await.unwrap();
//!     println!("{} events", events.len());
//! }
//! ```

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::error::ClientError;
use crate::types::{
    Event, EventInput, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
    ResetResponse, User,
};

/// HTTP request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Typed client over the REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Creates a client for the API rooted at `base_url`
    /// (e.g. `http://localhost:3000/api`).
    #[must_use]
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .pool_max_idle_per_host(4)
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn bearer(request: RequestBuilder, token: &str) -> RequestBuilder {
        request.header("Authorization", format!("Bearer {token}"))
    }

    // ------------------------------------------------------------------
    // Authentication
    // ------------------------------------------------------------------

    /// `POST /api/users/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/users/register"))
            .json(request)
            .send()
            .await?;
        expect_json(response).await
    }

    /// `POST /api/users/login`
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/users/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        expect_json(response).await
    }

    /// `POST /api/admin/login`
    pub async fn admin_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/admin/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        expect_json(response).await
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// `GET /api/events`
    pub async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        let response = self.client.get(self.url("/events")).send().await?;
        expect_json(response).await
    }

    /// `GET /api/events/{id}`
    pub async fn get_event(&self, id: &str) -> Result<Event, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/events/{id}")))
            .send()
            .await?;
        expect_json(response).await
    }

    /// `POST /api/events`
    pub async fn create_event(&self, input: &EventInput) -> Result<Event, ClientError> {
        let response = self
            .client
            .post(self.url("/events"))
            .json(input)
            .send()
            .await?;
        expect_json(response).await
    }

    /// `PUT /api/events/{id}` (admin)
    pub async fn update_event(
        &self,
        token: &str,
        id: &str,
        input: &EventInput,
    ) -> Result<Event, ClientError> {
        let request = self.client.put(self.url(&format!("/events/{id}")));
        let response = Self::bearer(request, token).json(input).send().await?;
        expect_json(response).await
    }

    /// `DELETE /api/events/{id}` (admin)
    pub async fn delete_event(&self, token: &str, id: &str) -> Result<MessageResponse, ClientError> {
        let request = self.client.delete(self.url(&format!("/events/{id}")));
        let response = Self::bearer(request, token).send().await?;
        expect_json(response).await
    }

    /// `POST /api/events/reset` (admin)
    pub async fn reset_events(&self, token: &str) -> Result<ResetResponse, ClientError> {
        let request = self.client.post(self.url("/events/reset"));
        let response = Self::bearer(request, token).send().await?;
        expect_json(response).await
    }

    // ------------------------------------------------------------------
    // Admin user management
    // ------------------------------------------------------------------

    /// `GET /api/admin/users` (admin)
    pub async fn list_users(&self, token: &str) -> Result<Vec<User>, ClientError> {
        let request = self.client.get(self.url("/admin/users"));
        let response = Self::bearer(request, token).send().await?;
        expect_json(response).await
    }

    /// `DELETE /api/admin/users/{id}` (admin)
    pub async fn delete_user(&self, token: &str, id: &str) -> Result<MessageResponse, ClientError> {
        let request = self.client.delete(self.url(&format!("/admin/users/{id}")));
        let response = Self::bearer(request, token).send().await?;
        expect_json(response).await
    }
}

/// Parses a success body as `T`, or decodes an error status into the
/// matching [`ClientError`] using the server's `{ "message": ... }` body
/// when one is present.
async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<MessageResponse>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    debug!(status = status.as_u16(), message = %message, "Request rejected");
    Err(ClientError::from_status(status.as_u16(), message))
}
