//! Document-store access for users and events.
//!
//! Handlers depend on the [`Store`] trait rather than a concrete backend.
//! [`MongoStore`] is the production implementation over the `users` and
//! `events` collections; [`MemoryStore`] backs the integration tests and
//! storeless local runs. Both return events ordered by creation time,
//! most recent first.
//!
//! Each operation is a single document-store call with no multi-document
//! transactions; callers that compose several operations (reset, seeding)
//! get no isolation between the steps.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Event, User};

/// Errors surfaced by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend failed; the message describes the underlying cause.
    #[error("document store error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Persistence operations used by the request handlers.
#[async_trait]
pub trait Store: Send + Sync {
    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Inserts a user record.
    async fn insert_user(&self, user: User) -> Result<(), StoreError>;

    /// Looks up a user by id.
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Looks up a user by username.
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Looks up any user matching the given email **or** username.
    ///
    /// Used by registration to enforce uniqueness of both fields.
    async fn find_user_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Returns all users.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Deletes a user by id. Returns `false` when no record matched.
    async fn delete_user(&self, id: &str) -> Result<bool, StoreError>;

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Inserts an event record.
    async fn insert_event(&self, event: Event) -> Result<(), StoreError>;

    /// Bulk-inserts event records.
    async fn insert_events(&self, events: &[Event]) -> Result<(), StoreError>;

    /// Looks up an event by id.
    async fn find_event(&self, id: &str) -> Result<Option<Event>, StoreError>;

    /// Returns all events ordered by creation time, most recent first.
    async fn list_events(&self) -> Result<Vec<Event>, StoreError>;

    /// Replaces a stored event with the given record (matched on id).
    async fn replace_event(&self, event: &Event) -> Result<(), StoreError>;

    /// Deletes an event by id. Returns `false` when no record matched.
    async fn delete_event(&self, id: &str) -> Result<bool, StoreError>;

    /// Deletes every event. Returns the number of deleted records.
    async fn delete_all_events(&self) -> Result<u64, StoreError>;

    /// Counts stored events.
    async fn count_events(&self) -> Result<u64, StoreError>;
}

/// Orders events by creation time, most recent first.
///
/// Both backends sort in-process on the deserialized timestamp so ordering
/// is identical regardless of how the backend encodes dates. Ties fall back
/// to the id for a deterministic result.
pub(crate) fn sort_events_newest_first(events: &mut [Event]) {
    events.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
