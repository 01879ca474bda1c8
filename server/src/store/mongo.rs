//! MongoDB-backed store implementation.
//!
//! Users and events live in the `users` and `events` collections of the
//! database named by the connection string (falling back to
//! `ticketsmaster` when the string names none). Records serialize through
//! their serde representations, so the documents carry the same camelCase
//! field names the REST API exposes.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};
use tracing::info;

use crate::store::{sort_events_newest_first, Store, StoreError};
use crate::types::{Event, User};

/// Database name used when the connection string does not name one.
const DEFAULT_DATABASE: &str = "ticketsmaster";

/// Name of the users collection.
const USERS_COLLECTION: &str = "users";

/// Name of the events collection.
const EVENTS_COLLECTION: &str = "events";

/// Store backed by a MongoDB deployment.
#[derive(Clone)]
pub struct MongoStore {
    users: Collection<User>,
    events: Collection<Event>,
}

impl MongoStore {
    /// Connects to the deployment named by `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the connection string cannot be
    /// parsed. Note the driver connects lazily, so an unreachable deployment
    /// surfaces on the first operation, not here.
    pub async fn connect(uri: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

        info!(database = %database.name(), "Connected to document store");
        Ok(Self::with_database(&database))
    }

    /// Creates a store over an already-selected database.
    #[must_use]
    pub fn with_database(database: &Database) -> Self {
        Self {
            users: database.collection(USERS_COLLECTION),
            events: database.collection(EVENTS_COLLECTION),
        }
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        self.users.insert_one(&user).await?;
        Ok(())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.find_one(doc! { "_id": id }).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.find_one(doc! { "username": username }).await?)
    }

    async fn find_user_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, StoreError> {
        let filter = doc! {
            "$or": [
                { "email": email },
                { "username": username },
            ]
        };
        Ok(self.users.find_one(filter).await?)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let cursor = self.users.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete_user(&self, id: &str) -> Result<bool, StoreError> {
        let result = self.users.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count == 1)
    }

    async fn insert_event(&self, event: Event) -> Result<(), StoreError> {
        self.events.insert_one(&event).await?;
        Ok(())
    }

    async fn insert_events(&self, events: &[Event]) -> Result<(), StoreError> {
        if events.is_empty() {
            return Ok(());
        }
        self.events.insert_many(events).await?;
        Ok(())
    }

    async fn find_event(&self, id: &str) -> Result<Option<Event>, StoreError> {
        Ok(self.events.find_one(doc! { "_id": id }).await?)
    }

    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let cursor = self.events.find(doc! {}).await?;
        let mut events: Vec<Event> = cursor.try_collect().await?;
        sort_events_newest_first(&mut events);
        Ok(events)
    }

    async fn replace_event(&self, event: &Event) -> Result<(), StoreError> {
        self.events
            .replace_one(doc! { "_id": &event.id }, event)
            .await?;
        Ok(())
    }

    async fn delete_event(&self, id: &str) -> Result<bool, StoreError> {
        let result = self.events.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count == 1)
    }

    async fn delete_all_events(&self) -> Result<u64, StoreError> {
        let result = self.events.delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }

    async fn count_events(&self) -> Result<u64, StoreError> {
        Ok(self.events.count_documents(doc! {}).await?)
    }
}
