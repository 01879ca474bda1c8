//! In-memory store implementation.
//!
//! Backs the integration tests and local runs without a MongoDB deployment.
//! Semantics mirror [`super::MongoStore`]: id-keyed records, uniqueness
//! checks by lookup rather than constraint, list ordering newest first.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::store::{sort_events_newest_first, Store, StoreError};
use crate::types::{Event, Role, User};

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<String, User>,
    events: HashMap<String, Event>,
}

/// Store keeping all records in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites a user's role in place.
    ///
    /// No API operation changes roles; tests use this to exercise the
    /// per-request role re-check on admin routes.
    pub fn set_role(&self, id: &str, role: Role) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        if let Some(user) = inner.users.get_mut(id) {
            user.role = role;
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        Ok(inner.users.get(id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        Ok(inner
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn find_user_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        Ok(inner
            .users
            .values()
            .find(|user| user.email == email || user.username == username)
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        let mut users: Vec<User> = inner.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn delete_user(&self, id: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        Ok(inner.users.remove(id).is_some())
    }

    async fn insert_event(&self, event: Event) -> Result<(), StoreError> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.events.insert(event.id.clone(), event);
        Ok(())
    }

    async fn insert_events(&self, events: &[Event]) -> Result<(), StoreError> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        for event in events {
            inner.events.insert(event.id.clone(), event.clone());
        }
        Ok(())
    }

    async fn find_event(&self, id: &str) -> Result<Option<Event>, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        Ok(inner.events.get(id).cloned())
    }

    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        let mut events: Vec<Event> = inner.events.values().cloned().collect();
        sort_events_newest_first(&mut events);
        Ok(events)
    }

    async fn replace_event(&self, event: &Event) -> Result<(), StoreError> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.events.insert(event.id.clone(), event.clone());
        Ok(())
    }

    async fn delete_event(&self, id: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        Ok(inner.events.remove(id).is_some())
    }

    async fn delete_all_events(&self) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let count = inner.events.len() as u64;
        inner.events.clear();
        Ok(count)
    }

    async fn count_events(&self) -> Result<u64, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        Ok(inner.events.len() as u64)
    }
}
