//! Session state for the client.
//!
//! [`Session`] is the authoritative-for-the-session copy of the event
//! collection plus the signed-in identity. All state changes flow through a
//! small set of transition functions parameterized by an online/offline
//! outcome, so the demo fallback shares the normal-path logic instead of
//! duplicating it:
//!
//! - [`Session::apply_events`] - refresh point for the event collection
//!   (after load and after every mutation)
//! - [`Session::apply_login`] - refresh point for the identity
//!   (after login, demo credentials accepted only in the offline branch)

use crate::demo::{
    demo_events, demo_user, DEMO_ADMIN_CREDENTIALS, DEMO_TOKEN, DEMO_USER_CREDENTIALS,
};
use crate::error::ClientError;
use crate::types::{Event, LoginResponse, Role, User};

/// Whether the session is talking to a live server or running on demo data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connection {
    /// The last round trip reached the server.
    #[default]
    Online,
    /// The server was unreachable; demo data and credentials are active.
    Demo,
}

/// Session-scoped client state.
#[derive(Debug, Default)]
pub struct Session {
    /// The event collection as of the last refresh point.
    pub events: Vec<Event>,

    /// Bearer token of the signed-in user, if any.
    pub token: Option<String>,

    /// The signed-in user, if any.
    pub user: Option<User>,

    /// Connection mode as of the last round trip.
    pub connection: Connection,
}

impl Session {
    /// Creates an empty online session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a session from a persisted token and user.
    #[must_use]
    pub fn with_identity(token: String, user: User) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
            ..Self::default()
        }
    }

    /// Returns `true` when the signed-in user is an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| user.role == Role::Admin)
    }

    /// Installs a fetched event collection, or falls back to the demo set
    /// when the server was unreachable.
    ///
    /// Deliberate rejections (4xx) are propagated unchanged; they mean the
    /// server is alive and the caller should see its answer.
    pub fn apply_events(&mut self, outcome: Result<Vec<Event>, ClientError>) -> Result<(), ClientError> {
        match outcome {
            Ok(events) => {
                self.events = events;
                self.connection = Connection::Online;
                Ok(())
            }
            Err(err) if err.triggers_demo_fallback() => {
                self.events = demo_events();
                self.connection = Connection::Demo;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Installs a login outcome.
    ///
    /// Online success stores the returned token and user. When the server
    /// was unreachable, the demo credentials (and only they) sign in a demo
    /// identity. A reachable server's rejection propagates unchanged.
    ///
    /// Returns the message to show the user.
    pub fn apply_login(
        &mut self,
        outcome: Result<LoginResponse, ClientError>,
        username: &str,
        password: &str,
        admin: bool,
    ) -> Result<String, ClientError> {
        match outcome {
            Ok(response) => {
                self.token = Some(response.token);
                self.user = Some(response.user);
                self.connection = Connection::Online;
                Ok(response.message)
            }
            Err(err) if err.triggers_demo_fallback() => {
                self.connection = Connection::Demo;
                let (expected, role, message) = if admin {
                    (
                        DEMO_ADMIN_CREDENTIALS,
                        Role::Admin,
                        "Admin login successful! (Demo mode)",
                    )
                } else {
                    (
                        DEMO_USER_CREDENTIALS,
                        Role::User,
                        "Login successful! (Demo mode)",
                    )
                };

                if (username, password) == expected {
                    self.token = Some(DEMO_TOKEN.to_string());
                    self.user = Some(demo_user(username, role));
                    Ok(message.to_string())
                } else {
                    let hint = if admin {
                        "Invalid admin credentials (Demo mode: use admin/admin123)"
                    } else {
                        "Invalid credentials (Demo mode: use user/pass)"
                    };
                    Err(ClientError::Rejected {
                        message: hint.to_string(),
                    })
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Drops the signed-in identity, keeping the event collection.
    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
    }

    /// Removes an event from the local collection by id.
    ///
    /// Demo-mode mutations have no server to confirm them; this is the
    /// optimistic local effect. Returns `false` when the id is unknown.
    pub fn remove_event_locally(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|event| event.id != id);
        self.events.len() < before
    }
}
