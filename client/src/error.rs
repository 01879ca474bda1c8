//! Error types for the TicketsMaster client.

use thiserror::Error;

/// Errors that can occur when talking to the server.
///
/// Rejections are decoded per status so callers can tell "server reachable
/// but said no" apart from "server unreachable"; only the latter (and 5xx
/// responses) put the session into demo mode.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 400 - the request was rejected (duplicate registration, bad
    /// credentials). The message is the server's own.
    #[error("{message}")]
    Rejected { message: String },

    /// 401 - missing or invalid token.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// 403 - valid token, insufficient role.
    #[error("forbidden: {message}")]
    Forbidden { message: String },

    /// 404 - no record for the requested id.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// Any other error status, including 500.
    #[error("server error: {status} - {message}")]
    Server { status: u16, message: String },

    /// The command needs a signed-in admin session and none is present.
    #[error("not logged in as admin - run `ticketsmaster admin login` first")]
    NoAdminSession,
}

impl ClientError {
    /// Builds the error matching an HTTP error status and server message.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => Self::Rejected { message },
            401 => Self::Unauthorized { message },
            403 => Self::Forbidden { message },
            404 => Self::NotFound { message },
            _ => Self::Server { status, message },
        }
    }

    /// Returns `true` when the failure should flip the session into demo
    /// mode: the server is unreachable or failing, as opposed to having
    /// deliberately rejected the request.
    #[must_use]
    pub fn triggers_demo_fallback(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Server { .. })
    }
}
