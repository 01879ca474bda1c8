//! Persisted session storage.
//!
//! The session - token plus signed-in user - is kept as a JSON file under
//! the user's home directory, so separate command invocations share one
//! login the way a browser tab shares local storage.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::types::User;

/// Errors that can occur reading or writing the session file.
#[derive(Error, Debug)]
pub enum SessionFileError {
    #[error("session file I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The persisted part of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSession {
    pub token: String,
    pub user: User,
}

/// Loads the saved session, returning `None` when none exists.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read or parsed.
pub fn load(path: &Path) -> Result<Option<SavedSession>, SessionFileError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Saves the session, creating parent directories as needed.
pub fn save(path: &Path, session: &SavedSession) -> Result<(), SessionFileError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(session)?;
    fs::write(path, contents)?;
    debug!(path = %path.display(), "Session saved");
    Ok(())
}

/// Removes the saved session. Missing files are not an error.
pub fn clear(path: &Path) -> Result<(), SessionFileError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
