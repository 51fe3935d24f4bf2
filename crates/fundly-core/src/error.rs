// ── Core error types ──
//
// Store commands surface these to the view layer, which decides how to
// render each failure (fixed login message, field map, blocking alert).

use std::collections::HashMap;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying API call failed.
    #[error(transparent)]
    Api(#[from] fundly_api::Error),

    /// Session-marker persistence failed (marker file unreadable etc.).
    #[error("Session storage error: {0}")]
    Session(String),
}

impl Error {
    /// Returns `true` when the session is missing or expired and signing
    /// in again might resolve it.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_unauthorized())
    }

    /// The field-keyed validation map from a server validation failure
    /// (the `/register` contract), if any.
    pub fn validation_errors(&self) -> Option<&HashMap<String, String>> {
        match self {
            Self::Api(e) => e.validation_errors(),
            Self::Session(_) => None,
        }
    }

    /// The server-provided message, if the server sent a structured one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api(e) => e.server_message(),
            Self::Session(_) => None,
        }
    }
}
