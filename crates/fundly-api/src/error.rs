use std::collections::HashMap;

use thiserror::Error;

/// Top-level error type for the `fundly-api` crate.
///
/// Covers every failure mode of a request: transport, server-reported
/// validation (field-keyed payload), server-reported generic failure
/// (message string), and response decoding. `fundly-core` maps these into
/// store state and user-facing messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server ──────────────────────────────────────────────────────
    /// Generic server failure carrying the `message` from the error body
    /// (or the raw body / status text when no structured message exists).
    #[error("Server error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Field-keyed validation failure, e.g. a `400` from `/register` whose
    /// body maps each rejected field to a human-readable reason.
    #[error("Validation failed (HTTP {status})")]
    Validation {
        status: u16,
        errors: HashMap<String, String>,
    },

    /// Session missing or expired (HTTP 401).
    #[error("Not authenticated -- sign-in required")]
    Unauthorized,

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the session is missing or expired and signing in
    /// again might resolve it.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns `true` for server-side field validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// The field-keyed validation map, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&HashMap<String, String>> {
        match self {
            Self::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// The server-provided message, if the server sent a structured one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" response.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }
}
