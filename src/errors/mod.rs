//! Error handling module for the StackIt client.
//!
//! Centralized error types: what the transport can produce and what the
//! store raises locally before any network call.

use reqwest::StatusCode;
use thiserror::Error;

/// Failures from the remote API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure, or a success body that would not decode.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response carrying a single server-provided message.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// Unprocessable input with per-field messages, concatenated into one line.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl ApiError {
    /// HTTP status of the response, where one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Transport(e) => e.status(),
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Validation(_) => Some(StatusCode::UNPROCESSABLE_ENTITY),
        }
    }
}

/// Failures surfaced by store actions.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Domain precondition raised locally, before any network call.
    #[error("you must be signed in to {0}")]
    AuthRequired(&'static str),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl StoreError {
    /// Whether this failure was the local signed-out precondition.
    pub fn is_auth_required(&self) -> bool {
        matches!(self, StoreError::AuthRequired(_))
    }
}
