// SPDX-License-Identifier: MIT

//! Application error types.
//!
//! The core platform expects errors as a plain 500 with the error text
//! as the body, so every variant maps to that rather than a structured
//! error code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Transport-level failure talking to Reddit.
    #[error("Request to Reddit failed: {0}")]
    Transport(String),

    /// Final non-200 status from Reddit (after the one-shot refresh retry).
    #[error("Reddit returned status {0}: {1}")]
    Upstream(u16, String),

    /// Malformed JSON from Reddit.
    #[error("Unable to decode Reddit response: {0}")]
    Decode(String),

    /// Missing or invalid request input.
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wrap a reqwest error from a request that never produced a response.
    pub fn transport(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
            }
            other => {
                tracing::warn!(error = %other, "Request failed");
            }
        }

        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
