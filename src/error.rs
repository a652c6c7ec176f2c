//! Error types for the API client
//!
//! Provides unified error handling using thiserror. Every failure of a
//! remote call is translated into one [`ApiError`]; the cache itself never
//! fails.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

// == Api Error Enum ==
/// Unified error type for calls to the inventory API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure: connection refused, timeout, TLS
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Session missing or not allowed to access the resource
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// Any other non-success status
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local file could not be read for upload
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid base URL or endpoint
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    // == From Status ==
    /// Builds the error for a non-success response.
    ///
    /// The message is taken from an `{"error": ..}` or `{"detail": ..}` body
    /// when the server sends one, falling back to the raw body or the
    /// status reason.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = ErrorBody::message(body)
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized {
                status: status.as_u16(),
                message,
            },
            _ => ApiError::Status {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status, .. } | ApiError::Status { status, .. } => {
                Some(*status)
            }
            ApiError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Error payloads the backend is known to send.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    detail: Option<String>,
}

impl ErrorBody {
    fn message(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        parsed.error.or(parsed.detail)
    }
}

// == Result Type Alias ==
/// Convenience Result type for API calls.
pub type Result<T> = std::result::Result<T, ApiError>;
