//! API error contract.
//!
//! Every failure the client surfaces collapses to one human string via
//! [`ApiError::user_message`]; that string is what error sinks display.

use serde_json::Value;
use thiserror::Error;

use crate::http::HttpResponse;
use crate::session::TokenStoreError;

/// Detail the backend sends when a bearer token is no longer accepted.
pub const EXPIRED_TOKEN_DETAIL: &str = "Invalid or expired token.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error occurred";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Non-success status with a normalized message.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The bearer token was rejected; the session has been cleared.
    #[error("Session expired. Please log in again.")]
    SessionExpired,

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// A success body that could not be decoded into the expected type.
    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("failed to encode request body: {0}")]
    Encode(String),

    #[error(transparent)]
    Store(#[from] TokenStoreError),
}

impl ApiError {
    /// The string shown to the user.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Status { message, .. } => message,
            Self::SessionExpired => SESSION_EXPIRED_MESSAGE,
            Self::Network(_) => NETWORK_ERROR_MESSAGE,
            Self::Decode(_) | Self::Encode(_) | Self::Store(_) => UNEXPECTED_ERROR_MESSAGE,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::SessionExpired => Some(401),
            _ => None,
        }
    }
}

/// Error body as the backend sent it, or the stand-in for non-JSON bodies.
pub(crate) fn error_body(response: &HttpResponse) -> Value {
    let parsed = if response.is_json() {
        serde_json::from_str::<Value>(&response.body).ok()
    } else {
        None
    };
    parsed.unwrap_or_else(|| serde_json::json!({ "detail": UNKNOWN_ERROR_MESSAGE }))
}

/// Flatten a `detail` field into one message.
///
/// Validation errors arrive as `[{"msg": ...}, ...]` and are joined with ", ".
pub fn detail_message(body: &Value) -> String {
    match body.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
        Some(Value::Array(items)) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if parts.is_empty() {
                REQUEST_FAILED_MESSAGE.to_string()
            } else {
                parts.join(", ")
            }
        }
        _ => REQUEST_FAILED_MESSAGE.to_string(),
    }
}

pub(crate) fn is_expired_token(status: u16, body: &Value) -> bool {
    status == 401 && body.get("detail").and_then(Value::as_str) == Some(EXPIRED_TOKEN_DETAIL)
}
