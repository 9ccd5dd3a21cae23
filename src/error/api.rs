//! Failures of gateway calls.

use thiserror::Error;

use super::ErrorCategory;
use crate::traits::{HttpError, Response};

/// Text shown when the server could not be reached.
pub const UNREACHABLE_MESSAGE: &str =
    "Could not connect to the server. Check your connection.";

/// Any failure of a gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Input refused locally; no request was sent.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} {status_text}")]
    Rejected {
        status: u16,
        status_text: String,
        /// The `detail` field of the error body, if any
        detail: Option<String>,
    },

    /// No response arrived.
    #[error("server unreachable: {message}")]
    Unreachable { message: String },

    /// A success response whose body was not the expected JSON.
    #[error("invalid response: {message}")]
    Decode { message: String },

    /// Any other client-side failure.
    #[error("{message}")]
    Transport { message: String },
}

/// Result type for gateway calls.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn validation(field: &str, message: &str) -> Self {
        ApiError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Build a rejection from a non-2xx response.
    pub fn from_response(response: &Response) -> Self {
        let status_text = reqwest::StatusCode::from_u16(response.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown Status")
            .to_string();
        ApiError::Rejected {
            status: response.status,
            status_text,
            detail: extract_detail(&response.body),
        }
    }

    /// Human-readable message.
    ///
    /// Priority: server `detail`, then `Error {status}: {text}`, then the
    /// unreachable text, then the raw message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation { message, .. } => message.clone(),
            ApiError::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Rejected {
                status,
                status_text,
                ..
            } => format!("Error {}: {}", status, status_text),
            ApiError::Unreachable { .. } => UNREACHABLE_MESSAGE.to_string(),
            ApiError::Decode { message } | ApiError::Transport { message } => message.clone(),
        }
    }

    /// Like [`user_message`](Self::user_message), but a rejection without a
    /// `detail` yields `fallback` instead of the status line.
    pub fn user_message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected { detail: None, .. } => fallback.to_string(),
            _ => self.user_message(),
        }
    }

    /// True when the server was never reached.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Unreachable { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 404, .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Validation { .. } => ErrorCategory::Validation,
            ApiError::Rejected { status, .. } if *status >= 500 => ErrorCategory::Server,
            ApiError::Rejected { .. } => ErrorCategory::Rejected,
            ApiError::Unreachable { .. } => ErrorCategory::Network,
            ApiError::Decode { .. } | ApiError::Transport { .. } => ErrorCategory::Client,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        if err.is_unreachable() {
            ApiError::Unreachable {
                message: err.to_string(),
            }
        } else {
            ApiError::Transport {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode {
            message: err.to_string(),
        }
    }
}

/// Pull `detail` out of a FastAPI-style error body.
///
/// `detail` is either a string or a list of `{loc, msg}` entries; list
/// messages are joined with `; `.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        serde_json::Value::Array(entries) => {
            let messages: Vec<String> = entries
                .iter()
                .filter_map(|entry| match entry {
                    serde_json::Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(|m| m.as_str()).map(str::to_string),
                })
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
