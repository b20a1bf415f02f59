//! Client error types

use http::StatusCode;
use serde_json::Value;
use shared::{AppError, ErrorCode};
use std::sync::Arc;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    ///
    /// `body` is the raw JSON payload, passed through unmodified.
    #[error("API error ({status}): {message}")]
    Api {
        status: StatusCode,
        message: String,
        body: Option<Value>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rejected client-side, no request was sent
    #[error("Validation error: {0}")]
    Validation(#[from] AppError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A unit-by-unit removal stopped partway; confirmed units stay removed
    #[error("Removed {removed} of {requested} units before failing: {source}")]
    PartialRemoval {
        removed: u32,
        requested: u32,
        #[source]
        source: Box<ClientError>,
    },

    /// Failure of a load shared by several cache waiters
    #[error(transparent)]
    Shared(Arc<ClientError>),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Build an API error from a status and an optional JSON body
    ///
    /// The message is the body's `message` field when present, otherwise a
    /// generic fallback naming the status code.
    pub fn from_response(status: StatusCode, body: Option<Value>) -> Self {
        let message = body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
        Self::Api {
            status,
            message,
            body,
        }
    }

    /// Unwrap a shared error back into an owned one when this was the last handle
    pub fn from_shared(err: Arc<ClientError>) -> Self {
        match Arc::try_unwrap(err) {
            Ok(err) => err,
            Err(shared) => Self::Shared(shared),
        }
    }

    /// HTTP status of the server rejection, if this was one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            Self::PartialRemoval { source, .. } => source.status(),
            Self::Shared(inner) => inner.status(),
            _ => None,
        }
    }

    /// Message the server sent with its rejection
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            Self::PartialRemoval { source, .. } => source.server_message(),
            Self::Shared(inner) => inner.server_message(),
            _ => None,
        }
    }

    /// Closest [`ErrorCode`] for this failure
    ///
    /// Local rejections keep their own code; server rejections are classified
    /// by status since the backend sends no codes.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(app) => app.code,
            Self::Api { status, .. } => ErrorCode::from_http_status(*status),
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidFormat,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::PartialRemoval { .. } => ErrorCode::OrderPartialRemoval,
            Self::Shared(inner) => inner.code(),
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Whether the request never left the client
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::Shared(inner) => inner.is_validation(),
            _ => false,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
