//! Error types for Workshop API calls.
//!
//! Every failure carries the same `data` / `status` / `message` triple so a
//! caller can render any of them the same way.

use serde_json::Value;
use thiserror::Error;

/// Result type for Workshop API calls.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Fallback shown when the server gave no usable message.
pub const FALLBACK_MESSAGE: &str = "Wystąpił nieoczekiwany błąd.";

/// Shown when no response was received at all.
pub const CONNECTION_ERROR_MESSAGE: &str = "Brak połączenia z serwerem.";

/// Shown when the server answered with a body that is not JSON.
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Nieprawidłowa odpowiedź serwera.";

/// Errors that can occur while talking to the Workshop API.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum ApiError {
    /// The server answered with a status outside `200..300`.
    #[error("{message}")]
    Status {
        status: u16,
        data: Option<Value>,
        message: String,
    },

    /// No response was received (connection refused, DNS failure, ...).
    #[error("{message}")]
    Transport { message: String, detail: String },

    /// A non-empty body failed to parse as JSON.
    #[error("{message}")]
    MalformedBody {
        status: u16,
        message: String,
        detail: String,
    },

    /// The response `data` did not match the expected shape.
    #[error("Decode error: {detail}")]
    Decode { status: u16, detail: String },

    /// The request body could not be serialized.
    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn transport(detail: impl ToString) -> Self {
        ApiError::Transport {
            message: CONNECTION_ERROR_MESSAGE.to_string(),
            detail: detail.to_string(),
        }
    }

    pub fn malformed(status: u16, detail: impl ToString) -> Self {
        ApiError::MalformedBody {
            status,
            message: MALFORMED_RESPONSE_MESSAGE.to_string(),
            detail: detail.to_string(),
        }
    }

    /// HTTP status of the failed call, `0` when nothing was received.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Status { status, .. }
            | ApiError::MalformedBody { status, .. }
            | ApiError::Decode { status, .. } => *status,
            ApiError::Transport { .. } | ApiError::Encode(_) | ApiError::Config(_) => 0,
        }
    }

    /// Parsed error body, if the server sent one.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        match self {
            ApiError::Status { data, .. } => data.as_ref(),
            _ => None,
        }
    }

    /// User-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ApiError::Status { message, .. }
            | ApiError::Transport { message, .. }
            | ApiError::MalformedBody { message, .. } => message,
            ApiError::Decode { .. } => MALFORMED_RESPONSE_MESSAGE,
            ApiError::Encode(_) | ApiError::Config(_) => FALLBACK_MESSAGE,
        }
    }

    /// 401 Unauthorized or 403 Forbidden.
    #[inline]
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        crate::client::is_access_denied_status(self.status())
    }

    #[inline]
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Encode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_error_accessors() {
        let err = ApiError::Status {
            status: 404,
            data: Some(json!({"message": "Nie znaleziono"})),
            message: "Nie znaleziono".to_string(),
        };
        assert_eq!(err.status(), 404);
        assert_eq!(err.message(), "Nie znaleziono");
        assert_eq!(err.data(), Some(&json!({"message": "Nie znaleziono"})));
        assert!(!err.is_access_denied());
        assert_eq!(err.to_string(), "Nie znaleziono");
    }

    #[test]
    fn test_transport_error_has_status_zero() {
        let err = ApiError::transport("connection refused");
        assert_eq!(err.status(), 0);
        assert!(err.data().is_none());
        assert_eq!(err.message(), CONNECTION_ERROR_MESSAGE);
        assert!(err.is_transport());
    }

    #[test]
    fn test_access_denied() {
        for status in [401, 403] {
            let err = ApiError::Status {
                status,
                data: None,
                message: FALLBACK_MESSAGE.to_string(),
            };
            assert!(err.is_access_denied());
        }
        assert!(ApiError::malformed(403, "eof").is_access_denied());
    }
}
