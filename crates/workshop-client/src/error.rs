use thiserror::Error;
use workshop_http::ApiError;

/// Durable session storage failed.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from logging in.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Could not persist session: {0}")]
    Storage(#[from] StorageError),

    /// The server accepted the credentials but sent no usable token.
    #[error("Login response carried no token")]
    InvalidSession,
}

impl AuthError {
    /// Message suitable for a form error.
    pub fn message(&self) -> &str {
        match self {
            AuthError::Api(e) => e.message(),
            AuthError::Storage(_) => "Nie udało się zapisać sesji.",
            AuthError::InvalidSession => "Serwer nie zwrócił tokenu.",
        }
    }

    pub fn api(&self) -> Option<&ApiError> {
        match self {
            AuthError::Api(e) => Some(e),
            _ => None,
        }
    }
}
