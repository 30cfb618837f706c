//! Error types for session operations.

use qb_auth::SigningError;

/// Errors produced by an [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server returned a non-2xx response.
    #[error("server error ({status_code}): {message}")]
    ServerError {
        /// HTTP status code.
        status_code: u16,
        /// Response body from the server.
        message: String,
    },
}

/// Errors that can occur while creating or syncing a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The client was constructed with unusable settings.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The auth message could not be signed.
    #[error("signing error: {0}")]
    Signing(#[from] SigningError),

    /// The request never produced a successful response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered, but not with a usable session.
    #[error("unexpected session response: {0}")]
    Protocol(String),
}
