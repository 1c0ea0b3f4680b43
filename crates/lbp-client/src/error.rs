//! Client error types

use thiserror::Error;

/// Errors raised by the HTTP collaborators
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, malformed response)
    #[error("http transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("service returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// The success body did not parse as the expected shape
    #[error("response decode failure: {0}")]
    Decode(#[from] serde_json::Error),

    /// The submission was superseded by a later one before completing
    #[error("submission superseded by a later one")]
    Superseded,
}

/// Result type alias for client operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;
