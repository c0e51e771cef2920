//! Client error types.

use thiserror::Error;

/// Error type for API calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable HTTP response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server refused the request; `message` is the server's own
    /// phrasing, surfaced to the user verbatim.
    #[error("server rejected the request ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the documented shape.
    #[error("unexpected response from server: {0}")]
    UnexpectedResponse(String),
}

/// Result type for API calls.
pub type Result<T> = std::result::Result<T, ClientError>;
