/*
[INPUT]:  Error sources (key material, HTTP, serialization, URL, WebSocket, config)
[OUTPUT]: Structured error type for everything outside the response envelope
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the Backpack client.
///
/// REST calls never return this type; their failures are folded into
/// [`ApiResponse`](crate::http::ApiResponse). It surfaces from construction,
/// signing and the WebSocket stream.
#[derive(Error, Debug)]
pub enum BpxError {
    /// API secret cannot be decoded into an Ed25519 seed
    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// Operation needs credentials but the client has none
    #[error("Credentials required for {0}")]
    MissingCredentials(String),

    /// HTTP client could not be built or a request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// WebSocket error
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BpxError {
    /// Error code used when this error is reported through a response envelope
    pub fn code(&self) -> &'static str {
        match self {
            BpxError::InvalidKeyMaterial(_) | BpxError::MissingCredentials(_) => {
                "INVALID_KEY_MATERIAL"
            }
            _ => "UNKNOWN_ERROR",
        }
    }

    /// Check if error indicates a credential problem
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            BpxError::InvalidKeyMaterial(_) | BpxError::MissingCredentials(_)
        )
    }
}

/// Result type alias for Backpack client operations
pub type Result<T> = std::result::Result<T, BpxError>;
