/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Backpack API client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;
pub mod ws;

// Re-export commonly used types from auth
pub use auth::{CanonicalMessage, DEFAULT_WINDOW_MS, Ed25519Signer};

// Re-export commonly used types from http
pub use http::{
    ApiError,
    ApiResponse,
    AuthHeaders,
    BpxClient,
    BpxError,
    ClientConfig,
    Credentials,
    HttpMethod,
    RequestSigner,
    Result,
    sign_http_request,
    sign_websocket_subscribe,
};

// Re-export all types
pub use types::*;

// Re-export commonly used types from ws
pub use ws::{BpxWebSocket, StreamMessage, SubscriptionMethod};
