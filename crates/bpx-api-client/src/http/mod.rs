/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: ApiResponse envelopes for every REST resource group
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod account;
pub mod client;
pub mod error;
pub mod history;
pub mod instruction;
pub mod public;
pub mod response;
pub mod signature;
pub mod trade;

pub use error::{BpxError, Result};
pub use instruction::HttpMethod;
pub use response::{ApiError, ApiResponse};
pub use signature::{AuthHeaders, RequestSigner, sign_http_request, sign_websocket_subscribe};

pub use client::{BpxClient, ClientConfig, Credentials, DEFAULT_HTTP_URL, DEFAULT_WS_URL};
