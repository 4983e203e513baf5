/*
[INPUT]:  API key, Ed25519 signer, instruction name and request payload
[OUTPUT]: Signed auth headers (X-API-Key, X-Signature, X-Timestamp, X-Window)
          and the positional WebSocket subscribe signature
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or header format
*/

use chrono::Utc;
use serde_json::Value;

use crate::auth::{CanonicalMessage, DEFAULT_WINDOW_MS, Ed25519Signer};
use crate::http::Result;

pub const HEADER_API_KEY: &str = "X-API-Key";
pub const HEADER_SIGNATURE: &str = "X-Signature";
pub const HEADER_TIMESTAMP: &str = "X-Timestamp";
pub const HEADER_WINDOW: &str = "X-Window";

/// Instruction signed when subscribing to private WebSocket streams
pub const SUBSCRIBE_INSTRUCTION: &str = "subscribe";

/// The four headers carried by every signed HTTP call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    pub api_key: String,
    pub signature: String,
    pub timestamp: String,
    pub window: String,
}

impl AuthHeaders {
    /// Header name/value pairs in wire order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (HEADER_API_KEY, self.api_key.as_str()),
            (HEADER_SIGNATURE, self.signature.as_str()),
            (HEADER_TIMESTAMP, self.timestamp.as_str()),
            (HEADER_WINDOW, self.window.as_str()),
        ]
        .into_iter()
    }
}

/// Signs request payloads for authenticated endpoints
#[derive(Debug, Clone)]
pub struct RequestSigner {
    api_key: String,
    signer: Ed25519Signer,
    window: u64,
}

impl RequestSigner {
    /// Create a request signer from an API key and base64 API secret.
    ///
    /// Fails with `InvalidKeyMaterial` when the secret does not decode to an Ed25519 seed.
    pub fn new(api_key: impl Into<String>, api_secret: &str) -> Result<Self> {
        let signer = Ed25519Signer::from_base64_secret(api_secret)?;
        Ok(Self::with_signer(api_key, signer))
    }

    /// Create a request signer around an existing Ed25519 signer
    pub fn with_signer(api_key: impl Into<String>, signer: Ed25519Signer) -> Self {
        Self {
            api_key: api_key.into(),
            signer,
            window: DEFAULT_WINDOW_MS,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn signer(&self) -> &Ed25519Signer {
        &self.signer
    }

    /// Sign an HTTP request payload with the current time
    pub fn sign_http_request(&self, instruction: &str, payload: &Value) -> AuthHeaders {
        self.sign_http_request_at(instruction, payload, now_millis())
    }

    /// Sign an HTTP request payload at a fixed timestamp (milliseconds since epoch)
    pub fn sign_http_request_at(
        &self,
        instruction: &str,
        payload: &Value,
        timestamp: i64,
    ) -> AuthHeaders {
        let message = CanonicalMessage::new(instruction, payload, timestamp, self.window).render();
        AuthHeaders {
            api_key: self.api_key.clone(),
            signature: self.signer.sign_base64(message.as_bytes()),
            timestamp: timestamp.to_string(),
            window: self.window.to_string(),
        }
    }

    /// Sign a WebSocket subscription with the current time
    pub fn sign_websocket_subscribe(&self) -> [String; 4] {
        self.sign_websocket_subscribe_at(now_millis())
    }

    /// Sign a WebSocket subscription at a fixed timestamp.
    ///
    /// Returns `[api_key, signature, timestamp, window]`; the order is positional.
    pub fn sign_websocket_subscribe_at(&self, timestamp: i64) -> [String; 4] {
        let message = CanonicalMessage::new(
            SUBSCRIBE_INSTRUCTION,
            &Value::Object(Default::default()),
            timestamp,
            self.window,
        )
        .render();
        [
            self.api_key.clone(),
            self.signer.sign_base64(message.as_bytes()),
            timestamp.to_string(),
            self.window.to_string(),
        ]
    }
}

/// One-shot HTTP signing from raw key strings
pub fn sign_http_request(
    verifying_key: &str,
    signing_key: &str,
    instruction: &str,
    payload: &Value,
) -> Result<AuthHeaders> {
    Ok(RequestSigner::new(verifying_key, signing_key)?.sign_http_request(instruction, payload))
}

/// One-shot WebSocket subscribe signing from raw key strings
pub fn sign_websocket_subscribe(verifying_key: &str, signing_key: &str) -> Result<[String; 4]> {
    Ok(RequestSigner::new(verifying_key, signing_key)?.sign_websocket_subscribe())
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
