/*
[INPUT]:  API credentials and request payloads
[OUTPUT]: Canonical signing messages and Ed25519 signatures
[POS]:    Auth layer - handles Backpack request authentication
[UPDATE]: When the signing scheme or key format changes
*/

pub mod canonical;
pub mod signer;

pub use canonical::{CanonicalMessage, DEFAULT_WINDOW_MS, canonical_value, encode};
pub use signer::Ed25519Signer;
