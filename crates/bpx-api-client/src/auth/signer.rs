/*
[INPUT]:  Base64 API secret (seed-bearing) or raw seed bytes, message bytes
[OUTPUT]: Ed25519 detached signatures and base64-encoded verifying keys
[POS]:    Auth layer - cryptographic primitive behind every signed call
[UPDATE]: When changing signing algorithm or key format
*/

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use ed25519_dalek::{SECRET_KEY_LENGTH, Signature, Signer, SigningKey, Verifier};
use rand::rngs::OsRng;

use crate::http::{BpxError, Result};

/// Ed25519 signer for request authentication
#[derive(Debug, Clone)]
pub struct Ed25519Signer {
    signing_key: SigningKey,
}

impl Ed25519Signer {
    /// Generate a new random keypair
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key }
    }

    /// Create signer from existing seed bytes (32 bytes)
    pub fn from_secret_key(bytes: &[u8; SECRET_KEY_LENGTH]) -> Self {
        let signing_key = SigningKey::from_bytes(bytes);
        Self { signing_key }
    }

    /// Create signer from a base64 API secret.
    ///
    /// The decoded blob may be a bare 32-byte seed or a seed followed by the
    /// public key (64-byte keypair export); only the leading 32 bytes are used.
    pub fn from_base64_secret(secret: &str) -> Result<Self> {
        let decoded = BASE64
            .decode(secret.trim())
            .map_err(|err| BpxError::InvalidKeyMaterial(format!("secret is not base64: {err}")))?;

        let seed: [u8; SECRET_KEY_LENGTH] = decoded
            .get(..SECRET_KEY_LENGTH)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| {
                BpxError::InvalidKeyMaterial(format!(
                    "secret decodes to {} bytes, need at least {SECRET_KEY_LENGTH}",
                    decoded.len()
                ))
            })?;

        Ok(Self::from_secret_key(&seed))
    }

    /// Sign a message and return the signature
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }

    /// Sign a message and return the base64 (standard alphabet) signature
    pub fn sign_base64(&self, message: &[u8]) -> String {
        BASE64.encode(self.sign(message).to_bytes())
    }

    /// Get the verifying key in base64 encoding (the exchange's API key format)
    pub fn public_key_base64(&self) -> String {
        BASE64.encode(self.public_key_bytes())
    }

    /// Get the raw public key bytes
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Get the raw seed bytes
    pub fn secret_key_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.signing_key.to_bytes()
    }

    /// Get the seed in base64 encoding (the exchange's API secret format)
    pub fn secret_key_base64(&self) -> String {
        BASE64.encode(self.secret_key_bytes())
    }

    /// Verify a signature against a message
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.signing_key
            .verifying_key()
            .verify(message, signature)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_generation() {
        let signer = Ed25519Signer::generate();
        assert_eq!(signer.public_key_bytes().len(), 32);
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = Ed25519Signer::generate();
        let message = b"instruction=accountQuery&timestamp=1&window=60000";
        let signature = signer.sign(message);
        assert!(signer.verify(message, &signature));
        assert!(!signer.verify(b"instruction=accountQuery&timestamp=2&window=60000", &signature));
    }

    #[test]
    fn test_base64_secret_roundtrip() {
        let signer = Ed25519Signer::generate();
        let restored = Ed25519Signer::from_base64_secret(&signer.secret_key_base64()).unwrap();
        assert_eq!(restored.public_key_base64(), signer.public_key_base64());
    }

    #[test]
    fn test_keypair_blob_uses_leading_seed() {
        let signer = Ed25519Signer::from_secret_key(&[7u8; 32]);
        let mut blob = signer.secret_key_bytes().to_vec();
        blob.extend_from_slice(&signer.public_key_bytes());

        let restored = Ed25519Signer::from_base64_secret(&BASE64.encode(&blob)).unwrap();
        assert_eq!(restored.public_key_bytes(), signer.public_key_bytes());
    }

    #[test]
    fn test_invalid_base64_secret() {
        let err = Ed25519Signer::from_base64_secret("API-SECRET").unwrap_err();
        assert!(matches!(err, BpxError::InvalidKeyMaterial(_)));
    }

    #[test]
    fn test_short_secret() {
        let err = Ed25519Signer::from_base64_secret(&BASE64.encode([1u8; 16])).unwrap_err();
        assert!(matches!(err, BpxError::InvalidKeyMaterial(_)));
    }

    #[test]
    fn test_signature_is_64_bytes() {
        let signer = Ed25519Signer::from_secret_key(&[1u8; 32]);
        let signature = signer.sign_base64(b"instruction=subscribe&timestamp=1&window=60000");
        let decoded = BASE64.decode(&signature).unwrap();
        assert_eq!(decoded.len(), 64);
    }
}
