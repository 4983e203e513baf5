/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for bpx-api-client tests

#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bpx_api_client::{BpxClient, ClientConfig, Credentials, Ed25519Signer};
use wiremock::MockServer;

const TEST_SEED: [u8; 32] = [1u8; 32];

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Deterministic Ed25519 signer for testing
pub fn test_signer() -> Ed25519Signer {
    Ed25519Signer::from_secret_key(&TEST_SEED)
}

/// Credentials matching `test_signer`
pub fn test_credentials() -> Credentials {
    Credentials::new(test_signer().public_key_base64(), STANDARD.encode(TEST_SEED))
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        http_url: server.uri(),
        ..ClientConfig::default()
    }
}

pub fn public_client(server: &MockServer) -> BpxClient {
    BpxClient::with_config(config_for(server)).expect("public client")
}

pub fn signed_client(server: &MockServer) -> BpxClient {
    BpxClient::with_credentials(config_for(server), test_credentials()).expect("signed client")
}

/// Header value of a recorded request, if present and ASCII
pub fn header_value(request: &wiremock::Request, name: &str) -> Option<String> {
    request
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
