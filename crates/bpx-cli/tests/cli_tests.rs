/*
[INPUT]:  YAML fixtures and mock HTTP responses
[OUTPUT]: Test results for config loading and command output
[POS]:    Integration tests - CLI commands
[UPDATE]: When adding new subcommands or config options
*/

use std::path::PathBuf;

use bpx_cli::{CliConfig, Command, commands};
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_SECRET: &str = "AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE=";

fn write_temp_config(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("bpx-cli-test-{}.yaml", uuid::Uuid::new_v4()));
    std::fs::write(&path, contents).expect("write temp config");
    path
}

fn config_for(server: &MockServer, signed: bool) -> CliConfig {
    let (api_key, api_secret) = if signed {
        (Some("dGVzdC1rZXk=".to_string()), Some(TEST_SECRET.to_string()))
    } else {
        (None, None)
    };
    CliConfig {
        api_key,
        api_secret,
        http_url: Some(server.uri()),
        ..CliConfig::default()
    }
}

#[test]
fn test_config_from_file() {
    let path = write_temp_config(&format!(
        "api_key: dGVzdC1rZXk=\napi_secret: {TEST_SECRET}\nws_url: ws://127.0.0.1:9001\n"
    ));

    let config = assert_ok!(CliConfig::from_file(path.to_str().expect("utf-8 path")));
    let _ = std::fs::remove_file(&path);

    assert_eq!(config.client_config().ws_url, "ws://127.0.0.1:9001");
    let client = assert_ok!(config.build_client());
    assert_eq!(client.signer().map(|s| s.api_key()), Some("dGVzdC1rZXk="));
}

#[test]
fn test_missing_config_file() {
    assert!(CliConfig::from_file("/nonexistent/bpx-cli.yaml").is_err());
}

#[tokio::test]
async fn test_status_prints_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "Ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(config_for(&server, false).build_client());
    let output = assert_ok!(commands::run(&Command::Status, &client).await);

    assert_eq!(
        output,
        json!({"statusCode": 200, "data": {"status": "Ok", "message": null}, "error": {}})
    );
}

#[tokio::test]
async fn test_open_orders_signed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/orders"))
        .and(query_param("symbol", "SOL_USDC"))
        .and(header_exists("X-Signature"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(config_for(&server, true).build_client());
    let command = Command::OpenOrders {
        symbol: Some("SOL_USDC".to_string()),
    };
    let output = assert_ok!(commands::run(&command, &client).await);

    assert_eq!(output["statusCode"], 200);
    assert_eq!(output["data"], json!([]));
}

#[tokio::test]
async fn test_signed_command_without_credentials() {
    let server = MockServer::start().await;
    let client = assert_ok!(config_for(&server, false).build_client());

    let output = assert_ok!(commands::run(&Command::Balances, &client).await);

    assert_eq!(output["statusCode"], 500);
    assert_eq!(output["data"], json!({}));
    assert_eq!(output["error"]["code"], "INVALID_KEY_MATERIAL");
}
