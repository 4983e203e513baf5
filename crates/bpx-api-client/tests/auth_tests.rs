/*
[INPUT]:  Recorded signed requests from a mock server
[OUTPUT]: Test results for end-to-end request signing
[POS]:    Integration tests - authentication
[UPDATE]: When the signing scheme or auth headers change
*/

mod common;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bpx_api_client::auth::encode;
use bpx_api_client::{
    BorrowLendSide, HistoryRequest, OrderExecuteRequest, RequestSigner, Side,
    sign_websocket_subscribe,
};
use common::{header_value, setup_mock_server, signed_client, test_credentials, test_signer};
use ed25519_dalek::Signature;
use serde_json::{Value, json};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn decode_signature(encoded: &str) -> Signature {
    let bytes = assert_ok!(STANDARD.decode(encoded));
    let bytes: [u8; 64] = assert_ok!(bytes.try_into().map_err(|_| "signature is not 64 bytes"));
    Signature::from_bytes(&bytes)
}

/// Rebuild the signed message from a recorded request and check it against X-Signature
fn assert_request_verifies(request: &wiremock::Request, instruction: &str, payload: &Value) {
    let timestamp: i64 = assert_ok!(header_value(request, "X-Timestamp").expect("timestamp").parse());
    let window: u64 = assert_ok!(header_value(request, "X-Window").expect("window").parse());
    let signature = decode_signature(&header_value(request, "X-Signature").expect("signature"));

    let message = encode(instruction, payload, timestamp, window);
    assert!(
        test_signer().verify(message.as_bytes(), &signature),
        "signature does not cover {message}"
    );
}

#[tokio::test]
async fn test_signed_get_verifies_against_query() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/wapi/v1/history/borrowLend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let request = HistoryRequest {
        side: Some(BorrowLendSide::Lend),
        symbol: Some("USDC".to_string()),
        limit: Some(20),
        ..Default::default()
    };
    let response = signed_client(&server).get_borrow_history(&request).await;
    assert!(response.is_success());

    let requests = assert_ok!(server.received_requests().await.ok_or("recording disabled"));
    let payload = assert_ok!(serde_json::to_value(&request));
    assert_request_verifies(&requests[0], "borrowHistoryQueryAll", &payload);
}

#[tokio::test]
async fn test_signed_post_verifies_against_body() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let mut order = OrderExecuteRequest::limit(
        "SOL_USDC",
        Side::Bid,
        "95".parse().expect("price"),
        "0.07".parse().expect("quantity"),
    );
    order.client_id = Some(42);
    let _ = signed_client(&server).execute_order(&order).await;

    let requests = assert_ok!(server.received_requests().await.ok_or("recording disabled"));
    let body: Value = assert_ok!(serde_json::from_slice(&requests[0].body));
    assert_request_verifies(&requests[0], "orderExecute", &body);

    let timestamp = header_value(&requests[0], "X-Timestamp").expect("timestamp");
    let expected = format!(
        "instruction=orderExecute&clientId=42&orderType=Limit&price=95&quantity=0.07&side=Bid&\
         symbol=SOL_USDC&timestamp={timestamp}&window=60000"
    );
    assert_eq!(encode("orderExecute", &body, assert_ok!(timestamp.parse()), 60_000), expected);
}

#[tokio::test]
async fn test_batch_signature_repeats_instruction() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let orders = vec![
        OrderExecuteRequest::market("SOL_USDC", Side::Bid, "1".parse().expect("qty")),
        OrderExecuteRequest::market("BTC_USDC", Side::Ask, "0.01".parse().expect("qty")),
    ];
    let _ = signed_client(&server).execute_orders(&orders).await;

    let requests = assert_ok!(server.received_requests().await.ok_or("recording disabled"));
    let body: Value = assert_ok!(serde_json::from_slice(&requests[0].body));
    assert_request_verifies(&requests[0], "orderExecute", &body);

    let timestamp: i64 = assert_ok!(header_value(&requests[0], "X-Timestamp").expect("timestamp").parse());
    let message = encode("orderExecute", &body, timestamp, 60_000);
    assert_eq!(message.matches("instruction=orderExecute").count(), 2);
    assert!(message.starts_with("instruction=orderExecute&orderType=Market&quantity=1&side=Bid"));
}

#[tokio::test]
async fn test_concurrent_signed_calls_each_verify() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/wapi/v1/history/fills"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wapi/v1/history/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_client(&server);
    let sol_fills = HistoryRequest {
        symbol: Some("SOL_USDC".to_string()),
        limit: Some(10),
        ..Default::default()
    };
    let eth_fills = HistoryRequest {
        symbol: Some("ETH_USDC".to_string()),
        offset: Some(5),
        ..Default::default()
    };
    let btc_orders = HistoryRequest {
        symbol: Some("BTC_USDC".to_string()),
        limit: Some(3),
        ..Default::default()
    };

    let (first, second, third) = tokio::join!(
        client.get_fill_history(&sol_fills),
        client.get_fill_history(&eth_fills),
        client.get_order_history(&btc_orders),
    );
    assert!(first.is_success() && second.is_success() && third.is_success());

    let requests = assert_ok!(server.received_requests().await.ok_or("recording disabled"));
    assert_eq!(requests.len(), 3);

    // Arrival order is arbitrary; pair each request with its payload by route and symbol.
    for request in &requests {
        let symbol = request
            .url
            .query_pairs()
            .find(|(key, _)| key == "symbol")
            .map(|(_, value)| value.into_owned())
            .expect("symbol in query");
        let (instruction, payload) = match (request.url.path(), symbol.as_str()) {
            ("/wapi/v1/history/fills", "SOL_USDC") => ("fillHistoryQueryAll", &sol_fills),
            ("/wapi/v1/history/fills", "ETH_USDC") => ("fillHistoryQueryAll", &eth_fills),
            ("/wapi/v1/history/orders", "BTC_USDC") => ("orderHistoryQueryAll", &btc_orders),
            other => panic!("unexpected request {other:?}"),
        };
        let payload = assert_ok!(serde_json::to_value(payload));
        assert_request_verifies(request, instruction, &payload);
    }
}

#[test]
fn test_websocket_subscribe_signature() {
    let credentials = test_credentials();
    let [api_key, signature, timestamp, window] =
        assert_ok!(sign_websocket_subscribe(&credentials.api_key, &credentials.api_secret));

    assert_eq!(api_key, credentials.api_key);
    assert_eq!(window, "60000");

    let message = format!("instruction=subscribe&timestamp={timestamp}&window={window}");
    assert!(test_signer().verify(message.as_bytes(), &decode_signature(&signature)));
}

#[test]
fn test_request_signer_rejects_bad_secret() {
    let err = RequestSigner::new("key", "not base64!").unwrap_err();
    assert!(err.is_auth_error());
}
