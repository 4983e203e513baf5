/*
[INPUT]:  Account, capital and borrow-lend requests; configured credentials
[OUTPUT]: Account settings, balances, limits, transfers and positions
[POS]:    HTTP layer - signed account endpoints
[UPDATE]: When adding new account endpoints or changing query parameters
*/

// ### Account Endpoints

use std::collections::HashMap;

use serde_json::{Value, json};

use crate::http::{ApiResponse, BpxClient, HttpMethod};
use crate::types::{
    Balance, BorrowLendExecuteRequest, DepositAddress, MaxOrderQuantityRequest,
    MaxWithdrawalQuantityRequest, TransfersRequest, UpdateAccountRequest, WithdrawalRequest,
};

impl BpxClient {
    /// GET /api/v1/account
    pub async fn get_account(&self) -> ApiResponse<Value> {
        self.execute(HttpMethod::Get, "/api/v1/account", None).await
    }

    /// PATCH /api/v1/account
    pub async fn update_account(&self, req: &UpdateAccountRequest) -> ApiResponse<Value> {
        self.execute_with(HttpMethod::Patch, "/api/v1/account", req)
            .await
    }

    /// POST /api/v1/account/convertDust
    ///
    /// Converts the dust balance of `symbol` (or of every asset when `None`) to USDC.
    pub async fn convert_dust_balance(&self, symbol: Option<&str>) -> ApiResponse<Value> {
        let payload = symbol.map(|symbol| json!({ "symbol": symbol }));
        self.execute(HttpMethod::Post, "/api/v1/account/convertDust", payload)
            .await
    }

    /// GET /api/v1/account/limits/borrow?symbol={symbol}
    pub async fn get_max_borrow_quantity(&self, symbol: &str) -> ApiResponse<Value> {
        self.execute(
            HttpMethod::Get,
            "/api/v1/account/limits/borrow",
            Some(json!({ "symbol": symbol })),
        )
        .await
    }

    /// GET /api/v1/account/limits/order
    pub async fn get_max_order_quantity(&self, req: &MaxOrderQuantityRequest) -> ApiResponse<Value> {
        self.execute_with(HttpMethod::Get, "/api/v1/account/limits/order", req)
            .await
    }

    /// GET /api/v1/account/limits/withdrawal
    pub async fn get_max_withdrawal_quantity(
        &self,
        req: &MaxWithdrawalQuantityRequest,
    ) -> ApiResponse<Value> {
        self.execute_with(HttpMethod::Get, "/api/v1/account/limits/withdrawal", req)
            .await
    }
}

// ### Borrow Lend

impl BpxClient {
    /// GET /api/v1/borrowLend/positions
    pub async fn get_borrow_lend_positions(&self) -> ApiResponse<Value> {
        self.execute(HttpMethod::Get, "/api/v1/borrowLend/positions", None)
            .await
    }

    /// POST /api/v1/borrowLend
    pub async fn execute_borrow_lend(&self, req: &BorrowLendExecuteRequest) -> ApiResponse<Value> {
        self.execute_with(HttpMethod::Post, "/api/v1/borrowLend", req)
            .await
    }
}

// ### Capital

impl BpxClient {
    /// GET /api/v1/capital
    ///
    /// Balances keyed by asset symbol.
    pub async fn get_balances(&self) -> ApiResponse<HashMap<String, Balance>> {
        self.execute(HttpMethod::Get, "/api/v1/capital", None).await
    }

    /// GET /api/v1/capital/collateral
    pub async fn get_collateral(&self) -> ApiResponse<Value> {
        self.execute(HttpMethod::Get, "/api/v1/capital/collateral", None)
            .await
    }

    /// GET /wapi/v1/capital/deposits?from={from}&to={to}&limit={limit}&offset={offset}
    pub async fn get_deposits(&self, req: &TransfersRequest) -> ApiResponse<Value> {
        self.execute_with(HttpMethod::Get, "/wapi/v1/capital/deposits", req)
            .await
    }

    /// GET /wapi/v1/capital/deposit/address?blockchain={blockchain}
    pub async fn get_deposit_address(&self, blockchain: &str) -> ApiResponse<DepositAddress> {
        self.execute(
            HttpMethod::Get,
            "/wapi/v1/capital/deposit/address",
            Some(json!({ "blockchain": blockchain })),
        )
        .await
    }

    /// GET /wapi/v1/capital/withdrawals?from={from}&to={to}&limit={limit}&offset={offset}
    pub async fn get_withdrawals(&self, req: &TransfersRequest) -> ApiResponse<Value> {
        self.execute_with(HttpMethod::Get, "/wapi/v1/capital/withdrawals", req)
            .await
    }

    /// POST /wapi/v1/capital/withdrawals
    pub async fn request_withdrawal(&self, req: &WithdrawalRequest) -> ApiResponse<Value> {
        self.execute_with(HttpMethod::Post, "/wapi/v1/capital/withdrawals", req)
            .await
    }
}

// ### Futures

impl BpxClient {
    /// GET /api/v1/position
    pub async fn get_open_positions(&self) -> ApiResponse<Value> {
        self.execute(HttpMethod::Get, "/api/v1/position", None).await
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::{BpxClient, ClientConfig, Credentials};
    use crate::types::{BorrowLendExecuteRequest, BorrowLendSide, UpdateAccountRequest};

    fn signed_client(server: &MockServer) -> BpxClient {
        let secret = STANDARD.encode([7u8; 32]);
        let signer = crate::auth::Ed25519Signer::from_secret_key(&[7u8; 32]);
        BpxClient::with_credentials(
            ClientConfig {
                http_url: server.uri(),
                ..ClientConfig::default()
            },
            Credentials::new(signer.public_key_base64(), secret),
        )
        .expect("client init")
    }

    #[tokio::test]
    async fn test_get_balances_signed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/capital"))
            .and(header_exists("X-API-Key"))
            .and(header_exists("X-Signature"))
            .and(header_exists("X-Timestamp"))
            .and(header("X-Window", "60000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "SOL": {"available": "1.5", "locked": "0", "staked": "0"},
                "USDC": {"available": "100", "locked": "25.5", "staked": "0"},
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = signed_client(&server).get_balances().await;

        assert!(response.is_success());
        let balances = response.data.expect("balances");
        assert_eq!(balances.len(), 2);
        assert_eq!(balances["USDC"].locked, "25.5".parse().expect("decimal"));
    }

    #[tokio::test]
    async fn test_update_account_patch_body() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/api/v1/account"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({"autoLend": true, "leverageLimit": "5"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let response = signed_client(&server)
            .update_account(&UpdateAccountRequest {
                auto_lend: Some(true),
                leverage_limit: Some("5".parse().expect("decimal")),
                ..Default::default()
            })
            .await;

        assert_eq!(response.status_code, 200);
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_deposit_address_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wapi/v1/capital/deposit/address"))
            .and(query_param("blockchain", "Solana"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"address": "So1ana"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = signed_client(&server).get_deposit_address("Solana").await;
        assert_eq!(response.data.map(|d| d.address), Some("So1ana".to_string()));
    }

    #[tokio::test]
    async fn test_borrow_lend_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/borrowLend"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "code": "INSUFFICIENT_MARGIN",
                "message": "Insufficient margin",
            })))
            .mount(&server)
            .await;

        let response = signed_client(&server)
            .execute_borrow_lend(&BorrowLendExecuteRequest {
                quantity: "10".parse().expect("decimal"),
                side: BorrowLendSide::Borrow,
                symbol: "USDC".to_string(),
            })
            .await;

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.error.map(|e| e.code),
            Some("INSUFFICIENT_MARGIN".to_string())
        );
    }
}
