/*
[INPUT]:  HistoryRequest filters and configured credentials
[OUTPUT]: Historical account records as untyped JSON arrays
[POS]:    HTTP layer - signed history queries under /wapi/v1/history
[UPDATE]: When adding new history endpoints
*/

use serde_json::Value;

use crate::http::{ApiResponse, BpxClient, HttpMethod};
use crate::types::HistoryRequest;

impl BpxClient {
    async fn history(&self, path: &str, req: &HistoryRequest) -> ApiResponse<Value> {
        self.execute_with(HttpMethod::Get, path, req).await
    }

    /// GET /wapi/v1/history/borrowLend
    pub async fn get_borrow_history(&self, req: &HistoryRequest) -> ApiResponse<Value> {
        self.history("/wapi/v1/history/borrowLend", req).await
    }

    /// GET /wapi/v1/history/interest
    pub async fn get_interest_history(&self, req: &HistoryRequest) -> ApiResponse<Value> {
        self.history("/wapi/v1/history/interest", req).await
    }

    /// GET /wapi/v1/history/borrowLend/positions
    pub async fn get_borrow_position_history(&self, req: &HistoryRequest) -> ApiResponse<Value> {
        self.history("/wapi/v1/history/borrowLend/positions", req)
            .await
    }

    /// GET /wapi/v1/history/dust
    pub async fn get_dust_history(&self, req: &HistoryRequest) -> ApiResponse<Value> {
        self.history("/wapi/v1/history/dust", req).await
    }

    /// GET /wapi/v1/history/fills
    pub async fn get_fill_history(&self, req: &HistoryRequest) -> ApiResponse<Value> {
        self.history("/wapi/v1/history/fills", req).await
    }

    /// GET /wapi/v1/history/funding
    pub async fn get_funding_history(&self, req: &HistoryRequest) -> ApiResponse<Value> {
        self.history("/wapi/v1/history/funding", req).await
    }

    /// GET /wapi/v1/history/orders
    pub async fn get_order_history(&self, req: &HistoryRequest) -> ApiResponse<Value> {
        self.history("/wapi/v1/history/orders", req).await
    }

    /// GET /wapi/v1/history/pnl
    pub async fn get_pnl_history(&self, req: &HistoryRequest) -> ApiResponse<Value> {
        self.history("/wapi/v1/history/pnl", req).await
    }

    /// GET /wapi/v1/history/rfq
    pub async fn get_rfq_history(&self, req: &HistoryRequest) -> ApiResponse<Value> {
        self.history("/wapi/v1/history/rfq", req).await
    }

    /// GET /wapi/v1/history/quote
    pub async fn get_quote_history(&self, req: &HistoryRequest) -> ApiResponse<Value> {
        self.history("/wapi/v1/history/quote", req).await
    }

    /// GET /wapi/v1/history/settlement
    pub async fn get_settlement_history(&self, req: &HistoryRequest) -> ApiResponse<Value> {
        self.history("/wapi/v1/history/settlement", req).await
    }

    /// GET /wapi/v1/history/strategies
    pub async fn get_strategy_history(&self, req: &HistoryRequest) -> ApiResponse<Value> {
        self.history("/wapi/v1/history/strategies", req).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::auth::Ed25519Signer;
    use crate::http::{BpxClient, ClientConfig, Credentials};
    use crate::types::{HistoryRequest, MarketType};

    #[tokio::test]
    async fn test_fill_history_query_and_signature() {
        let server = MockServer::start().await;
        let signer = Ed25519Signer::generate();
        let client = BpxClient::with_credentials(
            ClientConfig {
                http_url: server.uri(),
                ..ClientConfig::default()
            },
            Credentials::new(signer.public_key_base64(), signer.secret_key_base64()),
        )
        .expect("client init");

        Mock::given(method("GET"))
            .and(path("/wapi/v1/history/fills"))
            .and(query_param("symbol", "SOL_USDC"))
            .and(query_param("marketType", "SPOT,PERP"))
            .and(query_param("limit", "50"))
            .and(header_exists("X-Signature"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let response = client
            .get_fill_history(&HistoryRequest {
                symbol: Some("SOL_USDC".to_string()),
                market_type: Some(vec![MarketType::Spot, MarketType::Perp]),
                limit: Some(50),
                ..Default::default()
            })
            .await;

        assert!(response.is_success());
        assert_eq!(response.data, Some(serde_json::json!([])));
    }
}
