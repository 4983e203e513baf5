/*
[INPUT]:  Order and RFQ requests; configured credentials
[OUTPUT]: Order and quote envelopes
[POS]:    HTTP layer - trading endpoints (signed)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use serde_json::Value;

use crate::http::{ApiResponse, BpxClient, HttpMethod};
use crate::types::{
    AcceptQuoteRequest, CancelRfqRequest, OpenOrdersRequest, Order, OrderCancelAllRequest,
    OrderExecuteRequest, OrderQueryRequest, RefreshRfqRequest, RfqResponse, SubmitQuoteRequest,
    SubmitQuoteResponse, SubmitRfqRequest,
};

// ### Orders

impl BpxClient {
    /// Submit a single order
    ///
    /// POST /api/v1/order
    pub async fn execute_order(&self, req: &OrderExecuteRequest) -> ApiResponse<Order> {
        self.execute_with(HttpMethod::Post, "/api/v1/order", req).await
    }

    /// Submit several orders in one request
    ///
    /// POST /api/v1/orders
    /// Each element is signed as its own `orderExecute` instruction. Per-order results
    /// may mix accepted orders and rejections, so they are returned untyped.
    pub async fn execute_orders(&self, orders: &[OrderExecuteRequest]) -> ApiResponse<Vec<Value>> {
        self.execute_with(HttpMethod::Post, "/api/v1/orders", orders)
            .await
    }

    /// GET /api/v1/order?symbol={symbol}&orderId={id}&clientId={client_id}
    pub async fn get_open_order(&self, req: &OrderQueryRequest) -> ApiResponse<Order> {
        self.execute_with(HttpMethod::Get, "/api/v1/order", req).await
    }

    /// DELETE /api/v1/order
    pub async fn cancel_open_order(&self, req: &OrderQueryRequest) -> ApiResponse<Order> {
        self.execute_with(HttpMethod::Delete, "/api/v1/order", req)
            .await
    }

    /// GET /api/v1/orders?symbol={symbol}&marketType={market_type}
    pub async fn get_open_orders(&self, req: &OpenOrdersRequest) -> ApiResponse<Vec<Order>> {
        self.execute_with(HttpMethod::Get, "/api/v1/orders", req).await
    }

    /// DELETE /api/v1/orders
    pub async fn cancel_open_orders(&self, req: &OrderCancelAllRequest) -> ApiResponse<Vec<Value>> {
        self.execute_with(HttpMethod::Delete, "/api/v1/orders", req)
            .await
    }
}

// ### Request For Quote

impl BpxClient {
    /// POST /api/v1/rfq
    pub async fn submit_request_for_quote(&self, req: &SubmitRfqRequest) -> ApiResponse<RfqResponse> {
        self.execute_with(HttpMethod::Post, "/api/v1/rfq", req).await
    }

    /// POST /api/v1/rfq/accept
    pub async fn accept_quote(&self, req: &AcceptQuoteRequest) -> ApiResponse<RfqResponse> {
        self.execute_with(HttpMethod::Post, "/api/v1/rfq/accept", req)
            .await
    }

    /// POST /api/v1/rfq/refresh
    pub async fn refresh_quote(&self, req: &RefreshRfqRequest) -> ApiResponse<RfqResponse> {
        self.execute_with(HttpMethod::Post, "/api/v1/rfq/refresh", req)
            .await
    }

    /// POST /api/v1/rfq/cancel
    pub async fn cancel_request_for_quote(&self, req: &CancelRfqRequest) -> ApiResponse<RfqResponse> {
        self.execute_with(HttpMethod::Post, "/api/v1/rfq/cancel", req)
            .await
    }

    /// POST /api/v1/rfq/quote
    pub async fn submit_quote(&self, req: &SubmitQuoteRequest) -> ApiResponse<SubmitQuoteResponse> {
        self.execute_with(HttpMethod::Post, "/api/v1/rfq/quote", req)
            .await
    }
}
