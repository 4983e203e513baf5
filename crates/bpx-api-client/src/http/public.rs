/*
[INPUT]:  Symbol identifiers and query parameters
[OUTPUT]: Market data envelopes (assets, markets, tickers, depth, klines, trades, system)
[POS]:    HTTP layer - public endpoints (no signature)
[UPDATE]: When adding new public endpoints or changing response format
*/

use serde_json::Value;

use crate::http::{ApiResponse, BpxClient, HttpMethod};
use crate::types::{
    BorrowLendMarketsHistoryRequest, Depth, FundingIntervalRate, FundingIntervalRatesRequest,
    Kline, KlineRequest, MarkPrice, Market, OpenInterest, StatusAndMessage, Ticker,
    TickerRequest, Trade, TradesRequest,
};

// ### Assets

impl BpxClient {
    /// GET /api/v1/assets
    pub async fn get_assets(&self) -> ApiResponse<Value> {
        self.execute(HttpMethod::Get, "/api/v1/assets", None).await
    }

    /// GET /api/v1/collateral
    pub async fn get_collateral_parameters(&self) -> ApiResponse<Value> {
        self.execute(HttpMethod::Get, "/api/v1/collateral", None).await
    }
}

// ### Borrow lend markets

impl BpxClient {
    /// GET /api/v1/borrowLend/markets
    pub async fn get_borrow_lend_markets(&self) -> ApiResponse<Value> {
        self.execute(HttpMethod::Get, "/api/v1/borrowLend/markets", None)
            .await
    }

    /// GET /api/v1/borrowLend/markets/history?interval={interval}&symbol={symbol}
    pub async fn get_borrow_lend_markets_history(
        &self,
        req: &BorrowLendMarketsHistoryRequest,
    ) -> ApiResponse<Value> {
        self.execute_with(HttpMethod::Get, "/api/v1/borrowLend/markets/history", req)
            .await
    }
}

// ### Markets

impl BpxClient {
    /// GET /api/v1/markets
    pub async fn get_markets(&self) -> ApiResponse<Vec<Market>> {
        self.execute(HttpMethod::Get, "/api/v1/markets", None).await
    }

    /// GET /api/v1/market?symbol={symbol}
    pub async fn get_market(&self, symbol: &str) -> ApiResponse<Market> {
        self.execute_with(HttpMethod::Get, "/api/v1/market", &symbol_query(symbol))
            .await
    }

    /// GET /api/v1/ticker?symbol={symbol}&interval={interval}
    pub async fn get_ticker(&self, req: &TickerRequest) -> ApiResponse<Ticker> {
        self.execute_with(HttpMethod::Get, "/api/v1/ticker", req).await
    }

    /// GET /api/v1/tickers
    pub async fn get_tickers(&self) -> ApiResponse<Vec<Ticker>> {
        self.execute(HttpMethod::Get, "/api/v1/tickers", None).await
    }

    /// GET /api/v1/depth?symbol={symbol}
    pub async fn get_depth(&self, symbol: &str) -> ApiResponse<Depth> {
        self.execute_with(HttpMethod::Get, "/api/v1/depth", &symbol_query(symbol))
            .await
    }

    /// GET /api/v1/klines?symbol={symbol}&interval={interval}&startTime={start}
    pub async fn get_klines(&self, req: &KlineRequest) -> ApiResponse<Vec<Kline>> {
        self.execute_with(HttpMethod::Get, "/api/v1/klines", req).await
    }

    /// GET /api/v1/markPrices?symbol={symbol}
    pub async fn get_mark_prices(&self, symbol: Option<&str>) -> ApiResponse<Vec<MarkPrice>> {
        match symbol {
            Some(symbol) => {
                self.execute_with(HttpMethod::Get, "/api/v1/markPrices", &symbol_query(symbol))
                    .await
            }
            None => self.execute(HttpMethod::Get, "/api/v1/markPrices", None).await,
        }
    }

    /// GET /api/v1/openInterest?symbol={symbol}
    pub async fn get_open_interest(&self, symbol: Option<&str>) -> ApiResponse<Vec<OpenInterest>> {
        match symbol {
            Some(symbol) => {
                self.execute_with(HttpMethod::Get, "/api/v1/openInterest", &symbol_query(symbol))
                    .await
            }
            None => self.execute(HttpMethod::Get, "/api/v1/openInterest", None).await,
        }
    }

    /// GET /api/v1/fundingRates?symbol={symbol}&limit={limit}&offset={offset}
    pub async fn get_funding_interval_rates(
        &self,
        req: &FundingIntervalRatesRequest,
    ) -> ApiResponse<Vec<FundingIntervalRate>> {
        self.execute_with(HttpMethod::Get, "/api/v1/fundingRates", req)
            .await
    }
}

// ### System

impl BpxClient {
    /// GET /api/v1/status
    pub async fn status(&self) -> ApiResponse<StatusAndMessage> {
        self.execute(HttpMethod::Get, "/api/v1/status", None).await
    }

    /// GET /api/v1/ping; the body is plain text (`pong`)
    pub async fn ping(&self) -> ApiResponse<String> {
        self.execute(HttpMethod::Get, "/api/v1/ping", None).await
    }

    /// GET /api/v1/time; the body is the server time in milliseconds, as text
    pub async fn get_system_time(&self) -> ApiResponse<String> {
        self.execute(HttpMethod::Get, "/api/v1/time", None).await
    }
}

// ### Trades

impl BpxClient {
    /// GET /api/v1/trades?symbol={symbol}&limit={limit}
    pub async fn get_recent_trades(&self, req: &TradesRequest) -> ApiResponse<Vec<Trade>> {
        self.execute_with(HttpMethod::Get, "/api/v1/trades", req).await
    }

    /// GET /api/v1/trades/history?symbol={symbol}&limit={limit}&offset={offset}
    pub async fn get_historical_trades(&self, req: &TradesRequest) -> ApiResponse<Vec<Trade>> {
        self.execute_with(HttpMethod::Get, "/api/v1/trades/history", req)
            .await
    }
}

fn symbol_query(symbol: &str) -> Value {
    serde_json::json!({ "symbol": symbol })
}
