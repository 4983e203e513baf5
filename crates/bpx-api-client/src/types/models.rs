/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed market-data models (markets, tickers, depth, klines, trades)
[POS]:    Data layer - public endpoint response types
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{MarketType, OrderBookState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub symbol: String,
    pub base_symbol: String,
    pub quote_symbol: String,
    pub market_type: MarketType,
    /// Price and quantity filters, kept opaque
    pub filters: Value,
    #[serde(default)]
    pub imf_function: Option<Value>,
    #[serde(default)]
    pub mmf_function: Option<Value>,
    #[serde(default)]
    pub funding_interval: Option<u64>,
    #[serde(default)]
    pub funding_rate_upper_bound: Option<Decimal>,
    #[serde(default)]
    pub funding_rate_lower_bound: Option<Decimal>,
    #[serde(default)]
    pub open_interest_limit: Option<Decimal>,
    pub order_book_state: OrderBookState,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    pub symbol: String,
    pub first_price: Decimal,
    pub last_price: Decimal,
    pub price_change: Decimal,
    pub price_change_percent: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub volume: Decimal,
    pub quote_volume: Decimal,
    pub trades: String,
}

/// Price level: (price, quantity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthLevel(pub Decimal, pub Decimal);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Depth {
    pub asks: Vec<DepthLevel>,
    pub bids: Vec<DepthLevel>,
    pub last_update_id: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kline {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub open: Option<Decimal>,
    #[serde(default)]
    pub high: Option<Decimal>,
    #[serde(default)]
    pub low: Option<Decimal>,
    #[serde(default)]
    pub close: Option<Decimal>,
    pub volume: Decimal,
    pub quote_volume: Decimal,
    pub trades: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPrice {
    pub symbol: String,
    pub funding_rate: Decimal,
    pub index_price: Decimal,
    pub mark_price: Decimal,
    pub next_funding_timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInterest {
    pub symbol: String,
    #[serde(default)]
    pub open_interest: Option<Decimal>,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingIntervalRate {
    pub symbol: String,
    pub interval_end_timestamp: String,
    pub funding_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    #[serde(default)]
    pub id: Option<i64>,
    pub price: Decimal,
    pub quantity: Decimal,
    pub quote_quantity: Decimal,
    pub timestamp: i64,
    pub is_buyer_maker: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SystemStatus {
    Ok,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusAndMessage {
    pub status: SystemStatus,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_depth_levels() {
        let depth: Depth = serde_json::from_value(json!({
            "asks": [["100.5", "1.2"]],
            "bids": [["99.5", "1.0"], ["99.0", "3.0"]],
            "lastUpdateId": "12345",
            "timestamp": 1_700_000_000_000_i64,
        }))
        .unwrap();

        assert_eq!(depth.asks.len(), 1);
        assert_eq!(depth.bids[1], DepthLevel("99.0".parse().unwrap(), "3.0".parse().unwrap()));
    }

    #[test]
    fn test_kline_nullable_prices() {
        let kline: Kline = serde_json::from_value(json!({
            "start": "2024-01-01 00:00:00",
            "end": "2024-01-01 00:01:00",
            "open": null,
            "high": null,
            "low": null,
            "close": null,
            "volume": "0",
            "quoteVolume": "0",
            "trades": "0",
        }))
        .unwrap();
        assert!(kline.open.is_none());
        assert_eq!(kline.volume, Decimal::ZERO);
    }
}
