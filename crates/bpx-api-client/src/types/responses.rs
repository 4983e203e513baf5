/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed response structs for account, order and RFQ endpoints
[POS]:    Data layer - authenticated endpoint response types
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{
    OrderStatus, OrderType, RfqExecutionMode, RfqStatus, SelfTradePrevention, Side, TimeInForce,
};

/// Open order as returned by the order endpoints.
///
/// Shared fields are plain struct fields; kind-specific fields sit behind
/// [`OrderDetails`], selected by the wire `orderType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub client_id: Option<u32>,
    pub symbol: String,
    pub side: Side,
    pub created_at: i64,
    pub status: OrderStatus,
    pub time_in_force: TimeInForce,
    pub self_trade_prevention: SelfTradePrevention,
    #[serde(default)]
    pub executed_quantity: Option<Decimal>,
    #[serde(default)]
    pub executed_quote_quantity: Option<Decimal>,
    #[serde(default)]
    pub reduce_only: Option<bool>,
    #[serde(default)]
    pub trigger_price: Option<Decimal>,
    #[serde(default)]
    pub trigger_quantity: Option<Decimal>,
    #[serde(default)]
    pub triggered_at: Option<i64>,
    #[serde(default)]
    pub related_order_id: Option<String>,
    #[serde(default)]
    pub stop_loss_trigger_price: Option<Decimal>,
    #[serde(default)]
    pub stop_loss_limit_price: Option<Decimal>,
    #[serde(default)]
    pub take_profit_trigger_price: Option<Decimal>,
    #[serde(default)]
    pub take_profit_limit_price: Option<Decimal>,
    #[serde(flatten)]
    pub details: OrderDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "orderType")]
pub enum OrderDetails {
    #[serde(rename_all = "camelCase", alias = "StopMarket")]
    Market {
        #[serde(default)]
        quantity: Option<Decimal>,
        #[serde(default)]
        quote_quantity: Option<Decimal>,
    },
    #[serde(rename_all = "camelCase", alias = "StopLimit")]
    Limit {
        price: Decimal,
        quantity: Decimal,
        #[serde(default)]
        post_only: bool,
    },
}

impl Order {
    pub fn order_type(&self) -> OrderType {
        match self.details {
            OrderDetails::Market { .. } => OrderType::Market,
            OrderDetails::Limit { .. } => OrderType::Limit,
        }
    }

    /// Limit price, if this is a limit order
    pub fn limit_price(&self) -> Option<Decimal> {
        match &self.details {
            OrderDetails::Limit { price, .. } => Some(*price),
            OrderDetails::Market { .. } => None,
        }
    }
}

/// Per-asset balance as returned by the capital endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub available: Decimal,
    pub locked: Decimal,
    pub staked: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositAddress {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfqResponse {
    pub rfq_id: String,
    #[serde(default)]
    pub client_id: Option<u32>,
    pub symbol: String,
    pub side: Side,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub quote_quantity: Option<Decimal>,
    pub submission_time: i64,
    pub expiry_time: i64,
    pub status: RfqStatus,
    #[serde(default)]
    pub execution_mode: Option<RfqExecutionMode>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuoteResponse {
    pub rfq_id: String,
    pub quote_id: String,
    #[serde(default)]
    pub client_id: Option<u32>,
    pub bid_price: Decimal,
    pub ask_price: Decimal,
    pub status: RfqStatus,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order_json(order_type: &str) -> serde_json::Value {
        json!({
            "id": "112233",
            "clientId": null,
            "symbol": "SOL_USDC",
            "side": "Bid",
            "createdAt": 1_700_000_000_000_i64,
            "status": "New",
            "timeInForce": "GTC",
            "selfTradePrevention": "RejectTaker",
            "executedQuantity": "0",
            "executedQuoteQuantity": "0",
            "orderType": order_type,
            "price": "95",
            "quantity": "0.07",
            "postOnly": true,
            "triggerPrice": null,
        })
    }

    #[test]
    fn test_limit_order_details() {
        let order: Order = serde_json::from_value(order_json("Limit")).unwrap();
        assert_eq!(order.limit_price(), Some("95".parse().unwrap()));
        assert!(matches!(order.details, OrderDetails::Limit { post_only: true, .. }));
        assert_eq!(order.client_id, None);
    }

    #[test]
    fn test_market_order_details() {
        let mut value = order_json("Market");
        value["quoteQuantity"] = json!("6.65");
        let order: Order = serde_json::from_value(value).unwrap();
        assert_eq!(order.limit_price(), None);
        match order.details {
            OrderDetails::Market { quote_quantity, .. } => {
                assert_eq!(quote_quantity, Some("6.65".parse().unwrap()));
            }
            OrderDetails::Limit { .. } => panic!("Expected market order"),
        }
    }

    #[test]
    fn test_stop_limit_maps_to_limit() {
        let order: Order = serde_json::from_value(order_json("StopLimit")).unwrap();
        assert_eq!(order.order_type(), OrderType::Limit);
    }
}
