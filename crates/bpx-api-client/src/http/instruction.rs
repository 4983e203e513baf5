/*
[INPUT]:  HTTP verb and request path
[OUTPUT]: Signing instruction name, or None for public endpoints
[POS]:    HTTP layer - decides which calls must be signed
[UPDATE]: Whenever a private endpoint is added to a resource group
*/

use std::fmt;

use phf::phf_map;

/// HTTP verbs supported by the exchange API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Signing instructions keyed by `"<VERB>:<path>"`.
///
/// Paths match exactly; every signed endpoint is listed on its own.
static ENDPOINT_INSTRUCTIONS: phf::Map<&'static str, &'static str> = phf_map! {
    // Account
    "GET:/api/v1/account" => "accountQuery",
    "PATCH:/api/v1/account" => "accountUpdate",
    "POST:/api/v1/account/convertDust" => "convertDust",
    "GET:/api/v1/account/limits/borrow" => "maxBorrowQuantity",
    "GET:/api/v1/account/limits/order" => "maxOrderQuantity",
    "GET:/api/v1/account/limits/withdrawal" => "maxWithdrawalQuantity",

    // Borrow lend
    "GET:/api/v1/borrowLend/positions" => "borrowLendPositionQuery",
    "POST:/api/v1/borrowLend" => "borrowLendExecute",

    // Capital
    "GET:/api/v1/capital" => "balanceQuery",
    "GET:/api/v1/capital/collateral" => "collateralQuery",
    "GET:/wapi/v1/capital/deposits" => "depositQueryAll",
    "GET:/wapi/v1/capital/deposit/address" => "depositAddressQuery",
    "GET:/wapi/v1/capital/withdrawals" => "withdrawalQueryAll",
    "POST:/wapi/v1/capital/withdrawals" => "withdraw",

    // Futures
    "GET:/api/v1/position" => "positionQuery",

    // History
    "GET:/wapi/v1/history/borrowLend" => "borrowHistoryQueryAll",
    "GET:/wapi/v1/history/interest" => "interestHistoryQueryAll",
    "GET:/wapi/v1/history/borrowLend/positions" => "borrowPositionHistoryQueryAll",
    "GET:/wapi/v1/history/dust" => "dustHistoryQueryAll",
    "GET:/wapi/v1/history/fills" => "fillHistoryQueryAll",
    "GET:/wapi/v1/history/funding" => "fundingHistoryQueryAll",
    "GET:/wapi/v1/history/orders" => "orderHistoryQueryAll",
    "GET:/wapi/v1/history/pnl" => "pnlHistoryQueryAll",
    "GET:/wapi/v1/history/rfq" => "rfqHistoryQueryAll",
    "GET:/wapi/v1/history/quote" => "quoteHistoryQueryAll",
    "GET:/wapi/v1/history/settlement" => "settlementHistoryQueryAll",
    "GET:/wapi/v1/history/strategies" => "strategyHistoryQueryAll",

    // Order
    "GET:/api/v1/order" => "orderQuery",
    "POST:/api/v1/order" => "orderExecute",
    "DELETE:/api/v1/order" => "orderCancel",
    "POST:/api/v1/orders" => "orderExecute",
    "GET:/api/v1/orders" => "orderQueryAll",
    "DELETE:/api/v1/orders" => "orderCancelAll",

    // Request for quote
    "POST:/api/v1/rfq" => "rfqSubmit",
    "POST:/api/v1/rfq/accept" => "quoteAccept",
    "POST:/api/v1/rfq/refresh" => "rfqRefresh",
    "POST:/api/v1/rfq/cancel" => "rfqCancel",
    "POST:/api/v1/rfq/quote" => "quoteSubmit",
};

/// Resolve the signing instruction for `method` on `path`.
///
/// `path` must be the base path without a query string. `None` means the endpoint is
/// public and is called unsigned.
pub fn resolve(method: HttpMethod, path: &str) -> Option<&'static str> {
    let key = format!("{}:{}", method.as_str(), path);
    ENDPOINT_INSTRUCTIONS.get(key.as_str()).copied()
}
