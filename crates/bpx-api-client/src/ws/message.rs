/*
[INPUT]:  Raw WebSocket text frames
[OUTPUT]: Parsed StreamMessage envelopes and subscription frames
[POS]:    WebSocket layer - message parsing and frame building
[UPDATE]: When adding new frame types or changing format
*/

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Prefix shared by every stream that needs a signed subscription
pub const PRIVATE_STREAM_PREFIX: &str = "account.";

/// Data frame pushed by the server for a subscribed stream
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StreamMessage {
    pub stream: String,
    pub data: Value,
}

impl StreamMessage {
    /// Leading segment of the stream name, e.g. `depth` for `depth.SOL_USDC`
    pub fn topic(&self) -> &str {
        self.stream
            .split_once('.')
            .map_or(self.stream.as_str(), |(topic, _)| topic)
    }

    pub fn is_private(&self) -> bool {
        is_private_stream(&self.stream)
    }
}

pub fn is_private_stream(stream: &str) -> bool {
    stream.starts_with(PRIVATE_STREAM_PREFIX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionMethod {
    Subscribe,
    Unsubscribe,
}

impl SubscriptionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionMethod::Subscribe => "SUBSCRIBE",
            SubscriptionMethod::Unsubscribe => "UNSUBSCRIBE",
        }
    }
}

/// Build a subscription frame; `signature` is the `[key, sig, ts, window]` tuple
pub fn subscription_frame(
    method: SubscriptionMethod,
    streams: &[&str],
    signature: Option<[String; 4]>,
) -> Value {
    let mut frame = json!({
        "method": method.as_str(),
        "params": streams,
    });
    if let Some(signature) = signature {
        frame["signature"] = json!(signature);
    }
    frame
}
