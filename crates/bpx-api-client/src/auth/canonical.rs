/*
[INPUT]:  Instruction name, JSON payload (object or array of objects), timestamp, window
[OUTPUT]: Canonical `key=value&...` message that gets signed
[POS]:    Auth layer - deterministic message construction for request signing
[UPDATE]: When the exchange changes its signing message format
*/

use serde_json::{Map, Value};

/// Signature validity window in milliseconds, for HTTP and WebSocket signing alike.
pub const DEFAULT_WINDOW_MS: u64 = 60_000;

/// Canonical signing message builder.
///
/// Layout for a single field map:
/// `instruction=<name>&<sorted fields>&timestamp=<ms>&window=<ms>`
///
/// For a batch (array of field maps) the `instruction` pair is repeated in front of each
/// element's sorted fields, elements stay in array order, and `timestamp`/`window` close
/// the whole message once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalMessage {
    pairs: Vec<(String, String)>,
}

impl CanonicalMessage {
    /// Build the canonical message for `payload` signed under `instruction`.
    ///
    /// Any payload that is neither an object nor an array is treated as an empty field map.
    pub fn new(instruction: &str, payload: &Value, timestamp: i64, window: u64) -> Self {
        let mut pairs = Vec::new();

        match payload {
            Value::Array(entries) => {
                for entry in entries {
                    pairs.push(instruction_pair(instruction));
                    if let Value::Object(fields) = entry {
                        pairs.extend(sorted_fields(fields));
                    }
                }
            }
            Value::Object(fields) => {
                pairs.push(instruction_pair(instruction));
                pairs.extend(sorted_fields(fields));
            }
            _ => pairs.push(instruction_pair(instruction)),
        }

        pairs.push(("timestamp".to_string(), timestamp.to_string()));
        pairs.push(("window".to_string(), window.to_string()));

        Self { pairs }
    }

    /// Ordered `(key, value)` pairs of the message
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Render as `key=value` pairs joined by `&`; no URL-encoding is applied.
    pub fn render(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Encode `payload` into the canonical string signed under `instruction`.
pub fn encode(instruction: &str, payload: &Value, timestamp: i64, window: u64) -> String {
    CanonicalMessage::new(instruction, payload, timestamp, window).render()
}

/// Stringify a payload value the way it appears in signed messages and query strings.
///
/// Returns `None` for `null`, which must never be signed or sent.
pub fn canonical_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(canonical_number(n)),
        // Lists (e.g. `marketType`) travel as comma-separated values.
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| canonical_value(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

fn canonical_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    // f64 Display never switches to exponent notation and drops a trailing `.0`.
    n.as_f64()
        .map(|f| f.to_string())
        .unwrap_or_else(|| n.to_string())
}

fn instruction_pair(instruction: &str) -> (String, String) {
    ("instruction".to_string(), instruction.to_string())
}

fn sorted_fields(fields: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = fields
        .iter()
        .filter_map(|(key, value)| canonical_value(value).map(|v| (key.clone(), v)))
        .collect();
    // Ordinal byte comparison, independent of the map's own iteration order.
    pairs.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));
    pairs
}
