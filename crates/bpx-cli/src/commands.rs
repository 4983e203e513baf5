/*
[INPUT]:  Parsed subcommand and a configured BpxClient
[OUTPUT]: JSON documents (response envelopes, stream messages, generated keys)
[POS]:    Command layer - maps subcommands onto client calls
[UPDATE]: When adding new subcommands
*/

use anyhow::{Context, Result, bail};
use bpx_api_client::{
    ApiResponse, BpxClient, BpxWebSocket, Ed25519Signer, HistoryRequest, OpenOrdersRequest,
    OrderCancelAllRequest, StreamMessage, TickerRequest,
};
use clap::Subcommand;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Exchange system status
    Status,
    /// Liveness check
    Ping,
    /// Server time in milliseconds
    Time,
    /// All markets
    Markets,
    /// 24h ticker for one symbol
    Ticker { symbol: String },
    /// Order book depth for one symbol
    Depth { symbol: String },
    /// Account settings (signed)
    Account,
    /// Balances per asset (signed)
    Balances,
    /// Open orders (signed)
    OpenOrders {
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Cancel every open order on a symbol (signed)
    CancelAll { symbol: String },
    /// Fill history (signed)
    Fills {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Print messages from WebSocket streams
    Stream {
        #[arg(required = true)]
        streams: Vec<String>,
        /// Stop after this many messages
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// Generate a fresh Ed25519 key pair in the exchange's key format
    Keygen,
}

/// Run a one-shot command and return its JSON output
pub async fn run(command: &Command, client: &BpxClient) -> Result<Value> {
    debug!(?command, "running command");
    let output = match command {
        Command::Status => envelope(client.status().await)?,
        Command::Ping => envelope(client.ping().await)?,
        Command::Time => envelope(client.get_system_time().await)?,
        Command::Markets => envelope(client.get_markets().await)?,
        Command::Ticker { symbol } => {
            let req = TickerRequest {
                symbol: symbol.clone(),
                interval: None,
            };
            envelope(client.get_ticker(&req).await)?
        }
        Command::Depth { symbol } => envelope(client.get_depth(symbol).await)?,
        Command::Account => envelope(client.get_account().await)?,
        Command::Balances => envelope(client.get_balances().await)?,
        Command::OpenOrders { symbol } => {
            let req = OpenOrdersRequest {
                symbol: symbol.clone(),
                market_type: None,
            };
            envelope(client.get_open_orders(&req).await)?
        }
        Command::CancelAll { symbol } => {
            let req = OrderCancelAllRequest {
                symbol: symbol.clone(),
                order_type: None,
            };
            envelope(client.cancel_open_orders(&req).await)?
        }
        Command::Fills { symbol, limit } => {
            let req = HistoryRequest {
                symbol: symbol.clone(),
                limit: *limit,
                ..HistoryRequest::default()
            };
            envelope(client.get_fill_history(&req).await)?
        }
        Command::Keygen => keygen(),
        Command::Stream { .. } => bail!("stream is not a one-shot command"),
    };
    Ok(output)
}

/// Subscribe to `streams` and hand each message to `on_message` until `count` arrive
/// or the connection closes
pub async fn stream<F>(client: &BpxClient, streams: &[String], count: usize, mut on_message: F) -> Result<usize>
where
    F: FnMut(&StreamMessage) -> Result<()>,
{
    let mut ws = BpxWebSocket::new(client);
    let mut receiver = ws.take_receiver().context("stream receiver already taken")?;

    ws.connect().await.context("connect websocket")?;
    let names: Vec<&str> = streams.iter().map(String::as_str).collect();
    ws.subscribe(&names).await.context("subscribe")?;
    info!(streams = ?names, count, "subscribed");

    let mut received = 0;
    while received < count {
        match receiver.recv().await {
            Some(message) => {
                on_message(&message)?;
                received += 1;
            }
            None => break,
        }
    }

    ws.close().await;
    Ok(received)
}

fn envelope<T: Serialize>(response: ApiResponse<T>) -> Result<Value> {
    serde_json::to_value(&response).context("serialize response envelope")
}

fn keygen() -> Value {
    let signer = Ed25519Signer::generate();
    json!({
        "apiKey": signer.public_key_base64(),
        "apiSecret": signer.secret_key_base64(),
    })
}
