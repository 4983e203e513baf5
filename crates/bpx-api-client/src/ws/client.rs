/*
[INPUT]:  WebSocket URL, optional request signer, stream names
[OUTPUT]: StreamMessage values via an mpsc channel
[POS]:    WebSocket layer - connection and subscription handling
[UPDATE]: When changing connection logic or the subscription protocol
*/

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::{SinkExt, StreamExt};
use reqwest::Url;
use serde_json::Value;
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, info, warn};

use crate::http::{BpxClient, BpxError, RequestSigner, Result};
use crate::ws::message::{StreamMessage, SubscriptionMethod, is_private_stream, subscription_frame};

const CHANNEL_CAPACITY: usize = 100;
const MESSAGE_SAMPLE_LIMIT: usize = 3;
const CONTROL_LOG_LIMIT: usize = 3;
const RAW_LOG_MAX_BYTES: usize = 1024;

static MESSAGE_SAMPLE_COUNT: AtomicUsize = AtomicUsize::new(0);
static CONTROL_LOG_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Stream client for the Backpack WebSocket API
#[derive(Debug)]
pub struct BpxWebSocket {
    url: Url,
    signer: Option<RequestSigner>,
    message_tx: mpsc::Sender<StreamMessage>,
    message_rx: Option<mpsc::Receiver<StreamMessage>>,
    outbound_tx: Arc<Mutex<Option<mpsc::Sender<WsMessage>>>>,
}

impl BpxWebSocket {
    /// Stream client sharing the HTTP client's `ws_url` and credentials
    pub fn new(client: &BpxClient) -> Self {
        Self::with_url(client.ws_url().clone(), client.signer().cloned())
    }

    pub fn with_url(url: Url, signer: Option<RequestSigner>) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            url,
            signer,
            message_tx: tx,
            message_rx: Some(rx),
            outbound_tx: Arc::new(Mutex::new(None)),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the message receiver; only the first call returns it
    pub fn take_receiver(&mut self) -> Option<mpsc::Receiver<StreamMessage>> {
        self.message_rx.take()
    }

    /// Open the connection and spawn the read/write task
    pub async fn connect(&self) -> Result<()> {
        if self.is_connected().await {
            return Err(BpxError::WebSocket("already connected".to_string()));
        }

        let (ws_stream, _response) = connect_async(self.url.as_str())
            .await
            .map_err(|err| BpxError::WebSocket(err.to_string()))?;
        let (mut write, mut read) = ws_stream.split();
        let (outbound_tx, mut outbound_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let outbound_state = self.outbound_tx.clone();

        {
            // Another connect may have finished while this handshake was in flight.
            let mut guard = outbound_state.lock().await;
            if guard.is_some() {
                return Err(BpxError::WebSocket("already connected".to_string()));
            }
            *guard = Some(outbound_tx);
        }

        info!(url = %self.url, "ws connected");

        let message_tx = self.message_tx.clone();
        let outbound_state_for_task = outbound_state.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    outbound = outbound_rx.recv() => {
                        match outbound {
                            Some(message) => {
                                if write.send(message).await.is_err() {
                                    break;
                                }
                            }
                            None => {
                                let _ = write.send(WsMessage::Close(None)).await;
                                break;
                            }
                        }
                    }
                    incoming = read.next() => {
                        match incoming {
                            Some(Ok(WsMessage::Close(_))) => {
                                let _ = write.send(WsMessage::Close(None)).await;
                                break;
                            }
                            Some(Ok(WsMessage::Ping(payload))) => {
                                if write.send(WsMessage::Pong(payload)).await.is_err() {
                                    break;
                                }
                            }
                            Some(Ok(message)) => {
                                if let Some(parsed) = parse_message(message)
                                    && message_tx.send(parsed).await.is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(err)) => {
                                warn!(error = %err, "ws read failed");
                                break;
                            }
                            None => break,
                        }
                    }
                }
            }

            let mut guard = outbound_state_for_task.lock().await;
            *guard = None;
            info!("ws disconnected");
        });

        Ok(())
    }

    pub async fn is_connected(&self) -> bool {
        self.outbound_tx.lock().await.is_some()
    }

    /// Subscribe to streams; private (`account.`) streams are signed
    pub async fn subscribe(&self, streams: &[&str]) -> Result<()> {
        let frame = self.build_frame(SubscriptionMethod::Subscribe, streams)?;
        self.send_frame(frame).await
    }

    pub async fn unsubscribe(&self, streams: &[&str]) -> Result<()> {
        let frame = self.build_frame(SubscriptionMethod::Unsubscribe, streams)?;
        self.send_frame(frame).await
    }

    /// Close the connection; the task exits once the outbound channel drops
    pub async fn close(&self) {
        self.outbound_tx.lock().await.take();
    }

    /// Frame sent for a (un)subscribe call, signed when any stream is private
    pub fn build_frame(&self, method: SubscriptionMethod, streams: &[&str]) -> Result<Value> {
        let signature = if method == SubscriptionMethod::Subscribe
            && streams.iter().any(|stream| is_private_stream(stream))
        {
            let signer = self
                .signer
                .as_ref()
                .ok_or_else(|| BpxError::MissingCredentials("subscribe".to_string()))?;
            Some(signer.sign_websocket_subscribe())
        } else {
            None
        };

        Ok(subscription_frame(method, streams, signature))
    }

    async fn send_frame(&self, frame: Value) -> Result<()> {
        let sender = {
            let guard = self.outbound_tx.lock().await;
            guard
                .clone()
                .ok_or_else(|| BpxError::WebSocket("not connected".to_string()))?
        };

        sender
            .send(WsMessage::Text(frame.to_string().into()))
            .await
            .map_err(|_| BpxError::WebSocket("send channel closed".to_string()))?;

        debug!(
            method = frame["method"].as_str().unwrap_or_default(),
            params = %frame["params"],
            signed = frame.get("signature").is_some(),
            "ws subscription sent"
        );

        Ok(())
    }
}

/// Decode a server frame; acknowledgements and error frames are logged and dropped
fn parse_message(message: WsMessage) -> Option<StreamMessage> {
    let text: String = match message {
        WsMessage::Text(text) => text.to_string(),
        WsMessage::Binary(bytes) => String::from_utf8(bytes.to_vec()).ok()?,
        _ => return None,
    };

    match serde_json::from_str::<StreamMessage>(&text) {
        Ok(parsed) => {
            log_message_sample_once(&parsed);
            Some(parsed)
        }
        Err(_) => {
            log_control_frame(&text);
            None
        }
    }
}

fn log_message_sample_once(message: &StreamMessage) {
    let count = MESSAGE_SAMPLE_COUNT.fetch_add(1, Ordering::Relaxed);
    if count < MESSAGE_SAMPLE_LIMIT {
        info!(
            sample_index = count + 1,
            sample_limit = MESSAGE_SAMPLE_LIMIT,
            stream = %message.stream,
            "ws message sample"
        );
    }
}

fn log_control_frame(raw: &str) {
    let preview = truncate_for_log(raw, RAW_LOG_MAX_BYTES);

    if let Ok(value) = serde_json::from_str::<Value>(raw)
        && let Some(error) = value.get("error").filter(|error| !error.is_null())
    {
        warn!(error = %error, "ws error frame");
        return;
    }

    let count = CONTROL_LOG_COUNT.fetch_add(1, Ordering::Relaxed);
    if count < CONTROL_LOG_LIMIT {
        debug!(
            sample_index = count + 1,
            sample_limit = CONTROL_LOG_LIMIT,
            bytes = raw.len(),
            message = %preview,
            "ws control frame"
        );
    }
}

fn truncate_for_log(value: &str, max_len: usize) -> String {
    if value.len() <= max_len {
        return value.to_string();
    }
    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &value[..end])
}
