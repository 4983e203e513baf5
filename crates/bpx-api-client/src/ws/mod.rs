/*
[INPUT]:  WebSocket URL, credentials and stream names
[OUTPUT]: Real-time stream messages
[POS]:    WebSocket layer - real-time data streams
[UPDATE]: When adding new frame types or changing connection logic
*/

pub mod client;
pub mod message;

pub use client::BpxWebSocket;
pub use message::{StreamMessage, SubscriptionMethod, is_private_stream};
