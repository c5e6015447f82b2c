/*
[INPUT]:  Socket base URL, credentials and topic subscriptions
[OUTPUT]: Decoded realtime messages delivered to a per-connection callback
[POS]:    WebSocket layer - real-time data streams
[UPDATE]: When adding new topics or changing connection logic
*/

pub mod client;
pub mod message;
pub mod state;
pub mod topic;

pub use client::{AUTH_WS_PATH, LcxWebSocket, PUBLIC_WS_PATH};
pub use message::{InboundMessage, decode_frame};
pub use state::ConnectionState;
pub use topic::{SubscribeMessage, Topic};
