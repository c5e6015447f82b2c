/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public LCX adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod config;
pub mod http;
pub mod types;
pub mod ws;

// Re-export commonly used types from auth
pub use auth::{Credentials, sign, sign_payload};

// Re-export configuration
pub use config::{BaseUrls, ClientConfig, Environment};

// Re-export commonly used types from http
pub use http::{LcxClient, LcxError, Result, SignedRequest};

// Re-export all types
pub use types::*;

// Re-export commonly used types from ws
pub use ws::{ConnectionState, InboundMessage, LcxWebSocket, SubscribeMessage, Topic};
