/*
[INPUT]:  HTTP client configuration, credentials and API endpoints
[OUTPUT]: Raw JSON responses from the exchange
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod public;
pub mod signature;
pub mod trade;
pub mod user;

pub use error::{LcxError, Result};
pub use signature::SignedRequest;

pub use client::LcxClient;
