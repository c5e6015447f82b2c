/*
[INPUT]:  API key, secret key and request material
[OUTPUT]: Credential pair and HMAC request signatures
[POS]:    Auth layer - credential storage and request signing
[UPDATE]: When changing credential handling or signing algorithm
*/

pub mod credentials;
pub mod signer;

pub use credentials::{AUTH_REQUIRED_MESSAGE, Credentials};
pub use signer::{EMPTY_BODY, sign, sign_payload};
