/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed request payloads with serialization and validation
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

pub mod enums;
pub mod requests;
pub mod validation;

pub use enums::*;
pub use requests::*;
pub use validation::{MAX_CANCEL_ALL_ORDERS, Validate};
