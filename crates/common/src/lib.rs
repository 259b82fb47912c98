//! Error taxonomy and textual wire types shared across `gcm-seal` crates.

pub mod error;
pub mod protocol;

pub use error::{HexField, SealError};
pub use protocol::{ErrorResponse, HexSealed};
