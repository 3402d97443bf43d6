//! Lossless JSON interchange for decoded messages.
//!
//! A message renders to a JSON object carrying the envelope metadata
//! (`msg_type`, `sender`, derived `length` and `crc`) plus one key per
//! schema field, and parses back into the identical binary form. The
//! replay path ([`frame_from_json`]) reproduces the original framed bytes
//! bit for bit, so recorded traffic can be re-sent from logs.

pub mod emit;
pub mod error;
pub mod parse;

pub use emit::{to_json, to_value};
pub use error::{JsonError, Result};
pub use parse::{frame_from_json, from_json, from_value};
