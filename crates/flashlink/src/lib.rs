//! Binary message protocol for remote device file-system access.
//!
//! flashlink frames discrete, typed messages for exchange with an embedded
//! device over a serial or radio byte stream: reading and writing files,
//! listing directories, and removing files on the device's onboard
//! storage. Frames carry a CRC-16, payload layouts are schema-driven, and
//! every message has a lossless JSON form for logging and replay.
//!
//! # Crate Structure
//!
//! - [`wire`] — Frame envelope: framing, checksum, stream reader/writer
//! - [`schema`] — Field codec, message layouts, type registry, catalog
//! - [`json`] — Lossless JSON interchange
//!
//! The functions at the crate root run against the built-in message
//! catalog; use the underlying crates directly to work with a custom
//! [`schema::TypeRegistry`].

use bytes::BytesMut;

use flashlink_schema::{builtin_registry, DecodeOutcome, DecodedMessage};
use flashlink_wire::{encode_frame, parse_frame, Frame};

/// Re-export wire types.
pub mod wire {
    pub use flashlink_wire::*;
}

/// Re-export schema types.
pub mod schema {
    pub use flashlink_schema::*;
}

/// Re-export JSON bridge types.
pub mod json {
    pub use flashlink_json::*;
}

/// Errors from the combined convenience operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Wire(#[from] flashlink_wire::WireError),

    #[error(transparent)]
    Schema(#[from] flashlink_schema::SchemaError),

    #[error(transparent)]
    Json(#[from] flashlink_json::JsonError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Encode a message and frame it for transmission, using the built-in
/// catalog.
pub fn encode_message(msg: &DecodedMessage) -> Result<Vec<u8>> {
    let payload = builtin_registry().encode(msg)?;
    let mut framed = BytesMut::new();
    encode_frame(msg.msg_type(), msg.sender(), &payload, &mut framed)?;
    Ok(framed.to_vec())
}

/// Dispatch an unframed message through the built-in catalog.
///
/// Frames whose type has no registered schema come back as
/// [`DecodeOutcome::Unknown`] with their raw bytes intact.
pub fn decode_message(frame: Frame) -> Result<DecodeOutcome> {
    Ok(builtin_registry().decode(frame)?)
}

/// Parse one framed message from raw bytes and dispatch it.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodeOutcome> {
    let frame = parse_frame(bytes)?;
    decode_message(frame)
}

/// Render a message as JSON text using the built-in catalog.
pub fn to_json(msg: &DecodedMessage) -> Result<String> {
    Ok(flashlink_json::to_json(msg, builtin_registry())?)
}

/// Parse a message from JSON text using the built-in catalog.
pub fn from_json(text: &str) -> Result<DecodedMessage> {
    Ok(flashlink_json::from_json(text, builtin_registry())?)
}
