//! Checksummed message framing for embedded device links.
//!
//! Every message travels in a fixed envelope:
//! - A 2-byte little-endian message type ID selecting the payload layout
//! - A 2-byte little-endian sender ID naming the originating endpoint
//! - A 1-byte payload length (payloads are capped at 255 bytes)
//! - The payload itself
//! - A trailing CRC-16 over type, sender, length, and payload
//!
//! Corrupt and truncated frames are rejected, never processed as data.

pub mod codec;
pub mod error;
pub mod reader;
pub mod sender;
pub mod writer;

pub use codec::{
    crc16, decode_frame, encode_frame, parse_frame, Frame, CRC_SIZE, HEADER_SIZE, MAX_PAYLOAD,
};
pub use error::{Result, WireError};
pub use reader::FrameReader;
pub use sender::{default_sender, set_default_sender, DEFAULT_SENDER};
pub use writer::FrameWriter;
