use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, WireError};

/// Frame header: message type (2) + sender (2) + payload length (1) = 5 bytes.
pub const HEADER_SIZE: usize = 5;

/// Trailing CRC-16 field: 2 bytes.
pub const CRC_SIZE: usize = 2;

/// Maximum payload length, dictated by the one-byte length field.
pub const MAX_PAYLOAD: usize = 255;

/// A complete on-wire message unit.
///
/// A `Frame` is built once, either from caller-supplied parts or from wire
/// bytes that passed the checksum, and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier selecting the payload layout.
    pub msg_type: u16,
    /// Identifier of the originating endpoint.
    pub sender: u16,
    /// The message payload.
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(msg_type: u16, sender: u16, payload: impl Into<Bytes>) -> Self {
        Self {
            msg_type,
            sender,
            payload: payload.into(),
        }
    }

    /// The total wire size of this frame (header + payload + CRC).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len() + CRC_SIZE
    }
}

/// CRC-16 with polynomial 0x1021 and initial value 0x0000, computed over
/// the header and payload bytes.
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0x0000;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌───────────┬─────────────┬──────────┬──────────────────┬───────────┐
/// │ Type      │ Sender      │ Length   │ Payload          │ CRC       │
/// │ (2B LE)   │ (2B LE)     │ (1B)     │ (Length bytes)   │ (2B LE)   │
/// └───────────┴─────────────┴──────────┴──────────────────┴───────────┘
/// ```
///
/// The CRC covers type, sender, length, and payload.
pub fn encode_frame(msg_type: u16, sender: u16, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > MAX_PAYLOAD {
        return Err(WireError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }
    dst.reserve(HEADER_SIZE + payload.len() + CRC_SIZE);
    let start = dst.len();
    dst.put_u16_le(msg_type);
    dst.put_u16_le(sender);
    dst.put_u8(payload.len() as u8);
    dst.put_slice(payload);
    let crc = crc16(&dst[start..]);
    dst.put_u16_le(crc);
    Ok(())
}

/// Decode a frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer. On checksum
/// mismatch the buffer is left untouched; discarding bytes and hunting for
/// the next frame boundary is the caller's decision.
pub fn decode_frame(src: &mut BytesMut) -> Result<Option<Frame>> {
    if src.len() < HEADER_SIZE {
        return Ok(None); // Need more data
    }

    let payload_len = src[4] as usize;
    let total = HEADER_SIZE + payload_len + CRC_SIZE;
    if src.len() < total {
        return Ok(None); // Need more data
    }

    let computed = crc16(&src[..HEADER_SIZE + payload_len]);
    let stored = u16::from_le_bytes([src[total - 2], src[total - 1]]);
    if computed != stored {
        return Err(WireError::ChecksumMismatch { stored, computed });
    }

    let msg_type = u16::from_le_bytes([src[0], src[1]]);
    let sender = u16::from_le_bytes([src[2], src[3]]);

    src.advance(HEADER_SIZE);
    let payload = src.split_to(payload_len).freeze();
    src.advance(CRC_SIZE);

    Ok(Some(Frame {
        msg_type,
        sender,
        payload,
    }))
}

/// Parse one complete frame from a byte slice.
///
/// Unlike [`decode_frame`], a short input is an error
/// ([`WireError::IncompleteFrame`]) rather than "need more". Bytes past the
/// first frame are ignored.
pub fn parse_frame(bytes: &[u8]) -> Result<Frame> {
    if bytes.len() < HEADER_SIZE {
        return Err(WireError::IncompleteFrame {
            needed: HEADER_SIZE,
            available: bytes.len(),
        });
    }

    let payload_len = bytes[4] as usize;
    let total = HEADER_SIZE + payload_len + CRC_SIZE;
    if bytes.len() < total {
        return Err(WireError::IncompleteFrame {
            needed: total,
            available: bytes.len(),
        });
    }

    let computed = crc16(&bytes[..HEADER_SIZE + payload_len]);
    let stored = u16::from_le_bytes([bytes[total - 2], bytes[total - 1]]);
    if computed != stored {
        return Err(WireError::ChecksumMismatch { stored, computed });
    }

    Ok(Frame {
        msg_type: u16::from_le_bytes([bytes[0], bytes[1]]),
        sender: u16::from_le_bytes([bytes[2], bytes[3]]),
        payload: Bytes::copy_from_slice(&bytes[HEADER_SIZE..HEADER_SIZE + payload_len]),
    })
}
