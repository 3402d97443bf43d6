use std::borrow::Cow;
use std::fmt;

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Result, SchemaError};

/// Wire-level field kinds a message layout is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Unsigned 8-bit integer.
    U8,
    /// Little-endian unsigned 16-bit integer.
    U16,
    /// Little-endian unsigned 32-bit integer.
    U32,
    /// Zero-padded string occupying exactly `width` bytes on the wire.
    FixedString { width: usize },
    /// Consumes every payload byte left after the fixed fields. At most
    /// one per layout, always last.
    TrailingBytes,
}

impl FieldKind {
    /// Encoded width in bytes; `None` for the variable-length trailing kind.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            FieldKind::U8 => Some(1),
            FieldKind::U16 => Some(2),
            FieldKind::U32 => Some(4),
            FieldKind::FixedString { width } => Some(*width),
            FieldKind::TrailingBytes => None,
        }
    }

    pub(crate) fn value_name(&self) -> &'static str {
        match self {
            FieldKind::U8 => "u8",
            FieldKind::U16 => "u16",
            FieldKind::U32 => "u32",
            FieldKind::FixedString { .. } => "fixed-width string",
            FieldKind::TrailingBytes => "byte array",
        }
    }
}

/// A string destined for (or read from) a zero-padded fixed-width field.
///
/// Keeps its bytes exactly as seen: values decoded from the wire carry
/// their padding, values built from a caller string carry none. Equality
/// ignores trailing zero padding, so a decoded value compares equal to the
/// string it was encoded from.
#[derive(Debug, Clone, Eq)]
pub struct FixedStr {
    bytes: Vec<u8>,
}

impl FixedStr {
    /// Build from a logical string, without padding.
    pub fn new(s: impl Into<String>) -> Self {
        Self {
            bytes: s.into().into_bytes(),
        }
    }

    /// Build from raw wire bytes, padding included.
    pub fn from_wire(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// The bytes as stored. For decoded values this is the padded wire
    /// form.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The bytes with trailing zero padding stripped.
    pub fn trimmed_bytes(&self) -> &[u8] {
        let end = self
            .bytes
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |i| i + 1);
        &self.bytes[..end]
    }

    /// The logical string, padding stripped. Invalid UTF-8 is replaced.
    pub fn trimmed(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.trimmed_bytes())
    }

    /// Stored length in bytes, padding included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl PartialEq for FixedStr {
    fn eq(&self, other: &Self) -> bool {
        self.trimmed_bytes() == other.trimmed_bytes()
    }
}

impl From<&str> for FixedStr {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FixedStr {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for FixedStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.trimmed())
    }
}

/// A single decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    Str(FixedStr),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Value::U8(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<u16> {
        match self {
            Value::U16(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::U32(v) => Some(*v),
            _ => None,
        }
    }

    /// Any integer variant, widened.
    pub fn as_unsigned(&self) -> Option<u64> {
        match self {
            Value::U8(v) => Some(u64::from(*v)),
            Value::U16(v) => Some(u64::from(*v)),
            Value::U32(v) => Some(u64::from(*v)),
            _ => None,
        }
    }

    /// The trimmed string form of a fixed-width string value.
    pub fn as_str(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Str(s) => Some(s.trimmed()),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::U8(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::U16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::U32(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(FixedStr::new(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(FixedStr::new(s))
    }
}

impl From<FixedStr> for Value {
    fn from(s: FixedStr) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

/// Decode one field from the front of `buf`, advancing past it.
pub fn decode_value(kind: FieldKind, field: &'static str, buf: &mut &[u8]) -> Result<Value> {
    if let Some(width) = kind.fixed_width() {
        if buf.remaining() < width {
            return Err(SchemaError::TruncatedPayload {
                field,
                needed: width,
                remaining: buf.remaining(),
            });
        }
    }

    let value = match kind {
        FieldKind::U8 => Value::U8(buf.get_u8()),
        FieldKind::U16 => Value::U16(buf.get_u16_le()),
        FieldKind::U32 => Value::U32(buf.get_u32_le()),
        FieldKind::FixedString { width } => {
            let data = *buf;
            let (head, rest) = data.split_at(width);
            *buf = rest;
            Value::Str(FixedStr::from_wire(head))
        }
        FieldKind::TrailingBytes => {
            let data = *buf;
            *buf = &[];
            Value::Bytes(data.to_vec())
        }
    };

    Ok(value)
}

/// Encode one field value, appending its wire form to `dst`.
pub fn encode_value(
    kind: FieldKind,
    field: &'static str,
    value: &Value,
    dst: &mut BytesMut,
) -> Result<()> {
    match (kind, value) {
        (FieldKind::U8, Value::U8(v)) => dst.put_u8(*v),
        (FieldKind::U16, Value::U16(v)) => dst.put_u16_le(*v),
        (FieldKind::U32, Value::U32(v)) => dst.put_u32_le(*v),
        (FieldKind::FixedString { width }, Value::Str(s)) => {
            let bytes = s.as_bytes();
            if bytes.len() > width {
                return Err(SchemaError::OversizedField {
                    field,
                    len: bytes.len(),
                    max: width,
                });
            }
            dst.put_slice(bytes);
            dst.put_bytes(0, width - bytes.len());
        }
        (FieldKind::TrailingBytes, Value::Bytes(bytes)) => dst.put_slice(bytes),
        (kind, _) => {
            return Err(SchemaError::ValueKindMismatch {
                field,
                expected: kind.value_name(),
            });
        }
    }

    Ok(())
}
