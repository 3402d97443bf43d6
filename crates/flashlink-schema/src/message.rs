use std::collections::HashMap;

use bytes::BytesMut;

use crate::error::{Result, SchemaError};
use crate::field::{decode_value, encode_value, FieldKind, Value};

/// One named field in a message layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Ordered field layout for one message kind.
///
/// Schemas are plain data. The decode/encode driver below walks the layout
/// generically, so a new message kind is a new schema value plus a registry
/// entry — no new codec code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSchema {
    /// Human-readable message name.
    pub name: &'static str,
    /// Wire type identifier.
    pub msg_type: u16,
    /// Payload layout, in wire order.
    pub fields: &'static [FieldDef],
}

impl MessageSchema {
    /// Total bytes occupied by the fixed-size fields.
    pub fn fixed_size(&self) -> usize {
        self.fields
            .iter()
            .filter_map(|f| f.kind.fixed_width())
            .sum()
    }

    /// Whether the layout ends in a variable-length trailing field.
    pub fn has_trailing(&self) -> bool {
        matches!(
            self.fields.last(),
            Some(FieldDef {
                kind: FieldKind::TrailingBytes,
                ..
            })
        )
    }

    /// Check layout well-formedness: field names unique, and a
    /// trailing-bytes field only in last position.
    pub(crate) fn validate(&self) -> Result<()> {
        for (i, field) in self.fields.iter().enumerate() {
            if field.kind == FieldKind::TrailingBytes && i != self.fields.len() - 1 {
                return Err(SchemaError::MalformedSchema {
                    name: self.name,
                    reason: "trailing-bytes field must be last",
                });
            }
            if self.fields[..i].iter().any(|prev| prev.name == field.name) {
                return Err(SchemaError::MalformedSchema {
                    name: self.name,
                    reason: "duplicate field name",
                });
            }
        }
        Ok(())
    }

    /// Decode a payload into named field values, in layout order.
    ///
    /// Bytes left over after a layout without a trailing field are
    /// ignored; newer peers may append fields.
    pub fn decode(&self, payload: &[u8]) -> Result<HashMap<&'static str, Value>> {
        if payload.len() < self.fixed_size() {
            return Err(SchemaError::SchemaMismatch {
                schema: self.name,
                expected: self.fixed_size(),
                actual: payload.len(),
            });
        }

        let mut buf = payload;
        let mut fields = HashMap::with_capacity(self.fields.len());
        for def in self.fields {
            fields.insert(def.name, decode_value(def.kind, def.name, &mut buf)?);
        }
        Ok(fields)
    }

    /// Encode a message's field values into a payload, in layout order.
    pub fn encode(&self, msg: &DecodedMessage) -> Result<Vec<u8>> {
        let mut dst = BytesMut::with_capacity(self.fixed_size());
        for def in self.fields {
            let value = msg
                .field(def.name)
                .ok_or(SchemaError::MissingField { field: def.name })?;
            encode_value(def.kind, def.name, value, &mut dst)?;
        }
        Ok(dst.to_vec())
    }
}

/// The typed, in-memory form of one message.
///
/// Owns its field values. Nothing refers back to the frame it came from
/// beyond the copied type and sender IDs.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage {
    msg_type: u16,
    sender: u16,
    fields: HashMap<&'static str, Value>,
}

impl DecodedMessage {
    /// Create an empty message destined for encoding.
    pub fn new(msg_type: u16, sender: u16) -> Self {
        Self {
            msg_type,
            sender,
            fields: HashMap::new(),
        }
    }

    /// Assemble a message from already-decoded parts.
    pub fn from_parts(msg_type: u16, sender: u16, fields: HashMap<&'static str, Value>) -> Self {
        Self {
            msg_type,
            sender,
            fields,
        }
    }

    /// Builder-style field insertion.
    pub fn with_field(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.fields.insert(name, value.into());
        self
    }

    /// Insert or replace a field value.
    pub fn set(&mut self, name: &'static str, value: impl Into<Value>) {
        self.fields.insert(name, value.into());
    }

    /// Look up a field value by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Wire type identifier this message encodes as.
    pub fn msg_type(&self) -> u16 {
        self.msg_type
    }

    /// Originating endpoint identifier.
    pub fn sender(&self) -> u16 {
        self.sender
    }

    /// Iterate field values in arbitrary order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }
}
