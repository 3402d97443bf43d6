use std::collections::HashMap;

use flashlink_wire::Frame;
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::message::{DecodedMessage, MessageSchema};

/// Read-only mapping from wire message type to schema.
///
/// Populated once at startup; reads need no synchronization afterwards.
pub struct TypeRegistry {
    schemas: HashMap<u16, MessageSchema>,
}

/// Result of dispatching a frame by its type identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// A registered schema decoded the payload.
    Message(DecodedMessage),
    /// No schema is registered for the type; the raw frame is preserved
    /// so callers can forward or log it unchanged.
    Unknown(Frame),
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Register a schema. Rejects ill-formed layouts and type identifiers
    /// already claimed by another schema.
    pub fn register(&mut self, schema: MessageSchema) -> Result<()> {
        schema.validate()?;
        if self.schemas.contains_key(&schema.msg_type) {
            return Err(SchemaError::DuplicateTypeId(schema.msg_type));
        }
        self.schemas.insert(schema.msg_type, schema);
        Ok(())
    }

    /// Look up the schema for a message type.
    ///
    /// Absence is not an error; it means "unknown message kind" and the
    /// caller keeps the raw frame.
    pub fn lookup(&self, msg_type: u16) -> Option<&MessageSchema> {
        self.schemas.get(&msg_type)
    }

    /// Check if a message type has a registered schema.
    pub fn contains(&self, msg_type: u16) -> bool {
        self.schemas.contains_key(&msg_type)
    }

    /// Registered message types, sorted.
    pub fn msg_types(&self) -> Vec<u16> {
        let mut types: Vec<u16> = self.schemas.keys().copied().collect();
        types.sort_unstable();
        types
    }

    /// Decode a frame's payload by its type identifier.
    ///
    /// Frames with unregistered types come back unchanged in
    /// [`DecodeOutcome::Unknown`].
    pub fn decode(&self, frame: Frame) -> Result<DecodeOutcome> {
        let Some(schema) = self.lookup(frame.msg_type) else {
            debug!(msg_type = frame.msg_type, "no schema registered, keeping raw frame");
            return Ok(DecodeOutcome::Unknown(frame));
        };

        let fields = schema.decode(&frame.payload)?;
        Ok(DecodeOutcome::Message(DecodedMessage::from_parts(
            frame.msg_type,
            frame.sender,
            fields,
        )))
    }

    /// Encode a message's payload bytes using its registered schema.
    pub fn encode(&self, msg: &DecodedMessage) -> Result<Vec<u8>> {
        let schema = self.lookup(msg.msg_type()).ok_or(SchemaError::UnknownType {
            msg_type: msg.msg_type(),
        })?;
        schema.encode(msg)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
