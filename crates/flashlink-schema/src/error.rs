/// Errors from schema-driven encoding and decoding.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The payload ended inside a fixed-width field.
    #[error("payload truncated reading `{field}` (need {needed} bytes, {remaining} left)")]
    TruncatedPayload {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// The payload is shorter than the schema's fixed fields require.
    /// The frame passed its checksum, so this points at schema version
    /// skew between producer and consumer, not line corruption.
    #[error("payload does not match `{schema}` (fixed fields need {expected} bytes, got {actual})")]
    SchemaMismatch {
        schema: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A value is too long for its fixed-width field. Values are never
    /// silently truncated.
    #[error("field `{field}` is {len} bytes, max {max}")]
    OversizedField {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// A schema field has no value in the message being encoded.
    #[error("missing field `{field}`")]
    MissingField { field: &'static str },

    /// A field value's variant does not match the schema's field kind.
    #[error("field `{field}` expects a {expected} value")]
    ValueKindMismatch {
        field: &'static str,
        expected: &'static str,
    },

    /// No schema is registered for a message type being encoded.
    #[error("no schema registered for message type {msg_type:#06x}")]
    UnknownType { msg_type: u16 },

    /// Two schemas claim the same wire type identifier.
    #[error("duplicate message type {0:#06x}")]
    DuplicateTypeId(u16),

    /// A schema's field layout is internally inconsistent.
    #[error("malformed schema `{name}`: {reason}")]
    MalformedSchema {
        name: &'static str,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, SchemaError>;
