use flashlink_schema::SchemaError;
use flashlink_wire::WireError;

/// Errors from the JSON bridge.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    /// Re-encoding through the message schema failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Reframing the payload failed.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an object.
    #[error("expected a JSON object")]
    NotAnObject,

    /// A required envelope key is absent.
    #[error("missing key `{key}`")]
    MissingKey { key: &'static str },

    /// A value does not fit its field's type or range.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, JsonError>;
