use bytes::BytesMut;
use serde_json::{json, Map, Value as JsonValue};

use flashlink_schema::{DecodedMessage, SchemaError, TypeRegistry, Value};
use flashlink_wire::encode_frame;

use crate::error::Result;

/// Render a message as a JSON object.
///
/// Emits `msg_type`, `sender`, the derived `length` and `crc`, and one key
/// per schema field. Fixed strings are trimmed of padding; byte arrays
/// become arrays of 0-255 integers, sidestepping any text-encoding
/// ambiguity.
pub fn to_value(msg: &DecodedMessage, registry: &TypeRegistry) -> Result<JsonValue> {
    let schema = registry
        .lookup(msg.msg_type())
        .ok_or(SchemaError::UnknownType {
            msg_type: msg.msg_type(),
        })?;

    let payload = schema.encode(msg)?;
    let mut framed = BytesMut::new();
    encode_frame(msg.msg_type(), msg.sender(), &payload, &mut framed)?;
    let crc = u16::from_le_bytes([framed[framed.len() - 2], framed[framed.len() - 1]]);

    let mut map = Map::new();
    map.insert("msg_type".to_string(), json!(msg.msg_type()));
    map.insert("sender".to_string(), json!(msg.sender()));
    map.insert("length".to_string(), json!(payload.len()));
    map.insert("crc".to_string(), json!(crc));

    for def in schema.fields {
        let value = msg
            .field(def.name)
            .ok_or(SchemaError::MissingField { field: def.name })?;
        map.insert(def.name.to_string(), field_to_json(value));
    }

    Ok(JsonValue::Object(map))
}

/// Render a message as JSON text.
pub fn to_json(msg: &DecodedMessage, registry: &TypeRegistry) -> Result<String> {
    Ok(serde_json::to_string(&to_value(msg, registry)?)?)
}

fn field_to_json(value: &Value) -> JsonValue {
    match value {
        Value::U8(v) => json!(v),
        Value::U16(v) => json!(v),
        Value::U32(v) => json!(v),
        Value::Str(s) => json!(s.trimmed()),
        Value::Bytes(b) => json!(b),
    }
}
