use bytes::BytesMut;
use serde_json::{Map, Value as JsonValue};

use flashlink_schema::{DecodedMessage, FieldKind, FixedStr, SchemaError, TypeRegistry, Value};
use flashlink_wire::{default_sender, encode_frame};

use crate::error::{JsonError, Result};

/// Rebuild a message from its JSON object form.
///
/// Requires `msg_type` and every schema field; a missing `sender` falls
/// back to the process-wide sender identity. `length` and `crc` keys are
/// ignored — they are derived values and always recomputed. Unknown keys
/// are ignored.
pub fn from_value(value: &JsonValue, registry: &TypeRegistry) -> Result<DecodedMessage> {
    let obj = value.as_object().ok_or(JsonError::NotAnObject)?;

    let msg_type = parse_u16(obj, "msg_type")?.ok_or(JsonError::MissingKey { key: "msg_type" })?;
    let sender = parse_u16(obj, "sender")?.unwrap_or_else(default_sender);

    let schema = registry
        .lookup(msg_type)
        .ok_or(SchemaError::UnknownType { msg_type })?;

    let mut msg = DecodedMessage::new(msg_type, sender);
    for def in schema.fields {
        let raw = obj
            .get(def.name)
            .ok_or(SchemaError::MissingField { field: def.name })?;
        msg.set(def.name, json_to_field(def.name, def.kind, raw)?);
    }

    Ok(msg)
}

/// Rebuild a message from JSON text.
pub fn from_json(text: &str, registry: &TypeRegistry) -> Result<DecodedMessage> {
    let value: JsonValue = serde_json::from_str(text)?;
    from_value(&value, registry)
}

/// Reconstruct the framed wire bytes from a JSON representation.
///
/// The payload is re-encoded through the message schema and reframed with
/// a fresh checksum, reproducing the bytes the message originally went
/// over the wire as.
pub fn frame_from_json(text: &str, registry: &TypeRegistry) -> Result<Vec<u8>> {
    let msg = from_json(text, registry)?;
    let payload = registry.encode(&msg)?;

    let mut framed = BytesMut::new();
    encode_frame(msg.msg_type(), msg.sender(), &payload, &mut framed)?;
    Ok(framed.to_vec())
}

fn parse_u16(obj: &Map<String, JsonValue>, key: &'static str) -> Result<Option<u16>> {
    let Some(raw) = obj.get(key) else {
        return Ok(None);
    };
    let v = parse_int(key, raw, u64::from(u16::MAX))?;
    Ok(Some(v as u16))
}

fn json_to_field(field: &'static str, kind: FieldKind, raw: &JsonValue) -> Result<Value> {
    match kind {
        FieldKind::U8 => Ok(Value::U8(parse_int(field, raw, u64::from(u8::MAX))? as u8)),
        FieldKind::U16 => Ok(Value::U16(parse_int(field, raw, u64::from(u16::MAX))? as u16)),
        FieldKind::U32 => Ok(Value::U32(parse_int(field, raw, u64::from(u32::MAX))? as u32)),
        FieldKind::FixedString { width } => {
            let s = raw.as_str().ok_or_else(|| JsonError::InvalidField {
                field,
                reason: "expected a string".to_string(),
            })?;
            if s.len() > width {
                return Err(SchemaError::OversizedField {
                    field,
                    len: s.len(),
                    max: width,
                }
                .into());
            }
            Ok(Value::Str(FixedStr::new(s)))
        }
        FieldKind::TrailingBytes => {
            let items = raw.as_array().ok_or_else(|| JsonError::InvalidField {
                field,
                reason: "expected an array of bytes".to_string(),
            })?;
            let mut bytes = Vec::with_capacity(items.len());
            for item in items {
                bytes.push(parse_int(field, item, u64::from(u8::MAX))? as u8);
            }
            Ok(Value::Bytes(bytes))
        }
    }
}

fn parse_int(field: &'static str, raw: &JsonValue, max: u64) -> Result<u64> {
    let v = raw.as_u64().ok_or_else(|| JsonError::InvalidField {
        field,
        reason: "expected an unsigned integer".to_string(),
    })?;
    if v > max {
        return Err(JsonError::InvalidField {
            field,
            reason: format!("{v} exceeds the field maximum {max}"),
        });
    }
    Ok(v)
}
