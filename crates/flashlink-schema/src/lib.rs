//! Schema-driven payload codec and message type registry.
//!
//! A message layout is data: an ordered list of named, typed field
//! descriptors. One generic driver walks a layout to decode or encode any
//! payload, and a read-only registry dispatches incoming frames by wire
//! type identifier. Adding a message kind means adding a schema value, not
//! codec logic.

pub mod catalog;
pub mod error;
pub mod field;
pub mod message;
pub mod registry;

pub use catalog::builtin_registry;
pub use error::{Result, SchemaError};
pub use field::{FieldKind, FixedStr, Value};
pub use message::{DecodedMessage, FieldDef, MessageSchema};
pub use registry::{DecodeOutcome, TypeRegistry};
