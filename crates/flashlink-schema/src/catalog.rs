//! Built-in catalog of remote file-system messages.
//!
//! Type identifiers live in the implementation-defined range
//! 0x0000-0x00FF. Each layout mirrors the device firmware's parser
//! byte for byte; filenames and directory names are NULL-padded to 20
//! bytes on the wire.

use std::sync::OnceLock;

use crate::field::FieldKind;
use crate::message::{FieldDef, MessageSchema};
use crate::registry::TypeRegistry;

/// Read up to 255 bytes from an offset into a file.
pub const MSG_FILE_READ_REQ: u16 = 0x00A8;
/// Data returned for a file read, length field tells how much was read.
pub const MSG_FILE_READ_RESP: u16 = 0x00A3;
/// List a directory, skipping the first `offset` entries.
pub const MSG_FILE_READ_DIR_REQ: u16 = 0x00A9;
/// Chunk of a NULL-delimited directory listing; an entry of just 0xFF
/// marks the end of the list.
pub const MSG_FILE_READ_DIR_RESP: u16 = 0x00AA;
/// Delete a file from the file system.
pub const MSG_FILE_REMOVE: u16 = 0x00AC;
/// Write up to 255 bytes of data at an offset into a file.
pub const MSG_FILE_WRITE_REQ: u16 = 0x00AD;
/// Echo of a write request so the host can check write integrity.
pub const MSG_FILE_WRITE_RESP: u16 = 0x00AB;

const NAME_WIDTH: usize = 20;

pub const FILE_READ_REQ: MessageSchema = MessageSchema {
    name: "file_read_req",
    msg_type: MSG_FILE_READ_REQ,
    fields: &[
        FieldDef {
            name: "offset",
            kind: FieldKind::U32,
        },
        FieldDef {
            name: "chunk_size",
            kind: FieldKind::U8,
        },
        FieldDef {
            name: "filename",
            kind: FieldKind::FixedString { width: NAME_WIDTH },
        },
    ],
};

pub const FILE_READ_RESP: MessageSchema = MessageSchema {
    name: "file_read_resp",
    msg_type: MSG_FILE_READ_RESP,
    fields: &[
        FieldDef {
            name: "offset",
            kind: FieldKind::U32,
        },
        FieldDef {
            name: "chunk_size",
            kind: FieldKind::U8,
        },
        FieldDef {
            name: "filename",
            kind: FieldKind::FixedString { width: NAME_WIDTH },
        },
        FieldDef {
            name: "contents",
            kind: FieldKind::TrailingBytes,
        },
    ],
};

pub const FILE_READ_DIR_REQ: MessageSchema = MessageSchema {
    name: "file_read_dir_req",
    msg_type: MSG_FILE_READ_DIR_REQ,
    fields: &[
        FieldDef {
            name: "offset",
            kind: FieldKind::U32,
        },
        FieldDef {
            name: "dirname",
            kind: FieldKind::FixedString { width: NAME_WIDTH },
        },
    ],
};

pub const FILE_READ_DIR_RESP: MessageSchema = MessageSchema {
    name: "file_read_dir_resp",
    msg_type: MSG_FILE_READ_DIR_RESP,
    fields: &[
        FieldDef {
            name: "offset",
            kind: FieldKind::U32,
        },
        FieldDef {
            name: "dirname",
            kind: FieldKind::FixedString { width: NAME_WIDTH },
        },
        FieldDef {
            name: "contents",
            kind: FieldKind::TrailingBytes,
        },
    ],
};

pub const FILE_REMOVE: MessageSchema = MessageSchema {
    name: "file_remove",
    msg_type: MSG_FILE_REMOVE,
    fields: &[FieldDef {
        name: "filename",
        kind: FieldKind::FixedString { width: NAME_WIDTH },
    }],
};

pub const FILE_WRITE_REQ: MessageSchema = MessageSchema {
    name: "file_write_req",
    msg_type: MSG_FILE_WRITE_REQ,
    fields: &[
        FieldDef {
            name: "filename",
            kind: FieldKind::FixedString { width: NAME_WIDTH },
        },
        FieldDef {
            name: "offset",
            kind: FieldKind::U32,
        },
        FieldDef {
            name: "data",
            kind: FieldKind::TrailingBytes,
        },
    ],
};

pub const FILE_WRITE_RESP: MessageSchema = MessageSchema {
    name: "file_write_resp",
    msg_type: MSG_FILE_WRITE_RESP,
    fields: &[
        FieldDef {
            name: "filename",
            kind: FieldKind::FixedString { width: NAME_WIDTH },
        },
        FieldDef {
            name: "offset",
            kind: FieldKind::U32,
        },
        FieldDef {
            name: "data",
            kind: FieldKind::TrailingBytes,
        },
    ],
};

/// Every schema in the built-in catalog.
pub const BUILTIN_SCHEMAS: &[MessageSchema] = &[
    FILE_READ_REQ,
    FILE_READ_RESP,
    FILE_READ_DIR_REQ,
    FILE_READ_DIR_RESP,
    FILE_REMOVE,
    FILE_WRITE_REQ,
    FILE_WRITE_RESP,
];

/// The process-wide registry holding the built-in catalog.
///
/// Initialized on first use; read-only afterwards, so concurrent decodes
/// need no synchronization. Panics if the compiled-in catalog is
/// inconsistent — that is a build defect, not a runtime condition.
pub fn builtin_registry() -> &'static TypeRegistry {
    static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut registry = TypeRegistry::new();
        for schema in BUILTIN_SCHEMAS {
            registry
                .register(*schema)
                .expect("built-in catalog is well-formed");
        }
        registry
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Value;

    #[test]
    fn catalog_registers_every_message() {
        let registry = builtin_registry();
        assert_eq!(
            registry.msg_types(),
            vec![0x00A3, 0x00A8, 0x00A9, 0x00AA, 0x00AB, 0x00AC, 0x00AD]
        );
    }

    #[test]
    fn read_req_layout() {
        assert_eq!(FILE_READ_REQ.fixed_size(), 25);
        assert!(!FILE_READ_REQ.has_trailing());
        assert!(FILE_READ_RESP.has_trailing());
    }

    #[test]
    fn read_req_decodes_firmware_layout() {
        // offset=1024 LE, chunk_size=64, "log.txt" NULL-padded to 20.
        let mut payload = vec![0x00, 0x04, 0x00, 0x00, 0x40];
        payload.extend_from_slice(b"log.txt");
        payload.extend_from_slice(&[0u8; 13]);

        let fields = FILE_READ_REQ.decode(&payload).unwrap();
        assert_eq!(fields["offset"], Value::U32(1024));
        assert_eq!(fields["chunk_size"], Value::U8(64));
        assert_eq!(fields["filename"].as_str().unwrap(), "log.txt");
    }

    #[test]
    fn write_req_places_filename_first() {
        let mut payload = Vec::new();
        payload.extend_from_slice(b"data.bin");
        payload.extend_from_slice(&[0u8; 12]);
        payload.extend_from_slice(&[0x00, 0x01, 0x00, 0x00]);
        payload.extend_from_slice(&[0xDE, 0xAD]);

        let fields = FILE_WRITE_REQ.decode(&payload).unwrap();
        assert_eq!(fields["filename"].as_str().unwrap(), "data.bin");
        assert_eq!(fields["offset"], Value::U32(256));
        assert_eq!(fields["data"], Value::Bytes(vec![0xDE, 0xAD]));
    }
}
