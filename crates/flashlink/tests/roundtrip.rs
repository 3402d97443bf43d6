//! End-to-end flows through framing, schema dispatch, and JSON replay.

use std::io::Cursor;

use flashlink::schema::{catalog, DecodeOutcome, DecodedMessage, Value};
use flashlink::wire::{parse_frame, Frame, FrameReader, FrameWriter};

#[test]
fn read_request_end_to_end() {
    let msg = DecodedMessage::new(catalog::MSG_FILE_READ_REQ, 0x42)
        .with_field("offset", 1024u32)
        .with_field("chunk_size", 64u8)
        .with_field("filename", "log.txt");

    let wire = flashlink::encode_message(&msg).unwrap();
    let outcome = flashlink::decode_bytes(&wire).unwrap();

    let DecodeOutcome::Message(decoded) = outcome else {
        panic!("expected a registered message")
    };
    assert_eq!(decoded.msg_type(), catalog::MSG_FILE_READ_REQ);
    assert_eq!(decoded.sender(), 0x42);
    assert_eq!(decoded.field("offset"), Some(&Value::U32(1024)));
    assert_eq!(decoded.field("chunk_size"), Some(&Value::U8(64)));
    assert_eq!(
        decoded.field("filename").unwrap().as_str().unwrap(),
        "log.txt"
    );
    assert_eq!(decoded, msg);
}

#[test]
fn write_request_json_replay_matches_wire_bytes() {
    let msg = DecodedMessage::new(catalog::MSG_FILE_WRITE_REQ, 0x42)
        .with_field("filename", "out.bin")
        .with_field("offset", 0u32)
        .with_field("data", vec![1u8, 2, 3, 255]);

    let wire = flashlink::encode_message(&msg).unwrap();

    let text = flashlink::to_json(&msg).unwrap();
    let replayed =
        flashlink::json::frame_from_json(&text, flashlink::schema::builtin_registry()).unwrap();

    assert_eq!(replayed, wire);
}

#[test]
fn unknown_type_keeps_raw_frame() {
    let frame = Frame::new(0x0777, 0x42, vec![0xDE, 0xAD, 0xBE, 0xEF]);
    let mut buf = bytes::BytesMut::new();
    flashlink::wire::encode_frame(frame.msg_type, frame.sender, &frame.payload, &mut buf).unwrap();

    let outcome = flashlink::decode_bytes(&buf).unwrap();
    assert_eq!(outcome, DecodeOutcome::Unknown(frame));
}

#[test]
fn corrupted_wire_bytes_rejected() {
    let msg = DecodedMessage::new(catalog::MSG_FILE_REMOVE, 0x42).with_field("filename", "a.txt");

    let mut wire = flashlink::encode_message(&msg).unwrap();
    wire[6] ^= 0x20;

    let err = flashlink::decode_bytes(&wire).unwrap_err();
    assert!(matches!(
        err,
        flashlink::Error::Wire(flashlink::wire::WireError::ChecksumMismatch { .. })
    ));
}

#[test]
fn truncated_wire_bytes_need_more() {
    let msg = DecodedMessage::new(catalog::MSG_FILE_REMOVE, 0x42).with_field("filename", "a.txt");

    let wire = flashlink::encode_message(&msg).unwrap();
    let err = flashlink::decode_bytes(&wire[..wire.len() - 1]).unwrap_err();
    assert!(matches!(
        err,
        flashlink::Error::Wire(flashlink::wire::WireError::IncompleteFrame { .. })
    ));
}

#[test]
fn directory_listing_over_a_stream() {
    // Device-side chunked listing: NULL-delimited names, 0xFF entry ends
    // the list.
    let mut listing = Vec::new();
    listing.extend_from_slice(b"boot.cfg\0firmware.bin\0");
    listing.push(0xFF);

    let resp = DecodedMessage::new(catalog::MSG_FILE_READ_DIR_RESP, 0x01)
        .with_field("offset", 0u32)
        .with_field("dirname", "/data")
        .with_field("contents", listing.clone());

    let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()));
    let payload = flashlink::schema::builtin_registry().encode(&resp).unwrap();
    writer
        .send(catalog::MSG_FILE_READ_DIR_RESP, 0x01, &payload)
        .unwrap();

    let wire = writer.into_inner().into_inner();
    let mut reader = FrameReader::new(Cursor::new(wire));
    let frame = reader.read_frame().unwrap();

    let outcome = flashlink::decode_message(frame).unwrap();
    let DecodeOutcome::Message(decoded) = outcome else {
        panic!("expected a registered message")
    };
    assert_eq!(decoded.field("contents"), Some(&Value::Bytes(listing)));
    assert_eq!(decoded.field("dirname").unwrap().as_str().unwrap(), "/data");
}

#[test]
fn json_from_hand_written_text() {
    let text = r#"{
        "msg_type": 168,
        "sender": 66,
        "offset": 0,
        "chunk_size": 32,
        "filename": "boot.cfg"
    }"#;

    let msg = flashlink::from_json(text).unwrap();
    let wire = flashlink::encode_message(&msg).unwrap();
    let frame = parse_frame(&wire).unwrap();

    assert_eq!(frame.msg_type, catalog::MSG_FILE_READ_REQ);
    assert_eq!(frame.sender, 66);
    assert_eq!(frame.payload.len(), 25);
}

#[test]
fn write_response_echoes_request_payload() {
    let req = DecodedMessage::new(catalog::MSG_FILE_WRITE_REQ, 0x42)
        .with_field("filename", "cal.dat")
        .with_field("offset", 128u32)
        .with_field("data", vec![7u8; 32]);

    let req_payload = flashlink::schema::builtin_registry().encode(&req).unwrap();

    // The device acknowledges a write by echoing the request payload under
    // the response type id.
    let echo = Frame::new(catalog::MSG_FILE_WRITE_RESP, 0x01, req_payload);
    let DecodeOutcome::Message(resp) = flashlink::decode_message(echo).unwrap() else {
        panic!("expected a registered message")
    };

    assert_eq!(resp.field("filename"), req.field("filename"));
    assert_eq!(resp.field("offset"), req.field("offset"));
    assert_eq!(resp.field("data"), req.field("data"));
}
