//! Build a file read request, frame it, and print the wire and JSON forms.

use flashlink::schema::{catalog, DecodedMessage};
use flashlink::wire::default_sender;

fn main() -> flashlink::Result<()> {
    let msg = DecodedMessage::new(catalog::MSG_FILE_READ_REQ, default_sender())
        .with_field("offset", 0u32)
        .with_field("chunk_size", 64u8)
        .with_field("filename", "config.ini");

    let wire = flashlink::encode_message(&msg)?;

    print!("wire ({} bytes):", wire.len());
    for byte in &wire {
        print!(" {byte:02x}");
    }
    println!();

    println!("json: {}", flashlink::to_json(&msg)?);
    Ok(())
}
