use std::io::{ErrorKind, Read};

use bytes::BytesMut;
use tracing::debug;

use crate::codec::{decode_frame, Frame};
use crate::error::{Result, WireError};

const INITIAL_BUFFER_CAPACITY: usize = 1024;
const READ_CHUNK_SIZE: usize = 1024;

/// Reads complete frames from any `Read` stream.
///
/// Handles partial reads internally — callers always get complete,
/// checksum-verified frames.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Read the next complete frame (blocking).
    ///
    /// Returns `Err(WireError::ConnectionClosed)` when EOF is reached. A
    /// checksum failure is surfaced as-is with the offending bytes still
    /// buffered; recovering the stream is the caller's decision.
    pub fn read_frame(&mut self) -> Result<Frame> {
        loop {
            match decode_frame(&mut self.buf) {
                Ok(Some(frame)) => return Ok(frame),
                Ok(None) => {}
                Err(err) => {
                    debug!(buffered = self.buf.len(), "rejecting corrupt frame");
                    return Err(err);
                }
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(WireError::Io(err)),
            };

            if read == 0 {
                return Err(WireError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bytes::BytesMut;

    use super::*;
    use crate::codec::encode_frame;

    #[test]
    fn read_single_frame() {
        let mut wire = BytesMut::new();
        encode_frame(0x00A8, 0x42, b"hello", &mut wire).unwrap();

        let mut reader = FrameReader::new(Cursor::new(wire.to_vec()));
        let frame = reader.read_frame().unwrap();

        assert_eq!(frame.msg_type, 0x00A8);
        assert_eq!(frame.sender, 0x42);
        assert_eq!(frame.payload.as_ref(), b"hello");
    }

    #[test]
    fn read_multiple_frames() {
        let mut wire = BytesMut::new();
        encode_frame(1, 7, b"one", &mut wire).unwrap();
        encode_frame(2, 7, b"two", &mut wire).unwrap();
        encode_frame(3, 7, b"three", &mut wire).unwrap();

        let mut reader = FrameReader::new(Cursor::new(wire.to_vec()));

        let f1 = reader.read_frame().unwrap();
        let f2 = reader.read_frame().unwrap();
        let f3 = reader.read_frame().unwrap();

        assert_eq!((f1.msg_type, f1.payload.as_ref()), (1, b"one".as_ref()));
        assert_eq!((f2.msg_type, f2.payload.as_ref()), (2, b"two".as_ref()));
        assert_eq!((f3.msg_type, f3.payload.as_ref()), (3, b"three".as_ref()));
    }

    #[test]
    fn partial_read_handling() {
        let mut wire = BytesMut::new();
        encode_frame(4, 9, b"slow", &mut wire).unwrap();

        let byte_reader = ByteByByteReader {
            bytes: wire.to_vec(),
            pos: 0,
        };
        let mut reader = FrameReader::new(byte_reader);

        let frame = reader.read_frame().unwrap();
        assert_eq!(frame.msg_type, 4);
        assert_eq!(frame.payload.as_ref(), b"slow");
    }

    #[test]
    fn connection_closed_cleanly() {
        let mut reader = FrameReader::new(Cursor::new(Vec::<u8>::new()));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, WireError::ConnectionClosed));
    }

    #[test]
    fn connection_closed_mid_frame() {
        let mut wire = BytesMut::new();
        encode_frame(2, 9, b"only-part", &mut wire).unwrap();
        wire.truncate(wire.len() - 4);

        let mut reader = FrameReader::new(Cursor::new(wire.to_vec()));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, WireError::ConnectionClosed));
    }

    #[test]
    fn corrupt_frame_in_stream() {
        let mut wire = BytesMut::new();
        encode_frame(5, 9, b"payload", &mut wire).unwrap();
        let mid = wire.len() / 2;
        wire[mid] ^= 0x01;

        let mut reader = FrameReader::new(Cursor::new(wire.to_vec()));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, WireError::ChecksumMismatch { .. }));
    }

    #[test]
    fn interrupted_read_retries() {
        let mut wire = BytesMut::new();
        encode_frame(8, 9, b"ok", &mut wire).unwrap();

        let reader = InterruptedThenData {
            state: 0,
            bytes: wire.to_vec(),
            pos: 0,
        };
        let mut framed = FrameReader::new(reader);
        let frame = framed.read_frame().unwrap();

        assert_eq!(frame.msg_type, 8);
        assert_eq!(frame.payload.as_ref(), b"ok");
    }

    #[test]
    fn io_error_propagates() {
        let mut wire = BytesMut::new();
        encode_frame(7, 9, b"ok", &mut wire).unwrap();

        let reader = WouldBlockThenData {
            state: 0,
            bytes: wire.to_vec(),
            pos: 0,
        };
        let mut framed = FrameReader::new(reader);
        let err = framed.read_frame().unwrap_err();
        assert!(matches!(err, WireError::Io(e) if e.kind() == ErrorKind::WouldBlock));
    }

    #[test]
    fn accessors_and_into_inner() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut reader = FrameReader::new(cursor);

        let _ = reader.get_ref();
        let _ = reader.get_mut();
        let _inner = reader.into_inner();
    }

    #[test]
    #[cfg(unix)]
    fn roundtrip_over_pipe() {
        let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();
        let mut writer = crate::writer::FrameWriter::new(left);
        let mut reader = FrameReader::new(right);

        writer.send(0x00A9, 0x42, b"ping").unwrap();
        let frame = reader.read_frame().unwrap();

        assert_eq!(frame.msg_type, 0x00A9);
        assert_eq!(frame.sender, 0x42);
        assert_eq!(frame.payload.as_ref(), b"ping");
    }

    #[derive(Debug)]
    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }

            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct InterruptedThenData {
        state: u8,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.state == 0 {
                self.state = 1;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            if self.pos >= self.bytes.len() {
                return Ok(0);
            }
            let remaining = self.bytes.len() - self.pos;
            let n = remaining.min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    struct WouldBlockThenData {
        state: u8,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for WouldBlockThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.state == 0 {
                self.state = 1;
                return Err(std::io::Error::from(ErrorKind::WouldBlock));
            }
            if self.pos >= self.bytes.len() {
                return Ok(0);
            }
            let remaining = self.bytes.len() - self.pos;
            let n = remaining.min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }
}
