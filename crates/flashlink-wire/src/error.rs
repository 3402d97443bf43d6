/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Fewer bytes are available than the frame header declares.
    ///
    /// On a live stream this means "feed more bytes", not corruption.
    #[error("incomplete frame ({available} of {needed} bytes)")]
    IncompleteFrame { needed: usize, available: usize },

    /// The trailing CRC disagrees with the CRC computed over the frame.
    #[error("checksum mismatch (stored {stored:#06x}, computed {computed:#06x})")]
    ChecksumMismatch { stored: u16, computed: u16 },

    /// The payload does not fit the one-byte length field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, WireError>;
