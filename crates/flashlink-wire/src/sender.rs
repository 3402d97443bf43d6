//! Process-wide sender identity.
//!
//! Frames carry the ID of the endpoint that produced them. Callers that
//! don't pass one explicitly get the process-wide identity, which can be
//! overridden once at startup before any frames are built.

use std::sync::OnceLock;

/// Sender identity used when no override has been configured.
pub const DEFAULT_SENDER: u16 = 0x42;

static PROCESS_SENDER: OnceLock<u16> = OnceLock::new();

/// Configure the process-wide sender identity.
///
/// Takes effect only once; returns `false` if an identity was already
/// configured (the earlier value stays in place).
pub fn set_default_sender(id: u16) -> bool {
    PROCESS_SENDER.set(id).is_ok()
}

/// The process-wide sender identity, falling back to [`DEFAULT_SENDER`].
pub fn default_sender() -> u16 {
    PROCESS_SENDER.get().copied().unwrap_or(DEFAULT_SENDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests share one process; a single test exercises the whole
    // set-once lifecycle to avoid ordering surprises.
    #[test]
    fn set_once_then_read_only() {
        assert_eq!(default_sender(), DEFAULT_SENDER);

        assert!(set_default_sender(0x1234));
        assert_eq!(default_sender(), 0x1234);

        assert!(!set_default_sender(0x5678));
        assert_eq!(default_sender(), 0x1234);
    }
}
