//! Codec error types

use thiserror::Error;

/// Decoding error
///
/// Every variant aborts decoding of the current message; no partial value is
/// ever returned alongside one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Buffer ended before a declared or implied length was satisfied
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        /// Bytes the decoder tried to consume
        needed: usize,
        /// Bytes left in the buffer
        remaining: usize,
    },

    /// Union tag outside the defined range
    #[error("unknown {kind} variant tag: {tag}")]
    UnknownVariant {
        /// Union being decoded
        kind: &'static str,
        /// Offending tag byte
        tag: u8,
    },

    /// Fixed-length address field of the wrong size
    #[error("malformed address: expected {expected} octets, got {got}")]
    MalformedAddress {
        /// Fixed octet count of the address family
        expected: usize,
        /// Octets available
        got: usize,
    },

    /// Block hash body does not match the fixed hash length
    #[error("block hash length mismatch: expected {expected} bytes, got {got}")]
    HashLengthMismatch {
        /// Required hash length
        expected: usize,
        /// Declared body length
        got: usize,
    },

    /// List or blob length exceeds the configured maximum
    #[error("{kind} length {declared} exceeds maximum {max}")]
    LengthOverflow {
        /// `"list"` or `"bytes"`
        kind: &'static str,
        /// Length read from the wire or about to be written
        declared: usize,
        /// Configured ceiling
        max: usize,
    },

    /// Bytes left over after a complete message
    #[error("{remaining} trailing bytes after message")]
    TrailingBytes {
        /// Unconsumed byte count
        remaining: usize,
    },
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
