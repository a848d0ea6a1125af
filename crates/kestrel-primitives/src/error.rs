//! Common error types for primitives

use thiserror::Error;

/// Primitive construction error
///
/// Wire decoding reports [`kestrel_codec::CodecError`] instead; this type
/// covers building values from text or untyped slices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    /// Invalid length
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Supplied length
        got: usize,
    },
}
