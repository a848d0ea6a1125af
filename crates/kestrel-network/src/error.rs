//! Network error types

use kestrel_codec::CodecError;
use thiserror::Error;

/// Network errors
#[derive(Debug, Error)]
pub enum NetworkError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Message body failed to decode
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Frame length above the configured maximum
    #[error("frame of length {len} exceeds maximum {max}")]
    FrameTooLarge {
        /// Declared frame length
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Zero-length frame
    #[error("empty frame")]
    EmptyFrame,

    /// Peer closed the stream on a frame boundary
    #[error("connection closed")]
    ConnectionClosed,

    /// Peer closed the stream part way through a frame
    #[error("unexpected end of stream: needed {needed} bytes, got {got}")]
    UnexpectedEof {
        /// Bytes the frame still required
        needed: usize,
        /// Bytes received before the stream ended
        got: usize,
    },

    /// Peer did not complete the handshake in time
    #[error("handshake timed out")]
    HandshakeTimeout,

    /// Peer protocol version below our minimum
    #[error("incompatible protocol version: ours {ours}, theirs {theirs}")]
    IncompatibleVersion {
        /// Our minimum accepted version
        ours: u64,
        /// Version the peer announced
        theirs: u64,
    },

    /// Configuration could not be parsed
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl NetworkError {
    /// Check if a complete frame carried bytes that do not form a valid message
    ///
    /// Framing is intact after these, so callers typically drop the message
    /// and keep the connection. Everything else ends the connection.
    pub fn is_malformed(&self) -> bool {
        matches!(self, NetworkError::Codec(_))
    }
}

/// Result type for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;
