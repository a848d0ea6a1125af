//! Network configuration

use crate::error::NetworkResult;
use crate::version::PROTOCOL_VERSION;
use kestrel_codec::CodecConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest frame accepted from a peer (16 MiB)
pub const DEFAULT_MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Protocol configuration for a connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Decoder limits for message bodies
    #[serde(default)]
    pub codec: CodecConfig,
    /// Largest frame body accepted before buffering
    #[serde(default = "default_max_frame_len")]
    pub max_frame_len: usize,
    /// Handshake deadline in milliseconds
    #[serde(default = "default_handshake_timeout_ms")]
    pub handshake_timeout_ms: u64,
    /// Lowest peer protocol version accepted during the handshake
    #[serde(default = "default_min_version")]
    pub min_version: u64,
}

fn default_max_frame_len() -> usize {
    DEFAULT_MAX_FRAME_LEN
}

fn default_handshake_timeout_ms() -> u64 {
    5_000
}

fn default_min_version() -> u64 {
    PROTOCOL_VERSION
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            codec: CodecConfig::default(),
            max_frame_len: default_max_frame_len(),
            handshake_timeout_ms: default_handshake_timeout_ms(),
            min_version: default_min_version(),
        }
    }
}

impl NetworkConfig {
    /// Parse from JSON, filling unspecified fields with defaults
    pub fn from_json(s: &str) -> NetworkResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Handshake deadline
    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_millis(self.handshake_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NetworkConfig::default();
        assert_eq!(config.max_frame_len, 16 * 1024 * 1024);
        assert_eq!(config.handshake_timeout(), Duration::from_secs(5));
        assert_eq!(config.min_version, PROTOCOL_VERSION);
        assert_eq!(config.codec, CodecConfig::default());
    }

    #[test]
    fn test_from_json_partial() {
        let config = NetworkConfig::from_json(
            r#"{"max_frame_len": 1024, "codec": {"max_list_len": 10}}"#,
        )
        .unwrap();
        assert_eq!(config.max_frame_len, 1024);
        assert_eq!(config.codec.max_list_len, 10);
        assert_eq!(config.codec.max_bytes_len, kestrel_codec::DEFAULT_MAX_BYTES_LEN);
        assert_eq!(config.handshake_timeout_ms, 5_000);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(NetworkConfig::from_json("{\"max_frame_len\": \"big\"}").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = NetworkConfig {
            handshake_timeout_ms: 250,
            min_version: 3,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(NetworkConfig::from_json(&json).unwrap(), config);
    }
}
