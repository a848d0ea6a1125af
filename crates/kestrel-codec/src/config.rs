//! Decoder limits

use crate::error::{CodecError, CodecResult};
use serde::{Deserialize, Serialize};

/// Maximum element count of a decoded list
pub const DEFAULT_MAX_LIST_LEN: usize = 65_536;

/// Maximum length of a decoded byte blob (16 MiB)
pub const DEFAULT_MAX_BYTES_LEN: usize = 16 * 1024 * 1024;

/// Limits applied while decoding untrusted input
///
/// Lengths travel as `u32`, so ceilings above `u32::MAX` act as `u32::MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Largest list count accepted before allocating
    #[serde(default = "default_max_list_len")]
    pub max_list_len: usize,
    /// Largest blob length accepted before allocating
    #[serde(default = "default_max_bytes_len")]
    pub max_bytes_len: usize,
}

fn default_max_list_len() -> usize {
    DEFAULT_MAX_LIST_LEN
}

fn default_max_bytes_len() -> usize {
    DEFAULT_MAX_BYTES_LEN
}

fn check_len(kind: &'static str, declared: usize, max: usize) -> CodecResult<()> {
    if declared > max {
        return Err(CodecError::LengthOverflow {
            kind,
            declared,
            max,
        });
    }
    Ok(())
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_list_len: default_max_list_len(),
            max_bytes_len: default_max_bytes_len(),
        }
    }
}

impl CodecConfig {
    /// Effective blob ceiling
    pub fn bytes_limit(&self) -> usize {
        self.max_bytes_len.min(u32::MAX as usize)
    }

    /// Effective list ceiling
    pub fn list_limit(&self) -> usize {
        self.max_list_len.min(u32::MAX as usize)
    }

    /// Fail with `LengthOverflow` if a blob of `len` bytes would be refused
    pub fn check_bytes_len(&self, len: usize) -> CodecResult<()> {
        check_len("bytes", len, self.bytes_limit())
    }

    /// Fail with `LengthOverflow` if a list of `len` elements would be refused
    pub fn check_list_len(&self, len: usize) -> CodecResult<()> {
        check_len("list", len, self.list_limit())
    }

    /// Override the list ceiling
    pub fn with_max_list_len(mut self, max_list_len: usize) -> Self {
        self.max_list_len = max_list_len;
        self
    }

    /// Override the blob ceiling
    pub fn with_max_bytes_len(mut self, max_bytes_len: usize) -> Self {
        self.max_bytes_len = max_bytes_len;
        self
    }
}
