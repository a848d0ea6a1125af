//! Block hash type

use crate::error::PrimitiveError;
use std::fmt;

/// Length of a block hash in bytes
pub const HASH_LEN: usize = 32;

/// Block header hash
///
/// The digest itself is computed elsewhere. On the wire it travels as a
/// length-prefixed blob whose length must be exactly [`HASH_LEN`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockHash([u8; HASH_LEN]);

impl BlockHash {
    /// Size in bytes
    pub const LEN: usize = HASH_LEN;

    /// Zero hash
    pub const ZERO: BlockHash = BlockHash([0u8; HASH_LEN]);

    /// Create from bytes
    pub const fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
        BlockHash(bytes)
    }

    /// Create from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, PrimitiveError> {
        let bytes = <[u8; HASH_LEN]>::try_from(slice).map_err(|_| {
            PrimitiveError::InvalidLength {
                expected: HASH_LEN,
                got: slice.len(),
            }
        })?;
        Ok(BlockHash(bytes))
    }

    /// Parse from hex string (with or without 0x prefix)
    pub fn from_hex(s: &str) -> Result<Self, PrimitiveError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| PrimitiveError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; HASH_LEN]
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", self.to_hex())
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; HASH_LEN]> for BlockHash {
    fn from(bytes: [u8; HASH_LEN]) -> Self {
        BlockHash(bytes)
    }
}

impl AsRef<[u8]> for BlockHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

mod codec_impl {
    use super::*;
    use kestrel_codec::{CodecError, CodecResult, Decode, Encode, Reader, Writer};

    impl Encode for BlockHash {
        fn encode(&self, w: &mut Writer) {
            w.write_bytes(&self.0);
        }
    }

    impl Decode for BlockHash {
        fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
            let bytes = r.read_bytes_ref()?;
            <[u8; HASH_LEN]>::try_from(bytes)
                .map(BlockHash)
                .map_err(|_| CodecError::HashLengthMismatch {
                    expected: HASH_LEN,
                    got: bytes.len(),
                })
        }
    }
}
