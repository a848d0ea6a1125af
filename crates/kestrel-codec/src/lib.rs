//! # kestrel-codec
//!
//! Binary encoding/decoding primitives for the Kestrel wire protocol.
//!
//! ## Encoding Rules
//!
//! - Integers: fixed width, little-endian (`u8`, `u16`, `u32`, `u64`)
//! - Byte blob: `[u32 length][bytes]`
//! - List: `[u32 count][element]*count`
//! - Fixed arrays (addresses): raw bytes, no prefix
//!
//! Decoding is bounded by [`CodecConfig`]: declared lengths above the
//! configured ceilings are rejected before anything is allocated.
//!
//! ## Usage
//!
//! ```
//! use kestrel_codec::{decode, encode, CodecError};
//!
//! let bytes = encode(&0x0102_0304u32);
//! assert_eq!(&bytes[..], &[4, 3, 2, 1]);
//! assert_eq!(decode::<u32>(&bytes).unwrap(), 0x0102_0304);
//!
//! assert!(matches!(
//!     decode::<u32>(&bytes[..3]),
//!     Err(CodecError::TruncatedInput { .. })
//! ));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod reader;
mod writer;

pub use config::{CodecConfig, DEFAULT_MAX_BYTES_LEN, DEFAULT_MAX_LIST_LEN};
pub use error::{CodecError, CodecResult};
pub use reader::Reader;
pub use writer::Writer;

use bytes::Bytes;

/// Types with a wire encoding
pub trait Encode {
    /// Append the encoding of `self` to `w`
    fn encode(&self, w: &mut Writer);

    /// Check that a peer decoding under `config` would accept `self`
    ///
    /// Types carrying blobs or lists override this; fixed-width types keep
    /// the default.
    fn check_limits(&self, _config: &CodecConfig) -> CodecResult<()> {
        Ok(())
    }
}

/// Types decodable from the wire
pub trait Decode: Sized {
    /// Decode one value from `r`
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self>;
}

/// Encode a value to bytes
pub fn encode<T: Encode + ?Sized>(value: &T) -> Bytes {
    let mut w = Writer::new();
    value.encode(&mut w);
    w.freeze()
}

/// Encode a value after checking it against the peer's decoder limits
///
/// Fails with [`CodecError::LengthOverflow`] instead of producing bytes the
/// receiving side would reject.
pub fn encode_with<T: Encode + ?Sized>(value: &T, config: &CodecConfig) -> CodecResult<Bytes> {
    value.check_limits(config)?;
    Ok(encode(value))
}

/// Decode a complete message with default limits
pub fn decode<T: Decode>(data: &[u8]) -> CodecResult<T> {
    decode_with(data, &CodecConfig::default())
}

/// Decode a complete message with explicit limits
///
/// Fails with [`CodecError::TrailingBytes`] if `data` holds more than one value.
pub fn decode_with<T: Decode>(data: &[u8], config: &CodecConfig) -> CodecResult<T> {
    let mut r = Reader::new(data, config);
    let value = T::decode(&mut r)?;
    r.finish()?;
    Ok(value)
}

macro_rules! impl_uint {
    ($($ty:ty => $write:ident, $read:ident;)*) => {
        $(
            impl Encode for $ty {
                fn encode(&self, w: &mut Writer) {
                    w.$write(*self);
                }
            }

            impl Decode for $ty {
                fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
                    r.$read()
                }
            }
        )*
    };
}

impl_uint! {
    u8 => write_u8, read_u8;
    u16 => write_u16, read_u16;
    u32 => write_u32, read_u32;
    u64 => write_u64, read_u64;
}
