//! Length-prefixed frame codec
//!
//! Wire format: `[u32 length][body]`, length little-endian and excluding
//! itself. Use with [`FramedRead`](tokio_util::codec::FramedRead) and
//! [`FramedWrite`](tokio_util::codec::FramedWrite); bodies are decoded by the
//! caller so that one malformed message does not end the stream.

use crate::config::NetworkConfig;
use crate::error::{NetworkError, NetworkResult};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{trace, warn};

/// Length prefix size (4 bytes)
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Codec splitting a byte stream into frame bodies
#[derive(Debug, Clone)]
pub struct FrameCodec {
    max_len: usize,
    state: DecodeState,
}

#[derive(Debug, Clone, Copy, Default)]
enum DecodeState {
    #[default]
    ReadingLength,
    ReadingBody {
        length: usize,
    },
}

impl FrameCodec {
    /// Create a codec accepting bodies up to `max_len` bytes
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len: max_len.min(u32::MAX as usize),
            state: DecodeState::ReadingLength,
        }
    }

    /// Create a codec using [`NetworkConfig::max_frame_len`]
    pub fn from_config(config: &NetworkConfig) -> Self {
        Self::new(config.max_frame_len)
    }

    /// Largest accepted body length
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::from_config(&NetworkConfig::default())
    }
}

fn check_len(len: usize, max_len: usize) -> NetworkResult<()> {
    if len == 0 {
        return Err(NetworkError::EmptyFrame);
    }
    if len > max_len {
        warn!(len, max_len, "rejecting oversized frame");
        return Err(NetworkError::FrameTooLarge { len, max: max_len });
    }
    Ok(())
}

impl Decoder for FrameCodec {
    type Item = Bytes;
    type Error = NetworkError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match self.state {
                DecodeState::ReadingLength => {
                    if src.len() < LENGTH_PREFIX_LEN {
                        return Ok(None);
                    }

                    let length = u32::from_le_bytes([src[0], src[1], src[2], src[3]]) as usize;
                    check_len(length, self.max_len)?;

                    src.advance(LENGTH_PREFIX_LEN);
                    self.state = DecodeState::ReadingBody { length };
                }
                DecodeState::ReadingBody { length } => {
                    // Grow with the bytes that actually arrive, not the declared length
                    if src.len() < length {
                        return Ok(None);
                    }

                    self.state = DecodeState::ReadingLength;
                    trace!(len = length, "read frame");
                    return Ok(Some(src.split_to(length).freeze()));
                }
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }
        match self.state {
            DecodeState::ReadingLength if src.is_empty() => Ok(None),
            DecodeState::ReadingLength => Err(NetworkError::UnexpectedEof {
                needed: LENGTH_PREFIX_LEN,
                got: src.len(),
            }),
            DecodeState::ReadingBody { length } => Err(NetworkError::UnexpectedEof {
                needed: length,
                got: src.len(),
            }),
        }
    }
}

impl Encoder<Bytes> for FrameCodec {
    type Error = NetworkError;

    fn encode(&mut self, body: Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        check_len(body.len(), self.max_len)?;
        let len = u32::try_from(body.len()).map_err(|_| NetworkError::FrameTooLarge {
            len: body.len(),
            max: u32::MAX as usize,
        })?;

        dst.reserve(LENGTH_PREFIX_LEN + body.len());
        dst.put_u32_le(len);
        dst.put_slice(&body);
        trace!(len = body.len(), "wrote frame");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(body: &[u8]) -> BytesMut {
        let mut buf = BytesMut::new();
        FrameCodec::default()
            .encode(Bytes::copy_from_slice(body), &mut buf)
            .unwrap();
        buf
    }

    #[test]
    fn test_encode_layout() {
        assert_eq!(&frame(&[8])[..], &[1, 0, 0, 0, 8]);
        assert_eq!(&frame(&[7, 7, 0, 0, 0])[..4], &[5, 0, 0, 0]);
    }

    #[test]
    fn test_codec_streaming() {
        let mut codec = FrameCodec::default();
        let mut buf = frame(&[7, 7, 0, 0, 0]);
        buf.extend_from_slice(&frame(&[8]));

        assert_eq!(&codec.decode(&mut buf).unwrap().unwrap()[..], &[7, 7, 0, 0, 0]);
        assert_eq!(&codec.decode(&mut buf).unwrap().unwrap()[..], &[8]);
        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_partial_decode() {
        let mut codec = FrameCodec::default();
        let encoded = frame(&[1, 2, 3, 4]);

        // Feed bytes one at a time
        let mut buf = BytesMut::new();
        for (i, byte) in encoded.iter().enumerate() {
            buf.extend_from_slice(&[*byte]);
            let result = codec.decode(&mut buf).unwrap();
            if i < encoded.len() - 1 {
                assert!(result.is_none());
            } else {
                assert_eq!(&result.unwrap()[..], &[1, 2, 3, 4]);
            }
        }
    }

    #[test]
    fn test_declared_length_not_preallocated() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::new();
        buf.put_u32_le(8 * 1024 * 1024);
        buf.put_u8(1);
        let before = buf.capacity();

        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert!(buf.capacity() <= before);
    }

    #[test]
    fn test_decode_too_large() {
        let mut codec = FrameCodec::new(1024);
        let mut buf = BytesMut::new();
        buf.put_u32_le(1_000_000);
        assert!(matches!(
            codec.decode(&mut buf),
            Err(NetworkError::FrameTooLarge { len: 1_000_000, max: 1024 })
        ));
    }

    #[test]
    fn test_decode_empty_frame() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::from(&[0u8, 0, 0, 0][..]);
        assert!(matches!(codec.decode(&mut buf), Err(NetworkError::EmptyFrame)));
    }

    #[test]
    fn test_encode_too_large() {
        let mut codec = FrameCodec::new(4);
        let mut buf = BytesMut::new();
        assert!(matches!(
            codec.encode(Bytes::from_static(&[0; 5]), &mut buf),
            Err(NetworkError::FrameTooLarge { len: 5, max: 4 })
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_max_len_capped_at_u32() {
        assert_eq!(FrameCodec::new(usize::MAX).max_len(), u32::MAX as usize);
    }

    #[test]
    fn test_eof_on_boundary() {
        let mut codec = FrameCodec::default();
        let mut buf = frame(&[8]);
        assert_eq!(&codec.decode_eof(&mut buf).unwrap().unwrap()[..], &[8]);
        assert!(codec.decode_eof(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_eof_inside_prefix() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::from(&[5u8, 0][..]);
        assert!(matches!(
            codec.decode_eof(&mut buf),
            Err(NetworkError::UnexpectedEof { needed: 4, got: 2 })
        ));
    }

    #[test]
    fn test_eof_inside_body() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::from(&[10u8, 0, 0, 0, 1, 2, 3][..]);
        assert!(matches!(
            codec.decode_eof(&mut buf),
            Err(NetworkError::UnexpectedEof { needed: 10, got: 3 })
        ));
    }
}
