//! Reading and writing messages over framed streams
//!
//! Each helper takes the read or write half of a connection wrapped in
//! [`FrameCodec`](crate::codec::FrameCodec):
//!
//! ```ignore
//! let (read_half, write_half) = stream.into_split();
//! let mut reader = FramedRead::new(read_half, FrameCodec::from_config(&config));
//! let mut writer = FramedWrite::new(write_half, FrameCodec::from_config(&config));
//! ```

use crate::codec::LENGTH_PREFIX_LEN;
use crate::config::NetworkConfig;
use crate::error::{NetworkError, NetworkResult};
use crate::message::Payload;
use crate::version::Version;
use bytes::Bytes;
use futures::{Sink, SinkExt, Stream, StreamExt};
use kestrel_codec::{decode_with, encode, CodecError};
use tracing::{debug, trace};

/// Read the next frame body
///
/// A stream that ends on a frame boundary yields
/// [`NetworkError::ConnectionClosed`].
pub async fn read_frame<R>(reader: &mut R) -> NetworkResult<Bytes>
where
    R: Stream<Item = NetworkResult<Bytes>> + Unpin,
{
    match reader.next().await {
        Some(frame) => frame,
        None => Err(NetworkError::ConnectionClosed),
    }
}

/// Write one frame body and flush
pub async fn write_frame<W>(writer: &mut W, body: Bytes) -> NetworkResult<()>
where
    W: Sink<Bytes, Error = NetworkError> + Unpin,
{
    writer.send(body).await
}

/// Read and decode one payload
///
/// A body that fails to decode yields [`NetworkError::Codec`]; the stream
/// stays usable and the next call reads the following frame.
pub async fn read_payload<R>(reader: &mut R, config: &NetworkConfig) -> NetworkResult<Payload>
where
    R: Stream<Item = NetworkResult<Bytes>> + Unpin,
{
    let body = read_frame(reader).await?;
    match Payload::from_bytes_with(&body, &config.codec) {
        Ok(payload) => {
            trace!(%payload, "received payload");
            Ok(payload)
        }
        Err(e) => {
            debug!(error = %e, len = body.len(), "malformed payload");
            Err(e.into())
        }
    }
}

/// Encode and write one payload
///
/// Fails with [`CodecError::LengthOverflow`] without writing anything if the
/// peer's decoder limits would reject the payload.
pub async fn write_payload<W>(
    writer: &mut W,
    payload: &Payload,
    config: &NetworkConfig,
) -> NetworkResult<()>
where
    W: Sink<Bytes, Error = NetworkError> + Unpin,
{
    let body = payload.to_bytes_with(&config.codec)?;
    trace!(%payload, "sending payload");
    write_frame(writer, body).await
}

/// Read and decode the peer's handshake record
///
/// A stream that ends before the record is complete, including one that
/// ends before sending anything, yields [`CodecError::TruncatedInput`].
pub async fn read_version<R>(reader: &mut R, config: &NetworkConfig) -> NetworkResult<Version>
where
    R: Stream<Item = NetworkResult<Bytes>> + Unpin,
{
    let body = match read_frame(reader).await {
        Ok(body) => body,
        Err(NetworkError::ConnectionClosed) => {
            return Err(CodecError::TruncatedInput {
                needed: LENGTH_PREFIX_LEN,
                remaining: 0,
            }
            .into())
        }
        Err(NetworkError::UnexpectedEof { needed, got }) => {
            return Err(CodecError::TruncatedInput {
                needed,
                remaining: got,
            }
            .into())
        }
        Err(e) => return Err(e),
    };
    Ok(decode_with(&body, &config.codec)?)
}

/// Encode and write our handshake record
pub async fn write_version<W>(writer: &mut W, version: &Version) -> NetworkResult<()>
where
    W: Sink<Bytes, Error = NetworkError> + Unpin,
{
    write_frame(writer, encode(version)).await
}
