//! # kestrel-network
//!
//! Peer-to-peer message protocol for Kestrel.
//!
//! This crate provides:
//! - The [`Payload`] union every established connection speaks
//! - The [`Version`] handshake record exchanged at connection start
//! - [`FrameCodec`], a `tokio_util` codec for length-prefixed framing
//!
//! ## Architecture
//!
//! ```text
//! +-------------------+
//! |  handshake        |  <- Version exchange, once per connection
//! +-------------------+
//!          |
//! +-------------------+
//! |  FrameCodec       |  <- [u32 length][body]
//! +-------------------+
//!          |
//! +-------------------+
//! |  Payload / Version|  <- [u8 tag][variant body]
//! +-------------------+
//!          |
//! +-------------------+
//! |  kestrel-codec    |  <- integers, blobs, lists
//! +-------------------+
//! ```
//!
//! Encoding and decoding are pure; only the framing helpers and `handshake`
//! touch a stream.
//!
//! ## Usage
//!
//! ```ignore
//! use kestrel_network::{
//!     handshake, read_payload, write_payload, FrameCodec, NetworkConfig, Payload, Version,
//! };
//! use tokio_util::codec::{FramedRead, FramedWrite};
//!
//! let config = NetworkConfig::default();
//! let ours = Version::with_random_node_id(4131);
//!
//! let (read_half, write_half) = stream.into_split();
//! let mut reader = FramedRead::new(read_half, FrameCodec::from_config(&config));
//! let mut writer = FramedWrite::new(write_half, FrameCodec::from_config(&config));
//!
//! let theirs = handshake(&mut reader, &mut writer, &ours, &config).await?;
//! write_payload(&mut writer, &Payload::ping(height), &config).await?;
//!
//! match read_payload(&mut reader, &config).await? {
//!     Payload::Pong(_) => { /* ... */ }
//!     other => { /* ... */ }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod codec;
mod config;
mod error;
mod frame;
mod handshake;
mod message;
mod version;

pub use codec::{FrameCodec, LENGTH_PREFIX_LEN};
pub use config::{NetworkConfig, DEFAULT_MAX_FRAME_LEN};
pub use error::{NetworkError, NetworkResult};
pub use frame::{read_frame, read_payload, read_version, write_frame, write_payload, write_version};
pub use handshake::handshake;
pub use message::{GetMemoryPool, GetPeers, Payload, PayloadKind, Ping, Pong};
pub use version::{Version, PROTOCOL_VERSION};

pub use kestrel_codec::{CodecConfig, CodecError};
pub use kestrel_primitives::{
    Block, BlockHash, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6, Transaction,
    HASH_LEN,
};
