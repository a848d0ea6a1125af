//! # kestrel-primitives
//!
//! Value types composed by Kestrel protocol messages.
//!
//! - Peer addresses ([`Ipv4Addr`], [`Ipv6Addr`], [`SocketAddrV4`],
//!   [`SocketAddrV6`], [`SocketAddr`])
//! - Opaque chain objects ([`BlockHash`], [`Block`], [`Transaction`])
//!
//! Every type implements [`kestrel_codec::Encode`] and
//! [`kestrel_codec::Decode`].

#![warn(missing_docs)]
#![warn(clippy::all)]

mod addr;
mod blob;
mod error;
mod hash;

pub use addr::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
pub use blob::{Block, Transaction};
pub use error::PrimitiveError;
pub use hash::{BlockHash, HASH_LEN};

/// Block height type
pub type BlockHeight = u32;

/// Node identifier type
pub type NodeId = u64;
