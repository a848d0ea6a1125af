//! Protocol messages
//!
//! Every message on an established connection is a [`Payload`]:
//!
//! ```text
//! [u8 tag][variant body]
//! ```
//!
//! | tag | variant         | body                   |
//! |-----|-----------------|------------------------|
//! | 0   | `block`         | `Block`                |
//! | 1   | `getBlocks`     | `[BlockHash]`          |
//! | 2   | `getMemoryPool` | empty                  |
//! | 3   | `getPeers`      | empty                  |
//! | 4   | `getSync`       | `[BlockHash]`          |
//! | 5   | `memoryPool`    | `[Transaction]`        |
//! | 6   | `peers`         | `[SocketAddr]`         |
//! | 7   | `ping`          | `u32 block_height`     |
//! | 8   | `pong`          | empty                  |
//! | 9   | `sync`          | `[BlockHash]`          |
//! | 10  | `syncBlock`     | `Block`                |
//! | 11  | `transaction`   | `Transaction`          |
//!
//! Tags are part of the wire contract and must never be renumbered.

use bytes::Bytes;
use kestrel_codec::{
    decode_with, encode, encode_with, CodecConfig, CodecError, CodecResult, Decode, Encode,
    Reader, Writer,
};
use kestrel_primitives::{Block, BlockHash, BlockHeight, SocketAddr, Transaction};
use std::fmt;

/// Liveness probe carrying the sender's chain height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Ping {
    /// Sender's current block height
    pub block_height: BlockHeight,
}

impl Ping {
    /// Create a ping
    pub fn new(block_height: BlockHeight) -> Self {
        Self { block_height }
    }
}

/// Reply to a [`Ping`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pong;

/// Request for the peer's known addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GetPeers;

/// Request for the peer's memory pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GetMemoryPool;

impl Encode for Ping {
    fn encode(&self, w: &mut Writer) {
        w.write_u32(self.block_height);
    }
}

impl Decode for Ping {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        r.read_u32().map(Ping::new)
    }
}

macro_rules! impl_empty_body {
    ($($ty:ident),*) => {
        $(
            impl Encode for $ty {
                fn encode(&self, _w: &mut Writer) {}
            }

            impl Decode for $ty {
                fn decode(_r: &mut Reader<'_>) -> CodecResult<Self> {
                    Ok($ty)
                }
            }
        )*
    };
}

impl_empty_body!(Pong, GetPeers, GetMemoryPool);

/// Payload variant tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PayloadKind {
    /// Newly mined block
    Block = 0,
    /// Request blocks by hash
    GetBlocks = 1,
    /// Request the memory pool
    GetMemoryPool = 2,
    /// Request peer addresses
    GetPeers = 3,
    /// Request block hashes to sync from
    GetSync = 4,
    /// Memory pool transactions
    MemoryPool = 5,
    /// Peer addresses
    Peers = 6,
    /// Liveness probe
    Ping = 7,
    /// Liveness reply
    Pong = 8,
    /// Block hashes to sync from
    Sync = 9,
    /// Block sent in response to a sync request
    SyncBlock = 10,
    /// Unconfirmed transaction
    Transaction = 11,
}

impl PayloadKind {
    /// All kinds in tag order
    pub const ALL: [PayloadKind; 12] = [
        PayloadKind::Block,
        PayloadKind::GetBlocks,
        PayloadKind::GetMemoryPool,
        PayloadKind::GetPeers,
        PayloadKind::GetSync,
        PayloadKind::MemoryPool,
        PayloadKind::Peers,
        PayloadKind::Ping,
        PayloadKind::Pong,
        PayloadKind::Sync,
        PayloadKind::SyncBlock,
        PayloadKind::Transaction,
    ];

    /// Wire tag
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Schema name of the variant
    pub fn name(self) -> &'static str {
        match self {
            PayloadKind::Block => "block",
            PayloadKind::GetBlocks => "getBlocks",
            PayloadKind::GetMemoryPool => "getMemoryPool",
            PayloadKind::GetPeers => "getPeers",
            PayloadKind::GetSync => "getSync",
            PayloadKind::MemoryPool => "memoryPool",
            PayloadKind::Peers => "peers",
            PayloadKind::Ping => "ping",
            PayloadKind::Pong => "pong",
            PayloadKind::Sync => "sync",
            PayloadKind::SyncBlock => "syncBlock",
            PayloadKind::Transaction => "transaction",
        }
    }

    /// Check if the message asks the peer for data
    pub fn is_request(self) -> bool {
        matches!(
            self,
            PayloadKind::GetBlocks
                | PayloadKind::GetMemoryPool
                | PayloadKind::GetPeers
                | PayloadKind::GetSync
        )
    }
}

impl TryFrom<u8> for PayloadKind {
    type Error = CodecError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        PayloadKind::ALL
            .get(tag as usize)
            .copied()
            .ok_or(CodecError::UnknownVariant { kind: "payload", tag })
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Peer-to-peer protocol message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Newly mined block
    Block(Block),
    /// Request blocks by hash
    GetBlocks(Vec<BlockHash>),
    /// Request the memory pool
    GetMemoryPool(GetMemoryPool),
    /// Request peer addresses
    GetPeers(GetPeers),
    /// Request block hashes to sync from
    GetSync(Vec<BlockHash>),
    /// Memory pool transactions
    MemoryPool(Vec<Transaction>),
    /// Peer addresses
    Peers(Vec<SocketAddr>),
    /// Liveness probe
    Ping(Ping),
    /// Liveness reply
    Pong(Pong),
    /// Block hashes to sync from
    Sync(Vec<BlockHash>),
    /// Block sent in response to a sync request
    SyncBlock(Block),
    /// Unconfirmed transaction
    Transaction(Transaction),
}

impl Payload {
    /// Create a ping message
    pub fn ping(block_height: BlockHeight) -> Self {
        Payload::Ping(Ping::new(block_height))
    }

    /// Create a pong message
    pub fn pong() -> Self {
        Payload::Pong(Pong)
    }

    /// Create a peer list request
    pub fn get_peers() -> Self {
        Payload::GetPeers(GetPeers)
    }

    /// Create a memory pool request
    pub fn get_memory_pool() -> Self {
        Payload::GetMemoryPool(GetMemoryPool)
    }

    /// Variant tag
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Block(_) => PayloadKind::Block,
            Payload::GetBlocks(_) => PayloadKind::GetBlocks,
            Payload::GetMemoryPool(_) => PayloadKind::GetMemoryPool,
            Payload::GetPeers(_) => PayloadKind::GetPeers,
            Payload::GetSync(_) => PayloadKind::GetSync,
            Payload::MemoryPool(_) => PayloadKind::MemoryPool,
            Payload::Peers(_) => PayloadKind::Peers,
            Payload::Ping(_) => PayloadKind::Ping,
            Payload::Pong(_) => PayloadKind::Pong,
            Payload::Sync(_) => PayloadKind::Sync,
            Payload::SyncBlock(_) => PayloadKind::SyncBlock,
            Payload::Transaction(_) => PayloadKind::Transaction,
        }
    }

    /// Schema name of the active variant
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Encode to bytes
    ///
    /// Does not check decoder limits; use [`Payload::to_bytes_with`] for
    /// anything headed to a peer.
    pub fn to_bytes(&self) -> Bytes {
        encode(self)
    }

    /// Encode to bytes, refusing lists and blobs a peer using `config` would reject
    pub fn to_bytes_with(&self, config: &CodecConfig) -> CodecResult<Bytes> {
        encode_with(self, config)
    }

    /// Decode a complete message with default limits
    pub fn from_bytes(data: &[u8]) -> CodecResult<Self> {
        Self::from_bytes_with(data, &CodecConfig::default())
    }

    /// Decode a complete message with explicit limits
    pub fn from_bytes_with(data: &[u8], config: &CodecConfig) -> CodecResult<Self> {
        decode_with(data, config)
    }
}

fn write_elements<T: Encode>(w: &mut Writer, items: &[T]) {
    w.write_list(items, |w, item| item.encode(w));
}

fn check_elements<T: Encode>(items: &[T], config: &CodecConfig) -> CodecResult<()> {
    config.check_list_len(items.len())?;
    items.iter().try_for_each(|item| item.check_limits(config))
}

impl Encode for Payload {
    fn encode(&self, w: &mut Writer) {
        w.write_u8(self.kind().tag());
        match self {
            Payload::Block(block) | Payload::SyncBlock(block) => block.encode(w),
            Payload::GetBlocks(hashes) | Payload::GetSync(hashes) | Payload::Sync(hashes) => {
                write_elements(w, hashes)
            }
            Payload::GetMemoryPool(msg) => msg.encode(w),
            Payload::GetPeers(msg) => msg.encode(w),
            Payload::MemoryPool(txs) => write_elements(w, txs),
            Payload::Peers(addrs) => write_elements(w, addrs),
            Payload::Ping(ping) => ping.encode(w),
            Payload::Pong(pong) => pong.encode(w),
            Payload::Transaction(tx) => tx.encode(w),
        }
    }

    fn check_limits(&self, config: &CodecConfig) -> CodecResult<()> {
        match self {
            Payload::Block(block) | Payload::SyncBlock(block) => block.check_limits(config),
            Payload::GetBlocks(hashes) | Payload::GetSync(hashes) | Payload::Sync(hashes) => {
                check_elements(hashes, config)
            }
            Payload::MemoryPool(txs) => check_elements(txs, config),
            Payload::Peers(addrs) => check_elements(addrs, config),
            Payload::Transaction(tx) => tx.check_limits(config),
            Payload::GetMemoryPool(_)
            | Payload::GetPeers(_)
            | Payload::Ping(_)
            | Payload::Pong(_) => Ok(()),
        }
    }
}

impl Decode for Payload {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        let kind = PayloadKind::try_from(r.read_u8()?)?;
        let payload = match kind {
            PayloadKind::Block => Payload::Block(Block::decode(r)?),
            PayloadKind::GetBlocks => Payload::GetBlocks(r.read_list(BlockHash::decode)?),
            PayloadKind::GetMemoryPool => Payload::GetMemoryPool(GetMemoryPool::decode(r)?),
            PayloadKind::GetPeers => Payload::GetPeers(GetPeers::decode(r)?),
            PayloadKind::GetSync => Payload::GetSync(r.read_list(BlockHash::decode)?),
            PayloadKind::MemoryPool => Payload::MemoryPool(r.read_list(Transaction::decode)?),
            PayloadKind::Peers => Payload::Peers(r.read_list(SocketAddr::decode)?),
            PayloadKind::Ping => Payload::Ping(Ping::decode(r)?),
            PayloadKind::Pong => Payload::Pong(Pong::decode(r)?),
            PayloadKind::Sync => Payload::Sync(r.read_list(BlockHash::decode)?),
            PayloadKind::SyncBlock => Payload::SyncBlock(Block::decode(r)?),
            PayloadKind::Transaction => Payload::Transaction(Transaction::decode(r)?),
        };
        Ok(payload)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Block(block) | Payload::SyncBlock(block) => {
                write!(f, "{}({} bytes)", self.name(), block.len())
            }
            Payload::GetBlocks(hashes) | Payload::GetSync(hashes) | Payload::Sync(hashes) => {
                write!(f, "{}({} hashes)", self.name(), hashes.len())
            }
            Payload::MemoryPool(txs) => write!(f, "{}({} transactions)", self.name(), txs.len()),
            Payload::Peers(addrs) => write!(f, "{}({} addresses)", self.name(), addrs.len()),
            Payload::Ping(ping) => write!(f, "{}(height {})", self.name(), ping.block_height),
            Payload::Transaction(tx) => write!(f, "{}({} bytes)", self.name(), tx.len()),
            Payload::GetMemoryPool(_) | Payload::GetPeers(_) | Payload::Pong(_) => {
                f.write_str(self.name())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_are_contiguous() {
        for (i, kind) in PayloadKind::ALL.iter().enumerate() {
            assert_eq!(kind.tag() as usize, i);
            assert_eq!(PayloadKind::try_from(i as u8), Ok(*kind));
        }
    }

    #[test]
    fn test_kind_invalid_values() {
        for tag in [12u8, 13, 100, 200, 255] {
            assert_eq!(
                PayloadKind::try_from(tag),
                Err(CodecError::UnknownVariant { kind: "payload", tag })
            );
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(PayloadKind::GetBlocks.name(), "getBlocks");
        assert_eq!(PayloadKind::SyncBlock.to_string(), "syncBlock");
        assert_eq!(Payload::get_memory_pool().name(), "getMemoryPool");
    }

    #[test]
    fn test_kind_is_request() {
        let requests: Vec<_> = PayloadKind::ALL
            .iter()
            .filter(|k| k.is_request())
            .map(|k| k.name())
            .collect();
        assert_eq!(requests, vec!["getBlocks", "getMemoryPool", "getPeers", "getSync"]);
    }

    #[test]
    fn test_payload_kind_matches_variant() {
        assert_eq!(Payload::ping(1).kind(), PayloadKind::Ping);
        assert_eq!(Payload::pong().kind(), PayloadKind::Pong);
        assert_eq!(Payload::get_peers().kind(), PayloadKind::GetPeers);
        assert_eq!(Payload::Sync(vec![]).kind(), PayloadKind::Sync);
        assert_eq!(
            Payload::SyncBlock(Block::default()).kind(),
            PayloadKind::SyncBlock
        );
    }

    #[test]
    fn test_ping_wire_layout() {
        assert_eq!(&Payload::ping(7).to_bytes()[..], &[7, 7, 0, 0, 0]);
    }

    #[test]
    fn test_empty_bodies() {
        assert_eq!(&Payload::get_memory_pool().to_bytes()[..], &[2]);
        assert_eq!(&Payload::get_peers().to_bytes()[..], &[3]);
        assert_eq!(&Payload::pong().to_bytes()[..], &[8]);
    }

    #[test]
    fn test_empty_body_with_trailing_data() {
        assert_eq!(
            Payload::from_bytes(&[8, 0]),
            Err(CodecError::TrailingBytes { remaining: 1 })
        );
    }

    #[test]
    fn test_transaction_wire_layout() {
        let payload = Payload::Transaction(Transaction::new(vec![0xDE, 0xAD]));
        assert_eq!(&payload.to_bytes()[..], &[11, 2, 0, 0, 0, 0xDE, 0xAD]);
    }

    #[test]
    fn test_peers_wire_layout() {
        let payload = Payload::Peers(vec![SocketAddr::v4([10, 0, 0, 1], 1)]);
        assert_eq!(
            &payload.to_bytes()[..],
            &[6, 1, 0, 0, 0, 0, 10, 0, 0, 1, 1, 0]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Payload::ping(42).to_string(), "ping(height 42)");
        assert_eq!(Payload::pong().to_string(), "pong");
        assert_eq!(
            Payload::GetBlocks(vec![BlockHash::from([0u8; 32]); 3]).to_string(),
            "getBlocks(3 hashes)"
        );
        assert_eq!(
            Payload::MemoryPool(vec![Transaction::default()]).to_string(),
            "memoryPool(1 transactions)"
        );
        assert_eq!(
            Payload::Block(Block::new(vec![0; 10])).to_string(),
            "block(10 bytes)"
        );
    }

    #[test]
    fn test_to_bytes_with_checks_limits() {
        let config = CodecConfig::default()
            .with_max_list_len(2)
            .with_max_bytes_len(4);

        let hashes = Payload::Sync(vec![BlockHash::ZERO; 3]);
        assert_eq!(
            hashes.to_bytes_with(&config),
            Err(CodecError::LengthOverflow { kind: "list", declared: 3, max: 2 })
        );

        let pool = Payload::MemoryPool(vec![Transaction::new(vec![0; 5])]);
        assert_eq!(
            pool.to_bytes_with(&config),
            Err(CodecError::LengthOverflow { kind: "bytes", declared: 5, max: 4 })
        );

        let ok = Payload::GetBlocks(vec![BlockHash::ZERO; 2]);
        let bytes = ok.to_bytes_with(&config).unwrap();
        assert_eq!(bytes, ok.to_bytes());
        assert_eq!(Payload::from_bytes_with(&bytes, &config).unwrap(), ok);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            Payload::from_bytes(&[]),
            Err(CodecError::TruncatedInput { needed: 1, remaining: 0 })
        );
    }

    #[test]
    fn test_error_from_body_propagates() {
        // getBlocks carrying one 4-byte hash under a 32-byte hash config
        let bytes = [1, 1, 0, 0, 0, 4, 0, 0, 0, 1, 2, 3, 4];
        assert_eq!(
            Payload::from_bytes(&bytes),
            Err(CodecError::HashLengthMismatch { expected: 32, got: 4 })
        );
    }
}
