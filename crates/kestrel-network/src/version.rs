//! Connection handshake record

use kestrel_codec::{CodecResult, Decode, Encode, Reader, Writer};
use kestrel_primitives::NodeId;
use serde::{Deserialize, Serialize};

/// Protocol version spoken by this implementation
pub const PROTOCOL_VERSION: u64 = 1;

/// Handshake sent once per connection, before any payload
///
/// Wire layout: `[u64 version][u16 listening_port][u64 node_id]`, 18 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    /// Protocol version of the sender
    pub version: u64,
    /// Port the sender accepts connections on
    pub listening_port: u16,
    /// Sender node id
    pub node_id: NodeId,
}

impl Version {
    /// Encoded size in bytes
    pub const LEN: usize = 8 + 2 + 8;

    /// Create a new handshake record
    pub fn new(version: u64, listening_port: u16, node_id: NodeId) -> Self {
        Self {
            version,
            listening_port,
            node_id,
        }
    }

    /// Create a record for [`PROTOCOL_VERSION`] with a random node id
    pub fn with_random_node_id(listening_port: u16) -> Self {
        Self::new(PROTOCOL_VERSION, listening_port, rand::random())
    }
}

impl Encode for Version {
    fn encode(&self, w: &mut Writer) {
        w.write_u64(self.version);
        w.write_u16(self.listening_port);
        w.write_u64(self.node_id);
    }
}

impl Decode for Version {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        Ok(Self {
            version: r.read_u64()?,
            listening_port: r.read_u16()?,
            node_id: r.read_u64()?,
        })
    }
}
