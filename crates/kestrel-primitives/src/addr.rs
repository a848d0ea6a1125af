//! Peer network addresses
//!
//! Wire layout:
//!
//! ```text
//! Ipv4Addr     [4 octets]
//! Ipv6Addr     [16 octets]
//! SocketAddrV4 [Ipv4Addr][u16 port]
//! SocketAddrV6 [Ipv6Addr][u16 port]
//! SocketAddr   [u8 tag: 0 = v4, 1 = v6][SocketAddrV4 | SocketAddrV6]
//! ```

use crate::error::PrimitiveError;
use std::fmt;
use std::net;

/// IPv4 address (4 raw octets)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ipv4Addr([u8; 4]);

impl Ipv4Addr {
    /// Size in bytes
    pub const LEN: usize = 4;

    /// Loopback address (127.0.0.1)
    pub const LOCALHOST: Ipv4Addr = Ipv4Addr([127, 0, 0, 1]);

    /// Create from octets
    pub const fn new(octets: [u8; 4]) -> Self {
        Ipv4Addr(octets)
    }

    /// Create from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, PrimitiveError> {
        let octets = slice.try_into().map_err(|_| PrimitiveError::InvalidLength {
            expected: Self::LEN,
            got: slice.len(),
        })?;
        Ok(Ipv4Addr(octets))
    }

    /// Get the octets
    pub fn octets(&self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Debug for Ipv4Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ipv4Addr({})", self)
    }
}

impl fmt::Display for Ipv4Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&net::Ipv4Addr::from(self.0), f)
    }
}

impl From<[u8; 4]> for Ipv4Addr {
    fn from(octets: [u8; 4]) -> Self {
        Ipv4Addr(octets)
    }
}

impl From<net::Ipv4Addr> for Ipv4Addr {
    fn from(addr: net::Ipv4Addr) -> Self {
        Ipv4Addr(addr.octets())
    }
}

impl From<Ipv4Addr> for net::Ipv4Addr {
    fn from(addr: Ipv4Addr) -> Self {
        net::Ipv4Addr::from(addr.0)
    }
}

/// IPv6 address (16 raw octets)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ipv6Addr([u8; 16]);

impl Ipv6Addr {
    /// Size in bytes
    pub const LEN: usize = 16;

    /// Loopback address (::1)
    pub const LOCALHOST: Ipv6Addr = Ipv6Addr([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);

    /// Create from octets
    pub const fn new(octets: [u8; 16]) -> Self {
        Ipv6Addr(octets)
    }

    /// Create from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, PrimitiveError> {
        let octets = slice.try_into().map_err(|_| PrimitiveError::InvalidLength {
            expected: Self::LEN,
            got: slice.len(),
        })?;
        Ok(Ipv6Addr(octets))
    }

    /// Get the octets
    pub fn octets(&self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Debug for Ipv6Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ipv6Addr({})", self)
    }
}

impl fmt::Display for Ipv6Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&net::Ipv6Addr::from(self.0), f)
    }
}

impl From<[u8; 16]> for Ipv6Addr {
    fn from(octets: [u8; 16]) -> Self {
        Ipv6Addr(octets)
    }
}

impl From<net::Ipv6Addr> for Ipv6Addr {
    fn from(addr: net::Ipv6Addr) -> Self {
        Ipv6Addr(addr.octets())
    }
}

impl From<Ipv6Addr> for net::Ipv6Addr {
    fn from(addr: Ipv6Addr) -> Self {
        net::Ipv6Addr::from(addr.0)
    }
}

/// IPv4 endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SocketAddrV4 {
    /// Address
    pub addr: Ipv4Addr,
    /// Port
    pub port: u16,
}

impl SocketAddrV4 {
    /// Create a new endpoint
    pub fn new(addr: Ipv4Addr, port: u16) -> Self {
        Self { addr, port }
    }
}

impl fmt::Display for SocketAddrV4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.addr, self.port)
    }
}

/// IPv6 endpoint
///
/// Flow info and scope id are not part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SocketAddrV6 {
    /// Address
    pub addr: Ipv6Addr,
    /// Port
    pub port: u16,
}

impl SocketAddrV6 {
    /// Create a new endpoint
    pub fn new(addr: Ipv6Addr, port: u16) -> Self {
        Self { addr, port }
    }
}

impl fmt::Display for SocketAddrV6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]:{}", self.addr, self.port)
    }
}

/// Peer endpoint, either IPv4 or IPv6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SocketAddr {
    /// IPv4 endpoint (tag 0)
    V4(SocketAddrV4),
    /// IPv6 endpoint (tag 1)
    V6(SocketAddrV6),
}

impl SocketAddr {
    /// Wire tag of the IPv4 variant
    pub const TAG_V4: u8 = 0;
    /// Wire tag of the IPv6 variant
    pub const TAG_V6: u8 = 1;

    /// Create an IPv4 endpoint
    pub fn v4(octets: [u8; 4], port: u16) -> Self {
        SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(octets), port))
    }

    /// Create an IPv6 endpoint
    pub fn v6(octets: [u8; 16], port: u16) -> Self {
        SocketAddr::V6(SocketAddrV6::new(Ipv6Addr::new(octets), port))
    }

    /// Port of either variant
    pub fn port(&self) -> u16 {
        match self {
            SocketAddr::V4(a) => a.port,
            SocketAddr::V6(a) => a.port,
        }
    }

    /// Check if this is an IPv4 endpoint
    pub fn is_ipv4(&self) -> bool {
        matches!(self, SocketAddr::V4(_))
    }

    /// Check if this is an IPv6 endpoint
    pub fn is_ipv6(&self) -> bool {
        matches!(self, SocketAddr::V6(_))
    }

    /// Wire tag of this variant
    pub fn tag(&self) -> u8 {
        match self {
            SocketAddr::V4(_) => Self::TAG_V4,
            SocketAddr::V6(_) => Self::TAG_V6,
        }
    }
}

impl fmt::Display for SocketAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocketAddr::V4(a) => fmt::Display::fmt(a, f),
            SocketAddr::V6(a) => fmt::Display::fmt(a, f),
        }
    }
}

impl From<SocketAddrV4> for SocketAddr {
    fn from(addr: SocketAddrV4) -> Self {
        SocketAddr::V4(addr)
    }
}

impl From<SocketAddrV6> for SocketAddr {
    fn from(addr: SocketAddrV6) -> Self {
        SocketAddr::V6(addr)
    }
}

impl From<net::SocketAddr> for SocketAddr {
    fn from(addr: net::SocketAddr) -> Self {
        match addr {
            net::SocketAddr::V4(a) => SocketAddr::V4(SocketAddrV4::new((*a.ip()).into(), a.port())),
            net::SocketAddr::V6(a) => SocketAddr::V6(SocketAddrV6::new((*a.ip()).into(), a.port())),
        }
    }
}

impl From<SocketAddr> for net::SocketAddr {
    fn from(addr: SocketAddr) -> Self {
        match addr {
            SocketAddr::V4(a) => net::SocketAddr::V4(net::SocketAddrV4::new(a.addr.into(), a.port)),
            SocketAddr::V6(a) => {
                net::SocketAddr::V6(net::SocketAddrV6::new(a.addr.into(), a.port, 0, 0))
            }
        }
    }
}

mod codec_impl {
    use super::*;
    use kestrel_codec::{CodecError, CodecResult, Decode, Encode, Reader, Writer};

    fn read_octets<const N: usize>(r: &mut Reader<'_>) -> CodecResult<[u8; N]> {
        let got = r.remaining();
        if got < N {
            return Err(CodecError::MalformedAddress { expected: N, got });
        }
        r.read_array::<N>()
    }

    impl Encode for Ipv4Addr {
        fn encode(&self, w: &mut Writer) {
            w.write_raw(&self.0);
        }
    }

    impl Decode for Ipv4Addr {
        fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
            read_octets(r).map(Ipv4Addr)
        }
    }

    impl Encode for Ipv6Addr {
        fn encode(&self, w: &mut Writer) {
            w.write_raw(&self.0);
        }
    }

    impl Decode for Ipv6Addr {
        fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
            read_octets(r).map(Ipv6Addr)
        }
    }

    impl Encode for SocketAddrV4 {
        fn encode(&self, w: &mut Writer) {
            self.addr.encode(w);
            w.write_u16(self.port);
        }
    }

    impl Decode for SocketAddrV4 {
        fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
            let addr = Ipv4Addr::decode(r)?;
            let port = r.read_u16()?;
            Ok(Self { addr, port })
        }
    }

    impl Encode for SocketAddrV6 {
        fn encode(&self, w: &mut Writer) {
            self.addr.encode(w);
            w.write_u16(self.port);
        }
    }

    impl Decode for SocketAddrV6 {
        fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
            let addr = Ipv6Addr::decode(r)?;
            let port = r.read_u16()?;
            Ok(Self { addr, port })
        }
    }

    impl Encode for SocketAddr {
        fn encode(&self, w: &mut Writer) {
            w.write_u8(self.tag());
            match self {
                SocketAddr::V4(a) => a.encode(w),
                SocketAddr::V6(a) => a.encode(w),
            }
        }
    }

    impl Decode for SocketAddr {
        fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
            match r.read_u8()? {
                SocketAddr::TAG_V4 => SocketAddrV4::decode(r).map(SocketAddr::V4),
                SocketAddr::TAG_V6 => SocketAddrV6::decode(r).map(SocketAddr::V6),
                tag => Err(CodecError::UnknownVariant {
                    kind: "socket address",
                    tag,
                }),
            }
        }
    }
}
