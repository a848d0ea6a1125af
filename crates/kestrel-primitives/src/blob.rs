//! Opaque block and transaction carriers
//!
//! The block and transaction formats are owned by other components. On the
//! wire both are a length-prefixed byte blob and are never inspected here.

use std::fmt;

macro_rules! opaque_blob {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(Vec<u8>);

        impl $name {
            /// Wrap serialized bytes
            pub fn new(bytes: Vec<u8>) -> Self {
                $name(bytes)
            }

            /// Get the serialized bytes
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// Length in bytes
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Check if empty
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Consume into the serialized bytes
            pub fn into_inner(self) -> Vec<u8> {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({} bytes)"), self.0.len())
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(bytes: Vec<u8>) -> Self {
                $name(bytes)
            }
        }

        impl From<&[u8]> for $name {
            fn from(bytes: &[u8]) -> Self {
                $name(bytes.to_vec())
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl kestrel_codec::Encode for $name {
            fn encode(&self, w: &mut kestrel_codec::Writer) {
                w.write_bytes(&self.0);
            }

            fn check_limits(
                &self,
                config: &kestrel_codec::CodecConfig,
            ) -> kestrel_codec::CodecResult<()> {
                config.check_bytes_len(self.0.len())
            }
        }

        impl kestrel_codec::Decode for $name {
            fn decode(r: &mut kestrel_codec::Reader<'_>) -> kestrel_codec::CodecResult<Self> {
                r.read_bytes().map($name)
            }
        }
    };
}

opaque_blob! {
    /// Serialized block
    Block
}

opaque_blob! {
    /// Serialized transaction
    Transaction
}
