//! Append-only encoder buffer

use bytes::{BufMut, Bytes, BytesMut};

/// Encoding buffer
///
/// All integers are written little-endian. Lengths are written as `u32`.
#[derive(Debug, Default)]
pub struct Writer {
    buf: BytesMut,
}

impl Writer {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with preallocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing was written
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Write a `u8`
    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Write a little-endian `u16`
    pub fn write_u16(&mut self, value: u16) {
        self.buf.put_u16_le(value);
    }

    /// Write a little-endian `u32`
    pub fn write_u32(&mut self, value: u32) {
        self.buf.put_u32_le(value);
    }

    /// Write a little-endian `u64`
    pub fn write_u64(&mut self, value: u64) {
        self.buf.put_u64_le(value);
    }

    /// Write raw bytes with no length prefix
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    fn write_len(&mut self, len: usize) {
        debug_assert!(
            u32::try_from(len).is_ok(),
            "length {} does not fit the u32 prefix",
            len
        );
        self.write_u32(len as u32);
    }

    /// Write a length-prefixed byte blob
    ///
    /// Blobs longer than `u32::MAX` cannot be represented; run
    /// [`encode_with`](crate::encode_with) first to reject them.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_len(bytes.len());
        self.write_raw(bytes);
    }

    /// Write a length-prefixed list, encoding each element with `f`
    pub fn write_list<T, F>(&mut self, items: &[T], mut f: F)
    where
        F: FnMut(&mut Self, &T),
    {
        self.write_len(items.len());
        for item in items {
            f(self, item);
        }
    }

    /// Finish and return the encoded bytes
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    /// Finish and return the encoded bytes as a vector
    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}
