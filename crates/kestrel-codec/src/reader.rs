//! Borrowing decoder cursor

use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};

/// Decoding cursor over a borrowed buffer
///
/// Every read either consumes exactly the bytes it needs or fails without
/// consuming anything.
#[derive(Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    config: &'a CodecConfig,
}

impl<'a> Reader<'a> {
    /// Create a reader over `data` with the given limits
    pub fn new(data: &'a [u8], config: &'a CodecConfig) -> Self {
        Self { data, pos: 0, config }
    }

    /// Active decoder limits
    pub fn config(&self) -> &CodecConfig {
        self.config
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Fail with `TrailingBytes` unless the buffer is fully consumed
    pub fn finish(&self) -> CodecResult<()> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(CodecError::TrailingBytes { remaining }),
        }
    }

    fn take(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(CodecError::TruncatedInput { needed: n, remaining });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read exactly `N` raw bytes
    pub fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read a `u8`
    pub fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian `u16`
    pub fn read_u16(&mut self) -> CodecResult<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    /// Read a little-endian `u32`
    pub fn read_u32(&mut self) -> CodecResult<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a little-endian `u64`
    pub fn read_u64(&mut self) -> CodecResult<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    /// Read `n` raw bytes with no length prefix
    pub fn read_raw(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        self.take(n)
    }

    /// Read a length-prefixed blob, borrowing from the input
    pub fn read_bytes_ref(&mut self) -> CodecResult<&'a [u8]> {
        let start = self.pos;
        let declared = self.read_u32()? as usize;
        if let Err(e) = self.config.check_bytes_len(declared) {
            self.pos = start;
            return Err(e);
        }
        self.take(declared).map_err(|e| {
            self.pos = start;
            e
        })
    }

    /// Read a length-prefixed blob into an owned vector
    pub fn read_bytes(&mut self) -> CodecResult<Vec<u8>> {
        self.read_bytes_ref().map(<[u8]>::to_vec)
    }

    /// Read a length-prefixed list, decoding each element with `f`
    ///
    /// Stops at the first element error and drops everything decoded so far.
    pub fn read_list<T, F>(&mut self, mut f: F) -> CodecResult<Vec<T>>
    where
        F: FnMut(&mut Self) -> CodecResult<T>,
    {
        let start = self.pos;
        let declared = self.read_u32()? as usize;
        if let Err(e) = self.config.check_list_len(declared) {
            self.pos = start;
            return Err(e);
        }
        // Each element occupies at least one byte unless it is zero-sized,
        // so the remaining input bounds the allocation.
        let mut items = Vec::with_capacity(declared.min(self.remaining()));
        for _ in 0..declared {
            match f(self) {
                Ok(item) => items.push(item),
                Err(e) => {
                    self.pos = start;
                    return Err(e);
                }
            }
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CodecConfig {
        CodecConfig::default()
    }

    #[test]
    fn test_read_integers() {
        let data = (1u8..=15).collect::<Vec<_>>();
        let config = config();
        let mut r = Reader::new(&data, &config);
        assert_eq!(r.read_u8().unwrap(), 0x01);
        assert_eq!(r.read_u16().unwrap(), 0x0302);
        assert_eq!(r.read_u32().unwrap(), 0x0706_0504);
        assert_eq!(r.read_u64().unwrap(), 0x0f0e_0d0c_0b0a_0908);
        assert!(r.finish().is_ok());
    }

    #[test]
    fn test_read_u32_truncated() {
        let config = config();
        let mut r = Reader::new(&[1, 2, 3], &config);
        assert_eq!(
            r.read_u32(),
            Err(CodecError::TruncatedInput { needed: 4, remaining: 3 })
        );
        // Nothing consumed on failure
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn test_read_u8_empty() {
        let config = config();
        let mut r = Reader::new(&[], &config);
        assert!(matches!(r.read_u8(), Err(CodecError::TruncatedInput { .. })));
    }

    #[test]
    fn test_read_bytes() {
        let config = config();
        let data = [2, 0, 0, 0, 0x00, 0xFF];
        let mut r = Reader::new(&data, &config);
        assert_eq!(r.read_bytes().unwrap(), vec![0x00, 0xFF]);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_read_bytes_declared_longer_than_buffer() {
        let config = config();
        let data = [5, 0, 0, 0, 1, 2];
        let mut r = Reader::new(&data, &config);
        assert_eq!(
            r.read_bytes(),
            Err(CodecError::TruncatedInput { needed: 5, remaining: 2 })
        );
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn test_read_bytes_over_limit() {
        let config = CodecConfig::default().with_max_bytes_len(4);
        let data = [5, 0, 0, 0, 1, 2, 3, 4, 5];
        let mut r = Reader::new(&data, &config);
        assert_eq!(
            r.read_bytes(),
            Err(CodecError::LengthOverflow { kind: "bytes", declared: 5, max: 4 })
        );
    }

    #[test]
    fn test_read_list() {
        let config = config();
        let data = [3, 0, 0, 0, 1, 0, 2, 0, 3, 0];
        let mut r = Reader::new(&data, &config);
        assert_eq!(r.read_list(Reader::read_u16).unwrap(), vec![1, 2, 3]);
        assert!(r.finish().is_ok());
    }

    #[test]
    fn test_read_list_empty() {
        let config = config();
        let data = [0, 0, 0, 0];
        let mut r = Reader::new(&data, &config);
        let items: Vec<u64> = r.read_list(Reader::read_u64).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_read_list_element_failure_discards() {
        let config = config();
        // Declares 3 u16 elements but only carries 2 and a half
        let data = [3, 0, 0, 0, 1, 0, 2, 0, 3];
        let mut r = Reader::new(&data, &config);
        assert_eq!(
            r.read_list(Reader::read_u16),
            Err(CodecError::TruncatedInput { needed: 2, remaining: 1 })
        );
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn test_read_list_hostile_count() {
        let config = CodecConfig::default().with_max_list_len(10);
        let data = u32::MAX.to_le_bytes();
        let mut r = Reader::new(&data, &config);
        assert_eq!(
            r.read_list(Reader::read_u8),
            Err(CodecError::LengthOverflow {
                kind: "list",
                declared: u32::MAX as usize,
                max: 10,
            })
        );
    }

    #[test]
    fn test_finish_trailing() {
        let config = config();
        let mut r = Reader::new(&[7, 8, 9], &config);
        r.read_u8().unwrap();
        assert_eq!(r.finish(), Err(CodecError::TrailingBytes { remaining: 2 }));
    }

    #[test]
    fn test_read_array() {
        let config = config();
        let mut r = Reader::new(&[127, 0, 0, 1, 9], &config);
        assert_eq!(r.read_array::<4>().unwrap(), [127, 0, 0, 1]);
        assert_eq!(r.read_raw(1).unwrap(), &[9]);
    }
}
