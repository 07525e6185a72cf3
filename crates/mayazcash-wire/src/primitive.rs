use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Result, WireError};

/// Largest length a string, byte blob, or sequence may declare.
pub const MAX_LENGTH_PREFIX: usize = i32::MAX as usize;

/// Size in bytes of a length or count prefix.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Zero-copy cursor over an encoded payload.
///
/// Every read checks the remaining length first, so a short buffer surfaces
/// as [`WireError::Truncated`] instead of a panic inside `bytes::Buf`.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
}

macro_rules! read_fixed {
    ($(#[$meta:meta])* $name:ident, $get:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $name(&mut self, what: &'static str) -> Result<$ty> {
            self.ensure(what, std::mem::size_of::<$ty>())?;
            Ok(self.buf.$get())
        }
    };
}

impl<'a> WireReader<'a> {
    /// Create a reader over `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// True once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    read_fixed!(read_u8, get_u8, u8);
    read_fixed!(read_i8, get_i8, i8);
    read_fixed!(read_u16, get_u16, u16);
    read_fixed!(read_i16, get_i16, i16);
    read_fixed!(read_u32, get_u32, u32);
    read_fixed!(read_i32, get_i32, i32);
    read_fixed!(read_u64, get_u64, u64);
    read_fixed!(read_i64, get_i64, i64);
    read_fixed!(read_f32, get_f32, f32);
    read_fixed!(read_f64, get_f64, f64);

    /// Read a signed 32-bit length prefix and reject negative values.
    pub fn read_length(&mut self, what: &'static str) -> Result<usize> {
        let len = self.read_i32(what)?;
        usize::try_from(len).map_err(|_| WireError::NegativeLength(len))
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn read_slice(&mut self, what: &'static str, len: usize) -> Result<&'a [u8]> {
        self.ensure(what, len)?;
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    /// Consume the reader, failing if any bytes are left.
    pub fn finish(self) -> Result<()> {
        if self.buf.is_empty() {
            Ok(())
        } else {
            Err(WireError::TrailingData {
                remaining: self.buf.len(),
            })
        }
    }

    fn ensure(&self, what: &'static str, needed: usize) -> Result<()> {
        if self.buf.len() < needed {
            return Err(WireError::Truncated {
                what,
                needed,
                remaining: self.buf.len(),
            });
        }
        Ok(())
    }
}

/// Check that `len` fits a length prefix and convert it.
///
/// Called before anything is written, so an oversized value never reaches
/// an allocation.
pub fn length_prefix(what: &'static str, len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| WireError::TooLarge {
        what,
        size: len,
        max: MAX_LENGTH_PREFIX,
    })
}

/// Write a length prefix followed by `payload`.
pub fn put_prefixed(dst: &mut BytesMut, what: &'static str, payload: &[u8]) -> Result<()> {
    let len = length_prefix(what, payload.len())?;
    dst.reserve(LENGTH_PREFIX_SIZE + payload.len());
    dst.put_i32(len);
    dst.put_slice(payload);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_big_endian() {
        let wire = [0x00, 0x00, 0x03, 0xE8, 0xFF, 0xFE];
        let mut reader = WireReader::new(&wire);
        assert_eq!(reader.read_u32("n").unwrap(), 1000);
        assert_eq!(reader.read_i16("m").unwrap(), -2);
        assert!(reader.is_empty());
    }

    #[test]
    fn short_read_is_truncated() {
        let wire = [0x00, 0x01];
        let mut reader = WireReader::new(&wire);
        let err = reader.read_u64("height").unwrap_err();
        assert_eq!(
            err,
            WireError::Truncated {
                what: "height",
                needed: 8,
                remaining: 2
            }
        );
        // A failed read does not consume anything.
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn negative_length_rejected() {
        let wire = (-1i32).to_be_bytes();
        let mut reader = WireReader::new(&wire);
        assert!(matches!(
            reader.read_length("string length"),
            Err(WireError::NegativeLength(-1))
        ));
    }

    #[test]
    fn finish_reports_trailing_bytes() {
        let wire = [1, 2, 3];
        let mut reader = WireReader::new(&wire);
        reader.read_u8("first").unwrap();
        assert_eq!(
            reader.finish(),
            Err(WireError::TrailingData { remaining: 2 })
        );
    }

    #[test]
    fn length_prefix_boundary() {
        assert_eq!(length_prefix("bytes", MAX_LENGTH_PREFIX).unwrap(), i32::MAX);
        assert!(matches!(
            length_prefix("bytes", MAX_LENGTH_PREFIX + 1),
            Err(WireError::TooLarge { size, .. }) if size == MAX_LENGTH_PREFIX + 1
        ));
    }

    #[test]
    fn read_slice_is_zero_copy() {
        let wire = [9u8, 8, 7, 6];
        let mut reader = WireReader::new(&wire);
        let head = reader.read_slice("head", 3).unwrap();
        assert_eq!(head.as_ptr(), wire.as_ptr());
        assert_eq!(reader.remaining(), 1);
    }
}
