use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, WireError};
use crate::primitive::{length_prefix, put_prefixed, WireReader};

/// A type that can cross the FFI boundary.
///
/// `write`/`read` are the composable, stream-based layer used for nested
/// values. `to_wire`/`from_wire` are the whole-buffer layer used for a
/// top-level argument or return value; they are built on `write`/`read`
/// and add the exact-consumption rule.
pub trait WireCodec: Sized {
    /// Append the encoding of `self` to `dst`.
    fn write(&self, dst: &mut BytesMut) -> Result<()>;

    /// Decode one value from the front of `src`.
    fn read(src: &mut WireReader<'_>) -> Result<Self>;

    /// Encode `self` as the complete payload of a buffer.
    fn to_wire(&self) -> Result<Bytes> {
        let mut dst = BytesMut::new();
        self.write(&mut dst)?;
        Ok(dst.freeze())
    }

    /// Decode the complete payload of a buffer.
    ///
    /// Bytes left over after the value is read are a
    /// [`WireError::TrailingData`] fault.
    fn from_wire(payload: &[u8]) -> Result<Self> {
        let mut src = WireReader::new(payload);
        let value = Self::read(&mut src)?;
        src.finish()?;
        Ok(value)
    }
}

macro_rules! fixed_width {
    ($ty:ty, $put:ident, $read:ident) => {
        impl WireCodec for $ty {
            fn write(&self, dst: &mut BytesMut) -> Result<()> {
                dst.$put(*self);
                Ok(())
            }

            fn read(src: &mut WireReader<'_>) -> Result<Self> {
                src.$read(stringify!($ty))
            }
        }
    };
}

fixed_width!(u8, put_u8, read_u8);
fixed_width!(i8, put_i8, read_i8);
fixed_width!(u16, put_u16, read_u16);
fixed_width!(i16, put_i16, read_i16);
fixed_width!(u32, put_u32, read_u32);
fixed_width!(i32, put_i32, read_i32);
fixed_width!(u64, put_u64, read_u64);
fixed_width!(i64, put_i64, read_i64);
fixed_width!(f32, put_f32, read_f32);
fixed_width!(f64, put_f64, read_f64);

impl WireCodec for bool {
    fn write(&self, dst: &mut BytesMut) -> Result<()> {
        dst.put_i8(i8::from(*self));
        Ok(())
    }

    fn read(src: &mut WireReader<'_>) -> Result<Self> {
        Ok(src.read_i8("bool")? != 0)
    }
}

/// Nested strings carry a 32-bit length prefix. A top-level string buffer
/// is the raw UTF-8 bytes with no prefix, which is how the native side
/// lowers string arguments, string returns and panic messages.
impl WireCodec for String {
    fn write(&self, dst: &mut BytesMut) -> Result<()> {
        put_prefixed(dst, "string", self.as_bytes())
    }

    fn read(src: &mut WireReader<'_>) -> Result<Self> {
        let len = src.read_length("string length")?;
        let raw = src.read_slice("string", len)?;
        std::str::from_utf8(raw)
            .map(str::to_owned)
            .map_err(|_| WireError::InvalidUtf8)
    }

    fn to_wire(&self) -> Result<Bytes> {
        length_prefix("string", self.len())?;
        Ok(Bytes::copy_from_slice(self.as_bytes()))
    }

    fn from_wire(payload: &[u8]) -> Result<Self> {
        std::str::from_utf8(payload)
            .map(str::to_owned)
            .map_err(|_| WireError::InvalidUtf8)
    }
}

/// Opaque byte blob: same shape as a nested string, no encoding assumption.
impl WireCodec for Bytes {
    fn write(&self, dst: &mut BytesMut) -> Result<()> {
        put_prefixed(dst, "bytes", self)
    }

    fn read(src: &mut WireReader<'_>) -> Result<Self> {
        let len = src.read_length("bytes length")?;
        let raw = src.read_slice("bytes", len)?;
        Ok(Bytes::copy_from_slice(raw))
    }
}

/// One presence byte, then the value when present.
impl<T: WireCodec> WireCodec for Option<T> {
    fn write(&self, dst: &mut BytesMut) -> Result<()> {
        match self {
            None => {
                dst.put_i8(0);
                Ok(())
            }
            Some(value) => {
                dst.put_i8(1);
                value.write(dst)
            }
        }
    }

    fn read(src: &mut WireReader<'_>) -> Result<Self> {
        match src.read_u8("optional presence")? {
            0 => Ok(None),
            1 => T::read(src).map(Some),
            other => Err(WireError::InvalidPresence(other)),
        }
    }
}

/// Signed 32-bit count followed by each element. An empty sequence decodes
/// to an empty `Vec`.
impl<T: WireCodec> WireCodec for Vec<T> {
    fn write(&self, dst: &mut BytesMut) -> Result<()> {
        let count = length_prefix("sequence", self.len())?;
        dst.put_i32(count);
        for item in self {
            item.write(dst)?;
        }
        Ok(())
    }

    fn read(src: &mut WireReader<'_>) -> Result<Self> {
        let count = src.read_length("sequence count")?;
        // Cap the pre-allocation by what the buffer could possibly hold so a
        // corrupt count cannot trigger a huge allocation.
        let mut items = Vec::with_capacity(count.min(src.remaining()));
        for _ in 0..count {
            items.push(T::read(src)?);
        }
        Ok(items)
    }
}
