use std::fmt;

use mayazcash_abi::{AbiError, ForeignBytes, NativeAllocator, RustBuffer};
use mayazcash_wire::{WireCodec, WireError};
use tracing::error;

use crate::dispatch::call;
use crate::error::Result;

/// A native buffer owned by the host.
///
/// The buffer is released exactly once: by [`OwnedBuffer::release`], by
/// handing it to a call with [`OwnedBuffer::into_raw`], or on drop. A
/// buffer with a null data pointer has nothing to release and never
/// reaches the native allocator.
pub struct OwnedBuffer<'a, A: NativeAllocator + ?Sized> {
    buf: Option<RustBuffer>,
    alloc: &'a A,
}

impl<'a, A: NativeAllocator + ?Sized> OwnedBuffer<'a, A> {
    /// Take ownership of a buffer produced by `alloc`.
    ///
    /// A buffer with an invalid header is rejected and left untouched,
    /// since handing it back to the allocator would be unsound.
    ///
    /// # Safety
    /// `buf` must have been returned by `alloc` and must not be owned by
    /// anything else.
    pub unsafe fn from_raw(alloc: &'a A, buf: RustBuffer) -> Result<Self> {
        buf.validate()?;
        Ok(Self {
            buf: Some(buf),
            alloc,
        })
    }

    /// Copy `bytes` into a new native buffer.
    ///
    /// Empty input yields the zero buffer without calling the allocator.
    pub fn from_host_bytes(alloc: &'a A, bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Ok(Self {
                buf: Some(RustBuffer::default()),
                alloc,
            });
        }
        let view = ForeignBytes::from_slice(bytes)?;
        // SAFETY: `bytes` outlives the call.
        let raw = call(alloc, |status| unsafe { alloc.rustbuffer_from_bytes(view, status) })?;
        // SAFETY: Just returned by this allocator.
        unsafe { Self::from_raw(alloc, raw) }
    }

    /// Allocate a zero-filled native buffer of `size` bytes.
    pub fn allocate(alloc: &'a A, size: usize) -> Result<Self> {
        let size = i32::try_from(size).map_err(|_| AbiError::TooLarge {
            size,
            max: i32::MAX as usize,
        })?;
        let raw = call(alloc, |status| alloc.rustbuffer_alloc(size, status))?;
        // SAFETY: Just returned by this allocator.
        unsafe { Self::from_raw(alloc, raw) }
    }

    /// Encode `value` into a new native buffer.
    pub fn lower<T: WireCodec>(alloc: &'a A, value: &T) -> Result<Self> {
        let bytes = value.to_wire()?;
        Self::from_host_bytes(alloc, &bytes)
    }

    /// Make room for at least `additional` more bytes.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let additional = i32::try_from(additional).map_err(|_| AbiError::TooLarge {
            size: additional,
            max: i32::MAX as usize,
        })?;
        let Some(buf) = self.buf.take() else {
            return Ok(());
        };
        let alloc = self.alloc;
        // SAFETY: Owned by this wrapper; the allocator consumes it and
        // returns the replacement.
        let grown = call(alloc, |status| unsafe {
            alloc.rustbuffer_reserve(buf, additional, status)
        })?;
        grown.validate()?;
        self.buf = Some(grown);
        Ok(())
    }

    /// Zero-copy view of the payload.
    pub fn as_slice(&self) -> &[u8] {
        match &self.buf {
            // SAFETY: Validated on construction and owned until release.
            Some(buf) => unsafe { buf.as_slice() },
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.buf.as_ref().map_or(0, RustBuffer::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Give up ownership, typically to pass the buffer as a call argument.
    pub fn into_raw(mut self) -> RustBuffer {
        self.buf.take().unwrap_or_default()
    }

    /// Release the buffer now and report a failing release.
    pub fn release(mut self) -> Result<()> {
        match self.buf.take() {
            Some(buf) => free(self.alloc, buf),
            None => Ok(()),
        }
    }

    /// Decode the payload with `decode`, then release the buffer.
    ///
    /// A decode failure takes precedence over a release failure.
    pub fn consume<T, F>(self, decode: F) -> Result<T>
    where
        F: FnOnce(&[u8]) -> std::result::Result<T, WireError>,
    {
        let decoded = decode(self.as_slice());
        let released = self.release();
        let value = decoded?;
        released?;
        Ok(value)
    }

    /// Decode the payload as a complete `T`, then release the buffer.
    pub fn lift<T: WireCodec>(self) -> Result<T> {
        self.consume(T::from_wire)
    }
}

fn free<A: NativeAllocator + ?Sized>(alloc: &A, buf: RustBuffer) -> Result<()> {
    if buf.data.is_null() {
        return Ok(());
    }
    // SAFETY: Callers only pass buffers they own, exactly once.
    call(alloc, |status| unsafe { alloc.rustbuffer_free(buf, status) })
}

impl<A: NativeAllocator + ?Sized> Drop for OwnedBuffer<'_, A> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            if let Err(fault) = free(self.alloc, buf) {
                error!(error = %fault, "failed to release native buffer");
            }
        }
    }
}

impl<A: NativeAllocator + ?Sized> fmt::Debug for OwnedBuffer<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedBuffer")
            .field("len", &self.len())
            .field("released", &self.buf.is_none())
            .finish()
    }
}
