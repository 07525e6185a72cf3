//! Native-side buffer management.
//!
//! A native component written in Rust backs every [`RustBuffer`] with a
//! `Vec<u8>`. The `rustbuffer_*` functions here are the reference
//! implementations of the four allocator entry points a component exports.

use std::mem::ManuallyDrop;

use crate::error::{AbiError, Result};
use crate::scaffold::{call_with_status, NativeError};
use crate::types::{ForeignBytes, RustBuffer, RustCallStatus};

fn to_i32(size: usize) -> Result<i32> {
    i32::try_from(size).map_err(|_| AbiError::TooLarge {
        size,
        max: i32::MAX as usize,
    })
}

impl RustBuffer {
    /// Hand a `Vec` over to the boundary without copying.
    pub fn from_vec(bytes: Vec<u8>) -> Result<Self> {
        let capacity = to_i32(bytes.capacity())?;
        let len = to_i32(bytes.len())?;
        let mut bytes = ManuallyDrop::new(bytes);
        Ok(Self {
            capacity,
            len,
            data: bytes.as_mut_ptr(),
        })
    }

    /// Reclaim the `Vec` behind a buffer built by [`RustBuffer::from_vec`].
    ///
    /// # Safety
    /// The buffer must come from [`RustBuffer::from_vec`] (or be the zero
    /// buffer) and must not have been destroyed already.
    pub unsafe fn destroy_into_vec(self) -> Result<Vec<u8>> {
        if self.data.is_null() {
            if self.len != 0 || self.capacity != 0 {
                return Err(AbiError::InvalidBuffer("null data with non-zero size"));
            }
            return Ok(Vec::new());
        }
        let capacity =
            usize::try_from(self.capacity).map_err(|_| AbiError::NegativeLength(self.capacity))?;
        let len = usize::try_from(self.len).map_err(|_| AbiError::NegativeLength(self.len))?;
        if len > capacity {
            return Err(AbiError::InvalidBuffer("length exceeds capacity"));
        }
        // SAFETY: The caller guarantees the parts came from a leaked Vec<u8>.
        Ok(unsafe { Vec::from_raw_parts(self.data, len, capacity) })
    }
}

/// Allocate a zero-filled buffer of `size` bytes.
pub fn rustbuffer_alloc(size: i32, status: &mut RustCallStatus) -> RustBuffer {
    call_with_status(status, || {
        let size = usize::try_from(size).map_err(|_| AbiError::NegativeLength(size))?;
        Ok(RustBuffer::from_vec(vec![0u8; size])?)
    })
}

/// Copy host bytes into a newly allocated buffer.
///
/// # Safety
/// `bytes` must describe readable host memory for the duration of the call.
pub unsafe fn rustbuffer_from_bytes(bytes: ForeignBytes, status: &mut RustCallStatus) -> RustBuffer {
    call_with_status(status, || {
        if bytes.len < 0 {
            return Err(AbiError::NegativeLength(bytes.len).into());
        }
        // SAFETY: Validity of the host memory is guaranteed by the caller.
        let slice = unsafe { bytes.as_slice() };
        Ok(RustBuffer::from_vec(slice.to_vec())?)
    })
}

/// Release a buffer.
///
/// # Safety
/// `buf` must come from this allocator and must not be used afterwards.
pub unsafe fn rustbuffer_free(buf: RustBuffer, status: &mut RustCallStatus) {
    call_with_status(status, || {
        // SAFETY: Provenance is guaranteed by the caller.
        drop(unsafe { buf.destroy_into_vec() }?);
        Ok(())
    })
}

/// Grow a buffer so that at least `additional` more bytes fit.
///
/// # Safety
/// `buf` must come from this allocator; it is consumed and replaced by the
/// returned buffer.
pub unsafe fn rustbuffer_reserve(
    buf: RustBuffer,
    additional: i32,
    status: &mut RustCallStatus,
) -> RustBuffer {
    call_with_status(status, || {
        let additional =
            usize::try_from(additional).map_err(|_| AbiError::NegativeLength(additional))?;
        // SAFETY: Provenance is guaranteed by the caller.
        let mut bytes = unsafe { buf.destroy_into_vec() }?;
        to_i32(bytes.len().saturating_add(additional))?;
        bytes.reserve(additional);
        RustBuffer::from_vec(bytes).map_err(NativeError::from)
    })
}
