use std::ptr;

use crate::error::{AbiError, Result};

/// Call completed and the return value is valid.
pub const CALL_SUCCESS: i8 = 0;
/// Call failed with a declared error serialized in `error_buf`.
pub const CALL_ERROR: i8 = 1;
/// Call hit an unrecoverable failure; `error_buf` may hold a message.
pub const CALL_PANIC: i8 = 2;

/// A byte buffer owned by the native allocator.
///
/// Layout matches the C declaration `{ int32_t capacity; int32_t len;
/// uint8_t *data; }`. Neither `Copy` nor `Clone`:
/// every value is a unique claim on native memory.
#[repr(C)]
#[derive(Debug)]
pub struct RustBuffer {
    pub capacity: i32,
    pub len: i32,
    pub data: *mut u8,
}

impl Default for RustBuffer {
    fn default() -> Self {
        Self {
            capacity: 0,
            len: 0,
            data: ptr::null_mut(),
        }
    }
}

impl RustBuffer {
    /// Payload length; a negative `len` counts as zero.
    pub fn len(&self) -> usize {
        usize::try_from(self.len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len <= 0
    }

    /// Check the header fields before any byte is read.
    pub fn validate(&self) -> Result<()> {
        if self.len < 0 {
            return Err(AbiError::NegativeLength(self.len));
        }
        if self.capacity < 0 {
            return Err(AbiError::NegativeLength(self.capacity));
        }
        if self.data.is_null() && self.len != 0 {
            return Err(AbiError::InvalidBuffer("null data with non-zero length"));
        }
        Ok(())
    }

    /// Borrow the payload without taking ownership.
    ///
    /// # Safety
    /// `data` must point to at least `len` initialized bytes that stay valid
    /// and unmodified for the returned lifetime.
    pub unsafe fn as_slice(&self) -> &[u8] {
        if self.data.is_null() || self.len <= 0 {
            return &[];
        }
        // SAFETY: Pointer validity and length are guaranteed by the caller.
        unsafe { std::slice::from_raw_parts(self.data, self.len()) }
    }
}

/// A borrowed view of host memory handed to the native side.
///
/// Valid only while the slice it was built from is alive.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ForeignBytes {
    pub len: i32,
    pub data: *const u8,
}

impl ForeignBytes {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let len = i32::try_from(bytes.len()).map_err(|_| AbiError::TooLarge {
            size: bytes.len(),
            max: i32::MAX as usize,
        })?;
        Ok(Self {
            len,
            data: bytes.as_ptr(),
        })
    }

    /// # Safety
    /// `data` must point to at least `len` readable bytes for the returned
    /// lifetime.
    pub unsafe fn as_slice(&self) -> &[u8] {
        if self.data.is_null() || self.len <= 0 {
            return &[];
        }
        let len = usize::try_from(self.len).unwrap_or(0);
        // SAFETY: Pointer validity and length are guaranteed by the caller.
        unsafe { std::slice::from_raw_parts(self.data, len) }
    }
}

/// Out-parameter every boundary call fills in.
#[repr(C)]
#[derive(Debug, Default)]
pub struct RustCallStatus {
    pub code: i8,
    pub error_buf: RustBuffer,
}

impl RustCallStatus {
    /// Interpret `code`, or `None` if it is outside the known set.
    pub fn call_code(&self) -> Option<CallCode> {
        CallCode::from_raw(self.code)
    }

    /// Move the error buffer out, leaving an empty one behind.
    pub fn take_error_buf(&mut self) -> RustBuffer {
        std::mem::take(&mut self.error_buf)
    }
}

/// The three outcomes a call status may report.
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallCode {
    Success = CALL_SUCCESS,
    Error = CALL_ERROR,
    Panic = CALL_PANIC,
}

impl CallCode {
    pub fn from_raw(code: i8) -> Option<Self> {
        match code {
            CALL_SUCCESS => Some(Self::Success),
            CALL_ERROR => Some(Self::Error),
            CALL_PANIC => Some(Self::Panic),
            _ => None,
        }
    }
}
