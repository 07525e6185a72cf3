use crate::buffer;
use crate::types::{ForeignBytes, RustBuffer, RustCallStatus};

/// The four buffer-management entry points every native component exports.
///
/// Implemented by the linked library and by in-process fakes. Calls report
/// through `status` like any other boundary call; none of them declares an
/// error type.
pub trait NativeAllocator {
    /// Allocate a zero-filled buffer of `size` bytes.
    fn rustbuffer_alloc(&self, size: i32, status: &mut RustCallStatus) -> RustBuffer;

    /// Copy host bytes into a new native buffer.
    ///
    /// # Safety
    /// `bytes` must describe readable memory for the duration of the call.
    unsafe fn rustbuffer_from_bytes(
        &self,
        bytes: ForeignBytes,
        status: &mut RustCallStatus,
    ) -> RustBuffer;

    /// Release a buffer.
    ///
    /// # Safety
    /// `buf` must come from this allocator and must not be released twice.
    unsafe fn rustbuffer_free(&self, buf: RustBuffer, status: &mut RustCallStatus);

    /// Grow a buffer, consuming it and returning its replacement.
    ///
    /// # Safety
    /// `buf` must come from this allocator.
    unsafe fn rustbuffer_reserve(
        &self,
        buf: RustBuffer,
        additional: i32,
        status: &mut RustCallStatus,
    ) -> RustBuffer;
}

/// Allocator backed by this process's Rust heap.
///
/// The right choice when the component itself is written in Rust and
/// linked into the same binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAllocator;

impl NativeAllocator for LocalAllocator {
    fn rustbuffer_alloc(&self, size: i32, status: &mut RustCallStatus) -> RustBuffer {
        buffer::rustbuffer_alloc(size, status)
    }

    unsafe fn rustbuffer_from_bytes(
        &self,
        bytes: ForeignBytes,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        // SAFETY: Forwarded caller contract.
        unsafe { buffer::rustbuffer_from_bytes(bytes, status) }
    }

    unsafe fn rustbuffer_free(&self, buf: RustBuffer, status: &mut RustCallStatus) {
        // SAFETY: Forwarded caller contract.
        unsafe { buffer::rustbuffer_free(buf, status) }
    }

    unsafe fn rustbuffer_reserve(
        &self,
        buf: RustBuffer,
        additional: i32,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        // SAFETY: Forwarded caller contract.
        unsafe { buffer::rustbuffer_reserve(buf, additional, status) }
    }
}
