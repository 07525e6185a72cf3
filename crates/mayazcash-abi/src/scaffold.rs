//! Native-side call boundary.
//!
//! Everything a Rust implementation of the component needs to honor the
//! call-status convention: run the body, report the outcome in the status
//! slot, and never let a panic unwind into foreign code.

use std::panic::{self, AssertUnwindSafe};

use mayazcash_wire::{write_tagged, TaggedError, WireCodec, WireError};
use tracing::error;

use crate::error::AbiError;
use crate::types::{RustBuffer, RustCallStatus, CALL_ERROR, CALL_PANIC, CALL_SUCCESS};

/// Why a native call did not produce a value.
#[derive(Debug)]
pub enum NativeError {
    /// A declared error, already serialized with [`write_tagged`].
    Domain(RustBuffer),
    /// An unrecoverable failure, reported with code 2.
    Internal(String),
}

impl From<AbiError> for NativeError {
    fn from(err: AbiError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<WireError> for NativeError {
    fn from(err: WireError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Run `f` and record its outcome in `status`.
///
/// On failure the returned value is `T::default()`, which the caller must
/// ignore. A panic inside `f` is caught and reported as code 2 with the
/// panic message; if building that message panics too, the error buffer
/// is left empty.
pub fn call_with_status<T, F>(status: &mut RustCallStatus, f: F) -> T
where
    T: Default,
    F: FnOnce() -> Result<T, NativeError>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => {
            status.code = CALL_SUCCESS;
            value
        }
        Ok(Err(NativeError::Domain(buf))) => {
            status.code = CALL_ERROR;
            status.error_buf = buf;
            T::default()
        }
        Ok(Err(NativeError::Internal(message))) => {
            error!(%message, "native call failed");
            status.code = CALL_PANIC;
            status.error_buf = message_buffer(message);
            T::default()
        }
        Err(payload) => {
            status.code = CALL_PANIC;
            status.error_buf = panic::catch_unwind(AssertUnwindSafe(|| {
                let message = panic_message(payload.as_ref());
                error!(%message, "panic in native call");
                message_buffer(message)
            }))
            .unwrap_or_default();
            T::default()
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_owned()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_owned()
    }
}

fn message_buffer(message: String) -> RustBuffer {
    RustBuffer::from_vec(message.into_bytes()).unwrap_or_default()
}

/// Take ownership of an argument buffer and decode it.
///
/// # Safety
/// `buf` must have been allocated by this side's allocator and is consumed.
pub unsafe fn lift_arg<T: WireCodec>(buf: RustBuffer) -> Result<T, NativeError> {
    // SAFETY: Provenance is guaranteed by the caller.
    let bytes = unsafe { buf.destroy_into_vec() }?;
    Ok(T::from_wire(&bytes)?)
}

/// Encode a return value into a fresh buffer.
pub fn lower_return<T: WireCodec>(value: &T) -> Result<RustBuffer, NativeError> {
    let bytes = value.to_wire()?;
    Ok(RustBuffer::from_vec(bytes.to_vec())?)
}

/// Encode a declared error for the code 1 path.
pub fn lower_error<E: TaggedError>(err: &E) -> NativeError {
    let encoded = write_tagged(err)
        .map_err(NativeError::from)
        .and_then(|bytes| RustBuffer::from_vec(bytes.to_vec()).map_err(NativeError::from));
    match encoded {
        Ok(buf) => NativeError::Domain(buf),
        Err(failure) => failure,
    }
}
