//! The per-call status machine.
//!
//! Every boundary call gets a fresh, zeroed status slot. After the call the
//! slot's code selects one of three outcomes:
//!
//! | code | meaning | result |
//! |------|---------|--------|
//! | 0 | success | the raw return value |
//! | 1 | declared error | `error_buf` decoded as a tagged error |
//! | 2 | native panic | fatal, with the message from `error_buf` if any |
//! | other | | fatal "unknown status code" |

use mayazcash_abi::{CallCode, NativeAllocator, RustBuffer, RustCallStatus};
use mayazcash_wire::{read_tagged, TaggedError};
use tracing::error;

use crate::buffer::OwnedBuffer;
use crate::error::{CallError, Fault, Result};

/// Invoke a native function that declares an error type.
pub fn call_with_error<A, E, U, F>(alloc: &A, f: F) -> std::result::Result<U, CallError<E>>
where
    A: NativeAllocator + ?Sized,
    E: TaggedError,
    F: FnOnce(&mut RustCallStatus) -> U,
{
    let mut status = RustCallStatus::default();
    let value = f(&mut status);
    match status.call_code() {
        Some(CallCode::Success) => Ok(value),
        Some(CallCode::Error) => {
            let buf = adopt(alloc, status.take_error_buf())?;
            let err = buf.consume(read_tagged::<E>)?;
            Err(CallError::Domain(err))
        }
        Some(CallCode::Panic) => Err(panic_fault(alloc, status.take_error_buf()).into()),
        None => Err(unknown_status(status.code).into()),
    }
}

/// Invoke a native function that declares no error type.
///
/// Code 1 from such a function is itself a fault.
pub fn call<A, U, F>(alloc: &A, f: F) -> Result<U>
where
    A: NativeAllocator + ?Sized,
    F: FnOnce(&mut RustCallStatus) -> U,
{
    let mut status = RustCallStatus::default();
    let value = f(&mut status);
    match status.call_code() {
        Some(CallCode::Success) => Ok(value),
        Some(CallCode::Error) => {
            adopt(alloc, status.take_error_buf())?.release()?;
            Err(Fault::UnexpectedError)
        }
        Some(CallCode::Panic) => Err(panic_fault(alloc, status.take_error_buf())),
        None => Err(unknown_status(status.code)),
    }
}

fn adopt<A: NativeAllocator + ?Sized>(alloc: &A, buf: RustBuffer) -> Result<OwnedBuffer<'_, A>> {
    // SAFETY: The error buffer of a status slot belongs to the caller.
    unsafe { OwnedBuffer::from_raw(alloc, buf) }
}

fn panic_fault<A: NativeAllocator + ?Sized>(alloc: &A, buf: RustBuffer) -> Fault {
    let buf = match adopt(alloc, buf) {
        Ok(buf) => buf,
        Err(fault) => return fault,
    };
    let fault = if buf.is_empty() {
        drop(buf);
        Fault::PanicWhileHandlingPanic
    } else {
        // Best effort: invalid UTF-8 in the message still reports a panic.
        match buf.consume(|bytes| Ok(String::from_utf8_lossy(bytes).into_owned())) {
            Ok(message) => Fault::Panic(message),
            Err(fault) => fault,
        }
    };
    error!(error = %fault, "native call panicked");
    fault
}

fn unknown_status(code: i8) -> Fault {
    error!(code, "native call returned an unknown status code");
    Fault::UnknownStatus(code)
}
