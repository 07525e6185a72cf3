//! C-ABI types shared by both sides of the maya_zcash boundary.
//!
//! Three `#[repr(C)]` types carry every call:
//! - [`RustBuffer`]: a native-owned byte buffer (`capacity`, `len`, `data`)
//! - [`ForeignBytes`]: a borrowed view of host memory
//! - [`RustCallStatus`]: the status slot (`0` success, `1` declared error,
//!   `2` unrecoverable) plus an error buffer
//!
//! The [`scaffold`] and [`buffer`] modules hold the native-side half of the
//! protocol for components written in Rust.

pub mod allocator;
pub mod buffer;
pub mod error;
pub mod scaffold;
pub mod types;

pub use allocator::{LocalAllocator, NativeAllocator};
pub use error::{AbiError, Result};
pub use scaffold::{call_with_status, lift_arg, lower_error, lower_return, NativeError};
pub use types::{
    CallCode, ForeignBytes, RustBuffer, RustCallStatus, CALL_ERROR, CALL_PANIC, CALL_SUCCESS,
};
