//! Host-side bindings for the maya_zcash native component.
//!
//! # Crate Structure
//!
//! - [`wire`]: big-endian, length-prefixed value codec
//! - [`abi`]: C-ABI buffer and call-status types
//! - [`call`]: call dispatch, buffer ownership and contract verification
//! - [`bindings`]: the component's records, errors and typed client
//!
//! The most used items of [`bindings`] are re-exported at the root.

/// Re-export wire codec types.
pub mod wire {
    pub use mayazcash_wire::*;
}

/// Re-export C-ABI types.
pub mod abi {
    pub use mayazcash_abi::*;
}

/// Re-export call runtime types.
pub mod call {
    pub use mayazcash_call::*;
}

/// Re-export component bindings.
pub mod bindings {
    pub use mayazcash_bindings::*;
}

pub use mayazcash_bindings::{Result, ZcashClient, ZcashError, ZcashErrorKind, ZcashNative};
pub use mayazcash_call::{CallError, Fault};
