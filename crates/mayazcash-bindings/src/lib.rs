//! Typed Rust bindings for the maya_zcash native component.
//!
//! [`ZcashClient`] wraps any [`ZcashNative`] implementation: it checks the
//! library's contract once, lowers arguments into native buffers, and maps
//! every outcome to either a value, a [`ZcashError`] declared by the
//! component, or a [`Fault`](mayazcash_call::Fault).
//!
//! ```no_run
//! # #[cfg(feature = "link")]
//! # fn demo() -> mayazcash_bindings::Result<()> {
//! let client = mayazcash_bindings::sys::global();
//! let height = client.get_latest_height()?;
//! println!("tip at {}", height.number);
//! # Ok(())
//! # }
//! ```
//!
//! With the `link` feature the crate links against `libmaya_zcash` and
//! [`sys::global`] returns a process-wide client. Without it, callers
//! supply their own [`ZcashNative`].

pub mod client;
pub mod contract;
pub mod error;
pub mod native;
#[cfg(feature = "link")]
pub mod sys;
pub mod types;

pub use client::ZcashClient;
pub use contract::{CHECKSUMS, CONTRACT_VERSION, NAMESPACE};
pub use error::{Result, ZcashError, ZcashErrorKind};
pub use native::ZcashNative;
pub use types::{
    BlockTxs, Direction, Height, Output, PartialTx, Sighashes, TransparentKey, TxBytes, Utxo,
    VaultTx,
};
