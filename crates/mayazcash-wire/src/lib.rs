//! Value codec for the maya_zcash FFI boundary.
//!
//! Every value that crosses the boundary travels inside a byte buffer using
//! one fixed layout:
//! - Fixed-width integers and floats in big-endian order
//! - Booleans as a single byte
//! - Strings and byte blobs as an `i32` length followed by the bytes
//! - Sequences as an `i32` count followed by each element
//! - Optionals as a presence byte (`0`/`1`) followed by the value
//! - Records as their fields in declaration order
//!
//! ```text
//! Height { number: 1000, hash: [0; 32] }
//! ┌──────────────┬──────────────┬─────────────────────┐
//! │ 00 00 03 E8  │ 00 00 00 20  │ 00 .. 00 (32 bytes) │
//! │ number (u32) │ hash length  │ hash                │
//! └──────────────┴──────────────┴─────────────────────┘
//! ```
//!
//! This crate knows nothing about FFI; it turns values into bytes and back.

pub mod codec;
pub mod error;
pub mod primitive;
pub mod record;
pub mod tagged;

#[doc(hidden)]
pub use bytes;

pub use codec::WireCodec;
pub use error::{Result, WireError};
pub use primitive::{length_prefix, put_prefixed, WireReader, LENGTH_PREFIX_SIZE, MAX_LENGTH_PREFIX};
pub use tagged::{read_tagged, write_tagged, TaggedError};
