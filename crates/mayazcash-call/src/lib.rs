//! Host-side call runtime for the maya_zcash boundary.
//!
//! A call goes through four steps:
//! 1. The one-time contract gate ([`Component::initialize`])
//! 2. Lowering each argument into an [`OwnedBuffer`]
//! 3. The native call with a fresh status slot ([`dispatch`])
//! 4. Lifting the result and releasing the buffer
//!
//! Outcomes are a value, a declared error ([`CallError::Domain`]) or a
//! [`Fault`]. There is no fourth case.

pub mod buffer;
pub mod component;
pub mod contract;
pub mod dispatch;
pub mod error;

#[cfg(test)]
mod testing;

pub use buffer::OwnedBuffer;
pub use component::{Component, ComponentConfig};
pub use contract::{
    verify_contract, ContractDescriptor, ContractReport, ContractSource, FunctionChecksum,
};
pub use dispatch::{call, call_with_error};
pub use error::{CallError, Fault, Result};
