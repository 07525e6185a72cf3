use mayazcash_abi::{NativeAllocator, RustBuffer, RustCallStatus};
use mayazcash_wire::{TaggedError, WireCodec};
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::buffer::OwnedBuffer;
use crate::contract::{verify_contract, ContractDescriptor, ContractReport, ContractSource};
use crate::dispatch::{call, call_with_error};
use crate::error::{CallError, Result};

/// Static configuration of a component binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentConfig {
    /// Namespace used in symbol names and fault messages.
    pub namespace: &'static str,
    /// Contract the native library must match.
    pub contract: ContractDescriptor,
}

/// A native library behind a one-time contract gate.
///
/// The contract is verified on first use and the outcome is kept: every
/// later call sees the same report or the same fault. Verification runs at
/// most once even under concurrent first use.
pub struct Component<L> {
    lib: L,
    config: ComponentConfig,
    gate: OnceCell<Result<ContractReport>>,
}

impl<L> Component<L>
where
    L: NativeAllocator + ContractSource,
{
    pub fn new(lib: L, config: ComponentConfig) -> Self {
        Self {
            lib,
            config,
            gate: OnceCell::new(),
        }
    }

    pub fn library(&self) -> &L {
        &self.lib
    }

    pub fn config(&self) -> &ComponentConfig {
        &self.config
    }

    /// Verify the contract, or replay the outcome of the first verification.
    pub fn initialize(&self) -> Result<&ContractReport> {
        self.gate
            .get_or_init(|| {
                verify_contract(&self.lib, self.config.namespace, &self.config.contract)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Encode an argument into a native buffer.
    pub fn lower<T: WireCodec>(&self, value: &T) -> Result<OwnedBuffer<'_, L>> {
        self.initialize()?;
        OwnedBuffer::lower(&self.lib, value)
    }

    /// Call a function that returns a value directly.
    pub fn call_value<E, U, F>(
        &self,
        function: &'static str,
        f: F,
    ) -> std::result::Result<U, CallError<E>>
    where
        E: TaggedError,
        F: FnOnce(&L, &mut RustCallStatus) -> U,
    {
        self.initialize()?;
        debug!(namespace = self.config.namespace, function, "call");
        call_with_error(&self.lib, |status| f(&self.lib, status))
    }

    /// Call a function that returns a buffer and decode it as `T`.
    pub fn call_buffer<E, T, F>(
        &self,
        function: &'static str,
        f: F,
    ) -> std::result::Result<T, CallError<E>>
    where
        E: TaggedError,
        T: WireCodec,
        F: FnOnce(&L, &mut RustCallStatus) -> RustBuffer,
    {
        let raw = self.call_value::<E, _, _>(function, f)?;
        // SAFETY: A buffer returned with code 0 belongs to the caller.
        let buf = unsafe { OwnedBuffer::from_raw(&self.lib, raw) }?;
        Ok(buf.lift()?)
    }

    /// Call a function without a declared error type.
    pub fn call_infallible<U, F>(&self, function: &'static str, f: F) -> Result<U>
    where
        F: FnOnce(&L, &mut RustCallStatus) -> U,
    {
        self.initialize()?;
        debug!(namespace = self.config.namespace, function, "call");
        call(&self.lib, |status| f(&self.lib, status))
    }
}

impl<L> std::fmt::Debug for Component<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("config", &self.config)
            .field("initialized", &self.gate.get().map(|outcome| outcome.is_ok()))
            .finish()
    }
}
