//! Shared fixtures for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use mayazcash_abi::{
    ForeignBytes, LocalAllocator, NativeAllocator, RustBuffer, RustCallStatus, CALL_SUCCESS,
};
use mayazcash_wire::TaggedError;

use crate::contract::ContractSource;

/// Heap allocator that records every entry-point call.
#[derive(Debug, Default)]
pub(crate) struct CountingAllocator {
    calls: AtomicUsize,
    frees: AtomicUsize,
    /// Live buffers by data address. Empty vectors share a dangling address.
    owned: Mutex<HashMap<usize, usize>>,
}

impl CountingAllocator {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn frees(&self) -> usize {
        self.frees.load(Ordering::SeqCst)
    }

    /// Buffers allocated here and not yet freed. Frees of buffers built
    /// elsewhere do not count against it.
    pub(crate) fn live(&self) -> usize {
        self.owned().values().sum()
    }

    fn owned(&self) -> MutexGuard<'_, HashMap<usize, usize>> {
        self.owned.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn adopt(owned: &mut HashMap<usize, usize>, data: *mut u8) {
        if !data.is_null() {
            *owned.entry(data as usize).or_default() += 1;
        }
    }

    /// Returns whether `data` was handed out by this allocator.
    fn disown(owned: &mut HashMap<usize, usize>, data: *mut u8) -> bool {
        let key = data as usize;
        match owned.get_mut(&key) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                owned.remove(&key);
                true
            }
            None => false,
        }
    }

    fn record_alloc(&self, buf: &RustBuffer, status: &RustCallStatus) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if status.code == CALL_SUCCESS {
            Self::adopt(&mut self.owned(), buf.data);
        }
    }
}

impl NativeAllocator for CountingAllocator {
    fn rustbuffer_alloc(&self, size: i32, status: &mut RustCallStatus) -> RustBuffer {
        let buf = LocalAllocator.rustbuffer_alloc(size, status);
        self.record_alloc(&buf, status);
        buf
    }

    unsafe fn rustbuffer_from_bytes(
        &self,
        bytes: ForeignBytes,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        let buf = unsafe { LocalAllocator.rustbuffer_from_bytes(bytes, status) };
        self.record_alloc(&buf, status);
        buf
    }

    unsafe fn rustbuffer_free(&self, buf: RustBuffer, status: &mut RustCallStatus) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.frees.fetch_add(1, Ordering::SeqCst);
        Self::disown(&mut self.owned(), buf.data);
        unsafe { LocalAllocator.rustbuffer_free(buf, status) }
    }

    unsafe fn rustbuffer_reserve(
        &self,
        buf: RustBuffer,
        additional: i32,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let old = buf.data;
        let grown = unsafe { LocalAllocator.rustbuffer_reserve(buf, additional, status) };
        if status.code == CALL_SUCCESS {
            let mut owned = self.owned();
            if Self::disown(&mut owned, old) || old.is_null() {
                Self::adopt(&mut owned, grown.data);
            }
        }
        grown
    }
}

/// A library exposing a fixed contract.
#[derive(Debug, Default)]
pub(crate) struct FixedContract {
    pub(crate) alloc: CountingAllocator,
    pub(crate) version: u32,
    pub(crate) checksums: Vec<(&'static str, u16)>,
    pub(crate) contract_reads: AtomicUsize,
}

impl NativeAllocator for FixedContract {
    fn rustbuffer_alloc(&self, size: i32, status: &mut RustCallStatus) -> RustBuffer {
        self.alloc.rustbuffer_alloc(size, status)
    }

    unsafe fn rustbuffer_from_bytes(
        &self,
        bytes: ForeignBytes,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        unsafe { self.alloc.rustbuffer_from_bytes(bytes, status) }
    }

    unsafe fn rustbuffer_free(&self, buf: RustBuffer, status: &mut RustCallStatus) {
        unsafe { self.alloc.rustbuffer_free(buf, status) }
    }

    unsafe fn rustbuffer_reserve(
        &self,
        buf: RustBuffer,
        additional: i32,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        unsafe { self.alloc.rustbuffer_reserve(buf, additional, status) }
    }
}

impl ContractSource for FixedContract {
    fn contract_version(&self, _status: &mut RustCallStatus) -> u32 {
        self.contract_reads.fetch_add(1, Ordering::SeqCst);
        self.version
    }

    fn function_checksum(&self, function: &str, _status: &mut RustCallStatus) -> Option<u16> {
        self.checksums
            .iter()
            .find(|(name, _)| *name == function)
            .map(|(_, checksum)| *checksum)
    }
}

/// Single-variant error family with discriminant 6.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Refused(pub(crate) String);

impl TaggedError for Refused {
    const TYPE_NAME: &'static str = "Refused";

    fn from_tag(tag: u32, message: String) -> Option<Self> {
        (tag == 6).then_some(Self(message))
    }

    fn tag(&self) -> u32 {
        6
    }

    fn message(&self) -> &str {
        &self.0
    }
}
