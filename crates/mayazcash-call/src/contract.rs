use mayazcash_abi::{NativeAllocator, RustCallStatus};
use serde::Serialize;
use tracing::{debug, error};

use crate::dispatch::call;
use crate::error::{Fault, Result};

/// Contract queries a native library answers before any other call.
pub trait ContractSource {
    /// Protocol version the library was built against.
    fn contract_version(&self, status: &mut RustCallStatus) -> u32;

    /// Checksum of `function`'s signature, or `None` if the library does
    /// not export one.
    fn function_checksum(&self, function: &str, status: &mut RustCallStatus) -> Option<u16>;
}

/// Expected checksum for one function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionChecksum {
    pub function: &'static str,
    pub checksum: u16,
}

/// Compiled-in description of the protocol a binding speaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractDescriptor {
    pub protocol_version: u32,
    /// In declaration order, so the first mismatch is deterministic.
    pub checksums: Vec<FunctionChecksum>,
}

impl ContractDescriptor {
    pub fn new(protocol_version: u32) -> Self {
        Self {
            protocol_version,
            checksums: Vec::new(),
        }
    }

    pub fn with_function(mut self, function: &'static str, checksum: u16) -> Self {
        self.checksums.push(FunctionChecksum { function, checksum });
        self
    }

    pub fn checksum_for(&self, function: &str) -> Option<u16> {
        self.checksums
            .iter()
            .find(|entry| entry.function == function)
            .map(|entry| entry.checksum)
    }
}

/// Outcome of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractReport {
    pub namespace: &'static str,
    pub protocol_version: u32,
    pub functions_checked: usize,
}

/// Compare a library's contract with `expected`.
///
/// Stops at the first mismatch: the version is checked first, then each
/// function checksum in declaration order.
pub fn verify_contract<L>(
    lib: &L,
    namespace: &'static str,
    expected: &ContractDescriptor,
) -> Result<ContractReport>
where
    L: NativeAllocator + ContractSource + ?Sized,
{
    let found = call(lib, |status| lib.contract_version(status))?;
    if found != expected.protocol_version {
        error!(
            namespace,
            expected = expected.protocol_version,
            found,
            "contract version mismatch"
        );
        return Err(Fault::ContractVersionMismatch {
            namespace,
            expected: expected.protocol_version,
            found,
        });
    }

    for entry in &expected.checksums {
        let found = call(lib, |status| lib.function_checksum(entry.function, status))?.ok_or(
            Fault::MissingFunction {
                namespace,
                function: entry.function,
            },
        )?;
        if found != entry.checksum {
            error!(
                namespace,
                function = entry.function,
                expected = entry.checksum,
                found,
                "function checksum mismatch"
            );
            return Err(Fault::ChecksumMismatch {
                namespace,
                function: entry.function,
                expected: entry.checksum,
                found,
            });
        }
    }

    debug!(
        namespace,
        version = found,
        functions = expected.checksums.len(),
        "contract verified"
    );
    Ok(ContractReport {
        namespace,
        protocol_version: found,
        functions_checked: expected.checksums.len(),
    })
}
