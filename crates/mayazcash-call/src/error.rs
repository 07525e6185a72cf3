use mayazcash_abi::AbiError;
use mayazcash_wire::WireError;

/// An unrecoverable failure at the boundary.
///
/// Every variant means the two sides disagree about the protocol or the
/// native side is in an undefined state. None of them may be treated as a
/// domain error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    /// Encoding or decoding a value failed.
    #[error("wire error: {0}")]
    Wire(#[from] WireError),

    /// A buffer header was invalid or too large.
    #[error("buffer error: {0}")]
    Abi(#[from] AbiError),

    /// The native side panicked and reported a message.
    #[error("native panic: {0}")]
    Panic(String),

    /// The native side panicked and could not report a message.
    #[error("native code panicked while handling a panic")]
    PanicWhileHandlingPanic,

    /// The status code was not 0, 1 or 2.
    #[error("unknown status code: {0}")]
    UnknownStatus(i8),

    /// A function without a declared error type reported code 1.
    #[error("function not returning an error returned an error")]
    UnexpectedError,

    /// The native library was built for another protocol version.
    #[error("{namespace}: UniFFI contract version mismatch (expected {expected}, found {found})")]
    ContractVersionMismatch {
        namespace: &'static str,
        expected: u32,
        found: u32,
    },

    /// A function's signature differs between the two sides.
    #[error(
        "{namespace}: uniffi_{namespace}_checksum_func_{function}: UniFFI API checksum mismatch \
         (expected {expected}, found {found})"
    )]
    ChecksumMismatch {
        namespace: &'static str,
        function: &'static str,
        expected: u16,
        found: u16,
    },

    /// The native library does not export a checksum for a known function.
    #[error("{namespace}: no checksum exported for function {function}")]
    MissingFunction {
        namespace: &'static str,
        function: &'static str,
    },
}

/// Outcome of a call that may fail with a declared error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError<E> {
    /// A declared, recoverable error.
    #[error(transparent)]
    Domain(E),

    /// An unrecoverable boundary failure.
    #[error(transparent)]
    Fault(#[from] Fault),
}

impl<E> CallError<E> {
    /// True for boundary faults, false for declared errors.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    pub fn domain(&self) -> Option<&E> {
        match self {
            Self::Domain(err) => Some(err),
            Self::Fault(_) => None,
        }
    }

    pub fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Domain(_) => None,
            Self::Fault(fault) => Some(fault),
        }
    }
}

impl<E> From<WireError> for CallError<E> {
    fn from(err: WireError) -> Self {
        Self::Fault(Fault::Wire(err))
    }
}

impl<E> From<AbiError> for CallError<E> {
    fn from(err: AbiError) -> Self {
        Self::Fault(Fault::Abi(err))
    }
}

pub type Result<T> = std::result::Result<T, Fault>;
