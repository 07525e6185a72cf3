use std::fmt;

use mayazcash_call::CallError;
use mayazcash_wire::TaggedError;

/// Errors the component declares.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ZcashError {
    #[error("Rpc: {0}")]
    Rpc(String),

    #[error("InvalidVaultPubkey: {0}")]
    InvalidVaultPubkey(String),

    #[error("InvalidAddress: {0}")]
    InvalidAddress(String),

    #[error("NoOrchardReceiver: {0}")]
    NoOrchardReceiver(String),

    #[error("NotEnoughFunds: {0}")]
    NotEnoughFunds(String),

    #[error("TxRejected: {0}")]
    TxRejected(String),

    /// The chain changed under a scan; rescan from an earlier hash.
    #[error("Reorg: {0}")]
    Reorg(String),

    #[error("AssertError: {0}")]
    AssertError(String),
}

/// Fieldless sentinel for each [`ZcashError`] variant.
///
/// Lets callers test an error's kind without matching on its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZcashErrorKind {
    Rpc = 1,
    InvalidVaultPubkey = 2,
    InvalidAddress = 3,
    NoOrchardReceiver = 4,
    NotEnoughFunds = 5,
    TxRejected = 6,
    Reorg = 7,
    AssertError = 8,
}

impl ZcashErrorKind {
    pub const ALL: [Self; 8] = [
        Self::Rpc,
        Self::InvalidVaultPubkey,
        Self::InvalidAddress,
        Self::NoOrchardReceiver,
        Self::NotEnoughFunds,
        Self::TxRejected,
        Self::Reorg,
        Self::AssertError,
    ];

    /// Wire discriminant.
    pub fn tag(self) -> u32 {
        self as u32
    }

    pub fn from_tag(tag: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Rpc => "Rpc",
            Self::InvalidVaultPubkey => "InvalidVaultPubkey",
            Self::InvalidAddress => "InvalidAddress",
            Self::NoOrchardReceiver => "NoOrchardReceiver",
            Self::NotEnoughFunds => "NotEnoughFunds",
            Self::TxRejected => "TxRejected",
            Self::Reorg => "Reorg",
            Self::AssertError => "AssertError",
        }
    }
}

impl fmt::Display for ZcashErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ZcashError {
    pub fn new(kind: ZcashErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ZcashErrorKind::Rpc => Self::Rpc(message),
            ZcashErrorKind::InvalidVaultPubkey => Self::InvalidVaultPubkey(message),
            ZcashErrorKind::InvalidAddress => Self::InvalidAddress(message),
            ZcashErrorKind::NoOrchardReceiver => Self::NoOrchardReceiver(message),
            ZcashErrorKind::NotEnoughFunds => Self::NotEnoughFunds(message),
            ZcashErrorKind::TxRejected => Self::TxRejected(message),
            ZcashErrorKind::Reorg => Self::Reorg(message),
            ZcashErrorKind::AssertError => Self::AssertError(message),
        }
    }

    pub fn kind(&self) -> ZcashErrorKind {
        match self {
            Self::Rpc(_) => ZcashErrorKind::Rpc,
            Self::InvalidVaultPubkey(_) => ZcashErrorKind::InvalidVaultPubkey,
            Self::InvalidAddress(_) => ZcashErrorKind::InvalidAddress,
            Self::NoOrchardReceiver(_) => ZcashErrorKind::NoOrchardReceiver,
            Self::NotEnoughFunds(_) => ZcashErrorKind::NotEnoughFunds,
            Self::TxRejected(_) => ZcashErrorKind::TxRejected,
            Self::Reorg(_) => ZcashErrorKind::Reorg,
            Self::AssertError(_) => ZcashErrorKind::AssertError,
        }
    }

    /// True if this error is of `kind`.
    pub fn is(&self, kind: ZcashErrorKind) -> bool {
        self.kind() == kind
    }
}

impl TaggedError for ZcashError {
    const TYPE_NAME: &'static str = "ZcashError";

    fn from_tag(tag: u32, message: String) -> Option<Self> {
        ZcashErrorKind::from_tag(tag).map(|kind| Self::new(kind, message))
    }

    fn tag(&self) -> u32 {
        self.kind().tag()
    }

    fn message(&self) -> &str {
        match self {
            Self::Rpc(message)
            | Self::InvalidVaultPubkey(message)
            | Self::InvalidAddress(message)
            | Self::NoOrchardReceiver(message)
            | Self::NotEnoughFunds(message)
            | Self::TxRejected(message)
            | Self::Reorg(message)
            | Self::AssertError(message) => message,
        }
    }
}

/// Result of a component call.
pub type Result<T> = std::result::Result<T, CallError<ZcashError>>;
