/// Errors that can occur while encoding or decoding wire values.
///
/// Every variant means the two sides of the boundary disagree about the
/// format. None of them is a recoverable domain condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// The buffer ended before the value was complete.
    #[error("buffer truncated reading {what}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        what: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// A length does not fit the signed 32-bit prefix.
    #[error("{what} too large ({size}, max {max})")]
    TooLarge {
        what: &'static str,
        size: usize,
        max: usize,
    },

    /// A length prefix read from the wire was negative.
    #[error("negative length prefix {0}")]
    NegativeLength(i32),

    /// A string payload was not valid UTF-8.
    #[error("invalid UTF-8 in string payload")]
    InvalidUtf8,

    /// An optional value carried a presence byte other than 0 or 1.
    #[error("invalid presence byte {0:#04x} for optional value")]
    InvalidPresence(u8),

    /// An enum or error discriminant is not part of the closed set.
    #[error("unknown discriminant {value} for {type_name}")]
    UnknownDiscriminant { type_name: &'static str, value: i64 },

    /// Bytes were left over after a complete top-level value was read.
    #[error("junk remaining in buffer after lifting ({remaining} bytes)")]
    TrailingData { remaining: usize },
}

pub type Result<T> = std::result::Result<T, WireError>;
