/// Errors raised while building or validating a C-ABI buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    #[error("buffer too large ({size} bytes, max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("negative buffer size {0}")]
    NegativeLength(i32),

    #[error("invalid buffer: {0}")]
    InvalidBuffer(&'static str),
}

pub type Result<T> = std::result::Result<T, AbiError>;
