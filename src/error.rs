use thiserror::Error;

/// Validation failures. All of them are detected before any computation runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuickshiftError {
    #[error("kernel_size must be >= 1, got {0}")]
    InvalidKernelSize(f64),
    #[error("Lab conversion requires {expected} channels, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },
    #[error("sigma must be finite and >= 0, got {0}")]
    InvalidSigma(f64),
    #[error("buffer holds {actual} values, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("feature grid needs at least one channel")]
    ZeroChannels,
}

pub type QuickshiftResult<T> = std::result::Result<T, QuickshiftError>;
