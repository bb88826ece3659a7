//! Error types for the ripple-core crate

/// Errors that can occur while summing digit vectors
#[derive(Debug, thiserror::Error)]
pub enum SumError {
    /// Operand failed validation
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    /// Carry propagation exceeded the safe pass bound
    #[error("Carry propagation did not settle after {passes} passes (width {width})")]
    NonConvergence { passes: usize, width: usize },

    /// Underlying backend failure
    #[error(transparent)]
    Backend(#[from] ripple_backends::BackendError),
}

/// Result type for summation operations
pub type Result<T> = std::result::Result<T, SumError>;
