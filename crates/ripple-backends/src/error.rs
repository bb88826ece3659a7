//! Error types for the ripple-backends crate

/// Errors reported by kernel execution backends
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Buffer handle does not refer to a live buffer
    #[error("Invalid buffer handle: {0}")]
    InvalidBufferHandle(u64),

    /// Buffer access outside the allocated range
    #[error("Buffer access out of bounds: offset {offset} + size {size} > buffer size {buffer_size}")]
    BufferOutOfBounds {
        offset: usize,
        size: usize,
        buffer_size: usize,
    },

    /// Kernel touched a binding slot with no buffer bound to it
    #[error("No buffer bound to slot {0}")]
    UnboundSlot(u32),

    /// Kernel violated a binding's declared access mode
    #[error("Access violation on slot {slot}: {reason}")]
    AccessViolation { slot: u32, reason: String },

    /// Kernel dispatch failed
    #[error("Kernel execution failed: {0}")]
    ExecutionError(String),
}

impl BackendError {
    /// Build an [`BackendError::ExecutionError`] from any message
    pub fn execution_error(msg: impl Into<String>) -> Self {
        Self::ExecutionError(msg.into())
    }
}

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;
