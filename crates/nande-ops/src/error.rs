//! Error types for pixel kernels.

use thiserror::Error;

/// Error type for pixel kernels.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Result buffer rejected by the core type.
    #[error(transparent)]
    Buffer(#[from] nande_core::Error),
}

/// Result type for pixel kernels.
pub type OpsResult<T> = Result<T, OpsError>;
