//! Error types for I/O operations.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Extension or content not on the supported list.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoder rejected the file.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Decoded pixels could not form a buffer.
    #[error("invalid image data: {0}")]
    Buffer(#[from] nande_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
