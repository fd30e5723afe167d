//! Error types for display transforms.

use thiserror::Error;

/// Display transform error.
#[derive(Debug, Error)]
pub enum ColorError {
    /// No display with this name is configured.
    #[error("display not found: {0}")]
    DisplayNotFound(String),

    /// The display exists but has no view with this name.
    #[error("view '{view}' not found for display '{display}'")]
    ViewNotFound {
        /// Display that was searched.
        display: String,
        /// Requested view.
        view: String,
    },

    /// Config file could not be parsed or is structurally invalid.
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
