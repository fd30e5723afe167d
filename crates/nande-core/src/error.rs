//! Error types for nande-core operations.
//!
//! # Usage
//!
//! ```rust
//! use nande_core::{Error, Result};
//!
//! fn check(len: usize, expected: usize) -> Result<()> {
//!     if len != expected {
//!         return Err(Error::buffer_size(expected, len));
//!     }
//!     Ok(())
//! }
//! assert!(check(3, 4).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building buffers and surfaces.
#[derive(Debug, Error)]
pub enum Error {
    /// Region extends beyond the source bounds.
    #[error("region ({rx}, {ry}, {rw}x{rh}) exceeds image bounds {width}x{height}")]
    InvalidRegion {
        /// Region X origin
        rx: u32,
        /// Region Y origin
        ry: u32,
        /// Region width
        rw: u32,
        /// Region height
        rh: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Sample buffer length doesn't match `width * height * channels`.
    #[error("buffer size mismatch: expected {expected} samples, got {got}")]
    BufferSize {
        /// Expected sample count
        expected: usize,
        /// Actual sample count
        got: usize,
    },

    /// Channel count outside the supported 1..=4 range.
    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(u8),
}

impl Error {
    /// Creates an [`Error::InvalidRegion`] error.
    #[inline]
    pub fn invalid_region(rx: u32, ry: u32, rw: u32, rh: u32, width: u32, height: u32) -> Self {
        Self::InvalidRegion {
            rx,
            ry,
            rw,
            rh,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::BufferSize`] error.
    #[inline]
    pub fn buffer_size(expected: usize, got: usize) -> Self {
        Self::BufferSize { expected, got }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::InvalidRegion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_region_message() {
        let err = Error::invalid_region(500, 0, 100, 100, 512, 512);
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("512x512"));
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_buffer_size_message() {
        let err = Error::buffer_size(12, 9);
        assert!(err.to_string().contains("expected 12"));
        assert!(!err.is_bounds_error());
    }
}
