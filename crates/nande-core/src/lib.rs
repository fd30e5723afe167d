//! # nande-core
//!
//! Core types for the nande image viewer.
//!
//! This crate provides the plain-data types shared by every other nande crate:
//!
//! - [`PixelBuffer`] - Full-precision decoded pixels (u8, f16 or f32 samples)
//! - [`Surface`] - Immutable display-ready RGBA8 pixels
//! - [`BitDepth`], [`PixelFormat`] - Sample type and channel layout
//! - [`PointF`], [`SizeF`], [`RectF`], [`Rect`] - Geometry in image and view space
//! - [`Rgba8`] - 8-bit color used for backgrounds and grid strokes
//!
//! ## Ownership
//!
//! Buffers and surfaces are never mutated in place once built. Every
//! operation that changes pixels returns a new value, so a surface handed to
//! the renderer can never be corrupted by a later transform.
//!
//! ```text
//! nande-core (this crate)
//!    ^
//!    |
//!    +-- nande-io (decoding)
//!    +-- nande-ops (pixel kernels)
//!    +-- nande-color (display transforms)
//!    +-- nande-view (viewport, grid, tiles, pipeline, host)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod color;
pub mod error;
pub mod format;
pub mod geometry;
pub mod surface;

pub use buffer::{quantize, PixelBuffer, PixelData};
pub use color::Rgba8;
pub use error::{Error, Result};
pub use format::{BitDepth, PixelFormat};
pub use geometry::{PointF, Rect, RectF, SizeF};
pub use surface::Surface;

/// Prelude module for convenient imports.
///
/// ```
/// use nande_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::{PixelBuffer, PixelData};
    pub use crate::color::Rgba8;
    pub use crate::error::{Error, Result};
    pub use crate::format::{BitDepth, PixelFormat};
    pub use crate::geometry::{PointF, Rect, RectF, SizeF};
    pub use crate::surface::Surface;
}
