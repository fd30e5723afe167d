//! # nande-ops
//!
//! Pixel kernels behind the viewer's inspection modes.
//!
//! Every kernel reads a [`PixelBuffer`](nande_core::PixelBuffer) and returns
//! a new one; inputs are never modified.
//!
//! - [`channel`] - Single-channel grayscale views
//! - [`luma`] - BT.709 luminance, encoded or linear
//! - [`invert`] - Naive and gamma-aware negatives
//!
//! # Example
//!
//! ```rust
//! use nande_core::PixelBuffer;
//! use nande_ops::{extract_channel, invert_linear, Channel};
//!
//! let buf = PixelBuffer::from_u8(1, 1, 3, vec![128, 64, 32]).unwrap();
//! let red = extract_channel(&buf, Channel::Red).unwrap();
//! let negative = invert_linear(&buf).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod channel;
pub mod invert;
pub mod luma;

pub use channel::{extract_channel, Channel};
pub use error::{OpsError, OpsResult};
pub use invert::{invert, invert_linear};
pub use luma::{luminance, LumaMode};
