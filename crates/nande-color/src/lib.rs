//! # nande-color
//!
//! Color handling for the nande viewer.
//!
//! - [`transfer`] - sRGB and pure-gamma encode/decode curves
//! - [`DisplayTransform`] - the display/view service the viewer pipeline calls
//! - [`DisplayConfig`] - built-in or YAML-configured display/view pairs
//!
//! # Example
//!
//! ```rust
//! use nande_color::{DisplayConfig, DisplayTransform};
//!
//! let config = DisplayConfig::builtin();
//! let (display, view) = config.default_pair().unwrap();
//! let mut pixels = vec![[0.5f32, 0.25, 0.0]; 16];
//! config.apply(&mut pixels, &display, &view).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod display;
mod error;
pub mod transfer;

pub use display::{DisplayConfig, DisplayDef, DisplayTransform, ViewDef};
pub use error::{ColorError, ColorResult};
pub use transfer::TransferFunction;
