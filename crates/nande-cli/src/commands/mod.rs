//! CLI command implementations

pub mod info;
#[cfg(feature = "viewer")]
pub mod view;

use anyhow::{Context, Result};
use nande_core::PixelBuffer;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    nande_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Human-readable byte size.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
