//! # nande-io
//!
//! Image decoding for the nande viewer.
//!
//! The viewer core never touches files. This crate turns a path into a
//! [`PixelBuffer`] at full source precision and owns the raster extension
//! allow-list used to filter drag-and-drop.
//!
//! | Format | Extensions | Samples |
//! |--------|------------|---------|
//! | JPEG | jpg, jpeg, jfif | 8-bit |
//! | PNG | png | 8-bit, 16-bit as float |
//! | TIFF | tif, tiff | 8-bit, 16-bit and float as float |
//! | GIF | gif | 8-bit (first frame) |
//! | ICO | ico | 8-bit |
//! | BMP | bmp | 8-bit |
//! | WebP | webp | 8-bit |
//!
//! # Quick Start
//!
//! ```rust,ignore
//! let buffer = nande_io::read("plate.png")?;
//! println!("{}x{}", buffer.width(), buffer.height());
//! ```
//!
//! # Dependencies
//!
//! - [`image`] - Format decoders

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;

pub use detect::{is_supported_path, Format, VALID_EXTENSIONS};
pub use error::{IoError, IoResult};

use std::path::Path;
use std::time::Instant;

use image::DynamicImage;
use nande_core::PixelBuffer;
use tracing::debug;

/// Reads an image from a file.
///
/// 8-bit sources stay 8-bit. Deeper integer sources are normalized to float
/// so the viewer keeps their precision for channel and tone operations.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, the format is not on the
/// allow-list, or the decoder rejects the content.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    if format == Format::Unknown {
        return Err(IoError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        ));
    }

    let start = Instant::now();
    let image = image::open(path).map_err(|e| IoError::DecodeError(e.to_string()))?;
    let buffer = to_buffer(image)?;
    debug!(
        path = %path.display(),
        ?format,
        width = buffer.width(),
        height = buffer.height(),
        channels = buffer.channels(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "decoded image"
    );
    Ok(buffer)
}

/// Decodes an in-memory encoded image.
pub fn decode_bytes(bytes: &[u8]) -> IoResult<PixelBuffer> {
    if Format::from_bytes(bytes) == Format::Unknown {
        return Err(IoError::UnsupportedFormat("unrecognized header".into()));
    }
    let image = image::load_from_memory(bytes).map_err(|e| IoError::DecodeError(e.to_string()))?;
    to_buffer(image)
}

fn to_buffer(image: DynamicImage) -> IoResult<PixelBuffer> {
    let (w, h) = (image.width(), image.height());
    let buffer = match image {
        DynamicImage::ImageLuma8(b) => PixelBuffer::from_u8(w, h, 1, b.into_raw()),
        DynamicImage::ImageLumaA8(b) => PixelBuffer::from_u8(w, h, 2, b.into_raw()),
        DynamicImage::ImageRgb8(b) => PixelBuffer::from_u8(w, h, 3, b.into_raw()),
        DynamicImage::ImageRgba8(b) => PixelBuffer::from_u8(w, h, 4, b.into_raw()),
        DynamicImage::ImageRgb32F(b) => PixelBuffer::from_f32(w, h, 3, b.into_raw()),
        DynamicImage::ImageRgba32F(b) => PixelBuffer::from_f32(w, h, 4, b.into_raw()),
        other if other.color().has_alpha() => {
            PixelBuffer::from_f32(w, h, 4, other.to_rgba32f().into_raw())
        }
        other => PixelBuffer::from_f32(w, h, 3, other.to_rgb32f().into_raw()),
    }?;
    Ok(buffer)
}
