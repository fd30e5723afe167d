//! Display-ready surfaces.
//!
//! A [`Surface`] is what the host uploads and draws: 8-bit RGBA pixels plus
//! the [`PixelFormat`] of the data it was produced from. Pixels live behind an
//! `Arc`, so clones are cheap and a surface can never change after it is
//! built. Producing new content means producing a new surface.

use std::sync::Arc;

use crate::{Error, PixelBuffer, PixelFormat, Rect, Result};

/// Immutable RGBA8 pixel surface.
///
/// # Example
///
/// ```rust
/// use nande_core::{PixelBuffer, Rect, Surface};
///
/// let buf = PixelBuffer::from_u8(4, 4, 3, vec![128; 48]).unwrap();
/// let surface = Surface::from_buffer(&buf);
/// let tile = surface.crop(Rect::new(2, 2, 2, 2)).unwrap();
/// assert_eq!(tile.pixel(0, 0), Some([128, 128, 128, 255]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Arc<[u8]>,
}

impl Surface {
    /// Wraps RGBA8 pixels, recording the format they came from.
    pub fn from_rgba8(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "zero extent"));
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(Error::buffer_size(expected, pixels.len()));
        }
        Ok(Self {
            width,
            height,
            format,
            pixels: pixels.into(),
        })
    }

    /// Builds a surface from a decoded buffer without any color change.
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            format: buffer.format(),
            pixels: buffer.to_rgba8().into(),
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Format of the source data.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Full-surface rectangle at the origin.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// RGBA8 pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.pixels[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copies a sub-region into a new surface.
    pub fn crop(&self, region: Rect) -> Result<Surface> {
        if region.is_empty() || region.right() > self.width || region.bottom() > self.height {
            return Err(Error::invalid_region(
                region.x,
                region.y,
                region.width,
                region.height,
                self.width,
                self.height,
            ));
        }
        let row_len = region.width as usize * 4;
        let mut out = Vec::with_capacity(row_len * region.height as usize);
        for row in region.y..region.bottom() {
            let start = (row as usize * self.width as usize + region.x as usize) * 4;
            out.extend_from_slice(&self.pixels[start..start + row_len]);
        }
        Ok(Surface {
            width: region.width,
            height: region.height,
            format: self.format,
            pixels: out.into(),
        })
    }
}
