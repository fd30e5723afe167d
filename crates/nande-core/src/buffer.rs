//! Full-precision decoded pixel storage.
//!
//! A [`PixelBuffer`] holds samples exactly as decoded (8-bit, half or float),
//! interleaved in row-major order:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  ← Row 0
//!         [R G B A R G B A ...]  ← Row 1
//! ```
//!
//! The viewer keeps one buffer as its pristine original. Kernels read it and
//! return new buffers; nothing writes into a buffer after construction.

use half::f16;

use crate::{BitDepth, Error, PixelFormat, Result};

/// Raw sample storage.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    /// 8-bit unsigned samples.
    U8(Vec<u8>),
    /// 16-bit float samples.
    F16(Vec<f16>),
    /// 32-bit float samples.
    F32(Vec<f32>),
}

impl PixelData {
    /// Number of samples.
    pub fn len(&self) -> usize {
        match self {
            Self::U8(d) => d.len(),
            Self::F16(d) => d.len(),
            Self::F32(d) => d.len(),
        }
    }

    /// No samples stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bit depth class of the storage.
    pub fn depth(&self) -> BitDepth {
        match self {
            Self::U8(_) => BitDepth::U8,
            Self::F16(_) => BitDepth::F16,
            Self::F32(_) => BitDepth::F32,
        }
    }
}

/// Decoded image pixels with their dimensions and channel count.
///
/// # Example
///
/// ```rust
/// use nande_core::{BitDepth, PixelBuffer};
///
/// let buf = PixelBuffer::from_u8(2, 1, 3, vec![255, 0, 0, 0, 255, 0]).unwrap();
/// assert_eq!(buf.depth(), BitDepth::U8);
/// assert_eq!(buf.to_rgba8(), vec![255, 0, 0, 255, 0, 255, 0, 255]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: PixelData,
}

impl PixelBuffer {
    /// Creates a buffer after validating dimensions and sample count.
    pub fn new(width: u32, height: u32, channels: u8, data: PixelData) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "zero extent"));
        }
        if !(1..=4).contains(&channels) {
            return Err(Error::UnsupportedChannels(channels));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(Error::buffer_size(expected, data.len()));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Creates a buffer from 8-bit samples.
    pub fn from_u8(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, channels, PixelData::U8(data))
    }

    /// Creates a buffer from half-float samples.
    pub fn from_f16(width: u32, height: u32, channels: u8, data: Vec<f16>) -> Result<Self> {
        Self::new(width, height, channels, PixelData::F16(data))
    }

    /// Creates a buffer from float samples.
    pub fn from_f32(width: u32, height: u32, channels: u8, data: Vec<f32>) -> Result<Self> {
        Self::new(width, height, channels, PixelData::F32(data))
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Interleaved channel count.
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Sample bit depth class.
    #[inline]
    pub fn depth(&self) -> BitDepth {
        self.data.depth()
    }

    /// Channel count and depth together.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        PixelFormat::new(self.channels, self.depth())
    }

    /// Raw sample storage.
    #[inline]
    pub fn data(&self) -> &PixelData {
        &self.data
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Samples normalized to float (8-bit divided by 255).
    pub fn to_f32(&self) -> Vec<f32> {
        match &self.data {
            PixelData::U8(d) => d.iter().map(|&v| v as f32 / 255.0).collect(),
            PixelData::F16(d) => d.iter().map(|v| v.to_f32()).collect(),
            PixelData::F32(d) => d.clone(),
        }
    }

    /// Expands to RGBA in float: gray replicates, missing alpha becomes 1.
    pub fn to_rgba_f32(&self) -> Vec<[f32; 4]> {
        let samples = self.to_f32();
        samples
            .chunks_exact(self.channels as usize)
            .map(|px| expand_rgba(px, 1.0))
            .collect()
    }

    /// Expands to RGBA8 for display, clamping float data to [0, 1].
    pub fn to_rgba8(&self) -> Vec<u8> {
        let channels = self.channels as usize;
        let mut out = Vec::with_capacity(self.pixel_count() * 4);
        match &self.data {
            PixelData::U8(d) => {
                for px in d.chunks_exact(channels) {
                    out.extend_from_slice(&expand_rgba(px, 255));
                }
            }
            _ => {
                for px in self.to_rgba_f32() {
                    out.extend(px.iter().map(|&v| quantize(v)));
                }
            }
        }
        out
    }
}

/// Maps a normalized float to 8-bit with clamping and rounding.
#[inline]
pub fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn expand_rgba<T: Copy>(px: &[T], opaque: T) -> [T; 4] {
    match px.len() {
        1 => [px[0], px[0], px[0], opaque],
        2 => [px[0], px[0], px[0], px[1]],
        3 => [px[0], px[1], px[2], opaque],
        _ => [px[0], px[1], px[2], px[3]],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_bad_sizes() {
        assert!(PixelBuffer::from_u8(0, 4, 3, vec![]).is_err());
        assert!(PixelBuffer::from_u8(2, 2, 5, vec![0; 20]).is_err());
        let err = PixelBuffer::from_u8(2, 2, 3, vec![0; 11]).unwrap_err();
        assert!(matches!(err, Error::BufferSize { expected: 12, got: 11 }));
    }

    #[test]
    fn test_gray_expands() {
        let buf = PixelBuffer::from_u8(1, 1, 1, vec![77]).unwrap();
        assert_eq!(buf.to_rgba8(), vec![77, 77, 77, 255]);
        let buf = PixelBuffer::from_u8(1, 1, 2, vec![77, 10]).unwrap();
        assert_eq!(buf.to_rgba8(), vec![77, 77, 77, 10]);
    }

    #[test]
    fn test_float_clamps() {
        let buf = PixelBuffer::from_f32(1, 1, 3, vec![1.5, -0.2, 0.5]).unwrap();
        assert_eq!(buf.to_rgba8(), vec![255, 0, 128, 255]);
    }

    #[test]
    fn test_half_to_f32() {
        let data = vec![f16::from_f32(0.25), f16::from_f32(0.5), f16::from_f32(1.0)];
        let buf = PixelBuffer::from_f16(1, 1, 3, data).unwrap();
        assert_eq!(buf.depth(), BitDepth::F16);
        let f = buf.to_f32();
        assert_relative_eq!(f[0], 0.25);
        assert_relative_eq!(f[1], 0.5);
    }

    #[test]
    fn test_quantize_rounds() {
        assert_eq!(quantize(128.0 / 255.0), 128);
        assert_eq!(quantize(2.0), 255);
        assert_eq!(quantize(-1.0), 0);
    }
}
