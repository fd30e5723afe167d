//! Color inversion.
//!
//! Two negatives are offered:
//!
//! - [`invert`] flips encoded values directly (`255 - v`, or `1 - v` for
//!   float data)
//! - [`invert_linear`] removes a gamma 2.2 encoding, inverts in linear light,
//!   then re-encodes
//!
//! For gamma-encoded sources the two differ noticeably in the midtones:
//! encoded 128 becomes 127 with the naive negative and about 228 with the
//! linear one. Alpha is never inverted.

use std::time::Instant;

use half::f16;
use nande_color::transfer::{eotf_22, oetf_22};
use nande_core::{quantize, PixelBuffer, PixelData};
use rayon::prelude::*;
use tracing::debug;

use crate::OpsResult;

/// Linear-light negative of one normalized encoded sample.
///
/// ```rust
/// use nande_ops::invert::invert_linear_value;
///
/// let v = invert_linear_value(128.0 / 255.0);
/// assert_eq!((v * 255.0).round() as u8, 228);
/// ```
#[inline]
pub fn invert_linear_value(v: f32) -> f32 {
    oetf_22(1.0 - eotf_22(v))
}

/// Naive negative of the color channels.
///
/// # Example
///
/// ```rust
/// use nande_core::PixelBuffer;
/// use nande_ops::invert;
///
/// let buf = PixelBuffer::from_u8(1, 1, 4, vec![0, 128, 255, 77]).unwrap();
/// assert_eq!(invert(&buf).unwrap().to_rgba8(), vec![255, 127, 0, 77]);
/// ```
pub fn invert(buffer: &PixelBuffer) -> OpsResult<PixelBuffer> {
    let start = Instant::now();
    let out = map_color(buffer, |v| 255 - v, |v| f16::ONE - v, |v| 1.0 - v)?;
    debug!(elapsed_us = start.elapsed().as_micros() as u64, "inverted");
    Ok(out)
}

/// Gamma-aware negative of the color channels.
pub fn invert_linear(buffer: &PixelBuffer) -> OpsResult<PixelBuffer> {
    let start = Instant::now();
    let lut: [u8; 256] = std::array::from_fn(|i| quantize(invert_linear_value(i as f32 / 255.0)));
    let out = map_color(
        buffer,
        |v| lut[v as usize],
        |v| f16::from_f32(invert_linear_value(v.to_f32())),
        invert_linear_value,
    )?;
    debug!(elapsed_us = start.elapsed().as_micros() as u64, "inverted in linear light");
    Ok(out)
}

/// Number of leading color samples per pixel; alpha, if present, is last.
#[inline]
fn color_channels(channels: u8) -> usize {
    match channels {
        2 | 4 => channels as usize - 1,
        n => n as usize,
    }
}

fn map_color<A, B, C>(buffer: &PixelBuffer, on_u8: A, on_f16: B, on_f32: C) -> OpsResult<PixelBuffer>
where
    A: Fn(u8) -> u8 + Sync,
    B: Fn(f16) -> f16 + Sync,
    C: Fn(f32) -> f32 + Sync,
{
    let channels = buffer.channels();
    let data = match buffer.data() {
        PixelData::U8(d) => PixelData::U8(apply(d, channels, on_u8)),
        PixelData::F16(d) => PixelData::F16(apply(d, channels, on_f16)),
        PixelData::F32(d) => PixelData::F32(apply(d, channels, on_f32)),
    };
    Ok(PixelBuffer::new(buffer.width(), buffer.height(), channels, data)?)
}

fn apply<T, F>(src: &[T], channels: u8, f: F) -> Vec<T>
where
    T: Copy + Send + Sync,
    F: Fn(T) -> T + Sync,
{
    let color = color_channels(channels);
    let mut dst = src.to_vec();
    dst.par_chunks_mut(channels as usize).for_each(|px| {
        for v in &mut px[..color] {
            *v = f(*v);
        }
    });
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_naive_u8() {
        let buf = PixelBuffer::from_u8(1, 1, 3, vec![0, 128, 200]).unwrap();
        assert_eq!(invert(&buf).unwrap().to_rgba8(), vec![255, 127, 55, 255]);
    }

    #[test]
    fn test_naive_twice_is_identity() {
        let buf = PixelBuffer::from_u8(2, 1, 4, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(invert(&invert(&buf).unwrap()).unwrap(), buf);
    }

    #[test]
    fn test_linear_midgray() {
        let buf = PixelBuffer::from_u8(1, 1, 1, vec![128]).unwrap();
        let linear = invert_linear(&buf).unwrap().to_rgba8();
        let naive = invert(&buf).unwrap().to_rgba8();
        assert_eq!(linear[0], 228);
        assert_eq!(naive[0], 127);
    }

    #[test]
    fn test_linear_endpoints() {
        assert_abs_diff_eq!(invert_linear_value(0.0), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(invert_linear_value(1.0), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_alpha_kept() {
        let buf = PixelBuffer::from_u8(1, 1, 2, vec![10, 99]).unwrap();
        assert_eq!(invert_linear(&buf).unwrap().to_rgba8()[3], 99);
        let buf = PixelBuffer::from_f32(1, 1, 4, vec![0.25, 0.5, 0.75, 0.3]).unwrap();
        let f = invert(&buf).unwrap().to_f32();
        assert_abs_diff_eq!(f[0], 0.75);
        assert_abs_diff_eq!(f[3], 0.3);
    }
}
