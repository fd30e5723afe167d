//! BT.709 luminance.

use std::time::Instant;

use nande_color::transfer::{eotf_22, oetf_22};
use nande_core::{quantize, BitDepth, PixelBuffer};
use rayon::prelude::*;
use tracing::debug;

use crate::OpsResult;

/// Rec.709 luma coefficients.
pub const REC709_LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// How luminance treats encoded samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LumaMode {
    /// Weight the encoded values directly.
    #[default]
    Encoded,
    /// Decode gamma 2.2, weight in linear light, re-encode.
    Linear,
}

/// Weighted sum of an RGB triplet.
#[inline]
pub fn luma(rgb: [f32; 3]) -> f32 {
    rgb[0] * REC709_LUMA[0] + rgb[1] * REC709_LUMA[1] + rgb[2] * REC709_LUMA[2]
}

/// Computes an opaque gray RGBA buffer from luminance.
///
/// 8-bit sources stay 8-bit, everything else comes back as float.
pub fn luminance(buffer: &PixelBuffer, mode: LumaMode) -> OpsResult<PixelBuffer> {
    let start = Instant::now();
    let rgba = buffer.to_rgba_f32();
    let gray: Vec<f32> = rgba
        .par_iter()
        .map(|px| match mode {
            LumaMode::Encoded => luma([px[0], px[1], px[2]]),
            LumaMode::Linear => oetf_22(luma([eotf_22(px[0]), eotf_22(px[1]), eotf_22(px[2])])),
        })
        .collect();

    let (w, h) = (buffer.width(), buffer.height());
    let out = if buffer.depth() == BitDepth::U8 {
        let data = gray.iter().flat_map(|&y| {
            let v = quantize(y);
            [v, v, v, 255]
        });
        PixelBuffer::from_u8(w, h, 4, data.collect())?
    } else {
        let data = gray.iter().flat_map(|&y| [y, y, y, 1.0]);
        PixelBuffer::from_f32(w, h, 4, data.collect())?
    };

    debug!(?mode, width = w, height = h, elapsed_us = start.elapsed().as_micros() as u64, "computed luminance");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_weights_sum_to_one() {
        assert_abs_diff_eq!(luma([1.0, 1.0, 1.0]), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_primaries() {
        let buf = PixelBuffer::from_u8(3, 1, 3, vec![255, 0, 0, 0, 255, 0, 0, 0, 255]).unwrap();
        let out = luminance(&buf, LumaMode::Encoded).unwrap().to_rgba8();
        assert_eq!(out[0], 54);
        assert_eq!(out[4], 182);
        assert_eq!(out[8], 18);
        assert_eq!(out[3], 255);
    }

    #[test]
    fn test_gray_unchanged() {
        let buf = PixelBuffer::from_u8(1, 1, 1, vec![128]).unwrap();
        for mode in [LumaMode::Encoded, LumaMode::Linear] {
            assert_eq!(luminance(&buf, mode).unwrap().to_rgba8(), vec![128, 128, 128, 255]);
        }
    }

    #[test]
    fn test_linear_differs_for_color() {
        let buf = PixelBuffer::from_u8(1, 1, 3, vec![255, 0, 0]).unwrap();
        let encoded = luminance(&buf, LumaMode::Encoded).unwrap().to_rgba8()[0];
        let linear = luminance(&buf, LumaMode::Linear).unwrap().to_rgba8()[0];
        assert!(linear > encoded);
    }

    #[test]
    fn test_float_output() {
        let buf = PixelBuffer::from_f32(1, 1, 4, vec![0.5, 0.5, 0.5, 0.2]).unwrap();
        let out = luminance(&buf, LumaMode::Encoded).unwrap();
        assert_eq!(out.depth(), BitDepth::F32);
        let f = out.to_f32();
        assert_abs_diff_eq!(f[0], 0.5, epsilon = 1e-6);
        assert_eq!(f[3], 1.0);
    }
}
