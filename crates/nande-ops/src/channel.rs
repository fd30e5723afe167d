//! Single-channel views.
//!
//! A channel view replicates one source channel across R, G and B and makes
//! the result opaque, so the channel reads as a grayscale image whatever the
//! source alpha was. Gray sources answer R, G and B with their only color
//! channel. Sources without alpha answer A with a fully opaque plane.

use std::time::Instant;

use half::f16;
use nande_core::{PixelBuffer, PixelData};
use rayon::prelude::*;
use tracing::debug;

use crate::OpsResult;

/// A color channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
    /// Alpha
    Alpha,
}

impl Channel {
    /// All channels in RGBA order.
    pub const ALL: [Channel; 4] = [Self::Red, Self::Green, Self::Blue, Self::Alpha];

    /// One-letter label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Red => "R",
            Self::Green => "G",
            Self::Blue => "B",
            Self::Alpha => "A",
        }
    }

    /// Sample index inside a pixel of `channels` samples; `None` when the
    /// layout has no such channel and it must be synthesized as opaque.
    pub fn source_index(self, channels: u8) -> Option<usize> {
        match (self, channels) {
            (Self::Alpha, 2) => Some(1),
            (Self::Alpha, 4) => Some(3),
            (Self::Alpha, _) => None,
            (_, 1 | 2) => Some(0),
            (Self::Red, _) => Some(0),
            (Self::Green, _) => Some(1),
            (Self::Blue, _) => Some(2),
        }
    }
}

/// Extracts `channel` into an opaque RGBA buffer of the same depth.
///
/// # Example
///
/// ```rust
/// use nande_core::PixelBuffer;
/// use nande_ops::{extract_channel, Channel};
///
/// let buf = PixelBuffer::from_u8(1, 1, 4, vec![10, 20, 30, 40]).unwrap();
/// let green = extract_channel(&buf, Channel::Green).unwrap();
/// assert_eq!(green.to_rgba8(), vec![20, 20, 20, 255]);
/// ```
pub fn extract_channel(buffer: &PixelBuffer, channel: Channel) -> OpsResult<PixelBuffer> {
    let start = Instant::now();
    let (w, h) = (buffer.width(), buffer.height());
    let channels = buffer.channels() as usize;
    let index = channel.source_index(buffer.channels());

    let out = match buffer.data() {
        PixelData::U8(d) => PixelBuffer::from_u8(w, h, 4, replicate(d, channels, index, 255u8))?,
        PixelData::F16(d) => PixelBuffer::from_f16(w, h, 4, replicate(d, channels, index, f16::ONE))?,
        PixelData::F32(d) => PixelBuffer::from_f32(w, h, 4, replicate(d, channels, index, 1.0f32))?,
    };

    debug!(
        channel = channel.label(),
        width = w,
        height = h,
        elapsed_us = start.elapsed().as_micros() as u64,
        "extracted channel"
    );
    Ok(out)
}

fn replicate<T>(src: &[T], channels: usize, index: Option<usize>, opaque: T) -> Vec<T>
where
    T: Copy + Send + Sync,
{
    let mut dst = vec![opaque; src.len() / channels * 4];
    dst.par_chunks_mut(4)
        .zip(src.par_chunks(channels))
        .for_each(|(out, px)| {
            let v = index.map_or(opaque, |i| px[i]);
            out[0] = v;
            out[1] = v;
            out[2] = v;
        });
    dst
}
