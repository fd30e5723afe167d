//! Sample type and channel layout descriptions.
//!
//! - [`BitDepth`] - Bit depth class of decoded samples
//! - [`PixelFormat`] - Channel count plus bit depth
//!
//! # Channel Layouts
//!
//! | Channels | Layout |
//! |----------|--------|
//! | 1 | Gray |
//! | 2 | Gray + Alpha |
//! | 3 | RGB |
//! | 4 | RGBA |

use serde::{Deserialize, Serialize};

/// Bit depth class of pixel samples.
///
/// Integer data is normalized by [`normalize_factor`](Self::normalize_factor)
/// when converted to float; float data is stored as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BitDepth {
    /// 8-bit unsigned integer.
    #[default]
    U8,
    /// 16-bit half-precision float.
    F16,
    /// 32-bit single-precision float.
    F32,
}

impl BitDepth {
    /// Number of bits per sample.
    #[inline]
    pub const fn bits(&self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::F16 => 16,
            Self::F32 => 32,
        }
    }

    /// Whether this is a floating-point format.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F16 | Self::F32)
    }

    /// Divisor mapping the integer range onto [0, 1].
    #[inline]
    pub const fn normalize_factor(&self) -> f32 {
        match self {
            Self::U8 => 255.0,
            Self::F16 | Self::F32 => 1.0,
        }
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "8-bit",
            Self::F16 => "half",
            Self::F32 => "float",
        }
    }
}

impl std::fmt::Display for BitDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Channel count and bit depth of a buffer or surface source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelFormat {
    /// Number of interleaved channels (1..=4).
    pub channels: u8,
    /// Sample bit depth class.
    pub depth: BitDepth,
}

impl PixelFormat {
    /// 8-bit RGBA, the layout of every display surface.
    pub const RGBA8: Self = Self::new(4, BitDepth::U8);

    /// Creates a new format description.
    #[inline]
    pub const fn new(channels: u8, depth: BitDepth) -> Self {
        Self { channels, depth }
    }

    /// Whether the layout carries an alpha channel.
    #[inline]
    pub const fn has_alpha(&self) -> bool {
        self.channels == 2 || self.channels == 4
    }

    /// Bits per pixel across all channels.
    #[inline]
    pub const fn bits_per_pixel(&self) -> u32 {
        self.channels as u32 * self.depth.bits()
    }
}

impl Default for PixelFormat {
    fn default() -> Self {
        Self::RGBA8
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ch {}", self.channels, self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_depth_bits() {
        assert_eq!(BitDepth::U8.bits(), 8);
        assert_eq!(BitDepth::F16.bits(), 16);
        assert_eq!(BitDepth::F32.bits(), 32);
    }

    #[test]
    fn test_is_float() {
        assert!(!BitDepth::U8.is_float());
        assert!(BitDepth::F16.is_float());
        assert!(BitDepth::F32.is_float());
    }

    #[test]
    fn test_pixel_format_alpha() {
        assert!(PixelFormat::RGBA8.has_alpha());
        assert!(PixelFormat::new(2, BitDepth::U8).has_alpha());
        assert!(!PixelFormat::new(3, BitDepth::F32).has_alpha());
        assert_eq!(PixelFormat::new(3, BitDepth::F32).bits_per_pixel(), 96);
    }
}
