//! 8-bit RGBA color for UI-facing values (background, grid strokes).

use serde::{Deserialize, Serialize};

/// An 8-bit per channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from RGB components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA components.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Components as an array.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns a darker color.
    ///
    /// `factor` is a percentage: 150 divides the brightness by 1.5, 200
    /// halves it. Hue, saturation and alpha are kept. Factors of 100 or
    /// less return the color unchanged.
    ///
    /// ```rust
    /// use nande_core::Rgba8;
    ///
    /// assert_eq!(Rgba8::rgb(90, 60, 30).darker(200), Rgba8::rgb(45, 30, 15));
    /// ```
    pub fn darker(self, factor: u32) -> Self {
        if factor <= 100 {
            return self;
        }
        // Scaling every component by the same ratio scales HSV value only.
        let scale = |c: u8| (c as u32 * 100 / factor) as u8;
        Self::rgba(scale(self.r), scale(self.g), scale(self.b), self.a)
    }

    /// `#rrggbb` name.
    pub fn name(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(c: [u8; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }
}
