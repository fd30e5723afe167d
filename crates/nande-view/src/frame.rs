//! Toolkit-free paint description.
//!
//! The viewer describes each paint as a [`Frame`] in view pixels; a host
//! draws it back to front: background, grid, image quads, text.

use nande_core::{PointF, RectF, Rgba8, SizeF};

use crate::grid::GridPrimitive;

/// Which texture a quad samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadSource {
    /// The whole display surface.
    Surface,
    /// Tile at this index.
    Tile(usize),
}

/// A textured rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageQuad {
    /// Texture.
    pub source: QuadSource,
    /// Destination in view pixels.
    pub dest: RectF,
    /// Sample right-to-left.
    pub mirror_x: bool,
    /// Sample bottom-to-top.
    pub mirror_y: bool,
}

impl ImageQuad {
    /// Texture coordinates as `(u0, v0, u1, v1)`.
    pub fn uv(&self) -> [f32; 4] {
        let (u0, u1) = if self.mirror_x { (1.0, 0.0) } else { (0.0, 1.0) };
        let (v0, v1) = if self.mirror_y { (1.0, 0.0) } else { (0.0, 1.0) };
        [u0, v0, u1, v1]
    }
}

/// Text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `pos` is the top-left corner.
    TopLeft,
    /// `pos` is the bottom-left corner.
    BottomLeft,
}

/// Overlay text.
#[derive(Debug, Clone, PartialEq)]
pub struct HudText {
    /// Text.
    pub text: String,
    /// Anchor point in view pixels.
    pub pos: PointF,
    /// Anchoring of `pos`.
    pub anchor: Anchor,
    /// Pixel size.
    pub size: f32,
    /// Color.
    pub color: Rgba8,
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Viewport size.
    pub size: SizeF,
    /// Fill color.
    pub background: Rgba8,
    /// Grid in view pixels.
    pub grid: Vec<GridPrimitive>,
    /// Image pieces.
    pub quads: Vec<ImageQuad>,
    /// FPS and renderer labels.
    pub hud: Vec<HudText>,
    /// "No Image" label when nothing is loaded.
    pub placeholder: Option<HudText>,
    /// Sample textures with linear filtering.
    pub linear_filtering: bool,
}
