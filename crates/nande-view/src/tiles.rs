//! Tiled surfaces and group mirroring.
//!
//! A [`TileSet`] splits a surface into a flat, row-major grid of tiles no
//! larger than `edge` on a side. Tile `(i, j)` covers
//! `[j*edge, min((j+1)*edge, width)) x [i*edge, min((i+1)*edge, height))`,
//! so the tiles are disjoint and their union is the whole surface.
//!
//! Flip and flop mirror the tiles *as a group*: one [`Mirror`] pivoted on the
//! center of the group's bounding box moves every tile and mirrors its
//! content, keeping the seams aligned. The single-surface path uses the same
//! mirror with the surface's own bounding box.

use std::time::Instant;

use nande_core::{PointF, Rect, RectF, Result, Surface};
use tracing::debug;

/// Default maximum tile edge in pixels.
pub const DEFAULT_TILE_EDGE: u32 = 512;

/// Mirror state: `flip` is top-bottom, `flop` is left-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MirrorState {
    /// Mirrored top-bottom.
    pub flip: bool,
    /// Mirrored left-right.
    pub flop: bool,
}

impl MirrorState {
    /// Neither axis mirrored.
    #[inline]
    pub fn is_identity(self) -> bool {
        !self.flip && !self.flop
    }
}

/// Where and how a piece of content lands after mirroring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Destination rectangle in image space.
    pub dest: RectF,
    /// Sample the content right-to-left.
    pub mirror_x: bool,
    /// Sample the content bottom-to-top.
    pub mirror_y: bool,
}

/// A mirror transform about a pivot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mirror {
    state: MirrorState,
    pivot: PointF,
}

impl Mirror {
    /// Mirror pivoted on the center of `bounds`.
    pub fn about(state: MirrorState, bounds: RectF) -> Self {
        Self {
            state,
            pivot: bounds.center(),
        }
    }

    /// Maps a point.
    #[inline]
    pub fn map_point(&self, p: PointF) -> PointF {
        PointF::new(
            if self.state.flop { 2.0 * self.pivot.x - p.x } else { p.x },
            if self.state.flip { 2.0 * self.pivot.y - p.y } else { p.y },
        )
    }

    /// Maps a rectangle, normalizing the corners.
    pub fn map_rect(&self, r: RectF) -> RectF {
        RectF::from_corners(self.map_point(r.min()), self.map_point(r.max()))
    }

    /// Placement of content originally covering `r`.
    pub fn place(&self, r: RectF) -> Placement {
        Placement {
            dest: self.map_rect(r),
            mirror_x: self.state.flop,
            mirror_y: self.state.flip,
        }
    }
}

/// One tile: a sub-surface and its origin offset in the full image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    surface: Surface,
    rect: Rect,
}

impl Tile {
    /// Tile pixels.
    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Region of the full image this tile covers.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// Row-major tiles of one surface plus the group mirror state.
#[derive(Debug, Clone, Default)]
pub struct TileSet {
    tiles: Vec<Tile>,
    bounds: Rect,
    mirror: MirrorState,
}

impl TileSet {
    /// Builds tiles from `surface` with the given maximum edge (0 means 1).
    ///
    /// # Example
    ///
    /// ```rust
    /// use nande_core::{PixelFormat, Surface};
    /// use nande_view::TileSet;
    ///
    /// let surface = Surface::from_rgba8(1100, 600, PixelFormat::RGBA8, vec![0; 1100 * 600 * 4]).unwrap();
    /// let tiles = TileSet::build(&surface, 512).unwrap();
    /// assert_eq!(tiles.len(), 3 * 2);
    /// assert_eq!(tiles.tiles()[2].rect().width, 1100 - 1024);
    /// ```
    pub fn build(surface: &Surface, edge: u32) -> Result<Self> {
        let mut set = Self::default();
        set.rebuild(surface, edge)?;
        Ok(set)
    }

    /// Discards all tiles and partitions `surface` again. The mirror state
    /// is kept.
    pub fn rebuild(&mut self, surface: &Surface, edge: u32) -> Result<()> {
        let start = Instant::now();
        self.clear();
        let edge = edge.max(1);
        let (w, h) = (surface.width(), surface.height());
        let mut tiles = Vec::with_capacity((w.div_ceil(edge) * h.div_ceil(edge)) as usize);
        for y in (0..h).step_by(edge as usize) {
            for x in (0..w).step_by(edge as usize) {
                let rect = Rect::new(x, y, edge.min(w - x), edge.min(h - y));
                tiles.push(Tile {
                    surface: surface.crop(rect)?,
                    rect,
                });
            }
        }
        self.bounds = tiles
            .iter()
            .map(|t| t.rect)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        self.tiles = tiles;
        debug!(
            tiles = self.tiles.len(),
            edge,
            elapsed_us = start.elapsed().as_micros() as u64,
            "built tile set"
        );
        Ok(())
    }

    /// Removes every tile.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.bounds = Rect::default();
    }

    /// No tiles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of tiles.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Tiles in row-major order.
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Union of all tile rectangles.
    #[inline]
    pub fn bounding_rect(&self) -> Rect {
        self.bounds
    }

    /// Current mirror state.
    #[inline]
    pub fn mirror_state(&self) -> MirrorState {
        self.mirror
    }

    /// Replaces the mirror state.
    #[inline]
    pub fn set_mirror_state(&mut self, state: MirrorState) {
        self.mirror = state;
    }

    /// Toggles top-bottom mirroring of the group. No-op without tiles.
    pub fn apply_flip(&mut self) {
        if !self.is_empty() {
            self.mirror.flip = !self.mirror.flip;
        }
    }

    /// Toggles left-right mirroring of the group. No-op without tiles.
    pub fn apply_flop(&mut self) {
        if !self.is_empty() {
            self.mirror.flop = !self.mirror.flop;
        }
    }

    /// Group mirror about the bounding box center.
    pub fn mirror(&self) -> Mirror {
        Mirror::about(self.mirror, self.bounds.into())
    }

    /// Each tile with its placement, in tile order.
    pub fn placements(&self) -> impl Iterator<Item = (&Tile, Placement)> + '_ {
        let mirror = self.mirror();
        self.tiles.iter().map(move |t| (t, mirror.place(t.rect.into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nande_core::PixelFormat;

    fn surface(w: u32, h: u32) -> Surface {
        let mut px = Vec::with_capacity((w * h * 4) as usize);
        for y in 0..h {
            for x in 0..w {
                px.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255]);
            }
        }
        Surface::from_rgba8(w, h, PixelFormat::RGBA8, px).unwrap()
    }

    #[test]
    fn test_single_tile_when_small() {
        let set = TileSet::build(&surface(100, 50), 512).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.bounding_rect(), Rect::new(0, 0, 100, 50));
    }

    #[test]
    fn test_edge_clipping() {
        let set = TileSet::build(&surface(10, 7), 4).unwrap();
        let rects: Vec<Rect> = set.tiles().iter().map(Tile::rect).collect();
        assert_eq!(rects.len(), 6);
        assert_eq!(rects[2], Rect::new(8, 0, 2, 4));
        assert_eq!(rects[5], Rect::new(8, 4, 2, 3));
    }

    #[test]
    fn test_tile_pixels_match_source() {
        let s = surface(10, 7);
        let set = TileSet::build(&s, 4).unwrap();
        let tile = &set.tiles()[4];
        assert_eq!(tile.surface().pixel(1, 2), s.pixel(5, 6));
    }

    #[test]
    fn test_clear() {
        let mut set = TileSet::build(&surface(10, 7), 4).unwrap();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.bounding_rect(), Rect::default());
    }

    #[test]
    fn test_rebuild_does_not_accumulate() {
        let s = surface(10, 7);
        let mut set = TileSet::build(&s, 4).unwrap();
        set.rebuild(&s, 4).unwrap();
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn test_flip_moves_tiles_about_group_center() {
        let mut set = TileSet::build(&surface(10, 7), 4).unwrap();
        set.apply_flip();
        let placements: Vec<Placement> = set.placements().map(|(_, p)| p).collect();
        // First row (height 4) lands at the bottom of the group.
        assert_eq!(placements[0].dest, RectF::new(0.0, 3.0, 4.0, 4.0));
        // Last row (height 3) lands at the top.
        assert_eq!(placements[3].dest, RectF::new(0.0, 0.0, 4.0, 3.0));
        assert!(placements.iter().all(|p| p.mirror_y && !p.mirror_x));
    }

    #[test]
    fn test_flip_noop_without_tiles() {
        let mut set = TileSet::default();
        set.apply_flip();
        set.apply_flop();
        assert!(set.mirror_state().is_identity());
    }

    #[test]
    fn test_mirror_state_survives_rebuild() {
        let s = surface(10, 7);
        let mut set = TileSet::build(&s, 4).unwrap();
        set.apply_flop();
        set.rebuild(&s, 4).unwrap();
        assert!(set.mirror_state().flop);
    }
}
