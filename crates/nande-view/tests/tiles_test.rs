//! Tile partitioning and group mirroring.

use nande_core::{PixelFormat, Rect, Surface};
use nande_view::{MirrorState, TileSet, Viewer};

fn gradient(w: u32, h: u32) -> Surface {
    let mut px = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            px.extend_from_slice(&[(x % 251) as u8, (y % 251) as u8, ((x + y) % 7) as u8, 255]);
        }
    }
    Surface::from_rgba8(w, h, PixelFormat::RGBA8, px).unwrap()
}

/// Paints every placed tile into one RGBA8 buffer over the bounding box.
fn composite(set: &TileSet) -> Vec<u8> {
    let bounds = set.bounding_rect();
    let bw = bounds.width as usize;
    let mut out = vec![0u8; bw * bounds.height as usize * 4];
    for (tile, placement) in set.placements() {
        let src = tile.surface().pixels();
        let (tw, th) = (tile.rect().width as usize, tile.rect().height as usize);
        let dx = (placement.dest.x - f64::from(bounds.x)) as usize;
        let dy = (placement.dest.y - f64::from(bounds.y)) as usize;
        for row in 0..th {
            let sy = if placement.mirror_y { th - 1 - row } else { row };
            for col in 0..tw {
                let sx = if placement.mirror_x { tw - 1 - col } else { col };
                let s = (sy * tw + sx) * 4;
                let d = ((dy + row) * bw + dx + col) * 4;
                out[d..d + 4].copy_from_slice(&src[s..s + 4]);
            }
        }
    }
    out
}

/// Whole-surface mirror, pixel by pixel.
fn mirrored(surface: &Surface, flip: bool, flop: bool) -> Vec<u8> {
    let (w, h) = (surface.width(), surface.height());
    let mut out = Vec::with_capacity(surface.pixels().len());
    for y in 0..h {
        for x in 0..w {
            let sx = if flop { w - 1 - x } else { x };
            let sy = if flip { h - 1 - y } else { y };
            out.extend_from_slice(&surface.pixel(sx, sy).unwrap());
        }
    }
    out
}

#[test]
fn test_tiles_cover_image_exactly() {
    for (w, h, edge) in [(1100, 600, 512), (512, 512, 512), (7, 5, 2), (1, 9, 4), (33, 33, 32)] {
        let surface = gradient(w, h);
        let set = TileSet::build(&surface, edge).unwrap();
        assert_eq!(set.len() as u32, w.div_ceil(edge) * h.div_ceil(edge));
        assert_eq!(set.bounding_rect(), Rect::from_size(w, h));

        let area: u64 = set.tiles().iter().map(|t| t.rect().area()).sum();
        assert_eq!(area, u64::from(w) * u64::from(h));
        for (i, a) in set.tiles().iter().enumerate() {
            for b in &set.tiles()[i + 1..] {
                assert!(a.rect().intersect(&b.rect()).is_none(), "{} overlaps {}", a.rect(), b.rect());
            }
        }
    }
}

#[test]
fn test_composite_matches_whole_surface_mirror() {
    let surface = gradient(37, 21);
    let mut set = TileSet::build(&surface, 8).unwrap();
    for (flip, flop) in [(true, false), (false, true), (true, true)] {
        set.set_mirror_state(MirrorState { flip, flop });
        assert_eq!(composite(&set), mirrored(&surface, flip, flop), "flip={flip} flop={flop}");
    }
}

#[test]
fn test_double_flip_restores_tiles() {
    let surface = gradient(20, 12);
    let mut set = TileSet::build(&surface, 8).unwrap();
    let before: Vec<_> = set.placements().map(|(_, p)| p).collect();
    set.apply_flip();
    set.apply_flip();
    set.apply_flop();
    set.apply_flop();
    let after: Vec<_> = set.placements().map(|(_, p)| p).collect();
    assert_eq!(before, after);
    assert_eq!(composite(&set), surface.pixels());
}

#[test]
fn test_double_flip_restores_viewer_quads() {
    for tiled in [false, true] {
        let mut viewer = Viewer::new();
        viewer.set_tile_edge(8);
        viewer.set_use_tiles(tiled);
        let buffer = nande_core::PixelBuffer::from_u8(20, 12, 4, gradient(20, 12).pixels().to_vec()).unwrap();
        viewer.set_image(buffer);
        let before = viewer.quads();
        viewer.flip();
        assert_ne!(viewer.quads(), before);
        viewer.flip();
        viewer.flop();
        viewer.flop();
        assert_eq!(viewer.quads(), before, "tiled={tiled}");
    }
}

#[test]
fn test_rebuild_keeps_mirror() {
    let mut set = TileSet::build(&gradient(16, 16), 8).unwrap();
    set.apply_flop();
    set.rebuild(&gradient(24, 8), 8).unwrap();
    assert!(set.mirror_state().flop);
    assert_eq!(set.len(), 3);
}
