//! Grid primitives for a known visible rectangle.

use nande_core::RectF;
use nande_view::{render_grid, GridConfig, GridMode, GridPrimitive, LineStyle};

fn lines_config() -> GridConfig {
    let mut config = GridConfig {
        mode: GridMode::Lines,
        ..GridConfig::default()
    };
    config.set_cell_size(32);
    config.set_divider(4);
    config
}

fn count(prims: &[GridPrimitive], wanted: LineStyle) -> usize {
    prims
        .iter()
        .filter(|p| matches!(p, GridPrimitive::Line { style, .. } if *style == wanted))
        .count()
}

#[test]
fn test_lines_at_unit_zoom_emit_both_grids() {
    let config = lines_config();
    let prims = render_grid(&config, RectF::new(0.0, 0.0, 256.0, 256.0), 0.0, 1.0);
    // 8 vertical and 8 horizontal divider lines at 32 px.
    assert_eq!(count(&prims, LineStyle::Dotted), 16);
    // 0 and 128 in each direction.
    assert_eq!(count(&prims, LineStyle::Solid), 4);
}

#[test]
fn test_main_lines_are_darkened() {
    let config = lines_config();
    let prims = render_grid(&config, RectF::new(0.0, 0.0, 256.0, 256.0), 0.0, 1.0);
    let main = prims
        .iter()
        .find_map(|p| match p {
            GridPrimitive::Line {
                color,
                style: LineStyle::Solid,
                ..
            } => Some(*color),
            _ => None,
        })
        .unwrap();
    assert_eq!(main, config.color.darker(150));
}

#[test]
fn test_divider_grid_hidden_when_zoomed_out() {
    let config = lines_config();
    let prims = render_grid(&config, RectF::new(0.0, 0.0, 256.0, 256.0), -0.6, 0.4);
    assert_eq!(count(&prims, LineStyle::Dotted), 0);
    assert_eq!(count(&prims, LineStyle::Solid), 4);
}

#[test]
fn test_negative_origin_snaps_to_cells() {
    let config = lines_config();
    let prims = render_grid(&config, RectF::new(-40.0, 0.0, 80.0, 10.0), 0.0, 1.0);
    let first_x = prims
        .iter()
        .find_map(|p| match p {
            GridPrimitive::Line { from, to, style: LineStyle::Dotted, .. } if from.x == to.x => Some(from.x),
            _ => None,
        })
        .unwrap();
    assert_eq!(first_x, -64.0);
}
