//! Adaptive reference grid.
//!
//! [`render_grid`] is a pure function from the grid settings, the visible
//! image-space rectangle, the current zoom metric and the view scale to a
//! list of primitives in image space. It runs on every paint; nothing is
//! cached.
//!
//! - Dots: one dot per intersection. Zoomed out, the spacing grows to
//!   `size * (floor(|zoom| / 0.3) + 1)` so dots never turn into noise. Past
//!   that, spacing keeps growing in whole cells so dots stay at least
//!   4 view pixels apart.
//! - Lines: a dotted divider grid at the cell size (only above zoom -0.5),
//!   under a solid grid every `divider` cells that darkens as the view zooms
//!   out. A layer closer than one view pixel is not drawn.
//!
//! Stroke widths are cosmetic: they are view pixels, whatever the zoom.

use nande_core::{PointF, RectF, Rgba8};
use serde::{Deserialize, Serialize};

/// Background fill.
pub const DEFAULT_BACKGROUND: Rgba8 = Rgba8::rgb(65, 65, 65);
/// Grid stroke.
pub const DEFAULT_GRID_COLOR: Rgba8 = Rgba8::rgb(40, 40, 40);
/// Divider stroke.
pub const DEFAULT_DIVIDER_COLOR: Rgba8 = Rgba8::rgb(90, 90, 90);
/// Cell size in image pixels.
pub const DEFAULT_CELL_SIZE: u32 = 32;

/// Divider grid is drawn only above this zoom metric.
const DIVIDER_MIN_ZOOM: f64 = -0.5;
/// Dot spacing grows by one cell per this much zoom-out.
const DOT_COARSEN_STEP: f64 = 0.3;
/// Minimum dot spacing in view pixels.
const MIN_DOT_SPACING: f64 = 4.0;
/// Minimum line spacing in view pixels.
const MIN_LINE_SPACING: f64 = 1.0;

/// Grid display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridMode {
    /// No grid.
    #[default]
    None,
    /// Intersection dots.
    Dots,
    /// Lines with a divider grid.
    Lines,
}

impl GridMode {
    /// Display label for UI.
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Dots => "Dots",
            Self::Lines => "Lines",
        }
    }

    /// All modes.
    pub const fn all() -> &'static [Self] {
        &[Self::None, Self::Dots, Self::Lines]
    }
}

/// Grid and background settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Display mode.
    pub mode: GridMode,
    /// Cell size in image pixels, 1..=1024.
    pub cell_size: u32,
    /// Cells per main grid line, 1..=50.
    pub divider: u32,
    /// Stroke width in view pixels, 1..=32.
    pub line_width: u32,
    /// Main grid color.
    pub color: Rgba8,
    /// Divider grid color.
    pub divider_color: Rgba8,
    /// Viewport background.
    pub background: Rgba8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            mode: GridMode::None,
            cell_size: DEFAULT_CELL_SIZE,
            divider: 1,
            line_width: 1,
            color: DEFAULT_GRID_COLOR,
            divider_color: DEFAULT_DIVIDER_COLOR,
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl GridConfig {
    /// Sets the cell size, clamped to 1..=1024.
    pub fn set_cell_size(&mut self, size: u32) {
        self.cell_size = size.clamp(1, 1024);
    }

    /// Sets the divider multiple, clamped to 1..=50.
    pub fn set_divider(&mut self, divider: u32) {
        self.divider = divider.clamp(1, 50);
    }

    /// Sets the stroke width, clamped to 1..=32.
    pub fn set_line_width(&mut self, width: u32) {
        self.line_width = width.clamp(1, 32);
    }

    /// Main grid color after zoom darkening.
    pub fn main_line_color(&self, zoom: f64) -> Rgba8 {
        let color = self.color.darker(150);
        if zoom < 0.0 {
            let factor = (100 - (zoom * 110.0) as i64).max(100);
            color.darker(factor as u32)
        } else {
            color
        }
    }
}

/// Stroke pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Continuous stroke.
    Solid,
    /// Dotted stroke.
    Dotted,
}

/// A grid draw primitive. Coordinates are in image space, widths in view
/// pixels; a width of 0 is a one-pixel hairline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridPrimitive {
    /// A point.
    Dot {
        /// Position.
        at: PointF,
        /// Color.
        color: Rgba8,
        /// Diameter.
        width: f64,
    },
    /// A line segment.
    Line {
        /// Start.
        from: PointF,
        /// End.
        to: PointF,
        /// Color.
        color: Rgba8,
        /// Stroke width.
        width: f64,
        /// Stroke pattern.
        style: LineStyle,
    },
}

/// Integer bounds of the visible rect, truncated toward zero.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    left: i64,
    right: i64,
    top: i64,
    bottom: i64,
}

impl Bounds {
    fn of(rect: RectF) -> Self {
        Self {
            left: rect.left() as i64,
            right: rect.right() as i64,
            top: rect.top() as i64,
            bottom: rect.bottom() as i64,
        }
    }

    /// Grid positions in `[start, end)` snapped down to multiples of `size`.
    fn steps(start: i64, end: i64, size: i64) -> impl Iterator<Item = i64> {
        let first = start.saturating_sub(start.rem_euclid(size));
        (first..end).step_by(size as usize)
    }
}

/// Computes the grid primitives for one paint.
///
/// # Example
///
/// ```rust
/// use nande_core::RectF;
/// use nande_view::grid::{render_grid, GridConfig, GridMode};
///
/// let mut config = GridConfig::default();
/// config.mode = GridMode::Dots;
/// let dots = render_grid(&config, RectF::new(0.0, 0.0, 64.0, 64.0), 0.0, 1.0);
/// assert_eq!(dots.len(), 4);
/// ```
pub fn render_grid(config: &GridConfig, visible: RectF, zoom: f64, scale: f64) -> Vec<GridPrimitive> {
    if !visible.is_valid() || !scale.is_finite() || scale <= 0.0 {
        return Vec::new();
    }
    let bounds = Bounds::of(visible);
    let size = i64::from(config.cell_size.max(1));
    match config.mode {
        GridMode::None => Vec::new(),
        GridMode::Dots => dots(config, bounds, size, zoom, scale),
        GridMode::Lines => {
            let mut out = Vec::new();
            if zoom > DIVIDER_MIN_ZOOM && size as f64 * scale >= MIN_LINE_SPACING {
                let width = f64::from(config.line_width.saturating_sub(1));
                lines(&mut out, bounds, size, config.divider_color, width, LineStyle::Dotted);
            }
            let main = size * i64::from(config.divider.max(1));
            if main as f64 * scale >= MIN_LINE_SPACING {
                let width = f64::from(config.line_width);
                lines(&mut out, bounds, main, config.main_line_color(zoom), width, LineStyle::Solid);
            }
            out
        }
    }
}

fn dots(config: &GridConfig, b: Bounds, size: i64, zoom: f64, scale: f64) -> Vec<GridPrimitive> {
    let cell = size;
    let mut size = if zoom < 0.0 {
        ((zoom.abs() / DOT_COARSEN_STEP).floor() as i64 + 1) * cell
    } else {
        cell
    };
    let spacing = size as f64 * scale;
    if spacing < MIN_DOT_SPACING {
        let factor = (MIN_DOT_SPACING / spacing).ceil();
        if factor * size as f64 >= i64::MAX as f64 {
            return Vec::new();
        }
        size *= factor as i64;
    }
    let width = f64::from(config.line_width);
    let mut out = Vec::new();
    for x in Bounds::steps(b.left, b.right, size) {
        for y in Bounds::steps(b.top, b.bottom, size) {
            out.push(GridPrimitive::Dot {
                at: PointF::new(x as f64, y as f64),
                color: config.color,
                width,
            });
        }
    }
    out
}

fn lines(out: &mut Vec<GridPrimitive>, b: Bounds, size: i64, color: Rgba8, width: f64, style: LineStyle) {
    let (top, bottom) = (b.top as f64, b.bottom as f64);
    let (left, right) = (b.left as f64, b.right as f64);
    for x in Bounds::steps(b.left, b.right, size) {
        let x = x as f64;
        out.push(GridPrimitive::Line {
            from: PointF::new(x, top),
            to: PointF::new(x, bottom),
            color,
            width,
            style,
        });
    }
    for y in Bounds::steps(b.top, b.bottom, size) {
        let y = y as f64;
        out.push(GridPrimitive::Line {
            from: PointF::new(left, y),
            to: PointF::new(right, y),
            color,
            width,
            style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(mode: GridMode) -> GridConfig {
        GridConfig {
            mode,
            ..GridConfig::default()
        }
    }

    fn dot_xs(prims: &[GridPrimitive]) -> Vec<f64> {
        let mut xs: Vec<f64> = prims
            .iter()
            .filter_map(|p| match p {
                GridPrimitive::Dot { at, .. } => Some(at.x),
                GridPrimitive::Line { .. } => None,
            })
            .collect();
        xs.dedup();
        xs
    }

    #[test]
    fn test_none_is_empty() {
        assert!(render_grid(&config(GridMode::None), RectF::new(0.0, 0.0, 500.0, 500.0), 0.0, 1.0).is_empty());
    }

    #[test]
    fn test_dots_snap_to_lower_multiple() {
        let prims = render_grid(&config(GridMode::Dots), RectF::new(-40.0, 10.0, 100.0, 30.0), 0.0, 1.0);
        assert_eq!(dot_xs(&prims), vec![-64.0, -32.0, 0.0, 32.0]);
    }

    #[test]
    fn test_dots_coarsen_when_zoomed_out() {
        let rect = RectF::new(0.0, 0.0, 256.0, 32.0);
        let c = config(GridMode::Dots);
        assert_eq!(dot_xs(&render_grid(&c, rect, -0.2, 0.8)).len(), 8);
        assert_eq!(dot_xs(&render_grid(&c, rect, -0.3, 0.7)), vec![0.0, 64.0, 128.0, 192.0]);
        assert_eq!(dot_xs(&render_grid(&c, rect, -0.65, 0.35)), vec![0.0, 96.0, 192.0]);
        assert_eq!(dot_xs(&render_grid(&c, rect, 1.5, 2.5)).len(), 8);
    }

    #[test]
    fn test_divider_hidden_far_out() {
        let rect = RectF::new(0.0, 0.0, 128.0, 128.0);
        let prims = render_grid(&config(GridMode::Lines), rect, -0.5, 0.5);
        assert!(prims.iter().all(|p| matches!(p, GridPrimitive::Line { style: LineStyle::Solid, .. })));
    }

    #[test]
    fn test_main_color_darkens() {
        let c = GridConfig::default();
        assert_eq!(c.main_line_color(0.0), Rgba8::rgb(26, 26, 26));
        assert_eq!(c.main_line_color(0.5), Rgba8::rgb(26, 26, 26));
        // 100 - trunc(-0.5 * 110) = 155
        assert_eq!(c.main_line_color(-0.5), Rgba8::rgb(16, 16, 16));
    }

    #[test]
    fn test_dots_stay_apart_far_out() {
        // 1280x720 view at scale 1e-6
        let scale = 1e-6;
        let rect = RectF::new(-6.4e8, -3.6e8, 1280.0 / scale, 720.0 / scale);
        let prims = render_grid(&config(GridMode::Dots), rect, -1.0, scale);
        assert!(!prims.is_empty());
        assert!(prims.len() <= 321 * 181);
        let xs = dot_xs(&prims);
        assert!((xs[1] - xs[0]) * scale >= MIN_DOT_SPACING);
        assert_eq!((xs[1] - xs[0]) as i64 % 32, 0);
    }

    #[test]
    fn test_dense_lines_suppressed() {
        let c = GridConfig {
            divider: 4,
            ..config(GridMode::Lines)
        };
        let rect = RectF::new(0.0, 0.0, 1.0e6, 1.0e6);
        assert!(render_grid(&c, rect, -0.99, 0.001).is_empty());
        // 128-px main grid survives at 0.01, the 32-px divider grid is hidden anyway
        let prims = render_grid(&c, RectF::new(0.0, 0.0, 12800.0, 12800.0), -0.99, 0.01);
        assert_eq!(prims.len(), 200);
    }

    #[test]
    fn test_degenerate_scale_is_empty() {
        let rect = RectF::new(0.0, 0.0, 64.0, 64.0);
        assert!(render_grid(&config(GridMode::Dots), rect, 0.0, 0.0).is_empty());
        assert!(render_grid(&config(GridMode::Lines), rect, 0.0, f64::NAN).is_empty());
    }

    #[test]
    fn test_setters_clamp() {
        let mut c = GridConfig::default();
        c.set_cell_size(0);
        c.set_divider(500);
        c.set_line_width(0);
        assert_eq!((c.cell_size, c.divider, c.line_width), (1, 50, 1));
    }

    #[test]
    fn test_divider_width_is_hairline_at_one() {
        let c = config(GridMode::Lines);
        let prims = render_grid(&c, RectF::new(0.0, 0.0, 32.0, 32.0), 0.0, 1.0);
        let dotted = prims.iter().find_map(|p| match p {
            GridPrimitive::Line { style: LineStyle::Dotted, width, .. } => Some(*width),
            _ => None,
        });
        assert_eq!(dotted, Some(0.0));
    }
}
