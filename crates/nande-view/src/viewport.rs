//! Viewport transform and zoom/pan arithmetic.
//!
//! The viewport keeps a *scene range*: the image-space rectangle the view is
//! framed on. Its center is always the image-space point shown at the center
//! of the viewport. Together with the magnification `scale` it defines the
//! whole image-to-view mapping:
//!
//! ```text
//! view = (image - scene_range.center) * scale + viewport_size / 2
//! ```
//!
//! Zoom is reported as the *zoom metric* `round2(scale - 1)`, so 1:1 is 0.0,
//! 50% is -0.5 and 300% is 2.0. The discrete zoom clamp band is expressed in
//! the same unit.
//!
//! No operation here fails. Invalid input (non-positive factors, empty
//! content) leaves the state untouched and returns `false`.

use nande_core::{PointF, RectF, SizeF};
use tracing::{debug, trace};

/// Lowest zoom metric reachable by discrete steps.
pub const ZOOM_MIN: f64 = -0.95;
/// Highest zoom metric reachable by discrete steps.
pub const ZOOM_MAX: f64 = 2.0;
/// Base of the wheel zoom curve: `factor = WHEEL_ZOOM_BASE ^ delta`.
pub const WHEEL_ZOOM_BASE: f64 = 1.001;
/// Upper bound for discrete step sensitivity; keeps both step factors on
/// the correct side of 1.
pub const MAX_STEP_SENSITIVITY: f64 = 0.09;

const STEP_OUT: f64 = 0.9;
const STEP_IN: f64 = 1.1;

/// Rounds to two decimals.
#[inline]
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Zoom level for a zoom-in preset index; unknown indices give 1.0.
pub fn zoom_in_preset(index: usize) -> f64 {
    match index {
        1 => 1.5,
        2 => 2.0,
        3 => 3.0,
        4 => 4.0,
        _ => 1.0,
    }
}

/// Zoom level for a zoom-out preset index; unknown indices give 1.0.
pub fn zoom_out_preset(index: usize) -> f64 {
    match index {
        1 => 0.75,
        2 => 0.5,
        3 => 0.25,
        4 => 0.1,
        _ => 1.0,
    }
}

/// Scene range, magnification and viewport size.
///
/// # Example
///
/// ```rust
/// use nande_core::PointF;
/// use nande_view::ViewportModel;
///
/// let mut vp = ViewportModel::new(800.0, 600.0);
/// vp.fit_to_image(1024.0, 768.0);
/// assert_eq!(vp.zoom_metric(), -0.22);
///
/// // The image point under the cursor stays under the cursor.
/// let cursor = PointF::new(100.0, 50.0);
/// let under = vp.map_to_scene(cursor);
/// vp.wheel_zoom(120.0, Some(under));
/// let after = vp.map_to_view(under);
/// assert!((after.x - cursor.x).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportModel {
    scene_range: RectF,
    scale: f64,
    viewport: SizeF,
    pinned: Option<f64>,
}

impl ViewportModel {
    /// Creates a 1:1 viewport whose scene range equals the viewport.
    pub fn new(width: f64, height: f64) -> Self {
        let viewport = SizeF::new(width.max(1.0), height.max(1.0));
        Self {
            scene_range: RectF::from_size(viewport.width, viewport.height),
            scale: 1.0,
            viewport,
            pinned: None,
        }
    }

    /// Image-space rectangle the view is framed on.
    #[inline]
    pub fn scene_range(&self) -> RectF {
        self.scene_range
    }

    /// Image-to-view magnification.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Viewport size in view pixels.
    #[inline]
    pub fn viewport_size(&self) -> SizeF {
        self.viewport
    }

    /// Level set by [`set_zoom`](Self::set_zoom), until the next pan, fit,
    /// reset or free zoom.
    #[inline]
    pub fn pinned_zoom(&self) -> Option<f64> {
        self.pinned
    }

    /// `scale - 1`, rounded to two decimals.
    #[inline]
    pub fn zoom_metric(&self) -> f64 {
        round2(self.scale - 1.0)
    }

    /// Updates the viewport size; scale and scene center are kept.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) -> bool {
        if !(width > 0.0 && height > 0.0) {
            return false;
        }
        self.viewport = SizeF::new(width, height);
        true
    }

    /// Maps an image-space point to view pixels.
    #[inline]
    pub fn map_to_view(&self, p: PointF) -> PointF {
        (p - self.scene_range.center()) * self.scale + self.viewport_center()
    }

    /// Maps a view pixel to image space.
    #[inline]
    pub fn map_to_scene(&self, v: PointF) -> PointF {
        (v - self.viewport_center()) * (1.0 / self.scale) + self.scene_range.center()
    }

    /// Maps an image-space rectangle to view space.
    pub fn map_rect_to_view(&self, r: RectF) -> RectF {
        RectF::from_corners(self.map_to_view(r.min()), self.map_to_view(r.max()))
    }

    /// Image-space rectangle covered by the viewport.
    pub fn visible_scene_rect(&self) -> RectF {
        let min = self.map_to_scene(PointF::ZERO);
        let max = self.map_to_scene(PointF::new(self.viewport.width, self.viewport.height));
        RectF::from_corners(min, max)
    }

    /// Translates the scene range by `(dx, dy)` image-space units.
    ///
    /// There is no bounds clamping; the canvas is unbounded.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.scene_range = self.scene_range.translated(dx, dy);
        self.pinned = None;
    }

    /// Pans by a drag of `(dx, dy)` view pixels: the content follows the
    /// pointer.
    pub fn pan_view(&mut self, dx: f64, dy: f64) {
        self.pan(-dx / self.scale, -dy / self.scale);
    }

    /// Magnifies by `factor` keeping the image-space `pivot` fixed on
    /// screen. The pivot defaults to the scene range center.
    ///
    /// Factors that are not finite and positive are rejected.
    pub fn scale_around(&mut self, factor: f64, pivot: Option<PointF>) -> bool {
        if !(factor.is_finite() && factor > 0.0) {
            trace!(factor, "rejected zoom factor");
            return false;
        }
        let r = self.scene_range;
        let p = pivot.unwrap_or_else(|| r.center());
        self.scene_range = RectF::new(
            p.x - (p.x - r.left()) / factor,
            p.y - (p.y - r.top()) / factor,
            r.width / factor,
            r.height / factor,
        );
        self.scale *= factor;
        self.pinned = None;
        true
    }

    /// Smooth zoom from a raw wheel delta: `factor = 1.001^delta`.
    pub fn wheel_zoom(&mut self, delta: f64, pivot: Option<PointF>) -> bool {
        self.scale_around(WHEEL_ZOOM_BASE.powf(delta), pivot)
    }

    /// One discrete zoom step.
    ///
    /// Negative `direction` zooms out by `0.9 + sensitivity`, positive zooms
    /// in by `1.1 - sensitivity`, zero does nothing. A step that would take
    /// the zoom metric past [`ZOOM_MIN`] or [`ZOOM_MAX`] is dropped.
    pub fn discrete_zoom_step(&mut self, direction: i32, sensitivity: f64, pivot: Option<PointF>) -> bool {
        if direction == 0 {
            return false;
        }
        let s = sensitivity.clamp(0.0, MAX_STEP_SENSITIVITY);
        let factor = if direction < 0 { STEP_OUT + s } else { STEP_IN - s };
        let next = round2(self.scale * factor - 1.0);
        if (direction < 0 && next < ZOOM_MIN) || (direction > 0 && next > ZOOM_MAX) {
            trace!(next, "discrete zoom step clamped");
            return false;
        }
        self.scale_around(factor, pivot)
    }

    /// Frames the content `(0, 0, width, height)` and letterboxes it in the
    /// viewport.
    pub fn fit_to_image(&mut self, width: f64, height: f64) -> bool {
        if !(width > 0.0 && height > 0.0) {
            return false;
        }
        self.scene_range = RectF::from_size(width, height);
        self.scale = (self.viewport.width / width).min(self.viewport.height / height);
        self.pinned = None;
        debug!(width, height, scale = self.scale, "fit to image");
        true
    }

    /// Centers the content at 1:1, discarding pan.
    pub fn reset_zoom_centered(&mut self, content_width: f64, content_height: f64) {
        let (vw, vh) = (self.viewport.width, self.viewport.height);
        self.scene_range = RectF::new(
            -vw / 2.0 + content_width / 2.0,
            -vh / 2.0 + content_height / 2.0,
            vw,
            vh,
        );
        self.scale = 1.0;
        self.pinned = None;
    }

    /// Pins an absolute magnification, keeping the scene center.
    pub fn set_zoom(&mut self, level: f64) -> bool {
        if !(level.is_finite() && level > 0.0) {
            return false;
        }
        let c = self.scene_range.center();
        let (w, h) = (self.viewport.width / level, self.viewport.height / level);
        self.scene_range = RectF::new(c.x - w / 2.0, c.y - h / 2.0, w, h);
        self.scale = level;
        self.pinned = Some(level);
        true
    }

    #[inline]
    fn viewport_center(&self) -> PointF {
        PointF::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }
}

impl Default for ViewportModel {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
