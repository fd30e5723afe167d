//! Display mode state machine over the pristine original buffer.
//!
//! Every view is recomputed from the original [`PixelBuffer`], never from
//! what is currently on screen, and every call produces a fresh [`Surface`].
//! Nothing is cached: asking for the same mode twice recomputes it.
//!
//! ```text
//!            view_channel(R|G|B|A)     view_luminance
//!   Color <-------------------------> Channel / Luminance
//!     ^  \
//!     |   toggle_invert[_linear]
//!     +--> Inverted / InvertedLinear  (toggling again returns to Color)
//! ```
//!
//! The display transform, when enabled, only touches the Color mode. A
//! failing transform is logged and the untransformed surface is shown.

use std::sync::Arc;
use std::time::Instant;

use nande_color::DisplayTransform;
use nande_core::{quantize, PixelBuffer, Surface};
use nande_ops::{Channel, LumaMode, OpsResult};
use tracing::{debug, warn};

/// What the viewer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Full color, optionally through the display transform.
    #[default]
    Color,
    /// One channel as grayscale.
    Channel(Channel),
    /// BT.709 luminance.
    Luminance,
    /// Naive negative.
    Inverted,
    /// Gamma-aware negative.
    InvertedLinear,
}

impl DisplayMode {
    /// Display label for UI.
    pub fn label(self) -> &'static str {
        match self {
            Self::Color => "Color",
            Self::Channel(Channel::Red) => "Red",
            Self::Channel(Channel::Green) => "Green",
            Self::Channel(Channel::Blue) => "Blue",
            Self::Channel(Channel::Alpha) => "Alpha",
            Self::Luminance => "Luminance",
            Self::Inverted => "Inverted",
            Self::InvertedLinear => "Inverted (linear)",
        }
    }
}

/// Selected display/view pair and whether it is applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplaySelection {
    /// Display name.
    pub display: String,
    /// View name.
    pub view: String,
    /// Apply in Color mode.
    pub enabled: bool,
}

/// Produces display surfaces from the original buffer.
#[derive(Default)]
pub struct ImageTransformPipeline {
    original: Option<PixelBuffer>,
    mode: DisplayMode,
    luma_mode: LumaMode,
    transform: Option<Arc<dyn DisplayTransform>>,
    selection: DisplaySelection,
}

impl std::fmt::Debug for ImageTransformPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageTransformPipeline")
            .field("has_original", &self.original.is_some())
            .field("mode", &self.mode)
            .field("luma_mode", &self.luma_mode)
            .field("has_transform", &self.transform.is_some())
            .field("selection", &self.selection)
            .finish()
    }
}

impl ImageTransformPipeline {
    /// Pipeline without a display transform service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline using `transform` for the Color mode.
    pub fn with_display_transform(transform: Arc<dyn DisplayTransform>) -> Self {
        Self {
            transform: Some(transform),
            ..Self::default()
        }
    }

    /// The display transform service, if any.
    pub fn display_transform(&self) -> Option<&Arc<dyn DisplayTransform>> {
        self.transform.as_ref()
    }

    /// Replaces the original and returns to Color.
    pub fn set_original(&mut self, buffer: PixelBuffer) -> Option<Surface> {
        self.original = Some(buffer);
        self.mode = DisplayMode::Color;
        self.render()
    }

    /// Drops the original.
    pub fn clear(&mut self) {
        self.original = None;
        self.mode = DisplayMode::Color;
    }

    /// The pristine source buffer.
    #[inline]
    pub fn original(&self) -> Option<&PixelBuffer> {
        self.original.as_ref()
    }

    /// Current mode.
    #[inline]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Luminance precision mode.
    #[inline]
    pub fn luma_mode(&self) -> LumaMode {
        self.luma_mode
    }

    /// Sets the luminance precision mode (takes effect on the next render).
    pub fn set_luma_mode(&mut self, mode: LumaMode) {
        self.luma_mode = mode;
    }

    /// Current display/view selection.
    #[inline]
    pub fn selection(&self) -> &DisplaySelection {
        &self.selection
    }

    /// Selects a display/view pair.
    pub fn set_display(&mut self, display: impl Into<String>, view: impl Into<String>) -> Option<Surface> {
        self.selection.display = display.into();
        self.selection.view = view.into();
        self.render_if_color()
    }

    /// Turns the display transform on or off.
    pub fn set_display_transform_enabled(&mut self, enabled: bool) -> Option<Surface> {
        self.selection.enabled = enabled;
        self.render_if_color()
    }

    /// `None` returns to Color; a channel shows that channel.
    pub fn view_channel(&mut self, channel: Option<Channel>) -> Option<Surface> {
        self.original.as_ref()?;
        self.mode = channel.map_or(DisplayMode::Color, DisplayMode::Channel);
        self.render()
    }

    /// Shows luminance.
    pub fn view_luminance(&mut self) -> Option<Surface> {
        self.original.as_ref()?;
        self.mode = DisplayMode::Luminance;
        self.render()
    }

    /// Toggles the naive negative.
    pub fn toggle_invert(&mut self) -> Option<Surface> {
        self.toggle(DisplayMode::Inverted)
    }

    /// Toggles the gamma-aware negative.
    pub fn toggle_invert_linear(&mut self) -> Option<Surface> {
        self.toggle(DisplayMode::InvertedLinear)
    }

    fn toggle(&mut self, mode: DisplayMode) -> Option<Surface> {
        self.original.as_ref()?;
        self.mode = if self.mode == mode { DisplayMode::Color } else { mode };
        self.render()
    }

    fn render_if_color(&self) -> Option<Surface> {
        (self.mode == DisplayMode::Color).then(|| self.render()).flatten()
    }

    /// Computes the surface for the current mode. `None` without an image.
    pub fn render(&self) -> Option<Surface> {
        let original = self.original.as_ref()?;
        let start = Instant::now();
        let surface = match self.mode {
            DisplayMode::Color => self.render_color(original),
            DisplayMode::Channel(c) => kernel(original, nande_ops::extract_channel(original, c)),
            DisplayMode::Luminance => kernel(original, nande_ops::luminance(original, self.luma_mode)),
            DisplayMode::Inverted => kernel(original, nande_ops::invert(original)),
            DisplayMode::InvertedLinear => kernel(original, nande_ops::invert_linear(original)),
        };
        debug!(
            mode = self.mode.label(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "rendered display surface"
        );
        Some(surface)
    }

    fn render_color(&self, original: &PixelBuffer) -> Surface {
        let Some(transform) = self.transform.as_ref().filter(|_| self.selection.enabled) else {
            return Surface::from_buffer(original);
        };
        let rgba = original.to_rgba_f32();
        let mut rgb: Vec<[f32; 3]> = rgba.iter().map(|p| [p[0], p[1], p[2]]).collect();
        let (disp, view) = (&self.selection.display, &self.selection.view);
        if let Err(e) = transform.apply(&mut rgb, disp, view) {
            warn!(display = %disp, view = %view, error = %e, "display transform failed, showing untransformed image");
            return Surface::from_buffer(original);
        }
        let pixels: Vec<u8> = rgb
            .iter()
            .zip(&rgba)
            .flat_map(|(c, p)| [quantize(c[0]), quantize(c[1]), quantize(c[2]), quantize(p[3])])
            .collect();
        Surface::from_rgba8(original.width(), original.height(), original.format(), pixels)
            .unwrap_or_else(|_| Surface::from_buffer(original))
    }
}

/// Wraps a kernel result as a surface labelled with the source format.
fn kernel(original: &PixelBuffer, result: OpsResult<PixelBuffer>) -> Surface {
    let converted = result.map_err(|e| e.to_string()).and_then(|buf| {
        Surface::from_rgba8(buf.width(), buf.height(), original.format(), buf.to_rgba8())
            .map_err(|e| e.to_string())
    });
    converted.unwrap_or_else(|e| {
        warn!(error = %e, "pixel kernel failed, showing original");
        Surface::from_buffer(original)
    })
}
