//! The viewer: composition root over viewport, grid, tiles and pipeline.
//!
//! [`Viewer`] is free of any toolkit type. A host feeds it [`InputEvent`]s,
//! asks it for a [`Frame`] on every paint, and redraws when
//! [`take_repaint`](Viewer::take_repaint) says so. Everything runs on the
//! caller's thread.
//!
//! | Key | Action |
//! |-----|--------|
//! | `R` `G` `B` `A` | Single channel |
//! | `C` | Color |
//! | `L` | Luminance |
//! | `I` | Toggle negative |
//! | `Shift+I` | Toggle linear-light negative |
//! | `F` | Fit to image |
//! | `N` | Toggle linear filtering |

use std::path::{Path, PathBuf};
use std::sync::Arc;

use nande_color::DisplayTransform;
use nande_core::{BitDepth, PixelBuffer, PointF, RectF, Rgba8, Surface};
use nande_io::IoResult;
use nande_ops::{Channel, LumaMode};
use tracing::{debug, info, warn};

use crate::fps::FpsCounter;
use crate::frame::{Anchor, Frame, HudText, ImageQuad, QuadSource};
use crate::grid::{render_grid, GridConfig, GridMode, GridPrimitive};
use crate::pipeline::{DisplayMode, ImageTransformPipeline};
use crate::tiles::{Mirror, MirrorState, TileSet, DEFAULT_TILE_EDGE};
use crate::viewport::{self, ViewportModel};

/// Label painted when nothing is loaded.
pub const PLACEHOLDER_TEXT: &str = "No Image";

const HUD_FPS_SIZE: f32 = 20.0;
const HUD_TEXT_SIZE: f32 = 16.0;
const PLACEHOLDER_SIZE: f32 = 40.0;
const PLACEHOLDER_COLOR: Rgba8 = Rgba8::rgba(255, 255, 255, 60);

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary button; drags pan.
    Left,
    /// Secondary button; reports the pixel under the pointer.
    Right,
    /// Middle button.
    Middle,
}

/// Bound keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Red channel.
    R,
    /// Green channel.
    G,
    /// Blue channel.
    B,
    /// Alpha channel.
    A,
    /// Color.
    C,
    /// Luminance.
    L,
    /// Invert (linear with Shift).
    I,
    /// Fit.
    F,
    /// Linear filtering.
    N,
}

/// Input delivered by the host, positions in view pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Button went down.
    PointerPress {
        /// Pointer position.
        pos: PointF,
        /// Button.
        button: PointerButton,
    },
    /// Pointer moved.
    PointerMove {
        /// Pointer position.
        pos: PointF,
    },
    /// Button went up.
    PointerRelease {
        /// Pointer position.
        pos: PointF,
        /// Button.
        button: PointerButton,
    },
    /// Wheel turned; `delta` is in raw wheel units (120 per notch).
    Wheel {
        /// Raw delta.
        delta: f64,
        /// Pointer position.
        pos: PointF,
    },
    /// Key pressed.
    Key {
        /// Key.
        key: Key,
        /// Shift held.
        shift: bool,
    },
    /// Viewport resized.
    Resize {
        /// New width.
        width: f64,
        /// New height.
        height: f64,
    },
    /// Files dropped on the viewport.
    FilesDropped(Vec<PathBuf>),
}

/// Whether a drag-and-drop payload would be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropVerdict {
    /// One file with an allowed extension.
    Accept,
    /// Anything else; the host shows a forbidden cursor.
    Forbidden,
}

/// Notifications for the embedding application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerNotification {
    /// A button was pressed; image-space position.
    ImageClicked(PointF),
    /// Right button pixel readout.
    PixelInfo {
        /// Pixel X.
        x: i64,
        /// Pixel Y.
        y: i64,
    },
}

/// Size and format of what is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
    /// Source channel count.
    pub channels: u8,
    /// Source bit depth.
    pub depth: BitDepth,
}

#[derive(Debug, Clone, Copy, Default)]
struct PointerState {
    left: bool,
    right: bool,
    middle: bool,
    last: Option<PointF>,
}

impl PointerState {
    fn set(&mut self, button: PointerButton, down: bool) {
        match button {
            PointerButton::Left => self.left = down,
            PointerButton::Right => self.right = down,
            PointerButton::Middle => self.middle = down,
        }
    }
}

/// Interactive image viewer state.
#[derive(Debug)]
pub struct Viewer {
    viewport: ViewportModel,
    grid: GridConfig,
    pipeline: ImageTransformPipeline,
    surface: Option<Surface>,
    tiles: TileSet,
    use_tiles: bool,
    tile_edge: u32,
    mirror: MirrorState,
    pointer: PointerState,
    fps: FpsCounter,
    show_fps: bool,
    gpu: bool,
    linear_filtering: bool,
    drag_drop_enabled: bool,
    repaint: bool,
    generation: u64,
    path: Option<PathBuf>,
    last_error: Option<String>,
    notifications: Vec<ViewerNotification>,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::with_pipeline(ImageTransformPipeline::new())
    }
}

impl Viewer {
    /// Viewer without a display transform service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Viewer whose Color mode can go through `transform`.
    pub fn with_display_transform(transform: Arc<dyn DisplayTransform>) -> Self {
        Self::with_pipeline(ImageTransformPipeline::with_display_transform(transform))
    }

    fn with_pipeline(pipeline: ImageTransformPipeline) -> Self {
        Self {
            viewport: ViewportModel::default(),
            grid: GridConfig::default(),
            pipeline,
            surface: None,
            tiles: TileSet::default(),
            use_tiles: false,
            tile_edge: DEFAULT_TILE_EDGE,
            mirror: MirrorState::default(),
            pointer: PointerState::default(),
            fps: FpsCounter::default(),
            show_fps: false,
            gpu: false,
            linear_filtering: true,
            drag_drop_enabled: true,
            repaint: true,
            generation: 0,
            path: None,
            last_error: None,
            notifications: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Viewport model.
    #[inline]
    pub fn viewport(&self) -> &ViewportModel {
        &self.viewport
    }

    /// Grid settings.
    #[inline]
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Transform pipeline.
    #[inline]
    pub fn pipeline(&self) -> &ImageTransformPipeline {
        &self.pipeline
    }

    /// Current display surface.
    #[inline]
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Current tiles (empty unless tiles are in use).
    #[inline]
    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    /// Current display mode.
    #[inline]
    pub fn display_mode(&self) -> DisplayMode {
        self.pipeline.mode()
    }

    /// Flip/flop state.
    #[inline]
    pub fn mirror_state(&self) -> MirrorState {
        self.mirror
    }

    /// Bumped whenever the textures to draw change.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Path of the loaded file.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Window title: the loaded path, or the application name.
    pub fn title(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| "nande".to_string(), |p| p.display().to_string())
    }

    /// Message of the last failed load.
    #[inline]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Left button held.
    #[inline]
    pub fn is_panning(&self) -> bool {
        self.pointer.left
    }

    /// Left, right and middle button state.
    #[inline]
    pub fn buttons(&self) -> (bool, bool, bool) {
        (self.pointer.left, self.pointer.right, self.pointer.middle)
    }

    /// Zoom metric of the viewport.
    #[inline]
    pub fn zoom_metric(&self) -> f64 {
        self.viewport.zoom_metric()
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Decodes and shows a file. On failure the current image stays.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> IoResult<()> {
        let path = path.as_ref();
        match nande_io::read(path) {
            Ok(buffer) => {
                self.set_image(buffer);
                self.path = Some(path.to_path_buf());
                self.last_error = None;
                info!(path = %path.display(), "loaded image");
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load image");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Shows a decoded buffer unmirrored in Color mode and fits it.
    pub fn set_image(&mut self, buffer: PixelBuffer) {
        let surface = self.pipeline.set_original(buffer);
        self.reset_mirror();
        self.install(surface);
        self.fit_to_image();
    }

    /// Drops the image; the placeholder is shown.
    pub fn clear_image(&mut self) {
        self.pipeline.clear();
        self.surface = None;
        self.tiles.clear();
        self.reset_mirror();
        self.path = None;
        self.generation += 1;
        self.repaint = true;
    }

    fn install(&mut self, surface: Option<Surface>) {
        let Some(surface) = surface else {
            return;
        };
        self.surface = Some(surface);
        self.generation += 1;
        self.rebuild_tiles();
        self.repaint = true;
    }

    fn rebuild_tiles(&mut self) {
        self.tiles.clear();
        if !self.use_tiles {
            return;
        }
        if let Some(surface) = &self.surface {
            if let Err(e) = self.tiles.rebuild(surface, self.tile_edge) {
                warn!(error = %e, "failed to build tiles");
                self.tiles.clear();
            }
            self.tiles.set_mirror_state(self.mirror);
        }
    }

    fn tiled(&self) -> bool {
        self.use_tiles && !self.tiles.is_empty()
    }

    /// Tile mode flag.
    #[inline]
    pub fn use_tiles(&self) -> bool {
        self.use_tiles
    }

    /// Switches between tiled and single-surface drawing.
    pub fn set_use_tiles(&mut self, enabled: bool) {
        if self.use_tiles == enabled {
            return;
        }
        self.use_tiles = enabled;
        self.rebuild_tiles();
        self.generation += 1;
        self.repaint = true;
    }

    /// Maximum tile edge.
    #[inline]
    pub fn tile_edge(&self) -> u32 {
        self.tile_edge
    }

    /// Changes the maximum tile edge and rebuilds.
    pub fn set_tile_edge(&mut self, edge: u32) {
        self.tile_edge = edge.max(1);
        if self.use_tiles {
            self.rebuild_tiles();
            self.generation += 1;
            self.repaint = true;
        }
    }

    // ------------------------------------------------------------------
    // Viewport
    // ------------------------------------------------------------------

    /// Image-space bounds of the content: tile bounding box or surface.
    pub fn content_rect(&self) -> Option<RectF> {
        if self.tiled() {
            return Some(self.tiles.bounding_rect().into());
        }
        self.surface.as_ref().map(|s| s.rect().into())
    }

    /// Letterboxes the content in the viewport.
    pub fn fit_to_image(&mut self) {
        if let Some(r) = self.content_rect() {
            self.viewport.fit_to_image(r.width, r.height);
            self.repaint = true;
        }
    }

    /// Centers the content at 1:1.
    pub fn reset_zoom(&mut self) {
        if let Some(r) = self.content_rect() {
            self.viewport.reset_zoom_centered(r.width, r.height);
            self.repaint = true;
        }
    }

    /// Pins a magnification level.
    pub fn set_zoom(&mut self, level: f64) {
        if self.viewport.set_zoom(level) {
            self.repaint = true;
        }
    }

    /// Pins a zoom-in preset (1.0, 1.5, 2, 3, 4).
    pub fn zoom_in_preset(&mut self, index: usize) {
        self.set_zoom(viewport::zoom_in_preset(index));
    }

    /// Pins a zoom-out preset (1.0, 0.75, 0.5, 0.25, 0.1).
    pub fn zoom_out_preset(&mut self, index: usize) {
        self.set_zoom(viewport::zoom_out_preset(index));
    }

    /// One discrete zoom step around the viewport center.
    pub fn zoom_step(&mut self, direction: i32, sensitivity: f64) {
        if self.viewport.discrete_zoom_step(direction, sensitivity, None) {
            self.repaint = true;
        }
    }

    // ------------------------------------------------------------------
    // Mirroring
    // ------------------------------------------------------------------

    /// Toggles top-bottom mirroring. No-op without an image.
    pub fn flip(&mut self) {
        if self.surface.is_none() {
            return;
        }
        self.mirror.flip = !self.mirror.flip;
        if self.tiled() {
            self.tiles.apply_flip();
        }
        self.repaint = true;
    }

    /// Toggles left-right mirroring. No-op without an image.
    pub fn flop(&mut self) {
        if self.surface.is_none() {
            return;
        }
        self.mirror.flop = !self.mirror.flop;
        if self.tiled() {
            self.tiles.apply_flop();
        }
        self.repaint = true;
    }

    fn reset_mirror(&mut self) {
        self.mirror = MirrorState::default();
        self.tiles.set_mirror_state(self.mirror);
    }

    // ------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------

    /// `None` shows color, otherwise the given channel.
    pub fn view_channel(&mut self, channel: Option<Channel>) {
        let surface = self.pipeline.view_channel(channel);
        self.install(surface);
    }

    /// Shows luminance.
    pub fn view_luminance(&mut self) {
        let surface = self.pipeline.view_luminance();
        self.install(surface);
    }

    /// Toggles the naive negative.
    pub fn invert_color(&mut self) {
        let surface = self.pipeline.toggle_invert();
        self.install(surface);
    }

    /// Toggles the linear-light negative.
    pub fn invert_linear_color(&mut self) {
        let surface = self.pipeline.toggle_invert_linear();
        self.install(surface);
    }

    /// Selects the display/view pair.
    pub fn set_display(&mut self, display: &str, view: &str) {
        let surface = self.pipeline.set_display(display, view);
        self.install(surface);
    }

    /// Enables or disables the display transform.
    pub fn set_display_transform_enabled(&mut self, enabled: bool) {
        let surface = self.pipeline.set_display_transform_enabled(enabled);
        self.install(surface);
    }

    /// Luminance precision mode; re-renders a luminance view.
    pub fn set_luma_mode(&mut self, mode: LumaMode) {
        self.pipeline.set_luma_mode(mode);
        if self.pipeline.mode() == DisplayMode::Luminance {
            let surface = self.pipeline.render();
            self.install(surface);
        }
    }

    // ------------------------------------------------------------------
    // Grid and chrome
    // ------------------------------------------------------------------

    /// Replaces all grid settings.
    pub fn set_grid_config(&mut self, config: GridConfig) {
        self.grid = config;
        self.repaint = true;
    }

    /// Grid mode.
    pub fn set_grid_mode(&mut self, mode: GridMode) {
        self.grid.mode = mode;
        self.repaint = true;
    }

    /// Grid cell size (1..=1024).
    pub fn set_grid_size(&mut self, size: u32) {
        self.grid.set_cell_size(size);
        self.repaint = true;
    }

    /// Divider multiple (1..=50).
    pub fn set_grid_divider(&mut self, divider: u32) {
        self.grid.set_divider(divider);
        self.repaint = true;
    }

    /// Grid stroke width (1..=32).
    pub fn set_grid_line_width(&mut self, width: u32) {
        self.grid.set_line_width(width);
        self.repaint = true;
    }

    /// Main grid color.
    pub fn set_grid_color(&mut self, color: Rgba8) {
        self.grid.color = color;
        self.repaint = true;
    }

    /// Divider grid color.
    pub fn set_grid_divider_color(&mut self, color: Rgba8) {
        self.grid.divider_color = color;
        self.repaint = true;
    }

    /// Background color.
    #[inline]
    pub fn background_color(&self) -> Rgba8 {
        self.grid.background
    }

    /// Sets the background color.
    pub fn set_background_color(&mut self, color: Rgba8) {
        self.grid.background = color;
        self.repaint = true;
    }

    /// FPS overlay flag.
    #[inline]
    pub fn show_fps(&self) -> bool {
        self.show_fps
    }

    /// Shows or hides the FPS overlay.
    pub fn set_show_fps(&mut self, show: bool) {
        self.show_fps = show;
        self.repaint = true;
    }

    /// Marks the host renderer as GPU-backed for the overlay label.
    pub fn set_gpu_renderer(&mut self, gpu: bool) {
        self.gpu = gpu;
    }

    /// Texture sampling mode.
    #[inline]
    pub fn linear_filtering(&self) -> bool {
        self.linear_filtering
    }

    /// Sets the texture sampling mode.
    pub fn set_linear_filtering(&mut self, linear: bool) {
        self.linear_filtering = linear;
        self.repaint = true;
    }

    /// Drag-and-drop loading flag.
    #[inline]
    pub fn drag_drop_enabled(&self) -> bool {
        self.drag_drop_enabled
    }

    /// Enables or disables drag-and-drop loading.
    pub fn set_drag_drop_enabled(&mut self, enabled: bool) {
        self.drag_drop_enabled = enabled;
    }

    /// Size and source format of the displayed content.
    pub fn image_info(&self) -> Option<ImageInfo> {
        if self.tiled() {
            let bounds = self.tiles.bounding_rect();
            let format = self.tiles.tiles().first()?.surface().format();
            return Some(ImageInfo {
                width: bounds.width,
                height: bounds.height,
                channels: format.channels,
                depth: format.depth,
            });
        }
        self.surface.as_ref().map(|s| ImageInfo {
            width: s.width(),
            height: s.height(),
            channels: s.format().channels,
            depth: s.format().depth,
        })
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Whether a drop of `paths` would be accepted.
    pub fn drop_verdict(&self, paths: &[PathBuf]) -> DropVerdict {
        match paths {
            [path] if self.drag_drop_enabled && nande_io::is_supported_path(path) => DropVerdict::Accept,
            _ => DropVerdict::Forbidden,
        }
    }

    /// Dispatches one input event.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerPress { pos, button } => {
                self.pointer.set(button, true);
                self.pointer.last = Some(pos);
                let scene = self.viewport.map_to_scene(pos);
                self.notifications.push(ViewerNotification::ImageClicked(scene));
                if button == PointerButton::Right {
                    self.notifications.push(ViewerNotification::PixelInfo {
                        x: scene.x.floor() as i64,
                        y: scene.y.floor() as i64,
                    });
                }
            }
            InputEvent::PointerMove { pos } => {
                if self.pointer.left {
                    if let Some(last) = self.pointer.last {
                        let delta = pos - last;
                        self.viewport.pan_view(delta.x, delta.y);
                        self.repaint = true;
                    }
                    self.pointer.last = Some(pos);
                }
            }
            InputEvent::PointerRelease { button, .. } => {
                self.pointer.set(button, false);
                if !self.pointer.left {
                    self.pointer.last = None;
                }
            }
            InputEvent::Wheel { delta, pos } => {
                let pivot = self.viewport.map_to_scene(pos);
                if self.viewport.wheel_zoom(delta, Some(pivot)) {
                    self.repaint = true;
                }
            }
            InputEvent::Key { key, shift } => self.handle_key(key, shift),
            InputEvent::Resize { width, height } => {
                if self.viewport.set_viewport_size(width, height) {
                    self.repaint = true;
                }
            }
            InputEvent::FilesDropped(paths) => {
                self.drop_files(&paths);
            }
        }
    }

    fn handle_key(&mut self, key: Key, shift: bool) {
        match key {
            Key::R => self.view_channel(Some(Channel::Red)),
            Key::G => self.view_channel(Some(Channel::Green)),
            Key::B => self.view_channel(Some(Channel::Blue)),
            Key::A => self.view_channel(Some(Channel::Alpha)),
            Key::C => self.view_channel(None),
            Key::L => self.view_luminance(),
            Key::I if shift => self.invert_linear_color(),
            Key::I => self.invert_color(),
            Key::F => self.fit_to_image(),
            Key::N => self.set_linear_filtering(!self.linear_filtering),
        }
    }

    /// Loads a dropped file. Returns whether it was accepted and loaded.
    pub fn drop_files(&mut self, paths: &[PathBuf]) -> bool {
        if self.drop_verdict(paths) == DropVerdict::Forbidden {
            debug!(count = paths.len(), "drop rejected");
            return false;
        }
        self.load(&paths[0]).is_ok()
    }

    /// Drains pending notifications.
    pub fn take_notifications(&mut self) -> Vec<ViewerNotification> {
        std::mem::take(&mut self.notifications)
    }

    /// Returns and clears the repaint request.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.repaint)
    }

    /// Requests a repaint.
    pub fn request_repaint(&mut self) {
        self.repaint = true;
    }

    /// One second FPS tick.
    pub fn tick_fps(&mut self) -> bool {
        let repaint = self.fps.tick(self.is_panning());
        self.repaint |= repaint;
        repaint
    }

    /// Frames painted during the last second.
    #[inline]
    pub fn framerate(&self) -> u32 {
        self.fps.framerate()
    }

    // ------------------------------------------------------------------
    // Paint
    // ------------------------------------------------------------------

    /// Image quads in view pixels.
    pub fn quads(&self) -> Vec<ImageQuad> {
        if self.tiled() {
            return self
                .tiles
                .placements()
                .enumerate()
                .map(|(i, (_, p))| ImageQuad {
                    source: QuadSource::Tile(i),
                    dest: self.viewport.map_rect_to_view(p.dest),
                    mirror_x: p.mirror_x,
                    mirror_y: p.mirror_y,
                })
                .collect();
        }
        let Some(surface) = &self.surface else {
            return Vec::new();
        };
        let bounds = RectF::from(surface.rect());
        let p = Mirror::about(self.mirror, bounds).place(bounds);
        vec![ImageQuad {
            source: QuadSource::Surface,
            dest: self.viewport.map_rect_to_view(p.dest),
            mirror_x: p.mirror_x,
            mirror_y: p.mirror_y,
        }]
    }

    /// Describes the next paint and counts it as a frame.
    pub fn frame(&mut self) -> Frame {
        self.fps.frame();
        let size = self.viewport.viewport_size();
        let grid = render_grid(
            &self.grid,
            self.viewport.visible_scene_rect(),
            self.viewport.zoom_metric(),
            self.viewport.scale(),
        )
        .into_iter()
        .map(|p| self.grid_to_view(p))
        .collect();
        let quads = self.quads();

        let mut hud = Vec::new();
        if self.show_fps {
            hud.push(HudText {
                text: format!("{} FPS", self.fps.framerate()),
                pos: PointF::ZERO,
                anchor: Anchor::TopLeft,
                size: HUD_FPS_SIZE,
                color: Rgba8::WHITE,
            });
            hud.push(HudText {
                text: if self.gpu { "GPU" } else { "Raster" }.to_string(),
                pos: PointF::new(0.0, f64::from(HUD_FPS_SIZE) * 1.25),
                anchor: Anchor::TopLeft,
                size: HUD_TEXT_SIZE,
                color: Rgba8::WHITE,
            });
        }

        let placeholder = quads.is_empty().then(|| HudText {
            text: PLACEHOLDER_TEXT.to_string(),
            pos: PointF::new(10.0, size.height - 5.0),
            anchor: Anchor::BottomLeft,
            size: PLACEHOLDER_SIZE,
            color: PLACEHOLDER_COLOR,
        });

        Frame {
            size,
            background: self.grid.background,
            grid,
            quads,
            hud,
            placeholder,
            linear_filtering: self.linear_filtering,
        }
    }

    fn grid_to_view(&self, p: GridPrimitive) -> GridPrimitive {
        match p {
            GridPrimitive::Dot { at, color, width } => GridPrimitive::Dot {
                at: self.viewport.map_to_view(at),
                color,
                width,
            },
            GridPrimitive::Line {
                from,
                to,
                color,
                width,
                style,
            } => GridPrimitive::Line {
                from: self.viewport.map_to_view(from),
                to: self.viewport.map_to_view(to),
                color,
                width,
                style,
            },
        }
    }
}
