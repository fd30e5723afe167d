//! eframe host for the viewer.
//!
//! Translates egui input into [`InputEvent`]s, uploads display surfaces as
//! textures and paints each [`Frame`](crate::frame::Frame) with the egui
//! painter.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use egui::{Color32, ColorImage, TextureHandle, TextureOptions};
use nande_color::{DisplayConfig, DisplayTransform};
use nande_core::{PointF, RectF, Rgba8, Surface};
use nande_ops::Channel;
use tracing::{debug, warn};

use crate::frame::{Anchor, QuadSource};
use crate::grid::{GridMode, GridPrimitive, LineStyle};
use crate::pipeline::DisplayMode;
use crate::state::{ViewerPersistence, PERSISTENCE_KEY};
use crate::tiles::DEFAULT_TILE_EDGE;
use crate::viewer::{DropVerdict, InputEvent, Key, PointerButton, Viewer, ViewerNotification};

/// egui reports about 50 points per wheel notch; the zoom expects 120.
const WHEEL_POINTS_TO_DELTA: f64 = 120.0 / 50.0;

/// Zoom preset labels, indexed like the viewport presets.
const ZOOM_IN_LABELS: [&str; 5] = ["100%", "150%", "200%", "300%", "400%"];
const ZOOM_OUT_LABELS: [&str; 5] = ["100%", "75%", "50%", "25%", "10%"];

/// Configuration for launching the viewer.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Draw the image as tiles.
    pub use_tiles: bool,
    /// Maximum tile edge.
    pub tile_edge: u32,
    /// Grid mode override.
    pub grid: Option<GridMode>,
    /// Display configuration file (None = built-in).
    pub display_config: Option<PathBuf>,
    /// Display override.
    pub display: Option<String>,
    /// View override.
    pub view: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            use_tiles: false,
            tile_edge: DEFAULT_TILE_EDGE,
            grid: None,
            display_config: None,
            display: None,
            view: None,
        }
    }
}

/// Main viewer application.
pub struct NandeApp {
    viewer: Viewer,
    displays: Arc<DisplayConfig>,

    /// Textures indexed like [`QuadSource`]: the surface, or one per tile.
    textures: Vec<TextureHandle>,
    /// Generation and filtering the textures were uploaded for.
    uploaded: Option<(u64, bool)>,

    title: String,
    status: Option<String>,
    last_tick: Instant,
    zoom_in_index: usize,
    zoom_out_index: usize,
}

impl NandeApp {
    /// Creates the application, restoring persisted settings and applying
    /// `config` on top.
    pub fn new(cc: &eframe::CreationContext<'_>, image_path: Option<PathBuf>, config: ViewerConfig) -> Self {
        let displays = Arc::new(load_display_config(config.display_config.as_ref()));
        let transform: Arc<dyn DisplayTransform> = displays.clone();
        let mut viewer = Viewer::with_display_transform(transform);
        viewer.set_gpu_renderer(cc.wgpu_render_state.is_some());

        let persistence: ViewerPersistence = cc
            .storage
            .and_then(|s| eframe::get_value(s, PERSISTENCE_KEY))
            .unwrap_or_default();
        persistence.apply_to(&mut viewer);

        viewer.set_tile_edge(config.tile_edge);
        if config.use_tiles {
            viewer.set_use_tiles(true);
        }
        if let Some(mode) = config.grid {
            viewer.set_grid_mode(mode);
        }

        let selection = viewer.pipeline().selection().clone();
        let fallback = displays.default_pair().unwrap_or_default();
        let display = config
            .display
            .or_else(|| (!selection.display.is_empty()).then_some(selection.display))
            .unwrap_or(fallback.0);
        let view = config
            .view
            .or_else(|| (!selection.view.is_empty()).then_some(selection.view))
            .unwrap_or(fallback.1);
        viewer.set_display(&display, &view);

        // A failed load leaves the placeholder; the error shows in the status bar.
        let status = image_path.and_then(|path| load_status(&mut viewer, &path));

        Self {
            title: viewer.title(),
            status,
            viewer,
            displays,
            textures: Vec::new(),
            uploaded: None,
            last_tick: Instant::now(),
            zoom_in_index: 0,
            zoom_out_index: 0,
        }
    }

    /// Open file dialog and load selected image.
    fn open_file_dialog(&mut self) {
        let extensions: Vec<&str> = nande_io::VALID_EXTENSIONS
            .iter()
            .map(|e| e.trim_start_matches('.'))
            .collect();
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &extensions)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            self.load(path);
        }
    }

    fn load(&mut self, path: PathBuf) {
        self.status = load_status(&mut self.viewer, &path);
    }

    /// Re-uploads textures when the content or filtering changed.
    fn sync_textures(&mut self, ctx: &egui::Context) {
        let key = (self.viewer.generation(), self.viewer.linear_filtering());
        if self.uploaded == Some(key) {
            return;
        }
        let options = if key.1 {
            TextureOptions::LINEAR
        } else {
            TextureOptions::NEAREST
        };
        self.textures.clear();
        if self.viewer.use_tiles() && !self.viewer.tiles().is_empty() {
            for (i, tile) in self.viewer.tiles().tiles().iter().enumerate() {
                self.textures
                    .push(ctx.load_texture(format!("tile_{i}"), color_image(tile.surface()), options));
            }
        } else if let Some(surface) = self.viewer.surface() {
            self.textures
                .push(ctx.load_texture("viewer_image", color_image(surface), options));
        }
        debug!(generation = key.0, textures = self.textures.len(), "uploaded textures");
        self.uploaded = Some(key);
    }

    /// Keyboard, wheel and drag-and-drop input.
    fn handle_input(&mut self, ctx: &egui::Context, canvas: egui::Rect) {
        let mut events = Vec::new();
        let mut forbidden = false;
        let keyboard = !ctx.wants_keyboard_input();

        ctx.input(|i| {
            let shift = i.modifiers.shift;
            if keyboard && !i.modifiers.command {
                for (egui_key, key) in [
                    (egui::Key::R, Key::R),
                    (egui::Key::G, Key::G),
                    (egui::Key::B, Key::B),
                    (egui::Key::A, Key::A),
                    (egui::Key::C, Key::C),
                    (egui::Key::L, Key::L),
                    (egui::Key::I, Key::I),
                    (egui::Key::F, Key::F),
                    (egui::Key::N, Key::N),
                ] {
                    if i.key_pressed(egui_key) {
                        events.push(InputEvent::Key { key, shift });
                    }
                }
            }

            for event in &i.events {
                match event {
                    egui::Event::PointerButton {
                        pos, button, pressed, ..
                    } => {
                        let Some(button) = pointer_button(*button) else {
                            continue;
                        };
                        let inside = canvas.contains(*pos);
                        let pos = to_view(canvas, *pos);
                        if !*pressed {
                            events.push(InputEvent::PointerRelease { pos, button });
                        } else if inside {
                            events.push(InputEvent::PointerPress { pos, button });
                        }
                    }
                    egui::Event::PointerMoved(pos) => {
                        events.push(InputEvent::PointerMove {
                            pos: to_view(canvas, *pos),
                        });
                    }
                    _ => {}
                }
            }

            if i.raw_scroll_delta.y != 0.0
                && let Some(hover) = i.pointer.hover_pos()
                && canvas.contains(hover)
            {
                events.push(InputEvent::Wheel {
                    delta: f64::from(i.raw_scroll_delta.y) * WHEEL_POINTS_TO_DELTA,
                    pos: to_view(canvas, hover),
                });
            }

            if !i.raw.hovered_files.is_empty() {
                let paths: Vec<PathBuf> = i.raw.hovered_files.iter().filter_map(|f| f.path.clone()).collect();
                forbidden = self.viewer.drop_verdict(&paths) == DropVerdict::Forbidden;
            }
            if !i.raw.dropped_files.is_empty() {
                let paths = i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect();
                events.push(InputEvent::FilesDropped(paths));
            }
        });

        if forbidden {
            ctx.set_cursor_icon(egui::CursorIcon::NotAllowed);
        }
        for event in events {
            let dropped = matches!(event, InputEvent::FilesDropped(_));
            self.viewer.handle_event(event);
            if dropped {
                self.status = self.viewer.last_error().map(str::to_string);
            }
        }
    }

    /// Turns viewer notifications into status text.
    fn process_notifications(&mut self) {
        for note in self.viewer.take_notifications() {
            if let ViewerNotification::PixelInfo { x, y } = note {
                let value = u32::try_from(x)
                    .ok()
                    .zip(u32::try_from(y).ok())
                    .and_then(|(x, y)| self.viewer.surface()?.pixel(x, y));
                self.status = Some(match value {
                    Some([r, g, b, a]) => format!("[{x}, {y}] R:{r} G:{g} B:{b} A:{a}"),
                    None => format!("[{x}, {y}]"),
                });
            }
        }
    }

    /// File, zoom and mirror controls.
    fn draw_view_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Open").clicked() {
                self.open_file_dialog();
            }
            ui.separator();

            if ui.button("Fit").on_hover_text("Fit image (F)").clicked() {
                self.viewer.fit_to_image();
            }
            if ui.button("1:1").clicked() {
                self.viewer.reset_zoom();
            }
            if ui.button("-").clicked() {
                self.viewer.zoom_step(-1, 0.0);
            }
            if ui.button("+").clicked() {
                self.viewer.zoom_step(1, 0.0);
            }

            ui.label("In:");
            egui::ComboBox::from_id_salt("zoom_in")
                .width(60.0)
                .selected_text(ZOOM_IN_LABELS[self.zoom_in_index])
                .show_ui(ui, |ui| {
                    for (i, label) in ZOOM_IN_LABELS.iter().enumerate() {
                        if ui.selectable_value(&mut self.zoom_in_index, i, *label).changed() {
                            self.viewer.zoom_in_preset(i);
                        }
                    }
                });
            ui.label("Out:");
            egui::ComboBox::from_id_salt("zoom_out")
                .width(60.0)
                .selected_text(ZOOM_OUT_LABELS[self.zoom_out_index])
                .show_ui(ui, |ui| {
                    for (i, label) in ZOOM_OUT_LABELS.iter().enumerate() {
                        if ui.selectable_value(&mut self.zoom_out_index, i, *label).changed() {
                            self.viewer.zoom_out_preset(i);
                        }
                    }
                });
            ui.separator();

            let mirror = self.viewer.mirror_state();
            if ui.selectable_label(mirror.flip, "Flip").clicked() {
                self.viewer.flip();
            }
            if ui.selectable_label(mirror.flop, "Flop").clicked() {
                self.viewer.flop();
            }
            ui.separator();

            let mut tiles = self.viewer.use_tiles();
            if ui.checkbox(&mut tiles, "Tiles").changed() {
                self.viewer.set_use_tiles(tiles);
            }
            let mut linear = self.viewer.linear_filtering();
            if ui.checkbox(&mut linear, "Smooth").on_hover_text("Linear filtering (N)").changed() {
                self.viewer.set_linear_filtering(linear);
            }
            let mut fps = self.viewer.show_fps();
            if ui.checkbox(&mut fps, "FPS").changed() {
                self.viewer.set_show_fps(fps);
            }
        });
    }

    /// Channel, inversion and display transform controls.
    fn draw_color_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mode = self.viewer.display_mode();
            if ui.selectable_label(mode == DisplayMode::Color, "Color").clicked() {
                self.viewer.view_channel(None);
            }
            for channel in Channel::ALL {
                if ui
                    .selectable_label(mode == DisplayMode::Channel(channel), channel.label())
                    .clicked()
                {
                    self.viewer.view_channel(Some(channel));
                }
            }
            if ui.selectable_label(mode == DisplayMode::Luminance, "Luma").clicked() {
                self.viewer.view_luminance();
            }
            if ui.selectable_label(mode == DisplayMode::Inverted, "Invert").clicked() {
                self.viewer.invert_color();
            }
            if ui
                .selectable_label(mode == DisplayMode::InvertedLinear, "Invert Linear")
                .clicked()
            {
                self.viewer.invert_linear_color();
            }
            ui.separator();

            let selection = self.viewer.pipeline().selection().clone();
            let mut enabled = selection.enabled;
            if ui.checkbox(&mut enabled, "Display").changed() {
                self.viewer.set_display_transform_enabled(enabled);
            }
            egui::ComboBox::from_id_salt("display")
                .width(100.0)
                .selected_text(&selection.display)
                .show_ui(ui, |ui| {
                    for display in self.displays.displays() {
                        if ui.selectable_label(display == selection.display, &display).clicked() {
                            let view = self.displays.views(&display).into_iter().next().unwrap_or_default();
                            self.viewer.set_display(&display, &view);
                        }
                    }
                });
            egui::ComboBox::from_id_salt("view")
                .width(100.0)
                .selected_text(&selection.view)
                .show_ui(ui, |ui| {
                    for view in self.displays.views(&selection.display) {
                        if ui.selectable_label(view == selection.view, &view).clicked() {
                            self.viewer.set_display(&selection.display, &view);
                        }
                    }
                });
        });
    }

    /// Grid and background controls.
    fn draw_grid_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let grid = *self.viewer.grid();
            ui.label("Grid:");
            egui::ComboBox::from_id_salt("grid_mode")
                .width(70.0)
                .selected_text(grid.mode.label())
                .show_ui(ui, |ui| {
                    for &mode in GridMode::all() {
                        if ui.selectable_label(grid.mode == mode, mode.label()).clicked() {
                            self.viewer.set_grid_mode(mode);
                        }
                    }
                });

            let mut size = grid.cell_size;
            if ui.add(egui::DragValue::new(&mut size).range(1..=1024).prefix("size ")).changed() {
                self.viewer.set_grid_size(size);
            }
            let mut divider = grid.divider;
            if ui.add(egui::DragValue::new(&mut divider).range(1..=50).prefix("div ")).changed() {
                self.viewer.set_grid_divider(divider);
            }
            let mut width = grid.line_width;
            if ui.add(egui::DragValue::new(&mut width).range(1..=32).prefix("width ")).changed() {
                self.viewer.set_grid_line_width(width);
            }
            ui.separator();

            let mut color = color32(grid.color);
            ui.label("Main");
            if ui.color_edit_button_srgba(&mut color).changed() {
                self.viewer.set_grid_color(rgba8(color));
            }
            let mut divider_color = color32(grid.divider_color);
            ui.label("Divider");
            if ui.color_edit_button_srgba(&mut divider_color).changed() {
                self.viewer.set_grid_divider_color(rgba8(divider_color));
            }
            let mut background = color32(grid.background);
            ui.label("Background");
            if ui.color_edit_button_srgba(&mut background).changed() {
                self.viewer.set_background_color(rgba8(background));
            }
        });
    }

    /// Draw bottom status panel.
    fn draw_status(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{:.0}%", self.viewer.viewport().scale() * 100.0));
                if let Some(info) = self.viewer.image_info() {
                    ui.separator();
                    ui.label(format!(
                        "{}x{} {}ch {}",
                        info.width, info.height, info.channels, info.depth
                    ));
                }
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.monospace(status);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label("R/G/B/A/C: Channels | L: Luma | I: Invert | Shift+I: Linear | F: Fit | N: Filter");
                });
            });
        });
    }

    /// Draw main canvas.
    fn draw_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let available = ui.available_size();
                let (rect, _response) = ui.allocate_exact_size(available, egui::Sense::click_and_drag());
                self.viewer.handle_event(InputEvent::Resize {
                    width: f64::from(rect.width()),
                    height: f64::from(rect.height()),
                });
                self.handle_input(ctx, rect);
                if self.viewer.is_panning() {
                    ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
                }
                self.process_notifications();
                self.sync_textures(ctx);

                let frame = self.viewer.frame();
                let painter = ui.painter_at(rect);
                painter.rect_filled(rect, 0.0, color32(frame.background));

                for primitive in &frame.grid {
                    match *primitive {
                        GridPrimitive::Dot { at, color, width } => {
                            let radius = (width as f32 / 2.0).max(0.5);
                            painter.circle_filled(to_screen(rect, at), radius, color32(color));
                        }
                        GridPrimitive::Line {
                            from,
                            to,
                            color,
                            width,
                            style,
                        } => {
                            let stroke = egui::Stroke::new((width as f32).max(1.0), color32(color));
                            let points = [to_screen(rect, from), to_screen(rect, to)];
                            match style {
                                LineStyle::Solid => {
                                    painter.line_segment(points, stroke);
                                }
                                LineStyle::Dotted => {
                                    painter.extend(egui::Shape::dashed_line(&points, stroke, 1.0, 2.0));
                                }
                            }
                        }
                    }
                }

                for quad in &frame.quads {
                    let index = match quad.source {
                        QuadSource::Surface => 0,
                        QuadSource::Tile(i) => i,
                    };
                    let Some(texture) = self.textures.get(index) else {
                        continue;
                    };
                    let [u0, v0, u1, v1] = quad.uv();
                    painter.image(
                        texture.id(),
                        to_screen_rect(rect, quad.dest),
                        egui::Rect::from_min_max(egui::pos2(u0, v0), egui::pos2(u1, v1)),
                        Color32::WHITE,
                    );
                }

                for text in frame.hud.iter().chain(frame.placeholder.as_ref()) {
                    let align = match text.anchor {
                        Anchor::TopLeft => egui::Align2::LEFT_TOP,
                        Anchor::BottomLeft => egui::Align2::LEFT_BOTTOM,
                    };
                    painter.text(
                        to_screen(rect, text.pos),
                        align,
                        &text.text,
                        egui::FontId::proportional(text.size),
                        color32(text.color),
                    );
                }
            });
    }
}

impl eframe::App for NandeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbars").show(ctx, |ui| {
            self.draw_view_toolbar(ui);
            self.draw_color_toolbar(ui);
            self.draw_grid_toolbar(ui);
        });
        self.draw_status(ctx);
        self.draw_canvas(ctx);

        if self.last_tick.elapsed() >= Duration::from_secs(1) {
            self.last_tick = Instant::now();
            self.viewer.tick_fps();
        }
        if self.viewer.show_fps() {
            ctx.request_repaint_after(Duration::from_secs(1));
        }

        let title = self.viewer.title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }

        if self.viewer.take_repaint() {
            ctx.request_repaint();
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let persistence = ViewerPersistence::from_viewer(&self.viewer);
        eframe::set_value(storage, PERSISTENCE_KEY, &persistence);
    }
}

/// Loads the display configuration, falling back to the built-in one.
fn load_display_config(path: Option<&PathBuf>) -> DisplayConfig {
    let Some(path) = path else {
        return DisplayConfig::builtin();
    };
    DisplayConfig::from_file(path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "invalid display config, using built-in");
        DisplayConfig::builtin()
    })
}

/// Loads into the viewer; the status bar text is the load error, if any.
fn load_status(viewer: &mut Viewer, path: &Path) -> Option<String> {
    viewer.load(path).err().map(|e| e.to_string())
}

fn color_image(surface: &Surface) -> ColorImage {
    ColorImage::from_rgba_unmultiplied([surface.width() as usize, surface.height() as usize], surface.pixels())
}

fn pointer_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Left),
        egui::PointerButton::Secondary => Some(PointerButton::Right),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

fn color32(c: Rgba8) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn rgba8(c: Color32) -> Rgba8 {
    Rgba8::from(c.to_srgba_unmultiplied())
}

/// Screen position to canvas-relative view pixels.
fn to_view(canvas: egui::Rect, pos: egui::Pos2) -> PointF {
    PointF::new(f64::from(pos.x - canvas.min.x), f64::from(pos.y - canvas.min.y))
}

/// Canvas-relative view pixels to screen position.
fn to_screen(canvas: egui::Rect, p: PointF) -> egui::Pos2 {
    canvas.min + egui::vec2(p.x as f32, p.y as f32)
}

fn to_screen_rect(canvas: egui::Rect, r: RectF) -> egui::Rect {
    egui::Rect::from_min_max(to_screen(canvas, r.min()), to_screen(canvas, r.max()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    #[test]
    fn test_load_status_reports_error() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.png");
        RgbImage::from_pixel(2, 2, Rgb([9, 9, 9])).save(&good).unwrap();
        let missing = dir.path().join("missing.png");

        let mut viewer = Viewer::new();
        assert_eq!(load_status(&mut viewer, &good), None);
        let status = load_status(&mut viewer, &missing).unwrap();
        assert_eq!(Some(status.as_str()), viewer.last_error());
        assert_eq!(viewer.path(), Some(good.as_path()));
        assert_eq!(load_status(&mut viewer, &good), None);
    }
}
