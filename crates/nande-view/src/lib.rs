//! # nande-view
//!
//! Pan/zoom image viewport with a background grid, tiled drawing and
//! display transforms.
//!
//! Features:
//! - Unbounded canvas with drag panning, cursor-anchored wheel zoom and
//!   stepped zoom clamped to a band
//! - Fit, 1:1 reset and zoom presets
//! - Dots or lines grid drawn under the image
//! - Tiled drawing with group flip/flop about the bounding box
//! - Channel isolation, luminance, naive and linear-light inversion
//! - Display/view transform in Color mode
//! - Drag & drop loading, FPS overlay, persistent settings
//!
//! The viewer core ([`Viewer`]) knows nothing about egui. It consumes
//! [`InputEvent`]s and describes each paint as a [`Frame`]; [`NandeApp`]
//! is the eframe host that feeds it and paints the frames.
//!
//! # Quick Start
//!
//! ```ignore
//! use nande_view::{run, ViewerConfig};
//!
//! let exit_code = run("image.png", ViewerConfig::default());
//! ```
//!
//! # Keyboard Shortcuts
//!
//! | Key | Action |
//! |-----|--------|
//! | `R` | Red channel |
//! | `G` | Green channel |
//! | `B` | Blue channel |
//! | `A` | Alpha channel |
//! | `C` | Color mode |
//! | `L` | Luminance |
//! | `I` | Toggle negative |
//! | `Shift+I` | Toggle linear-light negative |
//! | `F` | Fit image to window |
//! | `N` | Toggle linear filtering |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod app;
pub mod fps;
pub mod frame;
pub mod grid;
pub mod pipeline;
mod state;
pub mod tiles;
pub mod viewer;
pub mod viewport;

pub use app::{NandeApp, ViewerConfig};
pub use fps::FpsCounter;
pub use frame::{Anchor, Frame, HudText, ImageQuad, QuadSource};
pub use grid::{render_grid, GridConfig, GridMode, GridPrimitive, LineStyle};
pub use pipeline::{DisplayMode, DisplaySelection, ImageTransformPipeline};
pub use state::{ViewerPersistence, PERSISTENCE_KEY};
pub use tiles::{Mirror, MirrorState, Placement, Tile, TileSet, DEFAULT_TILE_EDGE};
pub use viewer::{
    DropVerdict, ImageInfo, InputEvent, Key, PointerButton, Viewer, ViewerNotification, PLACEHOLDER_TEXT,
};
pub use viewport::ViewportModel;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use state::DEFAULT_WINDOW;
use tracing::{debug, error, info};

/// Run the viewer with an optional initial file.
///
/// Without a path the last opened file is restored from persistence when
/// it still exists.
///
/// # Returns
/// Exit code: 0 for success, 1 for error
pub fn run_opt(path: Option<PathBuf>, config: ViewerConfig) -> i32 {
    let resolved = path.or_else(|| load_persistence().and_then(|p| p.last_file).filter(|f| f.exists()));

    match &resolved {
        Some(p) => info!(path = %p.display(), "starting viewer"),
        None => info!("starting empty viewer"),
    }

    let title = resolved
        .as_ref()
        .map_or_else(|| "nande".to_string(), |p| p.display().to_string());
    run_internal(resolved, title, config)
}

/// Run the viewer on a file.
///
/// # Returns
/// Exit code: 0 for success, 1 for error
pub fn run<P: AsRef<Path>>(path: P, config: ViewerConfig) -> i32 {
    let path = path.as_ref();
    if !path.exists() {
        error!(path = %path.display(), "file not found");
        return 1;
    }
    run_internal(Some(path.to_path_buf()), path.display().to_string(), config)
}

fn run_internal(path: Option<PathBuf>, title: String, config: ViewerConfig) -> i32 {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size(DEFAULT_WINDOW)
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true),
        persistence_path: persistence_path(),
        ..Default::default()
    };

    debug!("creating window");
    let result = eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| Ok(Box::new(NandeApp::new(cc, path, config)))),
    );

    match result {
        Ok(()) => {
            debug!("viewer exited");
            0
        }
        Err(e) => {
            error!(error = %e, "viewer error");
            1
        }
    }
}

/// Platform-specific persistence directory.
fn persistence_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("nande").join("viewer"))
}

/// Reads the viewer settings from eframe's `app.ron` outside of eframe.
fn load_persistence() -> Option<ViewerPersistence> {
    let path = persistence_path()?.join("app.ron");
    let text = std::fs::read_to_string(path).ok()?;
    parse_persistence(&text)
}

/// eframe stores a map of keys to RON-encoded values.
fn parse_persistence(text: &str) -> Option<ViewerPersistence> {
    let entries: HashMap<String, String> = ron::from_str(text).ok()?;
    ron::from_str(entries.get(PERSISTENCE_KEY)?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_config_default() {
        let config = ViewerConfig::default();
        assert!(!config.use_tiles);
        assert_eq!(config.tile_edge, DEFAULT_TILE_EDGE);
        assert!(config.display_config.is_none());
        assert!(config.grid.is_none());
    }

    #[test]
    fn test_parse_persistence_from_storage_map() {
        let mut state = ViewerPersistence::default();
        state.show_fps = true;
        state.last_file = Some(PathBuf::from("/tmp/a.png"));
        let mut entries = HashMap::new();
        entries.insert(PERSISTENCE_KEY.to_string(), ron::to_string(&state).unwrap());
        entries.insert("egui".to_string(), "()".to_string());
        let text = ron::to_string(&entries).unwrap();
        assert_eq!(parse_persistence(&text), Some(state));
    }

    #[test]
    fn test_parse_persistence_rejects_garbage() {
        assert!(parse_persistence("not ron").is_none());
        assert!(parse_persistence("{}").is_none());
    }
}
