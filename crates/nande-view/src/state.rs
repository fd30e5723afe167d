//! Viewer persistence.
//!
//! Settings saved between sessions through eframe storage.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::grid::GridConfig;
use crate::viewer::Viewer;

/// Storage key for [`ViewerPersistence`].
pub const PERSISTENCE_KEY: &str = "nande_viewer_state";

/// Default window size.
pub const DEFAULT_WINDOW: [f32; 2] = [1280.0, 720.0];

/// Persistent viewer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerPersistence {
    /// Last opened file path.
    pub last_file: Option<PathBuf>,
    /// Grid and background.
    pub grid: GridConfig,
    /// Tiled drawing.
    pub use_tiles: bool,
    /// FPS overlay.
    pub show_fps: bool,
    /// Linear texture filtering.
    pub linear_filtering: bool,
    /// Last display name.
    pub display: Option<String>,
    /// Last view name.
    pub view: Option<String>,
    /// Display transform applied in Color mode.
    pub display_transform: bool,
}

impl Default for ViewerPersistence {
    fn default() -> Self {
        Self {
            last_file: None,
            grid: GridConfig::default(),
            use_tiles: false,
            show_fps: false,
            linear_filtering: true,
            display: None,
            view: None,
            display_transform: true,
        }
    }
}

impl ViewerPersistence {
    /// Snapshot of a viewer's settings.
    pub fn from_viewer(viewer: &Viewer) -> Self {
        let selection = viewer.pipeline().selection();
        Self {
            last_file: viewer.path().map(PathBuf::from),
            grid: *viewer.grid(),
            use_tiles: viewer.use_tiles(),
            show_fps: viewer.show_fps(),
            linear_filtering: viewer.linear_filtering(),
            display: (!selection.display.is_empty()).then(|| selection.display.clone()),
            view: (!selection.view.is_empty()).then(|| selection.view.clone()),
            display_transform: selection.enabled,
        }
    }

    /// Restores settings onto a viewer. The last file is not loaded here.
    pub fn apply_to(&self, viewer: &mut Viewer) {
        viewer.set_grid_config(self.grid);
        viewer.set_use_tiles(self.use_tiles);
        viewer.set_show_fps(self.show_fps);
        viewer.set_linear_filtering(self.linear_filtering);
        if let (Some(display), Some(view)) = (&self.display, &self.view) {
            viewer.set_display(display, view);
        }
        viewer.set_display_transform_enabled(self.display_transform);
    }
}
