//! Display/view transforms.
//!
//! The viewer treats color management as a service: it asks for the list of
//! displays, the views of a display, and applies a named display/view pair to
//! a float RGB buffer normalized to [0, 1]. Results may leave [0, 1]; callers
//! clamp before quantizing.
//!
//! [`DisplayConfig`] is the stock implementation. It is either built in or
//! read from a YAML file:
//!
//! ```yaml
//! displays:
//!   - name: sRGB
//!     views:
//!       - name: Standard
//!         transfer: srgb
//!       - name: Bright
//!         transfer: srgb
//!         exposure: 1.0
//! ```

use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ColorError, ColorResult, TransferFunction};

/// Applies named display/view transforms to pixels.
pub trait DisplayTransform: Send + Sync {
    /// Configured display names, in order.
    fn displays(&self) -> Vec<String>;

    /// View names of `display`, empty when the display is unknown.
    fn views(&self, display: &str) -> Vec<String>;

    /// Transforms `pixels` in place.
    fn apply(&self, pixels: &mut [[f32; 3]], display: &str, view: &str) -> ColorResult<()>;
}

/// One view of a display: exposure then an encoding curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDef {
    /// View name.
    pub name: String,
    /// Encoding applied after exposure.
    #[serde(default)]
    pub transfer: TransferFunction,
    /// Exposure adjustment in stops.
    #[serde(default)]
    pub exposure: f32,
}

/// A display device and the views it offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayDef {
    /// Display name.
    pub name: String,
    /// Available views, first is the default.
    pub views: Vec<ViewDef>,
}

/// Display/view configuration.
///
/// # Example
///
/// ```rust
/// use nande_color::{DisplayConfig, DisplayTransform};
///
/// let config = DisplayConfig::builtin();
/// let mut px = [[0.18, 0.18, 0.18]];
/// config.apply(&mut px, "sRGB", "Standard").unwrap();
/// assert!((px[0][0] - 0.461).abs() < 0.01);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Configured displays, first is the default.
    pub displays: Vec<DisplayDef>,
}

impl DisplayConfig {
    /// Stock displays: sRGB, Rec.1886 and plain gamma 2.2.
    pub fn builtin() -> Self {
        let view = |name: &str, transfer| ViewDef {
            name: name.into(),
            transfer,
            exposure: 0.0,
        };
        Self {
            displays: vec![
                DisplayDef {
                    name: "sRGB".into(),
                    views: vec![
                        view("Standard", TransferFunction::Srgb),
                        view("Raw", TransferFunction::Linear),
                    ],
                },
                DisplayDef {
                    name: "Rec.1886".into(),
                    views: vec![view("Gamma 2.4", TransferFunction::Gamma24)],
                },
                DisplayDef {
                    name: "Gamma 2.2".into(),
                    views: vec![view("Standard", TransferFunction::Gamma22)],
                },
            ],
        }
    }

    /// Parses a YAML config.
    pub fn from_yaml(text: &str) -> ColorResult<Self> {
        let config: Self = serde_yaml::from_str(text).map_err(|e| ColorError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a YAML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ColorResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        debug!(path = %path.display(), displays = config.displays.len(), "loaded display config");
        Ok(config)
    }

    /// First display and its first view.
    pub fn default_pair(&self) -> Option<(String, String)> {
        let display = self.displays.first()?;
        let view = display.views.first()?;
        Some((display.name.clone(), view.name.clone()))
    }

    /// Looks up a view definition.
    pub fn view(&self, display: &str, view: &str) -> ColorResult<&ViewDef> {
        let d = self
            .displays
            .iter()
            .find(|d| d.name == display)
            .ok_or_else(|| ColorError::DisplayNotFound(display.to_string()))?;
        d.views.iter().find(|v| v.name == view).ok_or_else(|| ColorError::ViewNotFound {
            display: display.to_string(),
            view: view.to_string(),
        })
    }

    fn validate(&self) -> ColorResult<()> {
        if self.displays.is_empty() {
            return Err(ColorError::Parse("no displays defined".into()));
        }
        if let Some(d) = self.displays.iter().find(|d| d.views.is_empty()) {
            return Err(ColorError::Parse(format!("display '{}' has no views", d.name)));
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DisplayTransform for DisplayConfig {
    fn displays(&self) -> Vec<String> {
        self.displays.iter().map(|d| d.name.clone()).collect()
    }

    fn views(&self, display: &str) -> Vec<String> {
        self.displays
            .iter()
            .find(|d| d.name == display)
            .map(|d| d.views.iter().map(|v| v.name.clone()).collect())
            .unwrap_or_default()
    }

    fn apply(&self, pixels: &mut [[f32; 3]], display: &str, view: &str) -> ColorResult<()> {
        let def = self.view(display, view)?;
        let gain = 2f32.powf(def.exposure);
        let transfer = def.transfer;
        pixels.par_iter_mut().for_each(|px| {
            for c in px.iter_mut() {
                *c = transfer.encode(*c * gain);
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_builtin_lists() {
        let config = DisplayConfig::builtin();
        assert_eq!(config.displays(), vec!["sRGB", "Rec.1886", "Gamma 2.2"]);
        assert_eq!(config.views("sRGB"), vec!["Standard", "Raw"]);
        assert!(config.views("P3").is_empty());
        assert_eq!(
            config.default_pair(),
            Some(("sRGB".to_string(), "Standard".to_string()))
        );
    }

    #[test]
    fn test_raw_view_is_identity() {
        let config = DisplayConfig::builtin();
        let mut px = [[0.25, 0.5, 1.5]];
        config.apply(&mut px, "sRGB", "Raw").unwrap();
        assert_eq!(px, [[0.25, 0.5, 1.5]]);
    }

    #[test]
    fn test_missing_pair_errors() {
        let config = DisplayConfig::builtin();
        let mut px = [[0.5; 3]];
        assert!(matches!(
            config.apply(&mut px, "P3", "Standard"),
            Err(ColorError::DisplayNotFound(_))
        ));
        assert!(matches!(
            config.apply(&mut px, "sRGB", "Filmic"),
            Err(ColorError::ViewNotFound { .. })
        ));
        assert_eq!(px, [[0.5; 3]]);
    }

    #[test]
    fn test_yaml_exposure() {
        let yaml = r#"
displays:
  - name: Monitor
    views:
      - name: Plus One
        transfer: linear
        exposure: 1.0
"#;
        let config = DisplayConfig::from_yaml(yaml).unwrap();
        let mut px = [[0.25, 0.5, 0.75]];
        config.apply(&mut px, "Monitor", "Plus One").unwrap();
        assert_abs_diff_eq!(px[0][0], 0.5);
        assert_abs_diff_eq!(px[0][2], 1.5);
    }

    #[test]
    fn test_yaml_rejects_empty() {
        assert!(matches!(
            DisplayConfig::from_yaml("displays: []"),
            Err(ColorError::Parse(_))
        ));
        assert!(matches!(
            DisplayConfig::from_yaml("displays:\n  - name: A\n    views: []\n"),
            Err(ColorError::Parse(_))
        ));
        assert!(DisplayConfig::from_yaml("not: [valid").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("displays.yaml");
        let yaml = serde_yaml::to_string(&DisplayConfig::builtin()).unwrap();
        std::fs::write(&path, yaml).unwrap();
        assert_eq!(DisplayConfig::from_file(&path).unwrap(), DisplayConfig::builtin());
    }
}
