//! JSON settings file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lumen_renderer::{CameraConfig, RenderConfig};
use serde::{Deserialize, Serialize};

/// Everything the binary reads from disk. Missing fields keep their defaults.
///
/// ```json
/// {
///   "render": { "width": 640, "height": 360, "samples_per_pixel": 32, "seed": 7 },
///   "camera": { "position": [0.0, 10.0, -30.0], "target": [0.0, -1.0, 0.0], "fov": 90.0 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub render: RenderConfig,
    pub camera: CameraConfig,
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.render.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_renderer::{BlockOrder, Vec3};

    #[test]
    fn test_empty_settings_are_defaults() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_settings() {
        let settings = Settings::from_json(
            r#"{
                "render": { "width": 64, "height": 48, "seed": 7, "block_order": "scanline" },
                "camera": { "position": [1.0, 2.0, 3.0] }
            }"#,
        )
        .unwrap();

        assert_eq!(settings.render.width, 64);
        assert_eq!(settings.render.seed, Some(7));
        assert_eq!(settings.render.block_order, BlockOrder::Scanline);
        assert_eq!(settings.render.samples_per_pixel, RenderConfig::default().samples_per_pixel);
        assert_eq!(settings.camera.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(settings.camera.fov, CameraConfig::default().fov);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        assert!(Settings::from_json(r#"{ "render": { "threads": 0 } }"#).is_err());
        assert!(Settings::from_json("not json").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read settings"));
    }
}
