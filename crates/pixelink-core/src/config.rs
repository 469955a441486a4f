//! Session configuration.

use crate::brushes::BrushKind;
use crate::color::CellColor;
use crate::error::{CanvasError, CanvasResult};
use crate::history::MAX_UNDO_HISTORY;
use crate::layer::{DEFAULT_LAYER, PREVIEW_LAYER};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings a canvas session starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Grid width in cells.
    pub grid_width: u32,
    /// Grid height in cells.
    pub grid_height: u32,
    /// Surface height in device pixels.
    pub zoom: f64,
    /// Name of the initial drawing layer.
    pub drawing_layer: String,
    /// Initial paint color.
    pub paint_color: CellColor,
    /// Initially selected brush; `None` disables brush dispatch.
    pub active_brush: Option<BrushKind>,
    /// Number of undoable gestures kept.
    pub max_undo_history: usize,
    /// Device pixels added to each painted cell.
    pub seam_overlap: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_width: 16,
            grid_height: 16,
            zoom: 100.0,
            drawing_layer: DEFAULT_LAYER.to_string(),
            paint_color: CellColor::RED,
            active_brush: Some(BrushKind::Pencil),
            max_undo_history: MAX_UNDO_HISTORY,
            seam_overlap: 1.0,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> CanvasResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check values the session would otherwise panic on.
    pub fn validate(&self) -> CanvasResult<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(CanvasError::InvalidConfig(format!(
                "grid must have at least one cell, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(CanvasError::InvalidConfig(format!(
                "zoom must be positive, got {}",
                self.zoom
            )));
        }
        if !self.seam_overlap.is_finite() || self.seam_overlap < 0.0 {
            return Err(CanvasError::InvalidConfig(format!(
                "seam_overlap must be non-negative, got {}",
                self.seam_overlap
            )));
        }
        if self.drawing_layer == PREVIEW_LAYER {
            return Err(CanvasError::InvalidConfig(format!(
                "'{PREVIEW_LAYER}' is reserved for the brush preview"
            )));
        }
        if self.max_undo_history == 0 {
            return Err(CanvasError::InvalidConfig(
                "max_undo_history must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_width, 16);
        assert_eq!(config.drawing_layer, "layer 1");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r##"{ "grid_width": 8, "paint_color": "#00f" }"##;
        let config = SessionConfig::from_json(json).unwrap();
        assert_eq!(config.grid_width, 8);
        assert_eq!(config.grid_height, 16);
        assert_eq!(config.paint_color, CellColor::BLUE);
        assert_eq!(config.active_brush, Some(BrushKind::Pencil));
    }

    #[test]
    fn test_null_brush() {
        let config = SessionConfig::from_json(r#"{ "active_brush": null }"#).unwrap();
        assert_eq!(config.active_brush, None);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            SessionConfig::from_json(r#"{ "grid_height": 0 }"#),
            Err(CanvasError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_json(r#"{ "zoom": -5 }"#),
            Err(CanvasError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_json(r#"{ "drawing_layer": "brush" }"#),
            Err(CanvasError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_json(r#"{ "paint_color": "blue" }"#),
            Err(CanvasError::Serialization(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = r#"{ "grid_width": 4, "grid_height": 2, "active_brush": "bucket" }"#;
        file.write_all(json.as_bytes()).unwrap();

        let config = SessionConfig::load(file.path()).unwrap();
        assert_eq!((config.grid_width, config.grid_height), (4, 2));
        assert_eq!(config.active_brush, Some(BrushKind::Bucket));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SessionConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(CanvasError::Io(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SessionConfig {
            active_brush: None,
            ..SessionConfig::default()
        };
        let back = SessionConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
