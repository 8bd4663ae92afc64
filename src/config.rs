//! Render configuration
//!
//! ```json
//! {
//!   "canvasWidth": 1200,
//!   "canvasHeight": 700,
//!   "bbox": { "xmin": 8.38, "ymin": 48.995, "xmax": 8.42, "ymax": 49.01 },
//!   "orderDimensions": ["layer", "casing_core", "road_type"],
//!   "outputPath": "map.png",
//!   "background": [255, 255, 255]
//! }
//! ```

use crate::color::Rgb8;
use crate::error::{ConfigError, Error};
use crate::projection::BBox;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_background() -> Rgb8 {
    Rgb8::white()
}

/// Settings of one render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub bbox: BBox,
    pub order_dimensions: Vec<String>,
    pub output_path: PathBuf,
    #[serde(default = "default_background")]
    pub background: Rgb8,
}

impl RenderConfig {
    /// Parse a JSON configuration
    ///
    ///     use linemap::{RenderConfig, Rgb8};
    ///
    ///     let cfg = RenderConfig::from_json_str(r#"{
    ///         "canvasWidth": 200, "canvasHeight": 100,
    ///         "bbox": {"xmin": 0, "ymin": 0, "xmax": 100, "ymax": 100},
    ///         "orderDimensions": ["layer"],
    ///         "outputPath": "out.png"
    ///     }"#).unwrap();
    ///     assert_eq!(cfg.canvas_width, 200);
    ///     assert_eq!(cfg.background, Rgb8::white());
    ///
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
    /// Read and parse a JSON configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_json_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_and_bbox_are_read() {
        let cfg = RenderConfig::from_json_str(
            r#"{"canvasWidth": 1200, "canvasHeight": 700,
                "bbox": {"xmin": 8.38, "ymin": 48.995, "xmax": 8.42, "ymax": 49.01},
                "orderDimensions": ["layer", "casing_core", "road_type"],
                "outputPath": "xr.png", "background": [10, 20, 30]}"#,
        )
        .unwrap();
        assert_eq!(cfg.background, Rgb8::new(10, 20, 30));
        assert_eq!(cfg.bbox, BBox::new(8.38, 48.995, 8.42, 49.01));
        assert_eq!(cfg.order_dimensions.len(), 3);
        assert_eq!(cfg.output_path, PathBuf::from("xr.png"));
    }

    #[test]
    fn missing_field_is_invalid() {
        let err = RenderConfig::from_json_str(r#"{"canvasWidth": 1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
