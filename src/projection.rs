//! Bounding box to canvas projection

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Real world rectangle shown on the canvas
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BBox {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self { xmin, ymin, xmax, ymax }
    }
    /// Finite, with positive width and height
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [self.xmin, self.ymin, self.xmax, self.ymax].iter().all(|v| v.is_finite());
        if finite && self.xmax > self.xmin && self.ymax > self.ymin {
            Ok(())
        } else {
            Err(ConfigError::DegenerateBBox { xmin: self.xmin, ymin: self.ymin, xmax: self.xmax, ymax: self.ymax })
        }
    }
}

/// Affine map from a bounding box onto a `width` x `height` canvas
///
/// The y axis is flipped: geographic y grows upward, raster rows grow
/// downward.
///
///     use linemap::{BBox, Projection};
///
///     let proj = Projection::new(200, 100, BBox::new(0.0, 0.0, 100.0, 100.0)).unwrap();
///     assert_eq!(proj.project(50.0, 50.0), (100.0, 50.0));
///     assert_eq!(proj.project(0.0, 0.0), (0.0, 100.0));
///     assert_eq!(proj.project(100.0, 100.0), (200.0, 0.0));
///
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    bbox: BBox,
    width: f64,
    height: f64,
}

impl Projection {
    pub fn new(width: u32, height: u32, bbox: BBox) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyCanvas { width, height });
        }
        bbox.validate()?;
        Ok(Self { bbox, width: f64::from(width), height: f64::from(height) })
    }
    pub fn bbox(&self) -> &BBox {
        &self.bbox
    }
    /// Canvas size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }
    /// Real world (`x`,`y`) to pixel position
    pub fn project(&self, x: f64, y: f64) -> (f64, f64) {
        let b = &self.bbox;
        (
            (x - b.xmin) / (b.xmax - b.xmin) * self.width,
            (b.ymax - y) / (b.ymax - b.ymin) * self.height,
        )
    }
}
