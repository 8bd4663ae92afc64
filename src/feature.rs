//! Materialized features

use crate::color::Rgb8;
use crate::geometry::Geometry;
use crate::order::OrderSpec;
use crate::style::OrderKey;

use std::sync::Arc;

/// Geometry with its resolved style, ready to draw
///
/// Features are created by symbolizers while preparing and are never
/// changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    geometry: Arc<Geometry>,
    color: Rgb8,
    width: f64,
    order: OrderKey,
}

impl Feature {
    pub(crate) fn new(geometry: Arc<Geometry>, color: Rgb8, width: f64, order: OrderKey) -> Self {
        Self { geometry, color, width, order }
    }
    pub fn geometry(&self) -> &Arc<Geometry> {
        &self.geometry
    }
    pub fn color(&self) -> Rgb8 {
        self.color
    }
    pub fn width(&self) -> f64 {
        self.width
    }
    pub fn order(&self) -> &OrderKey {
        &self.order
    }
}

/// Features in registration order, until sorted for drawing
#[derive(Debug, Default)]
pub struct FeatureRegistry {
    features: Vec<Feature>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }
    pub(crate) fn register(&mut self, feature: Feature) {
        self.features.push(feature);
    }
    pub fn len(&self) -> usize {
        self.features.len()
    }
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
    pub fn as_slice(&self) -> &[Feature] {
        &self.features
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }
    pub fn clear(&mut self) {
        self.features.clear();
    }
    /// Stable sort into paint order
    pub fn sort(&mut self, order: &OrderSpec) {
        order.sort_features(&mut self.features);
    }
}
