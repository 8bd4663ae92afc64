//! Map
//!
//! The map owns the canvas configuration, the attached symbolizers and the
//! feature registry, and runs the render pass:
//!
//! ```text
//! validate -> prepare symbolizers -> stable sort -> background -> draw
//! ```
//!
//! # Example
//!
//!     use linemap::{AttributeMap, Geometry, Line, Map, MemorySource, OrderKey, Rgb8};
//!     use std::sync::Arc;
//!
//!     let rails = Arc::new(MemorySource::new().with(
//!         Geometry::line(&[(0.0, 50.0), (100.0, 50.0)]),
//!         AttributeMap::new().with("layer", "0"),
//!     ));
//!
//!     let mut map = Map::new();
//!     map.configure_canvas(100, 100)
//!         .configure_bbox(0.0, 0.0, 100.0, 100.0)
//!         .configure_order(["layer"])
//!         .attach(Line::new()
//!             .data(rails)
//!             .order_fn(|attrs| Ok(OrderKey::new().with("layer", attrs.int_lossy("layer") as f64)))
//!             .color(Rgb8::new(0, 0, 200))
//!             .width(2.0));
//!
//!     let img = map.render().unwrap();
//!     assert_eq!(img.pixel(50, 50), Rgb8::new(0, 0, 200));
//!     assert_eq!(img.pixel(50, 10), Rgb8::white());
//!

use crate::buffer::RenderingBuffer;
use crate::color::Rgb8;
use crate::config::RenderConfig;
use crate::error::{ConfigError, Error};
use crate::feature::{Feature, FeatureRegistry};
use crate::order::OrderSpec;
use crate::projection::{BBox, Projection};
use crate::render::{Canvas, RasterCanvas};
use crate::symbolizer::Symbolizer;

use log::{debug, trace};
use std::path::Path;

#[derive(Debug)]
pub struct Map {
    canvas: Option<(u32, u32)>,
    bbox: Option<BBox>,
    order: Vec<String>,
    background: Rgb8,
    symbolizers: Vec<Symbolizer>,
    registry: FeatureRegistry,
}

impl Default for Map {
    fn default() -> Self {
        Self {
            canvas: None,
            bbox: None,
            order: vec![],
            background: Rgb8::white(),
            symbolizers: vec![],
            registry: FeatureRegistry::new(),
        }
    }
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }
    /// Map set up from a render configuration, without symbolizers
    pub fn from_config(config: &RenderConfig) -> Self {
        let mut map = Self::new();
        let b = config.bbox;
        map.configure_canvas(config.canvas_width, config.canvas_height)
            .configure_bbox(b.xmin, b.ymin, b.xmax, b.ymax)
            .configure_order(config.order_dimensions.iter().cloned())
            .background(config.background);
        map
    }
    /// Canvas size in pixels
    pub fn configure_canvas(&mut self, width: u32, height: u32) -> &mut Self {
        self.canvas = Some((width, height));
        self
    }
    /// Real world rectangle mapped onto the canvas
    pub fn configure_bbox(&mut self, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> &mut Self {
        self.bbox = Some(BBox::new(xmin, ymin, xmax, ymax));
        self
    }
    /// Order dimensions, coarsest first
    pub fn configure_order<I, S>(&mut self, dims: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = dims.into_iter().map(Into::into).collect();
        self
    }
    /// Background color, white unless set
    pub fn background(&mut self, color: Rgb8) -> &mut Self {
        self.background = color;
        self
    }
    /// Attach a symbolizer; symbolizers are prepared in attachment order
    pub fn attach<S: Into<Symbolizer>>(&mut self, symbolizer: S) -> &mut Self {
        self.symbolizers.push(symbolizer.into());
        self
    }
    pub fn symbolizers(&self) -> &[Symbolizer] {
        &self.symbolizers
    }
    /// Append a materialized feature to the registry
    pub fn register_feature(&mut self, feature: Feature) {
        self.registry.register(feature);
    }
    /// Features of the last render, in paint order
    pub fn features(&self) -> &[Feature] {
        self.registry.as_slice()
    }
    /// The registry, for preparing symbolizers by hand
    pub fn registry_mut(&mut self) -> &mut FeatureRegistry {
        &mut self.registry
    }
    /// Validated projection of the configured bounding box onto the canvas
    pub fn projection(&self) -> Result<Projection, ConfigError> {
        let (width, height) = self.canvas.ok_or(ConfigError::MissingCanvas)?;
        let bbox = self.bbox.ok_or(ConfigError::MissingBBox)?;
        Projection::new(width, height, bbox)
    }
    /// Real world (`x`,`y`) to pixel position
    pub fn project(&self, x: f64, y: f64) -> Result<(f64, f64), ConfigError> {
        Ok(self.projection()?.project(x, y))
    }
    /// Check the whole configuration before any data is read
    fn validate(&self) -> Result<(Projection, OrderSpec), ConfigError> {
        let projection = self.projection()?;
        let order = OrderSpec::new(self.order.iter().cloned())?;
        for s in &self.symbolizers {
            s.validate()?;
        }
        Ok((projection, order))
    }
    /// Render into a new raster
    pub fn render(&mut self) -> Result<RenderingBuffer, Error> {
        let (projection, order) = self.validate()?;
        let (width, height) = projection.size();
        let mut canvas = RasterCanvas::new(width as usize, height as usize);
        self.render_pass(&projection, &order, &mut canvas)?;
        Ok(canvas.into_buffer())
    }
    /// Render onto `canvas`
    pub fn render_with<C: Canvas>(&mut self, canvas: &mut C) -> Result<(), Error> {
        let (projection, order) = self.validate()?;
        self.render_pass(&projection, &order, canvas)
    }
    /// Render and encode into `path`
    ///
    /// Nothing is written unless the render succeeds.
    pub fn render_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let img = self.render()?;
        img.to_file(path)
    }

    fn render_pass<C: Canvas>(&mut self, projection: &Projection, order: &OrderSpec, canvas: &mut C) -> Result<(), Error> {
        self.registry.clear();
        for s in &self.symbolizers {
            if let Err(e) = s.prepare(&mut self.registry) {
                self.registry.clear();
                return Err(e);
            }
        }
        debug!("prepared {} features from {} symbolizers", self.registry.len(), self.symbolizers.len());

        self.registry.sort(order);
        debug!("sorted features by {:?}", order.dims());

        canvas.fill_background(self.background);
        let mut segments = 0;
        for feature in self.registry.iter() {
            let geometry = feature.geometry();
            for path in geometry.paths.iter().filter(|p| p.len() >= 2) {
                let points: Vec<(f64, f64)> = path.iter().map(|c| projection.project(c.x, c.y)).collect();
                trace!("path of {} points from ({}, {})", points.len(), points[0].0, points[0].1);
                canvas.draw_path(&points, feature.color(), feature.width());
            }
            segments += geometry.num_segments();
        }
        debug!("drew {} segments", segments);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use crate::style::OrderKey;
    use std::sync::Arc;

    #[test]
    fn registered_features_are_drawn_once_sorted() {
        let mut map = Map::new();
        map.configure_canvas(10, 10).configure_bbox(0.0, 0.0, 10.0, 10.0).configure_order(["layer"]);
        let g = Arc::new(Geometry::line(&[(0.0, 5.0), (10.0, 5.0)]));
        map.register_feature(Feature::new(g.clone(), Rgb8::black(), 1.0, OrderKey::new().with("layer", 1.0)));
        map.register_feature(Feature::new(g, Rgb8::white(), 1.0, OrderKey::new()));
        let order = OrderSpec::new(["layer"]).unwrap();
        map.registry.sort(&order);
        assert_eq!(map.features()[0].color(), Rgb8::white());
        assert_eq!(map.features()[1].color(), Rgb8::black());
    }

    #[test]
    fn project_needs_configuration() {
        let mut map = Map::new();
        assert_eq!(map.project(0.0, 0.0), Err(ConfigError::MissingCanvas));
        map.configure_canvas(10, 10);
        assert_eq!(map.project(0.0, 0.0), Err(ConfigError::MissingBBox));
        map.configure_bbox(0.0, 0.0, 0.0, 1.0);
        assert!(matches!(map.project(0.0, 0.0), Err(ConfigError::DegenerateBBox { .. })));
    }
}
