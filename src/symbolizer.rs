//! Symbolizers
//!
//! A symbolizer binds a data source to style functions. Preparing it
//! evaluates the styles for every record and registers the resulting
//! [`Feature`]s; nothing is drawn until the map sorts them.
//!
//! # Example
//!
//!     use linemap::{AttributeMap, Geometry, LineWithCasing, MemorySource, OrderKey, Rgb8};
//!     use std::sync::Arc;
//!
//!     let roads = Arc::new(MemorySource::new().with(
//!         Geometry::line(&[(8.38, 48.995), (8.42, 49.01)]),
//!         AttributeMap::new().with("type", "primary").with("layer", "1"),
//!     ));
//!
//!     let symbolizer = LineWithCasing::new()
//!         .name("roads")
//!         .data(roads)
//!         .order_fn(|attrs| Ok(OrderKey::new().with("layer", attrs.int_lossy("layer") as f64)))
//!         .core_color(Rgb8::new(229, 181, 13))
//!         .casing_color_fn(|attrs| {
//!             Ok(if attrs.flag("bridge") { Rgb8::black() } else { Rgb8::gray(150) })
//!         })
//!         .core_width(8.0)
//!         .casing_width(2.0);
//!

use crate::attributes::AttributeMap;
use crate::color::Rgb8;
use crate::datasource::DataSource;
use crate::error::{ConfigError, Error, StyleError};
use crate::feature::{Feature, FeatureRegistry};
use crate::geometry::Geometry;
use crate::style::{decorate_order, OrderKey, StyleFn, CASING_CORE};

use log::debug;
use std::fmt;
use std::sync::Arc;

/// Style descriptor attached to a [`Map`](crate::Map)
#[derive(Debug, Clone)]
pub enum Symbolizer {
    Line(Line),
    LineWithCasing(LineWithCasing),
}

impl Symbolizer {
    pub fn name(&self) -> &str {
        match self {
            Symbolizer::Line(l) => &l.name,
            Symbolizer::LineWithCasing(l) => &l.name,
        }
    }
    /// Check that the symbolizer can be prepared
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Symbolizer::Line(l) => l.validate(),
            Symbolizer::LineWithCasing(l) => l.validate(),
        }
    }
    /// Register one feature per record (two for a cased line)
    ///
    /// Returns the number of features registered. Preparing twice registers
    /// everything twice.
    pub fn prepare(&self, registry: &mut FeatureRegistry) -> Result<usize, Error> {
        match self {
            Symbolizer::Line(l) => l.prepare(registry),
            Symbolizer::LineWithCasing(l) => l.prepare(registry),
        }
    }
}

impl From<Line> for Symbolizer {
    fn from(l: Line) -> Self {
        Symbolizer::Line(l)
    }
}
impl From<LineWithCasing> for Symbolizer {
    fn from(l: LineWithCasing) -> Self {
        Symbolizer::LineWithCasing(l)
    }
}

struct Source(Option<Arc<dyn DataSource>>);

impl Clone for Source {
    fn clone(&self) -> Self {
        Source(self.0.clone())
    }
}
impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0.is_some() { "Some(DataSource)" } else { "None" })
    }
}

/// Plain stroked line
///
/// Defaults: color black, width 1, empty order key.
#[derive(Debug, Clone)]
pub struct Line {
    name: String,
    data: Source,
    color: StyleFn<Rgb8>,
    width: StyleFn<f64>,
    order: StyleFn<OrderKey>,
}

impl Default for Line {
    fn default() -> Self {
        Self {
            name: "line".to_string(),
            data: Source(None),
            color: StyleFn::constant(Rgb8::black()),
            width: StyleFn::constant(1.0),
            order: StyleFn::constant(OrderKey::new()),
        }
    }
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }
    /// Name used in log messages and errors
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
    pub fn data(mut self, data: Arc<dyn DataSource>) -> Self {
        self.data = Source(Some(data));
        self
    }
    pub fn color(self, color: Rgb8) -> Self {
        self.color_style(StyleFn::constant(color))
    }
    pub fn color_fn<F>(self, f: F) -> Self
    where
        F: Fn(&AttributeMap) -> Result<Rgb8, StyleError> + Send + Sync + 'static,
    {
        self.color_style(StyleFn::new(f))
    }
    pub fn color_style(mut self, color: StyleFn<Rgb8>) -> Self {
        self.color = color;
        self
    }
    pub fn width(self, width: f64) -> Self {
        self.width_style(StyleFn::constant(width))
    }
    pub fn width_fn<F>(self, f: F) -> Self
    where
        F: Fn(&AttributeMap) -> Result<f64, StyleError> + Send + Sync + 'static,
    {
        self.width_style(StyleFn::new(f))
    }
    pub fn width_style(mut self, width: StyleFn<f64>) -> Self {
        self.width = width;
        self
    }
    pub fn order(self, order: OrderKey) -> Self {
        self.order_style(StyleFn::constant(order))
    }
    pub fn order_fn<F>(self, f: F) -> Self
    where
        F: Fn(&AttributeMap) -> Result<OrderKey, StyleError> + Send + Sync + 'static,
    {
        self.order_style(StyleFn::new(f))
    }
    pub fn order_style(mut self, order: StyleFn<OrderKey>) -> Self {
        self.order = order;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.data.0 {
            Some(_) => Ok(()),
            None => Err(ConfigError::MissingDataSource(self.name.clone())),
        }
    }

    /// Resolve the style of one record
    fn materialize(&self, geometry: &Arc<Geometry>, attrs: &AttributeMap) -> Result<Feature, StyleError> {
        let color = self.color.eval(attrs)?;
        let width = self.width.eval(attrs)?;
        if !width.is_finite() || width < 0.0 {
            return Err(StyleError::InvalidWidth(width));
        }
        let order = self.order.eval(attrs)?;
        order.check()?;
        Ok(Feature::new(Arc::clone(geometry), color, width, order))
    }

    pub fn prepare(&self, registry: &mut FeatureRegistry) -> Result<usize, Error> {
        let Some(data) = self.data.0.as_ref() else {
            return Err(ConfigError::MissingDataSource(self.name.clone()).into());
        };
        let mut index = 0;
        data.for_each(&mut |geometry, attrs| {
            let feature = self.materialize(geometry, attrs).map_err(|source| Error::Styling {
                symbolizer: self.name.clone(),
                index,
                attributes: attrs.clone(),
                source,
            })?;
            registry.register(feature);
            index += 1;
            Ok(())
        })?;
        debug!("{}: prepared {} features", self.name, index);
        Ok(index)
    }
}

/// Line drawn as a narrow core over a wider casing
///
/// The casing is `core_width + casing_width` wide, so it shows
/// `casing_width / 2` on either side of the core. Both strokes use the same
/// order function, with [`CASING_CORE`] set to 0 for the casing and 1 for
/// the core.
///
/// Defaults: both colors black, both widths 1, empty order key.
#[derive(Debug, Clone)]
pub struct LineWithCasing {
    name: String,
    data: Source,
    core_color: StyleFn<Rgb8>,
    casing_color: StyleFn<Rgb8>,
    core_width: StyleFn<f64>,
    casing_width: StyleFn<f64>,
    order: StyleFn<OrderKey>,
}

impl Default for LineWithCasing {
    fn default() -> Self {
        Self {
            name: "line_with_casing".to_string(),
            data: Source(None),
            core_color: StyleFn::constant(Rgb8::black()),
            casing_color: StyleFn::constant(Rgb8::black()),
            core_width: StyleFn::constant(1.0),
            casing_width: StyleFn::constant(1.0),
            order: StyleFn::constant(OrderKey::new()),
        }
    }
}

impl LineWithCasing {
    pub fn new() -> Self {
        Self::default()
    }
    /// Name used in log messages and errors
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
    pub fn data(mut self, data: Arc<dyn DataSource>) -> Self {
        self.data = Source(Some(data));
        self
    }
    pub fn core_color(mut self, color: Rgb8) -> Self {
        self.core_color = StyleFn::constant(color);
        self
    }
    pub fn core_color_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&AttributeMap) -> Result<Rgb8, StyleError> + Send + Sync + 'static,
    {
        self.core_color = StyleFn::new(f);
        self
    }
    pub fn casing_color(mut self, color: Rgb8) -> Self {
        self.casing_color = StyleFn::constant(color);
        self
    }
    pub fn casing_color_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&AttributeMap) -> Result<Rgb8, StyleError> + Send + Sync + 'static,
    {
        self.casing_color = StyleFn::new(f);
        self
    }
    pub fn core_width(mut self, width: f64) -> Self {
        self.core_width = StyleFn::constant(width);
        self
    }
    pub fn core_width_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&AttributeMap) -> Result<f64, StyleError> + Send + Sync + 'static,
    {
        self.core_width = StyleFn::new(f);
        self
    }
    pub fn casing_width(mut self, width: f64) -> Self {
        self.casing_width = StyleFn::constant(width);
        self
    }
    pub fn casing_width_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&AttributeMap) -> Result<f64, StyleError> + Send + Sync + 'static,
    {
        self.casing_width = StyleFn::new(f);
        self
    }
    pub fn order(mut self, order: OrderKey) -> Self {
        self.order = StyleFn::constant(order);
        self
    }
    pub fn order_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&AttributeMap) -> Result<OrderKey, StyleError> + Send + Sync + 'static,
    {
        self.order = StyleFn::new(f);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.data.0 {
            Some(_) => Ok(()),
            None => Err(ConfigError::MissingDataSource(self.name.clone())),
        }
    }

    /// The casing and core strokes this line decomposes into
    pub fn lines(&self) -> (Line, Line) {
        let core_width = self.core_width.clone();
        let casing_width = self.casing_width.clone();
        let casing = Line {
            name: format!("{}/casing", self.name),
            data: self.data.clone(),
            color: self.casing_color.clone(),
            width: StyleFn::new(move |attrs| Ok(core_width.eval(attrs)? + casing_width.eval(attrs)?)),
            order: decorate_order(&self.order, CASING_CORE, 0.0),
        };
        let core = Line {
            name: format!("{}/core", self.name),
            data: self.data.clone(),
            color: self.core_color.clone(),
            width: self.core_width.clone(),
            order: decorate_order(&self.order, CASING_CORE, 1.0),
        };
        (casing, core)
    }

    pub fn prepare(&self, registry: &mut FeatureRegistry) -> Result<usize, Error> {
        self.validate()?;
        let (casing, core) = self.lines();
        Ok(casing.prepare(registry)? + core.prepare(registry)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::MemorySource;

    fn one_record(attrs: AttributeMap) -> Arc<MemorySource> {
        Arc::new(MemorySource::new().with(Geometry::line(&[(0.0, 0.0), (1.0, 1.0)]), attrs))
    }

    #[test]
    fn line_defaults() {
        let mut reg = FeatureRegistry::new();
        let n = Line::new().data(one_record(AttributeMap::new())).prepare(&mut reg).unwrap();
        assert_eq!(n, 1);
        let f = &reg.as_slice()[0];
        assert_eq!(f.color(), Rgb8::black());
        assert_eq!(f.width(), 1.0);
        assert!(f.order().is_empty());
    }

    #[test]
    fn cased_line_shares_geometry() {
        let mut reg = FeatureRegistry::new();
        LineWithCasing::new().data(one_record(AttributeMap::new())).prepare(&mut reg).unwrap();
        let f = reg.as_slice();
        assert_eq!(f.len(), 2);
        assert!(Arc::ptr_eq(f[0].geometry(), f[1].geometry()));
        assert_eq!(f[0].width(), 2.0);
        assert_eq!(f[1].width(), 1.0);
    }

    #[test]
    fn unbound_symbolizer_is_a_config_error() {
        let sym = Symbolizer::from(Line::new().name("rails"));
        assert_eq!(sym.validate(), Err(ConfigError::MissingDataSource("rails".into())));
        let mut reg = FeatureRegistry::new();
        assert!(matches!(sym.prepare(&mut reg), Err(Error::Config(_))));
    }

    #[test]
    fn negative_width_is_a_styling_error() {
        let mut reg = FeatureRegistry::new();
        let err = Line::new().name("bad").width(-1.0).data(one_record(AttributeMap::new())).prepare(&mut reg);
        match err {
            Err(Error::Styling { symbolizer, index, source, .. }) => {
                assert_eq!(symbolizer, "bad");
                assert_eq!(index, 0);
                assert_eq!(source, StyleError::InvalidWidth(-1.0));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(reg.is_empty());
    }
}
