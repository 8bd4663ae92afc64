//! Data sources
//!
//! A [`DataSource`] hands out `(geometry, attributes)` records in storage
//! order, every record exactly once per [`for_each`](DataSource::for_each)
//! call.

use crate::attributes::{AttributeMap, Value};
use crate::error::{DataSourceError, Error};
use crate::geometry::Geometry;

use geo_types::Coord;
use log::{debug, warn};
use shapefile::dbase::FieldValue;
use shapefile::Shape;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Callback receiving one record
pub type RecordFn<'a> = dyn FnMut(&Arc<Geometry>, &AttributeMap) -> Result<(), Error> + 'a;

/// Provider of attributed geometry
pub trait DataSource: Send + Sync {
    /// Call `f` for every record, in storage order
    ///
    /// An error returned by `f` stops the iteration and is passed through.
    fn for_each(&self, f: &mut RecordFn<'_>) -> Result<(), Error>;
}

/// Records held in memory
///
///     use linemap::{AttributeMap, DataSource, Geometry, MemorySource};
///
///     let mut src = MemorySource::new();
///     src.push(Geometry::line(&[(0.0, 0.0), (1.0, 1.0)]), AttributeMap::new().with("type", "rail"));
///     let mut n = 0;
///     src.for_each(&mut |_, attrs| {
///         assert_eq!(attrs.str("type").unwrap(), "rail");
///         n += 1;
///         Ok(())
///     }).unwrap();
///     assert_eq!(n, 1);
///
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<(Arc<Geometry>, AttributeMap)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, geometry: Geometry, attributes: AttributeMap) -> &mut Self {
        self.records.push((Arc::new(geometry), attributes));
        self
    }
    /// Builder style [`push`](Self::push)
    pub fn with(mut self, geometry: Geometry, attributes: AttributeMap) -> Self {
        self.push(geometry, attributes);
        self
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DataSource for MemorySource {
    fn for_each(&self, f: &mut RecordFn<'_>) -> Result<(), Error> {
        for (geom, attrs) in &self.records {
            f(geom, attrs)?;
        }
        Ok(())
    }
}

/// Records of an ESRI shapefile, `.shp` geometry with `.dbf` attributes
///
/// The file is read again on every call to `for_each`.
#[derive(Debug, Clone)]
pub struct ShapefileSource {
    path: PathBuf,
}

impl ShapefileSource {
    /// Open the shapefile at `path`
    ///
    /// The header is read once here so a missing or malformed file fails
    /// early rather than during a render.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        shapefile::Reader::from_path(&path).map_err(DataSourceError::from)?;
        debug!("opened shapefile {}", path.display());
        Ok(Self { path })
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for ShapefileSource {
    fn for_each(&self, f: &mut RecordFn<'_>) -> Result<(), Error> {
        let mut reader = shapefile::Reader::from_path(&self.path).map_err(DataSourceError::from)?;
        for (index, item) in reader.iter_shapes_and_records().enumerate() {
            let (shape, record) = item.map_err(DataSourceError::from)?;
            if matches!(shape, Shape::Multipatch(_)) {
                warn!("{}: record {} is a multipatch, drawing nothing", self.path.display(), index);
            }
            let geometry = shape_geometry(shape);
            let attributes: AttributeMap = HashMap::<String, FieldValue>::from(record)
                .into_iter()
                .map(|(name, value)| (name, field_value(value)))
                .collect();
            f(&Arc::new(geometry), &attributes)?;
        }
        Ok(())
    }
}

macro_rules! xy_path {
    ($points:expr) => {
        $points.iter().map(|p| Coord { x: p.x, y: p.y }).collect::<Vec<_>>()
    };
}

/// Paths of a shape; polygons contribute their rings, points contribute
/// single point paths which draw nothing, multipatches contribute nothing
fn shape_geometry(shape: Shape) -> Geometry {
    let paths = match shape {
        Shape::NullShape => vec![],
        Shape::Polyline(l) => l.parts().iter().map(|p| xy_path!(p)).collect(),
        Shape::PolylineM(l) => l.parts().iter().map(|p| xy_path!(p)).collect(),
        Shape::PolylineZ(l) => l.parts().iter().map(|p| xy_path!(p)).collect(),
        Shape::Polygon(p) => p.rings().iter().map(|r| xy_path!(r.points())).collect(),
        Shape::PolygonM(p) => p.rings().iter().map(|r| xy_path!(r.points())).collect(),
        Shape::PolygonZ(p) => p.rings().iter().map(|r| xy_path!(r.points())).collect(),
        Shape::Point(p) => vec![vec![Coord { x: p.x, y: p.y }]],
        Shape::PointM(p) => vec![vec![Coord { x: p.x, y: p.y }]],
        Shape::PointZ(p) => vec![vec![Coord { x: p.x, y: p.y }]],
        Shape::Multipoint(m) => m.points().iter().map(|p| vec![Coord { x: p.x, y: p.y }]).collect(),
        Shape::MultipointM(m) => m.points().iter().map(|p| vec![Coord { x: p.x, y: p.y }]).collect(),
        Shape::MultipointZ(m) => m.points().iter().map(|p| vec![Coord { x: p.x, y: p.y }]).collect(),
        Shape::Multipatch(_) => vec![],
    };
    Geometry::new(paths)
}

/// dbase field to attribute value
fn field_value(value: FieldValue) -> Value {
    match value {
        FieldValue::Character(Some(s)) => Value::Str(s.trim().to_string()),
        FieldValue::Numeric(Some(n)) => number_value(n),
        FieldValue::Float(Some(n)) => number_value(f64::from(n)),
        FieldValue::Double(n) => number_value(n),
        FieldValue::Currency(n) => Value::Float(n),
        FieldValue::Integer(i) => Value::Int(i64::from(i)),
        FieldValue::Logical(Some(b)) => Value::Bool(b),
        FieldValue::Date(Some(d)) => Value::Str(format!("{:04}-{:02}-{:02}", d.year(), d.month(), d.day())),
        FieldValue::Memo(s) => Value::Str(s),
        _ => Value::Null,
    }
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::Int(n as i64)
    } else {
        Value::Float(n)
    }
}
