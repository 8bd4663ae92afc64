//! Attribute styled line maps
//!
//! How does this work
//!
//! ```text
//!    map = Map( canvas, bbox, order )
//!    map.attach( Symbolizer( DataSource, style functions ) )
//!    map.render()
//!      validate                 -- canvas, bbox, order dimensions
//!      prepare symbolizers      -- in attachment order
//!        for_each record
//!          color, width, order  -- style functions of the attributes
//!          register Feature
//!      sort features            -- stable, lexicographic over the order dimensions
//!      fill_background
//!      for each feature, each path
//!        project                -- bbox to pixels, y pointing down
//!        draw_path              -- Canvas, one draw_line per segment by default
//!
//!  Raster canvas
//!    draw_path
//!      clip.clip_segment()      -- canvas expanded by the stroke radius
//!      stroke.path()            -- one outline, round caps and joins
//!      ras.add_polygon()
//!        clipper.line_to()      -- edges clipped to the canvas
//!          line()
//!            render_hline()
//!     Output: Cells with X, Cover, and Area
//!    render_scanlines_aa_solid(ras, sl, buf)
//!      rewind_scanlines
//!        sort_cells()
//!      sweep_scanline()
//!        blend_solid_hspan
//! ```
//!
//! # Example
//!
//!     use linemap::{AttributeMap, Geometry, LineWithCasing, Map, MemorySource, OrderKey, Rgb8};
//!     use std::sync::Arc;
//!
//!     let roads = Arc::new(MemorySource::new()
//!         .with(Geometry::line(&[(0.0, 40.0), (100.0, 40.0)]),
//!               AttributeMap::new().with("type", "primary"))
//!         .with(Geometry::line(&[(50.0, 0.0), (50.0, 100.0)]),
//!               AttributeMap::new().with("type", "residential")));
//!
//!     let mut map = Map::new();
//!     map.configure_canvas(100, 100)
//!         .configure_bbox(0.0, 0.0, 100.0, 100.0)
//!         .configure_order(["casing_core", "road_type"])
//!         .attach(LineWithCasing::new()
//!             .name("roads")
//!             .data(roads)
//!             .order_fn(|attrs| {
//!                 let rank = if attrs.str("type") == Ok("primary") { 1.0 } else { 0.0 };
//!                 Ok(OrderKey::new().with("road_type", rank))
//!             })
//!             .core_color(Rgb8::new(229, 181, 13))
//!             .casing_color(Rgb8::black())
//!             .core_width(6.0)
//!             .casing_width(4.0));
//!
//!     let img = map.render().unwrap();
//!     assert_eq!(map.features().len(), 4);
//!     // Primary core is painted last, over the crossing
//!     assert_eq!(img.pixel(50, 60), Rgb8::new(229, 181, 13));
//!

pub mod attributes;
pub mod buffer;
pub mod cell;
pub mod clip;
pub mod color;
pub mod config;
pub mod datasource;
pub mod encode;
pub mod error;
pub mod feature;
pub mod geometry;
pub mod map;
pub mod math;
pub mod order;
pub mod projection;
pub mod raster;
pub mod render;
pub mod scan;
pub mod stroke;
pub mod style;
pub mod symbolizer;

pub use attributes::{AttributeMap, Value};
pub use buffer::RenderingBuffer;
pub use color::Rgb8;
pub use config::RenderConfig;
pub use datasource::{DataSource, MemorySource, RecordFn, ShapefileSource};
pub use encode::{img_diff, read_file, write_file};
pub use error::{ConfigError, DataSourceError, Error, Result, StyleError};
pub use feature::{Feature, FeatureRegistry};
pub use geometry::Geometry;
pub use map::Map;
pub use order::OrderSpec;
pub use projection::{BBox, Projection};
pub use render::{Canvas, RasterCanvas};
pub use style::{OrderKey, StyleFn, CASING_CORE};
pub use symbolizer::{Line, LineWithCasing, Symbolizer};

const POLY_SUBPIXEL_SHIFT : i64 = 8;
const POLY_SUBPIXEL_SCALE : i64 = 1<<POLY_SUBPIXEL_SHIFT;
const POLY_SUBPIXEL_MASK  : i64 = POLY_SUBPIXEL_SCALE - 1;
