//! Errors

use crate::attributes::AttributeMap;
use thiserror::Error;

/// Result type of this crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure of a render pass
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("data source error: {0}")]
    DataSource(#[from] DataSourceError),
    /// A style function failed for one record
    #[error("styling error in {symbolizer} at record {index}: {source} (attributes: {attributes})")]
    Styling {
        /// Name of the symbolizer evaluating the style
        symbolizer: String,
        /// Position of the record in its data source
        index: usize,
        /// Attributes of the offending record
        attributes: AttributeMap,
        source: StyleError,
    },
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid or incomplete map configuration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("canvas size was never configured")]
    MissingCanvas,
    #[error("canvas must be at least 1x1 pixels, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("bounding box was never configured")]
    MissingBBox,
    #[error("bounding box ({xmin}, {ymin}, {xmax}, {ymax}) is degenerate or not finite")]
    DegenerateBBox { xmin: f64, ymin: f64, xmax: f64, ymax: f64 },
    #[error("no order dimensions were configured")]
    EmptyOrder,
    #[error("order dimension names must not be empty")]
    EmptyDimension,
    #[error("ordering dimension {0:?} is listed more than once")]
    DuplicateDimension(String),
    #[error("symbolizer {0} has no data source")]
    MissingDataSource(String),
    #[error("invalid render configuration: {0}")]
    Invalid(String),
}

/// Failure reading geometry or attributes from storage
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Shapefile(#[from] shapefile::Error),
    #[error("{0}")]
    Other(String),
}

/// Failure of a style function
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StyleError {
    #[error("attribute {0:?} is missing")]
    MissingAttribute(String),
    #[error("attribute {name:?} is not {expected}")]
    WrongType { name: String, expected: &'static str },
    #[error("no style defined for {name:?} = {value}")]
    Unmapped { name: String, value: String },
    #[error("width {0} is not a finite, non-negative number")]
    InvalidWidth(f64),
    #[error("order value for {0:?} is NaN")]
    InvalidOrder(String),
    #[error("{0}")]
    Other(String),
}
