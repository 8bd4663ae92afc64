//! Paint order
//!
//! Features are ordered lexicographically over the map's order dimensions.
//! List coarse dimensions (a vertical layer index) before fine ones
//! (casing or core) so that layering always wins over stacking within a
//! layer.

use crate::error::ConfigError;
use crate::feature::Feature;
use crate::style::OrderKey;

use std::cmp::Ordering;
use std::collections::HashSet;

/// Compare two order keys over `dims`
///
/// The first dimension where the keys differ decides; missing dimensions
/// read as 0. Keys equal in every listed dimension are `Equal`.
///
///     use linemap::{order::compare, OrderKey};
///     use std::cmp::Ordering;
///
///     let dims = ["layer".to_string(), "casing_core".to_string()];
///     let bridge_casing = OrderKey::new().with("layer", 1.0).with("casing_core", 0.0);
///     let ground_core = OrderKey::new().with("casing_core", 1.0);
///     assert_eq!(compare(&ground_core, &bridge_casing, &dims), Ordering::Less);
///     assert_eq!(compare(&OrderKey::new(), &OrderKey::new().with("other", 5.0), &dims), Ordering::Equal);
///
pub fn compare(a: &OrderKey, b: &OrderKey, dims: &[String]) -> Ordering {
    for dim in dims {
        let ord = order_value(a.get(dim)).total_cmp(&order_value(b.get(dim)));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Fold -0.0 into 0.0 so that it matches a missing dimension
fn order_value(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

/// Validated, ordered list of order dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSpec {
    dims: Vec<String>,
}

impl OrderSpec {
    /// Dimensions must be non-empty, named, and unique
    ///
    ///     use linemap::{ConfigError, OrderSpec};
    ///
    ///     assert!(OrderSpec::new(["layer", "casing_core"]).is_ok());
    ///     assert_eq!(OrderSpec::new(Vec::<String>::new()), Err(ConfigError::EmptyOrder));
    ///     assert_eq!(OrderSpec::new(["layer", "layer"]),
    ///                Err(ConfigError::DuplicateDimension("layer".into())));
    ///
    pub fn new<I, S>(dims: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();
        if dims.is_empty() {
            return Err(ConfigError::EmptyOrder);
        }
        let mut seen = HashSet::new();
        for dim in &dims {
            if dim.trim().is_empty() {
                return Err(ConfigError::EmptyDimension);
            }
            if !seen.insert(dim.as_str()) {
                return Err(ConfigError::DuplicateDimension(dim.clone()));
            }
        }
        Ok(Self { dims })
    }
    pub fn dims(&self) -> &[String] {
        &self.dims
    }
    pub fn compare(&self, a: &OrderKey, b: &OrderKey) -> Ordering {
        compare(a, b, &self.dims)
    }
    /// Stable sort, equal keys keep their relative order
    pub fn sort_features(&self, features: &mut [Feature]) {
        features.sort_by(|a, b| self.compare(a.order(), b.order()));
    }
}
