//! Style functions and order keys

use crate::attributes::AttributeMap;
use crate::error::StyleError;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Synthetic order dimension separating the casing (0) and the core (1)
/// of a [`LineWithCasing`](crate::LineWithCasing)
pub const CASING_CORE: &str = "casing_core";

/// A pure function from a record's attributes to a style value
///
/// Cloning is cheap, clones share the same function.
///
///     use linemap::{AttributeMap, StyleFn};
///
///     let width = StyleFn::new(|attrs: &AttributeMap| {
///         Ok(if attrs.flag("bridge") { 4.0 } else { 2.0 })
///     });
///     assert_eq!(width.eval(&AttributeMap::new().with("bridge", true)), Ok(4.0));
///     assert_eq!(StyleFn::constant(1.0).eval(&AttributeMap::new()), Ok(1.0));
///
pub struct StyleFn<T>(Arc<dyn Fn(&AttributeMap) -> Result<T, StyleError> + Send + Sync>);

impl<T> StyleFn<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&AttributeMap) -> Result<T, StyleError> + Send + Sync + 'static,
    {
        StyleFn(Arc::new(f))
    }
    /// Function ignoring the attributes and always returning `value`
    pub fn constant(value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        Self::new(move |_| Ok(value.clone()))
    }
    pub fn eval(&self, attrs: &AttributeMap) -> Result<T, StyleError> {
        (self.0)(attrs)
    }
}

impl<T> Clone for StyleFn<T> {
    fn clone(&self) -> Self {
        StyleFn(Arc::clone(&self.0))
    }
}

impl<T> fmt::Debug for StyleFn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StyleFn")
    }
}

/// Numeric sort keys by dimension name
///
/// Dimensions that were never set read as 0.
///
///     use linemap::OrderKey;
///
///     let key = OrderKey::new().with("layer", 1.0);
///     assert_eq!(key.get("layer"), 1.0);
///     assert_eq!(key.get("road_type"), 0.0);
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderKey(BTreeMap<String, f64>);

impl OrderKey {
    pub fn new() -> Self {
        Self::default()
    }
    /// Builder style insert
    pub fn with<V: Into<f64>>(mut self, dim: &str, value: V) -> Self {
        self.insert(dim, value);
        self
    }
    pub fn insert<V: Into<f64>>(&mut self, dim: &str, value: V) {
        self.0.insert(dim.to_string(), value.into());
    }
    /// Value of `dim`, 0 if absent
    pub fn get(&self, dim: &str) -> f64 {
        self.0.get(dim).copied().unwrap_or(0.0)
    }
    pub fn contains(&self, dim: &str) -> bool {
        self.0.contains_key(dim)
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }
    /// Reject NaN values, which have no place in an ordering
    pub(crate) fn check(&self) -> Result<(), StyleError> {
        match self.0.iter().find(|(_, v)| v.is_nan()) {
            Some((dim, _)) => Err(StyleError::InvalidOrder(dim.clone())),
            None => Ok(()),
        }
    }
}

impl<K: Into<String>, V: Into<f64>> FromIterator<(K, V)> for OrderKey {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        OrderKey(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Wrap `order` so every key it produces also carries `dim = value`
pub(crate) fn decorate_order(order: &StyleFn<OrderKey>, dim: &'static str, value: f64) -> StyleFn<OrderKey> {
    let order = order.clone();
    StyleFn::new(move |attrs| {
        let mut key = order.eval(attrs)?;
        key.insert(dim, value);
        Ok(key)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decorated_order_keeps_base_dimensions() {
        let base = StyleFn::new(|attrs: &AttributeMap| Ok(OrderKey::new().with("layer", attrs.int_lossy("layer") as f64)));
        let core = decorate_order(&base, CASING_CORE, 1.0);
        let key = core.eval(&AttributeMap::new().with("layer", "2")).unwrap();
        assert_eq!(key.get("layer"), 2.0);
        assert_eq!(key.get(CASING_CORE), 1.0);
        let key = base.eval(&AttributeMap::new()).unwrap();
        assert!(!key.contains(CASING_CORE));
    }

    #[test]
    fn nan_order_is_rejected() {
        let key = OrderKey::new().with("layer", f64::NAN);
        assert_eq!(key.check(), Err(StyleError::InvalidOrder("layer".into())));
        assert_eq!(OrderKey::new().with("layer", -1.0).check(), Ok(()));
    }
}
