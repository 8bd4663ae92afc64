//! Feature attributes
//!
//! Attribute values are loosely typed scalars. Style functions decide how
//! to read them; the accessors here only help with the common coercions.

use crate::error::StyleError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A scalar attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Null,
}

impl Value {
    /// Value as an integer, parsing text the lenient way
    ///
    /// Leading whitespace and sign are accepted, parsing stops at the first
    /// non digit, anything unparsable is 0.
    ///
    ///     use linemap::Value;
    ///
    ///     assert_eq!(Value::from("-2").int_lossy(), -2);
    ///     assert_eq!(Value::from(" 3rd").int_lossy(), 3);
    ///     assert_eq!(Value::from("").int_lossy(), 0);
    ///     assert_eq!(Value::Float(2.7).int_lossy(), 2);
    ///     assert_eq!(Value::Bool(true).int_lossy(), 0);
    ///
    pub fn int_lossy(&self) -> i64 {
        match self {
            Value::Int(i) => *i,
            Value::Float(f) if f.is_finite() => f.trunc() as i64,
            Value::Str(s) => {
                let s = s.trim_start();
                let (neg, digits) = match s.as_bytes().first() {
                    Some(b'-') => (true, &s[1..]),
                    Some(b'+') => (false, &s[1..]),
                    _ => (false, s),
                };
                let n = digits
                    .bytes()
                    .take_while(|b| b.is_ascii_digit())
                    .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));
                if neg {
                    -n
                } else {
                    n
                }
            }
            _ => 0,
        }
    }
    /// Value is present and not false
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}
impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}
impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}
impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}
impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Attributes of one record, by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeMap(BTreeMap<String, Value>);

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }
    /// Builder style insert
    ///
    ///     use linemap::{AttributeMap, Value};
    ///
    ///     let attrs = AttributeMap::new().with("type", "primary").with("bridge", true);
    ///     assert_eq!(attrs.get("type"), Some(&Value::from("primary")));
    ///     assert_eq!(attrs.str("type").unwrap(), "primary");
    ///     assert!(attrs.flag("bridge"));
    ///     assert!(!attrs.flag("tunnel"));
    ///
    pub fn with<V: Into<Value>>(mut self, name: &str, value: V) -> Self {
        self.insert(name, value);
        self
    }
    pub fn insert<V: Into<Value>>(&mut self, name: &str, value: V) -> Option<Value> {
        self.0.insert(name.to_string(), value.into())
    }
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
    /// Value of `name`, or an error naming the missing attribute
    pub fn require(&self, name: &str) -> Result<&Value, StyleError> {
        self.get(name).ok_or_else(|| StyleError::MissingAttribute(name.to_string()))
    }
    /// Text attribute
    pub fn str(&self, name: &str) -> Result<&str, StyleError> {
        match self.require(name)? {
            Value::Str(s) => Ok(s),
            _ => Err(StyleError::WrongType { name: name.to_string(), expected: "text" }),
        }
    }
    /// Integer attribute, integral floats are accepted
    pub fn int(&self, name: &str) -> Result<i64, StyleError> {
        match self.require(name)? {
            Value::Int(i) => Ok(*i),
            Value::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(*f as i64),
            _ => Err(StyleError::WrongType { name: name.to_string(), expected: "an integer" }),
        }
    }
    /// Numeric attribute
    pub fn number(&self, name: &str) -> Result<f64, StyleError> {
        match self.require(name)? {
            Value::Int(i) => Ok(*i as f64),
            Value::Float(f) => Ok(*f),
            _ => Err(StyleError::WrongType { name: name.to_string(), expected: "a number" }),
        }
    }
    /// Boolean attribute
    pub fn bool(&self, name: &str) -> Result<bool, StyleError> {
        match self.require(name)? {
            Value::Bool(b) => Ok(*b),
            _ => Err(StyleError::WrongType { name: name.to_string(), expected: "a boolean" }),
        }
    }
    /// Attribute is present and truthy; missing, null and false are not
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).map(Value::is_truthy).unwrap_or(false)
    }
    /// Lenient integer reading, missing attributes read as 0
    pub fn int_lossy(&self, name: &str) -> i64 {
        self.get(name).map(Value::int_lossy).unwrap_or(0)
    }
}

impl fmt::Display for AttributeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", k, v)?;
        }
        write!(f, "}}")
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        AttributeMap(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
