//! Dynamic value model.
//!
//! This module provides [`Value`], the tree the converter walks, together with
//! [`Object`] (an insertion-ordered keyed mapping) and [`Method`] (a callable
//! conversion operation stored as an object entry).
//!
//! # Overview
//!
//! Every container in a [`Value`] is held behind an [`Arc`] and never mutated
//! after construction. Cloning a value is therefore cheap, sharing a value
//! between threads is safe, and a converted tree can reuse the untouched parts
//! of its input by reference. Cycles cannot be built from immutable `Arc`
//! containers, so a walk over a `Value` always terminates.
//!
//! # Quick Start
//!
//! ```rust
//! use stampweave::value::{Object, Value};
//!
//! let order = Value::from(
//!   Object::new()
//!     .with("id", "order-1")
//!     .with("lines", Value::array([Value::from(1), Value::from(2)])),
//! );
//!
//! assert_eq!(order.as_object().and_then(|o| o.get("id")), Some(&Value::from("order-1")));
//! ```
//!
//! # Serialization
//!
//! [`Value`] implements [`serde::Serialize`]. Dates serialize as RFC 3339
//! strings, integral numbers as integers, and [`Method`] entries are skipped.
//! [`Value::to_json`] and `From<serde_json::Value>` bridge to `serde_json`.

use crate::error::ConversionError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;
use std::sync::Arc;

/// Largest integer an `f64` represents exactly.
pub(crate) const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

type MethodFn = dyn Fn(&Object) -> Result<DateTime<Utc>, ConversionError> + Send + Sync;

/// A callable conversion operation.
///
/// A method is invoked with the [`Object`] it was found on as its receiver, so
/// one method can be shared by many objects and read their fields on each call.
/// Two methods compare equal only when they are the same allocation.
#[derive(Clone)]
pub struct Method(Arc<MethodFn>);

impl Method {
  /// Wraps a function as a method.
  pub fn new<F>(f: F) -> Self
  where
    F: Fn(&Object) -> Result<DateTime<Utc>, ConversionError> + Send + Sync + 'static,
  {
    Self(Arc::new(f))
  }

  /// Invokes the method on `receiver`.
  pub fn call(&self, receiver: &Object) -> Result<DateTime<Utc>, ConversionError> {
    (self.0)(receiver)
  }

  /// Returns `true` if both methods share one allocation.
  pub fn ptr_eq(&self, other: &Method) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }
}

impl fmt::Debug for Method {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Method(..)")
  }
}

impl PartialEq for Method {
  fn eq(&self, other: &Self) -> bool {
    self.ptr_eq(other)
  }
}

/// An insertion-ordered keyed mapping.
///
/// Keys are unique. Inserting an existing key replaces its value in place, so
/// the key keeps its original position.
#[derive(Clone, Default, PartialEq)]
pub struct Object {
  entries: Vec<(String, Value)>,
}

impl Object {
  /// Creates an empty object.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates an empty object with room for `capacity` entries.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      entries: Vec::with_capacity(capacity),
    }
  }

  /// Builds an object from entries whose keys are already known to be unique.
  pub(crate) fn from_entries(entries: Vec<(String, Value)>) -> Self {
    Self { entries }
  }

  pub(crate) fn entries(&self) -> &[(String, Value)] {
    &self.entries
  }

  /// Number of entries.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` if the object has no entries.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Looks up the value stored under `key`.
  pub fn get(&self, key: &str) -> Option<&Value> {
    self
      .entries
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, value)| value)
  }

  /// Returns `true` if `key` is an own entry of this object.
  pub fn contains_key(&self, key: &str) -> bool {
    self.entries.iter().any(|(k, _)| k == key)
  }

  /// Inserts `value` under `key`, returning the value it replaced.
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
    let key = key.into();
    let value = value.into();
    match self.entries.iter_mut().find(|(k, _)| *k == key) {
      Some((_, slot)) => Some(std::mem::replace(slot, value)),
      None => {
        self.entries.push((key, value));
        None
      }
    }
  }

  /// Builder-style [`insert`](Self::insert).
  #[must_use]
  pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
    self.insert(key, value);
    self
  }

  /// Iterates over entries in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v))
  }

  /// Iterates over keys in insertion order.
  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(k, _)| k.as_str())
  }

  /// Iterates over values in insertion order.
  pub fn values(&self) -> impl Iterator<Item = &Value> {
    self.entries.iter().map(|(_, v)| v)
  }
}

impl fmt::Debug for Object {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(self.iter()).finish()
  }
}

impl<K, V> FromIterator<(K, V)> for Object
where
  K: Into<String>,
  V: Into<Value>,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut object = Object::new();
    for (key, value) in iter {
      object.insert(key, value);
    }
    object
  }
}

/// The structural kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
  /// [`Value::Null`].
  Null,
  /// [`Value::Bool`].
  Bool,
  /// [`Value::Number`].
  Number,
  /// [`Value::String`].
  String,
  /// [`Value::Symbol`].
  Symbol,
  /// [`Value::Date`].
  Date,
  /// [`Value::Array`].
  Array,
  /// [`Value::Tuple`].
  Tuple,
  /// [`Value::Object`].
  Object,
  /// [`Value::Method`].
  Method,
}

/// Any datum the converter can walk.
#[derive(Debug, Clone, Default)]
pub enum Value {
  /// Absence marker.
  #[default]
  Null,
  /// Boolean scalar.
  Bool(bool),
  /// Numeric scalar. Integers are exact up to ±(2^53 - 1).
  Number(f64),
  /// String scalar.
  String(Arc<str>),
  /// Named symbol scalar.
  Symbol(Arc<str>),
  /// A date-time.
  Date(DateTime<Utc>),
  /// Ordered sequence of any length.
  Array(Arc<[Value]>),
  /// Fixed-arity ordered sequence.
  Tuple(Arc<[Value]>),
  /// Keyed mapping.
  Object(Arc<Object>),
  /// Callable conversion operation.
  Method(Method),
}

impl Value {
  /// Builds an array from `items`.
  pub fn array<I>(items: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<Value>,
  {
    Value::Array(items.into_iter().map(Into::into).collect())
  }

  /// Builds a tuple from `items`.
  pub fn tuple<I>(items: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<Value>,
  {
    Value::Tuple(items.into_iter().map(Into::into).collect())
  }

  /// Builds an object from key/value pairs.
  pub fn object<I, K, V>(entries: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
  {
    Value::Object(Arc::new(entries.into_iter().collect()))
  }

  /// Builds a symbol.
  pub fn symbol(name: impl Into<Arc<str>>) -> Self {
    Value::Symbol(name.into())
  }

  /// Returns the structural kind of this value.
  pub fn kind(&self) -> ValueKind {
    match self {
      Value::Null => ValueKind::Null,
      Value::Bool(_) => ValueKind::Bool,
      Value::Number(_) => ValueKind::Number,
      Value::String(_) => ValueKind::String,
      Value::Symbol(_) => ValueKind::Symbol,
      Value::Date(_) => ValueKind::Date,
      Value::Array(_) => ValueKind::Array,
      Value::Tuple(_) => ValueKind::Tuple,
      Value::Object(_) => ValueKind::Object,
      Value::Method(_) => ValueKind::Method,
    }
  }

  /// Returns `true` for [`Value::Null`].
  pub fn is_null(&self) -> bool {
    matches!(self, Value::Null)
  }

  /// Returns `true` for null, `false`, zero, NaN and the empty string.
  pub fn is_falsy(&self) -> bool {
    match self {
      Value::Null => true,
      Value::Bool(b) => !b,
      Value::Number(n) => *n == 0.0 || n.is_nan(),
      Value::String(s) => s.is_empty(),
      _ => false,
    }
  }

  /// Returns the boolean, if this is one.
  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Value::Bool(b) => Some(*b),
      _ => None,
    }
  }

  /// Returns the number, if this is one.
  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Value::Number(n) => Some(*n),
      _ => None,
    }
  }

  /// Returns the string contents of a string or symbol.
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::String(s) | Value::Symbol(s) => Some(s.as_ref()),
      _ => None,
    }
  }

  /// Returns the date, if this is one.
  pub fn as_date(&self) -> Option<&DateTime<Utc>> {
    match self {
      Value::Date(date) => Some(date),
      _ => None,
    }
  }

  /// Returns the elements of an array or tuple.
  pub fn as_slice(&self) -> Option<&[Value]> {
    match self {
      Value::Array(items) | Value::Tuple(items) => Some(items.as_ref()),
      _ => None,
    }
  }

  /// Returns the object, if this is one.
  pub fn as_object(&self) -> Option<&Object> {
    match self {
      Value::Object(object) => Some(object.as_ref()),
      _ => None,
    }
  }

  /// Returns the method, if this is one.
  pub fn as_method(&self) -> Option<&Method> {
    match self {
      Value::Method(method) => Some(method),
      _ => None,
    }
  }

  /// Returns `true` if both values point at the same shared allocation.
  ///
  /// Unboxed scalars (null, booleans, numbers, dates) never share an
  /// allocation, so this is always `false` for them.
  pub fn ptr_eq(&self, other: &Value) -> bool {
    match (self, other) {
      (Value::String(a), Value::String(b)) | (Value::Symbol(a), Value::Symbol(b)) => {
        Arc::ptr_eq(a, b)
      }
      (Value::Array(a), Value::Array(b)) | (Value::Tuple(a), Value::Tuple(b)) => Arc::ptr_eq(a, b),
      (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
      (Value::Method(a), Value::Method(b)) => a.ptr_eq(b),
      _ => false,
    }
  }

  /// Serializes this value into a [`serde_json::Value`].
  pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(self)
  }
}

impl PartialEq for Value {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Value::Null, Value::Null) => true,
      (Value::Bool(a), Value::Bool(b)) => a == b,
      (Value::Number(a), Value::Number(b)) => a == b,
      (Value::String(a), Value::String(b)) | (Value::Symbol(a), Value::Symbol(b)) => a == b,
      (Value::Date(a), Value::Date(b)) => a == b,
      (Value::Array(a), Value::Array(b)) | (Value::Tuple(a), Value::Tuple(b)) => {
        Arc::ptr_eq(a, b) || a == b
      }
      (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b) || a == b,
      (Value::Method(a), Value::Method(b)) => a.ptr_eq(b),
      _ => false,
    }
  }
}

impl From<bool> for Value {
  fn from(value: bool) -> Self {
    Value::Bool(value)
  }
}

impl From<f64> for Value {
  fn from(value: f64) -> Self {
    Value::Number(value)
  }
}

impl From<f32> for Value {
  fn from(value: f32) -> Self {
    Value::Number(f64::from(value))
  }
}

impl From<i32> for Value {
  fn from(value: i32) -> Self {
    Value::Number(f64::from(value))
  }
}

impl From<u32> for Value {
  fn from(value: u32) -> Self {
    Value::Number(f64::from(value))
  }
}

/// Numbers are `f64`: integers beyond ±(2^53 - 1) round to the nearest
/// representable value. The timestamp `toDate` method rejects such fields.
impl From<i64> for Value {
  fn from(value: i64) -> Self {
    Value::Number(value as f64)
  }
}

impl From<&str> for Value {
  fn from(value: &str) -> Self {
    Value::String(value.into())
  }
}

impl From<String> for Value {
  fn from(value: String) -> Self {
    Value::String(value.into())
  }
}

impl From<Arc<str>> for Value {
  fn from(value: Arc<str>) -> Self {
    Value::String(value)
  }
}

impl From<DateTime<Utc>> for Value {
  fn from(value: DateTime<Utc>) -> Self {
    Value::Date(value)
  }
}

impl From<Vec<Value>> for Value {
  fn from(value: Vec<Value>) -> Self {
    Value::Array(value.into())
  }
}

impl From<Object> for Value {
  fn from(value: Object) -> Self {
    Value::Object(Arc::new(value))
  }
}

impl From<Method> for Value {
  fn from(value: Method) -> Self {
    Value::Method(value)
  }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(value: Option<T>) -> Self {
    value.map_or(Value::Null, Into::into)
  }
}

impl From<serde_json::Value> for Value {
  fn from(value: serde_json::Value) -> Self {
    match value {
      serde_json::Value::Null => Value::Null,
      serde_json::Value::Bool(b) => Value::Bool(b),
      serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
      serde_json::Value::String(s) => Value::String(s.into()),
      serde_json::Value::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
      serde_json::Value::Object(map) => Value::object(map),
    }
  }
}

fn serialize_number<S: Serializer>(n: f64, serializer: S) -> Result<S::Ok, S::Error> {
  if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
    serializer.serialize_i64(n as i64)
  } else {
    serializer.serialize_f64(n)
  }
}

impl Serialize for Value {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Value::Null | Value::Method(_) => serializer.serialize_unit(),
      Value::Bool(b) => serializer.serialize_bool(*b),
      Value::Number(n) => serialize_number(*n, serializer),
      Value::String(s) | Value::Symbol(s) => serializer.serialize_str(s),
      Value::Date(date) => {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::AutoSi, true))
      }
      Value::Array(items) | Value::Tuple(items) => {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items.iter() {
          seq.serialize_element(item)?;
        }
        seq.end()
      }
      Value::Object(object) => object.serialize(serializer),
    }
  }
}

impl Serialize for Object {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let fields = self
      .iter()
      .filter(|(_, value)| !matches!(value, Value::Method(_)));
    let mut map = serializer.serialize_map(None)?;
    for (key, value) in fields {
      map.serialize_entry(key, value)?;
    }
    map.end()
  }
}
