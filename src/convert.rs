//! Deep timestamp conversion over [`Value`] trees.
//!
//! [`convert`] walks a value depth-first and replaces every timestamp-like
//! object with the [`Value::Date`] its `toDate` method returns. Containers
//! keep their kind (arrays stay arrays, tuples stay tuples, objects stay
//! objects) and their entry order.
//!
//! # Copy-on-write
//!
//! The input is never modified. A container is rebuilt only when something
//! below it changed; every other sub-tree is shared with the input by
//! reference, so `Value::ptr_eq` holds between an unaffected input branch and
//! the matching output branch.
//!
//! # Failures
//!
//! A failing `toDate` only affects its own leaf: the leaf stays unconverted,
//! the failure is logged at `debug` level, and the walk continues with its
//! siblings.
//!
//! ```rust
//! use stampweave::timestamp::Timestamp;
//! use stampweave::value::{Object, Value};
//!
//! let input = Value::from(
//!   Object::new()
//!     .with("id", "1")
//!     .with("created", Timestamp::new(100, 0)?),
//! );
//! let output = stampweave::convert(&input);
//!
//! let created = output.as_object().and_then(|o| o.get("created"));
//! assert_eq!(created.and_then(Value::as_date).map(|d| d.timestamp()), Some(100));
//! # Ok::<(), stampweave::error::ConversionError>(())
//! ```

use crate::timestamp::{NANOSECONDS_FIELD, SECONDS_FIELD, TO_DATE_FIELD};
use crate::value::{Method, Object, Value};
use std::sync::Arc;
use tracing::debug;

/// Converts every timestamp-like value in `value`, at any depth.
pub fn convert(value: &Value) -> Value {
  rewrite(value).unwrap_or_else(|| value.clone())
}

/// Owned variant of [`convert`].
pub fn convert_owned(value: Value) -> Value {
  rewrite(&value).unwrap_or(value)
}

/// Converts `value` only if it is itself timestamp-like.
///
/// Nested values are not examined. A failing conversion returns `value`
/// unchanged.
pub fn convert_one(value: &Value) -> Value {
  convert_leaf(value).unwrap_or_else(|| value.clone())
}

/// Returns `true` if `value` is an object with own `seconds` and
/// `nanoseconds` entries and a `toDate` method.
pub fn is_timestamp_like(value: &Value) -> bool {
  conversion_method(value).is_some()
}

fn conversion_method(value: &Value) -> Option<(&Object, &Method)> {
  let object = value.as_object()?;
  if !object.contains_key(SECONDS_FIELD) || !object.contains_key(NANOSECONDS_FIELD) {
    return None;
  }
  let method = object.get(TO_DATE_FIELD)?.as_method()?;
  Some((object, method))
}

/// `None` means "unchanged": either not timestamp-like or the conversion failed.
fn convert_leaf(value: &Value) -> Option<Value> {
  let (receiver, method) = conversion_method(value)?;
  match method.call(receiver) {
    Ok(date) => Some(Value::Date(date)),
    Err(error) => {
      debug!(%error, "timestamp conversion failed, keeping original value");
      None
    }
  }
}

/// Returns the converted value, or `None` if nothing under `value` changed.
fn rewrite(value: &Value) -> Option<Value> {
  if value.is_falsy() {
    return None;
  }
  match value {
    Value::Array(items) => copy_on_write(&items[..], rewrite).map(|items| Value::Array(items.into())),
    Value::Tuple(items) => copy_on_write(&items[..], rewrite).map(|items| Value::Tuple(items.into())),
    Value::Object(_) if is_timestamp_like(value) => convert_leaf(value),
    Value::Object(object) => copy_on_write(object.entries(), |(key, entry)| {
      rewrite(entry).map(|converted| (key.clone(), converted))
    })
    .map(|entries| Value::Object(Arc::new(Object::from_entries(entries)))),
    _ => None,
  }
}

/// Applies `f` to every item, allocating a new vector only once `f` reports a
/// change. Items before the first change are cloned from `items`; later
/// unchanged items are cloned as they are reached.
fn copy_on_write<T, F>(items: &[T], mut f: F) -> Option<Vec<T>>
where
  T: Clone,
  F: FnMut(&T) -> Option<T>,
{
  let mut rebuilt: Option<Vec<T>> = None;
  for (index, item) in items.iter().enumerate() {
    let changed = f(item);
    if let Some(out) = rebuilt.as_mut() {
      out.push(changed.unwrap_or_else(|| item.clone()));
    } else if let Some(changed) = changed {
      let mut out = Vec::with_capacity(items.len());
      out.extend_from_slice(&items[..index]);
      out.push(changed);
      rebuilt = Some(out);
    }
  }
  rebuilt
}
