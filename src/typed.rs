//! Statically typed timestamp conversion.
//!
//! [`ConvertTimestamps`] computes the converted type of a Rust type at compile
//! time: every [`Timestamp`] position becomes a [`DateTime<Utc>`], containers
//! map their element types, and everything else keeps its type. This mirrors
//! the runtime walk in [`convert`](crate::convert::convert): object fields,
//! sequence elements and tuple positions are visited, all other types are left
//! alone.
//!
//! Other [`TimestampLike`] types join in through the [`Stamp`] wrapper, whose
//! output is `Result<DateTime<Utc>, T>` so a failing source is handed back.
//!
//! # Implementing for your own types
//!
//! A struct implements the trait field by field, naming the converted shape
//! as its `Output`:
//!
//! ```rust
//! use chrono::{DateTime, Utc};
//! use stampweave::timestamp::Timestamp;
//! use stampweave::typed::ConvertTimestamps;
//!
//! struct Order {
//!   id: String,
//!   placed: Timestamp,
//!   shipped: Option<Timestamp>,
//! }
//!
//! struct ConvertedOrder {
//!   id: String,
//!   placed: DateTime<Utc>,
//!   shipped: Option<DateTime<Utc>>,
//! }
//!
//! impl ConvertTimestamps for Order {
//!   type Output = ConvertedOrder;
//!
//!   fn convert_timestamps(self) -> ConvertedOrder {
//!     ConvertedOrder {
//!       id: self.id.convert_timestamps(),
//!       placed: self.placed.convert_timestamps(),
//!       shipped: self.shipped.convert_timestamps(),
//!     }
//!   }
//! }
//! ```

use crate::convert::convert_owned;
use crate::timestamp::{Timestamp, TimestampLike};
use crate::value::Value;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};
use tracing::debug;

/// Types whose timestamps can be converted to dates.
pub trait ConvertTimestamps {
  /// `Self` with every timestamp position replaced by a date.
  type Output;

  /// Performs the conversion.
  fn convert_timestamps(self) -> Self::Output;
}

impl ConvertTimestamps for Timestamp {
  type Output = DateTime<Utc>;

  fn convert_timestamps(self) -> DateTime<Utc> {
    self.to_datetime()
  }
}

/// A foreign [`TimestampLike`] source in a typed position.
///
/// Converting calls [`TimestampLike::to_date`]. A failing source comes back
/// as `Err` holding the original, just as the dynamic walk keeps a leaf whose
/// conversion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stamp<T>(pub T);

impl<T> Stamp<T> {
  /// Returns the wrapped source.
  pub fn into_inner(self) -> T {
    self.0
  }
}

impl<T: TimestampLike> ConvertTimestamps for Stamp<T> {
  type Output = Result<DateTime<Utc>, T>;

  fn convert_timestamps(self) -> Self::Output {
    match self.0.to_date() {
      Ok(date) => Ok(date),
      Err(error) => {
        debug!(%error, "timestamp conversion failed, keeping original value");
        Err(self.0)
      }
    }
  }
}

impl ConvertTimestamps for Value {
  type Output = Value;

  fn convert_timestamps(self) -> Value {
    convert_owned(self)
  }
}

macro_rules! unchanged {
  ($($ty:ty),* $(,)?) => {
    $(
      impl ConvertTimestamps for $ty {
        type Output = $ty;

        #[inline]
        fn convert_timestamps(self) -> $ty {
          self
        }
      }
    )*
  };
}

unchanged!(
  (),
  bool,
  char,
  i8,
  i16,
  i32,
  i64,
  i128,
  isize,
  u8,
  u16,
  u32,
  u64,
  u128,
  usize,
  f32,
  f64,
  String,
  &'static str,
  DateTime<Utc>,
);

impl<T: ConvertTimestamps> ConvertTimestamps for Option<T> {
  type Output = Option<T::Output>;

  fn convert_timestamps(self) -> Self::Output {
    self.map(T::convert_timestamps)
  }
}

/// Errors pass through untouched.
impl<T: ConvertTimestamps, E> ConvertTimestamps for Result<T, E> {
  type Output = Result<T::Output, E>;

  fn convert_timestamps(self) -> Self::Output {
    self.map(T::convert_timestamps)
  }
}

impl<T: ConvertTimestamps> ConvertTimestamps for Box<T> {
  type Output = Box<T::Output>;

  fn convert_timestamps(self) -> Self::Output {
    Box::new((*self).convert_timestamps())
  }
}

impl<T: ConvertTimestamps> ConvertTimestamps for Vec<T> {
  type Output = Vec<T::Output>;

  fn convert_timestamps(self) -> Self::Output {
    self.into_iter().map(T::convert_timestamps).collect()
  }
}

impl<T: ConvertTimestamps> ConvertTimestamps for VecDeque<T> {
  type Output = VecDeque<T::Output>;

  fn convert_timestamps(self) -> Self::Output {
    self.into_iter().map(T::convert_timestamps).collect()
  }
}

impl<T: ConvertTimestamps, const N: usize> ConvertTimestamps for [T; N] {
  type Output = [T::Output; N];

  fn convert_timestamps(self) -> Self::Output {
    self.map(T::convert_timestamps)
  }
}

/// Keys are left alone; only values are converted.
impl<K, V, S> ConvertTimestamps for HashMap<K, V, S>
where
  K: Eq + Hash,
  V: ConvertTimestamps,
  S: BuildHasher + Default,
{
  type Output = HashMap<K, V::Output, S>;

  fn convert_timestamps(self) -> Self::Output {
    self
      .into_iter()
      .map(|(key, value)| (key, value.convert_timestamps()))
      .collect()
  }
}

/// Keys are left alone; only values are converted.
impl<K: Ord, V: ConvertTimestamps> ConvertTimestamps for BTreeMap<K, V> {
  type Output = BTreeMap<K, V::Output>;

  fn convert_timestamps(self) -> Self::Output {
    self
      .into_iter()
      .map(|(key, value)| (key, value.convert_timestamps()))
      .collect()
  }
}

macro_rules! tuples {
  ($(($($name:ident),+)),+ $(,)?) => {
    $(
      #[allow(non_snake_case)]
      impl<$($name: ConvertTimestamps),+> ConvertTimestamps for ($($name,)+) {
        type Output = ($($name::Output,)+);

        fn convert_timestamps(self) -> Self::Output {
          let ($($name,)+) = self;
          ($($name.convert_timestamps(),)+)
        }
      }
    )+
  };
}

tuples!(
  (A),
  (A, B),
  (A, B, C),
  (A, B, C, D),
  (A, B, C, D, E),
  (A, B, C, D, E, F),
  (A, B, C, D, E, F, G),
  (A, B, C, D, E, F, G, H),
);
