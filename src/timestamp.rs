//! Timestamp sources.
//!
//! The converter recognises timestamps by shape, not by type: any [`Object`]
//! with own `seconds` and `nanoseconds` entries and a `toDate` [`Method`] is
//! timestamp-like. This module provides the Rust side of that contract:
//!
//! - [`TimestampLike`], implemented by anything that can report seconds and
//!   nanoseconds and turn itself into a date.
//! - [`Timestamp`], a validated seconds/nanoseconds pair.
//! - Conversions from both into the structural [`Value`] shape.
//!
//! ```rust
//! use stampweave::timestamp::Timestamp;
//! use stampweave::value::Value;
//!
//! let ts = Timestamp::new(1_589_952_118, 12_345)?;
//! let value = Value::from(ts);
//!
//! assert!(stampweave::is_timestamp_like(&value));
//! # Ok::<(), stampweave::error::ConversionError>(())
//! ```

use crate::error::ConversionError;
use crate::value::{Method, Object, Value, MAX_SAFE_INTEGER};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Entry holding whole seconds since the Unix epoch.
pub const SECONDS_FIELD: &str = "seconds";
/// Entry holding the nanosecond fraction.
pub const NANOSECONDS_FIELD: &str = "nanoseconds";
/// Entry holding the conversion operation.
pub const TO_DATE_FIELD: &str = "toDate";

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// A source of timestamp values.
pub trait TimestampLike {
  /// Whole seconds since the Unix epoch.
  fn seconds(&self) -> i64;

  /// Non-negative nanosecond fraction of the current second.
  fn nanoseconds(&self) -> i32;

  /// Converts to a date.
  ///
  /// The default builds the date from [`seconds`](Self::seconds) and
  /// [`nanoseconds`](Self::nanoseconds).
  fn to_date(&self) -> Result<DateTime<Utc>, ConversionError> {
    date_from_parts(self.seconds(), i64::from(self.nanoseconds()))
  }
}

pub(crate) fn date_from_parts(
  seconds: i64,
  nanoseconds: i64,
) -> Result<DateTime<Utc>, ConversionError> {
  let out_of_range = || ConversionError::OutOfRange {
    seconds,
    nanoseconds,
  };
  let nanos = u32::try_from(nanoseconds)
    .ok()
    .filter(|nanos| *nanos < NANOS_PER_SECOND)
    .ok_or_else(out_of_range)?;
  DateTime::from_timestamp(seconds, nanos).ok_or_else(out_of_range)
}

/// A point in time with nanosecond precision.
///
/// A `Timestamp` is validated on construction, so turning it into a date
/// cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimestamp", into = "RawTimestamp")]
pub struct Timestamp {
  date: DateTime<Utc>,
}

impl Timestamp {
  /// Creates a timestamp from seconds since the epoch and a nanosecond
  /// fraction in `0..1_000_000_000`.
  pub fn new(seconds: i64, nanoseconds: i32) -> Result<Self, ConversionError> {
    date_from_parts(seconds, i64::from(nanoseconds)).map(|date| Self { date })
  }

  /// Creates a timestamp from milliseconds since the epoch.
  pub fn from_millis(millis: i64) -> Result<Self, ConversionError> {
    DateTime::from_timestamp_millis(millis)
      .map(Self::from_date)
      .ok_or(ConversionError::OutOfRange {
        seconds: millis.div_euclid(1000),
        nanoseconds: millis.rem_euclid(1000) * 1_000_000,
      })
  }

  /// Creates a timestamp from a date. A leap-second fraction is clamped to
  /// the last nanosecond of its second.
  pub fn from_date(date: DateTime<Utc>) -> Self {
    let nanos = date.timestamp_subsec_nanos().min(NANOS_PER_SECOND - 1);
    let date = DateTime::from_timestamp(date.timestamp(), nanos).unwrap_or(date);
    Self { date }
  }

  /// The current time.
  pub fn now() -> Self {
    Self::from_date(Utc::now())
  }

  /// Whole seconds since the epoch.
  pub fn seconds(&self) -> i64 {
    self.date.timestamp()
  }

  /// Nanosecond fraction.
  pub fn nanoseconds(&self) -> i32 {
    // always below one billion
    self.date.timestamp_subsec_nanos() as i32
  }

  /// Milliseconds since the epoch, truncating sub-millisecond precision.
  pub fn to_millis(&self) -> i64 {
    self.date.timestamp_millis()
  }

  /// The date this timestamp names.
  pub fn to_datetime(&self) -> DateTime<Utc> {
    self.date
  }
}

impl TimestampLike for Timestamp {
  fn seconds(&self) -> i64 {
    Timestamp::seconds(self)
  }

  fn nanoseconds(&self) -> i32 {
    Timestamp::nanoseconds(self)
  }

  fn to_date(&self) -> Result<DateTime<Utc>, ConversionError> {
    Ok(self.date)
  }
}

impl From<DateTime<Utc>> for Timestamp {
  fn from(date: DateTime<Utc>) -> Self {
    Self::from_date(date)
  }
}

impl From<Timestamp> for DateTime<Utc> {
  fn from(timestamp: Timestamp) -> Self {
    timestamp.date
  }
}

#[derive(Serialize, Deserialize)]
struct RawTimestamp {
  seconds: i64,
  nanoseconds: i32,
}

impl TryFrom<RawTimestamp> for Timestamp {
  type Error = ConversionError;

  fn try_from(raw: RawTimestamp) -> Result<Self, Self::Error> {
    Timestamp::new(raw.seconds, raw.nanoseconds)
  }
}

impl From<Timestamp> for RawTimestamp {
  fn from(timestamp: Timestamp) -> Self {
    Self {
      seconds: timestamp.seconds(),
      nanoseconds: timestamp.nanoseconds(),
    }
  }
}

fn read_integral_field(receiver: &Object, field: &'static str) -> Result<i64, ConversionError> {
  let number = receiver
    .get(field)
    .ok_or(ConversionError::MissingField(field))?
    .as_f64()
    .ok_or_else(|| ConversionError::invalid_field(field, "expected a number"))?;
  if !number.is_finite() || number.fract() != 0.0 {
    return Err(ConversionError::invalid_field(
      field,
      format!("expected an integer, got {number}"),
    ));
  }
  if number.abs() > MAX_SAFE_INTEGER {
    return Err(ConversionError::invalid_field(
      field,
      format!("{number} is not exactly representable"),
    ));
  }
  Ok(number as i64)
}

fn receiver_to_date(receiver: &Object) -> Result<DateTime<Utc>, ConversionError> {
  let seconds = read_integral_field(receiver, SECONDS_FIELD)?;
  let nanoseconds = read_integral_field(receiver, NANOSECONDS_FIELD)?;
  date_from_parts(seconds, nanoseconds)
}

/// The `toDate` method shared by every [`Timestamp`] turned into a [`Value`].
///
/// It reads `seconds` and `nanoseconds` from its receiver, so it also works
/// on hand-built objects.
pub fn timestamp_method() -> Method {
  static METHOD: OnceLock<Method> = OnceLock::new();
  METHOD.get_or_init(|| Method::new(receiver_to_date)).clone()
}

impl From<Timestamp> for Value {
  fn from(timestamp: Timestamp) -> Self {
    Object::with_capacity(3)
      .with(SECONDS_FIELD, timestamp.seconds())
      .with(NANOSECONDS_FIELD, timestamp.nanoseconds())
      .with(TO_DATE_FIELD, timestamp_method())
      .into()
  }
}

impl Value {
  /// Wraps any [`TimestampLike`] source in the structural timestamp shape.
  ///
  /// The resulting `toDate` delegates to [`TimestampLike::to_date`] on
  /// `source`, so the source's own conversion rules and failures apply.
  pub fn from_timestamp_like<T>(source: T) -> Self
  where
    T: TimestampLike + Send + Sync + 'static,
  {
    let seconds = source.seconds();
    let nanoseconds = source.nanoseconds();
    Object::with_capacity(3)
      .with(SECONDS_FIELD, seconds)
      .with(NANOSECONDS_FIELD, nanoseconds)
      .with(TO_DATE_FIELD, Method::new(move |_| source.to_date()))
      .into()
  }
}
