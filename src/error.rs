//! # Error Handling
//!
//! Error types for timestamp conversion.
//!
//! ## Overview
//!
//! Conversion in stampweave is best-effort: a failing leaf never aborts the
//! walk over the surrounding value. The failure is still described by a
//! [`ConversionError`], which is what a conversion operation returns and what
//! gets logged when the converter falls back to the original value.
//!
//! ## Core Types
//!
//! - **ConversionError**: Why a single timestamp-like value could not be turned into a date
//! - **ComponentInfo**: Component name and type information for log records
//!
//! ## Example
//!
//! ```rust
//! use stampweave::error::ConversionError;
//!
//! let err = ConversionError::OutOfRange {
//!     seconds: i64::MAX,
//!     nanoseconds: 0,
//! };
//! assert!(err.to_string().contains("out of range"));
//! ```

/// Failure raised by a timestamp's conversion operation.
///
/// The converter never surfaces this error to the caller of
/// [`convert`](crate::convert::convert); it is returned by conversion
/// operations and by [`Timestamp::new`](crate::timestamp::Timestamp::new).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
  /// A field the conversion reads is absent from its receiver.
  #[error("missing timestamp field `{0}`")]
  MissingField(&'static str),
  /// A field is present but does not hold a usable value.
  #[error("invalid timestamp field `{field}`: {reason}")]
  InvalidField {
    /// Name of the offending field.
    field: &'static str,
    /// Human readable reason.
    reason: String,
  },
  /// The seconds/nanoseconds pair does not name a representable instant.
  #[error("timestamp out of range: seconds={seconds}, nanoseconds={nanoseconds}")]
  OutOfRange {
    /// Seconds since the Unix epoch.
    seconds: i64,
    /// Nanosecond fraction.
    nanoseconds: i64,
  },
  /// Failure reported by a foreign timestamp source.
  #[error("timestamp source error: {0}")]
  Source(String),
}

impl ConversionError {
  /// Creates a [`ConversionError::InvalidField`] error.
  pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
    Self::InvalidField {
      field,
      reason: reason.into(),
    }
  }
}

/// Information about a stream component.
///
/// This struct provides identifying information about a component,
/// including its name and type, which is useful for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInfo {
  /// The name of the component.
  pub name: String,
  /// The type name of the component.
  pub type_name: String,
}

impl ComponentInfo {
  /// Creates a new `ComponentInfo` with the given name and type name.
  ///
  /// # Arguments
  ///
  /// * `name` - The name of the component.
  /// * `type_name` - The type name of the component.
  pub fn new(name: String, type_name: String) -> Self {
    Self { name, type_name }
  }
}
