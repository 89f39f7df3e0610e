//! # stampweave
//!
//! Deep timestamp-to-date conversion for nested values and async streams.
//!
//! stampweave walks an arbitrarily nested value and replaces every
//! timestamp-like leaf (anything with `seconds`, `nanoseconds` and a `toDate`
//! conversion) with the date it converts to. It works on two levels:
//!
//! - **Dynamic**: [`convert`] over the [`Value`] tree, detecting timestamps by
//!   shape and leaving unconvertible leaves as they are.
//! - **Typed**: the [`ConvertTimestamps`] trait, whose associated `Output`
//!   type is the input type with every [`Timestamp`] replaced by a date.
//!
//! Streams get the same treatment through [`timestamp_conversion_operator`]
//! (a [`Transformer`]) or [`TimestampStreamExt::convert_timestamps`].
//!
//! ## Quick Start
//!
//! ```rust
//! use stampweave::{convert, Timestamp, Value};
//!
//! let input = Value::array([
//!   Value::object([("id", Value::from("x")), ("t", Value::from(Timestamp::new(5, 0)?))]),
//!   Value::object([("id", Value::from("y")), ("t", Value::from(Timestamp::new(6, 0)?))]),
//! ]);
//!
//! let output = convert(&input);
//! let first = &output.as_slice().unwrap()[0];
//! assert!(first.as_object().unwrap().get("t").unwrap().as_date().is_some());
//! # Ok::<(), stampweave::error::ConversionError>(())
//! ```

// Documentation enforcement - treat missing docs as errors
#![deny(missing_docs)]

/// Deep conversion over dynamic values.
pub mod convert;
/// Error types.
pub mod error;
/// Input trait for stream components.
pub mod input;
/// Output trait for stream components.
pub mod output;
/// Stream combinator applying conversion per item.
pub mod stream;
/// Timestamp sources and the structural timestamp shape.
pub mod timestamp;
/// Transformer trait and configuration.
pub mod transformer;
/// Built-in transformers.
pub mod transformers;
/// Compile-time typed conversion.
pub mod typed;
/// Dynamic value model.
pub mod value;

pub use convert::{convert, convert_one, convert_owned, is_timestamp_like};
pub use error::{ComponentInfo, ConversionError};
pub use input::Input;
pub use output::Output;
pub use stream::{ConvertTimestampsStream, TimestampStreamExt};
pub use timestamp::{Timestamp, TimestampLike};
pub use transformer::{Transformer, TransformerConfig};
pub use transformers::{
  TimestampConversionTransformer, convert_all_timestamps, timestamp_conversion_operator,
};
pub use typed::{ConvertTimestamps, Stamp};
pub use value::{Method, Object, Value, ValueKind};

#[cfg(test)]
mod typed_test;
#[cfg(test)]
mod value_test;
