//! # Transformers Module
//!
//! Transformer implementations for stampweave. Transformers are components that
//! process data streams, transforming input items into output items as they flow
//! from a producer to a consumer.
//!
//! ## Available Transformers
//!
//! - **[`TimestampConversionTransformer`]**: Converts every timestamp in each item to a date

/// Timestamp conversion transformer.
pub mod timestamp_conversion_transformer;

pub use timestamp_conversion_transformer::{
  TimestampConversionTransformer, convert_all_timestamps, timestamp_conversion_operator,
};
