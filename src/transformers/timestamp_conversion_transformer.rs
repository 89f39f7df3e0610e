//! Timestamp conversion transformer.
//!
//! This module provides [`TimestampConversionTransformer`], a transformer that
//! converts the timestamps in each item of a stream, one item in, one item out.
//!
//! # Overview
//!
//! The transformer is stateless. It applies
//! [`ConvertTimestamps::convert_timestamps`] to every item as the item is
//! polled, so emission order and timing are those of the upstream stream.
//! Upstream failures travel as `Result` items and pass through untouched; the
//! output stream ends when the input ends.
//!
//! # Quick Start
//!
//! ```rust
//! use stampweave::transformer::Transformer;
//! use stampweave::transformers::timestamp_conversion_operator;
//! use stampweave::value::Value;
//!
//! let transformer = timestamp_conversion_operator::<Value>()
//!     .with_name("convert-order-dates".to_string());
//! assert_eq!(transformer.component_info().name, "convert-order-dates");
//! ```

use crate::error::ComponentInfo;
use crate::stream::TimestampStreamExt;
use crate::typed::ConvertTimestamps;
use crate::{Input, Output, Transformer, TransformerConfig};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::marker::PhantomData;
use std::pin::Pin;
use tracing::trace;

/// A transformer that converts the timestamps in every item of a stream.
pub struct TimestampConversionTransformer<T> {
  /// Configuration for the transformer.
  pub config: TransformerConfig,
  _phantom: PhantomData<fn() -> T>,
}

impl<T> TimestampConversionTransformer<T> {
  /// Creates a new `TimestampConversionTransformer`.
  pub fn new() -> Self {
    Self {
      config: TransformerConfig::default(),
      _phantom: PhantomData,
    }
  }
}

impl<T> Default for TimestampConversionTransformer<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Clone for TimestampConversionTransformer<T> {
  fn clone(&self) -> Self {
    Self {
      config: self.config.clone(),
      _phantom: PhantomData,
    }
  }
}

impl<T> std::fmt::Debug for TimestampConversionTransformer<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TimestampConversionTransformer")
      .field("config", &self.config)
      .finish()
  }
}

impl<T> Input for TimestampConversionTransformer<T>
where
  T: ConvertTimestamps + Send + 'static,
{
  type Input = T;
  type InputStream = Pin<Box<dyn Stream<Item = T> + Send>>;
}

impl<T> Output for TimestampConversionTransformer<T>
where
  T: ConvertTimestamps + Send + 'static,
  T::Output: Send + 'static,
{
  type Output = T::Output;
  type OutputStream = Pin<Box<dyn Stream<Item = T::Output> + Send>>;
}

#[async_trait]
impl<T> Transformer for TimestampConversionTransformer<T>
where
  T: ConvertTimestamps + Send + 'static,
  T::Output: Send + 'static,
{
  async fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream {
    let component = self.component_info().name;
    trace!(component = %component, "starting timestamp conversion");
    Box::pin(
      input
        .convert_timestamps()
        .inspect(move |_| trace!(component = %component, "converted item")),
    )
  }

  fn set_config_impl(&mut self, config: TransformerConfig) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &TransformerConfig {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut TransformerConfig {
    &mut self.config
  }

  fn component_info(&self) -> ComponentInfo {
    ComponentInfo::new(
      self
        .config
        .name
        .clone()
        .unwrap_or_else(|| "timestamp_conversion_transformer".to_string()),
      std::any::type_name::<Self>().to_string(),
    )
  }
}

/// Returns an operator that converts the timestamps in every item of a stream.
pub fn timestamp_conversion_operator<T>() -> TimestampConversionTransformer<T>
where
  T: ConvertTimestamps + Send + 'static,
  T::Output: Send + 'static,
{
  TimestampConversionTransformer::new()
}

/// Alias of [`timestamp_conversion_operator`].
pub fn convert_all_timestamps<T>() -> TimestampConversionTransformer<T>
where
  T: ConvertTimestamps + Send + 'static,
  T::Output: Send + 'static,
{
  timestamp_conversion_operator()
}
