//! # Transformer Trait
//!
//! This module defines the `Transformer` trait for components that transform data streams.
//! Transformers process items as they flow from an upstream producer to a downstream
//! consumer.
//!
//! ## Overview
//!
//! The Transformer trait provides:
//!
//! - **Stream Transformation**: Async transformation of input streams into output streams
//! - **Component Information**: Name and type information for logging
//! - **Configuration**: TransformerConfig for naming
//!
//! ## Example
//!
//! ```rust
//! use stampweave::transformer::Transformer;
//! use stampweave::transformers::timestamp_conversion_operator;
//! use stampweave::timestamp::Timestamp;
//! use futures::{stream, StreamExt};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut transformer = timestamp_conversion_operator::<Timestamp>();
//! let input_stream = Box::pin(stream::iter(vec![Timestamp::new(1, 0)?]));
//!
//! let mut output_stream = transformer.transform(input_stream).await;
//! while let Some(date) = output_stream.next().await {
//!     println!("Converted: {date}");
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::ComponentInfo;
use crate::{input::Input, output::Output};
use async_trait::async_trait;

/// Configuration for transformers.
///
/// This struct holds configuration options that can be applied to any transformer,
/// currently the name that identifies the component in log records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformerConfig {
  /// Optional name for identifying this transformer in logs.
  pub name: Option<String>,
}

impl TransformerConfig {
  /// Sets the name for this transformer configuration.
  ///
  /// # Arguments
  ///
  /// * `name` - The name to assign to this transformer.
  pub fn with_name(mut self, name: String) -> Self {
    self.name = Some(name);
    self
  }

  /// Returns the current name, if set.
  pub fn name(&self) -> Option<String> {
    self.name.clone()
  }
}

/// Trait for components that transform data streams.
///
/// Transformers process items as they flow through the pipeline. The output
/// stream ends when the input stream ends, and dropping the output stream drops
/// the input stream with it.
#[async_trait]
pub trait Transformer: Input + Output {
  /// Transforms a stream of input items into a stream of output items.
  ///
  /// # Arguments
  ///
  /// * `input` - The input stream to transform
  ///
  /// # Returns
  ///
  /// A stream that yields transformed items of type `Self::Output`.
  async fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream;

  /// Creates a new transformer instance with the given configuration.
  ///
  /// This method clones the transformer and applies the provided configuration.
  #[must_use]
  fn with_config(&self, config: TransformerConfig) -> Self
  where
    Self: Sized + Clone,
  {
    let mut this = self.clone();
    this.set_config(config);
    this
  }

  /// Sets the configuration for this transformer.
  fn set_config(&mut self, config: TransformerConfig) {
    self.set_config_impl(config);
  }

  /// Returns a reference to the transformer's configuration.
  fn config(&self) -> &TransformerConfig {
    self.get_config_impl()
  }

  /// Returns a mutable reference to the transformer's configuration.
  fn config_mut(&mut self) -> &mut TransformerConfig {
    self.get_config_mut_impl()
  }

  /// Sets the name for this transformer.
  ///
  /// # Arguments
  ///
  /// * `name` - The name to assign to this transformer.
  #[must_use]
  fn with_name(mut self, name: String) -> Self
  where
    Self: Sized,
  {
    let config = self.get_config_impl().clone();
    self.set_config(config.with_name(name));
    self
  }

  /// Returns information about the component for log records.
  fn component_info(&self) -> ComponentInfo {
    ComponentInfo::new(
      self
        .config()
        .name()
        .unwrap_or_else(|| "transformer".to_string()),
      std::any::type_name::<Self>().to_string(),
    )
  }

  /// Stores the configuration. Implemented by each transformer.
  fn set_config_impl(&mut self, config: TransformerConfig);

  /// Returns the stored configuration. Implemented by each transformer.
  fn get_config_impl(&self) -> &TransformerConfig;

  /// Returns the stored configuration mutably. Implemented by each transformer.
  fn get_config_mut_impl(&mut self) -> &mut TransformerConfig;
}
