//! Input trait for components that consume input streams.
//!
//! This module defines the [`Input`] trait for components that consume input streams.
//! It is implemented by transformers that receive data from an upstream producer.
//!
//! # Key Concepts
//!
//! - **Input Type**: The item type the component accepts
//! - **InputStream**: A pinned, boxed async stream yielding `Input` items
//! - **Type Safety**: All input types must be `Send` for cross-thread usage
//!
//! # Quick Start
//!
//! ```rust
//! use stampweave::input::Input;
//! use stampweave::value::Value;
//! use futures::Stream;
//! use std::pin::Pin;
//!
//! struct MyTransformer;
//!
//! impl Input for MyTransformer {
//!     type Input = Value;
//!     type InputStream = Pin<Box<dyn Stream<Item = Value> + Send>>;
//! }
//! ```

use futures::Stream;
// Import for rustdoc link
#[allow(unused_imports)]
use crate::output::Output;

/// Trait for components that accept input streams.
///
/// It works together with the [`Output`] trait so that the output type of one
/// stage must match the input type of the next.
pub trait Input
where
  Self::Input: Send + 'static,
{
  /// The type of items consumed from the input stream.
  type Input;
  /// The input stream type that yields items of type `Self::Input`.
  type InputStream: Stream<Item = Self::Input> + Send + 'static;
}
