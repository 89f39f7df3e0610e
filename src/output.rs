//! Output trait for components that produce output streams.
//!
//! This module defines the [`Output`] trait for components that produce output streams.
//! It is implemented by transformers that hand data to a downstream consumer.
//!
//! # Key Concepts
//!
//! - **Output Type**: The item type the component emits
//! - **OutputStream**: A pinned, boxed async stream yielding `Output` items
//! - **Type Safety**: All output types must be `Send` for cross-thread usage

// Import for rustdoc links
#[allow(unused_imports)]
use crate::input::Input;

use futures::Stream;

/// Trait for components that can produce output streams.
///
/// Paired with [`Input`], it lets a pipeline check at compile time that
/// adjacent stages agree on their item type.
pub trait Output
where
  Self::Output: Send + 'static,
{
  /// The type of items produced by the output stream.
  type Output;
  /// The output stream type that yields items of type `Self::Output`.
  type OutputStream: Stream<Item = Self::Output> + Send + 'static;
}
