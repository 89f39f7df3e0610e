//! Stream combinator applying timestamp conversion per item.

use crate::typed::ConvertTimestamps;
use futures::stream::{FusedStream, Stream};
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream for [`TimestampStreamExt::convert_timestamps`].
///
/// Each item is converted synchronously inside `poll_next`; there is no
/// buffering, and end-of-stream is forwarded as soon as upstream reports it.
#[pin_project]
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct ConvertTimestampsStream<S> {
  #[pin]
  inner: S,
}

impl<S> ConvertTimestampsStream<S> {
  /// Wraps `inner`.
  pub fn new(inner: S) -> Self {
    Self { inner }
  }

  /// Returns a reference to the upstream stream.
  pub fn get_ref(&self) -> &S {
    &self.inner
  }

  /// Consumes the combinator, returning the upstream stream.
  pub fn into_inner(self) -> S {
    self.inner
  }
}

impl<S> Stream for ConvertTimestampsStream<S>
where
  S: Stream,
  S::Item: ConvertTimestamps,
{
  type Item = <S::Item as ConvertTimestamps>::Output;

  fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    self
      .project()
      .inner
      .poll_next(cx)
      .map(|item| item.map(ConvertTimestamps::convert_timestamps))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<S> FusedStream for ConvertTimestampsStream<S>
where
  S: FusedStream,
  S::Item: ConvertTimestamps,
{
  fn is_terminated(&self) -> bool {
    self.inner.is_terminated()
  }
}

/// Adds [`convert_timestamps`](Self::convert_timestamps) to every [`Stream`].
pub trait TimestampStreamExt: Stream {
  /// Converts the timestamps in every item of this stream.
  ///
  /// Wrap items in `Result` to carry upstream failures: `Err` items are
  /// forwarded untouched.
  fn convert_timestamps(self) -> ConvertTimestampsStream<Self>
  where
    Self: Sized,
    Self::Item: ConvertTimestamps,
  {
    ConvertTimestampsStream::new(self)
  }
}

impl<S: Stream + ?Sized> TimestampStreamExt for S {}
