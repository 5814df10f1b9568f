// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cold [`Source`] over fluxion streams.

use crate::logging::trace;
use crate::ShareReplayLatest;
use fluxion_core::{CancellationToken, Connection, Event, FluxionTask, Observer, Source, StreamItem};
use futures::{Stream, StreamExt};
use std::sync::Arc;

/// A [`Source`] that builds a fresh stream for every subscription.
///
/// Each `subscribe` calls the factory and spawns a [`FluxionTask`] that
/// pumps the stream into the observer:
///
/// - `StreamItem::Value` becomes `Event::Next`
/// - `StreamItem::Error` becomes `Event::Error` and ends the pump
/// - the end of the stream becomes `Event::Completed`
///
/// The returned connection is the task itself. Disposing it cancels the
/// task, which stops at once, even while waiting for the next item, and
/// delivers nothing further.
///
/// `subscribe` must be called from within the configured runtime.
///
/// # Example
///
/// ```
/// use fluxion_core::StreamItem;
/// use fluxion_share::{ShareReplayLatest, ShareReplayLatestExt, StreamSource};
/// use futures::{stream, StreamExt};
///
/// # #[tokio::main]
/// # async fn main() {
/// let shared: ShareReplayLatest<i32> = StreamSource::new(|| stream::iter(vec![StreamItem::Value(1), StreamItem::Value(2)]))
///     .share_replay_latest();
///
/// let items: Vec<i32> = shared
///     .subscribe_stream()
///     .filter_map(|item| async move { item.ok() })
///     .collect()
///     .await;
/// assert_eq!(items, vec![1, 2]);
/// # }
/// ```
pub struct StreamSource<F> {
    factory: F,
}

impl<F> StreamSource<F> {
    /// Wraps a stream factory.
    pub const fn new(factory: F) -> Self {
        Self { factory }
    }
}

impl<T, S, F> Source<T> for StreamSource<F>
where
    F: Fn() -> S + Send + Sync,
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
    fn subscribe(&self, observer: Arc<dyn Observer<T>>) -> Connection {
        let stream = (self.factory)();
        Box::new(FluxionTask::spawn(move |cancel| pump(stream, observer, cancel)))
    }
}

async fn pump<T, S>(stream: S, observer: Arc<dyn Observer<T>>, cancel: CancellationToken)
where
    S: Stream<Item = StreamItem<T>>,
{
    let mut stream = core::pin::pin!(stream);

    loop {
        let Some(next) = cancel.run_until_cancelled(stream.next()).await else {
            trace!("stream_source: cancelled while waiting for the next item");
            return;
        };

        // dispose() may have raced the item
        if cancel.is_cancelled() {
            return;
        }

        match next {
            Some(StreamItem::Value(value)) => observer.on_event(Event::Next(value)),
            Some(StreamItem::Error(err)) => {
                observer.on_event(Event::Error(err));
                return;
            }
            None => {
                observer.on_event(Event::Completed);
                return;
            }
        }
    }
}

impl<T: Clone + Send + 'static> ShareReplayLatest<T> {
    /// Shares a cold stream: every connection calls `factory` for a new stream.
    ///
    /// Shorthand for `ShareReplayLatest::new(StreamSource::new(factory))`.
    pub fn from_stream_fn<F, S>(factory: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Stream<Item = StreamItem<T>> + Send + 'static,
    {
        Self::new(StreamSource::new(factory))
    }
}
