// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Connection-counted multicast that replays the latest value while connected.
//!
//! A [`ShareReplayLatest`] turns a cold [`Source`] into a hot one:
//!
//! - **Single connection**: the source is subscribed when the first
//!   subscriber arrives and disposed when the last one leaves.
//! - **Replay latest**: a subscriber joining a live connection immediately
//!   receives the most recent value, then every later event.
//! - **While connected only**: disconnecting discards the cached value, so a
//!   subscriber arriving after a full disconnect starts from a fresh
//!   connection with nothing replayed. A value that a producer delivers
//!   after its connection was disposed is dropped, not cached.
//! - **Self-healing**: an `Error` or `Completed` from the source is delivered
//!   to every current subscriber exactly once, after which the coordinator is
//!   idle again and the next subscriber reconnects.
//!
//! ## Locking
//!
//! One non-reentrant mutex serialises subscribe, dispose and event delivery,
//! including the fan-out to subscribers. Observers therefore must not call
//! `subscribe` or `dispose` on the same coordinator from inside a `Next`
//! callback: that deadlocks. Disposing a handle while reacting to a terminal
//! event is fine, since the subscriber has already been removed by then.
//! Observers that need to react asynchronously can use
//! [`ShareReplayLatest::subscribe_stream`].
//!
//! Removed observers, replaced values and closed connections are dropped
//! only after the lock is released, so an observer may own handles of the
//! coordinator it is subscribed to.
//!
//! ## Example
//!
//! ```
//! use fluxion_core::Event;
//! use fluxion_share::ShareReplayLatest;
//! use fluxion_test_utils::{EventRecorder, ManualSource};
//!
//! let source = ManualSource::<i32>::new();
//! let shared = ShareReplayLatest::new(source.clone());
//!
//! let early = EventRecorder::new();
//! let _early = shared.subscribe(early.clone());
//! source.emit(1);
//!
//! // Joins late, gets the latest value replayed
//! let late = EventRecorder::new();
//! let _late = shared.subscribe(late.clone());
//! source.complete();
//!
//! assert_eq!(source.connect_count(), 1);
//! assert_eq!(early.events(), vec![Event::Next(1), Event::Completed]);
//! assert_eq!(late.events(), vec![Event::Next(1), Event::Completed]);
//! assert!(!shared.is_connected());
//! ```

mod state;
mod subscription;

pub use subscription::ShareSubscription;

use crate::replay_stream::ReplayStream;
use fluxion_core::{Event, Observer, Source};
use state::Shared;
use std::sync::Arc;

/// Hot, replay-latest view of a cold [`Source`].
///
/// Cheap to clone; all clones share one connection, cache and subscriber set.
/// Dropping the last clone disposes any live connection, even if
/// [`ShareSubscription`]s are still around.
///
/// See the [module documentation](self) for semantics and an example.
pub struct ShareReplayLatest<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Clone + Send + 'static> ShareReplayLatest<T> {
    /// Wraps `source`. Nothing is subscribed until the first subscriber arrives.
    pub fn new<S>(source: S) -> Self
    where
        S: Source<T> + 'static,
    {
        Self {
            shared: Arc::new(Shared::new(Arc::new(source))),
        }
    }

    /// Registers `observer`.
    ///
    /// If a value is cached it is delivered synchronously, before this call
    /// returns and before any later event. The first subscriber opens the
    /// upstream connection.
    pub fn subscribe<O>(&self, observer: O) -> ShareSubscription<T>
    where
        O: Observer<T> + 'static,
    {
        let (key, released) = self.shared.subscribe(Arc::new(observer));
        ShareSubscription::new(Arc::downgrade(&self.shared), key, released)
    }

    /// [`subscribe`](Self::subscribe) for closures, with the event type inferred.
    pub fn subscribe_fn<F>(&self, on_event: F) -> ShareSubscription<T>
    where
        F: Fn(Event<T>) + Send + Sync + 'static,
    {
        self.subscribe(on_event)
    }

    /// Subscribes and exposes the events as a fluxion stream.
    ///
    /// The replayed value (if any) is the first item. An upstream error is
    /// yielded as `StreamItem::Error` and ends the stream, completion ends it
    /// silently. Dropping the stream disposes the subscription.
    pub fn subscribe_stream(&self) -> ReplayStream<T> {
        ReplayStream::subscribe(self)
    }

    /// Returns a clone of the cached value, if connected and one has arrived.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.shared.state.lock().cache.clone()
    }
}

impl<T> ShareReplayLatest<T> {
    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared.state.lock().registrations.len()
    }

    /// Returns `true` while an upstream connection is open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.shared.state.lock().connection.is_some()
    }
}

impl<T> Clone for ShareReplayLatest<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> core::fmt::Debug for ShareReplayLatest<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("ShareReplayLatest")
            .field("subscribers", &state.registrations.len())
            .field("connected", &state.connection.is_some())
            .field("cached", &state.cache.is_some())
            .finish()
    }
}
