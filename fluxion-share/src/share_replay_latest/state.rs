// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::logging::{debug, trace};
use fluxion_core::fluxion_mutex::Mutex;
use fluxion_core::{Bag, BagKey, Connection, Event, Observer, Source};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// One registered subscriber.
///
/// `released` is shared with the subscriber's `ShareSubscription`.
pub(crate) struct Registration<T> {
    pub(crate) observer: Arc<dyn Observer<T>>,
    pub(crate) released: Arc<AtomicBool>,
}

/// Everything guarded by the coordinator lock.
///
/// `connection.is_some()` iff `registrations` is non-empty, and `cache` is
/// only ever `Some` while connected. `generation` identifies the live
/// connection; it is bumped on every connect.
pub(crate) struct State<T> {
    pub(crate) connection: Option<Connection>,
    pub(crate) cache: Option<T>,
    pub(crate) registrations: Bag<Registration<T>>,
    pub(crate) generation: u64,
}

pub(crate) struct Shared<T> {
    source: Arc<dyn Source<T>>,
    pub(crate) state: Mutex<State<T>>,
}

impl<T> Shared<T> {
    pub(crate) fn new(source: Arc<dyn Source<T>>) -> Self {
        Self {
            source,
            state: Mutex::new(State {
                connection: None,
                cache: None,
                registrations: Bag::new(),
                generation: 0,
            }),
        }
    }

    /// Removes `key`; the last removal disconnects and drops the cache.
    ///
    /// The removed observer, cache and connection are dropped after the lock
    /// is released, since their `Drop` may dispose other handles of this
    /// coordinator.
    pub(crate) fn unsubscribe(&self, key: BagKey) {
        let mut state = self.state.lock();
        let Some(removed) = state.registrations.remove(key) else {
            return;
        };

        let mut released = None;
        if state.registrations.is_empty() {
            let cache = state.cache.take();
            let connection = state.connection.take();
            if let Some(connection) = &connection {
                debug!(
                    "share_replay_latest: last subscriber left, disconnecting (generation {})",
                    state.generation
                );
                connection.dispose();
            }
            released = Some((cache, connection));
        }

        drop(state);
        drop(removed);
        drop(released);
    }
}

impl<T: Clone + Send + 'static> Shared<T> {
    /// Replays the cache to `observer`, registers it, and connects upstream
    /// if it is the first subscriber.
    pub(crate) fn subscribe(
        self: &Arc<Self>,
        observer: Arc<dyn Observer<T>>,
    ) -> (BagKey, Arc<AtomicBool>) {
        let mut state = self.state.lock();

        // Replay before registering so the new subscriber sees the value exactly once
        if let Some(value) = &state.cache {
            observer.on_event(Event::Next(value.clone()));
        }

        let was_idle = state.registrations.is_empty();
        let released = Arc::new(AtomicBool::new(false));
        let key = state.registrations.insert(Registration {
            observer,
            released: Arc::clone(&released),
        });

        if was_idle {
            state.generation += 1;
            let generation = state.generation;
            debug!("share_replay_latest: connecting upstream (generation {generation})");
            let relay = Self::relay(Arc::downgrade(self), generation);
            state.connection = Some(self.source.subscribe(relay));
        }

        (key, released)
    }

    /// Sink handed to the source for one connection.
    ///
    /// Holds the coordinator weakly so a live connection does not keep it alive.
    fn relay(shared: Weak<Self>, generation: u64) -> Arc<dyn Observer<T>> {
        Arc::new(move |event: Event<T>| {
            if let Some(shared) = shared.upgrade() {
                shared.on_upstream(generation, event);
            }
        })
    }

    fn on_upstream(&self, generation: u64, event: Event<T>) {
        let mut state = self.state.lock();

        // A `Next` that outraces its connection's disposal is discarded rather
        // than cached, so no value survives a disconnect.
        if state.generation != generation || state.connection.is_none() {
            trace!("share_replay_latest: dropping event from disposed connection (generation {generation})");
            return;
        }

        match event {
            Event::Next(value) => {
                let previous = state.cache.replace(value.clone());
                for registration in state.registrations.iter() {
                    registration.observer.on_event(Event::Next(value.clone()));
                }

                drop(state);
                drop(previous);
            }
            terminal @ (Event::Error(_) | Event::Completed) => {
                let cache = state.cache.take();
                let connection = state.connection.take();
                if let Some(connection) = &connection {
                    connection.dispose();
                }

                let snapshot = state.registrations.take();
                debug!(
                    "share_replay_latest: upstream terminated, releasing {} subscribers (generation {generation})",
                    snapshot.len()
                );

                // Handles disposed from inside the fan-out must not touch the lock
                for registration in snapshot.iter() {
                    registration.released.store(true, Ordering::Release);
                }
                for registration in snapshot.iter() {
                    registration.observer.on_event(terminal.clone());
                }

                drop(state);
                drop(snapshot);
                drop((cache, connection));
            }
        }
    }
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        if let Some(connection) = self.state.get_mut().connection.take() {
            connection.dispose();
        }
    }
}
