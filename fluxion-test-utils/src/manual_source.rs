// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A scriptable [`Source`] that counts its connections.

use fluxion_core::fluxion_mutex::Mutex;
use fluxion_core::{Connection, Disposable, Event, FluxionError, Observer, Source};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// A cold source driven by the test.
///
/// Every `subscribe` opens a new connection. Events pushed with
/// [`emit`](Self::emit), [`error`](Self::error) and
/// [`complete`](Self::complete) go to every connection that has not been
/// disposed. Events are delivered on the caller's thread, outside the internal
/// lock, and never from inside `subscribe`.
///
/// Clones share the same connections and counters.
///
/// ```
/// use fluxion_core::{Disposable, Event, Source};
/// use fluxion_test_utils::{EventRecorder, ManualSource};
/// use std::sync::Arc;
///
/// let source = ManualSource::<i32>::new();
/// let recorder = EventRecorder::new();
/// let connection = source.subscribe(Arc::new(recorder.clone()));
///
/// source.emit(7);
/// connection.dispose();
/// source.emit(8);
///
/// assert_eq!(recorder.events(), vec![Event::Next(7)]);
/// assert_eq!(source.connect_count(), 1);
/// assert_eq!(source.dispose_count(), 1);
/// ```
pub struct ManualSource<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    connections: Mutex<Vec<Arc<ConnectionSlot<T>>>>,
    connects: AtomicUsize,
    dispose_calls: AtomicUsize,
}

struct ConnectionSlot<T> {
    observer: Arc<dyn Observer<T>>,
    disposed: AtomicBool,
}

struct ManualConnection<T> {
    slot: Arc<ConnectionSlot<T>>,
    inner: Arc<Inner<T>>,
}

impl<T: Send> Disposable for ManualConnection<T> {
    fn dispose(&self) {
        self.inner.dispose_calls.fetch_add(1, Ordering::SeqCst);
        self.slot.disposed.store(true, Ordering::SeqCst);
    }
}

impl<T: Clone + Send + 'static> ManualSource<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                connections: Mutex::new(Vec::new()),
                connects: AtomicUsize::new(0),
                dispose_calls: AtomicUsize::new(0),
            }),
        }
    }

    /// Delivers `Next(value)` to every live connection.
    pub fn emit(&self, value: T) {
        self.send(Event::Next(value));
    }

    /// Delivers `Error(err)` to every live connection.
    pub fn error(&self, err: FluxionError) {
        self.send(Event::Error(err));
    }

    /// Delivers `Completed` to every live connection.
    pub fn complete(&self) {
        self.send(Event::Completed);
    }

    /// Delivers `event` to every live connection.
    pub fn send(&self, event: Event<T>) {
        for observer in self.live_observers() {
            observer.on_event(event.clone());
        }
    }

    /// The observer handed over by the `index`-th `subscribe` call, disposed or not.
    ///
    /// Lets a test play a producer that keeps emitting after `dispose()`.
    #[must_use]
    pub fn observer(&self, index: usize) -> Option<Arc<dyn Observer<T>>> {
        self.inner
            .connections
            .lock()
            .get(index)
            .map(|slot| Arc::clone(&slot.observer))
    }

    /// Number of `subscribe` calls so far.
    #[must_use]
    pub fn connect_count(&self) -> usize {
        self.inner.connects.load(Ordering::SeqCst)
    }

    /// Number of `dispose` calls so far, repeats included.
    #[must_use]
    pub fn dispose_count(&self) -> usize {
        self.inner.dispose_calls.load(Ordering::SeqCst)
    }

    /// Number of connections that have not been disposed.
    #[must_use]
    pub fn live_connections(&self) -> usize {
        self.inner
            .connections
            .lock()
            .iter()
            .filter(|slot| !slot.disposed.load(Ordering::SeqCst))
            .count()
    }

    fn live_observers(&self) -> Vec<Arc<dyn Observer<T>>> {
        self.inner
            .connections
            .lock()
            .iter()
            .filter(|slot| !slot.disposed.load(Ordering::SeqCst))
            .map(|slot| Arc::clone(&slot.observer))
            .collect()
    }
}

impl<T: Clone + Send + 'static> Source<T> for ManualSource<T> {
    fn subscribe(&self, observer: Arc<dyn Observer<T>>) -> Connection {
        self.inner.connects.fetch_add(1, Ordering::SeqCst);
        let slot = Arc::new(ConnectionSlot {
            observer,
            disposed: AtomicBool::new(false),
        });
        self.inner.connections.lock().push(Arc::clone(&slot));
        Box::new(ManualConnection {
            slot,
            inner: Arc::clone(&self.inner),
        })
    }
}

impl<T: Clone + Send + 'static> Default for ManualSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ManualSource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
