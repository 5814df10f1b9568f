// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Event;

/// Receiver side of a [`Source`](crate::Source).
///
/// Implemented for every `Fn(Event<T>) + Send + Sync` closure, so most
/// callers never name this trait.
///
/// # Example
///
/// ```
/// use fluxion_core::{Event, Observer};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let seen = AtomicUsize::new(0);
/// let observer = |event: Event<i32>| {
///     if event.is_next() {
///         seen.fetch_add(1, Ordering::SeqCst);
///     }
/// };
///
/// observer.on_event(Event::Next(1));
/// observer.on_event(Event::Completed);
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
pub trait Observer<T>: Send + Sync {
    /// Handles one event.
    fn on_event(&self, event: Event<T>);
}

impl<T, F> Observer<T> for F
where
    F: Fn(Event<T>) + Send + Sync,
{
    fn on_event(&self, event: Event<T>) {
        self(event);
    }
}
