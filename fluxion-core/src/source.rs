// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Connection, Observer};
use alloc::sync::Arc;

/// A producer of [`Event`](crate::Event)s.
///
/// A *cold* source starts fresh work for every `subscribe` call. Each call
/// returns the [`Connection`] for that subscription; disposing it stops
/// further delivery and releases whatever the source holds on the
/// observer's behalf.
///
/// Implementations deliver `Next` events followed by at most one `Error` or
/// `Completed`, and must not call the observer from inside `subscribe`
/// itself: a multicasting consumer connects while holding its lock.
pub trait Source<T>: Send + Sync {
    /// Starts delivering events to `observer`.
    fn subscribe(&self, observer: Arc<dyn Observer<T>>) -> Connection;
}

impl<T, S: Source<T> + ?Sized> Source<T> for Arc<S> {
    fn subscribe(&self, observer: Arc<dyn Observer<T>>) -> Connection {
        (**self).subscribe(observer)
    }
}
