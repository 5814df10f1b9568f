// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::fluxion_mutex::Mutex;
use fluxion_core::{Event, Observer};
use std::sync::Arc;

/// An [`Observer`] that records every event in arrival order.
///
/// Clones share the same log, so a test can hand one clone to a source and
/// inspect the other.
pub struct EventRecorder<T> {
    events: Arc<Mutex<Vec<Event<T>>>>,
}

impl<T: Clone> EventRecorder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<Event<T>> {
        self.events.lock().clone()
    }

    /// The values of the recorded `Next` events.
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::Next(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded terminal events.
    #[must_use]
    pub fn terminal_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| event.is_terminal())
            .count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl<T: Clone> Default for EventRecorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EventRecorder<T> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<T: Send> Observer<T> for EventRecorder<T> {
    fn on_event(&self, event: Event<T>) {
        self.events.lock().push(event);
    }
}
