// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::state::Shared;
use fluxion_core::{BagKey, Disposable};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// Registration handle returned by [`ShareReplayLatest::subscribe`](super::ShareReplayLatest::subscribe).
///
/// Disposing the handle (explicitly or by dropping it) removes the
/// subscriber. The last removal disconnects the upstream source and clears
/// the cached value.
///
/// The handle does not keep the coordinator alive. Disposal is idempotent and
/// is a no-op once the coordinator is gone or once a terminal event already
/// removed the subscriber.
#[must_use = "dropping a ShareSubscription unsubscribes immediately"]
pub struct ShareSubscription<T> {
    shared: Weak<Shared<T>>,
    key: BagKey,
    released: Arc<AtomicBool>,
}

impl<T> ShareSubscription<T> {
    pub(crate) fn new(shared: Weak<Shared<T>>, key: BagKey, released: Arc<AtomicBool>) -> Self {
        Self {
            shared,
            key,
            released,
        }
    }

    /// Unsubscribes. Safe to call from any thread, any number of times.
    pub fn dispose(&self) {
        if self.released.swap(true, Ordering::AcqRel) {
            return;
        }

        if let Some(shared) = self.shared.upgrade() {
            shared.unsubscribe(self.key);
        }
    }

    /// Returns `true` once this subscriber no longer receives events, either
    /// because it was disposed or because the source terminated.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }

    /// The key this subscriber was registered under.
    #[must_use]
    pub const fn key(&self) -> BagKey {
        self.key
    }
}

impl<T: Send> Disposable for ShareSubscription<T> {
    fn dispose(&self) {
        ShareSubscription::dispose(self);
    }
}

impl<T> Drop for ShareSubscription<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T> core::fmt::Debug for ShareSubscription<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShareSubscription")
            .field("key", &self.key)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
