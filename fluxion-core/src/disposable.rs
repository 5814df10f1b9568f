// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cancellation handles.

use crate::fluxion_mutex::Mutex;
use alloc::boxed::Box;

/// A handle that releases a resource when disposed.
///
/// `dispose` must be idempotent: calling it more than once has the same
/// effect as calling it once.
pub trait Disposable: Send + Sync {
    /// Releases the resource.
    fn dispose(&self);
}

/// Live link between a consumer and a [`Source`](crate::Source).
pub type Connection = Box<dyn Disposable>;

impl<D: Disposable + ?Sized> Disposable for Box<D> {
    fn dispose(&self) {
        (**self).dispose();
    }
}

/// Adapts a cleanup closure into a [`Disposable`] that runs it at most once.
///
/// # Example
///
/// ```
/// use fluxion_core::{Disposable, DisposeFn};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let runs = Arc::new(AtomicUsize::new(0));
/// let runs_clone = runs.clone();
/// let handle = DisposeFn::new(move || {
///     runs_clone.fetch_add(1, Ordering::SeqCst);
/// });
///
/// handle.dispose();
/// handle.dispose();
/// assert_eq!(runs.load(Ordering::SeqCst), 1);
/// ```
pub struct DisposeFn<F: FnOnce() + Send> {
    action: Mutex<Option<F>>,
}

impl<F: FnOnce() + Send> DisposeFn<F> {
    /// Wraps `action`; it runs on the first `dispose`.
    pub fn new(action: F) -> Self {
        Self {
            action: Mutex::new(Some(action)),
        }
    }

    /// Returns `true` once the action has run.
    pub fn is_disposed(&self) -> bool {
        self.action.lock().is_none()
    }
}

impl<F: FnOnce() + Send> Disposable for DisposeFn<F> {
    fn dispose(&self) {
        // Release the lock before running user code
        let action = self.action.lock().take();
        if let Some(action) = action {
            action();
        }
    }
}
