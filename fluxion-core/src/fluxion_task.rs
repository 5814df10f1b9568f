// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic task spawning with cooperative cancellation.

use crate::{CancellationToken, Disposable};
use core::future::Future;

/// Background task handle that cancels the task on drop.
///
/// The spawned future receives a [`CancellationToken`] and should stop at
/// its next checkpoint once the token fires. A `FluxionTask` is also a
/// [`Disposable`], which makes it usable directly as the connection of a
/// task-driven source.
///
/// # Runtime Support
///
/// - **Tokio**: `tokio::spawn` (default, `runtime-tokio`)
/// - **smol**: `smol::spawn` (`runtime-smol` without `runtime-tokio`)
///
/// # Example
///
/// ```rust
/// use fluxion_core::FluxionTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = FluxionTask::spawn(|cancel| async move {
///     cancel.cancelled().await;
/// });
///
/// assert!(!task.is_cancelled());
/// task.cancel();
/// assert!(task.is_cancelled());
/// # }
/// ```
#[derive(Debug)]
pub struct FluxionTask {
    cancel: CancellationToken,
}

impl FluxionTask {
    /// Spawn a background task with cancellation support.
    ///
    /// Must be called from within the selected runtime.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let future = f(cancel.clone());

        #[cfg(feature = "runtime-tokio")]
        drop(tokio::spawn(future));

        #[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
        smol::spawn(future).detach();

        Self { cancel }
    }

    /// Signal the task to stop. Does not wait for it to finish.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns `true` once `cancel()` was called or the handle was dropped.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Disposable for FluxionTask {
    fn dispose(&self) {
        self.cancel();
    }
}

impl Drop for FluxionTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
