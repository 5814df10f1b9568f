// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::fluxion_mutex::Mutex;
use fluxion_core::StreamItem;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Hands out a fresh test channel for every stream it builds.
///
/// Stream-backed sources call their factory once per connection; this keeps
/// the sender of each created stream so the test can feed whichever
/// connection it wants.
pub struct TestStreamFactory<T> {
    senders: Arc<Mutex<Vec<mpsc::UnboundedSender<StreamItem<T>>>>>,
}

impl<T: Send + 'static> TestStreamFactory<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            senders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A factory closure; each call creates a new channel and returns its stream.
    pub fn factory(&self) -> impl Fn() -> UnboundedReceiverStream<StreamItem<T>> + Send + Sync + 'static {
        let senders = Arc::clone(&self.senders);
        move || {
            let (tx, rx) = mpsc::unbounded_channel();
            senders.lock().push(tx);
            UnboundedReceiverStream::new(rx)
        }
    }

    /// Number of streams built so far.
    #[must_use]
    pub fn created(&self) -> usize {
        self.senders.lock().len()
    }

    /// Sender of the `index`-th stream.
    #[must_use]
    pub fn sender(&self, index: usize) -> Option<mpsc::UnboundedSender<StreamItem<T>>> {
        self.senders.lock().get(index).cloned()
    }

    /// Sender of the most recently built stream.
    #[must_use]
    pub fn latest(&self) -> Option<mpsc::UnboundedSender<StreamItem<T>>> {
        self.senders.lock().last().cloned()
    }

    /// Drops the stored sender of the `index`-th stream.
    ///
    /// The stream ends once no clone returned by [`sender`](Self::sender) or
    /// [`latest`](Self::latest) is alive either.
    pub fn close(&self, index: usize) {
        let mut senders = self.senders.lock();
        if let Some(slot) = senders.get_mut(index) {
            // A closed replacement keeps indices stable
            let (closed, _) = mpsc::unbounded_channel();
            *slot = closed;
        }
    }
}

impl<T: Send + 'static> Default for TestStreamFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}
