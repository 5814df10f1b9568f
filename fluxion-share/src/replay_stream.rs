// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stream view of a [`ShareReplayLatest`] subscription.

use crate::share_replay_latest::{ShareReplayLatest, ShareSubscription};
use async_channel::Receiver;
use core::pin::Pin;
use core::task::{Context, Poll};
use fluxion_core::{Event, StreamItem};
use futures::Stream;

/// A subscriber of a [`ShareReplayLatest`] as a `Stream<Item = StreamItem<T>>`.
///
/// Events are buffered in an unbounded channel, so the coordinator never
/// waits on a slow consumer and the consumer never runs inside the
/// coordinator lock.
pub struct ReplayStream<T> {
    receiver: Pin<Box<Receiver<StreamItem<T>>>>,
    subscription: ShareSubscription<T>,
}

impl<T: Clone + Send + 'static> ReplayStream<T> {
    pub(crate) fn subscribe(shared: &ShareReplayLatest<T>) -> Self {
        let (tx, rx) = async_channel::unbounded();

        let subscription = shared.subscribe_fn(move |event: Event<T>| match event {
            Event::Next(value) => {
                let _ = tx.try_send(StreamItem::Value(value));
            }
            Event::Error(err) => {
                let _ = tx.try_send(StreamItem::Error(err));
                tx.close();
            }
            Event::Completed => {
                tx.close();
            }
        });

        Self {
            receiver: Box::pin(rx),
            subscription,
        }
    }
}

impl<T> ReplayStream<T> {
    /// The underlying subscription handle.
    pub fn subscription(&self) -> &ShareSubscription<T> {
        &self.subscription
    }
}

impl<T> Stream for ReplayStream<T> {
    type Item = StreamItem<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.as_mut().poll_next(cx)
    }
}
