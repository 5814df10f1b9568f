// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the fluxion workspace.
//!
//! Designed for use in tests and benchmarks only.
//!
//! # Key Types
//!
//! - [`ManualSource`]: a cold source the test drives by hand; it counts
//!   connections and disposals so connection-sharing can be asserted.
//! - [`EventRecorder`]: an observer that keeps every event it receives.
//! - [`test_channel`] / [`test_channel_with_errors`]: a sender paired with a
//!   fluxion stream, for feeding stream-based sources.
//! - [`TestStreamFactory`]: one fresh test channel per built stream, for
//!   sources that call their stream factory on every connection.
//! - [`helpers`]: async assertions on streams with timeouts.
//!
//! ```rust
//! use fluxion_core::{Event, Observer};
//! use fluxion_test_utils::EventRecorder;
//!
//! let recorder = EventRecorder::new();
//! recorder.on_event(Event::Next(1));
//! recorder.on_event(Event::Completed);
//!
//! assert_eq!(recorder.values(), vec![1]);
//! assert_eq!(recorder.terminal_count(), 1);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod event_recorder;
pub mod helpers;
pub mod manual_source;
pub mod person;
pub mod stream_factory;

use fluxion_core::StreamItem;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use event_recorder::EventRecorder;
pub use helpers::{assert_no_element_emitted, assert_stream_ended, unwrap_stream, unwrap_value};
pub use manual_source::ManualSource;
pub use person::{person_alice, person_bob, person_charlie, Person};
pub use stream_factory::TestStreamFactory;

/// Creates a test channel that automatically wraps values in `StreamItem::Value`.
///
/// ```rust
/// use fluxion_test_utils::test_channel;
/// use futures::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() {
/// let (tx, mut stream) = test_channel();
/// tx.send(42).unwrap();
///
/// assert_eq!(stream.next().await.unwrap().unwrap(), 42);
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts `StreamItem<T>`, so tests can push errors too.
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
