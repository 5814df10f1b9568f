// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::{FluxionError, StreamItem};
use fluxion_share::{ShareReplayLatest, ShareReplayLatestExt, StreamSource};
use fluxion_test_utils::{
    assert_no_element_emitted, assert_stream_ended, test_channel, unwrap_stream, unwrap_value,
    TestStreamFactory,
};
use futures::StreamExt;
use std::time::Duration;

#[tokio::test]
async fn test_stream_is_built_on_first_subscriber() -> anyhow::Result<()> {
    // Arrange
    let factory = TestStreamFactory::<i32>::new();
    let shared = ShareReplayLatest::from_stream_fn(factory.factory());
    assert_eq!(factory.created(), 0);

    // Act
    let mut stream = shared.subscribe_stream();
    let tx = factory.latest().expect("stream built on subscribe");
    tx.send(StreamItem::Value(1))?;

    // Assert
    assert_eq!(factory.created(), 1);
    assert_eq!(unwrap_value(&mut stream, 500).await, 1);

    Ok(())
}

#[tokio::test]
async fn test_late_stream_subscriber_shares_connection_and_replay() -> anyhow::Result<()> {
    // Arrange
    let factory = TestStreamFactory::<i32>::new();
    let shared = ShareReplayLatest::from_stream_fn(factory.factory());
    let mut first = shared.subscribe_stream();
    let tx = factory.latest().expect("stream built");
    tx.send(StreamItem::Value(1))?;
    assert_eq!(unwrap_value(&mut first, 500).await, 1);

    // Act
    let mut second = shared.subscribe_stream();
    tx.send(StreamItem::Value(2))?;

    // Assert
    assert_eq!(factory.created(), 1);
    assert_eq!(unwrap_value(&mut second, 500).await, 1);
    assert_eq!(unwrap_value(&mut second, 500).await, 2);
    assert_eq!(unwrap_value(&mut first, 500).await, 2);

    Ok(())
}

#[tokio::test]
async fn test_stream_end_completes_subscribers_and_next_one_rebuilds() -> anyhow::Result<()> {
    // Arrange
    let factory = TestStreamFactory::<i32>::new();
    let shared = ShareReplayLatest::from_stream_fn(factory.factory());
    let mut first = shared.subscribe_stream();
    let tx = factory.latest().expect("stream built");
    tx.send(StreamItem::Value(1))?;
    assert_eq!(unwrap_value(&mut first, 500).await, 1);

    // Act
    drop(tx);
    factory.close(0);

    // Assert
    assert_stream_ended(&mut first, 500).await;
    assert!(!shared.is_connected());

    // Act
    let mut second = shared.subscribe_stream();

    // Assert - rebuilt, nothing carried over
    assert_eq!(factory.created(), 2);
    assert_no_element_emitted(&mut second, 100).await;

    Ok(())
}

#[tokio::test]
async fn test_stream_error_reaches_subscribers_then_ends() -> anyhow::Result<()> {
    // Arrange
    let factory = TestStreamFactory::<i32>::new();
    let shared = ShareReplayLatest::from_stream_fn(factory.factory());
    let mut first = shared.subscribe_stream();
    let mut second = shared.subscribe_stream();
    let tx = factory.latest().expect("stream built");

    // Act
    tx.send(StreamItem::Error(FluxionError::stream_error("decode failed")))?;

    // Assert
    for stream in [&mut first, &mut second] {
        assert!(matches!(
            unwrap_stream(&mut *stream, 500).await,
            StreamItem::Error(FluxionError::StreamProcessingError { context }) if context == "decode failed"
        ));
        assert_stream_ended(&mut *stream, 500).await;
    }
    assert!(!shared.is_connected());

    Ok(())
}

#[tokio::test]
async fn test_last_unsubscribe_cancels_the_pump() -> anyhow::Result<()> {
    // Arrange
    let factory = TestStreamFactory::<i32>::new();
    let shared = ShareReplayLatest::from_stream_fn(factory.factory());
    let stream = shared.subscribe_stream();
    let tx = factory.latest().expect("stream built");

    // Act
    drop(stream);
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Assert - the pump dropped its stream
    assert!(tx.is_closed());
    assert!(!shared.is_connected());

    Ok(())
}

#[tokio::test]
async fn test_resubscribe_after_disconnect_builds_new_stream() -> anyhow::Result<()> {
    // Arrange
    let factory = TestStreamFactory::<i32>::new();
    let shared = ShareReplayLatest::from_stream_fn(factory.factory());
    let mut first = shared.subscribe_stream();
    factory
        .latest()
        .expect("stream built")
        .send(StreamItem::Value(1))?;
    assert_eq!(unwrap_value(&mut first, 500).await, 1);
    drop(first);

    // Act
    let mut second = shared.subscribe_stream();
    factory
        .latest()
        .expect("stream rebuilt")
        .send(StreamItem::Value(2))?;

    // Assert
    assert_eq!(factory.created(), 2);
    assert_eq!(unwrap_value(&mut second, 500).await, 2);

    Ok(())
}

#[tokio::test]
async fn test_stream_source_via_operator_collects_finite_stream() -> anyhow::Result<()> {
    // Arrange
    let shared: ShareReplayLatest<i32> =
        StreamSource::new(|| futures::stream::iter((1..=3).map(StreamItem::Value)))
            .share_replay_latest();

    // Act
    let values: Vec<i32> = shared
        .subscribe_stream()
        .filter_map(|item| async move { item.ok() })
        .collect()
        .await;

    // Assert
    assert_eq!(values, vec![1, 2, 3]);

    Ok(())
}

#[tokio::test]
async fn test_hot_channel_is_shared_once() -> anyhow::Result<()> {
    // Arrange - a single channel handed out to the first connection only
    let (tx, stream) = test_channel::<i32>();
    let slot = std::sync::Mutex::new(Some(stream.boxed()));
    let shared = ShareReplayLatest::from_stream_fn(move || {
        slot.lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| futures::stream::empty().boxed())
    });
    let mut first = shared.subscribe_stream();
    let mut second = shared.subscribe_stream();

    // Act
    tx.send(7)?;

    // Assert
    assert_eq!(unwrap_value(&mut first, 500).await, 7);
    assert_eq!(unwrap_value(&mut second, 500).await, 7);

    Ok(())
}
