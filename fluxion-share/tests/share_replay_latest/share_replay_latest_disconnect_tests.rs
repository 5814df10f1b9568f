// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::{Event, Observer};
use fluxion_share::ShareReplayLatest;
use fluxion_test_utils::{EventRecorder, ManualSource};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

#[test]
fn test_last_dispose_disconnects_and_clears_cache() {
    // Arrange
    let source = ManualSource::<i32>::new();
    let shared = ShareReplayLatest::new(source.clone());
    let sub = shared.subscribe(EventRecorder::new());
    source.emit(1);

    // Act
    sub.dispose();

    // Assert
    assert_eq!(source.dispose_count(), 1);
    assert_eq!(source.live_connections(), 0);
    assert!(!shared.is_connected());
    assert_eq!(shared.latest(), None);
}

#[test]
fn test_dropping_last_subscription_disconnects() {
    let source = ManualSource::<i32>::new();
    let shared = ShareReplayLatest::new(source.clone());

    {
        let _sub = shared.subscribe(EventRecorder::new());
        assert!(shared.is_connected());
    }

    assert!(!shared.is_connected());
    assert_eq!(source.dispose_count(), 1);
}

#[test]
fn test_no_replay_after_full_disconnect() {
    // Arrange
    let source = ManualSource::<i32>::new();
    let shared = ShareReplayLatest::new(source.clone());
    let first = shared.subscribe(EventRecorder::new());
    source.emit(1);
    first.dispose();

    // Act
    let recorder = EventRecorder::new();
    let _second = shared.subscribe(recorder.clone());

    // Assert - a fresh connection, nothing replayed
    assert_eq!(source.connect_count(), 2);
    assert!(recorder.is_empty());

    // Act
    source.emit(5);

    // Assert
    assert_eq!(recorder.events(), vec![Event::Next(5)]);
}

#[test]
fn test_disconnect_happens_once_per_connection() {
    // Arrange
    let source = ManualSource::<i32>::new();
    let shared = ShareReplayLatest::new(source.clone());
    let a = shared.subscribe(EventRecorder::new());
    let b = shared.subscribe(EventRecorder::new());
    let c = shared.subscribe(EventRecorder::new());

    // Act
    a.dispose();
    b.dispose();
    assert_eq!(source.dispose_count(), 0);
    c.dispose();
    c.dispose();
    a.dispose();

    // Assert
    assert_eq!(source.dispose_count(), 1);
}

#[test]
fn test_events_from_disposed_connection_are_ignored() {
    // Arrange - a producer that keeps emitting after its dispose()
    let source = ManualSource::<i32>::new();
    let shared = ShareReplayLatest::new(source.clone());
    let first = shared.subscribe(EventRecorder::new());
    first.dispose();
    let stale = source.observer(0).expect("first connection");

    let recorder = EventRecorder::new();
    let _second = shared.subscribe(recorder.clone());

    // Act
    stale.on_event(Event::Next(7));
    stale.on_event(Event::Completed);

    // Assert - the live connection is unaffected
    assert!(recorder.is_empty());
    assert_eq!(shared.latest(), None);
    assert!(shared.is_connected());

    // Act
    source.emit(8);

    // Assert
    assert_eq!(recorder.values(), vec![8]);
}

#[test]
fn test_events_while_idle_are_ignored() {
    let source = ManualSource::<i32>::new();
    let shared = ShareReplayLatest::new(source.clone());
    let sub = shared.subscribe(EventRecorder::new());
    sub.dispose();
    let stale = source.observer(0).expect("first connection");

    stale.on_event(Event::Next(3));

    assert_eq!(shared.latest(), None);
    assert!(!shared.is_connected());
}

#[test]
fn test_dropping_coordinator_disposes_connection() {
    // Arrange
    let source = ManualSource::<i32>::new();
    let shared = ShareReplayLatest::new(source.clone());
    let recorder = EventRecorder::new();
    let sub = shared.subscribe(recorder.clone());

    // Act
    drop(shared);
    source.emit(1);
    sub.dispose();

    // Assert - the handle outlives the coordinator harmlessly
    assert_eq!(source.dispose_count(), 1);
    assert!(recorder.is_empty());
    assert!(sub.is_disposed());
}

#[test]
fn test_dispose_drops_observer_owning_another_handle() {
    // Arrange - A's observer owns B's handle
    let source = ManualSource::<i32>::new();
    let shared = ShareReplayLatest::new(source.clone());
    let b = shared.subscribe(EventRecorder::new());
    let a = shared.subscribe_fn(move |_event: Event<i32>| {
        let _owned = &b;
    });
    assert_eq!(shared.subscriber_count(), 2);

    // Act - dropping A's observer drops and disposes B's handle
    let (done_tx, done_rx) = mpsc::channel();
    let worker = thread::spawn(move || {
        a.dispose();
        let _ = done_tx.send(());
    });

    // Assert
    assert!(
        done_rx.recv_timeout(Duration::from_secs(3)).is_ok(),
        "dispose did not return"
    );
    worker.join().unwrap();
    assert_eq!(shared.subscriber_count(), 0);
    assert!(!shared.is_connected());
    assert_eq!(source.dispose_count(), 1);
}

#[test]
fn test_terminal_drops_observer_owning_other_handle() {
    // Arrange - A's observer owns B's handle
    let source = ManualSource::<i32>::new();
    let shared = ShareReplayLatest::new(source.clone());
    let b = shared.subscribe(EventRecorder::new());
    let _a = shared.subscribe_fn(move |_event: Event<i32>| {
        let _owned = &b;
    });

    // Act
    let (done_tx, done_rx) = mpsc::channel();
    let emitter = source.clone();
    let worker = thread::spawn(move || {
        emitter.complete();
        let _ = done_tx.send(());
    });

    // Assert
    assert!(
        done_rx.recv_timeout(Duration::from_secs(3)).is_ok(),
        "terminal fan-out did not return"
    );
    worker.join().unwrap();
    assert_eq!(shared.subscriber_count(), 0);
    assert_eq!(source.dispose_count(), 1);
}
