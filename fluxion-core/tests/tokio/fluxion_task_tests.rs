// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::{Connection, Disposable, FluxionTask};
use futures::channel::oneshot;

#[tokio::test]
async fn test_task_cancellation_on_drop() {
    let (tx, rx) = oneshot::channel();

    let task = FluxionTask::spawn(|cancel| async move {
        cancel.cancelled().await;
        let _ = tx.send(());
    });

    drop(task);

    assert!(rx.await.is_ok(), "Task should complete after cancellation");
}

#[tokio::test]
async fn test_task_manual_cancel() {
    let (tx, rx) = oneshot::channel();

    let task = FluxionTask::spawn(|cancel| async move {
        cancel.cancelled().await;
        let _ = tx.send(());
    });

    assert!(!task.is_cancelled());
    task.cancel();
    assert!(task.is_cancelled());

    assert!(rx.await.is_ok(), "Task should complete after cancellation");
}

#[tokio::test]
async fn test_task_dispose_cancels() {
    let (tx, rx) = oneshot::channel();

    let connection: Connection = Box::new(FluxionTask::spawn(|cancel| async move {
        cancel.cancelled().await;
        let _ = tx.send(());
    }));

    connection.dispose();

    assert!(rx.await.is_ok(), "Disposing the task should cancel it");
}

#[tokio::test]
async fn test_task_runs_to_completion_without_cancel() {
    let (tx, rx) = oneshot::channel();

    let _task = FluxionTask::spawn(|_cancel| async move {
        let _ = tx.send(42);
    });

    assert_eq!(rx.await, Ok(42));
}
