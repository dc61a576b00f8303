// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn request() -> ContinuousRequest {
    ContinuousRequest {
        interval: Duration::from_secs(300),
        fastest_interval: Duration::from_secs(30),
        high_accuracy: true,
    }
}

#[tokio::test]
async fn fake_location_tracks_subscriptions() {
    let adapter = FakeLocationAdapter::new();
    let (tx, mut rx) = mpsc::channel(4);

    let id = adapter.subscribe(request(), tx).await.unwrap();
    assert_eq!(adapter.active_subscriptions(), 1);

    let position = Position::new(1.0, 2.0, 3.0, 4);
    assert_eq!(adapter.emit(position).await, 1);
    assert_eq!(rx.recv().await, Some(position));

    adapter.unsubscribe(id).await.unwrap();
    assert_eq!(adapter.active_subscriptions(), 0);
    assert_eq!(adapter.peak_subscriptions(), 1);
    assert_eq!(adapter.calls().len(), 2);
}

#[tokio::test]
async fn fake_location_withholds_fixes_without_permission() {
    let adapter = FakeLocationAdapter::new();
    adapter.set_permission_denied(true);
    let (tx, _rx) = mpsc::channel(4);

    // Subscribing still succeeds
    adapter.subscribe(request(), tx).await.unwrap();
    assert_eq!(adapter.emit(Position::new(0.0, 0.0, 1.0, 1)).await, 0);
    assert_eq!(
        adapter.check_permission().await,
        Err(LocationError::PermissionDenied)
    );

    adapter.set_permission_denied(false);
    assert_eq!(adapter.emit(Position::new(0.0, 0.0, 1.0, 2)).await, 1);
}

#[tokio::test(start_paused = true)]
async fn fake_location_hang_never_resolves() {
    let adapter = FakeLocationAdapter::new();
    adapter.set_single_response(SingleResponse::Hang);
    let result = tokio::time::timeout(
        Duration::from_secs(10),
        adapter.request_single(true, Duration::from_secs(10)),
    )
    .await;
    assert!(result.is_err());
}
