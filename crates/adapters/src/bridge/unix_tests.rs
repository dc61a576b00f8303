// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use lt_core::{FixSource, Heartbeat, LocationUpdate, Position};
use tokio::net::UnixListener;

#[tokio::test]
async fn missing_socket_is_endpoint_absent() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = UnixSocketBridge::new(dir.path().join("consumer.sock"));

    let err = bridge
        .emit(&OutboundEvent::Heartbeat(Heartbeat::new(1)))
        .await
        .unwrap_err();
    assert_eq!(err, BridgeError::EndpointAbsent);
}

#[tokio::test]
async fn stale_socket_file_is_endpoint_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("consumer.sock");
    // Bind then drop the listener, leaving the socket file with nobody behind it
    drop(UnixListener::bind(&path).unwrap());
    assert!(path.exists());

    let bridge = UnixSocketBridge::new(&path);
    let err = bridge
        .emit(&OutboundEvent::Heartbeat(Heartbeat::new(1)))
        .await
        .unwrap_err();
    assert_eq!(err, BridgeError::EndpointAbsent);
}

#[tokio::test]
async fn emits_frame_to_listener() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("consumer.sock");
    let listener = UnixListener::bind(&path).unwrap();

    let consumer = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let frame = wire::read_message(&mut stream).await.unwrap();
        serde_json::from_slice::<OutboundEvent>(&frame).unwrap()
    });

    let bridge = UnixSocketBridge::new(&path);
    let event = OutboundEvent::Heartbeat(Heartbeat::new(99));
    bridge.emit(&event).await.unwrap();

    assert_eq!(consumer.await.unwrap(), event);
}

#[tokio::test]
async fn silent_consumer_hits_write_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("consumer.sock");
    let listener = UnixListener::bind(&path).unwrap();
    // Accepts but never reads, so a frame past the socket buffer stalls
    let _consumer = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(stream);
    });

    let bridge = UnixSocketBridge::new(&path).with_write_timeout(Duration::from_millis(100));
    let fix = Position::new(1.0, 2.0, 3.0, 4).into_fix(FixSource::Continuous);
    let big = LocationUpdate {
        source: "x".repeat(900 * 1024),
        ..LocationUpdate::from_fix(&fix, 5)
    };

    let err = bridge
        .emit(&OutboundEvent::LocationUpdate(big))
        .await
        .unwrap_err();
    assert!(matches!(err, BridgeError::EndpointRejected(ref m) if m.contains("timed out")));
}
