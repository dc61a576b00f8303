// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn missing_inhibitor_fails_to_acquire() {
    let lock = InhibitWakeLock::with_command("/nonexistent/lt-inhibit", vec![]);
    let err = lock.acquire().await.unwrap_err();
    assert!(matches!(err, WakeLockError::AcquireFailed(_)));
    assert!(!lock.is_held());
}

#[tokio::test]
async fn acquire_and_release_child() {
    let lock = InhibitWakeLock::with_command("sleep", vec!["1000".to_string()]);
    lock.acquire().await.unwrap();
    assert!(lock.is_held());

    // Second acquire keeps the same child
    lock.acquire().await.unwrap();
    assert!(lock.is_held());

    lock.release().await.unwrap();
    assert!(!lock.is_held());

    // Releasing again is a no-op
    lock.release().await.unwrap();
}
