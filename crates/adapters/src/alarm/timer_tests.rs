// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn fires_once_at_deadline() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let alarm = TokioAlarmAdapter::new(tx);

    alarm
        .arm(Instant::now() + Duration::from_secs(300))
        .await
        .unwrap();

    assert_eq!(rx.recv().await, Some(Trigger::AlarmFired));
    tokio::time::sleep(Duration::from_secs(600)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn rearming_replaces_previous_alarm() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let alarm = TokioAlarmAdapter::new(tx);

    alarm
        .arm(Instant::now() + Duration::from_secs(10))
        .await
        .unwrap();
    alarm
        .arm(Instant::now() + Duration::from_secs(20))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(rx.try_recv(), Ok(Trigger::AlarmFired));
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn cancelled_alarm_does_not_fire() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let alarm = TokioAlarmAdapter::new(tx);

    // Cancel before anything is armed is fine
    alarm.cancel().await.unwrap();

    alarm
        .arm(Instant::now() + Duration::from_secs(10))
        .await
        .unwrap();
    alarm.cancel().await.unwrap();

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn arming_without_listener_fails() {
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);
    let alarm = TokioAlarmAdapter::new(tx);

    let err = alarm.arm(Instant::now()).await.unwrap_err();
    assert!(matches!(err, AlarmError::ArmFailed(_)));
}
