// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[tokio::test]
async fn fake_alarm_records_arm_fire_cancel() {
    let alarm = FakeAlarmAdapter::new();
    let at = Instant::now() + Duration::from_secs(300);

    alarm.arm(at).await.unwrap();
    assert_eq!(alarm.armed_at(), Some(at));
    assert!(alarm.fire());
    assert_eq!(alarm.pending(), 0);
    assert!(!alarm.fire());

    alarm.arm(at).await.unwrap();
    alarm.cancel().await.unwrap();
    assert_eq!(alarm.pending(), 0);
    assert_eq!(alarm.arm_count(), 2);
    assert_eq!(alarm.peak_pending(), 1);
}

#[tokio::test]
async fn fake_alarm_detects_double_schedule() {
    let alarm = FakeAlarmAdapter::new();
    alarm.arm(Instant::now()).await.unwrap();
    alarm.arm(Instant::now()).await.unwrap();
    assert_eq!(alarm.peak_pending(), 2);
}

#[tokio::test]
async fn fake_alarm_injects_failures() {
    let alarm = FakeAlarmAdapter::new();
    alarm.fail_next_arms(1);
    assert!(alarm.arm(Instant::now()).await.is_err());
    assert!(alarm.arm(Instant::now()).await.is_ok());

    alarm.set_arm_always_fails(true);
    assert!(alarm.arm(Instant::now()).await.is_err());
    assert_eq!(alarm.arm_count(), 1);
}
