// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_returns_increasing_time() {
    let clock = SystemClock;
    let t1 = clock.now();
    std::thread::sleep(Duration::from_millis(1));
    let t2 = clock.now();
    assert!(t2 > t1);
}

#[test]
fn system_clock_epoch_millis_is_recent() {
    // 2020-01-01T00:00:00Z
    assert!(SystemClock.epoch_millis() > 1_577_836_800_000);
}

#[test]
fn fake_clock_advances_both_clocks() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    let ms1 = clock.epoch_millis();
    clock.advance(Duration::from_secs(60));
    assert!(clock.now().duration_since(t1) >= Duration::from_secs(60));
    assert_eq!(clock.epoch_millis() - ms1, 60_000);
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.now();
    clock2.advance(Duration::from_secs(30));
    let t2 = clock1.now();
    assert!(t2.duration_since(t1) >= Duration::from_secs(30));
}

#[test]
fn wall_clock_jump_leaves_monotonic_time_alone() {
    let clock = FakeClock::at_epoch_millis(5_000);
    let before = clock.now();
    clock.set_epoch_millis(1_000);
    assert_eq!(clock.epoch_millis(), 1_000);
    assert_eq!(clock.now(), before);
}
