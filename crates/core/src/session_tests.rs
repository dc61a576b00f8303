// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::fix::{FixSource, Position};

fn fix_at(timestamp_millis: i64) -> Fix {
    Position::new(1.0, 2.0, 5.0, timestamp_millis).into_fix(FixSource::Continuous)
}

#[test]
fn session_starts_in_starting_state() {
    let session = TrackingSession::new(SessionId(1));
    assert_eq!(session.status, TrackingStatus::Starting);
    assert_eq!(session.last_accepted_millis, None);
    assert!(session.alarm_scheduled_at.is_none());
}

#[test]
fn try_accept_updates_last_accepted() {
    let mut session = TrackingSession::new(SessionId(1));
    session.status = TrackingStatus::Running;

    assert!(session.try_accept(&fix_at(10_000)));
    assert_eq!(session.last_accepted_millis, Some(10_000));

    assert!(!session.try_accept(&fix_at(25_000)));
    assert_eq!(session.last_accepted_millis, Some(10_000));

    assert!(session.try_accept(&fix_at(45_000)));
    assert_eq!(session.last_accepted_millis, Some(45_000));
}

#[test]
fn last_accepted_never_decreases() {
    let mut session = TrackingSession::new(SessionId(1));
    session.status = TrackingStatus::Running;

    for ts in [100_000, 20_000, 140_000, 0, 90_000, 175_000] {
        let before = session.last_accepted_millis;
        session.try_accept(&fix_at(ts));
        assert!(session.last_accepted_millis >= before);
    }
    assert_eq!(session.last_accepted_millis, Some(175_000));
}

#[test]
fn stopping_session_rejects_fixes() {
    let mut session = TrackingSession::new(SessionId(1));
    session.status = TrackingStatus::Stopping;
    assert!(!session.try_accept(&fix_at(0)));
    assert_eq!(session.last_accepted_millis, None);
}

#[test]
fn status_display_is_lowercase() {
    assert_eq!(TrackingStatus::Running.to_string(), "running");
    assert_eq!(SessionId(7).to_string(), "session-7");
}
