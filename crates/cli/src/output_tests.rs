// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use lt_core::{Fix, FixSource, TrackingStatus};

fn report() -> StatusReport {
    StatusReport {
        tracking: TrackingStatus::Running,
        session: Some(2),
        uptime_secs: Some(125),
        daemon_uptime_secs: 3725,
        last_accepted_millis: Some(1_767_225_600_000),
        alarm_in_ms: Some(175_500),
        permission_denied: false,
        last_error: None,
    }
}

#[test]
fn durations_drop_leading_zero_units() {
    assert_eq!(format_duration(Duration::from_secs(0)), "0s");
    assert_eq!(format_duration(Duration::from_secs(59)), "59s");
    assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
}

#[test]
fn epoch_millis_render_as_utc() {
    assert_eq!(
        format_epoch_millis(1_767_225_600_000),
        "2026-01-01T00:00:00Z"
    );
}

#[test]
fn running_status_text() {
    let text = StatusView(report()).to_string();
    assert_eq!(
        text,
        "Tracking: running\n\
         Session: session-2\n\
         Uptime: 2m 5s\n\
         Last fix: 2026-01-01T00:00:00Z\n\
         Next alarm in: 2m 55s\n\
         Daemon uptime: 1h 2m 5s"
    );
}

#[test]
fn stopped_status_shows_last_error_and_permission() {
    let text = StatusView(StatusReport {
        tracking: TrackingStatus::Stopped,
        session: None,
        uptime_secs: None,
        daemon_uptime_secs: 4,
        last_accepted_millis: None,
        alarm_in_ms: None,
        permission_denied: true,
        last_error: Some("alarm scheduling failed: denied".to_string()),
    })
    .to_string();

    assert_eq!(
        text,
        "Tracking: stopped\n\
         Location permission: denied\n\
         Last error: alarm scheduling failed: denied\n\
         Daemon uptime: 4s"
    );
}

#[test]
fn status_json_is_the_report() {
    let json = serde_json::to_value(StatusView(report())).unwrap();
    assert_eq!(json["tracking"], "running");
    assert_eq!(json["alarm_in_ms"], 175_500);
}

#[test]
fn fix_view_text() {
    let record = FallbackRecord {
        fix: Fix {
            latitude: 59.3293,
            longitude: 18.0686,
            accuracy_meters: 12.5,
            timestamp_millis: 1_767_225_600_000,
            source: FixSource::AlarmHighPriority,
        },
        recorded_at_millis: 1_767_225_601_000,
    };

    let text = FixView::from(&record).to_string();
    assert_eq!(
        text,
        "Latitude: 59.329300\n\
         Longitude: 18.068600\n\
         Accuracy: 12.5 m\n\
         Fix time: 2026-01-01T00:00:00Z\n\
         Source: alarm_high_priority\n\
         Recorded: 2026-01-01T00:00:01Z"
    );
}
