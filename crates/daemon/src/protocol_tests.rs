// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Protocol unit tests

use super::*;

fn running_report() -> StatusReport {
    StatusReport {
        tracking: TrackingStatus::Running,
        session: Some(3),
        uptime_secs: Some(120),
        daemon_uptime_secs: 3600,
        last_accepted_millis: Some(1_767_225_600_000),
        alarm_in_ms: Some(180_000),
        permission_denied: false,
        last_error: None,
    }
}

#[test]
fn status_report_from_snapshot() {
    let snapshot = StatusSnapshot {
        status: TrackingStatus::Running,
        session: Some(lt_core::SessionId(3)),
        uptime: Some(Duration::from_millis(120_400)),
        last_accepted_millis: Some(1_767_225_600_000),
        alarm_in: Some(Duration::from_secs(180)),
        permission_denied: false,
        last_error: None,
    };

    let report = StatusReport::new(&snapshot, Duration::from_secs(3600));
    assert_eq!(report, running_report());
}

#[test]
fn stopped_status_report_has_no_session_fields() {
    let snapshot = StatusSnapshot {
        status: TrackingStatus::Stopped,
        session: None,
        uptime: None,
        last_accepted_millis: None,
        alarm_in: None,
        permission_denied: true,
        last_error: Some("alarm scheduling failed: denied".to_string()),
    };

    let report = StatusReport::new(&snapshot, Duration::from_secs(5));
    assert_eq!(report.tracking, TrackingStatus::Stopped);
    assert_eq!(report.session, None);
    assert_eq!(report.alarm_in_ms, None);
    assert!(report.permission_denied);
    assert_eq!(
        report.last_error.as_deref(),
        Some("alarm scheduling failed: denied")
    );
}

#[test]
fn encode_decode_roundtrip_request() {
    let request = Request::Hello {
        version: PROTOCOL_VERSION.to_string(),
    };

    let encoded = encode(&request).expect("encode failed");
    let decoded: Request = decode(&encoded).expect("decode failed");

    assert_eq!(request, decoded);
}

#[test]
fn encode_decode_roundtrip_status_response() {
    let response = Response::Status {
        status: running_report(),
    };

    let encoded = encode(&response).expect("encode failed");
    let decoded: Response = decode(&encoded).expect("decode failed");

    assert_eq!(response, decoded);
}

#[test]
fn requests_are_tagged_by_type() {
    let encoded = encode(&Request::Restart).expect("encode failed");
    let json: serde_json::Value = serde_json::from_slice(&encoded).expect("valid JSON");
    assert_eq!(json["type"], "Restart");

    let decoded: Request = decode(br#"{"type":"Start"}"#).expect("decode failed");
    assert_eq!(decoded, Request::Start);
}

#[test]
fn unknown_request_type_is_rejected() {
    let result: Result<Request, _> = decode(br#"{"type":"Launch"}"#);
    assert!(result.is_err());
}

#[test]
fn encode_returns_json_without_length_prefix() {
    let response = Response::Ok;
    let encoded = encode(&response).expect("encode failed");

    // encode() returns raw JSON, no length prefix
    let json_str = std::str::from_utf8(&encoded).expect("should be valid UTF-8");
    assert!(
        json_str.starts_with('{'),
        "should be JSON object: {}",
        json_str
    );
}

#[tokio::test]
async fn request_response_over_duplex() {
    let (mut client, mut server) = tokio::io::duplex(4096);

    write_request(&mut client, &Request::Status, DEFAULT_TIMEOUT)
        .await
        .expect("write request");
    let request = read_request(&mut server, DEFAULT_TIMEOUT)
        .await
        .expect("read request");
    assert_eq!(request, Request::Status);

    let response = Response::Started { session: 7 };
    write_response(&mut server, &response, DEFAULT_TIMEOUT)
        .await
        .expect("write response");
    let read_back = read_response(&mut client, DEFAULT_TIMEOUT)
        .await
        .expect("read response");
    assert_eq!(read_back, response);
}

#[tokio::test]
async fn read_request_reports_closed_connection() {
    let (client, mut server) = tokio::io::duplex(64);
    drop(client);

    let result = read_request(&mut server, DEFAULT_TIMEOUT).await;
    assert!(matches!(result, Err(ProtocolError::ConnectionClosed)));
}

#[tokio::test(start_paused = true)]
async fn read_request_times_out_when_client_is_silent() {
    let (_client, mut server) = tokio::io::duplex(64);

    let result = read_request(&mut server, Duration::from_millis(100)).await;
    assert!(matches!(result, Err(ProtocolError::Timeout)));
}
