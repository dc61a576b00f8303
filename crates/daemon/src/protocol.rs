// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control socket protocol between `lt` and `ltd`.
//!
//! Each message is a length-prefixed JSON frame; a connection carries one
//! request and one response.

use std::time::Duration;

use lt_core::{TrackingStatus, WireError};
use lt_engine::StatusSnapshot;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};

pub use lt_core::wire::{decode, encode, read_message, write_message};

/// Bumped whenever `Request` or `Response` change shape
pub const PROTOCOL_VERSION: &str = "1";

/// Default time allowed for reading or writing one message
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Commands accepted on the control socket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    Ping,
    Hello { version: String },
    /// Begin tracking; restarts a running session
    Start,
    Stop,
    /// Explicit restart broadcast
    Restart,
    Status,
    Shutdown,
}

/// Replies sent back on the control socket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    Ok,
    Pong,
    Hello { version: String },
    Started { session: u64 },
    Stopped,
    Status { status: StatusReport },
    Error { message: String },
    ShuttingDown,
}

/// Tracking state as reported to the command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub tracking: TrackingStatus,
    pub session: Option<u64>,
    pub uptime_secs: Option<u64>,
    pub daemon_uptime_secs: u64,
    pub last_accepted_millis: Option<i64>,
    pub alarm_in_ms: Option<u64>,
    pub permission_denied: bool,
    pub last_error: Option<String>,
}

impl StatusReport {
    pub fn new(snapshot: &StatusSnapshot, daemon_uptime: Duration) -> Self {
        Self {
            tracking: snapshot.status,
            session: snapshot.session.map(|id| id.0),
            uptime_secs: snapshot.uptime.map(|d| d.as_secs()),
            daemon_uptime_secs: daemon_uptime.as_secs(),
            last_accepted_millis: snapshot.last_accepted_millis,
            alarm_in_ms: snapshot.alarm_in.map(|d| d.as_millis() as u64),
            permission_denied: snapshot.permission_denied,
            last_error: snapshot.last_error.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error(transparent)]
    Wire(#[from] WireError),

    #[error("timed out")]
    Timeout,

    #[error("connection closed")]
    ConnectionClosed,
}

impl ProtocolError {
    fn from_wire(e: WireError) -> Self {
        match e {
            WireError::ConnectionClosed => ProtocolError::ConnectionClosed,
            other => ProtocolError::Wire(other),
        }
    }
}

async fn read_with_timeout<R, T>(reader: &mut R, timeout: Duration) -> Result<T, ProtocolError>
where
    R: AsyncRead + Unpin,
    T: serde::de::DeserializeOwned,
{
    let bytes = tokio::time::timeout(timeout, read_message(reader))
        .await
        .map_err(|_| ProtocolError::Timeout)?
        .map_err(ProtocolError::from_wire)?;
    decode(&bytes).map_err(ProtocolError::from_wire)
}

async fn write_with_timeout<W, T>(
    writer: &mut W,
    value: &T,
    timeout: Duration,
) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let bytes = encode(value)?;
    tokio::time::timeout(timeout, write_message(writer, &bytes))
        .await
        .map_err(|_| ProtocolError::Timeout)?
        .map_err(ProtocolError::from_wire)
}

pub async fn read_request<R: AsyncRead + Unpin>(
    reader: &mut R,
    timeout: Duration,
) -> Result<Request, ProtocolError> {
    read_with_timeout(reader, timeout).await
}

pub async fn write_request<W: AsyncWrite + Unpin>(
    writer: &mut W,
    request: &Request,
    timeout: Duration,
) -> Result<(), ProtocolError> {
    write_with_timeout(writer, request, timeout).await
}

pub async fn read_response<R: AsyncRead + Unpin>(
    reader: &mut R,
    timeout: Duration,
) -> Result<Response, ProtocolError> {
    read_with_timeout(reader, timeout).await
}

pub async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &Response,
    timeout: Duration,
) -> Result<(), ProtocolError> {
    write_with_timeout(writer, response, timeout).await
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
