// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bridge to a consumer listening on a Unix socket

use super::{BridgeAdapter, BridgeError};
use async_trait::async_trait;
use lt_core::{wire, OutboundEvent};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::net::UnixStream;

/// Default bound on connect + write to the consumer
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(2);

/// Writes each event as one length-prefixed frame on a fresh connection
#[derive(Clone, Debug)]
pub struct UnixSocketBridge {
    socket_path: PathBuf,
    write_timeout: Duration,
}

impl UnixSocketBridge {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }

    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    async fn send(&self, frame: &[u8]) -> Result<(), BridgeError> {
        let mut stream = match UnixStream::connect(&self.socket_path).await {
            Ok(stream) => stream,
            // Nobody listening: the consumer context is gone
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::ConnectionRefused) => {
                return Err(BridgeError::EndpointAbsent)
            }
            Err(e) => return Err(BridgeError::EndpointRejected(e.to_string())),
        };

        wire::write_message(&mut stream, frame)
            .await
            .map_err(|e| BridgeError::EndpointRejected(e.to_string()))
    }
}

#[async_trait]
impl BridgeAdapter for UnixSocketBridge {
    async fn emit(&self, event: &OutboundEvent) -> Result<(), BridgeError> {
        if !self.socket_path.exists() {
            return Err(BridgeError::EndpointAbsent);
        }

        let frame = event
            .to_json()
            .map_err(|e| BridgeError::EndpointRejected(e.to_string()))?;

        match tokio::time::timeout(self.write_timeout, self.send(&frame)).await {
            Ok(result) => result,
            Err(_) => Err(BridgeError::EndpointRejected(format!(
                "write timed out after {:?}",
                self.write_timeout
            ))),
        }
    }
}

#[cfg(test)]
#[path = "unix_tests.rs"]
mod tests;
