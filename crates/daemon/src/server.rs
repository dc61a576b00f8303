// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Socket server and connection handling.

use lt_daemon::protocol::{self, Request, Response, StatusReport, DEFAULT_TIMEOUT};
use lt_daemon::PROTOCOL_VERSION;
use thiserror::Error;
use tokio::net::UnixStream;
use tracing::{debug, error, info};

use crate::lifecycle::DaemonCtx;

/// Handle a single client connection
pub async fn handle_connection(ctx: &DaemonCtx, stream: UnixStream) -> Result<(), ServerError> {
    // Split stream for reading/writing
    let (mut reader, mut writer) = stream.into_split();

    // Read request with timeout
    let request = match protocol::read_request(&mut reader, DEFAULT_TIMEOUT).await {
        Ok(req) => req,
        Err(protocol::ProtocolError::Timeout) => {
            error!("Request read timeout");
            return Err(ServerError::Timeout);
        }
        Err(protocol::ProtocolError::ConnectionClosed) => {
            debug!("Client disconnected before sending request");
            return Ok(());
        }
        Err(e) => {
            error!("Failed to read request: {}", e);
            return Err(ServerError::Protocol(e));
        }
    };

    debug!("Received request: {:?}", request);

    let response = handle_request(ctx, request).await;

    debug!("Sending response: {:?}", response);

    // Write response with timeout
    protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT)
        .await
        .map_err(ServerError::Protocol)?;

    Ok(())
}

/// Handle a single request and return a response
async fn handle_request(ctx: &DaemonCtx, request: Request) -> Response {
    match request {
        Request::Ping => Response::Pong,

        Request::Hello { version: _ } => Response::Hello {
            version: PROTOCOL_VERSION.to_string(),
        },

        // An explicit restart is a start: a running session is replaced
        Request::Start | Request::Restart => match ctx.start_tracking().await {
            Ok(id) => {
                info!(session = %id, "tracking started on request");
                Response::Started { session: id.0 }
            }
            Err(e) => Response::Error {
                message: e.to_string(),
            },
        },

        Request::Stop => {
            ctx.stop_tracking().await;
            info!("tracking stopped on request");
            Response::Stopped
        }

        Request::Status => Response::Status {
            status: StatusReport::new(&ctx.controller.status(), ctx.start_time.elapsed()),
        },

        Request::Shutdown => {
            ctx.shutdown.cancel();
            Response::ShuttingDown
        }
    }
}

/// Server errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] protocol::ProtocolError),

    #[error("Request timeout")]
    Timeout,
}
