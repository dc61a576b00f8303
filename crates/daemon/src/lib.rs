// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lt-daemon: control protocol, file layout and configuration shared by
//! `ltd` and the `lt` command line.

pub mod config;
pub mod intent;
pub mod paths;
pub mod protocol;

pub use config::{BridgeSection, DaemonFile, ProviderSection, ReviveSection, WakeSection};
pub use intent::TrackingIntent;
pub use paths::{Paths, PathsError};
pub use protocol::{ProtocolError, Request, Response, StatusReport, PROTOCOL_VERSION};
