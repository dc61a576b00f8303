// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use lt_daemon::StatusReport;
use lt_storage::FallbackRecord;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Format a duration as `1h 2m 3s`, dropping leading zero units
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h {}m {}s", h, m, s)
    } else if m > 0 {
        format!("{}m {}s", m, s)
    } else {
        format!("{}s", s)
    }
}

/// Epoch milliseconds as an RFC 3339 UTC timestamp
pub fn format_epoch_millis(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
        .unwrap_or_else(|| millis.to_string())
}

/// Tracking status as printed by `lt status`
#[derive(Serialize)]
#[serde(transparent)]
pub struct StatusView(pub StatusReport);

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = &self.0;
        write!(f, "Tracking: {}", report.tracking)?;
        if let Some(session) = report.session {
            write!(f, "\nSession: session-{}", session)?;
        }
        if let Some(secs) = report.uptime_secs {
            write!(f, "\nUptime: {}", format_duration(Duration::from_secs(secs)))?;
        }
        match report.last_accepted_millis {
            Some(millis) => write!(f, "\nLast fix: {}", format_epoch_millis(millis))?,
            None if report.session.is_some() => write!(f, "\nLast fix: none yet")?,
            None => {}
        }
        if let Some(ms) = report.alarm_in_ms {
            write!(
                f,
                "\nNext alarm in: {}",
                format_duration(Duration::from_millis(ms))
            )?;
        }
        if report.permission_denied {
            write!(f, "\nLocation permission: denied")?;
        }
        if let Some(error) = &report.last_error {
            write!(f, "\nLast error: {}", error)?;
        }
        write!(
            f,
            "\nDaemon uptime: {}",
            format_duration(Duration::from_secs(report.daemon_uptime_secs))
        )
    }
}

/// Fallback slot contents as printed by `lt last-fix`
#[derive(Serialize)]
pub struct FixView {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    pub timestamp: i64,
    pub source: String,
    pub recorded_at: i64,
}

impl From<&FallbackRecord> for FixView {
    fn from(record: &FallbackRecord) -> Self {
        Self {
            latitude: record.fix.latitude,
            longitude: record.fix.longitude,
            accuracy: record.fix.accuracy_meters,
            timestamp: record.fix.timestamp_millis,
            source: record.fix.source.to_string(),
            recorded_at: record.recorded_at_millis,
        }
    }
}

impl fmt::Display for FixView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Latitude: {:.6}", self.latitude)?;
        writeln!(f, "Longitude: {:.6}", self.longitude)?;
        writeln!(f, "Accuracy: {:.1} m", self.accuracy)?;
        writeln!(f, "Fix time: {}", format_epoch_millis(self.timestamp))?;
        writeln!(f, "Source: {}", self.source)?;
        write!(f, "Recorded: {}", format_epoch_millis(self.recorded_at))
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
