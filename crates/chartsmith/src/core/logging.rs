//! Logging setup for the chart pipeline
//!
//! Every stage (dispatch, parse, suggestion, selection, render, addons) emits
//! `tracing` spans and events. This module installs a subscriber for them.
//!
//! # Usage
//!
//! ```rust
//! use chartsmith::core::logging::init_logging;
//!
//! // Level and format from the environment, or info/compact
//! let _ = init_logging(None, None);
//! ```
//!
//! # Environment Variables
//!
//! - `CHARTSMITH_LOG_LEVEL`: log level or filter directive (trace|debug|info|warn|error|off)
//! - `RUST_LOG`: standard tracing-subscriber filter, used when the above is unset
//! - `CHARTSMITH_LOG_FORMAT`: compact|pretty|json
//!
//! # Filtering Logs
//!
//! ```bash
//! # Parser decisions only
//! RUST_LOG="chartsmith::plugins::parsers=debug" my-service
//!
//! # Everything at info, addon chain at trace
//! RUST_LOG="info,chartsmith::plugins::addons=trace" my-service
//! ```

use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

pub const LOG_LEVEL_VAR: &str = "CHARTSMITH_LOG_LEVEL";
pub const LOG_FORMAT_VAR: &str = "CHARTSMITH_LOG_FORMAT";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Single line per event
    Compact,
    /// Multi-line with colors
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Install a global tracing subscriber
///
/// `level` falls back to `CHARTSMITH_LOG_LEVEL`, then `RUST_LOG`, then
/// `info`. `format` falls back to `CHARTSMITH_LOG_FORMAT`, then `compact`.
///
/// Returns an error for an unknown format or if a global subscriber is
/// already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let log_level = level
        .map(|s| s.to_string())
        .or_else(|| std::env::var(LOG_LEVEL_VAR).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    let log_format = format
        .map(|s| s.to_string())
        .or_else(|| std::env::var(LOG_FORMAT_VAR).ok())
        .unwrap_or_else(|| "compact".to_string());

    let format =
        LogFormat::from_str(&log_format).map_err(|e| format!("Invalid log format: {}", e))?;

    let filter = build_filter(&log_level);

    match format {
        LogFormat::Compact => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_target(false)
                        .with_level(true)
                        .with_span_events(FmtSpan::NONE),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .pretty(),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .json(),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Initialize logging with info level and compact format unless overridden by env
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging(None, None)
}

fn build_filter(level: &str) -> EnvFilter {
    if level.eq_ignore_ascii_case("off") {
        return EnvFilter::new("off");
    }
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}
