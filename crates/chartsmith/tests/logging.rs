//! Tests for logging setup
//!
//! A global subscriber can only be installed once per process, so most
//! calls here only check that initialization does not panic.

use chartsmith::core::logging::{init_logging, LogFormat, LOG_FORMAT_VAR, LOG_LEVEL_VAR};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("xml").is_err());
}

#[test]
fn test_env_var_names() {
    assert_eq!(LOG_LEVEL_VAR, "CHARTSMITH_LOG_LEVEL");
    assert_eq!(LOG_FORMAT_VAR, "CHARTSMITH_LOG_FORMAT");
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_init_logging_with_levels_and_formats() {
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("chartsmith::plugins=trace"), Some("json"));
    let _ = init_logging(Some("off"), Some("pretty"));
    let _ = init_logging(Some("not a [valid] filter"), Some("compact"));
}

#[test]
fn test_second_init_reports_error() {
    let _ = init_logging(Some("warn"), Some("compact"));
    assert!(init_logging(Some("warn"), Some("compact")).is_err());
}

#[test]
fn test_pipeline_runs_with_subscriber() {
    let _ = init_logging(Some("trace"), Some("compact"));
    let chart =
        chartsmith::create_chart("Category,Value\nA,1\nB,2", None, "auto", None, None, None)
            .unwrap();
    assert_eq!(chart.figure.traces().len(), 1);
}
