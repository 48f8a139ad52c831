//! Tests for the chart error taxonomy

use chartsmith::ChartError;

#[test]
fn test_no_parser_found() {
    let error = ChartError::NoParserFound {
        filename: Some("report.pdf".to_string()),
        input_kind: "bytes",
        length: 2048,
        available: vec!["csv".to_string(), "text".to_string()],
    };
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("No parser found"));
    assert!(error_msg.contains("filename=report.pdf"));
    assert!(error_msg.contains("type=bytes"));
    assert!(error_msg.contains("length=2048"));
    assert!(error_msg.contains("csv"));
}

#[test]
fn test_no_parser_found_without_filename() {
    let error = ChartError::NoParserFound {
        filename: None,
        input_kind: "text",
        length: 0,
        available: Vec::new(),
    };
    assert!(error.to_string().contains("filename=None"));
}

#[test]
fn test_empty_errors() {
    let error = ChartError::empty_input("CSV input is empty");
    assert!(error.to_string().contains("Empty input"));
    assert!(error.to_string().contains("CSV input is empty"));

    let error = ChartError::empty_table("no data rows");
    assert!(error.to_string().contains("Empty table"));
}

#[test]
fn test_parse_error() {
    let error = ChartError::parse_error("expected 2 fields in line 3, saw 4");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Parse error"));
    assert!(error_msg.contains("line 3"));
}

#[test]
fn test_invalid_input_kind() {
    let error = ChartError::InvalidInputKind {
        parser: "spreadsheet",
        expected: "bytes",
    };
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("spreadsheet"));
    assert!(error_msg.contains("bytes"));
}

#[test]
fn test_extraction_failed_messages() {
    let bare = ChartError::ExtractionFailed { last_error: None }.to_string();
    assert!(bare.contains("vision extraction credential"));
    assert!(bare.contains("OCR toolchain"));
    assert!(!bare.contains("Vision provider error"));

    let detailed = ChartError::ExtractionFailed {
        last_error: Some("quota exceeded".to_string()),
    }
    .to_string();
    assert!(detailed.contains("Vision provider error: quota exceeded"));
}

#[test]
fn test_unknown_chart_type() {
    let error = ChartError::UnknownChartType {
        requested: "histogram".to_string(),
        available: vec!["line".to_string(), "bar".to_string()],
    };
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("'histogram'"));
    assert!(error_msg.contains("line"));
}

#[test]
fn test_unknown_column() {
    let error = ChartError::UnknownColumn {
        column: "Revenue".to_string(),
        available: vec!["Region".to_string()],
    };
    assert!(error.to_string().contains("Column 'Revenue' not found"));
}

#[test]
fn test_validation_versus_internal() {
    assert!(ChartError::invalid_config("nothing to plot").is_validation());
    assert!(ChartError::parse_error("bad").is_validation());
    assert!(ChartError::ExtractionFailed { last_error: None }.is_validation());
    assert!(!ChartError::internal("broken invariant").is_validation());
}

#[test]
fn test_into_anyhow() {
    fn fails() -> anyhow::Result<()> {
        Err(ChartError::empty_table("no rows"))?;
        Ok(())
    }
    let err = fails().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChartError>(),
        Some(ChartError::EmptyTable { .. })
    ));
}
