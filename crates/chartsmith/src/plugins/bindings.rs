//! Axis binding helpers shared by chart types and renderers

use crate::core::{ChartConfig, ChartError, Column, Figure, Result, Table, Trace, TraceType};

/// Look up a configured column, failing with the available names
pub(crate) fn column<'a>(table: &'a Table, name: &str) -> Result<&'a Column> {
    table.column(name).ok_or_else(|| ChartError::UnknownColumn {
        column: name.to_string(),
        available: owned(table.column_names()),
    })
}

pub(crate) fn owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}

/// Numeric column names other than `x`, in table order
pub(crate) fn numeric_excluding(table: &Table, x: &str) -> Vec<String> {
    table
        .numeric_columns()
        .into_iter()
        .filter(|name| *name != x)
        .map(str::to_string)
        .collect()
}

pub(crate) fn join_series(ys: &[String]) -> String {
    ys.join(", ")
}

/// Axis label for the value axis: the lone series name, or "Value"
pub(crate) fn value_label(ys: &[String]) -> String {
    match ys {
        [single] => single.clone(),
        _ => "Value".to_string(),
    }
}

/// Line chart bindings: x plus the series drawn against it
///
/// With no x given the first column is used, and an all-numeric table pairs
/// its first numeric column against the rest. When nothing else is left the
/// lone numeric column is plotted against itself.
pub(crate) fn line_bindings(table: &Table, x: Option<&str>) -> (String, Vec<String>) {
    let numeric = table.numeric_columns();
    let fallback = |x: &str| {
        let ys = numeric_excluding(table, x);
        if ys.is_empty() {
            numeric.iter().take(1).map(|s| s.to_string()).collect()
        } else {
            ys
        }
    };

    if let Some(x) = x {
        return (x.to_string(), fallback(x));
    }

    let first = table.first_column().name();
    if numeric_excluding(table, first).is_empty() && numeric.len() >= 2 {
        let ys = numeric[1..].iter().map(|s| s.to_string()).collect();
        return (numeric[0].to_string(), ys);
    }
    (first.to_string(), fallback(first))
}

/// x column from config, else the table's first column
pub(crate) fn x_or_first(table: &Table, config: &ChartConfig) -> String {
    config
        .x_column
        .clone()
        .unwrap_or_else(|| table.first_column().name().to_string())
}

/// An x/y series trace
pub(crate) fn series_trace(trace_type: TraceType, x: &Column, y: &Column) -> Trace {
    let mut trace = Trace::new(trace_type);
    trace.name = Some(y.name().to_string());
    trace.x = Some(x.cells());
    trace.y = Some(y.cells());
    trace
}

/// Stamp template, title and axis titles, preferring configured values
pub(crate) fn stamp_layout(
    figure: &mut Figure,
    config: &ChartConfig,
    default_title: String,
    axes: Option<(String, String)>,
) {
    let layout = figure.layout_mut();
    layout.template = Some(config.template.clone());
    layout.title = Some(crate::core::Title::new(
        config.title.clone().unwrap_or(default_title),
    ));
    if let Some((x_label, y_label)) = axes {
        layout.set_axis_titles(
            config.x_label.clone().unwrap_or(x_label),
            config.y_label.clone().unwrap_or(y_label),
        );
    }
}
