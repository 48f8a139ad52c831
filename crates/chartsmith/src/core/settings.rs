//! Runtime defaults for the chart pipeline
//!
//! Values come from `CHARTSMITH_*` environment variables when present:
//!
//! - `CHARTSMITH_TEMPLATE`: theme stamped onto derived configs (default `plotly_white`)
//! - `CHARTSMITH_SUGGESTION_ROWS`: rows previewed to the suggestion provider (default 50)
//! - `CHARTSMITH_PIE_MAX_CATEGORIES`: largest category count auto-selected as pie (default 8)

use std::str::FromStr;
use tracing::warn;

use super::config::DEFAULT_TEMPLATE;

pub const TEMPLATE_VAR: &str = "CHARTSMITH_TEMPLATE";
pub const SUGGESTION_ROWS_VAR: &str = "CHARTSMITH_SUGGESTION_ROWS";
pub const PIE_MAX_CATEGORIES_VAR: &str = "CHARTSMITH_PIE_MAX_CATEGORIES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub default_template: String,
    pub suggestion_sample_rows: usize,
    pub pie_max_categories: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_template: DEFAULT_TEMPLATE.to_string(),
            suggestion_sample_rows: 50,
            pie_max_categories: 8,
        }
    }
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup
    ///
    /// Malformed numbers are logged and replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_template = lookup(TEMPLATE_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.default_template);

        Self {
            default_template,
            suggestion_sample_rows: parse_or_default(
                &lookup,
                SUGGESTION_ROWS_VAR,
                defaults.suggestion_sample_rows,
            ),
            pie_max_categories: parse_or_default(
                &lookup,
                PIE_MAX_CATEGORIES_VAR,
                defaults.pie_max_categories,
            ),
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.default_template = template.into();
        self
    }

    pub fn with_pie_max_categories(mut self, max: usize) -> Self {
        self.pie_max_categories = max;
        self
    }

    pub fn with_suggestion_sample_rows(mut self, rows: usize) -> Self {
        self.suggestion_sample_rows = rows;
        self
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(key, value = %raw, default = %default, "Ignoring malformed setting");
                default
            }
        },
    }
}
