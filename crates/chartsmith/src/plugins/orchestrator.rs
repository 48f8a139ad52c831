//! Orchestrator coordinating the chart creation pipeline
//!
//! Dispatch → Parse → (Suggestion | Selector) → Overrides → Render → Addons
//!
//! Registries are built once and only read afterwards, so one orchestrator
//! can serve concurrent requests by shared reference.

use std::sync::Arc;
use tracing::{debug, info, span, warn, Level};

use super::catalog::ChartTypeCatalog;
use super::parsers::ParserRegistry;
use super::pipeline::RenderPipeline;
use crate::core::{
    ChartConfig, ChartError, Figure, OcrEngine, ParsedTable, RawInput, Result, Settings,
    SuggestionProvider, Table, TablePreview, Unavailable, VisionExtractor,
};

/// Chart type name that asks for automatic selection
pub const AUTO: &str = "auto";

/// Everything one `create_chart` call produces
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedChart {
    pub parsed: ParsedTable,
    pub config: ChartConfig,
    pub figure: Figure,
}

impl CreatedChart {
    pub fn into_parts(self) -> (ParsedTable, ChartConfig, Figure) {
        (self.parsed, self.config, self.figure)
    }
}

/// Wires parsers, the chart type catalog and the render pipeline together
pub struct Orchestrator {
    settings: Settings,
    parsers: ParserRegistry,
    catalog: ChartTypeCatalog,
    pipeline: RenderPipeline,
    suggestions: Arc<dyn SuggestionProvider>,
}

impl Orchestrator {
    /// Create an orchestrator with every built-in plugin and no external providers
    pub fn new(settings: Settings) -> Self {
        let catalog = ChartTypeCatalog::with_default_types()
            .with_pie_max_categories(settings.pie_max_categories);
        Self {
            settings,
            parsers: ParserRegistry::with_default_parsers(),
            catalog,
            pipeline: RenderPipeline::with_defaults(),
            suggestions: Arc::new(Unavailable),
        }
    }

    /// Use an external provider for `"auto"` requests
    pub fn with_suggestion_provider(mut self, provider: Arc<dyn SuggestionProvider>) -> Self {
        self.suggestions = provider;
        self
    }

    /// Extract tables from images through the given providers
    pub fn with_image_providers(
        mut self,
        vision: Arc<dyn VisionExtractor>,
        ocr: Arc<dyn OcrEngine>,
    ) -> Self {
        self.parsers = ParserRegistry::with_image_providers(vision, ocr);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn catalog(&self) -> &ChartTypeCatalog {
        &self.catalog
    }

    pub fn parsers(&self) -> &ParserRegistry {
        &self.parsers
    }

    pub fn pipeline(&self) -> &RenderPipeline {
        &self.pipeline
    }

    /// Registered chart type names in registration order
    pub fn list_chart_types(&self) -> Vec<String> {
        self.catalog.list_types()
    }

    pub fn list_display_names(&self) -> Vec<(String, String)> {
        self.catalog.list_display_names()
    }

    /// Registered parser names in priority order
    pub fn list_parsers(&self) -> Vec<String> {
        self.parsers.list_parsers()
    }

    /// Parse the input, resolve a config and render it
    ///
    /// `chart_type` is `"auto"` or a registered chart type name. Non-`None`
    /// overrides replace the resolved title and bindings before rendering.
    pub fn create_chart(
        &self,
        raw_input: &RawInput,
        filename: Option<&str>,
        chart_type: &str,
        title: Option<&str>,
        x_column: Option<&str>,
        y_columns: Option<&[String]>,
    ) -> Result<CreatedChart> {
        let create_span = span!(
            Level::INFO,
            "create_chart",
            filename,
            chart_type,
            input_len = raw_input.len()
        );
        let _enter = create_span.enter();

        let parsed = self.parsers.parse(raw_input, filename)?;

        let mut config = self.resolve_config(parsed.table(), chart_type)?;
        config.apply_overrides(title, x_column, y_columns);
        debug!(
            chart_type = %config.chart_type,
            x_column = config.x_column.as_deref(),
            y_columns = ?config.y_columns,
            "Resolved chart config"
        );

        let figure = self.pipeline.render(parsed.table(), &config)?;
        info!(
            chart_type = %config.chart_type,
            traces = figure.traces().len(),
            "Chart created"
        );

        Ok(CreatedChart {
            parsed,
            config,
            figure,
        })
    }

    fn resolve_config(&self, table: &Table, chart_type: &str) -> Result<ChartConfig> {
        if chart_type.trim().eq_ignore_ascii_case(AUTO) {
            if let Some(config) = self.try_suggestion(table) {
                return Ok(config);
            }
            let kind = self.catalog.infer_best_type(table)?;
            let descriptor = self.catalog.get_kind(kind).ok_or_else(|| {
                ChartError::internal(format!("selected chart type '{}' is not registered", kind))
            })?;
            return Ok(self.derive(descriptor.default_config(table)));
        }

        let descriptor = self.catalog.get(chart_type)?;
        let mut config = self.derive(descriptor.default_config(table));
        config.chart_type = descriptor.kind();
        Ok(config)
    }

    fn derive(&self, mut config: ChartConfig) -> ChartConfig {
        config.template = self.settings.default_template.clone();
        config
    }

    /// One attempt at the external suggestion; any failure means "no suggestion"
    fn try_suggestion(&self, table: &Table) -> Option<ChartConfig> {
        let suggest_span = span!(Level::DEBUG, "suggest_chart");
        let _enter = suggest_span.enter();

        if !self.suggestions.is_available() {
            debug!("Suggestion provider unavailable");
            return None;
        }

        let preview = TablePreview::new(table, self.settings.suggestion_sample_rows);
        let available = self.catalog.list_types();
        let suggestion = match self.suggestions.suggest(table, &preview, &available) {
            Ok(Some(config)) => config,
            Ok(None) => {
                debug!("Suggestion provider returned nothing");
                return None;
            }
            Err(e) => {
                warn!(error = %format!("{:#}", e), "Suggestion provider failed");
                return None;
            }
        };

        if let Err(reason) = self.validate_suggestion(table, &suggestion) {
            warn!(reason = %reason, "Discarding invalid suggestion");
            return None;
        }

        info!(chart_type = %suggestion.chart_type, "Using suggested config");
        Some(suggestion)
    }

    fn validate_suggestion(
        &self,
        table: &Table,
        suggestion: &ChartConfig,
    ) -> std::result::Result<(), String> {
        if !self.catalog.contains(suggestion.chart_type) {
            return Err(format!(
                "chart type '{}' is not registered",
                suggestion.chart_type
            ));
        }
        match suggestion
            .referenced_columns()
            .find(|column| !table.has_column(column))
        {
            Some(column) => Err(format!("column '{}' is not in the table", column)),
            None => Ok(()),
        }
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
