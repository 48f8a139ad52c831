//! Render pipeline: chart renderer followed by the addon chain

use tracing::{debug, span, trace, Level};

use super::addons::default_addons;
use super::bar::BarRenderer;
use super::line::LineRenderer;
use super::pie::PieRenderer;
use super::scatter::ScatterRenderer;
use crate::core::{
    ChartConfig, ChartError, ChartKind, ChartRenderer, Figure, FigureAddon, Result, Table,
};

/// Renderers keyed by chart kind plus an ordered addon chain
pub struct RenderPipeline {
    renderers: Vec<Box<dyn ChartRenderer>>,
    addons: Vec<Box<dyn FigureAddon>>,
}

impl RenderPipeline {
    /// Create a pipeline with no renderers or addons
    pub fn new() -> Self {
        Self {
            renderers: Vec::new(),
            addons: Vec::new(),
        }
    }

    /// Pipeline with every built-in renderer and addon
    pub fn with_defaults() -> Self {
        let mut pipeline = Self::new();
        pipeline.register_renderer(Box::new(LineRenderer::new()));
        pipeline.register_renderer(Box::new(BarRenderer::new()));
        pipeline.register_renderer(Box::new(ScatterRenderer::new()));
        pipeline.register_renderer(Box::new(PieRenderer::new()));
        for addon in default_addons() {
            pipeline.register_addon(addon);
        }
        pipeline
    }

    /// Register a renderer, replacing any for the same kind
    pub fn register_renderer(&mut self, renderer: Box<dyn ChartRenderer>) {
        match self
            .renderers
            .iter()
            .position(|r| r.kind() == renderer.kind())
        {
            Some(index) => self.renderers[index] = renderer,
            None => self.renderers.push(renderer),
        }
    }

    /// Register an addon; the chain stays sorted by `order`
    pub fn register_addon(&mut self, addon: Box<dyn FigureAddon>) {
        self.addons.push(addon);
        self.addons.sort_by_key(|a| a.order());
    }

    pub fn list_renderers(&self) -> Vec<String> {
        self.renderers
            .iter()
            .map(|r| r.kind().to_string())
            .collect()
    }

    /// Addon names in application order
    pub fn addon_names(&self) -> Vec<&'static str> {
        self.addons.iter().map(|a| a.name()).collect()
    }

    pub fn renderer(&self, kind: ChartKind) -> Result<&dyn ChartRenderer> {
        self.renderers
            .iter()
            .find(|r| r.kind() == kind)
            .map(|r| r.as_ref())
            .ok_or_else(|| ChartError::UnknownChartType {
                requested: kind.to_string(),
                available: self.list_renderers(),
            })
    }

    /// Render the base figure and thread it through every addon
    pub fn render(&self, table: &Table, config: &ChartConfig) -> Result<Figure> {
        let render_span = span!(Level::INFO, "render", chart_type = %config.chart_type);
        let _enter = render_span.enter();

        let renderer = self.renderer(config.chart_type)?;
        let mut figure = renderer.render(table, config)?;
        debug!(traces = figure.traces().len(), "Base figure rendered");

        for addon in &self.addons {
            trace!(addon = addon.name(), order = addon.order(), "Applying addon");
            figure = addon.apply(figure, config);
        }

        Ok(figure)
    }
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::addons::{ColorPaletteAddon, LayoutAddon, ReferenceLinesAddon};
    use crate::plugins::parsers::TextParser;

    #[test]
    fn test_addons_sorted_regardless_of_registration() {
        let mut pipeline = RenderPipeline::new();
        pipeline.register_addon(Box::new(LayoutAddon::new()));
        pipeline.register_addon(Box::new(ColorPaletteAddon::new()));
        pipeline.register_addon(Box::new(ReferenceLinesAddon::new()));
        assert_eq!(
            pipeline.addon_names(),
            vec!["color_palette", "reference_lines", "layout"]
        );
    }

    #[test]
    fn test_missing_renderer() {
        let mut pipeline = RenderPipeline::new();
        pipeline.register_renderer(Box::new(BarRenderer::new()));
        let table = TextParser::new().parse_text("a,b\nx,1").unwrap();
        match pipeline.render(&table, &ChartConfig::new(ChartKind::Pie)) {
            Err(ChartError::UnknownChartType {
                requested,
                available,
            }) => {
                assert_eq!(requested, "pie");
                assert_eq!(available, vec!["bar"]);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_full_render_applies_layout() {
        let table = TextParser::new().parse_text("a,b\nx,1\ny,2").unwrap();
        let config = ChartConfig::new(ChartKind::Bar).with_palette(["vibrant"]);
        let figure = RenderPipeline::with_defaults().render(&table, &config).unwrap();
        assert!(figure.layout().margin.is_some());
        assert_eq!(
            figure.traces()[0].marker.as_ref().and_then(|m| m.color.as_deref()),
            Some("#e6194b")
        );
    }
}
