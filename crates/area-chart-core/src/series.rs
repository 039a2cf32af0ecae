// File: crates/area-chart-core/src/series.rs
// Summary: Series declarations and their resolution into plotted series configs.
// Notes:
// - Declaration order is preserved: it drives z-order and tooltip iteration order.
// - Recognition is explicit (a child's role) with a fallback for decorations that
//   still carry a data key, so wrapped series keep registering.

use tracing::debug;

use crate::decoration::ChartChild;
use crate::scene::Color;

/// Stroke width used when a declaration does not set one.
pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;

/// Resolved, plotted series.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesConfig {
    /// Numeric row field; unique within a chart.
    pub key: String,
    pub color: Color,
    pub stroke_width: f32,
}

/// Series declaration as supplied by the caller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesDecl {
    pub data_key: String,
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
    pub stroke_width: Option<f32>,
}

impl SeriesDecl {
    pub fn new(data_key: impl Into<String>) -> Self {
        Self { data_key: data_key.into(), ..Self::default() }
    }

    pub fn with_stroke(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = Some(width);
        self
    }

    /// Stroke falls back to fill, then to the primary line color. None without a key.
    pub fn resolve(&self) -> Option<SeriesConfig> {
        if self.data_key.is_empty() {
            return None;
        }
        Some(SeriesConfig {
            key: self.data_key.clone(),
            color: self.stroke.or(self.fill).unwrap_or(Color::CHART_LINE_PRIMARY),
            stroke_width: self
                .stroke_width
                .filter(|w| w.is_finite() && *w > 0.0)
                .unwrap_or(DEFAULT_STROKE_WIDTH),
        })
    }
}

/// Ordered series configs for the declared children.
/// Children without a resolvable key are skipped; a repeated key keeps its first declaration.
pub fn extract_series(children: &[ChartChild]) -> Vec<SeriesConfig> {
    let mut out: Vec<SeriesConfig> = Vec::new();
    for child in children {
        let Some(config) = child.series_decl().and_then(|decl| decl.resolve()) else {
            continue;
        };
        if out.iter().any(|existing| existing.key == config.key) {
            debug!(key = %config.key, "duplicate series key ignored");
            continue;
        }
        out.push(config);
    }
    out
}
