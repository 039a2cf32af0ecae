// File: crates/area-chart-core/src/decorations/tooltip.rs
// Summary: Hover tooltip: crosshair, per-series dots and a label box with the row's date and values.

use crate::context::ChartComputedState;
use crate::decoration::Decoration;
use crate::geometry::{Point, Rect};
use crate::scene::{Color, RenderCommand, Scene, Stroke, TextAnchor};

const DOT_RADIUS: f64 = 4.5;
const BOX_PADDING: f64 = 8.0;
const LINE_HEIGHT: f64 = 16.0;
const FONT_SIZE: f32 = 11.0;
/// Rough glyph advance used to size the label box without a font.
const CHAR_WIDTH: f64 = 6.5;
const BOX_OFFSET: f64 = 12.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ChartTooltip {
    crosshair: Option<Stroke>,
    show_dots: bool,
    show_box: bool,
}

impl Default for ChartTooltip {
    fn default() -> Self {
        Self {
            crosshair: Some(Stroke::dashed(Color::CROSSHAIR, 1.0, 3.0, 3.0)),
            show_dots: true,
            show_box: true,
        }
    }
}

impl ChartTooltip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn crosshair(mut self, stroke: Option<Stroke>) -> Self {
        self.crosshair = stroke;
        self
    }

    pub fn dots(mut self, on: bool) -> Self {
        self.show_dots = on;
        self
    }

    pub fn label_box(mut self, on: bool) -> Self {
        self.show_box = on;
        self
    }

    fn lines(ctx: &ChartComputedState<'_>, index: usize) -> Vec<(String, Color)> {
        let mut lines = vec![(ctx.date_label(index).to_string(), Color::WHITE)];
        let Some(row) = ctx.rows.get(index) else { return lines };
        for s in ctx.series {
            if let Some(v) = row.number(&s.key) {
                lines.push((format!("{}: {}", s.key, format_value(v)), s.color));
            }
        }
        lines
    }
}

impl Decoration for ChartTooltip {
    fn id(&self) -> &'static str { "tooltip" }

    fn render(&self, ctx: &ChartComputedState<'_>, scene: &mut Scene) {
        let Some(tooltip) = ctx.tooltip else { return };
        let x = tooltip.x_px;

        if let Some(stroke) = self.crosshair {
            scene.push(RenderCommand::Line {
                from: Point::new(x, 0.0),
                to: Point::new(x, ctx.inner_height),
                stroke,
            });
        }

        if self.show_dots {
            for (key, y) in &tooltip.y_positions {
                let color = ctx.series_config(key).map(|s| s.color).unwrap_or(Color::CHART_LINE_PRIMARY);
                scene.push(RenderCommand::Circle {
                    center: Point::new(x, *y),
                    radius: DOT_RADIUS,
                    fill: color,
                    stroke: Some(Stroke::solid(Color::WHITE, 2.0)),
                });
            }
        }

        if !self.show_box {
            return;
        }
        let lines = Self::lines(ctx, tooltip.index);
        let longest = lines.iter().map(|(t, _)| t.chars().count()).max().unwrap_or(0);
        let width = longest as f64 * CHAR_WIDTH + 2.0 * BOX_PADDING;
        let height = lines.len() as f64 * LINE_HEIGHT + BOX_PADDING;

        let top = BOX_PADDING;
        let mut rect = Rect::from_xywh(x + BOX_OFFSET, top, width, height);
        // Flip to the left of the crosshair when the box would overflow the plot.
        if rect.right() > ctx.inner_width {
            rect.x = x - BOX_OFFSET - width;
        }
        let left = rect.x;
        scene.push(RenderCommand::Rect {
            rect,
            fill: Color::TOOLTIP_BACKGROUND,
            stroke: None,
        });
        for (i, (text, color)) in lines.into_iter().enumerate() {
            scene.push(RenderCommand::Text {
                position: Point::new(left + BOX_PADDING, top + LINE_HEIGHT * (i as f64 + 1.0)),
                text,
                size: FONT_SIZE,
                color,
                anchor: TextAnchor::Start,
            });
        }
    }
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}
