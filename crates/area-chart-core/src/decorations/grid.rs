// File: crates/area-chart-core/src/decorations/grid.rs
// Summary: Grid lines at the value scale's ticks, optionally one vertical line per row.

use crate::context::ChartComputedState;
use crate::decoration::Decoration;
use crate::geometry::Point;
use crate::scene::{Color, RenderCommand, Scene, Stroke, TextAnchor};

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    horizontal: bool,
    vertical: bool,
    tick_count: usize,
    stroke: Stroke,
    labels: bool,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            horizontal: true,
            vertical: false,
            tick_count: 5,
            stroke: Stroke::dashed(Color::GRID, 1.0, 4.0, 4.0),
            labels: true,
        }
    }
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn horizontal(mut self, on: bool) -> Self {
        self.horizontal = on;
        self
    }

    pub fn vertical(mut self, on: bool) -> Self {
        self.vertical = on;
        self
    }

    pub fn tick_count(mut self, count: usize) -> Self {
        self.tick_count = count;
        self
    }

    pub fn stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    /// Draw tick values left of the plot.
    pub fn labels(mut self, on: bool) -> Self {
        self.labels = on;
        self
    }
}

impl Decoration for Grid {
    fn id(&self) -> &'static str { "grid" }

    fn render(&self, ctx: &ChartComputedState<'_>, scene: &mut Scene) {
        if self.horizontal {
            for tick in ctx.y_scale.ticks(self.tick_count) {
                let y = ctx.y_px(tick);
                scene.push(RenderCommand::Line {
                    from: Point::new(0.0, y),
                    to: Point::new(ctx.inner_width, y),
                    stroke: self.stroke,
                });
                if self.labels {
                    scene.push(RenderCommand::Text {
                        position: Point::new(-8.0, y + 4.0),
                        text: format_tick(tick),
                        size: 11.0,
                        color: Color::LABEL,
                        anchor: TextAnchor::End,
                    });
                }
            }
        }
        // Column lines need spacing; single-point charts skip them.
        if self.vertical && ctx.column_width > 0.0 {
            for &(t, _) in ctx.timeline.entries() {
                let x = ctx.x_scale.to_px(t);
                scene.push(RenderCommand::Line {
                    from: Point::new(x, 0.0),
                    to: Point::new(x, ctx.inner_height),
                    stroke: self.stroke,
                });
            }
        }
    }
}

fn format_tick(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        let s = format!("{v:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
