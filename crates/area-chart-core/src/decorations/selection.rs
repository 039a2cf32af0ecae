// File: crates/area-chart-core/src/decorations/selection.rs
// Summary: Shaded band over the current drag selection.

use crate::context::ChartComputedState;
use crate::decoration::Decoration;
use crate::geometry::{clamp, Point, Rect};
use crate::scene::{Color, RenderCommand, Scene, Stroke};

#[derive(Clone, Debug, PartialEq)]
pub struct SelectionBand {
    fill: Color,
    edge: Option<Stroke>,
}

impl Default for SelectionBand {
    fn default() -> Self {
        Self { fill: Color::SELECTION, edge: Some(Stroke::solid(Color::CHART_LINE_PRIMARY, 1.0)) }
    }
}

impl SelectionBand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = color;
        self
    }

    pub fn edge(mut self, stroke: Option<Stroke>) -> Self {
        self.edge = stroke;
        self
    }
}

impl Decoration for SelectionBand {
    fn id(&self) -> &'static str { "selection-band" }

    fn render(&self, ctx: &ChartComputedState<'_>, scene: &mut Scene) {
        let Some(selection) = ctx.selection.filter(|s| s.active) else { return };
        // Drags may leave the plot; the band stays inside it.
        let left = clamp(selection.start_px, 0.0, ctx.inner_width);
        let right = clamp(selection.end_px, 0.0, ctx.inner_width);
        let rect = Rect::from_ltrb(left, 0.0, right, ctx.inner_height);
        scene.push(RenderCommand::Rect { rect, fill: self.fill, stroke: None });
        if let Some(stroke) = self.edge {
            for x in [left, right] {
                scene.push(RenderCommand::Line {
                    from: Point::new(x, 0.0),
                    to: Point::new(x, ctx.inner_height),
                    stroke,
                });
            }
        }
    }
}
