// File: crates/area-chart-core/src/decorations/area.rs
// Summary: Area series: filled region under a line, grown in by the reveal clip.

use crate::context::ChartComputedState;
use crate::decoration::Decoration;
use crate::geometry::Point;
use crate::scene::{Color, RenderCommand, Scene, Stroke};
use crate::series::SeriesDecl;

/// Fill opacity applied to the stroke color when no fill is declared.
const DEFAULT_FILL_OPACITY: f32 = 0.2;

#[derive(Clone, Debug, PartialEq)]
pub struct Area {
    decl: SeriesDecl,
    fill_opacity: f32,
}

impl Area {
    pub fn new(data_key: impl Into<String>) -> Self {
        Self { decl: SeriesDecl::new(data_key), fill_opacity: DEFAULT_FILL_OPACITY }
    }

    pub fn stroke(mut self, color: Color) -> Self {
        self.decl = self.decl.with_stroke(color);
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.decl = self.decl.with_fill(color);
        self
    }

    pub fn stroke_width(mut self, width: f32) -> Self {
        self.decl = self.decl.with_stroke_width(width);
        self
    }

    pub fn fill_opacity(mut self, opacity: f32) -> Self {
        self.fill_opacity = opacity;
        self
    }

    /// Plot-relative points for rows carrying both a valid date and a value.
    fn points(&self, ctx: &ChartComputedState<'_>) -> Vec<Point> {
        ctx.timeline
            .entries()
            .iter()
            .filter_map(|&(t, i)| {
                let v = ctx.rows.get(i)?.number(&self.decl.data_key)?;
                Some(Point::new(ctx.x_scale.to_px(t), ctx.y_px(v)))
            })
            .collect()
    }
}

impl Decoration for Area {
    fn id(&self) -> &'static str { "area" }

    fn series(&self) -> Option<SeriesDecl> {
        Some(self.decl.clone())
    }

    fn render(&self, ctx: &ChartComputedState<'_>, scene: &mut Scene) {
        let Some(config) = ctx.series_config(&self.decl.data_key) else { return };
        let points = self.points(ctx);
        if points.is_empty() {
            return;
        }
        let fill = self.decl.fill.unwrap_or(config.color).with_opacity(self.fill_opacity);
        let stroke = Stroke::solid(config.color, config.stroke_width);
        let baseline = ctx.y_px(0.0);

        scene.clipped(ctx.reveal_clip(), |scene| {
            scene.push(RenderCommand::Area { points: points.clone(), baseline, fill });
            if points.len() == 1 {
                scene.push(RenderCommand::Circle {
                    center: points[0],
                    radius: f64::from(config.stroke_width) * 1.5,
                    fill: config.color,
                    stroke: None,
                });
            } else {
                scene.push(RenderCommand::Polyline { points, stroke });
            }
        });
    }
}
