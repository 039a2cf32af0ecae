// File: crates/area-chart-core/src/decorations/markers.rs
// Summary: Event markers pinned to rows, drawn above the pointer-capture layer.

use crate::context::ChartComputedState;
use crate::decoration::Decoration;
use crate::geometry::Point;
use crate::scene::{Color, RenderCommand, Scene, Stroke, TextAnchor};

const MARKER_RADIUS: f64 = 4.0;

/// One annotated row.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub index: usize,
    pub label: String,
    pub color: Color,
}

impl Marker {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self { index, label: label.into(), color: Color::CHART_LINE_PRIMARY }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartMarkers {
    markers: Vec<Marker>,
}

impl ChartMarkers {
    pub fn new(markers: Vec<Marker>) -> Self {
        Self { markers }
    }

    pub fn push(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl Decoration for ChartMarkers {
    fn id(&self) -> &'static str { "markers" }

    fn render(&self, ctx: &ChartComputedState<'_>, scene: &mut Scene) {
        // Hidden during the reveal so markers do not float ahead of the series.
        if !ctx.is_loaded {
            return;
        }
        for marker in &self.markers {
            let Some(x) = ctx.x_px(marker.index) else { continue };
            scene.push(RenderCommand::Line {
                from: Point::new(x, 0.0),
                to: Point::new(x, ctx.inner_height),
                stroke: Stroke::dashed(marker.color, 1.0, 2.0, 3.0),
            });
            scene.push(RenderCommand::Circle {
                center: Point::new(x, ctx.inner_height),
                radius: MARKER_RADIUS,
                fill: marker.color,
                stroke: Some(Stroke::solid(Color::WHITE, 1.5)),
            });
            if !marker.label.is_empty() {
                scene.push(RenderCommand::Text {
                    position: Point::new(x, -6.0),
                    text: marker.label.clone(),
                    size: 10.0,
                    color: marker.color,
                    anchor: TextAnchor::Middle,
                });
            }
        }
    }
}
