// File: crates/demo/src/session.rs
// Summary: Scripted pointer session over a mounted chart on a simulated clock, collecting named frames.

use std::time::{Duration, Instant};

use area_chart::{ChartInstance, PointerEvent, PointerInput, Scene};
use tracing::info;

/// Pointer script, in fractions of the plot width.
#[derive(Clone, Debug, PartialEq)]
pub struct Script {
    pub hover: f64,
    pub select: Option<(f64, f64)>,
}

pub struct Frame {
    pub name: &'static str,
    pub scene: Scene,
}

/// Drive `chart` through measurement, the reveal, a hover and an optional drag.
pub fn replay(chart: &mut ChartInstance, t0: Instant, width: f64, script: &Script) -> Vec<Frame> {
    let mut frames = Vec::new();
    let mut clock = t0;
    let mut tick = |by: Duration| {
        clock += by;
        clock
    };

    chart.observe_resize(width, t0);
    let duration = chart.options().animation_duration();
    let now = tick(Duration::from_millis(20));
    chart.advance(now);

    let mid = tick(duration / 2);
    if let Some(scene) = chart.render(mid) {
        frames.push(Frame { name: "reveal", scene });
    }

    let settled = tick(duration);
    chart.advance(settled);
    info!(can_interact = chart.can_interact(), "reveal finished");

    let margin = chart.options().margin;
    let inner = chart.inner_width();
    let at = |fraction: f64| PointerInput::at(margin.left + inner * fraction.clamp(0.0, 1.0), margin.top + 10.0);

    let now = tick(Duration::from_millis(16));
    chart.handle(PointerEvent::Move(at(script.hover)), now);
    if let Some(tip) = chart.tooltip() {
        let label = chart.date_labels().get(tip.index).cloned().unwrap_or_default();
        info!(index = tip.index, date = %label, "hovering");
    }
    if let Some(scene) = chart.render(now) {
        frames.push(Frame { name: "hover", scene });
    }

    if let Some((from, to)) = script.select {
        let now = tick(Duration::from_millis(16));
        chart.handle(PointerEvent::Down(at(from)), now);
        for step in 1..=8 {
            let f = from + (to - from) * step as f64 / 8.0;
            chart.handle(PointerEvent::Move(at(f)), tick(Duration::from_millis(16)));
        }
        let now = tick(Duration::from_millis(16));
        chart.handle(PointerEvent::Up, now);
        if let Some(s) = chart.selection() {
            info!(start = s.start_index, end = s.end_index, "selection");
        }
        if let Some(scene) = chart.render(now) {
            frames.push(Frame { name: "select", scene });
        }
    }

    frames
}
