// File: crates/area-chart-core/src/context.rs
// Summary: Per-render computed state handed to every decoration, plus the commands decorations may dispatch.

use std::cell::RefCell;
use std::time::Duration;

use crate::data::{Row, Timeline};
use crate::geometry::Rect;
use crate::interaction::{Selection, TooltipData};
use crate::scale::{TimeScale, ValueScale};
use crate::series::SeriesConfig;
use crate::timer::CubicBezier;
use crate::types::Margin;

/// Extra height of the reveal clip below the plot, so strokes on the baseline are not cut.
const REVEAL_CLIP_OVERHANG: f64 = 20.0;

/// State changes requested by decorations during a render pass.
/// The chart applies them after the pass, in dispatch order.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartCommand {
    SetTooltip(Option<TooltipData>),
    ClearSelection,
}

/// Read-only bundle of everything a decoration needs, built once per render.
#[derive(Debug)]
pub struct ChartComputedState<'a> {
    pub rows: &'a [Row],
    pub x_key: &'a str,
    pub timeline: &'a Timeline,
    pub x_scale: &'a TimeScale,
    pub y_scale: &'a ValueScale,
    pub series: &'a [SeriesConfig],
    pub width: f64,
    pub height: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    pub margin: Margin,
    /// Spacing between consecutive rows; 0 with fewer than two rows.
    pub column_width: f64,
    pub tooltip: Option<&'a TooltipData>,
    pub selection: Option<&'a Selection>,
    /// True once the reveal animation has finished.
    pub is_loaded: bool,
    /// Linear reveal progress in `[0, 1]`.
    pub reveal_progress: f64,
    pub animation_duration: Duration,
    /// Short date label per row ("Jan 8"); empty for rows without a valid date.
    pub date_labels: &'a [String],
    pub(crate) commands: RefCell<Vec<ChartCommand>>,
}

impl<'a> ChartComputedState<'a> {
    /// Plot-relative x of a row, if its date resolved.
    pub fn x_px(&self, row_index: usize) -> Option<f64> {
        self.timeline.timestamp_of(row_index).map(|t| self.x_scale.to_px(t))
    }

    pub fn y_px(&self, value: f64) -> f64 {
        self.y_scale.to_px(value)
    }

    pub fn date_label(&self, row_index: usize) -> &str {
        self.date_labels.get(row_index).map(String::as_str).unwrap_or("")
    }

    pub fn series_config(&self, key: &str) -> Option<&SeriesConfig> {
        self.series.iter().find(|s| s.key == key)
    }

    /// Clip rectangle of the growth animation: eased from zero to the full plot width.
    pub fn reveal_clip(&self) -> Rect {
        let width = if self.is_loaded {
            self.inner_width
        } else {
            self.inner_width * CubicBezier::REVEAL.ease(self.reveal_progress)
        };
        Rect::from_xywh(0.0, 0.0, width, self.inner_height + REVEAL_CLIP_OVERHANG)
    }

    /// Plot area in plot-relative coordinates.
    pub fn plot_rect(&self) -> Rect {
        Rect::from_xywh(0.0, 0.0, self.inner_width, self.inner_height)
    }

    pub fn set_tooltip(&self, tooltip: Option<TooltipData>) {
        self.commands.borrow_mut().push(ChartCommand::SetTooltip(tooltip));
    }

    pub fn clear_selection(&self) {
        self.commands.borrow_mut().push(ChartCommand::ClearSelection);
    }

    /// Commands dispatched so far.
    pub fn into_commands(self) -> Vec<ChartCommand> {
        self.commands.into_inner()
    }
}
