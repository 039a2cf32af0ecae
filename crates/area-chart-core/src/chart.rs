// File: crates/area-chart-core/src/chart.rs
// Summary: Chart declaration and the mounted chart instance (layout, reveal timer, render passes, pointer dispatch).
// Notes:
// - The instance is driven cooperatively: callers pass the current `Instant` to
//   `observe_resize`, `advance`, `handle` and `render`; pending deferrals fire there.
// - Render order: background, under-layer children, pointer-capture rect, over-layer children.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};
use tracing::debug;

use crate::context::{ChartCommand, ChartComputedState};
use crate::data::{Row, Timeline};
use crate::decoration::{ChartChild, Decoration};
use crate::geometry::Rect;
use crate::interaction::{InteractionController, InteractionFrame, PointerEvent, Selection, TooltipData};
use crate::scale::{build_y_scale, TimeScale, ValueScale};
use crate::scene::{Color, RenderCommand, Scene};
use crate::series::{extract_series, SeriesConfig};
use crate::timer::{Debouncer, OneShot};
use crate::types::{AspectRatio, ChartOptions, Margin, Size, RESIZE_DEBOUNCE};

/// Short axis/tooltip date format, e.g. `Jan 8`.
const DATE_LABEL_FORMAT: &str = "%b %-d";

/// Declarative chart: rows, options and child elements. Mount it to get a live instance.
#[derive(Debug, Default)]
pub struct AreaChart {
    rows: Vec<Row>,
    options: ChartOptions,
    children: Vec<ChartChild>,
}

impl AreaChart {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows, ..Self::default() }
    }

    pub fn options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    pub fn x_key(mut self, key: impl Into<String>) -> Self {
        self.options.x_key = key.into();
        self
    }

    pub fn margin(mut self, margin: Margin) -> Self {
        self.options.margin = margin;
        self
    }

    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.options.animation_duration_ms = duration.as_millis() as u64;
        self
    }

    pub fn aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.options.aspect_ratio = ratio;
        self
    }

    pub fn child(mut self, child: ChartChild) -> Self {
        self.children.push(child);
        self
    }

    /// Add a series-tagged child.
    pub fn series(self, element: impl Decoration + 'static) -> Self {
        self.child(ChartChild::series(element))
    }

    /// Add a decoration drawn beneath the pointer-capture layer.
    pub fn under(self, element: impl Decoration + 'static) -> Self {
        self.child(ChartChild::under(element))
    }

    /// Add a decoration drawn above the pointer-capture layer.
    pub fn over(self, element: impl Decoration + 'static) -> Self {
        self.child(ChartChild::over(element))
    }

    pub fn mount(self, now: Instant) -> ChartInstance {
        ChartInstance::mount(self, now)
    }
}

/// Pointer cursor the host should show over the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Crosshair,
}

/// A mounted chart. Owns every piece of derived and interaction state; nothing is shared.
#[derive(Debug)]
pub struct ChartInstance {
    rows: Vec<Row>,
    options: ChartOptions,
    children: Vec<ChartChild>,

    series: Vec<SeriesConfig>,
    timeline: Timeline,
    date_labels: Vec<String>,
    size: Size,
    x_scale: TimeScale,
    y_scale: ValueScale,

    controller: InteractionController,
    resize: Debouncer<Size>,
    reveal: OneShot,
    mounted_at: Instant,
    is_loaded: bool,
    mounted: bool,
}

impl ChartInstance {
    /// Mount a chart. The container is unmeasured until the first `observe_resize` settles.
    pub fn mount(chart: AreaChart, now: Instant) -> Self {
        let AreaChart { rows, options, children } = chart;
        let reveal = OneShot::armed(now, options.animation_duration());
        let mut instance = Self {
            rows,
            options,
            children,
            series: Vec::new(),
            timeline: Timeline::default(),
            date_labels: Vec::new(),
            size: Size::default(),
            x_scale: TimeScale::new((0.0, 0.0), (0.0, 0.0)),
            y_scale: ValueScale::new((0.0, 0.0), (0.0, 0.0)),
            controller: InteractionController::new(),
            resize: Debouncer::new(RESIZE_DEBOUNCE),
            reveal,
            mounted_at: now,
            is_loaded: false,
            mounted: true,
        };
        instance.series = extract_series(&instance.children);
        instance.rebuild_rows();
        debug!(
            rows = instance.rows.len(),
            series = instance.series.len(),
            duration_ms = instance.options.animation_duration_ms,
            "chart mounted"
        );
        // A zero-length reveal completes immediately.
        instance.advance(now);
        instance
    }

    /// Tear down: pending timers are dropped and every later call is a no-op.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.reveal.cancel();
        self.resize.cancel();
        debug!("chart unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // ----- Prop updates ---------------------------------------------------

    /// Replace the rows. Tooltip, selection and any live drag refer to row indices and are dropped.
    pub fn update_rows(&mut self, rows: Vec<Row>) {
        if !self.mounted {
            return;
        }
        self.rows = rows;
        self.controller.reset_gesture();
        self.controller.set_tooltip(None);
        self.controller.clear_selection();
        self.rebuild_rows();
    }

    /// Replace the declared children; the series list is re-derived before the next render.
    pub fn update_children(&mut self, children: Vec<ChartChild>) {
        if !self.mounted {
            return;
        }
        self.children = children;
        self.series = extract_series(&self.children);
        self.rebuild_scales();
    }

    pub fn update_margin(&mut self, margin: Margin) {
        if !self.mounted {
            return;
        }
        self.options.margin = margin;
        self.rebuild_scales();
    }

    // ----- Timers ---------------------------------------------------------

    /// Record a container width measurement; applied once measurements stop for the debounce delay.
    pub fn observe_resize(&mut self, width: f64, now: Instant) {
        if !self.mounted {
            return;
        }
        self.advance(now);
        self.resize.push(self.options.aspect_ratio.size_for_width(width), now);
    }

    /// Fire due deferrals. Returns true when anything visible changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        if !self.mounted {
            return false;
        }
        let mut changed = false;
        if let Some(size) = self.resize.poll(now) {
            if size != self.size {
                debug!(width = size.width, height = size.height, "container resized");
                self.size = size;
                self.rebuild_scales();
                changed = true;
            }
        }
        if self.reveal.fire_if_due(now) {
            debug!("reveal complete, interaction enabled");
            self.is_loaded = true;
            self.controller.set_can_interact(true);
            changed = true;
        }
        changed
    }

    // ----- Interaction ----------------------------------------------------

    /// Dispatch a pointer event over the plot. Returns true when tooltip or selection changed.
    pub fn handle(&mut self, event: PointerEvent, now: Instant) -> bool {
        self.advance(now);
        if !self.mounted {
            return false;
        }
        // Gesture endings need no surface; a shrunken chart must still drop its hover and drag.
        match event {
            PointerEvent::Up => return self.controller.pointer_up(),
            PointerEvent::Leave => return self.controller.pointer_leave(),
            PointerEvent::Move(_) | PointerEvent::Down(_) => {}
        }
        if !self.has_interactive_surface() {
            return false;
        }
        let frame = InteractionFrame {
            rows: &self.rows,
            timeline: &self.timeline,
            x_scale: &self.x_scale,
            y_scale: &self.y_scale,
            series: &self.series,
            margin: self.options.margin,
        };
        self.controller.handle(&frame, event)
    }

    pub fn clear_selection(&mut self) -> bool {
        self.controller.clear_selection()
    }

    pub fn set_tooltip(&mut self, tooltip: Option<TooltipData>) {
        self.controller.set_tooltip(tooltip);
    }

    pub fn tooltip(&self) -> Option<&TooltipData> { self.controller.tooltip() }
    pub fn selection(&self) -> Option<&Selection> { self.controller.selection() }
    pub fn controller(&self) -> &InteractionController { &self.controller }
    pub fn can_interact(&self) -> bool { self.controller.can_interact() }
    pub fn is_loaded(&self) -> bool { self.is_loaded }

    pub fn cursor(&self) -> Cursor {
        if self.can_interact() { Cursor::Crosshair } else { Cursor::Default }
    }

    // ----- Derived state --------------------------------------------------

    pub fn rows(&self) -> &[Row] { &self.rows }
    pub fn options(&self) -> &ChartOptions { &self.options }
    pub fn series(&self) -> &[SeriesConfig] { &self.series }
    pub fn size(&self) -> Size { self.size }
    pub fn x_scale(&self) -> &TimeScale { &self.x_scale }
    pub fn y_scale(&self) -> &ValueScale { &self.y_scale }
    pub fn date_labels(&self) -> &[String] { &self.date_labels }

    pub fn inner_width(&self) -> f64 {
        (self.size.width - self.options.margin.hsum()).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.size.height - self.options.margin.vsum()).max(0.0)
    }

    /// Spacing between consecutive rows; 0 with fewer than two rows.
    pub fn column_width(&self) -> f64 {
        match self.rows.len() {
            0 | 1 => 0.0,
            n => self.inner_width() / (n - 1) as f64,
        }
    }

    /// Linear reveal progress at `now`, in `[0, 1]`.
    pub fn reveal_progress(&self, now: Instant) -> f64 {
        if self.is_loaded {
            return 1.0;
        }
        let duration = self.options.animation_duration();
        if duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.mounted_at);
        (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
    }

    /// Context bundle for decorations, or None while the container is unmeasured or too small.
    pub fn computed_state(&self, now: Instant) -> Option<ChartComputedState<'_>> {
        if !self.mounted || !self.size.is_usable() {
            return None;
        }
        Some(ChartComputedState {
            rows: &self.rows,
            x_key: &self.options.x_key,
            timeline: &self.timeline,
            x_scale: &self.x_scale,
            y_scale: &self.y_scale,
            series: &self.series,
            width: self.size.width,
            height: self.size.height,
            inner_width: self.inner_width(),
            inner_height: self.inner_height(),
            margin: self.options.margin,
            column_width: self.column_width(),
            tooltip: self.controller.tooltip(),
            selection: self.controller.selection(),
            is_loaded: self.is_loaded,
            reveal_progress: self.reveal_progress(now),
            animation_duration: self.options.animation_duration(),
            date_labels: &self.date_labels,
            commands: RefCell::new(Vec::new()),
        })
    }

    // ----- Rendering ------------------------------------------------------

    /// Build the frame at `now`. None while nothing can be drawn.
    pub fn render(&mut self, now: Instant) -> Option<Scene> {
        self.advance(now);
        let interactive = self.has_interactive_surface();
        let ctx = self.computed_state(now)?;
        let mut scene = Scene::new(ctx.width, ctx.height);

        scene.push(RenderCommand::Rect {
            rect: Rect::from_xywh(0.0, 0.0, ctx.width, ctx.height),
            fill: Color::TRANSPARENT,
            stroke: None,
        });
        let children = &self.children;
        scene.translated(ctx.margin.left, ctx.margin.top, |scene| {
            for child in children.iter().filter(|c| !c.is_over_layer()) {
                child.element().render(&ctx, scene);
            }
            if interactive {
                scene.push(RenderCommand::Rect {
                    rect: ctx.plot_rect(),
                    fill: Color::TRANSPARENT,
                    stroke: None,
                });
            }
            for child in children.iter().filter(|c| c.is_over_layer()) {
                child.element().render(&ctx, scene);
            }
        });

        let commands = ctx.into_commands();
        self.apply(commands);
        Some(scene)
    }

    fn apply(&mut self, commands: Vec<ChartCommand>) {
        for command in commands {
            match command {
                ChartCommand::SetTooltip(tooltip) => self.controller.set_tooltip(tooltip),
                ChartCommand::ClearSelection => {
                    self.controller.clear_selection();
                }
            }
        }
    }

    fn has_interactive_surface(&self) -> bool {
        self.mounted && self.size.is_usable() && !self.rows.is_empty()
    }

    fn rebuild_rows(&mut self) {
        self.timeline = Timeline::build(&self.rows, &self.options.x_key);
        self.date_labels = vec![String::new(); self.rows.len()];
        for &(t, i) in self.timeline.entries() {
            if let Some(date) = Utc.timestamp_millis_opt(t as i64).single() {
                self.date_labels[i] = date.format(DATE_LABEL_FORMAT).to_string();
            }
        }
        self.rebuild_scales();
    }

    fn rebuild_scales(&mut self) {
        self.x_scale = TimeScale::from_timeline(&self.timeline, self.inner_width());
        self.y_scale = build_y_scale(&self.rows, &self.series, self.inner_height());
    }
}

impl Drop for ChartInstance {
    fn drop(&mut self) {
        self.unmount();
    }
}
