// File: crates/area-chart-core/src/interaction.rs
// Summary: Pointer interaction controller: nearest-point lookup, tooltip state, drag selection.
// Notes:
// - Phases: Idle -> Hovering (move) -> Dragging (down) -> Hovering (up); leave returns to Idle.
// - Every handler is a full recomputation from the current pointer position (last write wins).
// - All handlers no-op while `can_interact` is false or the pointer cannot be mapped
//   into the surface's local coordinates.

use tracing::{debug, trace};

use crate::data::{Row, Timeline};
use crate::geometry::Point;
use crate::scale::{TimeScale, ValueScale};
use crate::series::SeriesConfig;
use crate::types::Margin;

/// 2x3 affine matrix `[a c e; b d f]` mapping surface-local coordinates to screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl SurfaceTransform {
    pub const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    /// Surface placed at (dx, dy) on screen, e.g. after layout and scrolling.
    pub const fn translate(dx: f64, dy: f64) -> Self {
        Self { e: dx, f: dy, ..Self::IDENTITY }
    }

    /// Uniform or anisotropic scale about the origin (CSS transforms, zoom).
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self { a: sx, d: sy, ..Self::IDENTITY }
    }

    /// `self` followed by `next`.
    pub fn then(&self, next: &Self) -> Self {
        Self {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            e: next.a * self.e + next.c * self.f + next.e,
            f: next.b * self.e + next.d * self.f + next.f,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(self.a * p.x + self.c * p.y + self.e, self.b * p.x + self.d * p.y + self.f)
    }

    /// None when the matrix is singular or not finite.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = Self {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        };
        [inv.a, inv.b, inv.c, inv.d, inv.e, inv.f]
            .iter()
            .all(|v| v.is_finite())
            .then_some(inv)
    }
}

/// Pointer position in screen (client) coordinates, with the surface's screen CTM.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub client: Point,
    /// None when the surface is detached and its coordinate system is unknown.
    pub ctm: Option<SurfaceTransform>,
}

impl PointerInput {
    pub fn new(client: Point, ctm: Option<SurfaceTransform>) -> Self {
        Self { client, ctm }
    }

    /// Pointer over a surface whose local space equals screen space.
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y), Some(SurfaceTransform::IDENTITY))
    }

    /// Surface-local position.
    pub fn local(&self) -> Option<Point> {
        let inv = self.ctm?.inverse()?;
        Some(inv.apply(self.client))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Move(PointerInput),
    Down(PointerInput),
    Up,
    Leave,
}

/// Hovered row and its pixel positions.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipData {
    pub point: Row,
    pub index: usize,
    /// Plot-relative x of the row.
    pub x_px: f64,
    /// Plot-relative y per series, in series order; series without a value are absent.
    pub y_positions: Vec<(String, f64)>,
}

impl TooltipData {
    pub fn y_for(&self, key: &str) -> Option<f64> {
        self.y_positions.iter().find(|(k, _)| k == key).map(|&(_, y)| y)
    }
}

/// Normalized drag selection: `start_px <= end_px` and `start_index <= end_index`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    pub active: bool,
    pub start_px: f64,
    pub end_px: f64,
    pub start_index: usize,
    pub end_index: usize,
}

impl Selection {
    /// Selection spanning an anchor and the current position, in either order.
    pub fn spanning(anchor_px: f64, anchor_index: usize, current_px: f64, current_index: usize) -> Self {
        Self {
            active: true,
            start_px: anchor_px.min(current_px),
            end_px: anchor_px.max(current_px),
            start_index: anchor_index.min(current_index),
            end_index: anchor_index.max(current_index),
        }
    }

    pub fn width_px(&self) -> f64 {
        self.end_px - self.start_px
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Hovering,
    /// Anchor of the live gesture, plot-relative.
    Dragging { anchor_px: f64, anchor_index: usize },
}

/// Everything the lookup needs from the current render.
#[derive(Clone, Copy, Debug)]
pub struct InteractionFrame<'a> {
    pub rows: &'a [Row],
    pub timeline: &'a Timeline,
    pub x_scale: &'a TimeScale,
    pub y_scale: &'a ValueScale,
    pub series: &'a [SeriesConfig],
    pub margin: Margin,
}

/// Resolve the row nearest to a plot-relative pointer x.
/// Bisects the timeline; equidistant neighbours resolve to the later row.
pub fn find_nearest_point(frame: &InteractionFrame<'_>, pointer_x: f64) -> Option<TooltipData> {
    let t = frame.x_scale.from_px(pointer_x);
    let (ts, index) = frame.timeline.nearest(t)?;
    let row = frame.rows.get(index)?;
    let y_positions = frame
        .series
        .iter()
        .filter_map(|s| row.number(&s.key).map(|v| (s.key.clone(), frame.y_scale.to_px(v))))
        .collect();
    Some(TooltipData {
        point: row.clone(),
        index,
        x_px: frame.x_scale.to_px(ts),
        y_positions,
    })
}

/// Owns tooltip and selection state for one chart.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    phase: Phase,
    tooltip: Option<TooltipData>,
    selection: Option<Selection>,
    can_interact: bool,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase { self.phase }
    pub fn tooltip(&self) -> Option<&TooltipData> { self.tooltip.as_ref() }
    pub fn selection(&self) -> Option<&Selection> { self.selection.as_ref() }
    pub fn can_interact(&self) -> bool { self.can_interact }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    pub fn set_can_interact(&mut self, can_interact: bool) {
        self.can_interact = can_interact;
    }

    /// Dispatch one pointer event. Returns true when tooltip or selection changed.
    pub fn handle(&mut self, frame: &InteractionFrame<'_>, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Move(input) => self.pointer_move(frame, input),
            PointerEvent::Down(input) => self.pointer_down(frame, input),
            PointerEvent::Up => self.pointer_up(),
            PointerEvent::Leave => self.pointer_leave(),
        }
    }

    pub fn pointer_move(&mut self, frame: &InteractionFrame<'_>, input: PointerInput) -> bool {
        let Some(pointer_x) = self.plot_x(frame, input) else {
            return false;
        };
        let nearest = find_nearest_point(frame, pointer_x);
        trace!(pointer_x, index = ?nearest.as_ref().map(|n| n.index), "pointer move");

        let before = (self.tooltip.clone(), self.selection);
        let current_index = nearest.as_ref().map(|n| n.index).unwrap_or(0);
        if let Some(nearest) = nearest {
            self.tooltip = Some(nearest);
        }

        match self.phase {
            Phase::Dragging { anchor_px, anchor_index } => {
                let selection = Selection::spanning(anchor_px, anchor_index, pointer_x, current_index);
                debug!(
                    start = selection.start_index,
                    end = selection.end_index,
                    "selection updated"
                );
                self.selection = Some(selection);
            }
            Phase::Idle | Phase::Hovering => self.phase = Phase::Hovering,
        }
        before != (self.tooltip.clone(), self.selection)
    }

    /// Starts a drag gesture. The selection appears on the next move.
    pub fn pointer_down(&mut self, frame: &InteractionFrame<'_>, input: PointerInput) -> bool {
        let Some(pointer_x) = self.plot_x(frame, input) else {
            return false;
        };
        let anchor_index = find_nearest_point(frame, pointer_x).map(|n| n.index).unwrap_or(0);
        trace!(pointer_x, anchor_index, "drag start");
        self.phase = Phase::Dragging { anchor_px: pointer_x, anchor_index };
        false
    }

    /// Ends the gesture only; the selection stays until cleared.
    pub fn pointer_up(&mut self) -> bool {
        if !self.can_interact {
            return false;
        }
        if self.is_dragging() {
            trace!("drag end");
            self.phase = Phase::Hovering;
        }
        false
    }

    /// Clears the tooltip and ends any live gesture; the selection stays.
    pub fn pointer_leave(&mut self) -> bool {
        if !self.can_interact {
            return false;
        }
        self.phase = Phase::Idle;
        self.tooltip.take().is_some()
    }

    pub fn clear_selection(&mut self) -> bool {
        self.selection.take().is_some()
    }

    /// Abandon any live gesture without touching tooltip or selection.
    pub fn reset_gesture(&mut self) {
        self.phase = Phase::Idle;
    }

    pub fn set_tooltip(&mut self, tooltip: Option<TooltipData>) {
        self.tooltip = tooltip;
    }

    /// Plot-relative pointer x, or None when gated or unmappable.
    fn plot_x(&self, frame: &InteractionFrame<'_>, input: PointerInput) -> Option<f64> {
        if !self.can_interact {
            return None;
        }
        let local = input.local()?;
        Some(local.x - frame.margin.left)
    }
}
