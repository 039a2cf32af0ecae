// File: crates/area-chart-core/tests/chart.rs
// Purpose: Mounted chart lifecycle: measurement, reveal gating, render passes, context, teardown.

mod common;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use area_chart::{
    Area, AreaChart, AspectRatio, ChartChild, ChartComputedState, Color, Cursor, Decoration, Margin, Point,
    PointerEvent, PointerInput, Rect, RenderCommand, Row, Scene, Size, TextAnchor,
};
use common::{mounted, ms, rows, weekly_rows};

/// Writes its name into the scene so pass order can be asserted.
struct Tag(&'static str);

impl Decoration for Tag {
    fn id(&self) -> &'static str { self.0 }

    fn render(&self, _ctx: &ChartComputedState<'_>, scene: &mut Scene) {
        scene.push(RenderCommand::Text {
            position: Point::new(0.0, 0.0),
            text: self.0.to_string(),
            size: 10.0,
            color: Color::LABEL,
            anchor: TextAnchor::Start,
        });
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Seen {
    inner: (f64, f64),
    column_width: f64,
    is_loaded: bool,
    label: String,
    series: usize,
}

/// Records what the context exposed on the last render.
struct Recorder(Rc<RefCell<Option<Seen>>>);

impl Decoration for Recorder {
    fn id(&self) -> &'static str { "recorder" }

    fn render(&self, ctx: &ChartComputedState<'_>, _scene: &mut Scene) {
        *self.0.borrow_mut() = Some(Seen {
            inner: (ctx.inner_width, ctx.inner_height),
            column_width: ctx.column_width,
            is_loaded: ctx.is_loaded,
            label: ctx.date_label(1).to_string(),
            series: ctx.series.len(),
        });
    }
}

struct ClearsSelection;

impl Decoration for ClearsSelection {
    fn id(&self) -> &'static str { "clears-selection" }

    fn render(&self, ctx: &ChartComputedState<'_>, _scene: &mut Scene) {
        if ctx.selection.is_some() {
            ctx.clear_selection();
        }
    }
}

struct HidesTooltip;

impl Decoration for HidesTooltip {
    fn id(&self) -> &'static str { "hides-tooltip" }

    fn render(&self, ctx: &ChartComputedState<'_>, _scene: &mut Scene) {
        ctx.set_tooltip(None);
    }
}

fn move_at(plot_x: f64) -> PointerEvent {
    PointerEvent::Move(PointerInput::at(plot_x + 40.0, 60.0))
}

fn position_of(scene: &Scene, label: &str) -> Option<usize> {
    scene
        .commands()
        .iter()
        .position(|c| matches!(c, RenderCommand::Text { text, .. } if text == label))
}

fn capture_rect_position(scene: &Scene, inner: Rect) -> Option<usize> {
    scene
        .commands()
        .iter()
        .position(|c| matches!(c, RenderCommand::Rect { rect, fill, .. } if *rect == inner && *fill == Color::TRANSPARENT))
}

#[test]
fn interaction_waits_for_the_reveal() {
    let t0 = Instant::now();
    let mut chart = AreaChart::new(weekly_rows())
        .animation_duration(ms(100))
        .series(Area::new("v"))
        .mount(t0);
    chart.observe_resize(500.0, t0);
    chart.advance(t0 + ms(20));
    assert!(!chart.can_interact());
    assert_eq!(chart.cursor(), Cursor::Default);

    assert!(!chart.handle(move_at(240.0), t0 + ms(50)));
    assert!(!chart.handle(PointerEvent::Down(PointerInput::at(100.0, 60.0)), t0 + ms(60)));
    assert!(chart.tooltip().is_none());
    assert!(chart.selection().is_none());

    assert!(chart.handle(move_at(240.0), t0 + ms(150)));
    assert_eq!(chart.tooltip().map(|t| t.index), Some(1));
    assert!(chart.can_interact());
    assert!(chart.is_loaded());
    assert_eq!(chart.cursor(), Cursor::Crosshair);
}

#[test]
fn zero_duration_is_interactive_at_mount() {
    let chart = AreaChart::new(weekly_rows()).animation_duration(Duration::ZERO).mount(Instant::now());
    assert!(chart.can_interact());
}

#[test]
fn reveal_does_not_rearm_on_updates() {
    let (mut chart, t) = mounted(AreaChart::new(weekly_rows()).animation_duration(ms(10)), 500.0);
    assert!(chart.can_interact());

    chart.update_rows(rows(&[(2, 1.0), (4, 2.0)]));
    chart.update_children(vec![ChartChild::series(Area::new("v"))]);
    chart.update_margin(Margin::uniform(10.0));
    chart.advance(t + ms(500));
    assert!(chart.can_interact());
    assert!(chart.is_loaded());
}

#[test]
fn column_width_boundaries() {
    let (one, _) = mounted(AreaChart::new(rows(&[(1, 1.0)])), 480.0);
    assert_eq!(one.column_width(), 0.0);

    let five = rows(&[(1, 1.0), (2, 2.0), (3, 3.0), (4, 4.0), (5, 5.0)]);
    let (chart, _) = mounted(AreaChart::new(five), 480.0);
    assert_eq!(chart.inner_width(), 400.0);
    assert_eq!(chart.column_width(), 100.0);

    let (empty, _) = mounted(AreaChart::new(Vec::new()), 480.0);
    assert_eq!(empty.column_width(), 0.0);
}

#[test]
fn height_follows_aspect_ratio() {
    let ratio: AspectRatio = "16 / 9".parse().expect("valid ratio");
    let (chart, _) = mounted(AreaChart::new(weekly_rows()).aspect_ratio(ratio), 1600.0);
    assert_eq!(chart.size(), Size::new(1600.0, 900.0));
    assert_eq!(chart.inner_height(), 820.0);
}

#[test]
fn nothing_renders_until_measured() {
    let t0 = Instant::now();
    let mut chart = AreaChart::new(weekly_rows()).mount(t0);
    assert!(chart.render(t0).is_none());
    assert!(!chart.handle(move_at(10.0), t0 + ms(2000)));
}

#[test]
fn too_small_container_renders_nothing() {
    // Height is width / 2: 18 px wide is 9 px tall.
    let (mut chart, t) = mounted(AreaChart::new(weekly_rows()), 18.0);
    assert!(chart.render(t).is_none());
    assert!(chart.computed_state(t).is_none());

    let (mut chart, t) = mounted(AreaChart::new(weekly_rows()), 20.0);
    assert!(chart.render(t).is_some());
}

#[test]
fn resize_is_debounced() {
    let t0 = Instant::now();
    let mut chart = AreaChart::new(weekly_rows()).mount(t0);
    chart.observe_resize(300.0, t0);
    chart.observe_resize(500.0, t0 + ms(5));
    chart.advance(t0 + ms(12));
    assert_eq!(chart.size(), Size::default());

    assert!(chart.advance(t0 + ms(15)));
    assert_eq!(chart.size(), Size::new(500.0, 250.0));
    assert_eq!(chart.x_scale().range(), (0.0, 420.0));
    assert_eq!(chart.y_scale().range(), (170.0, 0.0));
}

#[test]
fn unmount_cancels_timers_and_handlers() {
    let t0 = Instant::now();
    let mut chart = AreaChart::new(weekly_rows()).animation_duration(ms(100)).mount(t0);
    chart.observe_resize(500.0, t0);
    chart.unmount();

    assert!(!chart.is_mounted());
    assert!(!chart.advance(t0 + ms(1000)));
    assert!(!chart.can_interact());
    assert_eq!(chart.size(), Size::default());
    assert!(!chart.handle(move_at(100.0), t0 + ms(1000)));
    assert!(chart.render(t0 + ms(1000)).is_none());
}

#[test]
fn layers_wrap_the_capture_rect() {
    let (mut chart, t) = mounted(
        AreaChart::new(weekly_rows())
            .over(Tag("marker"))
            .under(Tag("grid"))
            .series(Tag("series"))
            .under(Tag("band")),
        500.0,
    );
    let scene = chart.render(t).expect("measured");

    assert!(matches!(&scene.commands()[0], RenderCommand::Rect { fill, .. } if *fill == Color::TRANSPARENT));
    assert_eq!(scene.commands()[1], RenderCommand::PushTranslate { dx: 40.0, dy: 40.0 });
    assert_eq!(scene.commands().last(), Some(&RenderCommand::PopTranslate));

    let capture = capture_rect_position(&scene, Rect::from_xywh(0.0, 0.0, 420.0, 170.0)).expect("capture rect");
    let grid = position_of(&scene, "grid").expect("grid drawn");
    let series = position_of(&scene, "series").expect("series drawn");
    let band = position_of(&scene, "band").expect("band drawn");
    let marker = position_of(&scene, "marker").expect("marker drawn");
    assert!(grid < series && series < band, "under pass keeps declaration order");
    assert!(band < capture && capture < marker);
}

#[test]
fn empty_rows_have_no_interactive_surface() {
    let (mut chart, t) = mounted(AreaChart::new(Vec::new()).series(Area::new("v")), 500.0);
    let scene = chart.render(t).expect("background still renders");
    assert!(capture_rect_position(&scene, Rect::from_xywh(0.0, 0.0, 420.0, 170.0)).is_none());
    assert!(!chart.handle(move_at(100.0), t));
    assert_eq!(chart.y_scale().domain(), (0.0, 100.0));
}

#[test]
fn context_exposes_layout_and_labels() {
    let seen = Rc::new(RefCell::new(None));
    let t0 = Instant::now();
    let mut chart = AreaChart::new(weekly_rows())
        .animation_duration(ms(100))
        .series(Area::new("v"))
        .under(Recorder(Rc::clone(&seen)))
        .mount(t0);
    chart.observe_resize(500.0, t0);

    chart.render(t0 + ms(20));
    let first = seen.borrow().clone().expect("recorded");
    assert_eq!(first.inner, (420.0, 170.0));
    assert_eq!(first.column_width, 210.0);
    assert!(!first.is_loaded);
    assert_eq!(first.label, "Jan 8");
    assert_eq!(first.series, 1);

    chart.render(t0 + ms(100));
    assert!(seen.borrow().as_ref().map(|s| s.is_loaded).unwrap_or(false));
}

#[test]
fn date_labels_skip_invalid_rows() {
    let mut all = weekly_rows();
    all.push(Row::new().with("date", "never").with("v", 1.0));
    let chart = AreaChart::new(all).mount(Instant::now());
    assert_eq!(chart.date_labels(), ["Jan 1", "Jan 8", "Jan 15", ""]);
}

#[test]
fn reveal_clip_grows_with_easing() {
    let t0 = Instant::now();
    let mut chart = AreaChart::new(weekly_rows())
        .animation_duration(ms(1000))
        .series(Area::new("v"))
        .mount(t0);
    chart.observe_resize(500.0, t0);

    let clip_width = |scene: &Scene| {
        scene.commands().iter().find_map(|c| match c {
            RenderCommand::PushClip(rect) => Some((rect.width, rect.height)),
            _ => None,
        })
    };

    let early = chart.render(t0 + ms(20)).expect("measured");
    let (w, h) = clip_width(&early).expect("area clipped");
    assert!(w < 1.0);
    assert_eq!(h, 190.0);

    let mid = chart.render(t0 + ms(500)).expect("measured");
    let (w, _) = clip_width(&mid).expect("area clipped");
    assert!((w - 210.0).abs() < 0.1);

    let done = chart.render(t0 + ms(1000)).expect("measured");
    assert_eq!(clip_width(&done), Some((420.0, 190.0)));
}

#[test]
fn children_update_rederives_series_immediately() {
    let (mut chart, _) = mounted(AreaChart::new(weekly_rows()).series(Area::new("v")), 500.0);
    assert_eq!(chart.y_scale().domain(), (0.0, 22.0));

    chart.update_children(vec![ChartChild::series(Area::new("w"))]);
    let keys: Vec<_> = chart.series().iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, ["w"]);
    assert_eq!(chart.y_scale().domain(), (0.0, 100.0));
}

#[test]
fn rows_update_drops_stale_interaction_state() {
    let (mut chart, t) = mounted(AreaChart::new(weekly_rows()).animation_duration(Duration::ZERO), 500.0);
    chart.handle(PointerEvent::Down(PointerInput::at(60.0, 60.0)), t);
    chart.handle(move_at(300.0), t);
    assert!(chart.tooltip().is_some() && chart.selection().is_some());

    chart.update_rows(rows(&[(1, 1.0)]));
    assert!(chart.tooltip().is_none());
    assert!(chart.selection().is_none());
    assert_eq!(chart.date_labels(), ["Jan 1"]);
}

#[test]
fn rows_update_mid_drag_abandons_the_gesture() {
    let (mut chart, t) = mounted(AreaChart::new(weekly_rows()).animation_duration(Duration::ZERO), 500.0);
    // Anchor on the last of three rows.
    chart.handle(PointerEvent::Down(PointerInput::at(460.0, 60.0)), t);
    assert!(chart.controller().is_dragging());

    chart.update_rows(rows(&[(1, 1.0), (8, 2.0)]));
    assert!(!chart.controller().is_dragging());
    chart.handle(move_at(400.0), t);
    assert!(chart.selection().is_none());
    assert_eq!(chart.tooltip().map(|tip| tip.index), Some(1));

    chart.handle(PointerEvent::Down(PointerInput::at(40.0, 60.0)), t);
    chart.handle(move_at(420.0), t);
    let s = chart.selection().expect("fresh drag selects");
    assert_eq!((s.start_index, s.end_index), (0, 1));
    assert!(s.end_index < chart.rows().len());
}

#[test]
fn leave_ends_hover_after_the_chart_shrinks() {
    let (mut chart, t) = mounted(AreaChart::new(weekly_rows()).animation_duration(Duration::ZERO), 500.0);
    chart.handle(move_at(200.0), t);
    chart.handle(PointerEvent::Down(PointerInput::at(240.0, 60.0)), t);
    assert!(chart.tooltip().is_some() && chart.controller().is_dragging());

    chart.observe_resize(18.0, t);
    chart.advance(t + ms(20));
    assert!(chart.computed_state(t + ms(20)).is_none());
    assert!(!chart.handle(move_at(5.0), t + ms(20)));

    assert!(chart.handle(PointerEvent::Leave, t + ms(20)));
    assert!(chart.tooltip().is_none());
    assert!(!chart.controller().is_dragging());
}

#[test]
fn margin_update_relayouts() {
    let (mut chart, _) = mounted(AreaChart::new(weekly_rows()), 500.0);
    chart.update_margin(Margin::new(10.0, 20.0, 30.0, 60.0));
    assert_eq!(chart.inner_width(), 420.0);
    assert_eq!(chart.inner_height(), 210.0);
    assert_eq!(chart.y_scale().range(), (210.0, 0.0));
}

#[test]
fn decorations_dispatch_commands() {
    let (mut chart, t) = mounted(
        AreaChart::new(weekly_rows())
            .animation_duration(Duration::ZERO)
            .over(ClearsSelection)
            .over(HidesTooltip),
        500.0,
    );
    chart.handle(PointerEvent::Down(PointerInput::at(60.0, 60.0)), t);
    chart.handle(move_at(300.0), t);
    assert!(chart.selection().is_some());
    assert!(chart.tooltip().is_some());

    chart.render(t);
    assert!(chart.selection().is_none());
    assert!(chart.tooltip().is_none());
}

#[test]
fn caller_can_clear_selection() {
    let (mut chart, t) = mounted(AreaChart::new(weekly_rows()).animation_duration(Duration::ZERO), 500.0);
    chart.handle(PointerEvent::Down(PointerInput::at(60.0, 60.0)), t);
    chart.handle(move_at(300.0), t);
    chart.handle(PointerEvent::Up, t);
    assert!(chart.selection().is_some());
    assert!(chart.clear_selection());
    assert!(chart.selection().is_none());
}

#[test]
fn hover_through_the_chart_matches_end_to_end_scenario() {
    let (mut chart, t) = mounted(
        AreaChart::new(weekly_rows()).animation_duration(Duration::ZERO).series(Area::new("v")),
        500.0,
    );
    assert!(chart.handle(move_at(240.0), t));
    let tip = chart.tooltip().expect("hovering");
    assert_eq!(tip.index, 1);
    assert_eq!(tip.point.number("v"), Some(20.0));
    // y domain [0, 22] over 170 px.
    let y = tip.y_for("v").expect("series value");
    assert!((y - 170.0 * (1.0 - 20.0 / 22.0)).abs() < 1e-9);

    assert!(chart.handle(PointerEvent::Leave, t));
    assert!(chart.tooltip().is_none());
}
