// File: crates/area-chart-core/tests/series.rs
// Purpose: Series extraction from tagged children: order, fallback recognition, exclusion.

use area_chart::{
    extract_series, Area, ChartChild, ChartComputedState, Color, Decoration, Grid, Scene, SeriesDecl,
};

/// Decoration that names a data key without being tagged as a series.
struct KeyedBand(&'static str);

impl Decoration for KeyedBand {
    fn id(&self) -> &'static str { "keyed-band" }

    fn series(&self) -> Option<SeriesDecl> {
        Some(SeriesDecl::new(self.0))
    }

    fn render(&self, _ctx: &ChartComputedState<'_>, _scene: &mut Scene) {}
}

fn keys(children: &[ChartChild]) -> Vec<String> {
    extract_series(children).into_iter().map(|s| s.key).collect()
}

#[test]
fn declaration_order_is_preserved() {
    let children = vec![
        ChartChild::series(Area::new("a")),
        ChartChild::under(KeyedBand("b")),
        ChartChild::over(Area::new("c")),
    ];
    assert_eq!(keys(&children), ["a", "b", "c"]);
}

#[test]
fn children_without_a_key_are_skipped() {
    let children = vec![
        ChartChild::under(Grid::new()),
        ChartChild::series(Area::new("")),
        ChartChild::under(KeyedBand("")),
        ChartChild::series(Area::new("v")),
    ];
    assert_eq!(keys(&children), ["v"]);
}

#[test]
fn duplicate_keys_keep_first_declaration() {
    let children = vec![
        ChartChild::series(Area::new("v").stroke(Color::rgb(255, 0, 0))),
        ChartChild::series(Area::new("w")),
        ChartChild::series(Area::new("v").stroke(Color::rgb(0, 255, 0))),
    ];
    let series = extract_series(&children);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].key, "v");
    assert_eq!(series[0].color, Color::rgb(255, 0, 0));
}

#[test]
fn color_and_width_resolution() {
    let children = vec![
        ChartChild::series(Area::new("stroked").stroke(Color::rgb(1, 2, 3)).fill(Color::rgb(9, 9, 9))),
        ChartChild::series(Area::new("filled").fill(Color::rgb(9, 9, 9))),
        ChartChild::series(Area::new("plain").stroke_width(3.5)),
        ChartChild::series(Area::new("bad-width").stroke_width(-1.0)),
    ];
    let series = extract_series(&children);
    assert_eq!(series[0].color, Color::rgb(1, 2, 3));
    assert_eq!(series[1].color, Color::rgb(9, 9, 9));
    assert_eq!(series[2].color, Color::CHART_LINE_PRIMARY);
    assert_eq!(series[2].stroke_width, 3.5);
    assert_eq!(series[3].stroke_width, 2.0);
}

#[test]
fn empty_children_yield_no_series() {
    assert!(extract_series(&[]).is_empty());
}
