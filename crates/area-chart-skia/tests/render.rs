// File: crates/area-chart-skia/tests/render.rs
// Purpose: End-to-end raster output of a mounted chart (PNG bytes, files, RGBA buffer).

use std::time::{Duration, Instant};

use area_chart::{Area, AreaChart, ChartTooltip, Color, Grid, PointerEvent, PointerInput, Row, Scene};
use area_chart_skia::SkiaRenderer;
use chrono::NaiveDate;

fn rows() -> Vec<Row> {
    [(1, 10.0), (8, 20.0), (15, 15.0)]
        .into_iter()
        .map(|(day, v)| {
            let date = NaiveDate::from_ymd_opt(2025, 1, day).expect("valid date");
            Row::new().with("date", date).with("v", v)
        })
        .collect()
}

fn settled_scene() -> Scene {
    let t0 = Instant::now();
    let mut chart = AreaChart::new(rows())
        .animation_duration(Duration::ZERO)
        .under(Grid::new())
        .series(Area::new("v"))
        .over(ChartTooltip::new())
        .mount(t0);
    chart.observe_resize(500.0, t0);
    let t1 = t0 + Duration::from_millis(20);
    chart.handle(PointerEvent::Move(PointerInput::at(280.0, 100.0)), t1);
    chart.render(t1).expect("chart is measured")
}

#[test]
fn png_bytes_decode_to_scene_size() {
    let scene = settled_scene();
    let bytes = SkiaRenderer::new().render_to_png_bytes(&scene).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let img = image::load_from_memory(&bytes).expect("decodable png");
    assert_eq!(img.width(), 500);
    assert_eq!(img.height(), 250);
}

#[test]
fn png_file_is_written() {
    let scene = settled_scene();
    let out = std::path::PathBuf::from("target/test_out/area.png");
    SkiaRenderer::new().render_to_png(&scene, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");
}

#[test]
fn rgba_buffer_shape_and_background() {
    let scene = settled_scene();
    let renderer = SkiaRenderer::new().with_background(Color::rgb(10, 20, 30));
    let (px, w, h, stride) = renderer.render_to_rgba8(&scene).expect("rgba render");
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, w as usize * 4);
    // Top-left corner lies in the margin: background only.
    assert_eq!(&px[0..4], &[10, 20, 30, 255]);
}

#[test]
fn series_fill_reaches_the_plot() {
    let scene = settled_scene();
    let (px, w, _, stride) = SkiaRenderer::new().render_to_rgba8(&scene).expect("rgba render");
    // Just above the baseline, between the first two rows and clear of the crosshair.
    let (x, y) = (150usize, 205usize);
    let i = y * stride + x * 4;
    assert!(x < w as usize);
    assert_ne!(&px[i..i + 3], &[255, 255, 255], "area fill should tint the background");
}

#[test]
fn empty_text_measures_zero_width() {
    let shaper = area_chart_skia::TextShaper::new();
    // Font availability varies by host; empty text measures zero everywhere.
    assert_eq!(shaper.measure_width("", 12.0), 0.0);
}
