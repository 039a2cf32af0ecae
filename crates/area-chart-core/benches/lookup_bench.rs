use area_chart::{
    find_nearest_point, InteractionFrame, Margin, Row, SeriesConfig, Timeline, TimeScale, ValueScale,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const DAY_MS: f64 = 86_400_000.0;

fn build_rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            let y = (i as f64 * 0.01).sin() * 10.0 + 20.0;
            Row::new().with("date", i as f64 * DAY_MS).with("v", y)
        })
        .collect()
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_point");
    for &n in &[1_000usize, 100_000usize] {
        let rows = build_rows(n);
        let timeline = Timeline::build(&rows, "date");
        let x_scale = TimeScale::from_timeline(&timeline, 800.0);
        let y_scale = ValueScale::new((0.0, 40.0), (400.0, 0.0));
        let series = vec![SeriesConfig {
            key: "v".into(),
            color: area_chart::Color::CHART_LINE_PRIMARY,
            stroke_width: 2.0,
        }];
        let frame = InteractionFrame {
            rows: &rows,
            timeline: &timeline,
            x_scale: &x_scale,
            y_scale: &y_scale,
            series: &series,
            margin: Margin::default(),
        };
        group.bench_function(format!("rows_{n}"), |b| {
            let mut px = 0.0;
            b.iter(|| {
                px = (px + 7.3) % 800.0;
                black_box(find_nearest_point(&frame, black_box(px)));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lookup);
criterion_main!(benches);
