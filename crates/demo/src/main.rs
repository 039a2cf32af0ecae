// File: crates/demo/src/main.rs
// Summary: Demo loads a CSV (or built-in admissions trends), mounts an area chart, replays pointer input, writes SVG + PNG frames.

mod config;
mod input;
mod mock;
mod session;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use area_chart::{
    write_svg, Area, AreaChart, AspectRatio, ChartMarkers, ChartTooltip, Grid, Marker, Row, SelectionBand,
};
use area_chart_skia::SkiaRenderer;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::DemoConfig;
use session::Script;

#[derive(Parser, Debug)]
#[command(name = "area-chart-demo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render an interactive area chart headlessly to SVG and PNG")]
struct Cli {
    /// CSV with a header row; defaults to built-in admissions trends
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// TOML config file ([chart] and [output] sections)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Column holding the x (date) values
    #[arg(long)]
    x_key: Option<String>,

    /// Series keys to plot (comma-separated); defaults to every numeric column or college
    #[arg(short, long, value_delimiter = ',')]
    series: Vec<String>,

    /// Container width in pixels
    #[arg(short, long)]
    width: Option<f64>,

    /// Container aspect ratio, e.g. "2 / 1"
    #[arg(long)]
    aspect_ratio: Option<AspectRatio>,

    /// Reveal animation length in milliseconds
    #[arg(long)]
    animation_ms: Option<u64>,

    /// Output directory
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Hover position as a fraction of the plot width
    #[arg(long, default_value_t = 0.6)]
    hover: f64,

    /// Drag selection as FROM,TO fractions of the plot width
    #[arg(long, value_delimiter = ',', num_args = 2)]
    select: Vec<f64>,

    /// Pin a labelled marker to a row: INDEX=LABEL
    #[arg(long)]
    marker: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "area_chart=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    apply_overrides(&mut config, &cli);
    let background = config.output.background_color()?;

    let (rows, series) = load_data(&cli, &config.chart.x_key)?;
    if series.is_empty() {
        bail!("no numeric series to plot");
    }
    info!(rows = rows.len(), series = ?series.iter().map(|(k, _)| k).collect::<Vec<_>>(), "data loaded");

    let mut chart = AreaChart::new(rows)
        .options(config.chart.clone())
        .under(Grid::new())
        .under(SelectionBand::new());
    for (key, color) in &series {
        let mut area = Area::new(key.as_str());
        if let Some(color) = color {
            area = area.stroke(*color);
        }
        chart = chart.series(area);
    }
    let markers = parse_markers(&cli.marker)?;
    if !markers.is_empty() {
        chart = chart.over(ChartMarkers::new(markers));
    }
    chart = chart.over(ChartTooltip::new());

    let t0 = Instant::now();
    let mut instance = chart.mount(t0);
    let script = Script {
        hover: cli.hover,
        select: match cli.select.as_slice() {
            [from, to] => Some((*from, *to)),
            _ => None,
        },
    };
    let frames = session::replay(&mut instance, t0, config.output.width, &script);
    if frames.is_empty() {
        bail!("container too small to render (width {})", config.output.width);
    }

    std::fs::create_dir_all(&config.output.dir)
        .with_context(|| format!("creating {}", config.output.dir.display()))?;
    let renderer = SkiaRenderer::new().with_background(background);
    for frame in &frames {
        let svg = out_path(&config.output.dir, frame.name, "svg");
        write_svg(&frame.scene, &svg).with_context(|| format!("writing {}", svg.display()))?;
        let png = out_path(&config.output.dir, frame.name, "png");
        renderer.render_to_png(&frame.scene, &png)?;
        info!(svg = %svg.display(), png = %png.display(), "frame written");
    }
    instance.unmount();
    Ok(())
}

fn apply_overrides(config: &mut DemoConfig, cli: &Cli) {
    if let Some(x_key) = &cli.x_key {
        config.chart.x_key = x_key.clone();
    }
    if let Some(ratio) = cli.aspect_ratio {
        config.chart.aspect_ratio = ratio;
    }
    if let Some(ms) = cli.animation_ms {
        config.chart.animation_duration_ms = ms;
    }
    if let Some(width) = cli.width {
        config.output.width = width;
    }
    if let Some(dir) = &cli.out_dir {
        config.output.dir = dir.clone();
    }
}

type SeriesChoice = (String, Option<area_chart::Color>);

fn load_data(cli: &Cli, x_key: &str) -> Result<(Vec<Row>, Vec<SeriesChoice>)> {
    if let Some(path) = &cli.input {
        let (rows, numeric) = input::load_rows(path, x_key)
            .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
        let keys = if cli.series.is_empty() { numeric } else { cli.series.clone() };
        return Ok((rows, keys.into_iter().map(|k| (k, None)).collect()));
    }

    let colleges: Vec<&mock::College> = if cli.series.is_empty() {
        mock::COLLEGES.iter().collect()
    } else {
        cli.series
            .iter()
            .map(|s| mock::find(s).with_context(|| format!("unknown college '{s}'")))
            .collect::<Result<_>>()?
    };
    let rows = mock::trend_rows(&colleges);
    let series = colleges.iter().map(|c| (c.value.to_string(), Some(c.color))).collect();
    Ok((rows, series))
}

fn parse_markers(entries: &[String]) -> Result<Vec<Marker>> {
    entries
        .iter()
        .map(|entry| {
            let (index, label) = entry
                .split_once('=')
                .with_context(|| format!("marker '{entry}' is not INDEX=LABEL"))?;
            let index: usize = index.trim().parse().with_context(|| format!("bad marker index in '{entry}'"))?;
            Ok(Marker::new(index, label.trim()))
        })
        .collect()
}

fn out_path(dir: &Path, frame: &str, ext: &str) -> PathBuf {
    dir.join(format!("area_{frame}.{ext}"))
}
