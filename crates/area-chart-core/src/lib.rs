// File: crates/area-chart-core/src/lib.rs
// Summary: Core library entry point; exports the headless area chart engine (scales, series, interaction, renderer).

pub mod chart;
pub mod context;
pub mod data;
pub mod decoration;
pub mod decorations;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod scale;
pub mod scene;
pub mod series;
pub mod svg;
pub mod timer;
pub mod types;

pub use chart::{AreaChart, ChartInstance, Cursor};
pub use context::{ChartCommand, ChartComputedState};
pub use data::{Row, Timeline, Value};
pub use decoration::{ChartChild, Decoration, Role};
pub use decorations::{Area, ChartMarkers, ChartTooltip, Grid, Marker, SelectionBand};
pub use error::{ChartError, Result};
pub use geometry::{Point, Rect};
pub use interaction::{
    find_nearest_point, InteractionController, InteractionFrame, Phase, PointerEvent, PointerInput,
    Selection, SurfaceTransform, TooltipData,
};
pub use scale::{build_x_scale, build_y_scale, TimeScale, ValueScale};
pub use scene::{Color, RenderCommand, Scene, Stroke, TextAnchor};
pub use series::{extract_series, SeriesConfig, SeriesDecl};
pub use svg::{to_svg, write_svg};
pub use types::{AspectRatio, ChartOptions, Margin, Size};
