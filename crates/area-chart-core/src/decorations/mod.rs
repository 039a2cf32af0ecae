// File: crates/area-chart-core/src/decorations/mod.rs
// Summary: Built-in decorations (series area, grid, selection band, tooltip, markers).

mod area;
mod grid;
mod markers;
mod selection;
mod tooltip;

pub use area::Area;
pub use grid::Grid;
pub use markers::{ChartMarkers, Marker};
pub use selection::SelectionBand;
pub use tooltip::ChartTooltip;
