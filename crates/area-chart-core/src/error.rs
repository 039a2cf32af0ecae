// File: crates/area-chart-core/src/error.rs
// Summary: Error type for the few fallible operations (option parsing and SVG output).
// Notes:
// - Chart operations themselves never fail; malformed data degrades to an emptier chart.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid aspect ratio '{0}': expected \"width / height\" with positive numbers")]
    InvalidAspectRatio(String),

    #[error("invalid color '{0}': expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
