// File: crates/area-chart-core/src/types.rs
// Summary: Shared types and constants (margins, sizes, aspect ratio, caller-facing chart options).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ChartError;

/// Default field name holding the x (date) value of a row.
pub const DEFAULT_X_KEY: &str = "date";
/// Default reveal animation length in milliseconds.
pub const DEFAULT_ANIMATION_MS: u64 = 1100;
/// Below this many pixels in either direction the chart renders nothing.
pub const MIN_DIMENSION: f64 = 10.0;
/// Quiet period before a container measurement is applied.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(10);

/// Plot insets, in pixels.
/// Missing fields in a config table fall back to the defaults (40 on every side).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(v: f64) -> Self {
        Self::new(v, v, v, v)
    }

    /// Total horizontal inset (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}

impl Default for Margin {
    fn default() -> Self {
        Self::uniform(40.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both sides reach the minimum usable dimension.
    pub fn is_usable(&self) -> bool {
        self.width >= MIN_DIMENSION && self.height >= MIN_DIMENSION
    }
}

/// Container aspect ratio written as `"width / height"`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct AspectRatio {
    width: f64,
    height: f64,
}

impl AspectRatio {
    pub fn new(width: f64, height: f64) -> Result<Self, ChartError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidAspectRatio(format!("{width} / {height}")));
        }
        Ok(Self { width, height })
    }

    /// Container size for a measured width.
    pub fn size_for_width(&self, width: f64) -> Size {
        Size::new(width, width * self.height / self.width)
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self { width: 2.0, height: 1.0 }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.width, self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChartError::InvalidAspectRatio(s.to_string());
        let mut parts = s.split('/');
        let w = parts.next().map(str::trim).ok_or_else(invalid)?;
        let w: f64 = w.parse().map_err(|_| invalid())?;
        // A bare number is a ratio over 1, as in CSS.
        let h: f64 = match parts.next() {
            Some(h) => h.trim().parse().map_err(|_| invalid())?,
            None => 1.0,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Self::new(w, h).map_err(|_| invalid())
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Caller-facing chart configuration (everything except rows and children).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Row field holding the x (date) value.
    pub x_key: String,
    pub margin: Margin,
    /// Reveal animation length; interaction is gated until it elapses.
    pub animation_duration_ms: u64,
    pub aspect_ratio: AspectRatio,
}

impl ChartOptions {
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            x_key: DEFAULT_X_KEY.to_string(),
            margin: Margin::default(),
            animation_duration_ms: DEFAULT_ANIMATION_MS,
            aspect_ratio: AspectRatio::default(),
        }
    }
}
