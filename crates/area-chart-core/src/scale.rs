// File: crates/area-chart-core/src/scale.rs
// Summary: Time (X) and Value (Y) scales mapping data domains onto plot pixel ranges.

use crate::data::{Row, Timeline};
use crate::series::SeriesConfig;

/// Logical X coordinate (epoch milliseconds).
pub type Logical = f64;
/// Value Y coordinate.
pub type Value = f64;

/// Headroom applied above the largest series value.
const Y_HEADROOM: f64 = 1.1;
/// Domain max used when no series carries a positive value.
const Y_FALLBACK_MAX: f64 = 100.0;
/// Tick count the nice rounding aligns to.
const NICE_TICKS: usize = 10;

/// Continuous time scale: epoch ms -> horizontal pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    domain: (Logical, Logical),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (Logical, Logical), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Exact fit of the timeline extent onto `[0, inner_width]`. No padding.
    pub fn from_timeline(timeline: &Timeline, inner_width: f64) -> Self {
        let domain = timeline.extent().unwrap_or((0.0, 0.0));
        Self::new(domain, (0.0, inner_width))
    }

    pub fn domain(&self) -> (Logical, Logical) { self.domain }
    pub fn range(&self) -> (f64, f64) { self.range }

    #[inline]
    pub fn to_px(&self, x: Logical) -> f64 {
        interpolate(self.domain, self.range, x)
    }

    /// Inverse mapping. A degenerate range inverts to the domain start.
    #[inline]
    pub fn from_px(&self, px: f64) -> Logical {
        let (r0, r1) = self.range;
        let (d0, d1) = self.domain;
        let span = r1 - r0;
        if span == 0.0 || !span.is_finite() {
            return d0;
        }
        d0 + (px - r0) / span * (d1 - d0)
    }
}

/// Linear value scale; the range is inverted so larger values sit higher on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    domain: (Value, Value),
    range: (f64, f64),
}

impl ValueScale {
    pub fn new(domain: (Value, Value), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (Value, Value) { self.domain }
    pub fn range(&self) -> (f64, f64) { self.range }

    #[inline]
    pub fn to_px(&self, y: Value) -> f64 {
        interpolate(self.domain, self.range, y)
    }

    /// Extend the domain outward to multiples of a tick step (d3 `nice` semantics).
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }
        if !(start.is_finite() && stop.is_finite()) || count == 0 {
            return self;
        }
        let mut prestep = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if prestep == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            prestep = Some(step);
        }
        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    /// Round tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<Value> {
        let (a, b) = self.domain;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if !(lo.is_finite() && hi.is_finite()) || count == 0 {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }
        let inc = tick_increment(lo, hi, count);
        if inc > 0.0 {
            let i0 = (lo / inc).ceil() as i64;
            let i1 = (hi / inc).floor() as i64;
            (i0..=i1).map(|i| i as f64 * inc).collect()
        } else if inc < 0.0 {
            let inv = -inc;
            let i0 = (lo * inv).ceil() as i64;
            let i1 = (hi * inv).floor() as i64;
            (i0..=i1).map(|i| i as f64 / inv).collect()
        } else {
            Vec::new()
        }
    }
}

/// Build the X scale for `rows` keyed on `x_key`: exact timestamp extent onto `[0, inner_width]`.
/// Rows whose x value does not resolve are skipped.
pub fn build_x_scale(rows: &[Row], x_key: &str, inner_width: f64) -> TimeScale {
    TimeScale::from_timeline(&Timeline::build(rows, x_key), inner_width)
}

/// Build the Y scale: `[0, 1.1 * max]` niced onto `[inner_height, 0]`,
/// or `[0, 100]` when no series carries a positive value.
pub fn build_y_scale(rows: &[Row], series: &[SeriesConfig], inner_height: f64) -> ValueScale {
    let max_value = series
        .iter()
        .flat_map(|s| rows.iter().filter_map(move |row| row.number(&s.key)))
        .fold(0.0_f64, f64::max);

    let range = (inner_height, 0.0);
    if max_value <= 0.0 {
        return ValueScale::new((0.0, Y_FALLBACK_MAX), range);
    }
    ValueScale::new((0.0, max_value * Y_HEADROOM), range).nice(NICE_TICKS)
}

/// Map `v` from `domain` onto `range`. A degenerate domain maps to the range midpoint.
#[inline]
fn interpolate(domain: (f64, f64), range: (f64, f64), v: f64) -> f64 {
    let (d0, d1) = domain;
    let (r0, r1) = range;
    let span = d1 - d0;
    if span == 0.0 || !span.is_finite() {
        return (r0 + r1) * 0.5;
    }
    r0 + (v - d0) / span * (r1 - r0)
}

/// Tick step for `[start, stop]` snapped to 1/2/5 x 10^k.
/// Negative results encode `-1 / step` so sub-unit steps stay exact.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    if step <= 0.0 || !step.is_finite() {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}
