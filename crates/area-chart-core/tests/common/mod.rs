// File: crates/area-chart-core/tests/common/mod.rs
// Purpose: Shared fixtures for integration tests.
#![allow(dead_code)]

use std::time::{Duration, Instant};

use area_chart::{AreaChart, ChartInstance, Row};
use chrono::NaiveDate;

pub const DAY_MS: f64 = 86_400_000.0;

pub fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, day).expect("valid date")
}

/// Rows dated 2025-01-`day` with a single `v` value each.
pub fn rows(points: &[(u32, f64)]) -> Vec<Row> {
    points
        .iter()
        .map(|&(day, v)| Row::new().with("date", jan(day)).with("v", v))
        .collect()
}

/// Jan 1 / 8 / 15 with values 10 / 20 / 15.
pub fn weekly_rows() -> Vec<Row> {
    rows(&[(1, 10.0), (8, 20.0), (15, 15.0)])
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Mount, measure `width` and let the resize debounce settle. Returns the instance and the settle instant.
pub fn mounted(chart: AreaChart, width: f64) -> (ChartInstance, Instant) {
    let t0 = Instant::now();
    let mut instance = chart.mount(t0);
    instance.observe_resize(width, t0);
    let settled = t0 + ms(20);
    instance.advance(settled);
    (instance, settled)
}
