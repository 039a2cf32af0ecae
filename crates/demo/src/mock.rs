// File: crates/demo/src/mock.rs
// Summary: Built-in admissions-chance trend data: monthly 2025 rows, one numeric field per college.

use area_chart::{Color, Row};
use chrono::NaiveDate;

/// Month-over-month wiggle applied to each college's base chance.
const OFFSETS: [f64; 12] = [-1.2, 0.8, 2.1, -0.5, 1.6, 3.0, 0.3, -1.8, 2.4, 1.1, -0.9, 1.7];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct College {
    /// Field key in the generated rows.
    pub value: &'static str,
    pub label: &'static str,
    /// Current admission chance, percent.
    pub base: f64,
    pub color: Color,
}

pub const COLLEGES: [College; 5] = [
    College { value: "mit", label: "MIT", base: 12.0, color: Color::rgb(163, 31, 52) },
    College { value: "stanford", label: "Stanford", base: 9.0, color: Color::rgb(140, 21, 21) },
    College { value: "harvard", label: "Harvard", base: 7.0, color: Color::rgb(165, 28, 48) },
    College { value: "cornell", label: "Cornell", base: 32.0, color: Color::rgb(37, 99, 235) },
    College { value: "rice", label: "Rice", base: 48.0, color: Color::rgb(0, 32, 91) },
];

pub fn find(value: &str) -> Option<&'static College> {
    COLLEGES.iter().find(|c| c.value.eq_ignore_ascii_case(value) || c.label.eq_ignore_ascii_case(value))
}

/// Twelve monthly points (first of each month, 2025) around `base`, clamped to 1..=99.
pub fn generate_trend(base: f64) -> Vec<(NaiveDate, f64)> {
    OFFSETS
        .iter()
        .zip(1u32..)
        .filter_map(|(offset, month)| {
            let date = NaiveDate::from_ymd_opt(2025, month, 1)?;
            Some((date, (base + offset).clamp(1.0, 99.0)))
        })
        .collect()
}

/// One row per month with a `date` field and a chance field per college.
pub fn trend_rows(colleges: &[&College]) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    for college in colleges {
        for (i, (date, chance)) in generate_trend(college.base).into_iter().enumerate() {
            if rows.len() <= i {
                rows.push(Row::new().with("date", date));
            }
            rows[i] = std::mem::take(&mut rows[i]).with(college.value, chance);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_is_clamped_and_monthly() {
        let low = generate_trend(1.0);
        assert_eq!(low.len(), 12);
        assert_eq!(low[0].1, 1.0);
        assert_eq!(low[5].1, 4.0);
        assert_eq!(low[11].0, NaiveDate::from_ymd_opt(2025, 12, 1).expect("valid"));

        let high = generate_trend(98.0);
        assert_eq!(high[5].1, 99.0);
    }

    #[test]
    fn rows_merge_colleges_by_month() {
        let picked: Vec<&College> = ["mit", "Rice"].iter().filter_map(|v| find(v)).collect();
        let rows = trend_rows(&picked);
        assert_eq!(rows.len(), 12);
        let close = |key: &str, want: f64| rows[0].number(key).is_some_and(|v| (v - want).abs() < 1e-9);
        assert!(close("mit", 10.8));
        assert!(close("rice", 46.8));
        assert!(rows[0].timestamp("date").is_some());
    }
}
