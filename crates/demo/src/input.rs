// File: crates/demo/src/input.rs
// Summary: CSV loading into chart rows: numeric cells become numbers, everything else stays text.

use std::path::Path;

use anyhow::{Context, Result};
use area_chart::{Row, Value};
use tracing::{debug, warn};

/// Load rows from a headered CSV. The x column is kept as text and resolved by the chart.
pub fn load_rows(path: &Path, x_key: &str) -> Result<(Vec<Row>, Vec<String>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    debug!(?headers, "csv headers");
    if !headers.iter().any(|h| h == x_key) {
        warn!(x_key, "x column not found; every row will be skipped by the chart");
    }

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let row: Row = headers
            .iter()
            .zip(rec.iter())
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(h, cell)| (h.as_str(), cell_value(h == x_key, cell)))
            .collect();
        rows.push(row);
    }

    // Numeric columns other than x are the plottable ones.
    let numeric = headers
        .iter()
        .filter(|h| *h != x_key)
        .filter(|h| rows.iter().any(|r| r.number(h).is_some()))
        .cloned()
        .collect();
    Ok((rows, numeric))
}

fn cell_value(is_x: bool, cell: &str) -> Value {
    if is_x {
        return Value::from(cell);
    }
    match cell.parse::<f64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::from(cell),
    }
}
