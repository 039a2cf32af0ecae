// File: crates/area-chart-core/src/data.rs
// Summary: Row records, field values, and the resolved x timeline used for extents and bisection.
// Notes:
// - Rows whose x field does not resolve to a timestamp are skipped by the timeline;
//   the remaining entries keep their original row indices.
// - Rows are expected in ascending x order (the bisection precondition).

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Largest magnitude accepted as an epoch-millisecond timestamp (±100M days).
const MAX_TIMESTAMP_MS: f64 = 8.64e15;

/// A single field value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Date(DateTime<Utc>),
}

impl Value {
    /// Numeric series value. Only finite numbers count; numeric-looking text does not.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Resolve to epoch milliseconds, or None when the value is not a valid date.
    pub fn timestamp_millis(&self) -> Option<f64> {
        match self {
            Value::Date(d) => Some(d.timestamp_millis() as f64),
            Value::Number(n) if n.is_finite() && n.abs() <= MAX_TIMESTAMP_MS => Some(*n),
            Value::Number(_) => None,
            Value::Text(s) => parse_timestamp(s),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self { Value::Number(v) }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self { Value::Number(v as f64) }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self { Value::Text(v.to_string()) }
}

impl From<String> for Value {
    fn from(v: String) -> Self { Value::Text(v) }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self { Value::Date(v) }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(Utc.from_utc_datetime(&v.and_time(NaiveTime::MIN)))
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD` (midnight UTC) and integer epoch ms.
fn parse_timestamp(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.with_timezone(&Utc).timestamp_millis() as f64);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(d) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&d).timestamp_millis() as f64);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Value::from(d).timestamp_millis();
    }
    s.parse::<i64>().ok().map(|n| n as f64).filter(|n| n.abs() <= MAX_TIMESTAMP_MS)
}

/// Immutable mapping from field name to value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    fields: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_number)
    }

    pub fn timestamp(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::timestamp_millis)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Resolved x positions (epoch ms) of rows with a valid timestamp, in row order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    entries: Vec<(f64, usize)>,
}

impl Timeline {
    pub fn build(rows: &[Row], x_key: &str) -> Self {
        let entries = rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| row.timestamp(x_key).map(|t| (t, i)))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// `(timestamp, row index)` pairs.
    pub fn entries(&self) -> &[(f64, usize)] {
        &self.entries
    }

    /// Timestamp of a row, if that row resolved.
    pub fn timestamp_of(&self, row_index: usize) -> Option<f64> {
        // Entries are in row order, so the row index is a valid sort key.
        self.entries
            .binary_search_by(|&(_, i)| i.cmp(&row_index))
            .ok()
            .map(|pos| self.entries[pos].0)
    }

    /// Exact min/max timestamp.
    pub fn extent(&self) -> Option<(f64, f64)> {
        let mut it = self.entries.iter().map(|&(t, _)| t);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }

    /// Insertion point of `t`: the first entry whose timestamp is not less than `t`.
    pub fn bisect_left(&self, t: f64) -> usize {
        self.entries.partition_point(|&(ts, _)| ts < t)
    }

    /// Nearest entry to `t` among the two bisection neighbours.
    /// Equal distances resolve to the right (later) neighbour.
    pub fn nearest(&self, t: f64) -> Option<(f64, usize)> {
        let i = self.bisect_left(t);
        let left = i.checked_sub(1).and_then(|j| self.entries.get(j)).copied();
        let right = self.entries.get(i).copied();
        match (left, right) {
            (None, None) => None,
            (Some(only), None) | (None, Some(only)) => Some(only),
            (Some(l), Some(r)) => {
                if (l.0 - t).abs() < (r.0 - t).abs() { Some(l) } else { Some(r) }
            }
        }
    }
}
