//! Descriptive statistics and column profiling for [`crate::types::DataSet`].

use serde::Serialize;

use crate::types::{DataSet, ValueKind};

/// Summary of the numeric values in one column.
///
/// When there is no numeric data every field is zero (the [`Default`] value), never `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SummaryStatistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation (divides by `count`).
    pub std: f64,
}

impl SummaryStatistics {
    /// Summarize raw numbers. `NaN`s are ignored.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return Self::default();
        }
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

        Self {
            count,
            mean,
            median,
            min: sorted[0],
            max: sorted[count - 1],
            std: variance.sqrt(),
        }
    }

    /// Whether this is the zero-data sentinel.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Summarize the numeric values of `column`.
///
/// Nulls and strings (including display placeholders such as `"N/A"`) are skipped. A missing
/// column behaves like a column with no numbers.
pub fn summarize(dataset: &DataSet, column: &str) -> SummaryStatistics {
    SummaryStatistics::from_values(dataset.column_values(column).filter_map(|v| v.as_number()))
}

/// Pearson correlation between the numeric values of columns `x` and `y`.
///
/// Only rows where both cells are numbers contribute. Returns `None` with fewer than two such
/// pairs, when either side has zero variance, or when a column is unknown.
pub fn correlation(dataset: &DataSet, x: &str, y: &str) -> Option<f64> {
    let xi = dataset.schema.index_of(x)?;
    let yi = dataset.schema.index_of(y)?;
    let pairs: Vec<(f64, f64)> = dataset
        .rows
        .iter()
        .filter_map(|row| Some((row[xi].as_number()?, row[yi].as_number()?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;
    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let (dx, dy) = (a - mean_x, b - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Per-column completeness and type information.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    /// Most common non-null kind; [`ValueKind::Null`] if the column has no values. Ties favour
    /// [`ValueKind::String`].
    pub dominant_kind: ValueKind,
    pub non_null: usize,
    pub nulls: usize,
    /// Share of null cells, in percent, rounded to two decimals.
    pub null_pct: f64,
}

/// Dataset-level overview: shape, total missing cells, and per-column detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSetProfile {
    pub rows: usize,
    pub columns: usize,
    /// Total null cells across all columns.
    pub missing: usize,
    pub column_profiles: Vec<ColumnProfile>,
}

/// Profile every column of `dataset`.
pub fn profile(dataset: &DataSet) -> DataSetProfile {
    let rows = dataset.row_count();
    let column_profiles: Vec<ColumnProfile> = dataset
        .schema
        .column_names()
        .enumerate()
        .map(|(idx, name)| {
            let (mut numbers, mut strings, mut nulls) = (0usize, 0usize, 0usize);
            for row in &dataset.rows {
                match row[idx].kind() {
                    ValueKind::Number => numbers += 1,
                    ValueKind::String => strings += 1,
                    ValueKind::Null => nulls += 1,
                }
            }
            let dominant_kind = match (numbers, strings) {
                (0, 0) => ValueKind::Null,
                (n, s) if n > s => ValueKind::Number,
                _ => ValueKind::String,
            };
            let null_pct = if rows == 0 {
                0.0
            } else {
                (nulls as f64 / rows as f64 * 10_000.0).round() / 100.0
            };
            ColumnProfile {
                name: name.to_owned(),
                dominant_kind,
                non_null: numbers + strings,
                nulls,
                null_pct,
            }
        })
        .collect();

    DataSetProfile {
        rows,
        columns: dataset.schema.len(),
        missing: column_profiles.iter().map(|c| c.nulls).sum(),
        column_profiles,
    }
}
