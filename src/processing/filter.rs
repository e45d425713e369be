//! Row filtering for [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// Records with this many null fields or more are dropped by [`drop_sparse_rows`] by default.
pub const DEFAULT_NULL_THRESHOLD: usize = 3;

/// Returns a new [`DataSet`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`DataSet::filter_rows`].
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// Quality filter: keep a row iff its null count is strictly less than `threshold`.
///
/// Order is preserved and the input is left untouched. Applying the filter twice with the same
/// threshold gives the same result as applying it once.
pub fn drop_sparse_rows(dataset: &DataSet, threshold: usize) -> DataSet {
    dataset.filter_rows(|row| row.iter().filter(|v| v.is_null()).count() < threshold)
}

/// Keep rows whose `column` equals `value`.
///
/// Numbers compare numerically and strings exactly. An unknown column yields an empty dataset with
/// the same schema.
pub fn select_eq(dataset: &DataSet, column: &str, value: &Value) -> DataSet {
    match dataset.schema.index_of(column) {
        Some(idx) => dataset.filter_rows(|row| row.get(idx) == Some(value)),
        None => DataSet::empty(dataset.schema.clone()),
    }
}
