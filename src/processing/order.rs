//! Distinct values and ordering for [`crate::types::DataSet`].

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::{DataSet, Value};

/// Sort direction for [`sort_by_column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Distinct non-null values of `column`, in first-seen order.
///
/// Returns an empty list for an unknown column.
pub fn distinct(dataset: &DataSet, column: &str) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::new();
    for value in dataset.column_values(column) {
        if !value.is_null() && !out.contains(value) {
            out.push(value.clone());
        }
    }
    out
}

/// Stable sort of rows by `column`.
///
/// Numbers sort numerically and before strings; strings sort lexically. Nulls always go last,
/// whichever the direction. An unknown column returns an unchanged copy.
pub fn sort_by_column(dataset: &DataSet, column: &str, order: SortOrder) -> DataSet {
    let mut out = dataset.clone();
    let Some(idx) = dataset.schema.index_of(column) else {
        return out;
    };
    out.rows.sort_by(|a, b| compare(&a[idx], &b[idx], order));
    out
}

fn compare(a: &Value, b: &Value, order: SortOrder) -> Ordering {
    let directed = |ord: Ordering| match order {
        SortOrder::Ascending => ord,
        SortOrder::Descending => ord.reverse(),
    };
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => directed(x.total_cmp(y)),
        (Value::Utf8(x), Value::Utf8(y)) => directed(x.cmp(y)),
        (Value::Number(_), Value::Utf8(_)) => directed(Ordering::Less),
        (Value::Utf8(_), Value::Number(_)) => directed(Ordering::Greater),
    }
}
