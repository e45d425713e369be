//! Transport-agnostic request handlers.
//!
//! Each handler reads its source from disk on every call, so responses always reflect the current
//! files. Handlers never fail: errors become an [`ApiResponse`] with a server-error status and a
//! `{"error": "..."}` body (plain text for reports).

use std::fs;

use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};

use crate::config::DashboardConfig;
use crate::ingestion::{SourceKind, ingest_csv_from_path};
use crate::processing::{correlation, distinct, drop_sparse_rows, profile, select_eq, summarize};
use crate::types::{DataSet, Value};

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Message returned when a dataset cannot be read.
pub const LOAD_FAILED: &str = "Failed to load data";

/// Message returned when a report cannot be read.
pub const REPORT_FAILED: &str = "Failed to load report";

/// A fully-rendered response, ready for any HTTP layer to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl ApiResponse {
    /// `200 OK` with `value` encoded as JSON.
    pub fn json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status: 200,
                content_type: CONTENT_TYPE_JSON,
                body,
            },
            Err(e) => {
                error!(error = %e, "failed to encode response");
                Self::error(500, "Failed to encode response")
            }
        }
    }

    /// JSON error payload `{"error": message}`.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            content_type: CONTENT_TYPE_JSON,
            body: json!({ "error": message }).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Column equality filters taken from a request's query string.
///
/// Values are typed the same way CSV cells are, so `?Year=2020` matches numeric cells. Empty
/// values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetQuery {
    pub filters: Vec<(String, String)>,
}

impl DatasetQuery {
    /// Build a query from `(column, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            filters: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Apply every non-empty filter in turn.
    pub fn apply(&self, dataset: &DataSet) -> DataSet {
        let mut out = dataset.clone();
        for (column, raw) in &self.filters {
            let value = Value::infer(raw);
            if value.is_null() {
                continue;
            }
            out = select_eq(&out, column, &value);
        }
        out
    }
}

/// Whole dataset as a JSON array of objects, after the query's column filters.
pub fn dataset_data(config: &DashboardConfig, name: &str, query: &DatasetQuery) -> ApiResponse {
    match load_dataset(config, name) {
        Ok(Some(ds)) => ApiResponse::json(&query.apply(&ds)),
        Ok(None) => not_found(name),
        Err(response) => response,
    }
}

#[derive(Serialize)]
struct Preview<'a> {
    data: DataSet,
    columns: &'a [String],
    shape: [usize; 2],
}

/// First `preview_rows` records plus the column list and full `[rows, columns]` shape.
pub fn dataset_preview(config: &DashboardConfig, name: &str) -> ApiResponse {
    match load_dataset(config, name) {
        Ok(Some(ds)) => ApiResponse::json(&Preview {
            data: ds.head(config.preview_rows),
            columns: &ds.schema.columns,
            shape: [ds.row_count(), ds.schema.len()],
        }),
        Ok(None) => not_found(name),
        Err(response) => response,
    }
}

/// Summary statistics for `column` over rows that pass the quality filter.
pub fn dataset_summary(config: &DashboardConfig, name: &str, column: &str) -> ApiResponse {
    match load_dataset(config, name) {
        Ok(Some(ds)) => {
            let kept = drop_sparse_rows(&ds, config.null_threshold);
            ApiResponse::json(&summarize(&kept, column))
        }
        Ok(None) => not_found(name),
        Err(response) => response,
    }
}

#[derive(Serialize)]
struct Correlation<'a> {
    x: &'a str,
    y: &'a str,
    /// `null` when undefined.
    correlation: Option<f64>,
}

/// Pearson correlation between two columns over rows that pass the quality filter.
pub fn dataset_correlation(config: &DashboardConfig, name: &str, x: &str, y: &str) -> ApiResponse {
    match load_dataset(config, name) {
        Ok(Some(ds)) => {
            let kept = drop_sparse_rows(&ds, config.null_threshold);
            ApiResponse::json(&Correlation {
                x,
                y,
                correlation: correlation(&kept, x, y),
            })
        }
        Ok(None) => not_found(name),
        Err(response) => response,
    }
}

/// Distinct non-null values for each requested column, keyed by column name.
pub fn dataset_facets(config: &DashboardConfig, name: &str, columns: &[&str]) -> ApiResponse {
    match load_dataset(config, name) {
        Ok(Some(ds)) => {
            let facets: serde_json::Map<String, serde_json::Value> = columns
                .iter()
                .map(|c| (c.to_string(), json!(distinct(&ds, c))))
                .collect();
            ApiResponse::json(&facets)
        }
        Ok(None) => not_found(name),
        Err(response) => response,
    }
}

/// Shape, missing-cell total, and per-column completeness.
pub fn dataset_profile(config: &DashboardConfig, name: &str) -> ApiResponse {
    match load_dataset(config, name) {
        Ok(Some(ds)) => ApiResponse::json(&profile(&ds)),
        Ok(None) => not_found(name),
        Err(response) => response,
    }
}

/// A Markdown report, returned verbatim.
pub fn report(config: &DashboardConfig, name: &str) -> ApiResponse {
    let path = match config.resolve(name) {
        Some((path, SourceKind::Markdown)) => path,
        _ => return not_found(name),
    };
    match fs::read_to_string(&path) {
        Ok(body) => ApiResponse {
            status: 200,
            content_type: SourceKind::Markdown.content_type(),
            body,
        },
        Err(e) => {
            error!(report = name, path = %path.display(), error = %e, "error reading report");
            ApiResponse {
                status: 500,
                content_type: "text/plain; charset=utf-8",
                body: REPORT_FAILED.to_string(),
            }
        }
    }
}

/// `Ok(None)` when `name` is not a registered CSV dataset.
fn load_dataset(config: &DashboardConfig, name: &str) -> Result<Option<DataSet>, ApiResponse> {
    let path = match config.resolve(name) {
        Some((path, SourceKind::Csv)) => path,
        _ => return Ok(None),
    };
    match ingest_csv_from_path(&path) {
        Ok(ds) => {
            debug!(dataset = name, rows = ds.row_count(), "loaded dataset");
            Ok(Some(ds))
        }
        Err(e) => {
            error!(dataset = name, path = %path.display(), error = %e, "error reading dataset");
            Err(ApiResponse::error(500, LOAD_FAILED))
        }
    }
}

fn not_found(name: &str) -> ApiResponse {
    debug!(dataset = name, "unknown dataset");
    ApiResponse::error(404, "Dataset not found")
}
