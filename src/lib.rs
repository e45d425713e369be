//! `indicator-data` turns the CSV exports behind a health and economic indicators dashboard into
//! typed records, and computes the numbers the dashboard shows.
//!
//! The pipeline is: raw text → [`ingestion`] → [`types::DataSet`] → quality filter
//! ([`processing::drop_sparse_rows`]) → [`processing::summarize`] →
//! [`processing::SummaryStatistics`]. Every stage is pure and synchronous; each call re-parses its
//! source from scratch.
//!
//! ## Values
//!
//! There is no user schema. The header row names the columns and every cell is inferred on its
//! own as one of three [`types::Value`]s:
//!
//! - [`types::Value::Null`]: the trimmed cell is empty
//! - [`types::Value::Number`]: the trimmed cell is a complete, finite decimal or exponential number
//! - [`types::Value::Utf8`]: anything else
//!
//! Rows shorter than the header are padded with nulls; cells past the header width are dropped.
//!
//! ## Quick example
//!
//! ```rust
//! use indicator_data::ingestion::ingest_csv_from_str;
//! use indicator_data::processing::{DEFAULT_NULL_THRESHOLD, drop_sparse_rows, summarize};
//! use indicator_data::types::Value;
//!
//! let ds = ingest_csv_from_str("a,b\n1,\n,2").unwrap();
//! assert_eq!(ds.rows[0], vec![Value::Number(1.0), Value::Null]);
//! assert_eq!(ds.rows[1], vec![Value::Null, Value::Number(2.0)]);
//!
//! let kept = drop_sparse_rows(&ds, DEFAULT_NULL_THRESHOLD);
//! let stats = summarize(&kept, "a");
//! assert_eq!(stats.count, 1);
//! assert_eq!(stats.mean, 1.0);
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV parsing, path-based entrypoint with observers, source discovery
//! - [`types`]: value, schema, and dataset types
//! - [`processing`]: filtering, ordering, statistics, and profiling
//! - [`format`]: display helpers that print `"N/A"` for missing values
//! - [`config`]: dataset registry and handler settings
//! - [`handlers`]: JSON/Markdown responses for an HTTP layer to serve
//! - [`execution`]: parallel ingestion of several sources
//! - [`error`]: error types

pub mod config;
pub mod error;
pub mod execution;
pub mod format;
pub mod handlers;
pub mod ingestion;
pub mod processing;
pub mod types;

pub use error::{IngestionError, IngestionResult};
