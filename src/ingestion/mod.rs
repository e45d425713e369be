//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_from_path`] (from [`source`]) which:
//!
//! - reads a CSV file into an in-memory [`crate::types::DataSet`]
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! In-memory and reader-based parsing lives in [`csv`]; [`discovery`] finds sources on disk.

pub mod csv;
pub mod discovery;
pub mod observability;
pub mod source;

pub use self::csv::{ingest_csv_from_path, ingest_csv_from_reader, ingest_csv_from_str};
pub use discovery::{SourceEntry, SourceKind, discover_sources};
pub use observability::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, TracingObserver,
};
pub use source::{IngestionOptions, IngestionRequest, ingest_from_path};
