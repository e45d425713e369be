//! In-memory data transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by ingestion.
//! Every function is pure: it borrows its input and returns a fresh value.
//!
//! Currently implemented:
//!
//! - [`filter()`]: row filtering by predicate
//! - [`drop_sparse_rows()`]: the null-count quality filter
//! - [`select_eq()`]: keep rows where a column equals a value
//! - [`distinct()`] / [`sort_by_column()`]: facet values and ordering
//! - [`summarize()`]: count/mean/median/min/max/std over a numeric column
//! - [`correlation()`]: Pearson correlation between two numeric columns
//! - [`profile()`]: per-column completeness overview
//!
//! ## Example: ingest → quality filter → summarize
//!
//! ```rust
//! use indicator_data::ingestion::ingest_csv_from_str;
//! use indicator_data::processing::{DEFAULT_NULL_THRESHOLD, drop_sparse_rows, summarize};
//!
//! let ds = ingest_csv_from_str(
//!     "Country,GDP,Deaths,Cases,Beds\n\
//!      KOR,35000,10,200,12.6\n\
//!      XXX,,,,\n\
//!      JPN,40000,,300,12.8\n",
//! )
//! .unwrap();
//!
//! // XXX has four nulls and is dropped.
//! let kept = drop_sparse_rows(&ds, DEFAULT_NULL_THRESHOLD);
//! assert_eq!(kept.row_count(), 2);
//!
//! let gdp = summarize(&kept, "GDP");
//! assert_eq!(gdp.count, 2);
//! assert_eq!(gdp.mean, 37_500.0);
//! ```

pub mod filter;
pub mod order;
pub mod stats;

pub use filter::{DEFAULT_NULL_THRESHOLD, drop_sparse_rows, filter, select_eq};
pub use order::{SortOrder, distinct, sort_by_column};
pub use stats::{ColumnProfile, DataSetProfile, SummaryStatistics, correlation, profile, summarize};
