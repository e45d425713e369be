//! Dashboard configuration: where sources live and how requests treat them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{IngestionError, IngestionResult};
use crate::ingestion::{SourceKind, discover_sources};
use crate::processing::DEFAULT_NULL_THRESHOLD;

/// One named source the handlers can serve.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetEntry {
    /// Lookup name used by request handlers (e.g. `gdp-recovery`).
    pub name: String,
    /// Path relative to [`DashboardConfig::data_root`] (absolute paths are used as-is).
    pub path: PathBuf,
    pub kind: SourceKind,
}

impl DatasetEntry {
    pub fn csv(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: SourceKind::Csv,
        }
    }

    pub fn markdown(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: SourceKind::Markdown,
        }
    }
}

/// Configuration shared by the request handlers.
///
/// Deserializes from JSON; omitted fields take their [`Default`] values.
///
/// ```
/// use indicator_data::config::DashboardConfig;
///
/// let cfg = DashboardConfig::from_json_str(
///     r#"{ "data_root": "/srv/data", "datasets": [
///         { "name": "gdp", "path": "gdp.csv", "kind": "csv" }
///     ] }"#,
/// )
/// .unwrap();
/// assert_eq!(cfg.null_threshold, 3);
/// assert!(cfg.resolve("gdp").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory that dataset paths are resolved against.
    pub data_root: PathBuf,
    /// Rows with this many nulls or more are dropped before summarizing.
    pub null_threshold: usize,
    /// Maximum rows returned by the preview handler.
    pub preview_rows: usize,
    /// Registered sources.
    pub datasets: Vec<DatasetEntry>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from(".."),
            null_threshold: DEFAULT_NULL_THRESHOLD,
            preview_rows: 100,
            datasets: vec![
                DatasetEntry::csv("gdp-recovery", "gdp_recovery_results/gdp_recovery_data.csv"),
                DatasetEntry::csv("covid-health", "covid_health_results/covid_health_data.csv"),
                DatasetEntry::csv(
                    "advanced-health",
                    "advanced_analysis_results/enhanced_health_data.csv",
                ),
                DatasetEntry::markdown(
                    "gdp-recovery-report",
                    "gdp_recovery_results/gdp_recovery_report.md",
                ),
            ],
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON document and validate it.
    ///
    /// Malformed JSON is [`IngestionError::Json`]; a document that parses but fails
    /// [`DashboardConfig::validate`] is [`IngestionError::Config`].
    pub fn from_json_str(text: &str) -> IngestionResult<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON configuration file. An unreadable file is [`IngestionError::Io`].
    pub fn from_json_path(path: impl AsRef<Path>) -> IngestionResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// A configuration with no registered datasets, rooted at `data_root`.
    pub fn empty(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            datasets: Vec::new(),
            ..Self::default()
        }
    }

    /// Register every CSV and Markdown file found under `data_root`, keyed by file stem.
    ///
    /// Files whose stem is already registered are skipped.
    pub fn with_discovered(mut self) -> IngestionResult<Self> {
        for entry in discover_sources(&self.data_root)? {
            if self.datasets.iter().any(|d| d.name == entry.name) {
                continue;
            }
            let path = entry
                .path
                .strip_prefix(&self.data_root)
                .map(Path::to_path_buf)
                .unwrap_or(entry.path);
            self.datasets.push(DatasetEntry {
                name: entry.name,
                path,
                kind: entry.kind,
            });
        }
        Ok(self)
    }

    /// Look up a registered source, returning its resolved path and kind.
    pub fn resolve(&self, name: &str) -> Option<(PathBuf, SourceKind)> {
        self.datasets
            .iter()
            .find(|d| d.name == name)
            .map(|d| (self.data_root.join(&d.path), d.kind))
    }

    /// Reject duplicate dataset names and empty names.
    pub fn validate(&self) -> IngestionResult<()> {
        for (i, entry) in self.datasets.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(IngestionError::Config {
                    message: format!("dataset #{i} has an empty name"),
                });
            }
            if self.datasets[..i].iter().any(|d| d.name == entry.name) {
                return Err(IngestionError::Config {
                    message: format!("duplicate dataset '{}'", entry.name),
                });
            }
        }
        Ok(())
    }
}
