//! Discovery of ingestible sources under a data directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{IngestionError, IngestionResult};

/// What a source file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Comma-separated tabular data.
    Csv,
    /// A Markdown report served verbatim.
    Markdown,
}

impl SourceKind {
    /// Parse a source kind from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// HTTP content type used when serving the raw source.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Markdown => "text/markdown; charset=utf-8",
        }
    }
}

/// A discovered source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    /// File stem, used as the lookup name.
    pub name: String,
    /// Path to the file.
    pub path: PathBuf,
    pub kind: SourceKind,
}

/// Recursively find CSV and Markdown files under `root`, sorted by name then path.
///
/// Hidden entries (names starting with `.`) are skipped. Fails if `root` itself cannot be read.
pub fn discover_sources(root: impl AsRef<Path>) -> IngestionResult<Vec<SourceEntry>> {
    let root = root.as_ref();
    let mut out = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_str()));

    for entry in walker {
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(io) => IngestionError::Io(io),
            None => IngestionError::Config {
                message: format!("filesystem loop while scanning {}", root.display()),
            },
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let kind = match path.extension().and_then(|e| e.to_str()).and_then(SourceKind::from_extension) {
            Some(kind) => kind,
            None => continue,
        };
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        out.push(SourceEntry {
            name: name.to_owned(),
            path: path.to_path_buf(),
            kind,
        });
    }

    out.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
    Ok(out)
}

fn is_hidden(name: Option<&str>) -> bool {
    name.is_some_and(|n| n.starts_with('.'))
}
