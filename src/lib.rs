//! # Bootstrap Catalog
//!
//! CSS class catalog engine for Bootstrap-aware editor tooling: fetches or
//! reads a Bootstrap stylesheet, extracts its class rules into a catalog,
//! caches that catalog in memory and on disk, and ranks class names for
//! completion lists and class-attribute formatting.
//!
//! The engine is fail-open end to end: the single read entry point
//! ([`CatalogService::get_catalog`]) never surfaces an error to its caller.
//! Internal layers return precise `Result`s so failures stay observable in
//! tests and logs; only the service boundary collapses them to an empty
//! catalog.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod extract;
pub mod format;
pub mod rank;
pub mod source;
pub mod versions;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use cache::DiskCache;
pub use catalog::CatalogService;
pub use config::CatalogConfig;
pub use extract::extract_classes;
pub use format::{apply_edits, format_text, Edit};
pub use rank::{categorize, completion_candidates, rank_classes, sort_key, ClassCategory};
pub use source::SourceResolver;

// ---------------------------------------------------------------------------
// CssClass
// ---------------------------------------------------------------------------

/// One CSS class rule extracted from a stylesheet.
///
/// Serialized field names match the on-disk cache format
/// (`{"className": …, "declarationText": …}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssClass {
    /// The bare class token, without the leading selector dot.
    #[serde(rename = "className")]
    pub class_name: String,
    /// Pretty-printed rendering of the full rule (selector decoration,
    /// braces, properties), suitable for hover/completion documentation.
    #[serde(rename = "declarationText")]
    pub declaration: String,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// All classes extracted from one stylesheet snapshot, in source order.
///
/// Class names are unique within a catalog; the extractor keeps the first
/// rule it sees for a name and skips later duplicates. Serializes as a bare
/// JSON array, which is the cache-entry format — there is no version field,
/// and a cache file that fails to parse is treated as a miss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    classes: Vec<CssClass>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CssClass> {
        self.classes.iter()
    }

    pub fn classes(&self) -> &[CssClass] {
        &self.classes
    }

    /// Look up a class by exact name (hover path).
    pub fn find(&self, name: &str) -> Option<&CssClass> {
        self.classes.iter().find(|c| c.class_name == name)
    }
}

impl From<Vec<CssClass>> for Catalog {
    fn from(classes: Vec<CssClass>) -> Self {
        Self { classes }
    }
}

impl FromIterator<CssClass> for Catalog {
    fn from_iter<I: IntoIterator<Item = CssClass>>(iter: I) -> Self {
        Self {
            classes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CssClass;
    type IntoIter = std::slice::Iter<'a, CssClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.iter()
    }
}

// ---------------------------------------------------------------------------
// CatalogIdentity
// ---------------------------------------------------------------------------

/// The key distinguishing one catalog from another: a Bootstrap version
/// fetched from the CDN, or a local stylesheet path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogIdentity {
    /// A published Bootstrap version, e.g. `"5.3.3"`.
    Version(String),
    /// A stylesheet on the local filesystem.
    LocalFile(PathBuf),
}

impl CatalogIdentity {
    /// Identity for a CDN-published version, normalized so that `"5.3"`
    /// and `"5.3.0"` name the same catalog.
    pub fn version(version: impl Into<String>) -> Self {
        Self::Version(source::normalize_version(&version.into()))
    }

    /// Identity for a local stylesheet path.
    pub fn local_file(path: impl Into<PathBuf>) -> Self {
        Self::LocalFile(path.into())
    }
}

impl fmt::Display for CatalogIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIdentity::Version(v) => write!(f, "bootstrap@{v}"),
            CatalogIdentity::LocalFile(p) => write!(f, "{}", p.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a remote stylesheet fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unexpected HTTP status {0}")]
    BadStatus(u16),

    #[error("response content-type is not text/css (got {0:?})")]
    BadContentType(Option<String>),

    #[error("response body is empty")]
    EmptyBody,

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
}

/// A stylesheet source could not be resolved to raw CSS text.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to read stylesheet at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
