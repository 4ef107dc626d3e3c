//! Configuration snapshot supplied by the host editor.
//!
//! The host owns storage and change notification; this crate only consumes
//! immutable snapshots and derives the active catalog identity from them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::CatalogIdentity;

/// One snapshot of the user-facing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogConfig {
    /// Bootstrap version to fetch from the CDN when no local file is used.
    pub version: String,
    /// Prefer a local stylesheet over the CDN.
    pub use_local_file: bool,
    /// Path of the local stylesheet; ignored unless `use_local_file` is set.
    pub css_file_path: String,
    /// Offer completion suggestions at all.
    pub show_suggestions: bool,
    /// Insert the class name on accept (otherwise suggestions are
    /// display-only).
    pub auto_complete: bool,
    /// Run the class-attribute formatter on save.
    pub format_on_save: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            version: "5.3.3".to_string(),
            use_local_file: false,
            css_file_path: String::new(),
            show_suggestions: true,
            auto_complete: true,
            format_on_save: true,
        }
    }
}

impl CatalogConfig {
    /// The catalog identity this configuration selects. Local-file mode
    /// with an empty path falls back to the configured version.
    pub fn identity(&self) -> CatalogIdentity {
        if self.use_local_file && !self.css_file_path.is_empty() {
            CatalogIdentity::LocalFile(PathBuf::from(&self.css_file_path))
        } else {
            CatalogIdentity::version(self.version.as_str())
        }
    }
}
