//! Known Bootstrap release table, embedded at build time.
//!
//! Backs the host's version picker. Loading falls back to a minimal
//! hardcoded table if the embedded asset ever fails to parse.

use serde::Deserialize;
use tracing::warn;

const VERSIONS_JSON: &str = include_str!("../assets/bootstrap-versions.json");

/// Available versions per major release line, newest first.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapVersions {
    pub v5: Vec<String>,
    pub v4: Vec<String>,
    pub v3: Vec<String>,
}

/// All known versions.
pub fn all() -> BootstrapVersions {
    match serde_json::from_str(VERSIONS_JSON) {
        Ok(versions) => versions,
        Err(err) => {
            warn!(error = %err, "embedded version table unparseable, using fallback");
            fallback()
        }
    }
}

/// The newest known v5 release.
pub fn latest() -> String {
    all()
        .v5
        .first()
        .cloned()
        .unwrap_or_else(|| "5.3.7".to_string())
}

fn fallback() -> BootstrapVersions {
    BootstrapVersions {
        v5: vec!["5.3.7".to_string()],
        v4: vec!["4.6.1".to_string()],
        v3: vec!["3.4.1".to_string()],
    }
}
