//! Stylesheet source resolution: CDN fetch or local file read.
//!
//! Produces raw CSS text for a [`CatalogIdentity`], or a precise error.
//! No retries happen here; the caller decides whether a failure is fatal
//! (for the catalog service it never is — it collapses to an empty catalog).

use std::path::Path;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::{CatalogIdentity, FetchError, SourceError};

/// Base URL of the jsDelivr npm mirror serving Bootstrap releases.
pub const DEFAULT_CDN_BASE: &str = "https://cdn.jsdelivr.net/npm";

/// Hard cap on a CDN request; a hung fetch must not stall the editor.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Version normalization
// ---------------------------------------------------------------------------

/// Normalize a version string to the three-part form used everywhere in this
/// crate (URLs, cache keys, identity equality): a two-part numeric version
/// like `"5.3"` becomes `"5.3.0"`. Anything else passes through untouched.
pub fn normalize_version(version: &str) -> String {
    let parts: Vec<&str> = version.split('.').collect();
    let numeric = |s: &&str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    if parts.len() == 2 && parts.iter().all(numeric) {
        format!("{version}.0")
    } else {
        version.to_string()
    }
}

// ---------------------------------------------------------------------------
// SourceResolver
// ---------------------------------------------------------------------------

/// Obtains raw stylesheet text, either from the CDN or a local file.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    client: reqwest::Client,
    cdn_base: String,
}

impl SourceResolver {
    pub fn new() -> Self {
        Self::with_cdn_base(DEFAULT_CDN_BASE)
    }

    /// Point the resolver at an alternate CDN base URL (tests use a mock
    /// server here).
    pub fn with_cdn_base(cdn_base: impl Into<String>) -> Self {
        Self::with_cdn_base_and_timeout(cdn_base, FETCH_TIMEOUT)
    }

    /// Full control over base URL and request timeout; tests shrink the
    /// timeout to exercise the timeout classification without waiting out
    /// the production bound.
    pub fn with_cdn_base_and_timeout(cdn_base: impl Into<String>, timeout: Duration) -> Self {
        // Only fails if no TLS backend can be initialized.
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("HTTP client construction");
        Self {
            client,
            cdn_base: cdn_base.into(),
        }
    }

    /// URL of the full (non-minified) stylesheet for a version.
    pub fn css_url(&self, version: &str) -> String {
        format!(
            "{}/bootstrap@{}/dist/css/bootstrap.css",
            self.cdn_base,
            normalize_version(version)
        )
    }

    /// Resolve an identity to raw CSS text.
    pub async fn resolve(&self, identity: &CatalogIdentity) -> Result<String, SourceError> {
        match identity {
            CatalogIdentity::Version(version) => Ok(self.fetch_remote(version).await?),
            CatalogIdentity::LocalFile(path) => Self::read_local(path).await,
        }
    }

    /// GET the stylesheet for a version from the CDN.
    ///
    /// Success requires status 200, a content-type containing `text/css`,
    /// and a non-empty body; anything else is a [`FetchError`] naming the
    /// violation.
    pub async fn fetch_remote(&self, version: &str) -> Result<String, FetchError> {
        let url = self.css_url(version);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        if status.as_u16() != 200 {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        match &content_type {
            Some(ct) if ct.contains("text/css") => {}
            _ => return Err(FetchError::BadContentType(content_type)),
        }

        let body = response.text().await.map_err(classify_reqwest_error)?;
        if body.is_empty() {
            return Err(FetchError::EmptyBody);
        }

        Ok(body)
    }

    /// Read a local stylesheet as UTF-8 text.
    pub async fn read_local(path: &Path) -> Result<String, SourceError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SourceError::Read {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl Default for SourceResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_pads_two_part_versions() {
        assert_eq!(normalize_version("5.3"), "5.3.0");
        assert_eq!(normalize_version("4.6"), "4.6.0");
    }

    #[test]
    fn normalize_keeps_three_part_versions() {
        assert_eq!(normalize_version("5.3.3"), "5.3.3");
    }

    #[test]
    fn normalize_passes_through_non_numeric() {
        assert_eq!(normalize_version("5.x"), "5.x");
        assert_eq!(normalize_version("latest"), "latest");
        assert_eq!(normalize_version("5."), "5.");
    }

    #[test]
    fn css_url_embeds_normalized_version() {
        let resolver = SourceResolver::new();
        assert_eq!(
            resolver.css_url("5.3.3"),
            "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.css"
        );
        assert_eq!(
            resolver.css_url("5.3"),
            "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.css"
        );
    }

    #[tokio::test]
    async fn read_local_missing_file_is_read_error() {
        let err = SourceResolver::read_local(Path::new("/nonexistent/bootstrap.css"))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
    }
}
