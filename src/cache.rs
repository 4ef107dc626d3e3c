//! On-disk catalog cache, surviving across editor sessions.
//!
//! Each entry is one catalog serialized as a bare JSON array, stored under a
//! file name derived from the catalog identity. Cache failures are logged
//! and swallowed at the public surface — a broken cache degrades to misses
//! and no-ops, never to a failed completion request. The fallible inner
//! operations stay separate so tests can assert precise failure reasons.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};

use crate::source::normalize_version;
use crate::{Catalog, CatalogIdentity};

/// Cache entries are `bootstrap-css-v{version}.json` for CDN catalogs and
/// `bootstrap-css-local-{sha256}.json` for local stylesheets. `evict_all`
/// matches exactly this convention, so unrelated files in the directory
/// survive eviction.
const ENTRY_PREFIX: &str = "bootstrap-css-";
const ENTRY_SUFFIX: &str = ".json";

/// An I/O or serialization failure at the cache boundary.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache entry serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// DiskCache
// ---------------------------------------------------------------------------

/// Persists catalogs as JSON files under a cache directory.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    /// Cache under the platform user-cache directory
    /// (e.g. `~/.cache/bootstrap-catalog` on Linux). Falls back to the
    /// system temp directory when the platform reports no cache dir.
    pub fn new() -> Self {
        let base = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
        Self {
            dir: base.join("bootstrap-catalog"),
        }
    }

    /// Cache under an explicit directory (tests point this at a tempdir).
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Deterministic cache file name for an identity.
    ///
    /// Versions embed directly, normalized first so `"5.3"` and `"5.3.0"`
    /// share one entry (and one memory-tier slot) no matter how the
    /// identity was constructed. Local paths are hashed into a fixed-length
    /// filesystem-safe token (long paths and path separators must not leak
    /// into the file name), with a prefix distinct from version entries.
    pub fn entry_file_name(identity: &CatalogIdentity) -> String {
        match identity {
            CatalogIdentity::Version(version) => {
                format!("{ENTRY_PREFIX}v{}{ENTRY_SUFFIX}", normalize_version(version))
            }
            CatalogIdentity::LocalFile(path) => {
                let digest = Sha256::digest(path.to_string_lossy().as_bytes());
                format!("{ENTRY_PREFIX}local-{}{ENTRY_SUFFIX}", hex::encode(digest))
            }
        }
    }

    fn entry_path(&self, identity: &CatalogIdentity) -> PathBuf {
        self.dir.join(Self::entry_file_name(identity))
    }

    /// Read the cached catalog for an identity.
    ///
    /// Returns `None` on a missing file, an unreadable file, or a file that
    /// fails to parse — a cache read can only ever be a hit or a miss.
    pub async fn read(&self, identity: &CatalogIdentity) -> Option<Catalog> {
        let path = self.entry_path(identity);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_slice::<Catalog>(&bytes) {
            Ok(catalog) => {
                debug!(path = %path.display(), classes = catalog.len(), "disk cache hit");
                Some(catalog)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cache entry unparseable, treating as miss");
                None
            }
        }
    }

    /// Persist a catalog for an identity, overwriting any existing entry.
    /// Failures are logged and swallowed.
    pub async fn write(&self, identity: &CatalogIdentity, catalog: &Catalog) {
        if let Err(err) = self.try_write(identity, catalog).await {
            warn!(%identity, error = %err, "cache write failed, entry not persisted");
        }
    }

    async fn try_write(
        &self,
        identity: &CatalogIdentity,
        catalog: &Catalog,
    ) -> Result<(), CacheError> {
        // Racing an existing directory is fine; create_dir_all is a no-op then.
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_vec(catalog)?;
        tokio::fs::write(self.entry_path(identity), json).await?;
        Ok(())
    }

    /// Delete every cache entry matching the naming convention. Returns
    /// whether any file was deleted. Per-file failures are logged and do not
    /// abort the remaining deletions.
    pub async fn evict_all(&self) -> bool {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            // Missing directory means an empty cache.
            Err(_) => return false,
        };

        let mut deleted = false;
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(err) => {
                    warn!(dir = %self.dir.display(), error = %err, "cache eviction stopped early");
                    break;
                }
            };

            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.starts_with(ENTRY_PREFIX) || !name.ends_with(ENTRY_SUFFIX) {
                continue;
            }

            match tokio::fs::remove_file(entry.path()).await {
                Ok(()) => deleted = true,
                Err(err) => {
                    warn!(path = %entry.path().display(), error = %err, "failed to delete cache entry");
                }
            }
        }
        deleted
    }
}

impl Default for DiskCache {
    fn default() -> Self {
        Self::new()
    }
}
