//! Catalog service: the single read path for "get me the current catalog".
//!
//! Read order is memory tier, disk tier, then resolve-and-extract, writing
//! back through both tiers on a miss. The service owns the in-memory tier
//! exclusively and replaces entries wholesale — catalogs are never mutated
//! in place. All failures collapse to an empty catalog at this boundary;
//! editor responsiveness outranks error surfacing, so the worst case is "no
//! suggestions right now" plus a log line.

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::DiskCache;
use crate::config::CatalogConfig;
use crate::extract::extract_classes;
use crate::source::SourceResolver;
use crate::{Catalog, CatalogIdentity, SourceError};

/// Orchestrates resolver, extractor, and both cache tiers.
#[derive(Debug)]
pub struct CatalogService {
    resolver: SourceResolver,
    disk: DiskCache,
    memory: DashMap<String, Catalog>,
    /// Serializes the miss path so concurrent first requests for an
    /// identity share one underlying fetch instead of racing duplicates.
    populate_lock: Mutex<()>,
}

impl CatalogService {
    pub fn new() -> Self {
        Self::with_parts(SourceResolver::new(), DiskCache::new())
    }

    /// Assemble a service from explicit collaborators (tests inject a mock
    /// CDN base and a tempdir-backed cache here).
    pub fn with_parts(resolver: SourceResolver, disk: DiskCache) -> Self {
        Self {
            resolver,
            disk,
            memory: DashMap::new(),
            populate_lock: Mutex::new(()),
        }
    }

    /// Get the catalog for an identity. Infallible by design: any resolver
    /// or extraction failure yields an empty catalog and a log entry.
    pub async fn get_catalog(&self, identity: &CatalogIdentity) -> Catalog {
        let key = DiskCache::entry_file_name(identity);
        if let Some(hit) = self.memory.get(&key) {
            return hit.clone();
        }

        let _guard = self.populate_lock.lock().await;
        // A request that raced us past the first check may have populated
        // the memory tier while we waited on the lock.
        if let Some(hit) = self.memory.get(&key) {
            return hit.clone();
        }

        if let Some(catalog) = self.disk.read(identity).await {
            if !catalog.is_empty() {
                self.memory.insert(key, catalog.clone());
                return catalog;
            }
        }

        match self.populate(identity).await {
            Ok(catalog) => {
                debug!(%identity, classes = catalog.len(), "catalog populated");
                self.memory.insert(key, catalog.clone());
                self.disk.write(identity, &catalog).await;
                catalog
            }
            Err(err) => {
                warn!(%identity, error = %err, "stylesheet resolution failed, serving empty catalog");
                Catalog::new()
            }
        }
    }

    /// Resolve and extract, with the failure reason intact. Only
    /// [`get_catalog`](Self::get_catalog) collapses this to an empty catalog.
    async fn populate(&self, identity: &CatalogIdentity) -> Result<Catalog, SourceError> {
        let raw_css = self.resolver.resolve(identity).await?;
        Ok(extract_classes(&raw_css))
    }

    /// Evict an identity from the memory tier and bulk-clear the disk tier.
    ///
    /// Called on a version or source switch. Disk eviction is deliberately
    /// whole-cache: only one identity is active at a time, and selective
    /// eviction would let stale entries for the old identity leak back in
    /// on a future miss. Returns whether any disk entry was deleted.
    pub async fn invalidate(&self, identity: &CatalogIdentity) -> bool {
        self.memory.remove(&DiskCache::entry_file_name(identity));
        self.disk.evict_all().await
    }

    /// Drop the whole memory tier and bulk-clear the disk tier.
    pub async fn invalidate_all(&self) -> bool {
        self.memory.clear();
        self.disk.evict_all().await
    }

    /// React to a configuration change: if the active identity changed
    /// (version switch, remote/local switch, or local path change), evict
    /// the previous identity. Returns whether an invalidation happened.
    pub async fn apply_config_change(
        &self,
        previous: &CatalogConfig,
        current: &CatalogConfig,
    ) -> bool {
        let old_identity = previous.identity();
        if old_identity == current.identity() {
            return false;
        }
        self.invalidate(&old_identity).await;
        true
    }

    /// Number of catalogs held in the memory tier.
    pub fn cached_identities(&self) -> usize {
        self.memory.len()
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}
