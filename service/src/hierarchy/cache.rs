//! Per-database snapshot cache
//!
//! A snapshot is reused until it expires or an edit on the same database
//! invalidates it. Each slot carries a generation counter: a reader only
//! publishes the snapshot it built if no invalidation happened meanwhile, so
//! a slow scan can never overwrite the result of a newer write.

use dashmap::DashMap;
use ontology_core::config::CacheConfig;
use ontology_core::{ConceptStore, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use super::index::HierarchyIndex;

#[derive(Debug, Default)]
struct CacheSlot {
    generation: u64,
    snapshot: Option<(Arc<HierarchyIndex>, Instant)>,
}

/// Hierarchy snapshots keyed by database name
#[derive(Debug)]
pub struct SnapshotCache {
    enabled: bool,
    ttl: Duration,
    slots: DashMap<String, CacheSlot>,
}

impl SnapshotCache {
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            enabled: config.enabled,
            ttl: config.snapshot_ttl,
            slots: DashMap::new(),
        }
    }

    /// A fresh cached snapshot, if any
    #[must_use]
    pub fn get(&self, database: &str) -> Option<Arc<HierarchyIndex>> {
        if !self.enabled {
            return None;
        }
        let slot = self.slots.get(database)?;
        let (snapshot, built_at) = slot.snapshot.as_ref()?;
        (built_at.elapsed() < self.ttl).then(|| Arc::clone(snapshot))
    }

    fn generation(&self, database: &str) -> u64 {
        self.slots.get(database).map_or(0, |slot| slot.generation)
    }

    /// Publish a snapshot built while the slot was at `generation`
    fn store(&self, database: &str, generation: u64, snapshot: Arc<HierarchyIndex>) {
        if !self.enabled {
            return;
        }
        let mut slot = self.slots.entry(database.to_string()).or_default();
        if slot.generation == generation {
            slot.snapshot = Some((snapshot, Instant::now()));
        } else {
            debug!(database, "discarding snapshot built before an edit");
        }
    }

    /// Forget the snapshot of `database`; called after every write
    pub fn invalidate(&self, database: &str) {
        let mut slot = self.slots.entry(database.to_string()).or_default();
        slot.generation = slot.generation.wrapping_add(1);
        slot.snapshot = None;
    }

    /// Cached snapshot of `database`, scanning `store` when none is fresh
    ///
    /// # Errors
    ///
    /// Propagates store errors from `scan_all`
    pub async fn snapshot(
        &self,
        database: &str,
        store: &dyn ConceptStore,
    ) -> Result<Arc<HierarchyIndex>> {
        if let Some(snapshot) = self.get(database) {
            debug!(database, "hierarchy snapshot cache hit");
            return Ok(snapshot);
        }

        let generation = self.generation(database);
        let records = store.scan_all().await?;
        let snapshot = Arc::new(HierarchyIndex::from_records(records));
        debug!(
            database,
            concepts = snapshot.len(),
            "built hierarchy snapshot"
        );

        self.store(database, generation, Arc::clone(&snapshot));
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryConceptStore;
    use ontology_core::ConceptRecord;

    fn config(enabled: bool, ttl: Duration) -> CacheConfig {
        CacheConfig {
            enabled,
            snapshot_ttl: ttl,
        }
    }

    #[tokio::test]
    async fn test_snapshot_is_reused_until_invalidated() -> Result<()> {
        let store = MemoryConceptStore::from_records(vec![ConceptRecord::new("all")]);
        let cache = SnapshotCache::new(&config(true, Duration::from_secs(60)));

        let first = cache.snapshot("unittest", &store).await?;
        store.insert(ConceptRecord::new("object")).await?;
        let second = cache.snapshot("unittest", &store).await?;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);

        cache.invalidate("unittest");
        let third = cache.snapshot("unittest", &store).await?;
        assert_eq!(third.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_disabled_cache_always_scans() -> Result<()> {
        let store = MemoryConceptStore::from_records(vec![ConceptRecord::new("all")]);
        let cache = SnapshotCache::new(&config(false, Duration::from_secs(60)));

        let first = cache.snapshot("unittest", &store).await?;
        let second = cache.snapshot("unittest", &store).await?;
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(cache.get("unittest").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_expired_snapshot_is_rebuilt() -> Result<()> {
        let store = MemoryConceptStore::new();
        let cache = SnapshotCache::new(&config(true, Duration::ZERO));

        cache.snapshot("unittest", &store).await?;
        assert!(cache.get("unittest").is_none());
        Ok(())
    }

    #[test]
    fn test_stale_generation_is_not_published() {
        let cache = SnapshotCache::new(&config(true, Duration::from_secs(60)));
        let generation = cache.generation("unittest");
        cache.invalidate("unittest");

        cache.store("unittest", generation, Arc::new(HierarchyIndex::default()));
        assert!(cache.get("unittest").is_none());
    }
}
