//! One concept store per database name

use dashmap::DashMap;
use ontology_core::ConceptStore;
use std::sync::Arc;
use tracing::debug;

use super::memory::MemoryConceptStore;

/// Maps database names to stores; unknown databases start out empty
#[derive(Default)]
pub struct StoreRegistry {
    stores: DashMap<String, Arc<dyn ConceptStore>>,
}

impl StoreRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a store to a database name, replacing any previous one
    pub fn register(&self, database: impl Into<String>, store: Arc<dyn ConceptStore>) {
        self.stores.insert(database.into(), store);
    }

    /// The store for `database`, creating an empty in-memory one on first use
    #[must_use]
    pub fn get_or_create(&self, database: &str) -> Arc<dyn ConceptStore> {
        self.stores
            .entry(database.to_string())
            .or_insert_with(|| {
                debug!(database, "creating empty in-memory store");
                Arc::new(MemoryConceptStore::new())
            })
            .clone()
    }

    /// Drop a database's store entirely
    pub fn drop_database(&self, database: &str) -> bool {
        self.stores.remove(database).is_some()
    }

    #[must_use]
    pub fn databases(&self) -> Vec<String> {
        self.stores.iter().map(|e| e.key().clone()).collect()
    }
}

impl std::fmt::Debug for StoreRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreRegistry")
            .field("databases", &self.databases())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontology_core::ConceptRecord;

    #[tokio::test]
    async fn test_databases_are_isolated() -> ontology_core::Result<()> {
        let registry = StoreRegistry::new();
        registry
            .get_or_create("unittest")
            .insert(ConceptRecord::new("concept"))
            .await?;

        assert_eq!(registry.get_or_create("unittest").scan_all().await?.len(), 1);
        assert!(registry.get_or_create("other").scan_all().await?.is_empty());

        assert!(registry.drop_database("unittest"));
        assert!(registry.get_or_create("unittest").scan_all().await?.is_empty());
        Ok(())
    }
}
