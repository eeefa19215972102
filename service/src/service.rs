//! Ontology service implementation

use async_trait::async_trait;
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;
use tracing::debug;

use ontology_core::{
    config::OntologyConfig,
    context::OntologyContext,
    error::Result,
    traits::{ConceptStore, OntologyEdits, OntologyQueries},
    types::PropertyAssertion,
    view::{HierarchyResult, ResolveOptions, ResolvedConcept, TraversalOptions},
};

use crate::edit::EditEngine;
use crate::hierarchy::{HierarchyIndex, SnapshotCache};
use crate::inheritance::InheritanceResolver;
use crate::relations::RelationIndex;
use crate::store::StoreRegistry;
use crate::traversal::GraphTraversal;

/// Main ontology service implementation
///
/// Queries run against a per-database hierarchy snapshot; edits go through
/// the [`EditEngine`] and invalidate that snapshot.
pub struct OntologyServiceImpl {
    config: OntologyConfig,
    stores: StoreRegistry,
    cache: SnapshotCache,
}

impl OntologyServiceImpl {
    /// Create a service with empty in-memory databases
    #[must_use]
    pub fn new(config: OntologyConfig) -> Self {
        let cache = SnapshotCache::new(&config.cache);
        Self {
            config,
            stores: StoreRegistry::new(),
            cache,
        }
    }

    /// Create a service whose `database` is backed by `store`
    #[must_use]
    pub fn with_store(
        config: OntologyConfig,
        database: impl Into<String>,
        store: Arc<dyn ConceptStore>,
    ) -> Self {
        let service = Self::new(config);
        service.stores.register(database, store);
        service
    }

    #[must_use]
    pub fn config(&self) -> &OntologyConfig {
        &self.config
    }

    /// Default request context derived from configuration
    #[must_use]
    pub fn context(&self) -> OntologyContext {
        OntologyContext::from_config(&self.config)
    }

    #[must_use]
    pub fn stores(&self) -> &StoreRegistry {
        &self.stores
    }

    /// Store backing the context's database
    #[must_use]
    pub fn store(&self, ctx: &OntologyContext) -> Arc<dyn ConceptStore> {
        self.stores.get_or_create(&ctx.database)
    }

    /// Hierarchy snapshot of the context's database
    ///
    /// # Errors
    ///
    /// Propagates store errors
    pub async fn snapshot(&self, ctx: &OntologyContext) -> Result<Arc<HierarchyIndex>> {
        let store = self.store(ctx);
        self.cache.snapshot(&ctx.database, store.as_ref()).await
    }

    /// Drop the cached snapshot of `database`
    pub fn invalidate(&self, database: &str) {
        debug!(database, "snapshot invalidated");
        self.cache.invalidate(database);
    }

    fn traversal<'a>(&self, index: &'a HierarchyIndex) -> GraphTraversal<'a> {
        GraphTraversal::new(index, self.config.traversal.max_paths)
    }
}

impl std::fmt::Debug for OntologyServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OntologyServiceImpl")
            .field("config", &self.config)
            .field("stores", &self.stores)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl OntologyQueries for OntologyServiceImpl {
    async fn resolve(
        &self,
        ctx: &OntologyContext,
        names: &[String],
        options: ResolveOptions,
    ) -> Result<Vec<ResolvedConcept>> {
        let index = self.snapshot(ctx).await?;
        Ok(InheritanceResolver::new(&index).resolve_all(names, options))
    }

    async fn roots(&self, ctx: &OntologyContext) -> Result<Vec<String>> {
        let index = self.snapshot(ctx).await?;
        Ok(index.roots().map(str::to_string).collect())
    }

    async fn ancestors(
        &self,
        ctx: &OntologyContext,
        name: &str,
        options: TraversalOptions,
    ) -> Result<HierarchyResult> {
        let index = self.snapshot(ctx).await?;
        self.traversal(&index).ancestors(name, options)
    }

    async fn descendants(
        &self,
        ctx: &OntologyContext,
        name: &str,
        options: TraversalOptions,
    ) -> Result<HierarchyResult> {
        let index = self.snapshot(ctx).await?;
        self.traversal(&index).descendants(name, options)
    }

    async fn inverses(&self, ctx: &OntologyContext) -> Result<IndexSet<String>> {
        let index = self.snapshot(ctx).await?;
        Ok(RelationIndex::new(&index).inverses())
    }

    async fn relations(
        &self,
        ctx: &OntologyContext,
        include_inverses: bool,
    ) -> Result<IndexSet<String>> {
        let index = self.snapshot(ctx).await?;
        Ok(RelationIndex::new(&index).relations(include_inverses))
    }

    async fn domains_and_ranges(
        &self,
        ctx: &OntologyContext,
        property: &str,
    ) -> Result<IndexMap<String, Vec<String>>> {
        let index = self.snapshot(ctx).await?;
        Ok(RelationIndex::new(&index).domains_and_ranges(property))
    }
}

#[async_trait]
impl OntologyEdits for OntologyServiceImpl {
    async fn define(&self, ctx: &OntologyContext, concept: &str, definition: &str) -> Result<()> {
        let store = self.store(ctx);
        EditEngine::new(ctx, store.as_ref(), &self.cache)
            .define(concept, definition)
            .await
    }

    async fn insert(
        &self,
        ctx: &OntologyContext,
        concept: &str,
        assertion: PropertyAssertion,
    ) -> Result<()> {
        let store = self.store(ctx);
        EditEngine::new(ctx, store.as_ref(), &self.cache)
            .insert(concept, assertion)
            .await
    }

    async fn remove(
        &self,
        ctx: &OntologyContext,
        concept: &str,
        assertion: PropertyAssertion,
    ) -> Result<()> {
        let store = self.store(ctx);
        EditEngine::new(ctx, store.as_ref(), &self.cache)
            .remove(concept, assertion)
            .await
    }

    async fn block(
        &self,
        ctx: &OntologyContext,
        concept: &str,
        assertion: PropertyAssertion,
    ) -> Result<()> {
        let store = self.store(ctx);
        EditEngine::new(ctx, store.as_ref(), &self.cache)
            .block(concept, assertion)
            .await
    }

    async fn unblock(
        &self,
        ctx: &OntologyContext,
        concept: &str,
        assertion: PropertyAssertion,
    ) -> Result<()> {
        let store = self.store(ctx);
        EditEngine::new(ctx, store.as_ref(), &self.cache)
            .unblock(concept, assertion)
            .await
    }

    async fn add_parent(&self, ctx: &OntologyContext, concept: &str, parent: &str) -> Result<()> {
        let store = self.store(ctx);
        EditEngine::new(ctx, store.as_ref(), &self.cache)
            .add_parent(concept, parent)
            .await
    }

    async fn remove_parent(
        &self,
        ctx: &OntologyContext,
        concept: &str,
        parent: &str,
    ) -> Result<()> {
        let store = self.store(ctx);
        EditEngine::new(ctx, store.as_ref(), &self.cache)
            .remove_parent(concept, parent)
            .await
    }

    async fn add_concept(
        &self,
        ctx: &OntologyContext,
        name: &str,
        parent: &str,
        definition: &str,
    ) -> Result<()> {
        let store = self.store(ctx);
        EditEngine::new(ctx, store.as_ref(), &self.cache)
            .add_concept(name, parent, definition)
            .await
    }

    async fn remove_concept(
        &self,
        ctx: &OntologyContext,
        name: &str,
        include_usages: bool,
    ) -> Result<()> {
        let store = self.store(ctx);
        EditEngine::new(ctx, store.as_ref(), &self.cache)
            .remove_concept(name, include_usages)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryConceptStore;
    use ontology_core::types::ConceptRecord;

    fn service() -> OntologyServiceImpl {
        let mut config = OntologyConfig::default();
        config.store.active_database = "unittest".to_string();
        config.editing.enabled = true;
        let store = MemoryConceptStore::from_records(vec![
            ConceptRecord::new("parent"),
            ConceptRecord::new("child").with_parents(["parent"]),
        ]);
        OntologyServiceImpl::with_store(config, "unittest", Arc::new(store))
    }

    #[tokio::test]
    async fn test_edit_is_visible_to_next_query() -> Result<()> {
        let service = service();
        let ctx = service.context();

        assert_eq!(service.roots(&ctx).await?, vec!["parent".to_string()]);
        service.add_concept(&ctx, "other", "parent", "").await?;
        service.remove_parent(&ctx, "child", "parent").await?;

        assert_eq!(
            service.roots(&ctx).await?,
            vec!["parent".to_string(), "child".to_string()]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_databases_do_not_share_snapshots() -> Result<()> {
        let service = service();
        let ctx = service.context();
        let other = ctx.with_database("other");

        assert_eq!(service.snapshot(&ctx).await?.len(), 2);
        assert!(service.snapshot(&other).await?.is_empty());

        service.add_concept(&other, "lonely", "all", "").await?;
        assert_eq!(service.snapshot(&ctx).await?.len(), 2);
        assert_eq!(service.snapshot(&other).await?.len(), 1);
        Ok(())
    }
}
