//! Core trait definitions for the ontology service

use async_trait::async_trait;
use indexmap::{IndexMap, IndexSet};

use crate::context::OntologyContext;
use crate::error::Result;
use crate::types::{ConceptDelta, ConceptRecord, PropertyAssertion};
use crate::view::{HierarchyResult, ResolveOptions, ResolvedConcept, TraversalOptions};

/// Document store holding raw concept records
///
/// Implementations provide per-document atomicity for `upsert` and nothing
/// stronger. Errors are connectivity failures and are propagated as-is.
#[async_trait]
pub trait ConceptStore: Send + Sync {
    /// Every record named `name`, in record order
    async fn fetch_all(&self, name: &str) -> Result<Vec<ConceptRecord>>;

    /// Every record in the store, in record order
    async fn scan_all(&self) -> Result<Vec<ConceptRecord>>;

    /// Insert a record unless one with the same name exists, atomically
    ///
    /// Returns `false` and stores nothing when the name is taken.
    async fn insert(&self, record: ConceptRecord) -> Result<bool>;

    /// Apply a change to the existing records named `name`
    ///
    /// Never creates a record. Returns `false` when no record carries `name`
    /// or the delta matched nothing (for example pulling an absent triple).
    async fn upsert(&self, name: &str, delta: ConceptDelta) -> Result<bool>;

    /// Delete every record named `name`; returns how many were removed
    async fn delete(&self, name: &str) -> Result<usize>;
}

/// Read operations over the concept hierarchy
///
/// Unknown names never raise errors; they produce empty results.
#[async_trait]
pub trait OntologyQueries: Send + Sync {
    /// Property views, one per requested name, in request order
    async fn resolve(
        &self,
        ctx: &OntologyContext,
        names: &[String],
        options: ResolveOptions,
    ) -> Result<Vec<ResolvedConcept>>;

    /// Names of every concept without parents
    async fn roots(&self, ctx: &OntologyContext) -> Result<Vec<String>>;

    async fn ancestors(
        &self,
        ctx: &OntologyContext,
        name: &str,
        options: TraversalOptions,
    ) -> Result<HierarchyResult>;

    async fn descendants(
        &self,
        ctx: &OntologyContext,
        name: &str,
        options: TraversalOptions,
    ) -> Result<HierarchyResult>;

    /// Every filler of a local `(inverse, sem, _)` triple
    async fn inverses(&self, ctx: &OntologyContext) -> Result<IndexSet<String>>;

    /// `relation` and all of its descendants, optionally with their inverses
    async fn relations(
        &self,
        ctx: &OntologyContext,
        include_inverses: bool,
    ) -> Result<IndexSet<String>>;

    /// `concept -> fillers` of every local triple whose slot is `property`
    async fn domains_and_ranges(
        &self,
        ctx: &OntologyContext,
        property: &str,
    ) -> Result<IndexMap<String, Vec<String>>>;
}

/// Mutating operations; every one checks the editing gate first
#[async_trait]
pub trait OntologyEdits: Send + Sync {
    async fn define(&self, ctx: &OntologyContext, concept: &str, definition: &str) -> Result<()>;

    async fn insert(
        &self,
        ctx: &OntologyContext,
        concept: &str,
        assertion: PropertyAssertion,
    ) -> Result<()>;

    async fn remove(
        &self,
        ctx: &OntologyContext,
        concept: &str,
        assertion: PropertyAssertion,
    ) -> Result<()>;

    async fn block(
        &self,
        ctx: &OntologyContext,
        concept: &str,
        assertion: PropertyAssertion,
    ) -> Result<()>;

    async fn unblock(
        &self,
        ctx: &OntologyContext,
        concept: &str,
        assertion: PropertyAssertion,
    ) -> Result<()>;

    async fn add_parent(&self, ctx: &OntologyContext, concept: &str, parent: &str) -> Result<()>;

    async fn remove_parent(&self, ctx: &OntologyContext, concept: &str, parent: &str)
    -> Result<()>;

    async fn add_concept(
        &self,
        ctx: &OntologyContext,
        name: &str,
        parent: &str,
        definition: &str,
    ) -> Result<()>;

    /// Delete a concept; with `include_usages` also unlink it from every child
    async fn remove_concept(
        &self,
        ctx: &OntologyContext,
        name: &str,
        include_usages: bool,
    ) -> Result<()>;
}
