//! Validated mutations of the concept graph
//!
//! Every operation checks the editing gate before anything else, writes
//! through single-document store updates and invalidates the hierarchy
//! snapshot of the edited database afterwards.

use ontology_core::error::CascadeFailure;
use ontology_core::prelude::*;
use tracing::{error, info, warn};

use crate::hierarchy::{HierarchyIndex, SnapshotCache};

/// Edit engine bound to one request context
pub struct EditEngine<'a> {
    ctx: &'a OntologyContext,
    store: &'a dyn ConceptStore,
    cache: &'a SnapshotCache,
}

impl<'a> EditEngine<'a> {
    #[must_use]
    pub fn new(
        ctx: &'a OntologyContext,
        store: &'a dyn ConceptStore,
        cache: &'a SnapshotCache,
    ) -> Self {
        Self { ctx, store, cache }
    }

    fn authorize(&self, operation: &str) -> Result<()> {
        if self.ctx.editing_enabled {
            return Ok(());
        }
        warn!(
            database = %self.ctx.database,
            operation,
            "edit rejected, editing is disabled"
        );
        Err(OntologyError::forbidden(&self.ctx.database))
    }

    fn reject_self_parent(&self, concept: &str, parent: &str) -> Result<()> {
        if concept == parent {
            warn!(concept, "rejected self-parenting edit");
            return Err(OntologyError::self_parent());
        }
        Ok(())
    }

    /// Single-document write followed by snapshot invalidation
    async fn apply(&self, concept: &str, delta: ConceptDelta) -> Result<bool> {
        let applied = self.store.upsert(concept, delta).await?;
        self.cache.invalidate(&self.ctx.database);
        Ok(applied)
    }

    /// Write a delta that always matches an existing concept
    ///
    /// Existence is checked by the same store call that writes, so a missing
    /// concept is reported instead of being created.
    async fn apply_existing(&self, concept: &str, delta: ConceptDelta) -> Result<()> {
        if !self.apply(concept, delta).await? {
            warn!(database = %self.ctx.database, concept, "edit target does not exist");
            return Err(OntologyError::concept_not_found(concept));
        }
        Ok(())
    }

    /// Set `metadata.definition`
    ///
    /// # Errors
    ///
    /// `Forbidden` when editing is disabled, `ConceptNotFound` for an
    /// unknown concept, or a propagated store error
    pub async fn define(&self, concept: &str, definition: &str) -> Result<()> {
        self.authorize("define")?;
        self.apply_existing(concept, ConceptDelta::SetDefinition(definition.to_string()))
            .await?;
        info!(database = %self.ctx.database, concept, "definition updated");
        Ok(())
    }

    /// Append a local triple; duplicates are allowed
    ///
    /// # Errors
    ///
    /// `Forbidden`, `ConceptNotFound`, or a propagated store error
    pub async fn insert(&self, concept: &str, assertion: PropertyAssertion) -> Result<()> {
        self.authorize("insert")?;
        self.apply_existing(concept, ConceptDelta::PushProperty(assertion.clone()))
            .await?;
        info!(database = %self.ctx.database, concept, %assertion, "property inserted");
        Ok(())
    }

    /// Remove one matching local triple
    ///
    /// # Errors
    ///
    /// `Forbidden`, `PropertyNotFound` when no such triple is asserted, or a
    /// propagated store error
    pub async fn remove(&self, concept: &str, assertion: PropertyAssertion) -> Result<()> {
        self.authorize("remove")?;
        if !self
            .apply(concept, ConceptDelta::PullProperty(assertion.clone()))
            .await?
        {
            warn!(concept, %assertion, "property to remove is not asserted");
            return Err(OntologyError::property_not_found(concept, assertion));
        }
        info!(database = %self.ctx.database, concept, %assertion, "property removed");
        Ok(())
    }

    /// Add a triple to the blocked set
    ///
    /// # Errors
    ///
    /// `Forbidden`, `ConceptNotFound`, or a propagated store error
    pub async fn block(&self, concept: &str, assertion: PropertyAssertion) -> Result<()> {
        self.authorize("block")?;
        self.apply_existing(concept, ConceptDelta::AddBlocked(assertion.clone()))
            .await?;
        info!(database = %self.ctx.database, concept, %assertion, "property blocked");
        Ok(())
    }

    /// Remove a triple from the blocked set if present
    ///
    /// # Errors
    ///
    /// `Forbidden` or a propagated store error
    pub async fn unblock(&self, concept: &str, assertion: PropertyAssertion) -> Result<()> {
        self.authorize("unblock")?;
        self.apply(concept, ConceptDelta::RemoveBlocked(assertion.clone())).await?;
        info!(database = %self.ctx.database, concept, %assertion, "property unblocked");
        Ok(())
    }

    /// Append `parent` unless it is already listed
    ///
    /// # Errors
    ///
    /// `Forbidden`, `InvalidOperation` when `parent == concept`,
    /// `ConceptNotFound`, or a propagated store error
    pub async fn add_parent(&self, concept: &str, parent: &str) -> Result<()> {
        self.authorize("add_parent")?;
        self.reject_self_parent(concept, parent)?;
        self.apply_existing(concept, ConceptDelta::AddParent(parent.to_string()))
            .await?;
        info!(database = %self.ctx.database, concept, parent, "parent added");
        Ok(())
    }

    /// Remove `parent` if listed
    ///
    /// # Errors
    ///
    /// `Forbidden` or a propagated store error
    pub async fn remove_parent(&self, concept: &str, parent: &str) -> Result<()> {
        self.authorize("remove_parent")?;
        self.apply(concept, ConceptDelta::RemoveParent(parent.to_string()))
            .await?;
        info!(database = %self.ctx.database, concept, parent, "parent removed");
        Ok(())
    }

    /// Create a concept with a single parent and a definition
    ///
    /// # Errors
    ///
    /// `Forbidden`, `InvalidOperation` when `parent == name` or the name is
    /// taken, or a propagated store error
    pub async fn add_concept(&self, name: &str, parent: &str, definition: &str) -> Result<()> {
        self.authorize("add_concept")?;
        self.reject_self_parent(name, parent)?;

        let record = ConceptRecord::new(name)
            .with_parents([parent])
            .with_definition(definition);
        if !self.store.insert(record).await? {
            warn!(database = %self.ctx.database, concept = name, "concept already exists");
            return Err(OntologyError::invalid_operation(format!(
                "Concept '{name}' already exists"
            )));
        }
        self.cache.invalidate(&self.ctx.database);

        info!(database = %self.ctx.database, concept = name, parent, "concept added");
        Ok(())
    }

    /// Delete every record of `name`; optionally unlink it from its children
    ///
    /// The deletion happens first. Unlinks are independent single-document
    /// writes, so a failure part-way leaves stray parent edges behind that
    /// traversal already tolerates; those are reported as `PartialFailure`.
    ///
    /// # Errors
    ///
    /// `Forbidden`, a propagated store error from the deletion or the scan,
    /// or `PartialFailure` naming the children still pointing at `name`
    pub async fn remove_concept(&self, name: &str, include_usages: bool) -> Result<()> {
        self.authorize("remove_concept")?;

        let deleted = self.store.delete(name).await?;
        self.cache.invalidate(&self.ctx.database);
        info!(database = %self.ctx.database, concept = name, records = deleted, "concept removed");

        if !include_usages {
            return Ok(());
        }

        let records = match self.store.scan_all().await {
            Ok(records) => records,
            Err(e) => {
                error!(concept = name, error = %e, "could not scan for usages to unlink");
                return Err(e);
            }
        };
        let index = HierarchyIndex::from_records(records);

        let mut unlinked = Vec::new();
        let mut failed = Vec::new();
        for child in index.children(name) {
            match self
                .store
                .upsert(child, ConceptDelta::RemoveParent(name.to_string()))
                .await
            {
                Ok(_) => unlinked.push(child.clone()),
                Err(e) => {
                    error!(concept = name, child = %child, error = %e, "failed to unlink usage");
                    failed.push(CascadeFailure {
                        concept: child.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        self.cache.invalidate(&self.ctx.database);

        if failed.is_empty() {
            info!(concept = name, unlinked = unlinked.len(), "usages unlinked");
            Ok(())
        } else {
            Err(OntologyError::PartialFailure {
                concept: name.to_string(),
                unlinked,
                failed,
            })
        }
    }
}
