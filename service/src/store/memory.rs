//! In-memory concept store
//!
//! Records live in one insertion-ordered vector behind a lock, so every
//! `upsert` is atomic for the whole store (stronger than the per-document
//! guarantee callers are allowed to rely on).

use async_trait::async_trait;
use ontology_core::{ConceptDelta, ConceptRecord, ConceptStore, Result};
use parking_lot::RwLock;
use std::path::Path;
use tracing::debug;

use super::seed::load_records;

/// Concept store backed by a `Vec<ConceptRecord>`
#[derive(Debug, Default)]
pub struct MemoryConceptStore {
    records: RwLock<Vec<ConceptRecord>>,
}

impl MemoryConceptStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_records(records: Vec<ConceptRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Build a store from a JSON or YAML dump of raw records
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub async fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let records = load_records(path.as_ref()).await?;
        Ok(Self::from_records(records))
    }

    /// Number of raw records (not distinct names)
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl ConceptStore for MemoryConceptStore {
    async fn fetch_all(&self, name: &str) -> Result<Vec<ConceptRecord>> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| r.name == name)
            .cloned()
            .collect())
    }

    async fn scan_all(&self) -> Result<Vec<ConceptRecord>> {
        Ok(self.records.read().clone())
    }

    async fn insert(&self, record: ConceptRecord) -> Result<bool> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.name == record.name) {
            debug!(concept = %record.name, "insert skipped, name already taken");
            return Ok(false);
        }
        records.push(record);
        Ok(true)
    }

    async fn upsert(&self, name: &str, delta: ConceptDelta) -> Result<bool> {
        let mut records = self.records.write();
        let positions: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.name == name)
            .map(|(i, _)| i)
            .collect();

        let Some(&first) = positions.first() else {
            return Ok(false);
        };

        let applied = match &delta {
            // New triples land after everything already merged from other records
            ConceptDelta::PushProperty(_) => {
                let last = positions[positions.len() - 1];
                records[last].apply(&delta)
            }
            ConceptDelta::PullProperty(_) => positions.iter().any(|&i| records[i].apply(&delta)),
            // parents, blocked set and metadata belong to the first record
            _ => records[first].apply(&delta),
        };
        Ok(applied)
    }

    async fn delete(&self, name: &str) -> Result<usize> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.name != name);
        Ok(before - records.len())
    }
}
