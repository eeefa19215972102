//! Point-in-time view of the whole concept graph
//!
//! Built from one `scan_all`, so every traversal inside a request sees the
//! same parents and children even while writers keep going.

use indexmap::IndexMap;
use ontology_core::{Concept, ConceptRecord, OntologyError, Result};
use std::collections::HashMap;

/// Merged concepts plus a reverse (`parent -> children`) adjacency list
#[derive(Debug, Clone, Default)]
pub struct HierarchyIndex {
    concepts: IndexMap<String, Concept>,
    children: HashMap<String, Vec<String>>,
}

impl HierarchyIndex {
    /// Group raw records by name (first-seen order) and merge each group
    #[must_use]
    pub fn from_records(records: Vec<ConceptRecord>) -> Self {
        let mut grouped: IndexMap<String, Vec<ConceptRecord>> = IndexMap::new();
        for record in records {
            grouped.entry(record.name.clone()).or_default().push(record);
        }

        let concepts: IndexMap<String, Concept> = grouped
            .into_iter()
            .filter_map(|(name, records)| Concept::merge(records).map(|c| (name, c)))
            .collect();

        // Children are listed in the scan order of the child concepts
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        for concept in concepts.values() {
            for parent in &concept.parents {
                children
                    .entry(parent.clone())
                    .or_default()
                    .push(concept.name.clone());
            }
        }

        Self { concepts, children }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Concept> {
        self.concepts.get(name)
    }

    /// Like [`get`](Self::get) but unknown names are an error
    ///
    /// # Errors
    ///
    /// Returns `OntologyError::ConceptNotFound` if no record carries `name`
    pub fn require(&self, name: &str) -> Result<&Concept> {
        self.get(name)
            .ok_or_else(|| OntologyError::concept_not_found(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.concepts.contains_key(name)
    }

    /// Parents of `name`; dangling parents are kept, unknown names have none
    #[must_use]
    pub fn parents(&self, name: &str) -> &[String] {
        self.concepts
            .get(name)
            .map(|c| c.parents.as_slice())
            .unwrap_or_default()
    }

    /// Concepts listing `name` as a parent; `name` itself need not exist
    #[must_use]
    pub fn children(&self, name: &str) -> &[String] {
        self.children
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Concepts without parents, in scan order
    pub fn roots(&self) -> impl Iterator<Item = &str> {
        self.concepts
            .values()
            .filter(|c| c.is_root())
            .map(|c| c.name.as_str())
    }

    /// Every merged concept, in scan order
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}
