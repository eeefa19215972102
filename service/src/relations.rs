//! Relation vocabulary derived from the hierarchy
//!
//! Relations are the concept `relation` and everything below it; a relation
//! names its inverse through a local `(inverse, sem, X)` triple.

use indexmap::{IndexMap, IndexSet};

use crate::hierarchy::HierarchyIndex;
use crate::traversal::GraphTraversal;

/// Slot naming a relation's inverse
pub const INVERSE_SLOT: &str = "inverse";
/// Facet of the inverse triple
pub const SEM_FACET: &str = "sem";
/// Root of the relation subtree
pub const RELATION_ROOT: &str = "relation";

/// Relation queries over one hierarchy snapshot
pub struct RelationIndex<'a> {
    index: &'a HierarchyIndex,
}

impl<'a> RelationIndex<'a> {
    #[must_use]
    pub fn new(index: &'a HierarchyIndex) -> Self {
        Self { index }
    }

    /// Fillers of every local inverse triple, in scan order
    #[must_use]
    pub fn inverses(&self) -> IndexSet<String> {
        self.index
            .concepts()
            .flat_map(|c| c.local_fillers(INVERSE_SLOT, SEM_FACET))
            .map(str::to_string)
            .collect()
    }

    /// `relation` plus its descendants, and optionally their inverses
    #[must_use]
    pub fn relations(&self, include_inverses: bool) -> IndexSet<String> {
        let traversal = GraphTraversal::new(self.index, usize::MAX);
        let mut relations: IndexSet<String> = IndexSet::new();
        relations.insert(RELATION_ROOT.to_string());
        relations.extend(traversal.descendant_closure(RELATION_ROOT));

        if include_inverses {
            let inverses: Vec<String> = relations
                .iter()
                .filter_map(|name| self.index.get(name))
                .flat_map(|c| c.local_fillers(INVERSE_SLOT, SEM_FACET))
                .map(str::to_string)
                .collect();
            relations.extend(inverses);
        }

        relations
    }

    /// `concept -> fillers` for every local triple whose slot is `property`
    ///
    /// Facets are ignored, duplicates are kept and concepts without a match
    /// are left out.
    #[must_use]
    pub fn domains_and_ranges(&self, property: &str) -> IndexMap<String, Vec<String>> {
        self.index
            .concepts()
            .filter_map(|concept| {
                let fillers: Vec<String> = concept
                    .local_properties
                    .iter()
                    .filter(|a| a.slot == property)
                    .map(|a| a.filler.clone())
                    .collect();
                (!fillers.is_empty()).then(|| (concept.name.clone(), fillers))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontology_core::ConceptRecord;
    use pretty_assertions::assert_eq;

    fn relation_tree() -> HierarchyIndex {
        HierarchyIndex::from_records(vec![
            ConceptRecord::new("all"),
            ConceptRecord::new("relation").with_parents(["all"]),
            ConceptRecord::new("rel1")
                .with_parents(["relation"])
                .with_property("inverse", "sem", "rel1-of"),
            ConceptRecord::new("rel2")
                .with_parents(["relation"])
                .with_property("inverse", "sem", "rel2-of"),
            ConceptRecord::new("rel3")
                .with_parents(["rel2"])
                .with_property("inverse", "sem", "rel3-of"),
            ConceptRecord::new("rel4").with_parents(["relation"]),
            ConceptRecord::new("other")
                .with_parents(["all"])
                .with_property("inverse", "sem", "other-of"),
        ])
    }

    #[test]
    fn test_inverses_only_from_declarations() {
        let index = relation_tree();
        let inverses = RelationIndex::new(&index).inverses();
        assert_eq!(inverses.len(), 4);
        assert!(inverses.contains("rel1-of"));
        assert!(!inverses.contains("rel4"));
    }

    #[test]
    fn test_relations_with_and_without_inverses() {
        let index = relation_tree();
        let relations = RelationIndex::new(&index);

        let plain = relations.relations(false);
        assert_eq!(plain.len(), 5);
        assert!(plain.contains("relation"));
        assert!(plain.contains("rel3"));
        assert!(!plain.contains("other"));

        let with_inverses = relations.relations(true);
        assert_eq!(with_inverses.len(), 8);
        assert!(with_inverses.contains("rel3-of"));
        assert!(!with_inverses.contains("other-of"));
    }

    #[test]
    fn test_relations_without_relation_concept() {
        let index = HierarchyIndex::default();
        let relations = RelationIndex::new(&index).relations(true);
        assert_eq!(relations.into_iter().collect::<Vec<_>>(), vec!["relation"]);
    }

    #[test]
    fn test_domains_and_ranges_ignore_facet() {
        let index = HierarchyIndex::from_records(vec![
            ConceptRecord::new("d1")
                .with_property("prop", "sem", "r1")
                .with_property("prop", "sem", "r2")
                .with_property("prop", "xyz", "r3")
                .with_property("none", "xyz", "r4"),
            ConceptRecord::new("d2")
                .with_property("prop", "xyz", "r1")
                .with_property("prop", "xyz", "r2"),
        ]);
        let relations = RelationIndex::new(&index);

        let found = relations.domains_and_ranges("prop");
        assert_eq!(found.len(), 2);
        assert_eq!(found["d1"], vec!["r1", "r2", "r3"]);
        assert_eq!(found["d2"], vec!["r1", "r2"]);
        assert!(relations.domains_and_ranges("missing").is_empty());
    }
}
