//! Inheritance resolution for concept property views
//!
//! This module merges a concept's own triples with everything inherited
//! through multiple parents and applies blocking declarations.

use indexmap::IndexSet;
use ontology_core::prelude::*;
use std::collections::{HashSet, VecDeque};

use crate::hierarchy::HierarchyIndex;

/// Inheritance resolver over one hierarchy snapshot
pub struct InheritanceResolver<'a> {
    index: &'a HierarchyIndex,
}

/// A triple as first discovered during lineage traversal
struct Discovered<'a> {
    assertion: &'a PropertyAssertion,
    defined_in: &'a str,
    blocked: bool,
}

impl<'a> InheritanceResolver<'a> {
    /// Create a new inheritance resolver
    #[must_use]
    pub fn new(index: &'a HierarchyIndex) -> Self {
        Self { index }
    }

    /// Views for every requested name, in request order
    #[must_use]
    pub fn resolve_all(&self, names: &[String], options: ResolveOptions) -> Vec<ResolvedConcept> {
        names
            .iter()
            .map(|name| ResolvedConcept::new(name.clone(), self.resolve(name, options)))
            .collect()
    }

    /// Property view of a single concept
    ///
    /// Unknown names produce an empty view.
    #[must_use]
    pub fn resolve(&self, name: &str, options: ResolveOptions) -> PropertyView {
        let Some(concept) = self.index.get(name) else {
            return PropertyView::new();
        };

        if options.local {
            return local_view(concept);
        }

        let mut view = PropertyView::new();
        for found in self.discover(name) {
            let entry = if options.metadata {
                PropertyEntry::Detailed {
                    filler: found.assertion.filler.clone(),
                    defined_in: found.defined_in.to_string(),
                    blocked: found.blocked,
                }
            } else if found.blocked {
                // Flat views only carry the effective set
                continue;
            } else {
                PropertyEntry::Filler(found.assertion.filler.clone())
            };
            view.push(&found.assertion.slot, &found.assertion.facet, entry);
        }

        if options.metadata {
            view.metadata = Some(concept.metadata.clone());
        }
        view
    }

    /// Breadth-first lineage: the concept itself, then parents in list order
    ///
    /// Dangling parent names are skipped. The position in the returned list
    /// is the nearness rank.
    #[must_use]
    pub fn lineage(&self, name: &str) -> Vec<&'a Concept> {
        let mut lineage = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();

        visited.insert(name);
        queue.push_back(name);

        while let Some(current) = queue.pop_front() {
            let Some(concept) = self.index.get(current) else {
                continue;
            };
            lineage.push(concept);

            for parent in &concept.parents {
                if visited.insert(parent.as_str()) {
                    queue.push_back(parent.as_str());
                }
            }
        }

        lineage
    }

    /// Every distinct triple in the lineage with its nearest asserting concept
    fn discover(&self, name: &str) -> Vec<Discovered<'a>> {
        let mut found = Vec::new();
        let mut recorded: HashSet<&PropertyAssertion> = HashSet::new();
        // blocked triples of every concept visited so far
        let mut blocking: IndexSet<&PropertyAssertion> = IndexSet::new();

        for (rank, concept) in self.lineage(name).into_iter().enumerate() {
            blocking.extend(concept.blocked_properties.iter());

            for assertion in &concept.local_properties {
                if !recorded.insert(assertion) {
                    continue;
                }
                found.push(Discovered {
                    assertion,
                    defined_in: concept.name.as_str(),
                    // a concept's own triples are never blocked for itself
                    blocked: rank > 0 && blocking.contains(assertion),
                });
            }
        }

        found
    }
}

/// Own triples only, grouped by slot and facet in assertion order
#[must_use]
pub fn local_view(concept: &Concept) -> PropertyView {
    let mut view = PropertyView::new();
    for assertion in &concept.local_properties {
        view.push(
            &assertion.slot,
            &assertion.facet,
            PropertyEntry::Filler(assertion.filler.clone()),
        );
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn records() -> Vec<ConceptRecord> {
        vec![
            ConceptRecord::new("grandparent").with_property("size", "sem", "large"),
            ConceptRecord::new("parent")
                .with_parents(["grandparent"])
                .with_property("xyz", "sem", "value1")
                .with_property("xyz", "sem", "value2"),
            ConceptRecord::new("child")
                .with_parents(["parent"])
                .with_property("xyz", "sem", "value3")
                .with_blocked("xyz", "sem", "value1")
                .with_definition("a child"),
        ]
    }

    #[test]
    fn test_local_view_ignores_inheritance() {
        let index = HierarchyIndex::from_records(records());
        let view = InheritanceResolver::new(&index).resolve("child", ResolveOptions::local());
        assert_eq!(view.fillers("xyz", "sem"), vec!["value3"]);
        assert!(view.entries("size", "sem").is_empty());
        assert!(view.metadata.is_none());
    }

    #[test]
    fn test_flat_view_omits_blocked_triples() {
        let index = HierarchyIndex::from_records(records());
        let view = InheritanceResolver::new(&index).resolve("child", ResolveOptions::default());
        assert_eq!(view.fillers("xyz", "sem"), vec!["value3", "value2"]);
        assert_eq!(view.fillers("size", "sem"), vec!["large"]);
    }

    #[test]
    fn test_metadata_view_marks_blocked_triples() {
        let index = HierarchyIndex::from_records(records());
        let view = InheritanceResolver::new(&index).resolve("child", ResolveOptions::metadata());

        assert_eq!(
            view.entries("xyz", "sem")[1],
            PropertyEntry::Detailed {
                filler: "value1".to_string(),
                defined_in: "parent".to_string(),
                blocked: true,
            }
        );
        assert_eq!(
            view.metadata.map(|m| m.definition),
            Some("a child".to_string())
        );
    }

    fn detailed(index: &HierarchyIndex, name: &str) -> PropertyEntry {
        InheritanceResolver::new(index)
            .resolve(name, ResolveOptions::metadata())
            .entries("xyz", "sem")[0]
            .clone()
    }

    fn entry(defined_in: &str, blocked: bool) -> PropertyEntry {
        PropertyEntry::Detailed {
            filler: "value1".to_string(),
            defined_in: defined_in.to_string(),
            blocked,
        }
    }

    #[test]
    fn test_intermediate_blocker_hides_farther_definition() {
        let index = HierarchyIndex::from_records(vec![
            ConceptRecord::new("grandparent").with_property("xyz", "sem", "value1"),
            ConceptRecord::new("parent")
                .with_parents(["grandparent"])
                .with_blocked("xyz", "sem", "value1"),
            ConceptRecord::new("child").with_parents(["parent"]),
        ]);
        assert_eq!(detailed(&index, "child"), entry("grandparent", true));

        let flat = InheritanceResolver::new(&index).resolve("child", ResolveOptions::default());
        assert!(flat.entries("xyz", "sem").is_empty());
    }

    #[test]
    fn test_farther_blocker_does_not_hide_nearer_definition() {
        let index = HierarchyIndex::from_records(vec![
            ConceptRecord::new("grandparent").with_blocked("xyz", "sem", "value1"),
            ConceptRecord::new("parent")
                .with_parents(["grandparent"])
                .with_property("xyz", "sem", "value1"),
            ConceptRecord::new("child").with_parents(["parent"]),
        ]);
        assert_eq!(detailed(&index, "child"), entry("parent", false));
    }

    #[test]
    fn test_defining_concept_blocking_its_own_triple_hides_it_below() {
        let index = HierarchyIndex::from_records(vec![
            ConceptRecord::new("parent")
                .with_property("xyz", "sem", "value1")
                .with_blocked("xyz", "sem", "value1"),
            ConceptRecord::new("child").with_parents(["parent"]),
        ]);
        assert_eq!(detailed(&index, "child"), entry("parent", true));
        assert_eq!(detailed(&index, "parent"), entry("parent", false));
    }

    #[test]
    fn test_own_triple_is_never_blocked_for_itself() {
        let index = HierarchyIndex::from_records(vec![
            ConceptRecord::new("x")
                .with_property("a", "sem", "b")
                .with_blocked("a", "sem", "b"),
        ]);
        let view = InheritanceResolver::new(&index).resolve("x", ResolveOptions::metadata());
        assert!(!view.entries("a", "sem")[0].is_blocked());
    }

    #[test]
    fn test_nearest_definition_wins() {
        let index = HierarchyIndex::from_records(vec![
            ConceptRecord::new("root").with_property("color", "sem", "red"),
            ConceptRecord::new("left")
                .with_parents(["root"])
                .with_property("color", "sem", "red"),
            ConceptRecord::new("right").with_parents(["root"]),
            ConceptRecord::new("leaf").with_parents(["right", "left"]),
        ]);
        let view = InheritanceResolver::new(&index).resolve("leaf", ResolveOptions::metadata());
        let entries = view.entries("color", "sem");
        assert_eq!(entries.len(), 1);
        assert!(matches!(
            &entries[0],
            PropertyEntry::Detailed { defined_in, .. } if defined_in == "left"
        ));
    }

    #[test]
    fn test_lineage_survives_cycles_and_dangling_parents() {
        let index = HierarchyIndex::from_records(vec![
            ConceptRecord::new("a").with_parents(["b", "gone"]),
            ConceptRecord::new("b").with_parents(["a"]),
        ]);
        let resolver = InheritanceResolver::new(&index);
        let names: Vec<_> = resolver.lineage("a").into_iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_unknown_names_resolve_to_empty_views() {
        let index = HierarchyIndex::from_records(records());
        let resolved = InheritanceResolver::new(&index)
            .resolve_all(&["missing".to_string(), "parent".to_string()], ResolveOptions::default());
        assert_eq!(resolved.len(), 2);
        assert!(resolved[0].view.is_empty());
        assert_eq!(resolved[1].name, "parent");
    }
}
