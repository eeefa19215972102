//! Ancestor and descendant traversal
//!
//! The two directions deliberately enumerate paths differently:
//!
//! - upward, only routes that end at a root are emitted
//! - downward, every descendant gets its own route, intermediate ones included
//!
//! Both use an explicit stack or queue instead of recursion and carry their
//! own cycle guard, since data can reach the store without edit validation.

use indexmap::IndexSet;
use ontology_core::prelude::*;
use std::collections::VecDeque;
use tracing::warn;

use crate::hierarchy::HierarchyIndex;
use crate::inheritance::local_view;

/// Traversal engine over one hierarchy snapshot
pub struct GraphTraversal<'a> {
    index: &'a HierarchyIndex,
    max_paths: usize,
}

impl<'a> GraphTraversal<'a> {
    #[must_use]
    pub fn new(index: &'a HierarchyIndex, max_paths: usize) -> Self {
        Self { index, max_paths }
    }

    /// Ancestors of `name` shaped by `options`
    ///
    /// # Errors
    ///
    /// Returns `OntologyError::LimitExceeded` if path enumeration exceeds the
    /// configured bound
    pub fn ancestors(&self, name: &str, options: TraversalOptions) -> Result<HierarchyResult> {
        if options.paths {
            return self.ancestor_paths(name).map(HierarchyResult::Paths);
        }

        let selected = if options.immediate {
            self.index.parents(name).iter().cloned().collect()
        } else {
            self.ancestor_closure(name)
        };
        Ok(self.shape(selected, options.details))
    }

    /// Descendants of `name` shaped by `options`
    ///
    /// # Errors
    ///
    /// Returns `OntologyError::LimitExceeded` if path enumeration exceeds the
    /// configured bound
    pub fn descendants(&self, name: &str, options: TraversalOptions) -> Result<HierarchyResult> {
        if options.paths {
            return self.descendant_paths(name).map(HierarchyResult::Paths);
        }

        let selected = if options.immediate {
            self.index.children(name).iter().cloned().collect()
        } else {
            self.descendant_closure(name)
        };
        Ok(self.shape(selected, options.details))
    }

    /// Every name reachable through `parents`, excluding `name` itself
    ///
    /// Dangling parent names are included but have nothing to expand.
    #[must_use]
    pub fn ancestor_closure(&self, name: &str) -> IndexSet<String> {
        self.closure(name, |n| self.index.parents(n))
    }

    /// Every name reachable through the child index, excluding `name` itself
    #[must_use]
    pub fn descendant_closure(&self, name: &str) -> IndexSet<String> {
        self.closure(name, |n| self.index.children(n))
    }

    fn closure<F>(&self, name: &str, neighbors: F) -> IndexSet<String>
    where
        F: Fn(&str) -> &'a [String],
    {
        let mut seen: IndexSet<String> = IndexSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(name);

        while let Some(current) = queue.pop_front() {
            for next in neighbors(current) {
                if next != name && seen.insert(next.clone()) {
                    queue.push_back(next.as_str());
                }
            }
        }

        seen
    }

    /// Root-terminated routes upward from `name`, depth first
    ///
    /// A path is emitted only when its last concept has no parents. Routes
    /// that can only continue through a cycle are dropped.
    fn ancestor_paths(&self, name: &str) -> Result<Vec<Vec<String>>> {
        let mut paths = Vec::new();
        let mut stack: Vec<Vec<String>> = self
            .index
            .parents(name)
            .iter()
            .rev()
            .filter(|p| p.as_str() != name)
            .map(|p| vec![p.clone()])
            .collect();

        while let Some(path) = stack.pop() {
            self.check_limit(name, paths.len() + stack.len())?;

            let Some(last) = path.last() else {
                continue;
            };
            let parents = self.index.parents(last);
            if parents.is_empty() {
                paths.push(path);
                continue;
            }

            for parent in parents.iter().rev() {
                if parent == name || path.contains(parent) {
                    continue;
                }
                let mut extended = path.clone();
                extended.push(parent.clone());
                stack.push(extended);
            }
        }

        Ok(paths)
    }

    /// A route to every descendant of `name`, breadth first
    ///
    /// Shorter routes come first; each intermediate descendant is emitted on
    /// its own before its extensions.
    fn descendant_paths(&self, name: &str) -> Result<Vec<Vec<String>>> {
        let mut paths = Vec::new();
        let mut queue: VecDeque<Vec<String>> = self
            .index
            .children(name)
            .iter()
            .filter(|c| c.as_str() != name)
            .map(|c| vec![c.clone()])
            .collect();

        while let Some(path) = queue.pop_front() {
            self.check_limit(name, paths.len() + queue.len())?;

            if let Some(last) = path.last() {
                for child in self.index.children(last) {
                    if child == name || path.contains(child) {
                        continue;
                    }
                    let mut extended = path.clone();
                    extended.push(child.clone());
                    queue.push_back(extended);
                }
            }
            paths.push(path);
        }

        Ok(paths)
    }

    fn check_limit(&self, name: &str, pending: usize) -> Result<()> {
        if pending > self.max_paths {
            warn!(
                concept = name,
                max_paths = self.max_paths,
                "path enumeration aborted"
            );
            return Err(OntologyError::LimitExceeded(format!(
                "more than {} paths from '{name}'",
                self.max_paths
            )));
        }
        Ok(())
    }

    /// Names, or local-only single-key views when `details` is set
    fn shape(&self, selected: IndexSet<String>, details: bool) -> HierarchyResult {
        if !details {
            return HierarchyResult::Names(selected.into_iter().collect());
        }

        HierarchyResult::Details(
            selected
                .into_iter()
                .map(|name| {
                    let view = self.index.get(&name).map(local_view).unwrap_or_default();
                    ResolvedConcept::new(name, view)
                })
                .collect(),
        )
    }
}
