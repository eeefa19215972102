//! Query result shapes and query options
//!
//! Transport encoding is not decided here; the `Serialize` impls only fix the
//! value shapes (`{concept: {slot: {facet: [entries]}}}` and friends).

use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::types::ConceptMetadata;

/// One value in a `slot -> facet` bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyEntry {
    /// Flat mode: just the filler
    Filler(String),
    /// Metadata mode: where the triple comes from and whether it is blocked
    Detailed {
        filler: String,
        defined_in: String,
        blocked: bool,
    },
}

impl PropertyEntry {
    #[must_use]
    pub fn filler(&self) -> &str {
        match self {
            Self::Filler(filler) | Self::Detailed { filler, .. } => filler,
        }
    }

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Detailed { blocked: true, .. })
    }
}

/// `facet -> entries`
pub type FacetMap = IndexMap<String, Vec<PropertyEntry>>;

/// Property view of one concept: `slot -> facet -> entries`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyView {
    /// Buckets in first-seen order
    #[serde(flatten)]
    pub slots: IndexMap<String, FacetMap>,

    /// Concept metadata, only present in metadata mode
    #[serde(rename = "_metadata", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ConceptMetadata>,
}

impl PropertyView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to its bucket, creating the bucket if needed
    pub fn push(&mut self, slot: &str, facet: &str, entry: PropertyEntry) {
        self.slots
            .entry(slot.to_string())
            .or_default()
            .entry(facet.to_string())
            .or_default()
            .push(entry);
    }

    /// Entries of one bucket; empty when the bucket does not exist
    #[must_use]
    pub fn entries(&self, slot: &str, facet: &str) -> &[PropertyEntry] {
        self.slots
            .get(slot)
            .and_then(|facets| facets.get(facet))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn fillers(&self, slot: &str, facet: &str) -> Vec<&str> {
        self.entries(slot, facet)
            .iter()
            .map(PropertyEntry::filler)
            .collect()
    }

    /// True when no bucket holds any entry
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots
            .values()
            .all(|facets| facets.values().all(Vec::is_empty))
    }
}

/// A named property view; serializes as the single-key map `{name: view}`
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConcept {
    pub name: String,
    pub view: PropertyView,
}

impl ResolvedConcept {
    #[must_use]
    pub fn new(name: impl Into<String>, view: PropertyView) -> Self {
        Self {
            name: name.into(),
            view,
        }
    }
}

impl Serialize for ResolvedConcept {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.view)?;
        map.end()
    }
}

/// Result of an ancestor or descendant query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HierarchyResult {
    /// Deduplicated concept names
    Names(Vec<String>),
    /// Local-only views of the selected concepts
    Details(Vec<ResolvedConcept>),
    /// Ordered routes, each an ordered list of names
    Paths(Vec<Vec<String>>),
}

impl HierarchyResult {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Names(names) => names.len(),
            Self::Details(details) => details.len(),
            Self::Paths(paths) => paths.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn names(&self) -> Option<&[String]> {
        match self {
            Self::Names(names) => Some(names),
            _ => None,
        }
    }

    #[must_use]
    pub fn details(&self) -> Option<&[ResolvedConcept]> {
        match self {
            Self::Details(details) => Some(details),
            _ => None,
        }
    }

    #[must_use]
    pub fn paths(&self) -> Option<&[Vec<String>]> {
        match self {
            Self::Paths(paths) => Some(paths),
            _ => None,
        }
    }
}

/// Options for `resolve`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Own triples only; no inheritance, no blocking
    pub local: bool,
    /// Emit `{filler, defined_in, blocked}` entries and `_metadata`
    pub metadata: bool,
}

impl ResolveOptions {
    #[must_use]
    pub fn local() -> Self {
        Self {
            local: true,
            metadata: false,
        }
    }

    #[must_use]
    pub fn metadata() -> Self {
        Self {
            local: false,
            metadata: true,
        }
    }
}

/// Options for `ancestors` and `descendants`
///
/// `paths` takes precedence; otherwise `immediate` picks direct neighbors and
/// `details` formats whichever set was selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalOptions {
    pub immediate: bool,
    pub details: bool,
    pub paths: bool,
}

impl TraversalOptions {
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            immediate: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn details() -> Self {
        Self {
            details: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn paths() -> Self {
        Self {
            paths: true,
            ..Self::default()
        }
    }
}
