//! Concept records as stored, the merged logical concept and store deltas

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A `(slot, facet, filler)` triple; identity is equality of all three parts
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyAssertion {
    /// Property key, e.g. `color`
    pub slot: String,
    /// Property sub-key, e.g. `sem`
    pub facet: String,
    /// Property value, e.g. `red`
    pub filler: String,
}

impl PropertyAssertion {
    #[must_use]
    pub fn new(
        slot: impl Into<String>,
        facet: impl Into<String>,
        filler: impl Into<String>,
    ) -> Self {
        Self {
            slot: slot.into(),
            facet: facet.into(),
            filler: filler.into(),
        }
    }
}

impl fmt::Display for PropertyAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.slot, self.facet, self.filler)
    }
}

/// Free-form concept metadata with a well-known `definition` entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConceptMetadata {
    /// Human readable definition
    pub definition: String,

    /// Any other metadata entries, kept verbatim
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// One raw document in the concept store
///
/// A concept may be split across several records sharing a name; only
/// `local_properties` are merged across them; the first record owns the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConceptRecord {
    pub name: String,
    pub parents: Vec<String>,
    pub local_properties: Vec<PropertyAssertion>,
    #[serde(alias = "totallyRemovedProperties")]
    pub blocked_properties: Vec<PropertyAssertion>,
    pub metadata: ConceptMetadata,
}

impl ConceptRecord {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_property(
        mut self,
        slot: impl Into<String>,
        facet: impl Into<String>,
        filler: impl Into<String>,
    ) -> Self {
        self.local_properties
            .push(PropertyAssertion::new(slot, facet, filler));
        self
    }

    #[must_use]
    pub fn with_blocked(
        mut self,
        slot: impl Into<String>,
        facet: impl Into<String>,
        filler: impl Into<String>,
    ) -> Self {
        self.blocked_properties
            .push(PropertyAssertion::new(slot, facet, filler));
        self
    }

    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.metadata.definition = definition.into();
        self
    }

    /// Apply a single-document change; returns `false` when nothing matched
    pub fn apply(&mut self, delta: &ConceptDelta) -> bool {
        match delta {
            ConceptDelta::SetDefinition(definition) => {
                self.metadata.definition.clone_from(definition);
                true
            }
            ConceptDelta::PushProperty(assertion) => {
                self.local_properties.push(assertion.clone());
                true
            }
            ConceptDelta::PullProperty(assertion) => {
                match self.local_properties.iter().position(|a| a == assertion) {
                    Some(index) => {
                        self.local_properties.remove(index);
                        true
                    }
                    None => false,
                }
            }
            ConceptDelta::AddBlocked(assertion) => {
                if !self.blocked_properties.contains(assertion) {
                    self.blocked_properties.push(assertion.clone());
                }
                true
            }
            ConceptDelta::RemoveBlocked(assertion) => {
                let before = self.blocked_properties.len();
                self.blocked_properties.retain(|a| a != assertion);
                before != self.blocked_properties.len()
            }
            ConceptDelta::AddParent(parent) => {
                if !self.parents.contains(parent) {
                    self.parents.push(parent.clone());
                }
                true
            }
            ConceptDelta::RemoveParent(parent) => {
                let before = self.parents.len();
                self.parents.retain(|p| p != parent);
                before != self.parents.len()
            }
        }
    }
}

/// A single-document update sent to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConceptDelta {
    /// Replace `metadata.definition`
    SetDefinition(String),
    /// Append a local triple (duplicates allowed)
    PushProperty(PropertyAssertion),
    /// Remove one matching local triple
    PullProperty(PropertyAssertion),
    /// Add to the blocked set (idempotent)
    AddBlocked(PropertyAssertion),
    /// Remove from the blocked set
    RemoveBlocked(PropertyAssertion),
    /// Append a parent unless already listed
    AddParent(String),
    /// Remove a parent if listed
    RemoveParent(String),
}

/// Logical concept: every record sharing a name, merged
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub name: String,
    pub parents: Vec<String>,
    pub local_properties: Vec<PropertyAssertion>,
    pub blocked_properties: IndexSet<PropertyAssertion>,
    pub metadata: ConceptMetadata,
}

impl Concept {
    /// Merge records of one name in record order
    ///
    /// Returns `None` for an empty input. Parent lists are deduplicated and
    /// never contain the concept's own name.
    #[must_use]
    pub fn merge<I>(records: I) -> Option<Self>
    where
        I: IntoIterator<Item = ConceptRecord>,
    {
        let mut records = records.into_iter();
        let first = records.next()?;

        let mut parents: IndexSet<String> = IndexSet::new();
        for parent in first.parents {
            if parent != first.name {
                parents.insert(parent);
            }
        }

        let mut concept = Self {
            parents: parents.into_iter().collect(),
            local_properties: first.local_properties,
            blocked_properties: first.blocked_properties.into_iter().collect(),
            metadata: first.metadata,
            name: first.name,
        };

        for record in records {
            concept.local_properties.extend(record.local_properties);
        }

        Some(concept)
    }

    /// A root has no parents
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    #[must_use]
    pub fn blocks(&self, assertion: &PropertyAssertion) -> bool {
        self.blocked_properties.contains(assertion)
    }

    #[must_use]
    pub fn asserts(&self, assertion: &PropertyAssertion) -> bool {
        self.local_properties.contains(assertion)
    }

    /// Fillers of the local `(slot, facet)` triples, in assertion order
    pub fn local_fillers<'a>(
        &'a self,
        slot: &'a str,
        facet: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.local_properties
            .iter()
            .filter(move |a| a.slot == slot && a.facet == facet)
            .map(|a| a.filler.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_concatenates_local_properties() {
        let records = vec![
            ConceptRecord::new("d1")
                .with_parents(["all"])
                .with_property("prop", "sem", "r1")
                .with_definition("first"),
            ConceptRecord::new("d1")
                .with_parents(["ignored"])
                .with_property("prop", "sem", "r2")
                .with_definition("second"),
        ];

        let concept = Concept::merge(records).expect("merged concept");
        assert_eq!(concept.parents, vec!["all".to_string()]);
        assert_eq!(concept.metadata.definition, "first");
        assert_eq!(
            concept.local_fillers("prop", "sem").collect::<Vec<_>>(),
            vec!["r1", "r2"]
        );
    }

    #[test]
    fn test_merge_drops_self_and_duplicate_parents() {
        let record = ConceptRecord::new("x").with_parents(["x", "a", "b", "a"]);
        let concept = Concept::merge([record]).expect("merged concept");
        assert_eq!(concept.parents, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_merge_empty() {
        assert!(Concept::merge(Vec::new()).is_none());
    }

    #[test]
    fn test_apply_pull_removes_single_match() {
        let mut record = ConceptRecord::new("test")
            .with_property("xyz", "sem", "value1")
            .with_property("xyz", "sem", "value1");
        let delta = ConceptDelta::PullProperty(PropertyAssertion::new("xyz", "sem", "value1"));

        assert!(record.apply(&delta));
        assert_eq!(record.local_properties.len(), 1);
        assert!(record.apply(&delta));
        assert!(!record.apply(&delta));
    }

    #[test]
    fn test_apply_block_is_idempotent() {
        let mut record = ConceptRecord::new("child");
        let delta = ConceptDelta::AddBlocked(PropertyAssertion::new("xyz", "sem", "value1"));
        record.apply(&delta);
        record.apply(&delta);
        assert_eq!(record.blocked_properties.len(), 1);
    }

    #[test]
    fn test_legacy_blocked_field_name() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let json = r#"{
            "name": "child",
            "parents": ["parent"],
            "totallyRemovedProperties": [{"slot": "xyz", "facet": "sem", "filler": "value1"}],
            "metadata": {"definition": "a child", "source": "import"}
        }"#;
        let record: ConceptRecord = serde_json::from_str(json)?;
        assert_eq!(
            record.blocked_properties,
            vec![PropertyAssertion::new("xyz", "sem", "value1")]
        );
        assert_eq!(record.metadata.definition, "a child");
        assert_eq!(
            record.metadata.extra.get("source"),
            Some(&Value::String("import".to_string()))
        );
        Ok(())
    }
}
