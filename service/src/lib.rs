//! # Ontology Service
//!
//! Concept hierarchy service: effective properties under multiple
//! inheritance with blocking, ancestor and descendant traversal, relation
//! vocabulary queries and validated structural edits.
//!
//! ## Overview
//!
//! Concepts are named nodes with an ordered `parents` list, their own
//! `(slot, facet, filler)` triples and a set of blocked triples that
//! suppress what they would otherwise inherit. The service offers:
//!
//! - **Resolution**: nearest-wins inheritance in breadth-first order, flat or
//!   with `{filler, defined_in, blocked}` provenance
//! - **Traversal**: ancestor and descendant sets, direct neighbors, local
//!   views and path enumeration (root-terminated upward, every node downward)
//! - **Relations**: the `relation` subtree, declared inverses, and
//!   domain/range extraction
//! - **Edits**: gated, single-document writes with cascading unlink on
//!   concept removal
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ontology_core::{OntologyConfig, OntologyEdits, OntologyQueries, ResolveOptions};
//! use ontology_service::wiring::wire_ontology_service;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = OntologyConfig::default();
//!     config.editing.enabled = true;
//!
//!     let ontology = wire_ontology_service(config).await?;
//!     let ctx = ontology.context();
//!
//!     ontology.add_concept(&ctx, "dog", "animal", "a domesticated canine").await?;
//!     let views = ontology
//!         .resolve(&ctx, &["dog".to_string()], ResolveOptions::metadata())
//!         .await?;
//!     println!("{}", serde_json::to_string_pretty(&views)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! query ─→ SnapshotCache ─→ HierarchyIndex ─→ InheritanceResolver
//!                                          ├→ GraphTraversal
//!                                          └→ RelationIndex
//! edit  ─→ EditEngine ─→ ConceptStore ─→ SnapshotCache::invalidate
//! ```
//!
//! The active database and the editing gate travel in an explicit
//! [`OntologyContext`](ontology_core::OntologyContext) on every call.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(missing_docs)] // Documentation is covered by module-level docs
#![allow(clippy::missing_errors_doc)] // errors self-explanatory from return type
#![allow(clippy::doc_markdown)]

/// Service implementation
pub mod service;

/// Service handle newtype
pub mod handle;

/// Explicit service construction
pub mod wiring;

/// Configuration loading and validation
pub mod config;

/// Concept store adapters and the per-database registry
pub mod store;

/// Hierarchy snapshots and their cache
pub mod hierarchy;

/// Inheritance resolution
pub mod inheritance;

/// Ancestor and descendant traversal
pub mod traversal;

/// Relation vocabulary queries
pub mod relations;

/// Validated graph edits
pub mod edit;

/// Prelude for convenient imports
pub mod prelude;

pub use handle::OntologyHandle;
pub use ontology_core::prelude::*;
pub use service::OntologyServiceImpl;
pub use wiring::{wire_ontology_service, wire_with_store};
