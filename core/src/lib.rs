//! # Ontology Core
//!
//! Core types and traits for the concept ontology service.
//!
//! This crate provides the fundamental building blocks shared by the query and
//! edit engines: concept records as they live in the document store, the merged
//! logical concept, the property views returned to clients, configuration, the
//! explicit request context and the error type.
//!
//! ## Design Principles
//!
//! - **Explicit graph**: parent links are adjacency lists keyed by name, never
//!   language-level inheritance
//! - **Explicit context**: the active database and the editing gate travel with
//!   every call instead of living in globals
//! - **Store agnostic**: persistence is reached only through [`ConceptStore`]

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(missing_docs)] // Documentation is covered by module-level docs

/// Core error types for ontology operations
pub mod error;

/// Concept records, assertions and store deltas
pub mod types;

/// Query result shapes and query options
pub mod view;

/// Configuration types for the ontology service
pub mod config;

/// Per-request context threaded through every operation
pub mod context;

/// Core trait definitions for stores and services
pub mod traits;

// Re-export commonly used types
pub use config::OntologyConfig;
pub use context::OntologyContext;
pub use error::{OntologyError, Result};
pub use traits::{ConceptStore, OntologyEdits, OntologyQueries};
pub use types::{Concept, ConceptDelta, ConceptMetadata, ConceptRecord, PropertyAssertion};
pub use view::{
    HierarchyResult, PropertyEntry, PropertyView, ResolveOptions, ResolvedConcept,
    TraversalOptions,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::OntologyConfig;
    pub use crate::context::OntologyContext;
    pub use crate::error::{OntologyError, Result};
    pub use crate::traits::*;
    pub use crate::types::*;
    pub use crate::view::*;
}
