//! Prelude module for the ontology service
//!
//! This module re-exports commonly used types and functions for convenient import.

// Re-export core types and traits
pub use ontology_core::prelude::*;

// Re-export service implementation and construction
pub use crate::handle::OntologyHandle;
pub use crate::service::OntologyServiceImpl;
pub use crate::wiring::{wire_ontology_service, wire_with_store};

// Re-export the in-memory store
pub use crate::store::{MemoryConceptStore, StoreRegistry};
