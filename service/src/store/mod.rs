//! Concept store adapters
//!
//! The document store itself is an external collaborator; this module holds
//! the in-memory adapter used for embedding and tests, the per-database
//! registry and the dump loader.

pub mod memory;
pub mod registry;
pub mod seed;

pub use memory::MemoryConceptStore;
pub use registry::StoreRegistry;
pub use seed::load_records;
