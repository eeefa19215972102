//! Inheritance resolution for concept property views
//!
//! Breadth-first multiple inheritance where the nearest asserting concept
//! wins and blocked triples are either hidden or flagged.

pub mod resolver;

pub use resolver::{InheritanceResolver, local_view};
