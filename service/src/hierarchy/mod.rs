//! Hierarchy snapshots shared by the query engines

pub mod cache;
pub mod index;

pub use cache::SnapshotCache;
pub use index::HierarchyIndex;
