//! Per-request context
//!
//! The active database and the editing gate are plain values handed to every
//! query and edit. A context is built once from configuration at startup and
//! may be narrowed per request; nothing reads them from globals.

use crate::config::OntologyConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntologyContext {
    /// Database every store access in this request goes to
    pub database: String,
    /// Authorization gate checked before any mutation
    pub editing_enabled: bool,
}

impl OntologyContext {
    #[must_use]
    pub fn new(database: impl Into<String>, editing_enabled: bool) -> Self {
        Self {
            database: database.into(),
            editing_enabled,
        }
    }

    /// Process-wide defaults taken from configuration
    #[must_use]
    pub fn from_config(config: &OntologyConfig) -> Self {
        Self::new(config.store.active_database.clone(), config.editing.enabled)
    }

    /// Same context against another database
    #[must_use]
    pub fn with_database(&self, database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            editing_enabled: self.editing_enabled,
        }
    }

    /// Same context with the editing gate set explicitly
    #[must_use]
    pub fn with_editing(&self, editing_enabled: bool) -> Self {
        Self {
            database: self.database.clone(),
            editing_enabled,
        }
    }
}
