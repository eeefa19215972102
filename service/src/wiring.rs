//! # Ontology Service Wiring Module
//!
//! Explicit construction of the ontology service. Every dependency is a
//! function argument; nothing is looked up from globals.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │           wire_ontology_service()            │
//! │                     ↓                        │
//! │  validate config → OntologyServiceImpl       │
//! │                     ↓                        │
//! │  seed_file? → MemoryConceptStore (active db) │
//! └──────────────────────────────────────────────┘
//!
//! ┌──────────────────────────────────────────────┐
//! │            wire_with_store()                 │
//! │                     ↓                        │
//! │  caller-provided ConceptStore (active db)    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use ontology_core::{OntologyConfig, OntologyQueries};
//! use ontology_service::wiring::wire_ontology_service;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ontology = wire_ontology_service(OntologyConfig::default()).await?;
//! let ctx = ontology.context();
//! let roots = ontology.roots(&ctx).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::validate_values;
use crate::handle::OntologyHandle;
use crate::service::OntologyServiceImpl;
use crate::store::MemoryConceptStore;
use ontology_core::{ConceptStore, OntologyConfig, Result};
use std::sync::Arc;
use tracing::info;

/// Wire the ontology service from configuration
///
/// When `store.seed_file` is set, its records are loaded into an in-memory
/// store for the active database; other databases start out empty.
///
/// # Errors
///
/// Returns `OntologyError::ConfigError` for invalid values, or an IO or
/// serialization error if the seed file cannot be loaded
pub async fn wire_ontology_service(
    config: OntologyConfig,
) -> Result<OntologyHandle<OntologyServiceImpl>> {
    validate_values(&config)?;

    let service = match config.store.seed_file.clone() {
        Some(seed_file) => {
            let store = MemoryConceptStore::load_file(&seed_file).await?;
            info!(
                database = %config.store.active_database,
                seed_file = %seed_file.display(),
                records = store.len(),
                "seeded active database"
            );
            let database = config.store.active_database.clone();
            OntologyServiceImpl::with_store(config, database, Arc::new(store))
        }
        None => OntologyServiceImpl::new(config),
    };

    Ok(OntologyHandle::new(Arc::new(service)))
}

/// Wire the ontology service over a caller-provided store for the active
/// database (a document-store adapter, or a test double)
///
/// # Errors
///
/// Returns `OntologyError::ConfigError` for invalid values
pub fn wire_with_store(
    config: OntologyConfig,
    store: Arc<dyn ConceptStore>,
) -> Result<OntologyHandle<OntologyServiceImpl>> {
    validate_values(&config)?;
    let database = config.store.active_database.clone();
    Ok(OntologyHandle::new(Arc::new(OntologyServiceImpl::with_store(
        config, database, store,
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontology_core::{OntologyError, OntologyQueries};
    use std::io::Write;

    #[tokio::test]
    async fn test_wire_with_seed_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
        write!(
            file,
            r#"[{{"name": "all"}}, {{"name": "object", "parents": ["all"]}}]"#
        )?;

        let mut config = OntologyConfig::default();
        config.store.seed_file = Some(file.path().to_path_buf());

        let ontology = wire_ontology_service(config).await?;
        let ctx = ontology.context();
        assert_eq!(ontology.roots(&ctx).await?, vec!["all".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_wire_rejects_invalid_config() {
        let mut config = OntologyConfig::default();
        config.traversal.max_paths = 0;
        let result = wire_ontology_service(config).await;
        assert!(matches!(result, Err(OntologyError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_wire_with_store() -> ontology_core::Result<()> {
        let store = Arc::new(MemoryConceptStore::new());
        let ontology = wire_with_store(OntologyConfig::default(), store.clone())?;

        store.insert(ontology_core::ConceptRecord::new("all")).await?;
        let ctx = ontology.context();
        assert_eq!(ontology.roots(&ctx).await?.len(), 1);
        Ok(())
    }
}
