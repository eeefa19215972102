//! Runtime validation of configuration values

use ontology_core::{OntologyConfig, OntologyError};
use thiserror::Error;

/// A configuration value that cannot be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("store.active_database cannot be empty")]
    EmptyDatabase,

    #[error("traversal.max_paths must be > 0")]
    ZeroMaxPaths,

    #[error("cache.snapshot_ttl must be > 0 when the cache is enabled")]
    ZeroSnapshotTtl,
}

impl From<ConfigValidationError> for OntologyError {
    fn from(err: ConfigValidationError) -> Self {
        OntologyError::config(err.to_string())
    }
}

/// Validate specific configuration values
///
/// # Errors
///
/// Returns `ConfigValidationError` for the first invalid value found
pub fn validate_values(config: &OntologyConfig) -> Result<(), ConfigValidationError> {
    if config.store.active_database.trim().is_empty() {
        return Err(ConfigValidationError::EmptyDatabase);
    }

    if config.traversal.max_paths == 0 {
        return Err(ConfigValidationError::ZeroMaxPaths);
    }

    if config.cache.enabled && config.cache.snapshot_ttl.is_zero() {
        return Err(ConfigValidationError::ZeroSnapshotTtl);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_validate_default_config() {
        assert_eq!(validate_values(&OntologyConfig::default()), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = OntologyConfig::default();
        config.store.active_database = " ".to_string();
        assert_eq!(
            validate_values(&config),
            Err(ConfigValidationError::EmptyDatabase)
        );

        let mut config = OntologyConfig::default();
        config.traversal.max_paths = 0;
        let err: OntologyError = validate_values(&config).unwrap_err().into();
        assert!(err.to_string().contains("max_paths"));

        let mut config = OntologyConfig::default();
        config.cache.snapshot_ttl = Duration::ZERO;
        assert!(validate_values(&config).is_err());
        config.cache.enabled = false;
        assert!(validate_values(&config).is_ok());
    }
}
