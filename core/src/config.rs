//! Configuration types for the ontology service

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration for the ontology service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologyConfig {
    /// Store selection and seeding
    pub store: StoreConfig,

    /// Edit authorization
    pub editing: EditingConfig,

    /// Hierarchy snapshot caching
    pub cache: CacheConfig,

    /// Traversal guards
    pub traversal: TraversalConfig,
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database used when a request does not name one
    pub active_database: String,

    /// Optional JSON or YAML dump of raw concept records loaded at startup
    pub seed_file: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            active_database: "leia".to_string(),
            seed_file: None,
        }
    }
}

/// Edit authorization gate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingConfig {
    /// When false every edit fails with `Forbidden`
    pub enabled: bool,
}

/// Snapshot cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Reuse hierarchy snapshots between requests
    pub enabled: bool,

    /// Maximum age of a reused snapshot
    #[serde(with = "humantime_serde")]
    pub snapshot_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            snapshot_ttl: Duration::from_secs(30),
        }
    }
}

/// Traversal guards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Upper bound on paths a single `paths=true` query may enumerate
    pub max_paths: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self { max_paths: 100_000 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = OntologyConfig::default();
        assert_eq!(config.store.active_database, "leia");
        assert!(!config.editing.enabled);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.snapshot_ttl, Duration::from_secs(30));
        assert_eq!(config.traversal.max_paths, 100_000);
    }

    #[test]
    fn test_partial_yaml() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let yaml = "
editing:
  enabled: true
cache:
  snapshot_ttl: 2m
";
        let config: OntologyConfig = serde_yaml::from_str(yaml)?;
        assert!(config.editing.enabled);
        assert_eq!(config.cache.snapshot_ttl, Duration::from_secs(120));
        assert!(config.cache.enabled);
        assert_eq!(config.store, StoreConfig::default());
        Ok(())
    }
}
