//! Configuration loading for the ontology service
//!
//! YAML files with `${VAR:-default}` environment substitution, followed by
//! `ONTOLOGY_*` environment overrides and value validation.

pub mod validation;

use once_cell::sync::Lazy;
use ontology_core::{OntologyConfig, OntologyError, Result};
use regex::{Captures, Regex};
use serde::Deserialize;
use std::env;
use std::path::Path;
use tracing::{debug, warn};

pub use validation::{ConfigValidationError, validate_values};

/// Overrides `store.active_database`
pub const ENV_ACTIVE_DATABASE: &str = "ONTOLOGY_ACTIVE";
/// Overrides `editing.enabled` (`true`/`false`)
pub const ENV_EDITING_ENABLED: &str = "ONTOLOGY_EDITING_ENABLED";

static ENV_VAR_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"\$\{([^}:]+)(?::(-)?([^}]*))?\}").ok());

/// Load configuration from `YAML` file with environment variable substitution
///
/// # Errors
///
/// Returns `OntologyError::IoError` if the file cannot be read
/// Returns `OntologyError::ConfigError` if the YAML cannot be parsed
pub fn load_config<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)?;
    let substituted = substitute_env_vars(&contents);

    serde_yaml::from_str(&substituted)
        .map_err(|e| OntologyError::config(format!("Failed to parse YAML config: {e}")))
}

/// Load, override from the environment and validate the service configuration
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or a value is invalid
pub fn load_ontology_config(path: &Path) -> Result<OntologyConfig> {
    let mut config: OntologyConfig = load_config(path)?;
    apply_env_overrides(&mut config);
    validate_values(&config)?;
    debug!(path = %path.display(), database = %config.store.active_database, "configuration loaded");
    Ok(config)
}

/// Substitute environment variables in the format `${VAR:-default}`
fn substitute_env_vars(content: &str) -> String {
    substitute_with(content, |name| env::var(name).ok())
}

fn substitute_with<F>(content: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let Some(re) = ENV_VAR_PATTERN.as_ref() else {
        return content.to_string();
    };

    re.replace_all(content, |caps: &Captures| {
        let default_value = caps.get(3).map_or("", |m| m.as_str());
        lookup(&caps[1]).unwrap_or_else(|| default_value.to_string())
    })
    .to_string()
}

/// Apply `ONTOLOGY_ACTIVE` and `ONTOLOGY_EDITING_ENABLED`
pub fn apply_env_overrides(config: &mut OntologyConfig) {
    apply_overrides_with(config, |name| env::var(name).ok());
}

fn apply_overrides_with<F>(config: &mut OntologyConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(database) = lookup(ENV_ACTIVE_DATABASE) {
        config.store.active_database = database;
    }

    if let Some(flag) = lookup(ENV_EDITING_ENABLED) {
        match flag.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => config.editing.enabled = true,
            "false" | "0" | "no" => config.editing.enabled = false,
            other => warn!(value = other, "ignoring unrecognised {ENV_EDITING_ENABLED}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_env_var_substitution() {
        let content = "database: ${ONTOLOGY_TEST_UNSET_VAR:-leia}";
        assert_eq!(substitute_env_vars(content), "database: leia");

        let vars = lookup(&[("DB", "unittest")]);
        assert_eq!(
            substitute_with("${DB:-leia} and ${OTHER:-x}", &vars),
            "unittest and x"
        );
    }

    #[test]
    fn test_env_overrides() {
        let mut config = OntologyConfig::default();
        apply_overrides_with(
            &mut config,
            lookup(&[(ENV_ACTIVE_DATABASE, "unittest"), (ENV_EDITING_ENABLED, "True")]),
        );
        assert_eq!(config.store.active_database, "unittest");
        assert!(config.editing.enabled);

        apply_overrides_with(&mut config, lookup(&[(ENV_EDITING_ENABLED, "maybe")]));
        assert!(config.editing.enabled);
    }

    #[test]
    fn test_load_ontology_config() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
        writeln!(file, "store:")?;
        writeln!(file, "  active_database: ${{ONTOLOGY_TEST_UNSET_DB:-unittest}}")?;
        writeln!(file, "traversal:")?;
        writeln!(file, "  max_paths: 50")?;

        let config = load_ontology_config(file.path())?;
        assert!(!config.store.active_database.is_empty());
        assert_eq!(config.traversal.max_paths, 50);
        Ok(())
    }

    #[test]
    fn test_invalid_yaml_is_config_error() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
        writeln!(file, "traversal: [unclosed")?;

        let err = load_config::<OntologyConfig>(file.path()).unwrap_err();
        assert!(matches!(err, OntologyError::ConfigError(_)));
        Ok(())
    }
}
