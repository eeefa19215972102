//! Loading raw concept records from dump files

use ontology_core::{ConceptRecord, OntologyError, Result};
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Read a JSON array or YAML sequence of raw records
///
/// The format is picked from the extension; anything that is not `.yaml` or
/// `.yml` is parsed as JSON. Records sharing a name stay separate.
///
/// # Errors
///
/// Returns `OntologyError::IoError` if the file cannot be read and
/// `OntologyError::SerializationError` if it cannot be parsed
pub async fn load_records(path: &Path) -> Result<Vec<ConceptRecord>> {
    let contents = fs::read_to_string(path).await?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let records: Vec<ConceptRecord> = if is_yaml {
        serde_yaml::from_str(&contents)?
    } else {
        serde_json::from_str(&contents)?
    };

    if let Some(unnamed) = records.iter().position(|r| r.name.is_empty()) {
        return Err(OntologyError::serialization(format!(
            "Record #{unnamed} in {} has no name",
            path.display()
        )));
    }

    info!(path = %path.display(), records = records.len(), "loaded concept records");
    Ok(records)
}
