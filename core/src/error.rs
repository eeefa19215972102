//! Error types for ontology operations

use thiserror::Error;

use crate::types::PropertyAssertion;

/// Message returned when a concept is made its own parent
pub const SELF_PARENT_MESSAGE: &str = "Cannot assign concept as a parent of itself.";

/// A cascading unlink that could not be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeFailure {
    /// Concept whose `parents` still lists the removed name
    pub concept: String,
    /// Store error text
    pub reason: String,
}

/// Main error type for ontology operations
#[derive(Error, Debug)]
pub enum OntologyError {
    /// Structural violation of the concept graph
    #[error("{message}")]
    InvalidOperation {
        /// Error message
        message: String,
    },

    /// The editing gate is closed
    #[error("Editing is disabled for database '{database}'")]
    Forbidden {
        /// Database the edit targeted
        database: String,
    },

    /// Edit precondition: the concept must exist
    #[error("Concept not found: {0}")]
    ConceptNotFound(String),

    /// Edit precondition: the triple must be asserted locally
    #[error("Property {assertion} not found on concept '{concept}'")]
    PropertyNotFound {
        /// Concept that was edited
        concept: String,
        /// Triple that was not present
        assertion: PropertyAssertion,
    },

    /// Store connectivity or availability failure
    #[error("Store error: {message}")]
    Store {
        /// Error message
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The primary deletion succeeded but some unlinks did not
    #[error(
        "Removed concept '{concept}' but {} of {} usages could not be unlinked",
        .failed.len(),
        .failed.len() + .unlinked.len()
    )]
    PartialFailure {
        /// Concept that was removed
        concept: String,
        /// Concepts that were unlinked successfully
        unlinked: Vec<String>,
        /// Concepts still referencing the removed name
        failed: Vec<CascadeFailure>,
    },

    /// A traversal guard tripped
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for ontology operations
pub type Result<T> = std::result::Result<T, OntologyError>;

impl OntologyError {
    /// Create a new invalid operation error
    #[must_use]
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// The error raised for `add_parent(x, x)` and `add_concept(x, x, _)`
    #[must_use]
    pub fn self_parent() -> Self {
        Self::invalid_operation(SELF_PARENT_MESSAGE)
    }

    /// Create a new forbidden error
    #[must_use]
    pub fn forbidden(database: impl Into<String>) -> Self {
        Self::Forbidden {
            database: database.into(),
        }
    }

    /// Create a new concept-not-found error
    #[must_use]
    pub fn concept_not_found(name: impl Into<String>) -> Self {
        Self::ConceptNotFound(name.into())
    }

    /// Create a new property-not-found error
    #[must_use]
    pub fn property_not_found(concept: impl Into<String>, assertion: PropertyAssertion) -> Self {
        Self::PropertyNotFound {
            concept: concept.into(),
            assertion,
        }
    }

    /// Create a new store error
    #[must_use]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new store error with source
    #[must_use]
    pub fn store_with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError(message.into())
    }

    /// Whether the caller caused this error (rejected request, never retried)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidOperation { .. }
                | Self::Forbidden { .. }
                | Self::ConceptNotFound(_)
                | Self::PropertyNotFound { .. }
        )
    }
}

impl From<serde_json::Error> for OntologyError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for OntologyError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
