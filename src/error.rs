//! Error types for catalog lookups and configuration loading.
//!
//! Field validation failure is deliberately not represented here: a record
//! that fails its checks is a normal [`ValidationReport`](crate::server::ValidationReport)
//! with a non-empty error map, not an error condition.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while loading configuration or resolving schemas.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Requested entity has no schema in the catalog. Carries the known
    /// names so callers can present "did you mean" diagnostics.
    #[error("unknown entity schema `{name}` (known entities: {})", .known.join(", "))]
    #[diagnostic(code(modelguard::catalog::not_found))]
    SchemaNotFound {
        name: String,
        known: Vec<String>,
    },

    /// Error reading a configuration file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(modelguard::config::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(modelguard::config::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    #[diagnostic(code(modelguard::config::invalid))]
    ConfigError { message: String },

    /// Invalid column declaration.
    #[error("invalid column `{entity}.{column}`: {message}")]
    #[diagnostic(code(modelguard::config::invalid_column))]
    InvalidColumn {
        entity: String,
        column: String,
        message: String,
    },

    /// Duplicate entity declaration.
    #[error("duplicate entity `{name}`")]
    #[diagnostic(code(modelguard::config::duplicate_entity))]
    DuplicateEntity { name: String },
}

impl SchemaError {
    /// Create a not-found error with the sorted list of known entity names.
    pub fn not_found<I, S>(name: impl Into<String>, known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut known: Vec<String> = known.into_iter().map(Into::into).collect();
        known.sort();
        Self::SchemaNotFound {
            name: name.into(),
            known,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an invalid column error.
    pub fn invalid_column(
        entity: impl Into<String>,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidColumn {
            entity: entity.into(),
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate entity error.
    pub fn duplicate_entity(name: impl Into<String>) -> Self {
        Self::DuplicateEntity { name: name.into() }
    }
}
