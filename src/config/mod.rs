//! Catalog configuration: entity schemas declared in TOML.
//!
//! Entities and their columns are arrays-of-tables so declaration order is
//! preserved all the way into the derived artifacts:
//!
//! ```toml
//! [[entity]]
//! name = "users"
//!
//! [[entity.column]]
//! name = "email"
//! type = "varchar(255)"
//! nullable = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::SchemaCatalog;
use crate::error::{SchemaError, SchemaResult};
use crate::schema::{ColumnDescriptor, EntitySchema};

/// Root configuration structure for an entities file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Declared entities, in file order.
    #[serde(default, rename = "entity")]
    pub entities: Vec<EntityConfig>,
}

/// One declared entity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EntityConfig {
    /// Entity name.
    pub name: String,

    /// Declared columns, in file order.
    #[serde(default, rename = "column")]
    pub columns: Vec<ColumnConfig>,
}

/// One declared column.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    /// Column name.
    pub name: String,

    /// Raw encoded type tag, e.g. `"varchar(255)"`.
    #[serde(rename = "type")]
    pub encoded_type: String,

    /// Whether the column may be null. Defaults to true, matching the
    /// common case for storage columns.
    #[serde(default = "default_nullable")]
    pub nullable: bool,

    /// Set for columns with a generated default (e.g. `now()`) that has no
    /// literal representation.
    #[serde(default)]
    pub has_default: bool,

    /// Default literal.
    pub default: Option<toml::Value>,

    /// Allowed values for enumerated columns.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<String>>,
}

fn default_nullable() -> bool {
    true
}

impl CatalogConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> SchemaResult<Self> {
        toml::from_str(content).map_err(|e| SchemaError::TomlError { source: e })
    }

    /// Build the schema catalog declared by this configuration.
    ///
    /// Rejects duplicate entity names, duplicate column names within an
    /// entity, and entities with no columns.
    pub fn build_catalog(&self) -> SchemaResult<SchemaCatalog> {
        let mut catalog = SchemaCatalog::new();

        for entity in &self.entities {
            if catalog.names().any(|name| name == entity.name) {
                return Err(SchemaError::duplicate_entity(&entity.name));
            }
            if entity.columns.is_empty() {
                return Err(SchemaError::config(format!(
                    "entity `{}` must declare at least one column",
                    entity.name
                )));
            }

            let mut schema = EntitySchema::new(entity.name.as_str());
            for column in &entity.columns {
                if schema.has_column(&column.name) {
                    return Err(SchemaError::invalid_column(
                        &entity.name,
                        &column.name,
                        "duplicate column declaration",
                    ));
                }
                schema.add_column(column.to_descriptor());
            }
            catalog.add_schema(schema);
        }

        Ok(catalog)
    }
}

impl ColumnConfig {
    /// Convert to a column descriptor. `has_default` is implied by a
    /// declared default literal.
    fn to_descriptor(&self) -> ColumnDescriptor {
        let mut descriptor = ColumnDescriptor::new(self.name.as_str(), &self.encoded_type);
        descriptor.nullable = self.nullable;
        descriptor.has_default = self.has_default || self.default.is_some();
        descriptor.default_value = self.default.as_ref().map(toml_to_json);
        descriptor.enum_values = self.enum_values.clone();
        descriptor
    }
}

/// Convert a TOML value into the JSON value space used by the validator.
fn toml_to_json(value: &toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s.clone()),
        toml::Value::Integer(i) => serde_json::Value::from(*i),
        toml::Value::Float(f) => serde_json::Value::from(*f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(*b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .iter()
                .map(|(key, item)| (key.clone(), toml_to_json(item)))
                .collect(),
        ),
    }
}
