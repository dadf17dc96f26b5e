//! Column descriptors: the declarative input to the compiler.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smol_str::SmolStr;

use super::EncodedType;

/// One column of one entity, as declared in static configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name, unique within its entity.
    pub name: SmolStr,
    /// Parsed storage-type tag.
    pub encoded_type: EncodedType,
    /// Whether the stored value may be absent/null.
    pub nullable: bool,
    /// Whether a default exists (a literal or a generated value).
    pub has_default: bool,
    /// The default literal, when it is expressible as a value.
    pub default_value: Option<Value>,
    /// Allowed literal values for enumerated columns, in declaration order.
    pub enum_values: Option<Vec<String>>,
}

impl ColumnDescriptor {
    /// Create a new nullable column with no default and no enumeration.
    pub fn new(name: impl Into<SmolStr>, encoded_type: &str) -> Self {
        Self {
            name: name.into(),
            encoded_type: EncodedType::parse(encoded_type),
            nullable: true,
            has_default: false,
            default_value: None,
            enum_values: None,
        }
    }

    /// Mark the column as NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Attach a default literal.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.has_default = true;
        self.default_value = Some(value.into());
        self
    }

    /// Mark the column as carrying a generated default (e.g. `now()`),
    /// which has no literal representation.
    pub fn with_generated_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    /// Attach enumerated values.
    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Get the column name as a string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A column is semantically required exactly when it is NOT NULL and has
    /// no default. Evaluated here once; both generated artifacts read it.
    pub fn is_required(&self) -> bool {
        !self.nullable && !self.has_default
    }
}

impl std::fmt::Display for ColumnDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.encoded_type)?;
        if !self.nullable {
            write!(f, " NOT NULL")?;
        }
        if self.has_default {
            write!(f, " DEFAULT")?;
        }
        Ok(())
    }
}
