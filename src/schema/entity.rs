//! Entity schemas: named, ordered sets of column descriptors.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::ColumnDescriptor;

/// The declared shape of one logical data entity (e.g. "users").
///
/// Built once at process start, read-only thereafter. Column order is
/// declaration order and is preserved through every derived artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Entity name.
    pub name: SmolStr,
    /// Columns keyed by name, in declaration order.
    pub columns: IndexMap<SmolStr, ColumnDescriptor>,
}

impl EntitySchema {
    /// Create a new empty entity schema.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            columns: IndexMap::new(),
        }
    }

    /// Add a column, replacing any previous column of the same name.
    pub fn add_column(&mut self, column: ColumnDescriptor) {
        self.columns.insert(column.name.clone(), column);
    }

    /// Builder-style variant of [`add_column`](Self::add_column).
    pub fn with_column(mut self, column: ColumnDescriptor) -> Self {
        self.add_column(column);
        self
    }

    /// Get the entity name as a string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.get(name)
    }

    /// Check whether a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Number of declared columns.
    pub fn field_count(&self) -> usize {
        self.columns.len()
    }

    /// Iterate columns in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.values()
    }

    /// Iterate column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|name| name.as_str())
    }
}

impl std::fmt::Display for EntitySchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EntitySchema({}, {} columns)", self.name, self.columns.len())
    }
}
