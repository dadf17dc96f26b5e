//! The schema catalog: the only surface external callers touch.
//!
//! Holds every entity schema, built once at startup and read-only
//! afterwards. All derivation below it is pure, so concurrent reads need no
//! synchronization.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use smol_str::SmolStr;
use tracing::debug;

use crate::client::ClientRuleDescriptor;
use crate::error::{SchemaError, SchemaResult};
use crate::model::{self, FieldValidationModel};
use crate::schema::EntitySchema;
use crate::server::{ServerRuleSet, ValidationReport};

/// Fields excluded from validation and description when the caller does not
/// supply an exclusion set. System-managed fields are never client-validated
/// by default.
pub const DEFAULT_EXCLUDED_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// One row of [`SchemaCatalog::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSummary {
    /// Entity name.
    pub name: String,
    /// Number of declared columns.
    pub field_count: usize,
}

/// Result of describing several entities at once: resolved descriptors plus
/// a parallel error map for names that did not resolve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescribeManyResult {
    /// Descriptors keyed by entity name, in request order.
    pub descriptors: IndexMap<String, ClientRuleDescriptor>,
    /// Error message per unresolvable name, in request order.
    pub errors: IndexMap<String, String>,
}

/// Lookup and listing layer over all entity schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    schemas: IndexMap<SmolStr, EntitySchema>,
}

impl SchemaCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema, replacing any previous schema of the same name.
    pub fn add_schema(&mut self, schema: EntitySchema) {
        self.schemas.insert(schema.name.clone(), schema);
    }

    /// Builder-style variant of [`add_schema`](Self::add_schema).
    pub fn with_schema(mut self, schema: EntitySchema) -> Self {
        self.add_schema(schema);
        self
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterate registered entity names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(|name| name.as_str())
    }

    /// List every registered schema with its field count.
    pub fn list(&self) -> Vec<SchemaSummary> {
        self.schemas
            .values()
            .map(|schema| SchemaSummary {
                name: schema.name().to_string(),
                field_count: schema.field_count(),
            })
            .collect()
    }

    /// Get a schema by entity name.
    pub fn get(&self, name: &str) -> SchemaResult<&EntitySchema> {
        self.schemas.get(name).ok_or_else(|| {
            debug!(entity = name, "catalog lookup miss");
            SchemaError::not_found(name, self.names())
        })
    }

    /// Canonical field models for one entity, skipping excluded fields
    /// (the default exclusion set when `None`).
    pub fn fields(
        &self,
        name: &str,
        excluded: Option<&[&str]>,
    ) -> SchemaResult<Vec<FieldValidationModel>> {
        let schema = self.get(name)?;
        Ok(model::field_models(schema, effective_excluded(excluded)))
    }

    /// Compile the server rule set for one entity.
    pub fn compile(&self, name: &str, excluded: Option<&[&str]>) -> SchemaResult<ServerRuleSet> {
        let schema = self.get(name)?;
        Ok(ServerRuleSet::compile(schema, effective_excluded(excluded)))
    }

    /// Client rule descriptor for one entity.
    pub fn describe(
        &self,
        name: &str,
        excluded: Option<&[&str]>,
    ) -> SchemaResult<ClientRuleDescriptor> {
        let schema = self.get(name)?;
        Ok(ClientRuleDescriptor::describe(
            schema,
            effective_excluded(excluded),
        ))
    }

    /// Validate a candidate record against one entity's rules.
    pub fn validate(
        &self,
        name: &str,
        record: &Map<String, Value>,
        excluded: Option<&[&str]>,
    ) -> SchemaResult<ValidationReport> {
        Ok(self.compile(name, excluded)?.validate(record))
    }

    /// Describe several entities at once. Names that do not resolve land in
    /// the error map instead of failing the whole call.
    pub fn describe_many(&self, names: &[&str], excluded: Option<&[&str]>) -> DescribeManyResult {
        let mut descriptors = IndexMap::new();
        let mut errors = IndexMap::new();

        for &name in names {
            match self.describe(name, excluded) {
                Ok(descriptor) => {
                    descriptors.insert(name.to_string(), descriptor);
                }
                Err(err) => {
                    errors.insert(name.to_string(), err.to_string());
                }
            }
        }

        DescribeManyResult {
            descriptors,
            errors,
        }
    }
}

/// Resolve the caller-supplied exclusion set, falling back to the default.
fn effective_excluded<'a>(excluded: Option<&'a [&'a str]>) -> &'a [&'a str] {
    excluded.unwrap_or(&DEFAULT_EXCLUDED_FIELDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnDescriptor;
    use serde_json::json;

    fn catalog() -> SchemaCatalog {
        SchemaCatalog::new()
            .with_schema(
                EntitySchema::new("users")
                    .with_column(
                        ColumnDescriptor::new("id", "uuid")
                            .not_null()
                            .with_generated_default(),
                    )
                    .with_column(ColumnDescriptor::new("email", "varchar(255)").not_null())
                    .with_column(ColumnDescriptor::new("firstName", "varchar(100)"))
                    .with_column(
                        ColumnDescriptor::new("createdAt", "timestamp")
                            .not_null()
                            .with_generated_default(),
                    ),
            )
            .with_schema(
                EntitySchema::new("assets")
                    .with_column(
                        ColumnDescriptor::new("id", "uuid")
                            .not_null()
                            .with_generated_default(),
                    )
                    .with_column(ColumnDescriptor::new("name", "varchar(200)").not_null()),
            )
    }

    // ==================== Listing Tests ====================

    #[test]
    fn test_list() {
        let summaries = catalog().list();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "users");
        assert_eq!(summaries[0].field_count, 4);
        assert_eq!(summaries[1].name, "assets");
        assert_eq!(summaries[1].field_count, 2);
    }

    #[test]
    fn test_names_and_len() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["users", "assets"]);
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_get_known_entity() {
        let catalog = catalog();
        assert_eq!(catalog.get("users").unwrap().name(), "users");
    }

    #[test]
    fn test_get_unknown_entity_lists_known_names() {
        let err = catalog().get("no-such-entity").unwrap_err();
        match err {
            SchemaError::SchemaNotFound { name, known } => {
                assert_eq!(name, "no-such-entity");
                assert_eq!(known, vec!["assets", "users"]);
            }
            _ => panic!("Expected SchemaNotFound"),
        }
    }

    // ==================== Default Exclusion Tests ====================

    #[test]
    fn test_default_exclusion_applied_when_none() {
        let fields = catalog().fields("users", None).unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["email", "firstName"]);
    }

    #[test]
    fn test_explicit_exclusion_overrides_default() {
        let fields = catalog().fields("users", Some(&["email"])).unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["id", "firstName", "createdAt"]);
    }

    #[test]
    fn test_empty_exclusion_validates_everything() {
        let fields = catalog().fields("users", Some(&[])).unwrap();
        assert_eq!(fields.len(), 4);
    }

    // ==================== Operation Tests ====================

    #[test]
    fn test_describe() {
        let descriptor = catalog().describe("users", None).unwrap();
        assert_eq!(descriptor.entity, "users");
        assert_eq!(descriptor.field_count(), 2);
    }

    #[test]
    fn test_validate() {
        let report = catalog()
            .validate(
                "users",
                json!({ "email": "a@b.com" }).as_object().unwrap(),
                None,
            )
            .unwrap();
        assert!(report.is_valid());
    }

    #[test]
    fn test_validate_unknown_entity() {
        let result = catalog().validate("widgets", &Map::new(), None);
        assert!(matches!(
            result,
            Err(SchemaError::SchemaNotFound { .. })
        ));
    }

    #[test]
    fn test_describe_many_splits_hits_and_misses() {
        let result = catalog().describe_many(&["users", "widgets", "assets"], None);

        assert_eq!(result.descriptors.len(), 2);
        assert!(result.descriptors.contains_key("users"));
        assert!(result.descriptors.contains_key("assets"));

        assert_eq!(result.errors.len(), 1);
        assert!(result.errors["widgets"].contains("unknown entity schema"));
    }

    #[test]
    fn test_add_schema_replaces_same_name() {
        let mut catalog = catalog();
        catalog.add_schema(EntitySchema::new("users"));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("users").unwrap().field_count(), 0);
    }
}
