//! Client rule descriptor generation.
//!
//! Produces the declarative, serializable twin of the server rule set: the
//! same field models rendered as plain data plus pre-templated error
//! messages, sufficient for a form layer to enforce identical constraints
//! without re-deriving anything. Serialized with camelCase names for the
//! JavaScript consumer.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::model::{self, FieldValidationModel};
use crate::schema::EntitySchema;
use crate::semantic::SemanticType;

/// Declarative validation rules for one entity, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRuleDescriptor {
    /// Entity name.
    pub entity: String,
    /// Per-field rules, in schema order.
    pub fields: IndexMap<String, FieldRules>,
    /// Names of required fields, in schema order.
    pub required_fields: Vec<String>,
    /// Names of optional fields, in schema order.
    pub optional_fields: Vec<String>,
}

/// Rules and messages for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRules {
    /// Whether a value must be supplied.
    pub required: bool,
    /// Inferred semantic type.
    pub semantic_type: SemanticType,
    /// Maximum character length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Minimum character length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Regex source, identical to the server side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<&'static str>,
    /// Allowed values for enum fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Pre-templated error messages with the field name substituted in.
    pub error_messages: ErrorMessages,
}

/// Templated error messages for one field. Each message is present exactly
/// when the corresponding constraint applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_membership: Option<String>,
    #[serde(rename = "type")]
    pub type_mismatch: String,
}

impl FieldRules {
    fn from_model(model: &FieldValidationModel) -> Self {
        let error_messages = ErrorMessages {
            required: model.required.then(|| model.required_message()),
            max_length: model.max_length_message(),
            min_length: model.min_length_message(),
            pattern: model.pattern_message(),
            enum_membership: model.enum_message(),
            type_mismatch: model.type_message(),
        };

        Self {
            required: model.required,
            semantic_type: model.semantic_type,
            max_length: model.max_length,
            min_length: model.min_length,
            pattern: model.pattern,
            enum_values: model.enum_values.clone(),
            error_messages,
        }
    }
}

impl ClientRuleDescriptor {
    /// Generate the descriptor for a schema, skipping excluded fields.
    pub fn describe(schema: &EntitySchema, excluded: &[&str]) -> Self {
        let models = model::field_models(schema, excluded);

        let mut fields = IndexMap::new();
        let mut required_fields = Vec::new();
        let mut optional_fields = Vec::new();

        for model in &models {
            if model.required {
                required_fields.push(model.name().to_string());
            } else {
                optional_fields.push(model.name().to_string());
            }
            fields.insert(model.name().to_string(), FieldRules::from_model(model));
        }

        debug!(
            entity = schema.name(),
            fields = fields.len(),
            "built client rule descriptor"
        );

        Self {
            entity: schema.name().to_string(),
            fields,
            required_fields,
            optional_fields,
        }
    }

    /// Number of described fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{EMAIL_PATTERN, PASSWORD_PATTERN};
    use crate::schema::ColumnDescriptor;
    use serde_json::json;

    fn users() -> EntitySchema {
        EntitySchema::new("users")
            .with_column(
                ColumnDescriptor::new("id", "uuid")
                    .not_null()
                    .with_generated_default(),
            )
            .with_column(ColumnDescriptor::new("email", "varchar(255)").not_null())
            .with_column(ColumnDescriptor::new("password", "varchar(128)").not_null())
            .with_column(ColumnDescriptor::new("firstName", "varchar(100)"))
            .with_column(
                ColumnDescriptor::new("status", "varchar(20)")
                    .with_enum_values(["active", "archived"]),
            )
    }

    fn describe() -> ClientRuleDescriptor {
        ClientRuleDescriptor::describe(&users(), &["id"])
    }

    // ==================== Field Set Tests ====================

    #[test]
    fn test_describe_skips_excluded() {
        let descriptor = describe();
        assert_eq!(descriptor.field_count(), 4);
        assert!(!descriptor.fields.contains_key("id"));
    }

    #[test]
    fn test_required_and_optional_lists() {
        let descriptor = describe();
        assert_eq!(descriptor.required_fields, vec!["email", "password"]);
        assert_eq!(descriptor.optional_fields, vec!["firstName", "status"]);
    }

    #[test]
    fn test_entity_name() {
        assert_eq!(describe().entity, "users");
    }

    // ==================== Rule Content Tests ====================

    #[test]
    fn test_email_field_rules() {
        let descriptor = describe();
        let email = &descriptor.fields["email"];

        assert!(email.required);
        assert_eq!(email.semantic_type, SemanticType::Email);
        assert_eq!(email.max_length, Some(255));
        assert_eq!(email.pattern, Some(EMAIL_PATTERN));
        assert_eq!(
            email.error_messages.required.as_deref(),
            Some("email is required")
        );
        assert_eq!(
            email.error_messages.pattern.as_deref(),
            Some("email must be a valid email address")
        );
        assert_eq!(email.error_messages.type_mismatch, "email must be a string");
    }

    #[test]
    fn test_password_field_rules() {
        let descriptor = describe();
        let password = &descriptor.fields["password"];

        assert_eq!(password.semantic_type, SemanticType::Password);
        assert_eq!(password.min_length, Some(8));
        assert_eq!(password.pattern, Some(PASSWORD_PATTERN));
        assert_eq!(
            password.error_messages.min_length.as_deref(),
            Some("password must be at least 8 characters")
        );
    }

    #[test]
    fn test_optional_field_has_no_required_message() {
        let descriptor = describe();
        let first_name = &descriptor.fields["firstName"];

        assert!(!first_name.required);
        assert_eq!(first_name.error_messages.required, None);
        assert_eq!(
            first_name.error_messages.max_length.as_deref(),
            Some("firstName must be at most 100 characters")
        );
    }

    #[test]
    fn test_enum_field_rules() {
        let descriptor = describe();
        let status = &descriptor.fields["status"];

        assert_eq!(status.semantic_type, SemanticType::Enum);
        assert_eq!(
            status.enum_values,
            Some(vec!["active".to_string(), "archived".to_string()])
        );
        assert_eq!(
            status.error_messages.enum_membership.as_deref(),
            Some("status must be one of: active, archived")
        );
    }

    // ==================== Serialization Tests ====================

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(describe()).unwrap();

        assert_eq!(value["entity"], json!("users"));
        assert!(value["requiredFields"].is_array());
        assert_eq!(value["fields"]["email"]["semanticType"], json!("email"));
        assert_eq!(value["fields"]["email"]["maxLength"], json!(255));
        assert_eq!(
            value["fields"]["email"]["errorMessages"]["type"],
            json!("email must be a string")
        );
    }

    #[test]
    fn test_absent_constraints_are_omitted() {
        let value = serde_json::to_value(describe()).unwrap();
        let first_name = &value["fields"]["firstName"];

        assert!(first_name.get("minLength").is_none());
        assert!(first_name.get("pattern").is_none());
        assert!(first_name.get("enumValues").is_none());
        assert!(first_name["errorMessages"].get("required").is_none());
    }

    #[test]
    fn test_describe_is_idempotent() {
        assert_eq!(describe(), describe());
    }
}
