//! The canonical per-field validation model.
//!
//! One `FieldValidationModel` is derived per column by combining semantic
//! inference, constraint extraction, and the required invariant. It is the
//! single source of truth that both the server rule compiler and the client
//! descriptor generator read; neither artifact derives anything on its own.

use serde::Serialize;
use serde_json::Value;
use smol_str::SmolStr;

use crate::constraint;
use crate::schema::{ColumnDescriptor, EntitySchema};
use crate::semantic::{self, SemanticType};

/// Canonical, immutable validation description of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidationModel {
    /// Field name.
    pub name: SmolStr,
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
    /// Regex source, when the semantic type carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<&'static str>,
    /// Allowed values for enum fields, in declaration order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Default literal, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl FieldValidationModel {
    /// Derive the model for one column. Pure and deterministic: the same
    /// descriptor always yields an identical model.
    pub fn build(column: &ColumnDescriptor) -> Self {
        let semantic_type = semantic::infer(column);
        let constraints = constraint::extract(column, semantic_type);

        // Enumerated values only survive when the field actually validates
        // as an enum; a naming override (e.g. a field named `email` with
        // declared values) discards them.
        let enum_values = if semantic_type == SemanticType::Enum {
            column.enum_values.clone()
        } else {
            None
        };

        Self {
            name: column.name.clone(),
            required: column.is_required(),
            semantic_type,
            max_length: constraints.max_length,
            min_length: constraints.min_length,
            pattern: constraints.pattern,
            enum_values,
            default_value: column.default_value.clone(),
        }
    }

    /// Get the field name as a string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Message for a missing required value.
    pub fn required_message(&self) -> String {
        format!("{} is required", self.name)
    }

    /// Message for a value of the wrong shape.
    pub fn type_message(&self) -> String {
        let noun = match self.semantic_type {
            SemanticType::Number => "a number",
            SemanticType::Boolean => "a boolean",
            SemanticType::Date => "a valid date",
            SemanticType::Object => "an object",
            SemanticType::Uuid => "a valid UUID",
            SemanticType::Url => "a valid URL",
            SemanticType::String
            | SemanticType::Enum
            | SemanticType::Email
            | SemanticType::Phone
            | SemanticType::Password => "a string",
        };
        format!("{} must be {}", self.name, noun)
    }

    /// Message for exceeding the maximum length, when one is set.
    pub fn max_length_message(&self) -> Option<String> {
        self.max_length
            .map(|n| format!("{} must be at most {} characters", self.name, n))
    }

    /// Message for falling short of the minimum length, when one is set.
    pub fn min_length_message(&self) -> Option<String> {
        self.min_length
            .map(|n| format!("{} must be at least {} characters", self.name, n))
    }

    /// Message for a pattern mismatch, when a pattern is set.
    pub fn pattern_message(&self) -> Option<String> {
        self.pattern?;
        let message = match self.semantic_type {
            SemanticType::Email => format!("{} must be a valid email address", self.name),
            SemanticType::Phone => format!("{} must be a valid phone number", self.name),
            SemanticType::Password => format!(
                "{} must contain at least one lowercase letter, one uppercase letter, one digit, and one symbol",
                self.name
            ),
            _ => format!("{} has an invalid format", self.name),
        };
        Some(message)
    }

    /// Message for a value outside the enumeration, when one is set.
    pub fn enum_message(&self) -> Option<String> {
        self.enum_values
            .as_ref()
            .map(|values| format!("{} must be one of: {}", self.name, values.join(", ")))
    }
}

/// Build the ordered field models for a schema, skipping excluded fields.
///
/// This is the one place the exclusion set is applied; both artifact
/// generators go through it, which is what keeps their field sets identical
/// by construction.
pub fn field_models(schema: &EntitySchema, excluded: &[&str]) -> Vec<FieldValidationModel> {
    schema
        .columns()
        .filter(|column| !excluded.contains(&column.name()))
        .map(FieldValidationModel::build)
        .collect()
}
