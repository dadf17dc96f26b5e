//! Server rule compilation and record validation.
//!
//! A [`ServerRuleSet`] is compiled from an entity schema and an exclusion
//! set, then applied to candidate records. Validation collects every
//! violation instead of stopping at the first failure, because callers need
//! the complete error set for form feedback. Unknown fields present in the
//! record but not in the schema are silently dropped from the returned
//! value, never reported as errors.

use indexmap::IndexMap;
use regex_lite::Regex;
use serde_json::{Map, Value};
use smol_str::SmolStr;
use tracing::debug;

use crate::model::{self, FieldValidationModel};
use crate::schema::EntitySchema;
use crate::semantic::SemanticType;

/// Executable validation rules for one entity.
#[derive(Debug)]
pub struct ServerRuleSet {
    entity: SmolStr,
    rules: Vec<FieldRule>,
}

/// One field's model plus its compiled matcher, when the pattern is
/// expressible as a plain regex.
#[derive(Debug)]
struct FieldRule {
    model: FieldValidationModel,
    matcher: Option<Regex>,
}

impl FieldRule {
    fn new(model: FieldValidationModel) -> Self {
        // Password patterns use lookaheads for the client's regex engine and
        // are enforced here with character-class checks instead.
        let matcher = match model.semantic_type {
            SemanticType::Email | SemanticType::Phone => model
                .pattern
                .map(|pattern| Regex::new(pattern).expect("built-in pattern compiles")),
            _ => None,
        };
        Self { model, matcher }
    }

    /// Check a present, non-null value. Returns the first violation for
    /// this field, or `None` when the value passes.
    fn check(&self, value: &Value) -> Option<String> {
        let model = &self.model;

        // Non-textual shapes have nothing beyond the type check.
        match model.semantic_type {
            SemanticType::Number => {
                return (!value.is_number()).then(|| model.type_message());
            }
            SemanticType::Boolean => {
                return (!value.is_boolean()).then(|| model.type_message());
            }
            SemanticType::Object => {
                return (!value.is_object()).then(|| model.type_message());
            }
            _ => {}
        }

        let Some(text) = value.as_str() else {
            return Some(model.type_message());
        };

        let length = text.chars().count();
        if let Some(min) = model.min_length {
            if length < min {
                return model.min_length_message();
            }
        }
        if let Some(max) = model.max_length {
            if length > max {
                return model.max_length_message();
            }
        }

        match model.semantic_type {
            SemanticType::Date => (!is_valid_date(text)).then(|| model.type_message()),
            SemanticType::Uuid => uuid::Uuid::parse_str(text)
                .is_err()
                .then(|| model.type_message()),
            SemanticType::Url => url::Url::parse(text).is_err().then(|| model.type_message()),
            SemanticType::Enum => {
                let allowed = model
                    .enum_values
                    .as_ref()
                    .is_some_and(|values| values.iter().any(|v| v == text));
                (!allowed).then(|| model.enum_message()).flatten()
            }
            SemanticType::Email | SemanticType::Phone => {
                let matches = self
                    .matcher
                    .as_ref()
                    .is_none_or(|matcher| matcher.is_match(text));
                (!matches).then(|| model.pattern_message()).flatten()
            }
            SemanticType::Password => {
                (!meets_password_complexity(text)).then(|| model.pattern_message()).flatten()
            }
            SemanticType::String => None,
            // Handled above.
            SemanticType::Number | SemanticType::Boolean | SemanticType::Object => None,
        }
    }
}

/// Outcome of validating one record: the complete per-field error map plus
/// the record stripped of unknown fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// First violation per failing field, in schema order.
    pub errors: IndexMap<String, String>,
    /// The candidate record with unknown fields removed.
    pub value: Map<String, Value>,
}

impl ValidationReport {
    /// Whether the record passed every check.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Shape the report the way the boundary layer responds: either
    /// `{"isValid": true, "data": ...}` or `{"isValid": false, "errors": ...}`.
    pub fn into_response(self) -> Value {
        if self.errors.is_empty() {
            serde_json::json!({ "isValid": true, "data": Value::Object(self.value) })
        } else {
            let errors: Map<String, Value> = self
                .errors
                .into_iter()
                .map(|(field, message)| (field, Value::String(message)))
                .collect();
            serde_json::json!({ "isValid": false, "errors": Value::Object(errors) })
        }
    }
}

impl ServerRuleSet {
    /// Compile the rule set for a schema, skipping excluded fields.
    pub fn compile(schema: &EntitySchema, excluded: &[&str]) -> Self {
        let rules: Vec<FieldRule> = model::field_models(schema, excluded)
            .into_iter()
            .map(FieldRule::new)
            .collect();
        debug!(
            entity = schema.name(),
            fields = rules.len(),
            "compiled server rule set"
        );
        Self {
            entity: schema.name.clone(),
            rules,
        }
    }

    /// The entity this rule set validates.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// The canonical field models this rule set was compiled from.
    pub fn fields(&self) -> impl Iterator<Item = &FieldValidationModel> {
        self.rules.iter().map(|rule| &rule.model)
    }

    /// Validate a candidate record.
    ///
    /// Evaluates every field and collects every violation. Fields known to
    /// the schema are copied into the returned value whether or not they
    /// passed; unknown fields are dropped.
    pub fn validate(&self, record: &Map<String, Value>) -> ValidationReport {
        let mut errors = IndexMap::new();
        let mut value = Map::new();

        for rule in &self.rules {
            let name = rule.model.name();
            match record.get(name) {
                None | Some(Value::Null) => {
                    if rule.model.required {
                        errors.insert(name.to_string(), rule.model.required_message());
                    }
                }
                Some(present) => {
                    if let Some(message) = rule.check(present) {
                        errors.insert(name.to_string(), message);
                    }
                    value.insert(name.to_string(), present.clone());
                }
            }
        }

        ValidationReport { errors, value }
    }
}

/// Dates are transported as strings: RFC 3339, `YYYY-MM-DDTHH:MM:SS`, or a
/// bare `YYYY-MM-DD`.
fn is_valid_date(text: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(text).is_ok()
        || chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").is_ok()
        || chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

/// The password complexity rule, mirrored from [`crate::constraint::PASSWORD_PATTERN`].
fn meets_password_complexity(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_lowercase())
        && text.chars().any(|c| c.is_ascii_uppercase())
        && text.chars().any(|c| c.is_ascii_digit())
        && text.chars().any(|c| !c.is_ascii_alphanumeric())
}
