//! Semantic type inference.
//!
//! Maps a column descriptor to the validation-relevant category of its
//! values. Inference applies a fixed precedence: the storage family gives a
//! base type, a declared enumeration overrides it, and a name-pattern match
//! overrides both. A field literally named `email` expresses form-level
//! intent that is more specific than its storage encoding, so the naming
//! rule wins even over an explicit enumeration.

use serde::{Deserialize, Serialize};

use crate::schema::{ColumnDescriptor, TypeFamily};

/// The inferred validation category of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    /// Free-form text.
    String,
    /// Numeric value.
    Number,
    /// Boolean value.
    Boolean,
    /// Date or timestamp, transported as a string.
    Date,
    /// Structured object (stored as json/jsonb).
    Object,
    /// UUID string.
    Uuid,
    /// Member of a declared enumeration.
    Enum,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// URL.
    Url,
    /// Password requiring minimum length and complexity.
    Password,
}

impl SemanticType {
    /// Base semantic type for a storage family.
    pub fn from_family(family: TypeFamily) -> Self {
        match family {
            TypeFamily::Text => Self::String,
            TypeFamily::Numeric => Self::Number,
            TypeFamily::Boolean => Self::Boolean,
            TypeFamily::Temporal => Self::Date,
            TypeFamily::Json => Self::Object,
            TypeFamily::Uuid => Self::Uuid,
        }
    }

    /// Get the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Object => "object",
            Self::Uuid => "uuid",
            Self::Enum => "enum",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::Password => "password",
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Infer the semantic type of a column.
///
/// Never fails: unknown storage families already degraded to the text
/// family at parse time, so every column receives some type.
pub fn infer(column: &ColumnDescriptor) -> SemanticType {
    let mut inferred = SemanticType::from_family(column.encoded_type.family);

    if column.enum_values.as_ref().is_some_and(|v| !v.is_empty()) {
        inferred = SemanticType::Enum;
    }

    // Name patterns win over everything, including an explicit enumeration.
    // Password is matched first so a name like `password_reset_link` still
    // gets password semantics.
    let name = column.name().to_ascii_lowercase();
    if name.contains("password") {
        SemanticType::Password
    } else if name.contains("email") {
        SemanticType::Email
    } else if name.contains("phone") {
        SemanticType::Phone
    } else if name.contains("url") || name.contains("link") {
        SemanticType::Url
    } else {
        inferred
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnDescriptor;

    // ==================== Base Mapping Tests ====================

    #[test]
    fn test_infer_string_from_text() {
        assert_eq!(
            infer(&ColumnDescriptor::new("title", "varchar(200)")),
            SemanticType::String
        );
        assert_eq!(
            infer(&ColumnDescriptor::new("body", "text")),
            SemanticType::String
        );
    }

    #[test]
    fn test_infer_number() {
        assert_eq!(
            infer(&ColumnDescriptor::new("count", "integer")),
            SemanticType::Number
        );
        assert_eq!(
            infer(&ColumnDescriptor::new("price", "numeric(10, 2)")),
            SemanticType::Number
        );
    }

    #[test]
    fn test_infer_boolean() {
        assert_eq!(
            infer(&ColumnDescriptor::new("active", "boolean")),
            SemanticType::Boolean
        );
    }

    #[test]
    fn test_infer_date() {
        assert_eq!(
            infer(&ColumnDescriptor::new("dueDate", "timestamp")),
            SemanticType::Date
        );
        assert_eq!(
            infer(&ColumnDescriptor::new("born", "date")),
            SemanticType::Date
        );
    }

    #[test]
    fn test_infer_object() {
        assert_eq!(
            infer(&ColumnDescriptor::new("metadata", "jsonb")),
            SemanticType::Object
        );
    }

    #[test]
    fn test_infer_uuid() {
        assert_eq!(
            infer(&ColumnDescriptor::new("id", "uuid")),
            SemanticType::Uuid
        );
    }

    #[test]
    fn test_infer_unknown_family_defaults_to_string() {
        assert_eq!(
            infer(&ColumnDescriptor::new("payload", "blob")),
            SemanticType::String
        );
    }

    // ==================== Enum Override Tests ====================

    #[test]
    fn test_enum_values_override_base_type() {
        let column =
            ColumnDescriptor::new("status", "varchar(20)").with_enum_values(["active", "archived"]);
        assert_eq!(infer(&column), SemanticType::Enum);
    }

    #[test]
    fn test_empty_enum_values_do_not_override() {
        let column = ColumnDescriptor::new("status", "varchar(20)")
            .with_enum_values(Vec::<String>::new());
        assert_eq!(infer(&column), SemanticType::String);
    }

    // ==================== Name Override Tests ====================

    #[test]
    fn test_name_email() {
        assert_eq!(
            infer(&ColumnDescriptor::new("contactEmail", "varchar(255)")),
            SemanticType::Email
        );
    }

    #[test]
    fn test_name_phone() {
        assert_eq!(
            infer(&ColumnDescriptor::new("phone_number", "varchar(20)")),
            SemanticType::Phone
        );
    }

    #[test]
    fn test_name_url_and_link() {
        assert_eq!(
            infer(&ColumnDescriptor::new("avatarUrl", "text")),
            SemanticType::Url
        );
        assert_eq!(
            infer(&ColumnDescriptor::new("homepage_link", "text")),
            SemanticType::Url
        );
    }

    #[test]
    fn test_name_password() {
        assert_eq!(
            infer(&ColumnDescriptor::new("password", "varchar(128)")),
            SemanticType::Password
        );
    }

    #[test]
    fn test_name_password_beats_other_name_patterns() {
        assert_eq!(
            infer(&ColumnDescriptor::new("password_reset_link", "text")),
            SemanticType::Password
        );
    }

    #[test]
    fn test_name_beats_declared_type() {
        assert_eq!(
            infer(&ColumnDescriptor::new("email", "integer")),
            SemanticType::Email
        );
    }

    #[test]
    fn test_name_beats_enum_values() {
        // Form-level intent over storage encoding: the naming match wins
        // even against a declared enumeration.
        let column = ColumnDescriptor::new("contact_email", "varchar(255)")
            .with_enum_values(["a@b.com", "c@d.com"]);
        assert_eq!(infer(&column), SemanticType::Email);
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        assert_eq!(
            infer(&ColumnDescriptor::new("ContactEMAIL", "text")),
            SemanticType::Email
        );
    }

    // ==================== Display Tests ====================

    #[test]
    fn test_as_str_and_display() {
        assert_eq!(SemanticType::Password.as_str(), "password");
        assert_eq!(format!("{}", SemanticType::Email), "email");
    }
}
