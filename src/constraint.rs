//! Constraint extraction.
//!
//! Pulls length bounds and pattern requirements out of the parsed encoded
//! type and the inferred semantic type. Extraction is best-effort: a bound
//! that failed to parse was already dropped at schema construction, and no
//! path through this module can abort the pipeline.

use serde::Serialize;

use crate::schema::ColumnDescriptor;
use crate::semantic::SemanticType;

/// Minimum length enforced for password fields.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Complexity rule for password fields: at least one lowercase letter, one
/// uppercase letter, one digit, and one symbol.
///
/// The lookahead syntax targets the JavaScript regex engine on the client
/// side; the server enforces the same rule with explicit character-class
/// checks, since Rust regex engines do not support lookaheads.
pub const PASSWORD_PATTERN: &str =
    r"^(?=.*[a-z])(?=.*[A-Z])(?=.*\d)(?=.*[^A-Za-z0-9]).{8,}$";

/// Standard `local@domain` shape matcher for email fields.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Permissive digit/punctuation matcher for phone fields.
pub const PHONE_PATTERN: &str = r"^\+?[0-9()\-\s.]{7,20}$";

/// Extracted per-field constraints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Constraints {
    /// Maximum character length.
    pub max_length: Option<usize>,
    /// Minimum character length.
    pub min_length: Option<usize>,
    /// Regex source shared verbatim by both generated artifacts.
    pub pattern: Option<&'static str>,
}

/// Extract constraints for one column given its inferred semantic type.
pub fn extract(column: &ColumnDescriptor, semantic_type: SemanticType) -> Constraints {
    let mut constraints = Constraints {
        max_length: column.encoded_type.bound,
        ..Constraints::default()
    };

    match semantic_type {
        SemanticType::Password => {
            constraints.min_length = Some(PASSWORD_MIN_LENGTH);
            constraints.pattern = Some(PASSWORD_PATTERN);
        }
        SemanticType::Email => constraints.pattern = Some(EMAIL_PATTERN),
        SemanticType::Phone => constraints.pattern = Some(PHONE_PATTERN),
        _ => {}
    }

    constraints
}
