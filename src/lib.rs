//! # modelguard
//!
//! A schema-to-validation compiler: inspect a declarative data-model
//! description (entity and column definitions) and mechanically derive two
//! independent, always-consistent validation artifacts:
//!
//! - a [`ServerRuleSet`] that accepts or rejects candidate records and
//!   reports per-field errors, and
//! - a [`ClientRuleDescriptor`], a serializable rule description with
//!   templated error messages for driving form UIs.
//!
//! Both artifacts are pure functions of the same canonical
//! [`FieldValidationModel`] list, so their field sets and constraint values
//! can never drift apart.
//!
//! ## Example
//!
//! ```rust
//! use modelguard::{ColumnDescriptor, EntitySchema, SchemaCatalog};
//! use serde_json::json;
//!
//! let catalog = SchemaCatalog::new().with_schema(
//!     EntitySchema::new("users")
//!         .with_column(ColumnDescriptor::new("email", "varchar(255)").not_null())
//!         .with_column(ColumnDescriptor::new("firstName", "varchar(100)")),
//! );
//!
//! let record = json!({ "email": "a@b.com" });
//! let report = catalog
//!     .validate("users", record.as_object().unwrap(), None)
//!     .unwrap();
//! assert!(report.is_valid());
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod constraint;
pub mod error;
pub mod model;
pub mod schema;
pub mod semantic;
pub mod server;

pub use catalog::{DEFAULT_EXCLUDED_FIELDS, DescribeManyResult, SchemaCatalog, SchemaSummary};
pub use client::{ClientRuleDescriptor, ErrorMessages, FieldRules};
pub use config::CatalogConfig;
pub use constraint::{
    Constraints, EMAIL_PATTERN, PASSWORD_MIN_LENGTH, PASSWORD_PATTERN, PHONE_PATTERN,
};
pub use error::{SchemaError, SchemaResult};
pub use model::{FieldValidationModel, field_models};
pub use schema::{ColumnDescriptor, EncodedType, EntitySchema, TypeFamily};
pub use semantic::{SemanticType, infer};
pub use server::{ServerRuleSet, ValidationReport};
