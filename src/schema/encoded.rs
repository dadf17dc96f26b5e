//! Encoded storage-type tags and their structured form.
//!
//! Column definitions arrive with a raw type string such as `"varchar(255)"`
//! or `"timestamp with time zone"`. The string is parsed exactly once, at
//! descriptor construction time, into a `{family, bound}` pair; everything
//! downstream reads the structured form and never re-parses.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Storage-type families recognized by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFamily {
    /// Character data, bounded or unbounded (varchar, char, text).
    Text,
    /// Integral, floating, and fixed-point numeric types.
    Numeric,
    /// Boolean type.
    Boolean,
    /// Date, time, and timestamp types.
    Temporal,
    /// Structured document types (json, jsonb).
    Json,
    /// UUID type.
    Uuid,
}

impl TypeFamily {
    /// Map a lowercased base type name to a family, if recognized.
    fn of(base: &str) -> Option<Self> {
        match base {
            "varchar" | "nvarchar" | "char" | "character" | "character varying" | "text"
            | "citext" => Some(Self::Text),
            "integer" | "int" | "int2" | "int4" | "int8" | "smallint" | "bigint" | "serial"
            | "bigserial" | "numeric" | "decimal" | "float" | "float4" | "float8" | "real"
            | "double" | "double precision" => Some(Self::Numeric),
            "boolean" | "bool" => Some(Self::Boolean),
            "timestamp" | "timestamptz" | "timestamp with time zone"
            | "timestamp without time zone" | "date" | "datetime" | "time" => {
                Some(Self::Temporal)
            }
            "json" | "jsonb" => Some(Self::Json),
            "uuid" => Some(Self::Uuid),
            _ => None,
        }
    }

    /// Get the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Temporal => "temporal",
            Self::Json => "json",
            Self::Uuid => "uuid",
        }
    }
}

impl std::fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed encoded type: the raw tag plus its structured interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedType {
    /// The raw type tag as declared.
    pub raw: SmolStr,
    /// Resolved type family. Unknown tags fall back to `Text`.
    pub family: TypeFamily,
    /// Embedded length bound for bounded-text types, e.g. the 255 in
    /// `varchar(255)`. `None` when absent or unparseable.
    pub bound: Option<usize>,
}

impl EncodedType {
    /// Parse a raw type tag.
    ///
    /// Parsing is best-effort and never fails: an unrecognized family
    /// degrades to `Text` semantics, and a bound that does not parse as an
    /// integer is simply dropped. Bounds are only honored for text families;
    /// the precision in `numeric(10, 2)` is not a length.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase();
        let (base, args) = match normalized.split_once('(') {
            Some((base, rest)) => (base.trim(), rest.trim().strip_suffix(')')),
            None => (normalized.as_str(), None),
        };

        let family = TypeFamily::of(base);
        let bound = match (family, args) {
            (Some(TypeFamily::Text), Some(args)) => args
                .split(',')
                .next()
                .and_then(|arg| arg.trim().parse::<usize>().ok()),
            _ => None,
        };

        Self {
            raw: raw.into(),
            family: family.unwrap_or(TypeFamily::Text),
            bound,
        }
    }
}

impl std::fmt::Display for EncodedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
