//! Identifier sanitization for the target language.
//!
//! - `reserved`: keyword sets consulted per role
//! - `sanitize`: role-specific rewriting rules
//! - `truncate`: length bound with a run-scoped, collision-free memo table

mod reserved;
mod sanitize;
mod truncate;

pub use reserved::{FIELD_RESERVED_WORDS, RESERVED_WORDS, is_reserved};
pub use sanitize::{is_legal_identifier, sanitize, try_sanitize};
pub use truncate::{MAX_IDENTIFIER_LEN, TruncationRegistry};

use std::fmt;
use std::str::FromStr;

/// Syntactic position an identifier is emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameRole {
    /// Model / class name
    Model,
    /// Property or variable name
    Field,
    /// Operation parameter name
    Parameter,
    /// Method name generated for an operation
    Operation,
    /// API class name derived from an operation tag
    Tag,
}

impl NameRole {
    /// Lowercase role name.
    pub fn as_str(self) -> &'static str {
        match self {
            NameRole::Model => "model",
            NameRole::Field => "field",
            NameRole::Parameter => "parameter",
            NameRole::Operation => "operation",
            NameRole::Tag => "tag",
        }
    }

    /// Identifier used when nothing legal is left of a name.
    pub fn placeholder(self) -> &'static str {
        match self {
            NameRole::Model => "ModelEmpty",
            NameRole::Tag => "ApiEmpty",
            NameRole::Operation => "callEmpty",
            NameRole::Field | NameRole::Parameter => "xempty",
        }
    }

    /// Rewrites on these roles are surfaced as warnings.
    fn reports_anomalies(self) -> bool {
        matches!(self, NameRole::Model | NameRole::Operation | NameRole::Tag)
    }

    fn maps_operators(self) -> bool {
        matches!(self, NameRole::Field | NameRole::Parameter)
    }
}

impl fmt::Display for NameRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NameRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "model" => Ok(NameRole::Model),
            "field" | "property" | "var" => Ok(NameRole::Field),
            "parameter" | "param" => Ok(NameRole::Parameter),
            "operation" | "method" => Ok(NameRole::Operation),
            "tag" | "api" => Ok(NameRole::Tag),
            other => Err(format!("Unknown name role '{other}'")),
        }
    }
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// `snake_case` to `UpperCamelCase`; the rest of each segment is kept as is.
pub fn camelize(s: &str) -> String {
    s.split('_')
        .filter(|part| !part.is_empty())
        .map(capitalize_first)
        .collect()
}

/// `snake_case` to `lowerCamelCase`.
pub fn camelize_lower(s: &str) -> String {
    let camel = camelize(s);
    let mut chars = camel.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}
