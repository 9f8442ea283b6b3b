//! Data model shared by every transformation stage.
//!
//! - `schema`: source document as handed over by the host parser
//! - `entities`: resolved models, fields and the model collection
//! - `operation`: resolved operations and parameters
//!
//! Vendor metadata travels in an open [`Extensions`] bag; everything the core
//! itself writes lands in the typed [`Annotations`] struct.

mod entities;
mod operation;
mod schema;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use entities::{AllowableValue, Field, Model, ModelOrigin, ModelSet, UnionMember};
pub use operation::{HttpMethod, Operation, Parameter};
pub use schema::{OperationSpec, ParameterSpec, Schema, SchemaKind, SourceDocument};

/// Enum value can be string, integer, float, boolean, or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    /// String literal
    String(String),
    /// Integer literal
    Integer(i64),
    /// Floating-point literal
    Float(f64),
    /// Boolean literal
    Bool(bool),
    /// `null`
    Null,
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::String(s) => f.write_str(s),
            EnumValue::Integer(n) => write!(f, "{n}"),
            EnumValue::Float(x) => write!(f, "{x}"),
            EnumValue::Bool(b) => write!(f, "{b}"),
            EnumValue::Null => f.write_str("null"),
        }
    }
}

/// Open bag of vendor extensions (`x-...` keys and anything else not modelled).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Extensions(BTreeMap<String, serde_json::Value>);

impl Extensions {
    /// Raw value of an extension.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Set an extension, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.0.insert(key.into(), value);
    }

    /// No extensions declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read a list-valued extension. Non-string entries are rendered as JSON text.
    pub fn string_list(&self, key: &str) -> Option<Vec<String>> {
        let serde_json::Value::Array(items) = self.0.get(key)? else {
            return None;
        };
        Some(
            items
                .iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        )
    }
}

/// Hints attached by the core for downstream renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Annotations {
    /// Value is serialized as a POSIX timestamp.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub posix_time: bool,
    /// Class name of the union this field refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_of_name: Option<String>,
    /// The referenced union has at least one primitive or array member.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub one_of_primitives: bool,
    /// Class the parameter must be passed as.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_param: Option<String>,
    /// Identifier root for errors raised by an operation, e.g. `Pkg:api:getPet`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_identifier: Option<String>,
    /// Server-side request method name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_verb: Option<String>,
}
