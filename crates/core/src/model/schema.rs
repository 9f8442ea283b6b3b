//! Source document structs for serde deserialization.
//!
//! This is the subset of an OpenAPI document the transformation core reads:
//! named component schemas plus a flattened list of operations.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Deserialize;

use super::{EnumValue, Extensions, HttpMethod};
use crate::error::Result;

/// Prefix stripped from `$ref` paths to obtain the referenced schema name.
const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Root source document handed over by the host parser.
#[derive(Debug, Default, Deserialize)]
pub struct SourceDocument {
    /// Named component schemas.
    #[serde(default)]
    pub schemas: BTreeMap<String, Schema>,
    /// Every operation of the document, in declaration order.
    #[serde(default)]
    pub operations: Vec<OperationSpec>,
}

impl SourceDocument {
    /// Parse a source document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// An API operation as declared in the source document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSpec {
    /// Declared `operationId`.
    pub operation_id: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template.
    pub path: String,
    /// Tags; the first one names the API class.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Declared parameters, in order.
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
    /// Success response schema, if any.
    pub response: Option<Schema>,
    /// Names of the auth methods securing the operation.
    #[serde(default)]
    pub auth_methods: Vec<String>,
    /// Every other key, vendor extensions included.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A declared operation parameter.
#[derive(Debug, Deserialize)]
pub struct ParameterSpec {
    /// Declared parameter name.
    pub name: String,
    /// Must be supplied by the caller.
    #[serde(default)]
    pub required: bool,
    /// Parameter type.
    #[serde(default)]
    pub schema: Schema,
    /// Every other key, vendor extensions included.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Declared JSON type of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// `boolean`
    Boolean,
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `string`
    String,
    /// `array`
    Array,
    /// `object`
    Object,
}

/// A node of the source type graph.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Declared JSON type.
    #[serde(rename = "type")]
    pub kind: Option<SchemaKind>,

    /// Format hint (e.g. int64, float, date-time, unixtime).
    pub format: Option<String>,

    /// Reference to another named schema.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,

    /// Properties for object types, in declaration order.
    #[serde(default)]
    pub properties: IndexMap<String, Schema>,

    /// Required property names for object types.
    #[serde(default)]
    pub required: Vec<String>,

    /// Item schema for array types.
    pub items: Option<Box<Schema>>,

    /// Value schema for map types.
    pub additional_properties: Option<Box<Schema>>,

    /// Tagged union members.
    #[serde(default)]
    pub one_of: Vec<Schema>,

    /// Allowed literal values.
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<EnumValue>,

    /// Declared default value.
    pub default: Option<serde_json::Value>,

    /// Declared example value.
    pub example: Option<serde_json::Value>,

    /// Every other key, vendor extensions included.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Schema {
    /// Schema of the given kind with nothing else set.
    pub fn of_kind(kind: SchemaKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Name of the referenced schema, with the components prefix stripped.
    pub fn reference_name(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .map(|r| r.strip_prefix(SCHEMA_REF_PREFIX).unwrap_or(r))
    }

    /// Declares allowed values.
    pub fn is_enum(&self) -> bool {
        !self.enum_values.is_empty()
    }

    /// Declares `oneOf` members.
    pub fn is_union(&self) -> bool {
        !self.one_of.is_empty()
    }

    /// Declared as an array.
    pub fn is_array(&self) -> bool {
        self.kind == Some(SchemaKind::Array)
    }

    /// Object schema whose values are described by `additionalProperties`.
    pub fn is_map(&self) -> bool {
        self.properties.is_empty() && self.additional_properties.is_some()
    }

    /// Scalar schema: no reference, members, properties or items.
    pub fn is_primitive(&self) -> bool {
        self.reference.is_none()
            && matches!(
                self.kind,
                Some(
                    SchemaKind::Boolean
                        | SchemaKind::Integer
                        | SchemaKind::Number
                        | SchemaKind::String
                )
            )
    }

    /// Declared format equals `format`.
    pub fn format_is(&self, format: &str) -> bool {
        self.format.as_deref() == Some(format)
    }
}
