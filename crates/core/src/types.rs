//! Scalar type mapping from source schemas to target types.
//!
//! Scalars are looked up by kind, optionally qualified by format
//! (`number+float`, `integer+unixtime`); everything else resolves to a model
//! reference named by the model-naming policy.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::GeneratorConfig;
use crate::context::GenerationContext;
use crate::error::Result;
use crate::model::{Schema, SchemaKind};
use crate::naming::NameRole;

/// Generated model standing in for free-form and anonymous object schemas.
pub const FREE_FORM_OBJECT: &str = "FreeFormObject";

/// Target-native primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    /// `logical`
    Logical,
    /// `string`
    String,
    /// `int32`
    Int32,
    /// `int64`
    Int64,
    /// `single`
    Single,
    /// `double`
    Double,
    /// `datetime`
    Datetime,
}

impl Primitive {
    /// MATLAB class name.
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::Logical => "logical",
            Primitive::String => "string",
            Primitive::Int32 => "int32",
            Primitive::Int64 => "int64",
            Primitive::Single => "single",
            Primitive::Double => "double",
            Primitive::Datetime => "datetime",
        }
    }
}

/// Resolved type of a field, parameter or union member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum TypeRef {
    /// Built-in MATLAB class.
    Primitive(Primitive),
    /// Generated helper type scoped inside the output package, e.g. `Pkg.JSONMapperMap`.
    Packaged(String),
    /// Reference to a generated model by class name.
    Model(String),
}

impl TypeRef {
    /// Built-in MATLAB class.
    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive(_))
    }

    /// The primitive, if this is one.
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            TypeRef::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Referenced class name, if this is a model reference.
    pub fn model_name(&self) -> Option<&str> {
        match self {
            TypeRef::Model(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => f.write_str(p.as_str()),
            TypeRef::Packaged(name) | TypeRef::Model(name) => f.write_str(name),
        }
    }
}

/// Entry of the scalar table: a schema kind, optionally qualified by format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKey {
    /// `boolean`
    Boolean,
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `integer+int64`
    Long,
    /// `number`
    Number,
    /// `number+float`
    NumberFloat,
    /// `number+double`
    NumberDouble,
    /// `string+date-time`
    DateTime,
    /// `string+date`
    Date,
    /// `string+binary`
    File,
    /// `string+uuid`
    Uuid,
    /// `integer+unixtime`
    UnixTime,
    /// object with `additionalProperties` only
    Map,
}

impl ScalarKey {
    /// Classify a schema, or `None` when it is not a scalar.
    pub fn classify(schema: &Schema) -> Option<Self> {
        if schema.reference.is_some() {
            return None;
        }

        let format = schema.format.as_deref();
        match schema.kind {
            Some(SchemaKind::Boolean) => Some(ScalarKey::Boolean),
            Some(SchemaKind::Integer) => Some(match format {
                Some("int64") => ScalarKey::Long,
                Some("unixtime") => ScalarKey::UnixTime,
                _ => ScalarKey::Integer,
            }),
            Some(SchemaKind::Number) => Some(match format {
                Some("float") => ScalarKey::NumberFloat,
                Some("double") => ScalarKey::NumberDouble,
                _ => ScalarKey::Number,
            }),
            Some(SchemaKind::String) => Some(match format {
                Some("date-time") => ScalarKey::DateTime,
                Some("date") => ScalarKey::Date,
                Some("binary") => ScalarKey::File,
                Some("uuid") => ScalarKey::Uuid,
                _ => ScalarKey::String,
            }),
            Some(SchemaKind::Object) if schema.is_map() => Some(ScalarKey::Map),
            // Untyped enums are string enums.
            None if schema.is_enum() => Some(ScalarKey::String),
            _ => None,
        }
    }

    /// Target type of this scalar.
    pub fn target(self, config: &GeneratorConfig) -> TypeRef {
        let primitive = match self {
            ScalarKey::Boolean => Primitive::Logical,
            ScalarKey::String | ScalarKey::File | ScalarKey::Uuid => Primitive::String,
            ScalarKey::Integer => Primitive::Int32,
            ScalarKey::Long => Primitive::Int64,
            ScalarKey::Number | ScalarKey::NumberDouble => Primitive::Double,
            ScalarKey::NumberFloat => Primitive::Single,
            ScalarKey::DateTime | ScalarKey::Date | ScalarKey::UnixTime => Primitive::Datetime,
            ScalarKey::Map => return TypeRef::Packaged(config.map_container_type()),
        };
        TypeRef::Primitive(primitive)
    }
}

/// Resolve a schema to its target type.
///
/// Arrays resolve to their element type; the array-ness is carried by the
/// owning field or parameter.
pub fn resolve(schema: &Schema, ctx: &mut GenerationContext) -> Result<TypeRef> {
    if schema.is_array() {
        return match &schema.items {
            Some(items) => resolve(items, ctx),
            None => {
                debug!("Array schema without items, using free-form element type.");
                Ok(TypeRef::Model(FREE_FORM_OBJECT.to_string()))
            }
        };
    }

    if let Some(key) = ScalarKey::classify(schema) {
        return Ok(key.target(ctx.config()));
    }

    if let Some(name) = schema.reference_name() {
        return Ok(TypeRef::Model(ctx.sanitize(name, NameRole::Model)?));
    }

    if schema.properties.is_empty() && !schema.is_union() {
        debug!("Free-form object schema.");
    } else {
        warn!(
            properties = schema.properties.len(),
            members = schema.one_of.len(),
            "Anonymous inline schema cannot be named, using {FREE_FORM_OBJECT}."
        );
    }
    Ok(TypeRef::Model(FREE_FORM_OBJECT.to_string()))
}

/// Format marks the value as a POSIX timestamp; the type stays `datetime`.
pub fn is_posix_time(schema: &Schema) -> bool {
    schema.format_is("unixtime")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn scalar(kind: SchemaKind, format: Option<&str>) -> Schema {
        Schema {
            format: format.map(str::to_string),
            ..Schema::of_kind(kind)
        }
    }

    fn resolve_one(schema: &Schema) -> TypeRef {
        resolve(schema, &mut GenerationContext::default()).unwrap()
    }

    #[test]
    fn test_scalar_table() {
        let cases = [
            (SchemaKind::Boolean, None, Primitive::Logical),
            (SchemaKind::String, None, Primitive::String),
            (SchemaKind::String, Some("uuid"), Primitive::String),
            (SchemaKind::String, Some("binary"), Primitive::String),
            (SchemaKind::String, Some("date"), Primitive::Datetime),
            (SchemaKind::String, Some("date-time"), Primitive::Datetime),
            (SchemaKind::Integer, None, Primitive::Int32),
            (SchemaKind::Integer, Some("int32"), Primitive::Int32),
            (SchemaKind::Integer, Some("int64"), Primitive::Int64),
            (SchemaKind::Integer, Some("unixtime"), Primitive::Datetime),
            (SchemaKind::Number, None, Primitive::Double),
            (SchemaKind::Number, Some("float"), Primitive::Single),
            (SchemaKind::Number, Some("double"), Primitive::Double),
        ];
        for (kind, format, expected) in cases {
            assert_eq!(
                resolve_one(&scalar(kind, format)),
                TypeRef::Primitive(expected),
                "{kind:?}+{format:?}"
            );
        }
    }

    #[test]
    fn test_map_is_package_qualified() {
        let schema = Schema {
            additional_properties: Some(Box::new(Schema::of_kind(SchemaKind::String))),
            ..Schema::of_kind(SchemaKind::Object)
        };
        let mut ctx = GenerationContext::new(GeneratorConfig {
            package_name: "PetStore".to_string(),
            ..GeneratorConfig::default()
        });
        assert_eq!(
            resolve(&schema, &mut ctx).unwrap(),
            TypeRef::Packaged("PetStore.JSONMapperMap".to_string())
        );
    }

    #[test]
    fn test_reference_uses_model_naming() {
        let schema = Schema {
            reference: Some("#/components/schemas/200_response".to_string()),
            ..Schema::default()
        };
        assert_eq!(
            resolve_one(&schema),
            TypeRef::Model("Model200Response".to_string())
        );
    }

    #[test]
    fn test_array_resolves_to_element() {
        let schema = Schema {
            items: Some(Box::new(scalar(SchemaKind::Number, Some("float")))),
            ..Schema::of_kind(SchemaKind::Array)
        };
        assert_eq!(resolve_one(&schema), TypeRef::Primitive(Primitive::Single));
    }

    #[test]
    fn test_anonymous_schemas_fall_back() {
        let free_form = Schema::of_kind(SchemaKind::Object);
        assert_eq!(
            resolve_one(&free_form),
            TypeRef::Model(FREE_FORM_OBJECT.to_string())
        );

        let inline_union = Schema {
            one_of: vec![Schema::of_kind(SchemaKind::String)],
            ..Schema::default()
        };
        assert_eq!(
            resolve_one(&inline_union),
            TypeRef::Model(FREE_FORM_OBJECT.to_string())
        );
    }

    #[test]
    fn test_posix_time_keeps_datetime() {
        let schema = scalar(SchemaKind::Integer, Some("unixtime"));
        assert!(is_posix_time(&schema));
        assert_eq!(resolve_one(&schema), TypeRef::Primitive(Primitive::Datetime));
        assert!(!is_posix_time(&scalar(SchemaKind::Integer, Some("int64"))));
    }

    #[test]
    fn test_type_ref_display_and_json() {
        assert_eq!(TypeRef::Primitive(Primitive::Int64).to_string(), "int64");
        assert_eq!(
            serde_json::to_value(TypeRef::Model("Pet".to_string())).unwrap(),
            serde_json::json!({ "kind": "model", "name": "Pet" })
        );
        assert_eq!(
            serde_json::to_value(TypeRef::Primitive(Primitive::Logical)).unwrap(),
            serde_json::json!({ "kind": "primitive", "name": "logical" })
        );
    }
}
