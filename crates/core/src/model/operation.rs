use serde::{Deserialize, Serialize};

use super::{Annotations, Extensions};
use crate::types::TypeRef;

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `PUT`
    Put,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
    /// `OPTIONS`
    Options,
    /// `HEAD`
    Head,
    /// `PATCH`
    Patch,
    /// `TRACE`
    Trace,
}

impl HttpMethod {
    /// Method name used by the generated server framework. `delete` is taken, so it becomes `del`.
    pub fn server_verb(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "del",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

/// Resolved operation input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Sanitized identifier
    pub name: String,
    /// Original name from the source (for request building)
    pub base_name: String,
    /// Resolved type; element type for array and map parameters
    pub data_type: TypeRef,
    /// Declared as an array.
    pub is_array: bool,
    /// Declared as a map.
    pub is_map: bool,
    /// Must be supplied by the caller.
    pub required: bool,
    /// Default as declared in the source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Example as declared in the source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Synthesized example literal for documentation
    #[serde(skip_serializing_if = "String::is_empty")]
    pub example_value: String,
    /// Vendor extensions declared on the parameter.
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    /// Hints attached by the core.
    pub annotations: Annotations,
}

impl Parameter {
    /// Scalar parameter carrying only a name and type.
    pub fn new(name: impl Into<String>, data_type: TypeRef) -> Self {
        let name = name.into();
        Self {
            base_name: name.clone(),
            name,
            data_type,
            is_array: false,
            is_map: false,
            required: false,
            default_value: None,
            example: None,
            example_value: String::new(),
            extensions: Extensions::default(),
            annotations: Annotations::default(),
        }
    }
}

/// Resolved API operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    /// Sanitized method identifier (e.g. "getPetById"), unique within a run
    pub operation_id: String,
    /// operationId as declared in the source
    pub base_id: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Path template, e.g. `/pets/{petId}`
    pub path: String,
    /// Sanitized API class the operation belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Parameters in declaration order
    pub parameters: Vec<Parameter>,
    /// Success response type; element type when the response is an array
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,
    /// Success response is an array.
    pub returns_array: bool,
    /// Names of the auth methods securing the operation.
    pub auth_methods: Vec<String>,
    /// Vendor extensions declared on the operation.
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    /// Hints attached by the core.
    pub annotations: Annotations,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_http_method_parses() {
        let methods: Vec<HttpMethod> = serde_json::from_str(
            r#"["get", "put", "post", "delete", "options", "head", "patch", "trace"]"#,
        )
        .unwrap();
        let verbs: Vec<&str> = methods.into_iter().map(HttpMethod::server_verb).collect();
        assert_eq!(
            verbs,
            vec!["get", "put", "post", "del", "options", "head", "patch", "trace"]
        );
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        assert!(serde_json::from_str::<HttpMethod>(r#""connect""#).is_err());
    }
}
