//! Literal rendering: parameter examples, field defaults and string escaping.

use serde_json::Value;
use tracing::warn;

use crate::model::{Parameter, Schema};
use crate::types::{Primitive, ScalarKey};

const EXAMPLE_STRING: &str = "Example string";
const EXAMPLE_INTEGER: &str = "56";
const EXAMPLE_FLOAT: &str = "3.4";
const EXAMPLE_DATETIME: &str = "2013-10-20T19:20:30+01:00";

/// Emitted when neither a declaration nor a canned literal is available.
pub const EXAMPLE_PLACEHOLDER: &str = "exampleNULL";

/// Example literal for a parameter.
///
/// A declared default wins over a declared example, which wins over the
/// canned literal for the resolved type. Array and map parameters get their
/// literal wrapped in the matching container template.
pub fn example(parameter: &Parameter) -> String {
    let declared = parameter
        .default_value
        .as_deref()
        .or(parameter.example.as_deref());

    let literal = match parameter.data_type.primitive() {
        Some(Primitive::Logical) => Some(declared.unwrap_or("true").to_string()),
        Some(Primitive::String) => Some(quote(declared.unwrap_or(EXAMPLE_STRING))),
        Some(Primitive::Int32 | Primitive::Int64) => {
            Some(declared.unwrap_or(EXAMPLE_INTEGER).to_string())
        }
        Some(Primitive::Single | Primitive::Double) => {
            Some(declared.unwrap_or(EXAMPLE_FLOAT).to_string())
        }
        Some(Primitive::Datetime) => Some(declared.unwrap_or(EXAMPLE_DATETIME).to_string()),
        None => {
            warn!(
                parameter = %parameter.name,
                data_type = %parameter.data_type,
                "No example literal for type."
            );
            declared.map(str::to_string)
        }
    };

    match literal {
        None => EXAMPLE_PLACEHOLDER.to_string(),
        Some(literal) if parameter.is_array => format!("ListContainerExample[{literal}]"),
        Some(literal) if parameter.is_map => format!("MapContainerExample{{'key': {literal}}}"),
        Some(literal) => literal,
    }
}

/// Property default assignment, e.g. ` = 'sold'`, or an empty string.
///
/// Date and date-time defaults are not rendered.
pub fn default_value_suffix(schema: &Schema) -> String {
    if matches!(
        ScalarKey::classify(schema),
        Some(ScalarKey::Date | ScalarKey::DateTime)
    ) {
        return String::new();
    }

    match &schema.default {
        Some(Value::String(text)) => format!(" = {}", quote(text)),
        Some(Value::Bool(flag)) => format!(" = {flag}"),
        Some(Value::Number(number)) => format!(" = {number}"),
        _ => String::new(),
    }
}

/// Make text safe inside a single-quoted string literal.
///
/// Double quotes are removed, single quotes doubled and control whitespace
/// flattened to spaces.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => {}
            '\'' => escaped.push_str("''"),
            '\n' | '\r' | '\t' => escaped.push(' '),
            c => escaped.push(c),
        }
    }
    escaped
}

fn quote(text: &str) -> String {
    format!("'{}'", escape_text(text))
}

/// Text of a declared literal: strings as is, anything else as JSON.
pub(crate) fn literal_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::SchemaKind;
    use crate::types::TypeRef;

    fn param(primitive: Primitive) -> Parameter {
        Parameter::new("value", TypeRef::Primitive(primitive))
    }

    #[test]
    fn test_canned_literals() {
        assert_eq!(example(&param(Primitive::Logical)), "true");
        assert_eq!(example(&param(Primitive::Int32)), "56");
        assert_eq!(example(&param(Primitive::Int64)), "56");
        assert_eq!(example(&param(Primitive::Single)), "3.4");
        assert_eq!(example(&param(Primitive::Double)), "3.4");
        assert_eq!(
            example(&param(Primitive::Datetime)),
            "2013-10-20T19:20:30+01:00"
        );
        assert_eq!(example(&param(Primitive::String)), "'Example string'");
    }

    #[test]
    fn test_array_of_double_with_example() {
        let mut p = param(Primitive::Double);
        p.is_array = true;
        p.example = Some("3.4".to_string());
        assert_eq!(example(&p), "ListContainerExample[3.4]");
    }

    #[test]
    fn test_default_wins_over_example() {
        let mut p = param(Primitive::Int32);
        p.default_value = Some("7".to_string());
        p.example = Some("9".to_string());
        assert_eq!(example(&p), "7");
    }

    #[test]
    fn test_declared_strings_are_escaped() {
        let mut p = param(Primitive::String);
        p.example = Some("it's \"quoted\"\nagain".to_string());
        assert_eq!(example(&p), "'it''s quoted again'");
    }

    #[test]
    fn test_map_wrapping() {
        let mut p = param(Primitive::String);
        p.is_map = true;
        assert_eq!(example(&p), "MapContainerExample{'key': 'Example string'}");
    }

    #[test]
    fn test_unhandled_type_falls_back() {
        let mut p = Parameter::new("body", TypeRef::Model("Pet".to_string()));
        p.is_array = true;
        assert_eq!(example(&p), EXAMPLE_PLACEHOLDER);

        p.example = Some("pet".to_string());
        assert_eq!(example(&p), "ListContainerExample[pet]");
    }

    #[test]
    fn test_default_value_suffix() {
        let schema: Schema =
            serde_json::from_str(r#"{ "type": "string", "default": "o'clock" }"#).unwrap();
        assert_eq!(default_value_suffix(&schema), " = 'o''clock'");

        let schema: Schema =
            serde_json::from_str(r#"{ "type": "integer", "default": 5 }"#).unwrap();
        assert_eq!(default_value_suffix(&schema), " = 5");

        let schema: Schema =
            serde_json::from_str(r#"{ "type": "boolean", "default": false }"#).unwrap();
        assert_eq!(default_value_suffix(&schema), " = false");

        let schema: Schema = serde_json::from_str(
            r#"{ "type": "string", "format": "date-time", "default": "2020-01-01T00:00:00Z" }"#,
        )
        .unwrap();
        assert_eq!(default_value_suffix(&schema), "");

        assert_eq!(default_value_suffix(&Schema::of_kind(SchemaKind::Number)), "");
    }

    #[test]
    fn test_literal_text() {
        assert_eq!(literal_text(&Value::String("abc".to_string())), "abc");
        assert_eq!(literal_text(&serde_json::json!(3.4)), "3.4");
        assert_eq!(literal_text(&serde_json::json!(true)), "true");
    }
}
