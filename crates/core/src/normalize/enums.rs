//! Inline enum lifting and allowed-value derivation.

use std::collections::BTreeMap;

use tracing::warn;

use crate::context::GenerationContext;
use crate::error::Result;
use crate::model::{AllowableValue, EnumValue, Extensions, Field, Model, ModelOrigin};
use crate::naming::{NameRole, capitalize_first};
use crate::types::TypeRef;

/// Member name used when a display name sanitizes to nothing.
pub const EMPTY_MEMBER_NAME: &str = "EMPTY_STRING";

/// Derive allowed values for a whole-model enum in place.
pub(super) fn apply_allowable_values(model: &mut Model, ctx: &mut GenerationContext) -> Result<()> {
    model.allowable_values = allowable_values(&model.enum_values, &model.extensions, ctx)?;
    Ok(())
}

/// Lift the inline enum of `field` into a standalone model.
///
/// Rewrites the field (and its items, for arrays of enums) to reference the
/// synthesized model and returns it. `claimed` holds the enums lifted so far
/// in this pass; a name already claimed by another field gets `_1`, `_2`, ...
/// appended. Fields without an inline enum are left untouched.
pub(super) fn lift_field(
    owner: &str,
    field: &mut Field,
    claimed: &BTreeMap<String, Model>,
    ctx: &mut GenerationContext,
) -> Result<Option<Model>> {
    let Some(source) = inline_enum(field) else {
        return Ok(None);
    };

    let enum_name = source
        .enum_name
        .clone()
        .unwrap_or_else(|| format!("{}Enum", capitalize_first(&source.name)));
    let enum_values = source.enum_values.clone();
    let extensions = source.extensions.clone();

    let origin = ModelOrigin::LiftedEnum {
        owner: owner.to_string(),
        field: field.base_name.clone(),
    };

    let mut class_name = ctx.truncate(owner, &enum_name)?;
    let mut attempt = 0_u32;
    while claimed
        .get(&class_name)
        .is_some_and(|other| other.origin != origin)
    {
        attempt += 1;
        class_name = ctx.truncate(owner, &format!("{enum_name}_{attempt}"))?;
    }
    if attempt > 0 {
        warn!(
            owner,
            field = %field.base_name,
            class_name = %class_name,
            "Lifted enum name already taken by another field, renaming."
        );
    }

    let mut lifted = Model::new(class_name.clone(), class_name.clone());
    lifted.is_enum = true;
    lifted.allowable_values = allowable_values(&enum_values, &extensions, ctx)?;
    lifted.enum_values = enum_values;
    lifted.extensions = extensions;
    lifted.origin = origin;

    let type_ref = TypeRef::Model(class_name);
    if let Some(items) = field.items.as_deref_mut().filter(|items| items.is_enum) {
        items.type_ref = type_ref.clone();
        items.is_primitive = false;
    }
    field.type_ref = type_ref;
    field.is_primitive = false;
    field.is_enum = true;

    Ok(Some(lifted))
}

/// The field itself, or the items of an array field, when declared as an inline enum.
fn inline_enum(field: &Field) -> Option<&Field> {
    if field.is_enum {
        return Some(field);
    }
    field
        .items
        .as_deref()
        .filter(|items| field.is_array && items.is_enum)
}

/// Zip literal values with display names.
///
/// Display names come from the first configured extension key present on
/// the enum; without one, each literal names itself. Every name runs through
/// the field naming policy.
fn allowable_values(
    values: &[EnumValue],
    extensions: &Extensions,
    ctx: &mut GenerationContext,
) -> Result<Vec<AllowableValue>> {
    let display_names = ctx
        .config()
        .enum_name_extensions
        .iter()
        .find_map(|key| extensions.string_list(key));

    if let Some(names) = &display_names
        && names.len() < values.len()
    {
        warn!(
            names = names.len(),
            values = values.len(),
            "Fewer enum display names than values, naming the rest by value."
        );
    }

    let mut allowable = Vec::with_capacity(values.len());
    for (i, value) in values.iter().enumerate() {
        let raw = display_names
            .as_ref()
            .and_then(|names| names.get(i).cloned())
            .unwrap_or_else(|| value.to_string());
        let name = ctx
            .try_sanitize(&raw, NameRole::Field)?
            .unwrap_or_else(|| EMPTY_MEMBER_NAME.to_string());
        allowable.push(AllowableValue {
            name,
            value: value.clone(),
        });
    }
    Ok(allowable)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::types::Primitive;

    fn string_values(values: &[&str]) -> Vec<EnumValue> {
        values
            .iter()
            .map(|v| EnumValue::String((*v).to_string()))
            .collect()
    }

    fn inline_enum_field(name: &str, values: &[&str]) -> Field {
        let mut field = Field::new(name, TypeRef::Primitive(Primitive::String));
        field.is_enum = true;
        field.enum_name = Some(format!("{}Enum", capitalize_first(name)));
        field.enum_values = string_values(values);
        field
    }

    fn names(values: &[AllowableValue]) -> Vec<&str> {
        values.iter().map(|v| v.name.as_str()).collect()
    }

    #[test]
    fn test_lift_without_display_names() {
        let mut ctx = GenerationContext::default();
        let mut field = inline_enum_field("status", &["A", "B"]);

        let lifted = lift_field("Pet", &mut field, &BTreeMap::new(), &mut ctx).unwrap().unwrap();
        assert_eq!(lifted.class_name, "PetStatusEnum");
        assert!(lifted.is_enum);
        assert_eq!(names(&lifted.allowable_values), vec!["A", "B"]);
        assert_eq!(
            lifted.origin,
            ModelOrigin::LiftedEnum {
                owner: "Pet".to_string(),
                field: "status".to_string(),
            }
        );

        assert_eq!(field.type_ref, TypeRef::Model("PetStatusEnum".to_string()));
        assert!(!field.is_primitive);
    }

    #[test]
    fn test_display_names_from_first_present_extension() {
        let mut ctx = GenerationContext::new(GeneratorConfig {
            enum_name_extensions: vec!["x-missing".to_string(), "x-enumNames".to_string()],
            ..GeneratorConfig::default()
        });
        let mut field = inline_enum_field("level", &["1", "2", "3"]);
        field.extensions.insert(
            "x-enumNames",
            serde_json::json!(["Low", "end", "$$"]),
        );

        let lifted = lift_field("Alarm", &mut field, &BTreeMap::new(), &mut ctx).unwrap().unwrap();
        assert_eq!(
            names(&lifted.allowable_values),
            vec!["Low", "xend", EMPTY_MEMBER_NAME]
        );
        assert_eq!(
            lifted.allowable_values[0].value,
            EnumValue::String("1".to_string())
        );
    }

    #[test]
    fn test_short_display_list_falls_back_to_values() {
        let mut ctx = GenerationContext::default();
        let mut model = Model::new("Size", "Size");
        model.is_enum = true;
        model.enum_values = string_values(&["small", "large"]);
        model
            .extensions
            .insert("x-enumNames", serde_json::json!(["Small"]));

        apply_allowable_values(&mut model, &mut ctx).unwrap();
        assert_eq!(names(&model.allowable_values), vec!["Small", "large"]);
    }

    #[test]
    fn test_numeric_values_name_themselves() {
        let mut ctx = GenerationContext::default();
        let mut model = Model::new("Code", "Code");
        model.enum_values = vec![EnumValue::Integer(200), EnumValue::Integer(-1)];

        apply_allowable_values(&mut model, &mut ctx).unwrap();
        assert_eq!(names(&model.allowable_values), vec!["x200", "x_1"]);
    }

    #[test]
    fn test_long_owner_name_is_truncated_with_suffix() {
        let mut ctx = GenerationContext::default();
        let owner = "VeryLongOwnerModelName".repeat(3);
        let mut field = inline_enum_field("kind", &["a"]);

        let lifted = lift_field(&owner, &mut field, &BTreeMap::new(), &mut ctx).unwrap().unwrap();
        assert_eq!(lifted.class_name.len(), 63);
        assert!(lifted.class_name.ends_with("KindEnum_0000"));
        assert_eq!(ctx.registry().get(&owner, "KindEnum"), Some(lifted.class_name.as_str()));
    }

    #[test]
    fn test_array_of_inline_enum() {
        let mut ctx = GenerationContext::default();
        let mut field = Field::new("colors", TypeRef::Primitive(Primitive::String));
        field.is_array = true;
        field.items = Some(Box::new(inline_enum_field("colors", &["red", "blue"])));

        let lifted = lift_field("Palette", &mut field, &BTreeMap::new(), &mut ctx).unwrap().unwrap();
        assert_eq!(lifted.class_name, "PaletteColorsEnum");
        assert_eq!(field.type_ref, TypeRef::Model("PaletteColorsEnum".to_string()));
        assert_eq!(field.items.as_ref().unwrap().type_ref, field.type_ref);
    }

    #[test]
    fn test_claimed_name_gets_counter() {
        let mut ctx = GenerationContext::default();
        let mut claimed = BTreeMap::new();

        let mut lower = inline_enum_field("status", &["A", "B"]);
        let first = lift_field("Pet", &mut lower, &claimed, &mut ctx).unwrap().unwrap();
        claimed.insert(first.class_name.clone(), first);

        let mut upper = inline_enum_field("Status", &["X", "Y", "Z"]);
        let second = lift_field("Pet", &mut upper, &claimed, &mut ctx).unwrap().unwrap();
        assert_eq!(second.class_name, "PetStatusEnum_1");
        assert_eq!(names(&second.allowable_values), vec!["X", "Y", "Z"]);
        assert_eq!(upper.type_ref, TypeRef::Model("PetStatusEnum_1".to_string()));
        assert_eq!(lower.type_ref, TypeRef::Model("PetStatusEnum".to_string()));
    }

    #[test]
    fn test_same_field_keeps_its_name() {
        let mut ctx = GenerationContext::default();
        let mut claimed = BTreeMap::new();

        let mut field = inline_enum_field("status", &["A", "B"]);
        let first = lift_field("Pet", &mut field, &claimed, &mut ctx).unwrap().unwrap();
        claimed.insert(first.class_name.clone(), first);

        let again = lift_field("Pet", &mut field, &claimed, &mut ctx).unwrap().unwrap();
        assert_eq!(again.class_name, "PetStatusEnum");
    }

    #[test]
    fn test_plain_fields_are_untouched() {
        let mut ctx = GenerationContext::default();
        let mut field = Field::new("name", TypeRef::Primitive(Primitive::String));
        let before = field.clone();
        assert!(lift_field("Pet", &mut field, &BTreeMap::new(), &mut ctx).unwrap().is_none());
        assert_eq!(field, before);
    }
}
