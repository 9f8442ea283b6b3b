//! Phase one: build the initial model set and operations from a source document.
//!
//! Every name is sanitized for its role and every schema is resolved through
//! the TypeMapper. Inline enums are only flagged here; lifting them into
//! standalone models is left to [`crate::normalize`].

use std::collections::HashSet;

use tracing::warn;

use crate::context::GenerationContext;
use crate::error::Result;
use crate::example_value::{default_value_suffix, literal_text};
use crate::model::{
    Annotations, Field, Model, ModelSet, Operation, OperationSpec, Parameter, ParameterSpec, Schema,
    SourceDocument, UnionMember,
};
use crate::naming::{NameRole, capitalize_first};
use crate::types::{self, is_posix_time};

/// Build one model per named schema, keyed by sanitized class name.
pub fn build_models(doc: &SourceDocument, ctx: &mut GenerationContext) -> Result<ModelSet> {
    // Raw names of union schemas, so fields can be flagged as referring to one.
    let unions: HashSet<&str> = doc
        .schemas
        .iter()
        .filter(|(_, schema)| schema.is_union())
        .map(|(name, _)| name.as_str())
        .collect();

    let mut models = ModelSet::new();
    for (name, schema) in &doc.schemas {
        let model = build_model(name, schema, &unions, ctx)?;
        if let Some(previous) = models.insert(model) {
            warn!(
                name = %previous.name,
                class_name = %previous.class_name,
                "Two schemas share a class name, keeping the later one."
            );
        }
    }
    Ok(models)
}

fn build_model(
    name: &str,
    schema: &Schema,
    unions: &HashSet<&str>,
    ctx: &mut GenerationContext,
) -> Result<Model> {
    let class_name = ctx.sanitize(name, NameRole::Model)?;
    let mut model = Model::new(name, class_name);
    model.extensions = schema.extensions.clone();

    if schema.is_enum() {
        model.is_enum = true;
        model.enum_values = schema.enum_values.clone();
        return Ok(model);
    }

    for member in &schema.one_of {
        model.one_of.push(UnionMember {
            type_ref: types::resolve(member, ctx)?,
            is_primitive: member.is_primitive(),
            is_array: member.is_array(),
        });
    }

    for (prop_name, prop) in &schema.properties {
        let required = schema.required.iter().any(|r| r == prop_name);
        model
            .fields
            .push(build_field(prop_name, prop, required, unions, ctx)?);
    }

    Ok(model)
}

fn build_field(
    name: &str,
    schema: &Schema,
    required: bool,
    unions: &HashSet<&str>,
    ctx: &mut GenerationContext,
) -> Result<Field> {
    let field_name = ctx.sanitize(name, NameRole::Field)?;
    let type_ref = types::resolve(schema, ctx)?;

    let mut field = Field::new(field_name, type_ref);
    field.base_name = name.to_string();
    field.required = required;
    field.is_array = schema.is_array();
    field.is_map = schema.is_map();
    field.default_value = default_value_suffix(schema);
    field.extensions = schema.extensions.clone();
    field.annotations.posix_time = is_posix_time(schema);

    if schema.is_enum() && schema.reference.is_none() {
        field.is_enum = true;
        field.enum_values = schema.enum_values.clone();
        field.enum_name = Some(format!("{}Enum", capitalize_first(&field.name)));
    }

    if schema
        .reference_name()
        .is_some_and(|target| unions.contains(target))
    {
        field.annotations.one_of_name = field.type_ref.model_name().map(str::to_string);
    }

    if let Some(element) = element_schema(schema) {
        field.items = Some(Box::new(build_field(name, element, false, unions, ctx)?));
    }

    Ok(field)
}

/// Element schema of an array, or value schema of a map.
fn element_schema(schema: &Schema) -> Option<&Schema> {
    if schema.is_array() {
        schema.items.as_deref()
    } else if schema.is_map() {
        schema.additional_properties.as_deref()
    } else {
        None
    }
}

/// Build operations in document order.
///
/// An operation whose identifier is already taken by an earlier one gets the
/// first free `_1`, `_2`, ... suffix.
pub fn build_operations(
    doc: &SourceDocument,
    ctx: &mut GenerationContext,
) -> Result<Vec<Operation>> {
    let mut operations = Vec::with_capacity(doc.operations.len());
    let mut operation_names = HashSet::new();

    for spec in &doc.operations {
        let mut operation = build_operation(spec, ctx)?;

        // Check for operationId collision
        if operation_names.contains(&operation.operation_id) {
            let renamed = free_operation_name(&operation.operation_id, &operation_names, ctx)?;
            warn!(
                base_id = %operation.base_id,
                operation_id = %operation.operation_id,
                renamed = %renamed,
                "Duplicate operation identifier, renaming."
            );
            operation.operation_id = renamed;
        }
        operation_names.insert(operation.operation_id.clone());
        operations.push(operation);
    }

    Ok(operations)
}

fn free_operation_name(
    taken_name: &str,
    taken: &HashSet<String>,
    ctx: &mut GenerationContext,
) -> Result<String> {
    let mut counter = 1_u32;
    loop {
        let candidate = ctx.truncate(taken_name, &format!("_{counter}"))?;
        if !taken.contains(&candidate) {
            return Ok(candidate);
        }
        counter += 1;
    }
}

fn build_operation(spec: &OperationSpec, ctx: &mut GenerationContext) -> Result<Operation> {
    let operation_id = ctx.sanitize(&spec.operation_id, NameRole::Operation)?;
    let tag = spec
        .tags
        .first()
        .map(|tag| ctx.sanitize(tag, NameRole::Tag))
        .transpose()?;

    let parameters = spec
        .parameters
        .iter()
        .map(|param| build_parameter(param, ctx))
        .collect::<Result<Vec<_>>>()?;

    let (return_type, returns_array) = match &spec.response {
        Some(schema) => (Some(types::resolve(schema, ctx)?), schema.is_array()),
        None => (None, false),
    };

    Ok(Operation {
        operation_id,
        base_id: spec.operation_id.clone(),
        method: spec.method,
        path: spec.path.clone(),
        tag,
        parameters,
        return_type,
        returns_array,
        auth_methods: spec.auth_methods.clone(),
        extensions: spec.extensions.clone(),
        annotations: Annotations::default(),
    })
}

fn build_parameter(spec: &ParameterSpec, ctx: &mut GenerationContext) -> Result<Parameter> {
    let schema = &spec.schema;
    let element = element_schema(schema);
    let name = ctx.sanitize(&spec.name, NameRole::Parameter)?;
    let data_type = types::resolve(element.unwrap_or(schema), ctx)?;

    let mut param = Parameter::new(name, data_type);
    param.base_name = spec.name.clone();
    param.is_array = schema.is_array();
    param.is_map = schema.is_map();
    param.required = spec.required;
    param.default_value = declared_literal(schema, element, |s| s.default.as_ref());
    param.example = declared_literal(schema, element, |s| s.example.as_ref());
    param.extensions = spec.extensions.clone();
    param.annotations.posix_time = is_posix_time(element.unwrap_or(schema));

    Ok(param)
}

/// Literal declared on the schema itself, else on its element schema.
fn declared_literal(
    schema: &Schema,
    element: Option<&Schema>,
    pick: impl Fn(&Schema) -> Option<&serde_json::Value>,
) -> Option<String> {
    pick(schema)
        .or_else(|| element.and_then(&pick))
        .map(literal_text)
}
