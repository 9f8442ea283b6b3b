use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

use super::{Annotations, EnumValue, Extensions};
use crate::types::TypeRef;

/// Where a model came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelOrigin {
    /// Declared as a named schema in the source document.
    Source,
    /// Synthesized from an inline enum field.
    LiftedEnum {
        /// Class name of the model owning the field.
        owner: String,
        /// Field name as declared in the source.
        field: String,
    },
}

/// One allowed value of an enum model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllowableValue {
    /// Identifier used for the enum member.
    pub name: String,
    /// Literal value as declared in the source.
    pub value: EnumValue,
}

/// One member of a tagged union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnionMember {
    /// Member type; for array members, the element type.
    pub type_ref: TypeRef,
    /// Member is a scalar.
    pub is_primitive: bool,
    /// Member is an array.
    pub is_array: bool,
}

/// A model property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Sanitized identifier.
    pub name: String,
    /// Name as declared in the source.
    pub base_name: String,
    /// Resolved type. Array and map fields carry their element type here.
    pub type_ref: TypeRef,
    /// `type_ref` is a primitive.
    pub is_primitive: bool,
    /// Declared as an array.
    pub is_array: bool,
    /// Declared as a map.
    pub is_map: bool,
    /// Declares an inline enum, or refers to a lifted one.
    pub is_enum: bool,
    /// Listed in the owner's `required` properties.
    pub required: bool,
    /// Base name for an inline enum, e.g. `StatusEnum`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_name: Option<String>,
    /// Inline enum literals.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<EnumValue>,
    /// Rendered default assignment (` = 5`), or empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default_value: String,
    /// Element description for array and map fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Field>>,
    /// Vendor extensions declared on the property.
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    /// Hints attached by the core.
    pub annotations: Annotations,
}

impl Field {
    /// Field carrying only a name and type; everything else unset.
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        let name = name.into();
        Self {
            base_name: name.clone(),
            name,
            is_primitive: type_ref.is_primitive(),
            type_ref,
            is_array: false,
            is_map: false,
            is_enum: false,
            required: false,
            enum_name: None,
            enum_values: Vec::new(),
            default_value: String::new(),
            items: None,
            extensions: Extensions::default(),
            annotations: Annotations::default(),
        }
    }
}

/// A named, generation-ready type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
    /// Name as declared in the source (or the synthesized name).
    pub name: String,
    /// Sanitized class name; key of the model within a [`ModelSet`].
    pub class_name: String,
    /// Whole-model enum.
    pub is_enum: bool,
    /// Properties in declaration order.
    pub fields: Vec<Field>,
    /// Enum literals.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<EnumValue>,
    /// Named enum members, filled in by normalization.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowable_values: Vec<AllowableValue>,
    /// Union members.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<UnionMember>,
    /// Declared or lifted.
    pub origin: ModelOrigin,
    /// Vendor extensions declared on the schema.
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
}

impl Model {
    /// Empty source model.
    pub fn new(name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_name: class_name.into(),
            is_enum: false,
            fields: Vec::new(),
            enum_values: Vec::new(),
            allowable_values: Vec::new(),
            one_of: Vec::new(),
            origin: ModelOrigin::Source,
            extensions: Extensions::default(),
        }
    }

    /// Declares `oneOf` members.
    pub fn is_union(&self) -> bool {
        !self.one_of.is_empty()
    }
}

/// All models of one generation run, keyed by class name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ModelSet(BTreeMap<String, Model>);

impl ModelSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Model with the given class name.
    pub fn get(&self, class_name: &str) -> Option<&Model> {
        self.0.get(class_name)
    }

    /// A model with this class name exists.
    pub fn contains(&self, class_name: &str) -> bool {
        self.0.contains_key(class_name)
    }

    /// Insert a model under its class name, returning any model it replaced.
    pub fn insert(&mut self, model: Model) -> Option<Model> {
        self.0.insert(model.class_name.clone(), model)
    }

    /// Number of models.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// No models.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Models ordered by class name.
    pub fn iter(&self) -> btree_map::Values<'_, String, Model> {
        self.0.values()
    }

    /// Mutable models ordered by class name.
    pub fn iter_mut(&mut self) -> btree_map::ValuesMut<'_, String, Model> {
        self.0.values_mut()
    }

    /// Class names in order.
    pub fn class_names(&self) -> btree_map::Keys<'_, String, Model> {
        self.0.keys()
    }
}

impl FromIterator<Model> for ModelSet {
    fn from_iter<I: IntoIterator<Item = Model>>(iter: I) -> Self {
        let mut set = Self::new();
        for model in iter {
            set.insert(model);
        }
        set
    }
}

impl IntoIterator for ModelSet {
    type Item = Model;
    type IntoIter = btree_map::IntoValues<String, Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}

impl<'a> IntoIterator for &'a ModelSet {
    type Item = &'a Model;
    type IntoIter = btree_map::Values<'a, String, Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.values()
    }
}
