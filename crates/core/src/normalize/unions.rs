use std::collections::HashMap;

use tracing::debug;

use crate::model::{Field, ModelSet};

/// Flag fields referring to a union with a primitive or array member.
///
/// Fields are matched through their `one_of_name` annotation; for arrays the
/// items carry it. Advisory only, union models themselves are not touched.
/// Running it again on its own output changes nothing.
pub fn annotate_unions(models: &mut ModelSet) {
    let unions: HashMap<String, bool> = models
        .iter()
        .filter(|model| model.is_union())
        .map(|model| {
            let mixed = model
                .one_of
                .iter()
                .any(|member| member.is_primitive || member.is_array);
            (model.class_name.clone(), mixed)
        })
        .collect();

    for model in models.iter_mut() {
        for field in &mut model.fields {
            if let Some(target) = union_target(field) {
                mark(target, &unions);
            }
        }
    }
}

/// The field, or one array level down.
fn union_target(field: &mut Field) -> Option<&mut Field> {
    if field.is_array {
        field.items.as_deref_mut()
    } else {
        Some(field)
    }
}

fn mark(field: &mut Field, unions: &HashMap<String, bool>) {
    let Some(union) = field.annotations.one_of_name.as_deref() else {
        return;
    };
    match unions.get(union) {
        Some(true) => field.annotations.one_of_primitives = true,
        Some(false) => {}
        None => debug!(field = %field.name, union, "Field refers to an unknown union model."),
    }
}
