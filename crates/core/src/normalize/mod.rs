//! Phase two: rewrite the model graph for code emission.
//!
//! - `enums`: lifts inline enums into standalone models and derives allowed
//!   values for whole-model enums
//! - `unions`: flags fields whose union has primitive or array members
//!
//! Runs once, after every model exists in its initial form, because lifted
//! enum names are derived from the owning model's class name.

mod enums;
mod unions;

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::context::GenerationContext;
use crate::error::Result;
use crate::model::{Model, ModelOrigin, ModelSet};

pub use enums::EMPTY_MEMBER_NAME;
pub use unions::annotate_unions;

/// Normalize a built model set into a new one with lifted enums merged in.
pub fn normalize_models(models: &ModelSet, ctx: &mut GenerationContext) -> Result<ModelSet> {
    let mut output = models.clone();
    let mut lifted: BTreeMap<String, Model> = BTreeMap::new();

    for model in output.iter_mut() {
        if model.is_enum {
            enums::apply_allowable_values(model, ctx)?;
            continue;
        }

        let owner = model.class_name.clone();
        for field in &mut model.fields {
            if let Some(enum_model) = enums::lift_field(&owner, field, &lifted, ctx)? {
                lifted.insert(enum_model.class_name.clone(), enum_model);
            }
        }
    }

    let lifted_count = lifted.len();
    for enum_model in lifted.into_values() {
        if let Some(existing) = output.get(&enum_model.class_name)
            && existing.origin == ModelOrigin::Source
        {
            warn!(
                class_name = %enum_model.class_name,
                "Lifted enum replaces a declared model of the same name."
            );
        }
        output.insert(enum_model);
    }

    annotate_unions(&mut output);

    debug!(
        models = output.len(),
        lifted = lifted_count,
        "Normalized model set."
    );
    Ok(output)
}
