//! Transformation pipeline for a parsed source document.
//!
//! 1. Build: SourceDocument -> ModelSet + operations (names sanitized, types resolved)
//! 2. Normalize: ModelSet -> ModelSet (inline enums lifted, unions annotated)
//! 3. Annotate: operations -> operations (error identifiers, auth, examples)

use serde::Serialize;
use tracing::info;

use crate::build::{build_models, build_operations};
use crate::config::GeneratorConfig;
use crate::context::GenerationContext;
use crate::error::Result;
use crate::model::{ModelSet, Operation, SourceDocument};
use crate::normalize::normalize_models;
use crate::operations::annotate_operations;

/// Generation-ready model graph handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedApi {
    /// Package-level values shared by every template.
    pub package: PackageInfo,
    /// Normalized models keyed by class name.
    pub models: ModelSet,
    /// Annotated operations in document order.
    pub operations: Vec<Operation>,
}

/// Package naming derived from the generator config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    /// Full dotted package name, e.g. `Org.PetStore`.
    pub name: String,
    /// First segment of the package name, the folder prefixed with `+`.
    pub top_level: String,
    /// Version stamped into the generated package.
    pub version: String,
    /// Package-qualified model package.
    pub model_package: String,
    /// Package-qualified API package.
    pub api_package: String,
    /// Root of error and warning identifiers, e.g. `Org:PetStore`.
    pub error_identifier: String,
}

impl PackageInfo {
    /// Derive package naming from `config`.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            name: config.package_name.clone(),
            top_level: config.top_level_package().to_string(),
            version: config.package_version.clone(),
            model_package: config.model_package(),
            api_package: config.api_package(),
            error_identifier: config.error_identifier_root(),
        }
    }
}

/// Run every stage over `doc` with a fresh truncation registry.
pub fn generate(doc: &SourceDocument, config: GeneratorConfig) -> Result<GeneratedApi> {
    let mut ctx = GenerationContext::new(config);

    let built = build_models(doc, &mut ctx)?;
    let models = normalize_models(&built, &mut ctx)?;

    let mut operations = build_operations(doc, &mut ctx)?;
    annotate_operations(&mut operations, ctx.config());

    info!(
        models = models.len(),
        lifted = models.len().saturating_sub(built.len()),
        operations = operations.len(),
        truncated = ctx.registry().len(),
        "Normalized source document."
    );

    Ok(GeneratedApi {
        package: PackageInfo::from_config(ctx.config()),
        models,
        operations,
    })
}

/// Parse a JSON source document and run [`generate`] on it.
pub fn generate_from_json(json: &str, config: GeneratorConfig) -> Result<GeneratedApi> {
    let doc = SourceDocument::from_json(json)?;
    generate(&doc, config)
}
