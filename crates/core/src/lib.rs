//! matgen core - model and identifier transformation for MATLAB code generation
//!
//! This crate rewrites a parsed API document into a model graph that is legal
//! for MATLAB: every identifier sanitized for its role and bounded to 63
//! characters, inline enums lifted into standalone models, and union fields
//! annotated for the renderer. It performs no I/O.

pub mod build;
pub mod config;
pub mod context;
pub mod error;
pub mod example_value;
pub mod model;
pub mod naming;
pub mod normalize;
pub mod operations;
pub mod pipeline;
pub mod types;

// Re-export commonly used types
pub use config::{Flavor, GeneratorConfig};
pub use context::GenerationContext;
pub use error::{Error, Result};
pub use model::{Model, ModelSet, Operation, SourceDocument};
pub use naming::{NameRole, TruncationRegistry, sanitize};
pub use pipeline::{GeneratedApi, PackageInfo, generate, generate_from_json};
pub use types::{Primitive, TypeRef};
