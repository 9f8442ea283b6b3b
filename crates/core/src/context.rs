//! Run-scoped generation state.

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::naming::{self, NameRole, TruncationRegistry};

/// State shared by every stage of one generation run.
///
/// Owns the run's [`TruncationRegistry`], so two runs never share truncation
/// history.
#[derive(Debug, Default)]
pub struct GenerationContext {
    config: GeneratorConfig,
    registry: TruncationRegistry,
}

impl GenerationContext {
    /// Fresh context with an empty registry.
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            registry: TruncationRegistry::new(),
        }
    }

    /// Generator config of this run.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Truncation history of this run.
    pub fn registry(&self) -> &TruncationRegistry {
        &self.registry
    }

    /// Sanitize a name for `role` against this run's registry.
    pub fn sanitize(&mut self, raw: &str, role: NameRole) -> Result<String> {
        naming::sanitize(raw, role, &mut self.registry)
    }

    /// Sanitize a name, yielding `None` when nothing legal is left of it.
    pub fn try_sanitize(&mut self, raw: &str, role: NameRole) -> Result<Option<String>> {
        naming::try_sanitize(raw, role, &mut self.registry)
    }

    /// Join and truncate `name` and `suffix` against this run's registry.
    pub fn truncate(&mut self, name: &str, suffix: &str) -> Result<String> {
        self.registry.truncate(name, suffix)
    }
}
