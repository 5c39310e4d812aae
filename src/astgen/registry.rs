//! Target registry for target discovery and selection
//!
//! Targets are registered under their name and looked up by the CLI and the
//! configuration layer.

use crate::astgen::compiler::{compile, GroupOutput};
use crate::astgen::error::GenerationError;
use crate::astgen::group::GroupDefinition;
use crate::astgen::target::Target;
use std::collections::HashMap;

/// Registry of output targets
///
/// # Examples
///
/// ```ignore
/// let mut registry = TargetRegistry::new();
/// registry.register(MyTarget);
///
/// let output = registry.compile(&definition, "my-target")?;
/// ```
pub struct TargetRegistry {
    targets: HashMap<String, Box<dyn Target>>,
}

impl TargetRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        TargetRegistry {
            targets: HashMap::new(),
        }
    }

    /// Register a target
    ///
    /// If a target with the same name already exists, it will be replaced.
    pub fn register<T: Target + 'static>(&mut self, target: T) {
        self.targets
            .insert(target.name().to_string(), Box::new(target));
    }

    /// Get a target by name
    pub fn get(&self, name: &str) -> Result<&dyn Target, GenerationError> {
        self.targets
            .get(name)
            .map(|t| t.as_ref())
            .ok_or_else(|| GenerationError::UnknownTarget(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    /// List all available target names (sorted)
    pub fn list_targets(&self) -> Vec<String> {
        let mut names: Vec<_> = self.targets.keys().cloned().collect();
        names.sort();
        names
    }

    /// Compile `definition` with the named target
    pub fn compile(
        &self,
        definition: &GroupDefinition,
        target: &str,
    ) -> Result<GroupOutput, GenerationError> {
        compile(definition, self.get(target)?)
    }

    /// Create a registry with the built-in targets
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::astgen::targets::CSharpTarget);
        registry.register(crate::astgen::targets::RustTarget);

        registry
    }
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
