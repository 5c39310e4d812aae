//! Configuration loader for astgen.
//!
//! `defaults/astgen.default.toml` is embedded into every binary so that the documented
//! defaults and runtime behavior stay in sync. Callers layer project files on top of
//! those defaults via [`Loader`] before deserializing into [`AstgenConfig`], then turn
//! the declared groups into [`GroupDefinition`]s with
//! [`AstgenConfig::group_definitions`].

use astgen::astgen::{DispatchConvention, GroupDefinition, NodeNaming};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../defaults/astgen.default.toml");

/// Top-level configuration consumed by astgen applications.
#[derive(Debug, Clone, Deserialize)]
pub struct AstgenConfig {
    pub output: OutputConfig,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

/// Settings shared by every group of a run.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub target: String,
    pub namespace: String,
    pub naming: NodeNaming,
    pub dispatch: DispatchConvention,
}

/// One `[[groups]]` entry. Unset options fall back to [`OutputConfig`].
#[derive(Debug, Clone, Deserialize)]
pub struct GroupConfig {
    pub name: String,
    pub base_type: String,
    pub grammar: Option<String>,
    /// Relative to the directory of the configuration file
    pub grammar_file: Option<PathBuf>,
    pub dispatch: Option<DispatchConvention>,
    pub naming: Option<NodeNaming>,
    pub namespace: Option<String>,
    #[serde(default)]
    pub references: Vec<String>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("group '{group}' needs either 'grammar' or 'grammar_file'")]
    MissingGrammar { group: String },

    #[error("group '{group}' sets both 'grammar' and 'grammar_file'")]
    AmbiguousGrammar { group: String },

    #[error("group '{group}': cannot read grammar file {}: {source}", .path.display())]
    GrammarFile {
        group: String,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl AstgenConfig {
    /// Definitions of every configured group, in declaration order.
    ///
    /// Grammar files are read relative to `base_dir`.
    pub fn group_definitions(&self, base_dir: &Path) -> Result<Vec<GroupDefinition>, LoadError> {
        self.groups
            .iter()
            .map(|group| group.definition(&self.output, base_dir))
            .collect()
    }

    /// Output directory, resolved against `base_dir` when relative.
    pub fn output_directory(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.output.directory)
    }
}

impl GroupConfig {
    fn grammar_text(&self, base_dir: &Path) -> Result<String, LoadError> {
        match (&self.grammar, &self.grammar_file) {
            (Some(grammar), None) => Ok(grammar.clone()),
            (None, Some(file)) => {
                let path = base_dir.join(file);
                tracing::debug!(group = %self.name, path = %path.display(), "reading grammar file");
                fs::read_to_string(&path).map_err(|source| LoadError::GrammarFile {
                    group: self.name.clone(),
                    path,
                    source,
                })
            }
            (Some(_), Some(_)) => Err(LoadError::AmbiguousGrammar {
                group: self.name.clone(),
            }),
            (None, None) => Err(LoadError::MissingGrammar {
                group: self.name.clone(),
            }),
        }
    }

    pub fn definition(
        &self,
        output: &OutputConfig,
        base_dir: &Path,
    ) -> Result<GroupDefinition, LoadError> {
        let grammar = self.grammar_text(base_dir)?;
        Ok(GroupDefinition::new(&self.name, &self.base_type, grammar)
            .with_dispatch(self.dispatch.unwrap_or(output.dispatch))
            .with_naming(self.naming.unwrap_or(output.naming))
            .with_namespace(
                self.namespace
                    .clone()
                    .unwrap_or_else(|| output.namespace.clone()),
            )
            .with_references(self.references.iter().cloned()))
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<AstgenConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AstgenConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.output.target, "csharp");
        assert_eq!(config.output.naming, NodeNaming::Combined);
        assert_eq!(config.output.dispatch, DispatchConvention::ValueReturning);
        assert!(config.groups.is_empty());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.dispatch", "both")
            .expect("override to apply")
            .set_override("output.target", "rust")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.dispatch, DispatchConvention::Both);
        assert_eq!(config.output.target, "rust");
    }

    fn group(grammar: Option<&str>, grammar_file: Option<&str>) -> GroupConfig {
        GroupConfig {
            name: "Expressions".to_string(),
            base_type: "Expression".to_string(),
            grammar: grammar.map(str::to_string),
            grammar_file: grammar_file.map(PathBuf::from),
            dispatch: None,
            naming: Some(NodeNaming::Plain),
            namespace: None,
            references: vec!["Lox.Tokens".to_string()],
        }
    }

    #[test]
    fn group_settings_fall_back_to_output() {
        let output = load_defaults().unwrap().output;
        let definition = group(Some("Literal : Token Value"), None)
            .definition(&output, Path::new("."))
            .unwrap();
        assert_eq!(definition.dispatch, DispatchConvention::ValueReturning);
        assert_eq!(definition.naming, NodeNaming::Plain);
        assert_eq!(definition.references, vec!["Lox.Tokens"]);
    }

    #[test]
    fn grammar_source_must_be_unique() {
        let output = load_defaults().unwrap().output;
        assert!(matches!(
            group(None, None).definition(&output, Path::new(".")),
            Err(LoadError::MissingGrammar { .. })
        ));
        assert!(matches!(
            group(Some("A :"), Some("a.grammar")).definition(&output, Path::new(".")),
            Err(LoadError::AmbiguousGrammar { .. })
        ));
        assert!(matches!(
            group(None, Some("does-not-exist.grammar")).definition(&output, Path::new(".")),
            Err(LoadError::GrammarFile { .. })
        ));
    }
}
