//! AST groups
//!
//! A [`GroupDefinition`] is what a caller declares: a name, a base type, the grammar
//! text and the emission settings. [`AstGroupSpec::from_definition`] resolves the
//! placeholder, parses every line and rejects duplicate nodes, producing the resolved
//! group that the emitter works from.

use crate::astgen::dispatch::DispatchConvention;
use crate::astgen::error::GenerationError;
use crate::astgen::grammar::{grammar_lines, parse_line, NodeSpec};
use crate::astgen::naming::{is_identifier, NodeNaming};
use crate::astgen::placeholder::{contains_placeholder, resolve};
use serde::Serialize;
use std::collections::HashMap;

/// A group as declared by the caller, before any processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDefinition {
    pub name: String,
    pub base_type: String,
    pub grammar: String,
    pub dispatch: DispatchConvention,
    pub references: Vec<String>,
    pub namespace: String,
    pub naming: NodeNaming,
}

impl GroupDefinition {
    pub fn new(
        name: impl Into<String>,
        base_type: impl Into<String>,
        grammar: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_type: base_type.into(),
            grammar: grammar.into(),
            dispatch: DispatchConvention::default(),
            references: Vec::new(),
            namespace: String::new(),
            naming: NodeNaming::default(),
        }
    }

    pub fn with_dispatch(mut self, dispatch: DispatchConvention) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn with_references<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references = references.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_naming(mut self, naming: NodeNaming) -> Self {
        self.naming = naming;
        self
    }
}

/// A group whose grammar has been resolved and parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AstGroupSpec {
    pub group_name: String,
    pub base_type_name: String,
    pub nodes: Vec<NodeSpec>,
    pub dispatch: DispatchConvention,
    pub external_references: Vec<String>,
    pub namespace: String,
    pub naming: NodeNaming,
}

impl AstGroupSpec {
    /// Resolve, split and parse the grammar of `definition`
    pub fn from_definition(definition: &GroupDefinition) -> Result<Self, GenerationError> {
        let group = definition.name.clone();
        let base_type = definition.base_type.trim();

        if base_type.is_empty() && contains_placeholder(&definition.grammar) {
            return Err(GenerationError::UnresolvedPlaceholder {
                group,
                base_type: base_type.to_string(),
            });
        }

        let resolved = resolve(&definition.grammar, base_type);
        if contains_placeholder(&resolved) {
            return Err(GenerationError::UnresolvedPlaceholder {
                group,
                base_type: base_type.to_string(),
            });
        }
        if !is_identifier(base_type) {
            return Err(GenerationError::InvalidBaseType {
                group,
                base_type: base_type.to_string(),
            });
        }

        let mut nodes = Vec::new();
        let mut declared_on: HashMap<String, usize> = HashMap::new();

        for (line_number, line) in grammar_lines(&resolved) {
            let node = parse_line(line).map_err(|err| GenerationError::MalformedLine {
                group: group.clone(),
                line_number,
                line: err.line,
                reason: err.reason,
            })?;

            if let Some(first_line) = declared_on.get(&node.name) {
                return Err(GenerationError::DuplicateNodeName {
                    group,
                    name: node.name,
                    first_line: *first_line,
                    line_number,
                });
            }

            tracing::trace!(
                group = %group,
                node = %node.name,
                fields = node.fields.len(),
                "parsed node"
            );
            declared_on.insert(node.name.clone(), line_number);
            nodes.push(node);
        }

        Ok(Self {
            group_name: group,
            base_type_name: base_type.to_string(),
            nodes,
            dispatch: definition.dispatch,
            external_references: dedup_references(&definition.references),
            namespace: definition.namespace.clone(),
            naming: definition.naming,
        })
    }

    /// Concrete type name of `node` under this group's naming rule
    pub fn type_name(&self, node: &NodeSpec) -> String {
        self.naming.type_name(&node.name, &self.base_type_name)
    }

    pub fn type_names(&self) -> Vec<String> {
        self.nodes.iter().map(|node| self.type_name(node)).collect()
    }
}

/// Trimmed, non-empty references in declaration order without repeats
fn dedup_references(references: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for reference in references {
        let reference = reference.trim();
        if !reference.is_empty() && !out.iter().any(|r| r == reference) {
            out.push(reference.to_string());
        }
    }
    out
}
