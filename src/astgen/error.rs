//! Generation errors
//!
//! Every error here is raised while generating, never at the runtime of the generated
//! code. They point at a grammar or configuration mistake and carry enough context
//! (group, line number, offending text) to fix it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("group '{group}', line {line_number}: malformed grammar line '{line}': {reason}")]
    MalformedLine {
        group: String,
        line_number: usize,
        line: String,
        reason: String,
    },

    #[error(
        "group '{group}', line {line_number}: node '{name}' is already declared on line {first_line}"
    )]
    DuplicateNodeName {
        group: String,
        name: String,
        first_line: usize,
        line_number: usize,
    },

    #[error("group '{group}': placeholder '$base$' left unresolved with base type '{base_type}'")]
    UnresolvedPlaceholder { group: String, base_type: String },

    #[error("group '{group}': base type '{base_type}' is not an identifier")]
    InvalidBaseType { group: String, base_type: String },

    #[error(
        "group '{group}': '{first}' and '{second}' both become '{generated}' in the {target} output"
    )]
    NameCollision {
        group: String,
        target: String,
        first: String,
        second: String,
        generated: String,
    },

    #[error("unknown target '{0}'")]
    UnknownTarget(String),
}

impl GenerationError {
    /// Name of the group the error belongs to, if any
    pub fn group(&self) -> Option<&str> {
        match self {
            GenerationError::MalformedLine { group, .. }
            | GenerationError::DuplicateNodeName { group, .. }
            | GenerationError::UnresolvedPlaceholder { group, .. }
            | GenerationError::InvalidBaseType { group, .. }
            | GenerationError::NameCollision { group, .. } => Some(group),
            GenerationError::UnknownTarget(_) => None,
        }
    }
}
