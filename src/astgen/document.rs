//! Generated documents
//!
//! Each group yields two documents: the type document (base type and every concrete node)
//! and the visitor document (one interface per dispatch shape).

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Types,
    Visitors,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Types => write!(f, "types"),
            DocumentKind::Visitors => write!(f, "visitors"),
        }
    }
}

/// Generated text together with the path it should be written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub kind: DocumentKind,
    /// Relative to the output directory
    pub path: PathBuf,
    pub content: String,
}

impl GeneratedDocument {
    pub fn new(kind: DocumentKind, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }
}

/// Append `implicit` to `references` unless already present
pub fn with_implicit_reference(references: &[String], implicit: Option<String>) -> Vec<String> {
    let mut all = references.to_vec();
    if let Some(implicit) = implicit {
        if !all.contains(&implicit) {
            all.push(implicit);
        }
    }
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implicit_reference_is_appended_once() {
        let external = vec!["Lox.Core".to_string(), "Lox.Visitors".to_string()];
        assert_eq!(
            with_implicit_reference(&external, Some("Lox.Visitors".to_string())),
            external
        );
        assert_eq!(
            with_implicit_reference(&[], Some("Lox.Visitors".to_string())),
            vec!["Lox.Visitors".to_string()]
        );
    }
}
