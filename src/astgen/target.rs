//! Target trait definition
//!
//! A target renders the language-neutral pieces decided by the compiler (which nodes,
//! which fields, which dispatch shapes, in which order) into the syntax of one output
//! language. Targets never decide *what* is emitted, only *how* it is spelled: the
//! compiler calls the hooks below once per base type, node, shape and document.
//!
//! # Examples
//!
//! ```ignore
//! let registry = TargetRegistry::with_defaults();
//! let target = registry.get("csharp")?;
//! let output = compile(&definition, target)?;
//! ```

use crate::astgen::dispatch::DispatchShape;
use crate::astgen::document::DocumentKind;
use crate::astgen::error::GenerationError;
use crate::astgen::grammar::NodeSpec;
use crate::astgen::group::AstGroupSpec;
use std::path::PathBuf;

pub trait Target: Send + Sync {
    /// The name of this target (e.g., "csharp", "rust")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Reject groups whose names can no longer be told apart once spelled in this target
    fn validate(&self, _group: &AstGroupSpec) -> Result<(), GenerationError> {
        Ok(())
    }

    /// Extension of generated files, without the dot
    fn file_extension(&self) -> &str;

    /// Where the document of `kind` for `group` goes, relative to the output directory
    fn document_path(&self, group: &AstGroupSpec, kind: DocumentKind) -> PathBuf;

    /// The reference the document of `kind` needs to reach its sibling document
    fn implicit_reference(&self, group: &AstGroupSpec, kind: DocumentKind) -> Option<String>;

    /// A single reference line (`using X;`, `use X;`)
    fn reference(&self, module: &str) -> String;

    /// Abstract dispatch entry point declared on the base type
    fn abstract_entry(&self, group: &AstGroupSpec, shape: DispatchShape) -> String;

    /// The base type, carrying one abstract entry per shape
    fn base_definition(&self, group: &AstGroupSpec, entries: &[String]) -> String;

    /// Concrete entry point of a node, forwarding to the visitor method for `type_name`
    fn dispatch_entry(&self, group: &AstGroupSpec, type_name: &str, shape: DispatchShape)
        -> String;

    /// Concrete node type with its fields in order and its entry points
    fn node_definition(
        &self,
        group: &AstGroupSpec,
        node: &NodeSpec,
        type_name: &str,
        entries: &[String],
    ) -> String;

    /// Visitor method signature accepting `type_name`
    fn visitor_method(&self, group: &AstGroupSpec, type_name: &str, shape: DispatchShape)
        -> String;

    /// Visitor interface of one shape, holding the methods of every node
    fn visitor_interface(
        &self,
        group: &AstGroupSpec,
        shape: DispatchShape,
        methods: &[String],
    ) -> String;

    /// Full document text from its references and body fragments
    fn document(
        &self,
        group: &AstGroupSpec,
        kind: DocumentKind,
        references: &[String],
        body: &[String],
    ) -> String;
}

/// `header { lines }` with the braces on their own lines, used by brace-delimited targets
pub(crate) fn braced_block(header: &str, lines: &[String], separator: &str) -> String {
    if lines.is_empty() {
        format!("{}\n{{\n}}", header)
    } else {
        format!("{}\n{{\n{}\n}}", header, lines.join(separator))
    }
}

/// Join non-empty `segments` with `separator`
pub(crate) fn qualified(segments: &[&str], separator: &str) -> String {
    segments
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}
