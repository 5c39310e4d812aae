//! Group compiler
//!
//! Drives a group through every stage: resolution and parsing (via
//! [`AstGroupSpec::from_definition`]), the base type, the ordered fold over nodes, one
//! visitor interface per dispatch shape, and finally document assembly with references.
//!
//! Compilation is all-or-nothing: a group either yields both of its documents or an
//! error, never a partial output.

use crate::astgen::dispatch::DispatchShape;
use crate::astgen::document::{with_implicit_reference, DocumentKind, GeneratedDocument};
use crate::astgen::emitter::emit_node;
use crate::astgen::error::GenerationError;
use crate::astgen::group::{AstGroupSpec, GroupDefinition};
use crate::astgen::target::Target;

/// The two documents of a compiled group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOutput {
    pub types: GeneratedDocument,
    pub visitors: GeneratedDocument,
}

impl GroupOutput {
    pub fn documents(&self) -> [&GeneratedDocument; 2] {
        [&self.types, &self.visitors]
    }

    pub fn into_documents(self) -> [GeneratedDocument; 2] {
        [self.types, self.visitors]
    }
}

pub fn compile(
    definition: &GroupDefinition,
    target: &dyn Target,
) -> Result<GroupOutput, GenerationError> {
    let group = AstGroupSpec::from_definition(definition)?;
    target.validate(&group)?;
    Ok(compile_group(&group, target))
}

/// Emit the documents of an already resolved and validated group
pub fn compile_group(group: &AstGroupSpec, target: &dyn Target) -> GroupOutput {
    let shapes = group.dispatch.shapes();

    let abstract_entries: Vec<String> = shapes
        .iter()
        .map(|shape| target.abstract_entry(group, *shape))
        .collect();

    let mut type_body = vec![target.base_definition(group, &abstract_entries)];
    let mut methods: Vec<(DispatchShape, Vec<String>)> =
        shapes.iter().map(|shape| (*shape, Vec::new())).collect();

    for node in &group.nodes {
        let fragments = emit_node(target, node, group);
        type_body.push(fragments.definition);
        for (shape, method) in fragments.visitor_methods {
            if let Some((_, collected)) = methods.iter_mut().find(|(s, _)| *s == shape) {
                collected.push(method);
            }
        }
    }

    let visitor_body: Vec<String> = methods
        .iter()
        .map(|(shape, methods)| target.visitor_interface(group, *shape, methods))
        .collect();

    let type_references = with_implicit_reference(
        &group.external_references,
        target.implicit_reference(group, DocumentKind::Types),
    );
    let visitor_references =
        with_implicit_reference(&[], target.implicit_reference(group, DocumentKind::Visitors));

    tracing::debug!(
        group = %group.group_name,
        target = target.name(),
        nodes = group.nodes.len(),
        shapes = shapes.len(),
        "compiled group"
    );

    GroupOutput {
        types: GeneratedDocument::new(
            DocumentKind::Types,
            target.document_path(group, DocumentKind::Types),
            target.document(group, DocumentKind::Types, &type_references, &type_body),
        ),
        visitors: GeneratedDocument::new(
            DocumentKind::Visitors,
            target.document_path(group, DocumentKind::Visitors),
            target.document(group, DocumentKind::Visitors, &visitor_references, &visitor_body),
        ),
    }
}
