//! Node emission
//!
//! Produces everything one node contributes to the output: its concrete type definition
//! (with one dispatch entry per shape) and its visitor method for every shape. The
//! compiler folds these fragments into the two documents of the group.

use crate::astgen::dispatch::DispatchShape;
use crate::astgen::grammar::NodeSpec;
use crate::astgen::group::AstGroupSpec;
use crate::astgen::target::Target;

/// The output of a single node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFragments {
    pub type_name: String,
    pub definition: String,
    /// One method per shape of the group's convention, in shape order
    pub visitor_methods: Vec<(DispatchShape, String)>,
}

impl NodeFragments {
    /// The visitor method of `shape`, if the group emits it
    pub fn method(&self, shape: DispatchShape) -> Option<&str> {
        self.visitor_methods
            .iter()
            .find(|(s, _)| *s == shape)
            .map(|(_, method)| method.as_str())
    }
}

pub fn emit_node(target: &dyn Target, node: &NodeSpec, group: &AstGroupSpec) -> NodeFragments {
    let type_name = group.type_name(node);
    let shapes = group.dispatch.shapes();

    let entries: Vec<String> = shapes
        .iter()
        .map(|shape| target.dispatch_entry(group, &type_name, *shape))
        .collect();
    let definition = target.node_definition(group, node, &type_name, &entries);

    let visitor_methods = shapes
        .iter()
        .map(|shape| (*shape, target.visitor_method(group, &type_name, *shape)))
        .collect();

    NodeFragments {
        type_name,
        definition,
        visitor_methods,
    }
}
