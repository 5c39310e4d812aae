//! Rust target
//!
//! The base type becomes an enum with one variant per node plus a `<Base>Node` trait
//! holding the dispatch entry points. Every node is a struct implementing that trait, with
//! a constructor taking the fields in grammar order and a `From` conversion into the
//! enum. Visitors are traits, one per dispatch shape:
//!
//! ```text
//! pub trait ExpressionVisitor<T> {
//!     fn visit_literal_expression(&mut self, node: &LiteralExpression) -> T;
//! }
//! ```
//!
//! Recursive fields need indirection in Rust, so grammars written for this target use
//! `Box<$base$>` (or `Vec<$base$>`) where the C# grammar would say `$base$`.
//!
//! Files land at `<base>.rs` and `visitors/<base>_visitor.rs`; the namespace, when set,
//! is the module path they are mounted under (`crate` otherwise).

use crate::astgen::dispatch::{DispatchShape, ResultKind};
use crate::astgen::document::DocumentKind;
use crate::astgen::error::GenerationError;
use crate::astgen::grammar::NodeSpec;
use crate::astgen::group::AstGroupSpec;
use crate::astgen::naming::{rust_field_name, to_snake_case};
use crate::astgen::target::Target;
use std::collections::HashMap;
use std::path::PathBuf;

const INDENT: &str = "    ";
const DERIVES: &str = "#[derive(Debug, Clone, PartialEq)]";

pub struct RustTarget;

impl RustTarget {
    fn module_root(group: &AstGroupSpec) -> &str {
        if group.namespace.is_empty() {
            "crate"
        } else {
            &group.namespace
        }
    }

    fn types_module(group: &AstGroupSpec) -> String {
        format!(
            "{}::{}",
            Self::module_root(group),
            to_snake_case(&group.base_type_name)
        )
    }

    fn visitors_module(group: &AstGroupSpec) -> String {
        format!(
            "{}::visitors::{}_visitor",
            Self::module_root(group),
            to_snake_case(&group.base_type_name)
        )
    }

    fn node_trait(group: &AstGroupSpec) -> String {
        format!("{}Node", group.base_type_name)
    }

    /// `ExpressionVisitor<T>` / `ExpressionEffectVisitor`
    fn visitor_trait(group: &AstGroupSpec, shape: DispatchShape) -> String {
        let name = format!("{}{}Visitor", group.base_type_name, shape.suffix());
        if shape.is_generic() {
            format!("{}<T>", name)
        } else {
            name
        }
    }

    fn entry_name(shape: DispatchShape) -> String {
        to_snake_case(&format!("Accept{}", shape.suffix()))
    }

    fn visit_name(type_name: &str, shape: DispatchShape) -> String {
        to_snake_case(&format!("Visit{}{}", shape.suffix(), type_name))
    }

    fn entry_signature(group: &AstGroupSpec, shape: DispatchShape) -> String {
        let visitor = Self::visitor_trait(group, shape);
        match shape.result {
            ResultKind::Value => format!(
                "fn {}<T>(&self, visitor: &mut dyn {}) -> T",
                Self::entry_name(shape),
                visitor
            ),
            ResultKind::Effect => format!(
                "fn {}(&self, visitor: &mut dyn {})",
                Self::entry_name(shape),
                visitor
            ),
        }
    }

    /// Fail when two distinct `names` share a spelling
    fn check_distinct<'a>(
        group: &AstGroupSpec,
        names: impl IntoIterator<Item = &'a str>,
        spell: impl Fn(&str) -> String,
    ) -> Result<(), GenerationError> {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for name in names {
            let generated = spell(name);
            match seen.get(&generated) {
                Some(first) if *first != name => {
                    return Err(GenerationError::NameCollision {
                        group: group.group_name.clone(),
                        target: "rust".to_string(),
                        first: first.to_string(),
                        second: name.to_string(),
                        generated,
                    })
                }
                Some(_) => {}
                None => {
                    seen.insert(generated, name);
                }
            }
        }
        Ok(())
    }

    fn method(signature: &str, body: &str) -> String {
        format!(
            "{indent}{signature} {{\n{indent}{indent}{body}\n{indent}}}",
            indent = INDENT,
            signature = signature,
            body = body
        )
    }

    fn enum_forwarding(group: &AstGroupSpec, shape: DispatchShape) -> String {
        let signature = Self::entry_signature(group, shape);
        if group.nodes.is_empty() {
            return Self::method(&signature, "match *self {}");
        }

        let arms = group
            .nodes
            .iter()
            .map(|node| {
                format!(
                    "{indent}{indent}{indent}{base}::{variant}(node) => node.{entry}(visitor),",
                    indent = INDENT,
                    base = group.base_type_name,
                    variant = node.name,
                    entry = Self::entry_name(shape)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        let body = format!(
            "match self {{\n{arms}\n{indent}{indent}}}",
            arms = arms,
            indent = INDENT
        );
        Self::method(&signature, &body)
    }
}

/// `header {` ... `}` with the opening brace on the header line
fn rust_block(header: &str, lines: &[String], separator: &str) -> String {
    if lines.is_empty() {
        format!("{} {{}}", header)
    } else {
        format!("{} {{\n{}\n}}", header, lines.join(separator))
    }
}

impl Target for RustTarget {
    fn name(&self) -> &str {
        "rust"
    }

    fn description(&self) -> &str {
        "Rust structs, a base enum and visitor traits"
    }

    fn file_extension(&self) -> &str {
        "rs"
    }

    /// Visitor methods and fields are snake case, so names differing only in case or
    /// word boundaries (`HTTPGet`, `HttpGet`) would collide
    fn validate(&self, group: &AstGroupSpec) -> Result<(), GenerationError> {
        let type_names = group.type_names();
        Self::check_distinct(group, type_names.iter().map(String::as_str), to_snake_case)?;

        for node in &group.nodes {
            Self::check_distinct(
                group,
                node.fields.iter().map(|field| field.name.as_str()),
                rust_field_name,
            )?;
        }
        Ok(())
    }

    fn document_path(&self, group: &AstGroupSpec, kind: DocumentKind) -> PathBuf {
        let base = to_snake_case(&group.base_type_name);
        match kind {
            DocumentKind::Types => PathBuf::from(format!("{}.rs", base)),
            DocumentKind::Visitors => {
                PathBuf::from("visitors").join(format!("{}_visitor.rs", base))
            }
        }
    }

    fn implicit_reference(&self, group: &AstGroupSpec, kind: DocumentKind) -> Option<String> {
        match kind {
            DocumentKind::Types => Some(format!("{}::*", Self::visitors_module(group))),
            DocumentKind::Visitors => Some(format!("{}::*", Self::types_module(group))),
        }
    }

    fn reference(&self, module: &str) -> String {
        format!("use {};", module)
    }

    fn abstract_entry(&self, group: &AstGroupSpec, shape: DispatchShape) -> String {
        format!("{}{};", INDENT, Self::entry_signature(group, shape))
    }

    fn base_definition(&self, group: &AstGroupSpec, entries: &[String]) -> String {
        let node_trait = rust_block(
            &format!("pub trait {}", Self::node_trait(group)),
            entries,
            "\n",
        );

        let variants = group
            .nodes
            .iter()
            .map(|node| format!("{}{}({}),", INDENT, node.name, group.type_name(node)))
            .collect::<Vec<_>>();
        let base_enum = format!(
            "{}\n{}",
            DERIVES,
            rust_block(&format!("pub enum {}", group.base_type_name), &variants, "\n")
        );

        let forwarding = group
            .dispatch
            .shapes()
            .iter()
            .map(|shape| Self::enum_forwarding(group, *shape))
            .collect::<Vec<_>>();
        let base_impl = rust_block(
            &format!(
                "impl {} for {}",
                Self::node_trait(group),
                group.base_type_name
            ),
            &forwarding,
            "\n\n",
        );

        [node_trait, base_enum, base_impl].join("\n\n")
    }

    fn dispatch_entry(
        &self,
        group: &AstGroupSpec,
        type_name: &str,
        shape: DispatchShape,
    ) -> String {
        Self::method(
            &Self::entry_signature(group, shape),
            &format!("visitor.{}(self)", Self::visit_name(type_name, shape)),
        )
    }

    fn node_definition(
        &self,
        group: &AstGroupSpec,
        node: &NodeSpec,
        type_name: &str,
        entries: &[String],
    ) -> String {
        let field_names: Vec<String> = node
            .fields
            .iter()
            .map(|field| rust_field_name(&field.name))
            .collect();

        let fields = node
            .fields
            .iter()
            .zip(&field_names)
            .map(|(field, name)| format!("{}pub {}: {},", INDENT, name, field.type_expr))
            .collect::<Vec<_>>();
        let definition = format!(
            "{}\n{}",
            DERIVES,
            rust_block(&format!("pub struct {}", type_name), &fields, "\n")
        );

        let parameters = node
            .fields
            .iter()
            .zip(&field_names)
            .map(|(field, name)| format!("{}: {}", name, field.type_expr))
            .collect::<Vec<_>>()
            .join(", ");
        let initializer = if field_names.is_empty() {
            "Self {}".to_string()
        } else {
            format!("Self {{ {} }}", field_names.join(", "))
        };
        let constructor = rust_block(
            &format!("impl {}", type_name),
            &[Self::method(
                &format!("pub fn new({}) -> Self", parameters),
                &initializer,
            )],
            "\n",
        );

        let conversion = rust_block(
            &format!("impl From<{}> for {}", type_name, group.base_type_name),
            &[Self::method(
                &format!("fn from(node: {}) -> Self", type_name),
                &format!("{}::{}(node)", group.base_type_name, node.name),
            )],
            "\n",
        );

        let dispatch = rust_block(
            &format!("impl {} for {}", Self::node_trait(group), type_name),
            entries,
            "\n\n",
        );

        [definition, constructor, conversion, dispatch].join("\n\n")
    }

    fn visitor_method(
        &self,
        _group: &AstGroupSpec,
        type_name: &str,
        shape: DispatchShape,
    ) -> String {
        let name = Self::visit_name(type_name, shape);
        match shape.result {
            ResultKind::Value => format!(
                "{}fn {}(&mut self, node: &{}) -> T;",
                INDENT, name, type_name
            ),
            ResultKind::Effect => {
                format!("{}fn {}(&mut self, node: &{});", INDENT, name, type_name)
            }
        }
    }

    fn visitor_interface(
        &self,
        group: &AstGroupSpec,
        shape: DispatchShape,
        methods: &[String],
    ) -> String {
        rust_block(
            &format!("pub trait {}", Self::visitor_trait(group, shape)),
            methods,
            "\n",
        )
    }

    fn document(
        &self,
        _group: &AstGroupSpec,
        _kind: DocumentKind,
        references: &[String],
        body: &[String],
    ) -> String {
        let mut out = String::new();
        for reference in references {
            out.push_str(&self.reference(reference));
            out.push('\n');
        }
        if !references.is_empty() {
            out.push('\n');
        }
        out.push_str(&body.join("\n\n"));
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astgen::dispatch::DispatchConvention;
    use crate::astgen::group::GroupDefinition;

    fn group(grammar: &str, dispatch: DispatchConvention) -> AstGroupSpec {
        AstGroupSpec::from_definition(
            &GroupDefinition::new("Expressions", "Expression", grammar).with_dispatch(dispatch),
        )
        .unwrap()
    }

    #[test]
    fn test_validate_rejects_snake_case_collisions() {
        let nodes = group("HTTPGet : Token Url\nHttpGet : Token Url", DispatchConvention::Both);
        assert_eq!(
            RustTarget.validate(&nodes),
            Err(GenerationError::NameCollision {
                group: "Expressions".to_string(),
                target: "rust".to_string(),
                first: "HTTPGetExpression".to_string(),
                second: "HttpGetExpression".to_string(),
                generated: "http_get_expression".to_string(),
            })
        );

        let fields = group("Binary : Token Left, Token left", DispatchConvention::Both);
        assert!(matches!(
            RustTarget.validate(&fields),
            Err(GenerationError::NameCollision { generated, .. }) if generated == "left"
        ));

        let distinct = group("Get : Token Url\nPost : Token Url", DispatchConvention::Both);
        assert_eq!(RustTarget.validate(&distinct), Ok(()));
    }

    #[test]
    fn test_paths_and_modules() {
        let group = group("Literal : Token Value", DispatchConvention::ValueReturning);
        assert_eq!(
            RustTarget.document_path(&group, DocumentKind::Visitors),
            PathBuf::from("visitors").join("expression_visitor.rs")
        );
        assert_eq!(
            RustTarget.implicit_reference(&group, DocumentKind::Visitors),
            Some("crate::expression::*".to_string())
        );
    }

    #[test]
    fn test_namespace_overrides_module_root() {
        let group = AstGroupSpec::from_definition(
            &GroupDefinition::new("Statements", "Statement", "Print : Expression value")
                .with_namespace("crate::ast"),
        )
        .unwrap();
        assert_eq!(
            RustTarget.implicit_reference(&group, DocumentKind::Types),
            Some("crate::ast::visitors::statement_visitor::*".to_string())
        );
    }

    #[test]
    fn test_entry_names_differ_per_shape() {
        let group = group("Literal : Token Value", DispatchConvention::Both);
        assert_eq!(
            RustTarget.abstract_entry(&group, DispatchShape::VALUE),
            "    fn accept<T>(&self, visitor: &mut dyn ExpressionVisitor<T>) -> T;"
        );
        assert_eq!(
            RustTarget.abstract_entry(&group, DispatchShape::EFFECT),
            "    fn accept_effect(&self, visitor: &mut dyn ExpressionEffectVisitor);"
        );
        assert_eq!(
            RustTarget.visitor_method(&group, "LiteralExpression", DispatchShape::EFFECT),
            "    fn visit_effect_literal_expression(&mut self, node: &LiteralExpression);"
        );
    }

    #[test]
    fn test_constructor_keeps_field_order_and_escapes_keywords() {
        let group = group(
            "Cast : Token Type, Box<Expression> Inner",
            DispatchConvention::ValueReturning,
        );
        let definition = RustTarget.node_definition(&group, &group.nodes[0], "CastExpression", &[]);
        assert!(definition.contains("    pub r#type: Token,\n    pub inner: Box<Expression>,"));
        assert!(definition.contains("pub fn new(r#type: Token, inner: Box<Expression>) -> Self"));
        assert!(definition.contains("Self { r#type, inner }"));
        assert!(definition.contains("Expression::Cast(node)"));
    }

    #[test]
    fn test_marker_node() {
        let group = group("Nil :", DispatchConvention::EffectOnly);
        let definition = RustTarget.node_definition(&group, &group.nodes[0], "NilExpression", &[]);
        assert!(definition.contains("pub struct NilExpression {}"));
        assert!(definition.contains("pub fn new() -> Self {\n        Self {}\n    }"));
    }

    #[test]
    fn test_empty_group_base_matches_deref() {
        let group = group("", DispatchConvention::ValueReturning);
        let entries = vec![RustTarget.abstract_entry(&group, DispatchShape::VALUE)];
        let base = RustTarget.base_definition(&group, &entries);
        assert!(base.contains("pub enum Expression {}"));
        assert!(base.contains("match *self {}"));
    }
}
