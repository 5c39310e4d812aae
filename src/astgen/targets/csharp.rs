//! C# target
//!
//! Nodes become positional `record class` declarations deriving from an abstract base
//! record; visitors become interfaces in a sibling `Visitors` namespace:
//!
//! ```text
//! public abstract record class Expression()
//! {
//!     public abstract T Accept<T>(IExpressionVisitor<T> visitor);
//! }
//!
//! public record class LiteralExpression(Token Value) : Expression
//! {
//!     public override T Accept<T>(IExpressionVisitor<T> visitor) => visitor.Visit(this);
//! }
//! ```
//!
//! Files land at `<Base>.cs` and `Visitors/I<Base>Visitor.cs`.

use crate::astgen::dispatch::{DispatchShape, ResultKind};
use crate::astgen::document::DocumentKind;
use crate::astgen::grammar::NodeSpec;
use crate::astgen::group::AstGroupSpec;
use crate::astgen::naming::parameter_initial;
use crate::astgen::target::{braced_block, qualified, Target};
use std::path::PathBuf;

const INDENT: &str = "    ";
const VISITORS_NAMESPACE: &str = "Visitors";

pub struct CSharpTarget;

impl CSharpTarget {
    fn types_namespace(group: &AstGroupSpec) -> String {
        let segment = if group.group_name.is_empty() {
            format!("{}s", group.base_type_name)
        } else {
            group.group_name.clone()
        };
        qualified(&[group.namespace.as_str(), segment.as_str()], ".")
    }

    fn visitors_namespace(group: &AstGroupSpec) -> String {
        qualified(&[group.namespace.as_str(), VISITORS_NAMESPACE], ".")
    }

    /// `IExpressionVisitor<T>` / `IExpressionEffectVisitor`
    fn visitor_type(group: &AstGroupSpec, shape: DispatchShape) -> String {
        let name = format!("I{}{}Visitor", group.base_type_name, shape.suffix());
        if shape.is_generic() {
            format!("{}<T>", name)
        } else {
            name
        }
    }

    fn result_type(shape: DispatchShape) -> &'static str {
        match shape.result {
            ResultKind::Value => "T",
            ResultKind::Effect => "void",
        }
    }

    /// `T Accept<T>(IExpressionVisitor<T> visitor)` / `void AcceptEffect(IExpressionEffectVisitor visitor)`
    fn entry_signature(group: &AstGroupSpec, shape: DispatchShape) -> String {
        let generics = if shape.is_generic() { "<T>" } else { "" };
        format!(
            "{} Accept{}{}({} visitor)",
            Self::result_type(shape),
            shape.suffix(),
            generics,
            Self::visitor_type(group, shape)
        )
    }
}

impl Target for CSharpTarget {
    fn name(&self) -> &str {
        "csharp"
    }

    fn description(&self) -> &str {
        "C# record classes with visitor interfaces"
    }

    fn file_extension(&self) -> &str {
        "cs"
    }

    fn document_path(&self, group: &AstGroupSpec, kind: DocumentKind) -> PathBuf {
        match kind {
            DocumentKind::Types => PathBuf::from(format!("{}.cs", group.base_type_name)),
            DocumentKind::Visitors => PathBuf::from(VISITORS_NAMESPACE)
                .join(format!("I{}Visitor.cs", group.base_type_name)),
        }
    }

    fn implicit_reference(&self, group: &AstGroupSpec, kind: DocumentKind) -> Option<String> {
        match kind {
            DocumentKind::Types => Some(Self::visitors_namespace(group)),
            DocumentKind::Visitors => Some(Self::types_namespace(group)),
        }
    }

    fn reference(&self, module: &str) -> String {
        format!("using {};", module)
    }

    fn abstract_entry(&self, group: &AstGroupSpec, shape: DispatchShape) -> String {
        format!(
            "{}public abstract {};",
            INDENT,
            Self::entry_signature(group, shape)
        )
    }

    fn base_definition(&self, group: &AstGroupSpec, entries: &[String]) -> String {
        let header = format!("public abstract record class {}()", group.base_type_name);
        braced_block(&header, entries, "\n")
    }

    fn dispatch_entry(
        &self,
        group: &AstGroupSpec,
        _type_name: &str,
        shape: DispatchShape,
    ) -> String {
        format!(
            "{}public override {} => visitor.Visit{}(this);",
            INDENT,
            Self::entry_signature(group, shape),
            shape.suffix()
        )
    }

    fn node_definition(
        &self,
        group: &AstGroupSpec,
        node: &NodeSpec,
        type_name: &str,
        entries: &[String],
    ) -> String {
        let parameters = node
            .fields
            .iter()
            .map(|field| format!("{} {}", field.type_expr, field.name))
            .collect::<Vec<_>>()
            .join(", ");
        let header = format!(
            "public record class {}({}) : {}",
            type_name, parameters, group.base_type_name
        );
        braced_block(&header, entries, "\n")
    }

    fn visitor_method(
        &self,
        group: &AstGroupSpec,
        type_name: &str,
        shape: DispatchShape,
    ) -> String {
        format!(
            "{}{} Visit{}({} {});",
            INDENT,
            Self::result_type(shape),
            shape.suffix(),
            type_name,
            parameter_initial(&group.base_type_name)
        )
    }

    fn visitor_interface(
        &self,
        group: &AstGroupSpec,
        shape: DispatchShape,
        methods: &[String],
    ) -> String {
        let header = format!("public interface {}", Self::visitor_type(group, shape));
        braced_block(&header, methods, "\n")
    }

    fn document(
        &self,
        group: &AstGroupSpec,
        kind: DocumentKind,
        references: &[String],
        body: &[String],
    ) -> String {
        let namespace = match kind {
            DocumentKind::Types => Self::types_namespace(group),
            DocumentKind::Visitors => Self::visitors_namespace(group),
        };

        let mut out = String::new();
        for reference in references {
            out.push_str(&self.reference(reference));
            out.push('\n');
        }
        if !references.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("namespace {};\n\n", namespace));
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
            &GroupDefinition::new("Expressions", "Expression", grammar)
                .with_namespace("Lox")
                .with_dispatch(dispatch),
        )
        .unwrap()
    }

    #[test]
    fn test_paths() {
        let group = group("Literal : Token Value", DispatchConvention::ValueReturning);
        let target = CSharpTarget;
        assert_eq!(
            target.document_path(&group, DocumentKind::Types),
            PathBuf::from("Expression.cs")
        );
        assert_eq!(
            target.document_path(&group, DocumentKind::Visitors),
            PathBuf::from("Visitors").join("IExpressionVisitor.cs")
        );
    }

    #[test]
    fn test_entry_points_per_shape() {
        let group = group("Literal : Token Value", DispatchConvention::Both);
        let target = CSharpTarget;
        assert_eq!(
            target.abstract_entry(&group, DispatchShape::VALUE),
            "    public abstract T Accept<T>(IExpressionVisitor<T> visitor);"
        );
        assert_eq!(
            target.abstract_entry(&group, DispatchShape::EFFECT),
            "    public abstract void AcceptEffect(IExpressionEffectVisitor visitor);"
        );
        assert_eq!(
            target.dispatch_entry(&group, "LiteralExpression", DispatchShape::EFFECT),
            "    public override void AcceptEffect(IExpressionEffectVisitor visitor) => visitor.VisitEffect(this);"
        );
    }

    #[test]
    fn test_visitor_methods_use_base_initial() {
        let group = group("Literal : Token Value", DispatchConvention::ValueReturning);
        assert_eq!(
            CSharpTarget.visitor_method(&group, "LiteralExpression", DispatchShape::VALUE),
            "    T Visit(LiteralExpression e);"
        );
    }

    #[test]
    fn test_marker_node_has_empty_parameter_list() {
        let group = group("This :", DispatchConvention::ValueReturning);
        let definition =
            CSharpTarget.node_definition(&group, &group.nodes[0], "ThisExpression", &[]);
        assert_eq!(
            definition,
            "public record class ThisExpression() : Expression\n{\n}"
        );
    }

    #[test]
    fn test_namespaces() {
        let group = group("Literal : Token Value", DispatchConvention::ValueReturning);
        assert_eq!(
            CSharpTarget.implicit_reference(&group, DocumentKind::Types),
            Some("Lox.Visitors".to_string())
        );
        assert_eq!(
            CSharpTarget.implicit_reference(&group, DocumentKind::Visitors),
            Some("Lox.Expressions".to_string())
        );
    }
}
