//! Grammar line parsing
//!
//! A grammar line declares one node of an AST group:
//!
//! ```text
//! Name : Type1 field1, Type2 field2, ...
//! Name :
//! ```
//!
//! Splitting Rules
//!
//!     - The name/field separator is a single `:` outside of any bracket. `::` is a path
//!       separator and belongs to a type expression.
//!     - Field entries are separated by commas outside of any bracket, so
//!       `Dictionary<string, int> Map` is a single entry.
//!     - An entry is split at its last whitespace: the last token is the field name and
//!       everything before it is the type expression, copied verbatim.
//!
//! Type expressions are opaque. The only structure looked at is bracket nesting, which
//! must balance for the splitting above to be meaningful.

pub mod lexer;

use crate::astgen::naming::is_identifier;
use lexer::{tokenize_with_spans, GrammarToken};
use serde::Serialize;
use std::fmt;

/// One typed field of a node, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub type_expr: String,
    pub name: String,
}

impl FieldSpec {
    pub fn new(type_expr: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_expr: type_expr.into(),
            name: name.into(),
        }
    }
}

/// A node declared by one grammar line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSpec {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

impl NodeSpec {
    /// A node without fields
    pub fn marker(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn is_marker(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A grammar line that could not be split into a node specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    pub line: String,
    pub reason: String,
}

impl MalformedLine {
    fn new(line: &str, reason: impl Into<String>) -> Self {
        Self {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MalformedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed grammar line '{}': {}", self.line, self.reason)
    }
}

impl std::error::Error for MalformedLine {}

/// Parse a single non-blank grammar line into a [`NodeSpec`]
pub fn parse_line(line: &str) -> Result<NodeSpec, MalformedLine> {
    let tokens = tokenize_with_spans(line).map_err(|offset| {
        MalformedLine::new(line, format!("unrecognised character at byte {}", offset))
    })?;

    let separators = top_level_positions(&tokens, GrammarToken::Colon);
    let separator = match separators.as_slice() {
        [single] => single.clone(),
        found => {
            return Err(MalformedLine::new(
                line,
                format!(
                    "expected exactly one ':' separating the node name from its fields, found {}",
                    found.len()
                ),
            ))
        }
    };

    let name = line[..separator.start].trim();
    if name.is_empty() {
        return Err(MalformedLine::new(line, "missing node name before ':'"));
    }
    if !is_identifier(name) {
        return Err(MalformedLine::new(
            line,
            format!("node name '{}' is not an identifier", name),
        ));
    }

    let fields_start = separator.end;
    let field_tokens: Vec<_> = tokens
        .iter()
        .filter(|(_, span)| span.start >= fields_start)
        .cloned()
        .collect();

    let fields = if line[fields_start..].trim().is_empty() {
        Vec::new()
    } else {
        split_entries(line, fields_start, &field_tokens)?
            .into_iter()
            .map(|entry| parse_field(line, entry))
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(NodeSpec {
        name: name.to_string(),
        fields,
    })
}

/// Byte spans of the given token kind occurring outside of brackets
fn top_level_positions(
    tokens: &[(GrammarToken, logos::Span)],
    kind: GrammarToken,
) -> Vec<logos::Span> {
    let mut depth = 0i32;
    let mut found = Vec::new();
    for (token, span) in tokens {
        depth += token.depth_delta();
        if *token == kind && depth == 0 {
            found.push(span.clone());
        }
    }
    found
}

/// Split the field list (starting at `start`) on top-level commas
fn split_entries<'a>(
    line: &'a str,
    start: usize,
    tokens: &[(GrammarToken, logos::Span)],
) -> Result<Vec<&'a str>, MalformedLine> {
    let mut depth = 0i32;
    let mut entry_start = start;
    let mut entries = Vec::new();

    for (token, span) in tokens {
        depth += token.depth_delta();
        if depth < 0 {
            return Err(MalformedLine::new(
                line,
                format!("unbalanced closing bracket at byte {}", span.start),
            ));
        }
        if *token == GrammarToken::Comma && depth == 0 {
            entries.push(&line[entry_start..span.start]);
            entry_start = span.end;
        }
    }

    if depth != 0 {
        return Err(MalformedLine::new(line, "unclosed bracket in field list"));
    }

    entries.push(&line[entry_start..]);
    Ok(entries)
}

fn parse_field(line: &str, entry: &str) -> Result<FieldSpec, MalformedLine> {
    let entry = entry.trim();
    if entry.is_empty() {
        return Err(MalformedLine::new(line, "empty field entry"));
    }

    let (type_expr, name) = entry.rsplit_once(char::is_whitespace).ok_or_else(|| {
        MalformedLine::new(
            line,
            format!("field entry '{}' must be '<type> <name>'", entry),
        )
    })?;

    if !is_identifier(name) {
        return Err(MalformedLine::new(
            line,
            format!("field name '{}' in '{}' is not an identifier", name, entry),
        ));
    }

    Ok(FieldSpec::new(type_expr.trim_end(), name))
}

/// Non-blank lines of a grammar block with their 1-based line numbers
pub fn grammar_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| (index + 1, line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_field() {
        let node = parse_line("Literal : Token Value").unwrap();
        assert_eq!(node.name, "Literal");
        assert_eq!(node.fields, vec![FieldSpec::new("Token", "Value")]);
    }

    #[test]
    fn test_parse_preserves_field_order() {
        let node =
            parse_line("Binary : Expression Left, Token Operator, Expression Right").unwrap();
        let names: Vec<_> = node.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Left", "Operator", "Right"]);
    }

    #[test]
    fn test_parse_marker_node() {
        let node = parse_line("Break :").unwrap();
        assert!(node.is_marker());
        assert_eq!(node, NodeSpec::marker("Break"));
    }

    #[test]
    fn test_parse_marker_node_with_trailing_spaces() {
        let node = parse_line("  This   :    ").unwrap();
        assert_eq!(node.name, "This");
        assert!(node.fields.is_empty());
    }

    #[test]
    fn test_generic_with_comma_is_one_entry() {
        let node = parse_line("Table : Dictionary<string, int> Entries, Token Name").unwrap();
        assert_eq!(
            node.fields,
            vec![
                FieldSpec::new("Dictionary<string, int>", "Entries"),
                FieldSpec::new("Token", "Name"),
            ]
        );
    }

    #[test]
    fn test_type_expression_keeps_inner_whitespace() {
        let node = parse_line("Call : List<Expression> Arguments, Expression? Callee").unwrap();
        assert_eq!(node.fields[0].type_expr, "List<Expression>");
        assert_eq!(node.fields[1].type_expr, "Expression?");
    }

    #[test]
    fn test_path_separator_inside_type() {
        let node = parse_line("Literal : crate::token::Token value").unwrap();
        assert_eq!(node.fields, vec![FieldSpec::new("crate::token::Token", "value")]);
    }

    #[test]
    fn test_missing_separator() {
        let err = parse_line("Literal Token Value").unwrap_err();
        assert!(err.reason.contains("found 0"));
    }

    #[test]
    fn test_two_separators() {
        let err = parse_line("Literal : Token : Value").unwrap_err();
        assert!(err.reason.contains("found 2"));
    }

    #[test]
    fn test_single_token_entry_is_malformed() {
        let err = parse_line("Grouping : Expression").unwrap_err();
        assert!(err.reason.contains("<type> <name>"));
    }

    #[test]
    fn test_trailing_comma_is_malformed() {
        let err = parse_line("Unary : Token Operator,").unwrap_err();
        assert_eq!(err.reason, "empty field entry");
    }

    #[test]
    fn test_unbalanced_brackets() {
        assert!(parse_line("Call : List<Expression Arguments").is_err());
        assert!(parse_line("Call : List>Expression Arguments").is_err());
    }

    #[test]
    fn test_missing_name() {
        let err = parse_line(" : Token Value").unwrap_err();
        assert_eq!(err.reason, "missing node name before ':'");
    }

    #[test]
    fn test_display_mentions_line() {
        let err = parse_line("Broken").unwrap_err();
        assert!(err.to_string().contains("'Broken'"));
    }

    #[test]
    fn test_grammar_lines_skip_blanks() {
        let text = "\nA : T a\n   \nB :\n";
        let lines: Vec<_> = grammar_lines(text).collect();
        assert_eq!(lines, vec![(2, "A : T a"), (4, "B :")]);
    }
}
