//! Naming rules shared by the compiler and the targets

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex is valid"));

/// Rust keywords, strict and reserved, that cannot be used as plain field names
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers either
const RESERVED_PATH_KEYWORDS: &[&str] = &["crate", "self", "super"];

/// Whether `s` is usable as a type, node or field name in every target
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER_REGEX.is_match(s)
}

/// How concrete node types are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeNaming {
    /// `<NodeName><BaseTypeName>`, e.g. `BinaryExpression`
    #[default]
    Combined,
    /// `<NodeName>` as written in the grammar
    Plain,
}

impl NodeNaming {
    pub fn type_name(&self, node_name: &str, base_type: &str) -> String {
        match self {
            NodeNaming::Combined => format!("{}{}", node_name, base_type),
            NodeNaming::Plain => node_name.to_string(),
        }
    }
}

impl fmt::Display for NodeNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeNaming::Combined => write!(f, "combined"),
            NodeNaming::Plain => write!(f, "plain"),
        }
    }
}

impl FromStr for NodeNaming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "combined" => Ok(NodeNaming::Combined),
            "plain" => Ok(NodeNaming::Plain),
            other => Err(format!(
                "unknown node naming '{}' (expected 'combined' or 'plain')",
                other
            )),
        }
    }
}

/// `BinaryExpression` -> `binary_expression`, `HTTPRequest` -> `http_request`
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let starts_word = match prev {
                None | Some('_') => false,
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
                Some(_) => false,
            };
            if starts_word {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }

    out
}

/// Snake-case field name, escaped as a raw identifier when it collides with a keyword
pub fn rust_field_name(name: &str) -> String {
    let snake = to_snake_case(name);
    if RESERVED_PATH_KEYWORDS.contains(&snake.as_str()) {
        format!("{}_", snake)
    } else if RUST_KEYWORDS.contains(&snake.as_str()) {
        format!("r#{}", snake)
    } else {
        snake
    }
}

/// Parameter name for visitor methods, the lower-cased initial of the base type
pub fn parameter_initial(base_type: &str) -> String {
    base_type
        .chars()
        .next()
        .map(|c| c.to_ascii_lowercase().to_string())
        .unwrap_or_else(|| "node".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("Expression"));
        assert!(is_identifier("_private1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier("List<T>"));
        assert!(!is_identifier("$base$"));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(
            NodeNaming::Combined.type_name("Binary", "Expression"),
            "BinaryExpression"
        );
        assert_eq!(NodeNaming::Plain.type_name("Binary", "Expression"), "Binary");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("BinaryExpression"), "binary_expression");
        assert_eq!(to_snake_case("Left"), "left");
        assert_eq!(to_snake_case("HTTPRequest"), "http_request");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("Value2Go"), "value2_go");
    }

    #[test]
    fn test_rust_field_names_escape_keywords() {
        assert_eq!(rust_field_name("Type"), "r#type");
        assert_eq!(rust_field_name("Operator"), "operator");
        assert_eq!(rust_field_name("Self"), "self_");
        assert_eq!(rust_field_name("Box"), "r#box");
        assert_eq!(rust_field_name("Yield"), "r#yield");
        assert_eq!(rust_field_name("Abstract"), "r#abstract");
    }

    #[test]
    fn test_parameter_initial() {
        assert_eq!(parameter_initial("Expression"), "e");
        assert_eq!(parameter_initial("Statement"), "s");
    }

    #[test]
    fn test_naming_from_str() {
        assert_eq!("plain".parse::<NodeNaming>(), Ok(NodeNaming::Plain));
        assert!("camel".parse::<NodeNaming>().is_err());
    }
}
