//! Grammar line parsing over the shapes of type expressions seen in real grammars

use astgen::astgen::{parse_line, FieldSpec};
use rstest::rstest;

#[rstest]
#[case("Literal : Token Value", &[("Token", "Value")])]
#[case(
    "Binary   : Expression Left, Token Operator, Expression Right",
    &[("Expression", "Left"), ("Token", "Operator"), ("Expression", "Right")]
)]
#[case("Call : List<Expression> Arguments", &[("List<Expression>", "Arguments")])]
#[case(
    "Table : Dictionary<string, List<int>> Rows, int Count",
    &[("Dictionary<string, List<int>>", "Rows"), ("int", "Count")]
)]
#[case("Path : std::path::PathBuf Location", &[("std::path::PathBuf", "Location")])]
#[case("Var : Expression? Initializer", &[("Expression?", "Initializer")])]
#[case("Callback : Func<int, int> -> int Handler", &[("Func<int, int> -> int", "Handler")])]
#[case("Pair : (Token, Token) Bounds", &[("(Token, Token)", "Bounds")])]
#[case("Array : int[] Values", &[("int[]", "Values")])]
#[case("Spaced :   Token    Value  ", &[("Token", "Value")])]
fn test_fields_in_order(#[case] line: &str, #[case] expected: &[(&str, &str)]) {
    let node = parse_line(line).unwrap();
    let expected: Vec<FieldSpec> = expected
        .iter()
        .map(|(type_expr, name)| FieldSpec::new(*type_expr, *name))
        .collect();
    assert_eq!(node.fields, expected);
}

#[rstest]
#[case("Break :")]
#[case("Break:")]
#[case("Break :   ")]
fn test_marker_nodes(#[case] line: &str) {
    let node = parse_line(line).unwrap();
    assert_eq!(node.name, "Break");
    assert!(node.is_marker());
}

#[rstest]
#[case::no_separator("Binary Token Left", "exactly one ':'")]
#[case::two_separators("A : B : C", "found 2")]
#[case::no_name(": Token Value", "missing node name")]
#[case::bad_name("Bin ary : Token Value", "not an identifier")]
#[case::single_token("Literal : Value", "must be '<type> <name>'")]
#[case::trailing_comma("Literal : Token Value,", "empty field entry")]
#[case::double_comma("Binary : Token A,, Token B", "empty field entry")]
#[case::unclosed("Call : List<Expression Arguments", "unclosed bracket")]
#[case::overclosed("Call : List>Expression> Arguments", "unbalanced closing bracket")]
#[case::bad_field_name("Literal : Token 1st", "not an identifier")]
fn test_malformed_lines(#[case] line: &str, #[case] reason: &str) {
    let err = parse_line(line).unwrap_err();
    assert_eq!(err.line, line);
    assert!(
        err.reason.contains(reason),
        "reason '{}' should mention '{}'",
        err.reason,
        reason
    );
}
