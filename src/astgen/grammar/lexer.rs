//! Token definitions for a single grammar line
//!
//! Grammar lines only need enough structure to find the name/field separator and the
//! field-list commas that are not nested inside a generic or container type. Everything
//! else is a word whose text is copied verbatim.
use logos::Logos;

/// All tokens that can appear on a grammar line
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum GrammarToken {
    // Path separator, never the name/field separator
    #[token("::")]
    PathSep,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    // Function arrows carry a '>' that must not close a bracket
    #[token("->")]
    Arrow,

    #[token("<")]
    #[token("(")]
    #[token("[")]
    #[token("{")]
    Open,

    #[token(">")]
    #[token(")")]
    #[token("]")]
    #[token("}")]
    Close,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    // Catch-all for identifiers, `$base$`, `?`, `&` and friends
    #[token("-")]
    #[regex(r"[^ \t\r\n\f:,<>()\[\]{}\-]+")]
    Word,
}

impl GrammarToken {
    /// Change in bracket depth caused by this token
    pub fn depth_delta(&self) -> i32 {
        match self {
            GrammarToken::Open => 1,
            GrammarToken::Close => -1,
            _ => 0,
        }
    }
}

/// Tokenize a line, keeping byte spans so callers can slice the original text.
///
/// Returns the byte offset of the first unrecognised character on failure.
pub fn tokenize_with_spans(line: &str) -> Result<Vec<(GrammarToken, logos::Span)>, usize> {
    let mut lexer = GrammarToken::lexer(line);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => return Err(lexer.span().start),
        }
    }

    Ok(tokens)
}
