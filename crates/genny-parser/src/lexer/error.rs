//! Lexer error types.

use super::span::Span;
use std::fmt;

/// An error encountered during lexical analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct LexerError {
    /// Location in source where the error occurred.
    pub span: Span,
    /// Human-readable error message.
    pub message: String,
}

impl LexerError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    pub fn unexpected_char(ch: char, span: Span) -> Self {
        Self::new(span, format!("unexpected character '{}'", ch.escape_default()))
    }

    pub fn unterminated_string(span: Span) -> Self {
        Self::new(span, "string literal not terminated")
    }

    pub fn unterminated_raw_string(span: Span) -> Self {
        Self::new(span, "raw string literal not terminated")
    }

    pub fn unterminated_rune(span: Span) -> Self {
        Self::new(span, "rune literal not terminated")
    }

    pub fn unterminated_comment(span: Span) -> Self {
        Self::new(span, "comment not terminated (expected closing `*/`)")
    }

    pub fn invalid_number(span: Span, detail: impl Into<String>) -> Self {
        Self::new(span, format!("invalid number literal: {}", detail.into()))
    }
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LexerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let span = Span::new(2, 7, 1);
        assert_eq!(
            LexerError::unexpected_char('$', span).to_string(),
            "unexpected character '$'"
        );
        assert_eq!(
            LexerError::invalid_number(span, "expected hex digits").to_string(),
            "invalid number literal: expected hex digits"
        );
        assert_eq!(LexerError::unterminated_rune(span).span, span);
    }
}
