//! Parse error types for the Go declaration parser.
//!
//! Provides error reporting with source location tracking and a caret
//! diagnostic renderer.

use crate::lexer::{LexerError, Span};
use std::fmt;

/// A parse error with location and diagnostic information.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The type of error that occurred.
    pub kind: ParseErrorKind,
    /// The location in source where the error occurred.
    pub span: Span,
    /// Additional context or message.
    pub message: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    /// Format the error with source context for display.
    pub fn display_with_source(&self, source: &str) -> String {
        let mut output = String::new();

        let line = self.span.line;
        let column = self.span.col;

        output.push_str(&format!("error at {}:{}: {}\n", line, column, self.kind));

        if !self.message.is_empty() {
            output.push_str(&format!("  {}\n", self.message));
        }

        if let Some(line_text) = Self::get_line(source, line) {
            output.push_str("  |\n");
            output.push_str(&format!("{:>3} | {}\n", line, line_text));

            let indent = " ".repeat(column.saturating_sub(1) as usize);
            let pointer = if self.span.len <= 1 {
                "^".to_string()
            } else {
                "^".to_string() + &"~".repeat((self.span.len - 1) as usize)
            };
            output.push_str(&format!("  | {}{}\n", indent, pointer));
        }

        output
    }

    /// Get the text of a specific line (1-indexed).
    fn get_line(source: &str, line_num: u32) -> Option<&str> {
        source.lines().nth((line_num as usize).checked_sub(1)?)
    }
}

impl From<LexerError> for ParseError {
    fn from(error: LexerError) -> Self {
        Self::new(ParseErrorKind::InvalidToken, error.span, error.message)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span, self.kind)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The lexer rejected part of the input.
    InvalidToken,
    /// Expected a specific token but found something else.
    ExpectedToken,
    /// Unexpected end of file.
    UnexpectedEof,
    /// The file does not start with a package clause.
    ExpectedPackage,
    /// Expected a top-level declaration.
    ExpectedDeclaration,
    /// Expected an identifier.
    ExpectedIdentifier,
    /// Expected a type expression.
    ExpectedType,
    /// Mismatched delimiters (brackets, parens, braces).
    MismatchedDelimiter,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseErrorKind::*;
        let msg = match self {
            InvalidToken => "invalid token",
            ExpectedToken => "expected token",
            UnexpectedEof => "unexpected end of file",
            ExpectedPackage => "expected package clause",
            ExpectedDeclaration => "expected declaration",
            ExpectedIdentifier => "expected identifier",
            ExpectedType => "expected type",
            MismatchedDelimiter => "mismatched delimiter",
        };
        write!(f, "{}", msg)
    }
}

/// A collection of parse errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseErrors {
    errors: Vec<ParseError>,
}

impl ParseErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_vec(self) -> Vec<ParseError> {
        self.errors
    }
}

impl From<ParseError> for ParseErrors {
    fn from(error: ParseError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl FromIterator<ParseError> for ParseErrors {
    fn from_iter<T: IntoIterator<Item = ParseError>>(iter: T) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "no errors")
        } else if self.errors.len() == 1 {
            write!(f, "{}", self.errors[0])
        } else {
            writeln!(f, "{} errors:", self.errors.len())?;
            for (i, error) in self.errors.iter().enumerate() {
                writeln!(f, "  {}: {}", i + 1, error)?;
            }
            Ok(())
        }
    }
}

impl std::error::Error for ParseErrors {}
