//! Source location tracking for the lexer.
//!
//! Provides [`Span`] to track where tokens and errors occur in a Go
//! template.

use std::fmt;

/// A span of source code, represented by its starting position.
///
/// Similar to Rust compiler diagnostics, we track the line:column
/// where a token starts for debugging and error reporting.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, byte-based).
    pub col: u32,
    /// Length in bytes.
    pub len: u32,
}

impl Span {
    /// Create a new span from a line, column, and length.
    #[inline]
    pub fn new(line: u32, col: u32, len: u32) -> Self {
        Self { line, col, len }
    }

    /// Create a zero-length span at a position.
    #[inline]
    pub fn point(line: u32, col: u32) -> Self {
        Self { line, col, len: 0 }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Merge two spans into one that starts at `self` and covers `other`.
    ///
    /// Spans on different lines keep the first position and sum the lengths.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        if self.line == other.line {
            let start_col = self.col.min(other.col);
            let end_col = (other.col + other.len).max(self.col + self.len);
            Span {
                line: self.line,
                col: start_col,
                len: end_col - start_col,
            }
        } else {
            Span {
                line: self.line,
                col: self.col,
                len: self.len + other.len,
            }
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
