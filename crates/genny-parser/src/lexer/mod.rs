//! Lexical analysis for Go source text.

mod cursor;
mod error;
mod lexer;
mod span;
mod token;

pub use error::LexerError;
pub use lexer::{LexMode, Lexer};
pub use span::Span;
pub use token::{Token, TokenKind};
