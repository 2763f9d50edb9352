//! Go source parser for the genny code generator.
//!
//! This crate provides:
//! - Lexical analysis with Go's automatic semicolon insertion, or a
//!   line-oriented mode that keeps comments and inserts nothing
//! - AST definitions for package clauses, imports, type, const, var and
//!   func declarations
//! - A parser that checks a template is syntactically valid Go and
//!   exposes its declared types
//!
//! Function bodies and initializer expressions are checked for balanced
//! delimiters only.
//!
//! # Example
//!
//! ```
//! use genny_parser::Parser;
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let source = "package list\n\ntype KeyType generic.Type\n";
//!
//! let file = Parser::parse(source, &arena).expect("valid Go");
//! let placeholder = file.type_specs().next().expect("one type");
//! assert_eq!(placeholder.ty.qualified_name(), Some(("generic", "Type")));
//! ```

// Lexer module
pub mod lexer;

// AST module
pub mod ast;

// Re-export commonly used types at crate root
pub use ast::{ParseError, ParseErrorKind, ParseErrors, Parser, SourceFile};
pub use lexer::{LexMode, Lexer, LexerError, Span, Token, TokenKind};
