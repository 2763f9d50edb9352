//! Abstract Syntax Tree (AST) for Go declarations.
//!
//! This module provides:
//! - AST nodes for the package clause, imports and top-level declarations
//! - Type expressions for every Go type literal form
//! - Parser for transforming tokens into AST
//! - Error types and reporting
//!
//! # Example
//!
//! ```
//! use genny_parser::Parser;
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let source = "package queue\n\ntype Something generic.Type\n";
//!
//! match Parser::parse(source, &arena) {
//!     Ok(file) => println!("package {}: {} decls", file.package.name, file.decls.len()),
//!     Err(errors) => eprintln!("Parse errors: {}", errors),
//! }
//! ```

pub mod error;

mod parser;
mod type_parser;
pub mod types;

pub mod decl;
mod decl_parser;

pub use decl::*;
pub use error::{ParseError, ParseErrorKind, ParseErrors};
pub use parser::Parser;
pub use types::*;
