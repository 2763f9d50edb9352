//! Declaration parsing for Go source files.
//!
//! Grammar (from the Go specification, "Source file organization"):
//!
//! ```text
//! SourceFile = PackageClause ";" { ImportDecl ";" } { TopLevelDecl ";" } .
//! ```

use bumpalo::collections::Vec as BumpVec;

use super::parser::Parser;
use crate::ast::decl::*;
use crate::ast::error::{ParseError, ParseErrorKind};
use crate::ast::types::{Ident, TypeParam};
use crate::lexer::{Span, TokenKind};

impl<'ast> Parser<'ast> {
    pub(super) fn parse_file(&mut self) -> Result<SourceFile<'ast>, ParseError> {
        let start = self.peek().span;

        if !self.check(TokenKind::Package) {
            let token = self.peek();
            return Err(ParseError::new(
                ParseErrorKind::ExpectedPackage,
                token.span,
                format!("expected 'package', found {}", token.kind),
            ));
        }
        self.advance();
        let package = self.expect_ident()?;
        self.expect_semicolon()?;

        let mut decls = BumpVec::new_in(self.arena);

        while self.check(TokenKind::Import) {
            decls.push(Decl::Gen(self.parse_gen_decl(DeclKeyword::Import)?));
            self.expect_semicolon()?;
        }

        while !self.check(TokenKind::Eof) {
            let decl = match self.peek().kind {
                TokenKind::Const => Decl::Gen(self.parse_gen_decl(DeclKeyword::Const)?),
                TokenKind::Var => Decl::Gen(self.parse_gen_decl(DeclKeyword::Var)?),
                TokenKind::Type => Decl::Gen(self.parse_gen_decl(DeclKeyword::Type)?),
                TokenKind::Func => Decl::Func(self.parse_func_decl()?),
                TokenKind::Import => {
                    return Err(ParseError::new(
                        ParseErrorKind::ExpectedDeclaration,
                        self.peek().span,
                        "imports must appear before other declarations",
                    ));
                }
                kind => {
                    return Err(ParseError::new(
                        ParseErrorKind::ExpectedDeclaration,
                        self.peek().span,
                        format!("expected declaration, found {}", kind),
                    ));
                }
            };
            decls.push(decl);
            self.expect_semicolon()?;
        }

        Ok(SourceFile {
            package,
            decls: decls.into_bump_slice(),
            span: self.span_from(start),
        })
    }

    /// Parse `keyword Spec` or `keyword ( { Spec ";" } )`.
    fn parse_gen_decl(&mut self, keyword: DeclKeyword) -> Result<GenDecl<'ast>, ParseError> {
        let start = self.advance().span;
        let mut specs = BumpVec::new_in(self.arena);

        let grouped = self.eat(TokenKind::LeftParen).is_some();
        if grouped {
            while !self.check(TokenKind::RightParen) && !self.check(TokenKind::Eof) {
                specs.push(self.parse_spec(keyword)?);
                self.expect_semicolon()?;
            }
            self.expect(TokenKind::RightParen)?;
        } else {
            specs.push(self.parse_spec(keyword)?);
        }

        Ok(GenDecl {
            keyword,
            grouped,
            specs: specs.into_bump_slice(),
            span: self.span_from(start),
        })
    }

    fn parse_spec(&mut self, keyword: DeclKeyword) -> Result<Spec<'ast>, ParseError> {
        match keyword {
            DeclKeyword::Import => self.parse_import_spec().map(Spec::Import),
            DeclKeyword::Type => self.parse_type_spec().map(Spec::Type),
            DeclKeyword::Const | DeclKeyword::Var => self.parse_value_spec().map(Spec::Value),
        }
    }

    /// `[ "." | PackageName ] ImportPath`
    fn parse_import_spec(&mut self) -> Result<ImportSpec<'ast>, ParseError> {
        let start = self.peek().span;

        let name = match self.peek().kind {
            TokenKind::Identifier => Some(self.expect_ident()?),
            TokenKind::Dot => {
                let dot = self.advance();
                Some(Ident::new(dot.lexeme, dot.span))
            }
            _ => None,
        };

        let path = match self.peek().kind {
            TokenKind::StringLiteral | TokenKind::RawStringLiteral => self.advance().lexeme,
            _ => return Err(self.unexpected("import path")),
        };

        Ok(ImportSpec {
            name,
            path,
            span: self.span_from(start),
        })
    }

    /// `identifier [ TypeParameters ] [ "=" ] Type`
    fn parse_type_spec(&mut self) -> Result<TypeSpec<'ast>, ParseError> {
        let name = self.expect_ident()?;

        let type_params: &'ast [TypeParam<'ast>] =
            if self.check(TokenKind::LeftBracket) && self.at_type_params() {
                self.parse_type_params()?
            } else {
                &[]
            };

        let alias = self.eat(TokenKind::Equal).is_some();
        let ty = self.parse_type()?;

        Ok(TypeSpec {
            name,
            type_params,
            alias,
            ty,
            span: self.span_from(name.span),
        })
    }

    /// Decide whether `[` after a type name opens type parameters or an
    /// array length.
    ///
    /// `type A [N]int` and `type A [pkg.N]int` are arrays; `type L[T any]`
    /// and `type L[K, V any]` declare type parameters. `[P *C]` is an array
    /// length unless `C` starts a type literal or the brackets hold a
    /// top-level comma, as in `[P *C,]`.
    fn at_type_params(&self) -> bool {
        if self.peek_nth(1).kind != TokenKind::Identifier {
            return false;
        }
        match self.peek_nth(2).kind {
            TokenKind::Star => {
                starts_type_literal(self.peek_nth(3).kind) || self.bracket_has_comma()
            }
            TokenKind::Identifier
            | TokenKind::Comma
            | TokenKind::Tilde
            | TokenKind::LeftBracket
            | TokenKind::LeftParen
            | TokenKind::Interface
            | TokenKind::Func
            | TokenKind::Map
            | TokenKind::Chan
            | TokenKind::Struct
            | TokenKind::Arrow => true,
            _ => false,
        }
    }

    /// Whether the bracket group at the current `[` contains a comma at
    /// its own depth.
    fn bracket_has_comma(&self) -> bool {
        let mut depth = 0usize;
        for n in 1.. {
            match self.peek_nth(n).kind {
                TokenKind::Eof => return false,
                TokenKind::LeftBracket | TokenKind::LeftParen | TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBracket | TokenKind::RightParen | TokenKind::RightBrace => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                TokenKind::Comma if depth == 0 => return true,
                _ => {}
            }
        }
        false
    }

    /// `IdentifierList [ Type ] [ "=" ExpressionList ]`
    fn parse_value_spec(&mut self) -> Result<ValueSpec<'ast>, ParseError> {
        let first = self.expect_ident()?;
        let mut names = BumpVec::new_in(self.arena);
        names.push(first);
        while self.eat(TokenKind::Comma).is_some() {
            names.push(self.expect_ident()?);
        }

        let ty = match self.peek().kind {
            TokenKind::Equal | TokenKind::Semicolon | TokenKind::RightParen | TokenKind::Eof => None,
            _ => Some(self.parse_type()?),
        };

        let has_values = self.eat(TokenKind::Equal).is_some();
        if has_values {
            self.skip_expression(&[TokenKind::Semicolon])?;
        }

        Ok(ValueSpec {
            names: names.into_bump_slice(),
            ty,
            has_values,
            span: self.span_from(first.span),
        })
    }

    /// `func [ Receiver ] Name [ TypeParameters ] Signature [ FunctionBody ]`
    fn parse_func_decl(&mut self) -> Result<FuncDecl<'ast>, ParseError> {
        let start: Span = self.expect(TokenKind::Func)?.span;

        let receiver = if self.check(TokenKind::LeftParen) {
            let open = self.peek().span;
            let params = self.parse_params()?;
            match params {
                [receiver] => Some(*receiver),
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::ExpectedToken,
                        open,
                        format!("method has {} receivers, expected exactly one", params.len()),
                    ));
                }
            }
        } else {
            None
        };

        let name = self.expect_ident()?;

        let type_params: &'ast [TypeParam<'ast>] = if self.check(TokenKind::LeftBracket) {
            self.parse_type_params()?
        } else {
            &[]
        };

        let mut signature = self.parse_signature()?;
        signature.type_params = type_params;

        let has_body = self.check(TokenKind::LeftBrace);
        if has_body {
            self.skip_group()?;
        }

        Ok(FuncDecl {
            receiver,
            name,
            signature,
            has_body,
            span: self.span_from(start),
        })
    }
}

/// Tokens that can only begin a type, never an expression operand.
fn starts_type_literal(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::LeftBracket
            | TokenKind::Struct
            | TokenKind::Func
            | TokenKind::Interface
            | TokenKind::Map
            | TokenKind::Chan
            | TokenKind::Arrow
            | TokenKind::Tilde
    )
}
