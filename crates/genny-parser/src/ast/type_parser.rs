//! Type expression parsing.
//!
//! Handles every type literal form, function signatures with Go's
//! name/type parameter ambiguity, type parameter lists and constraints.

use bumpalo::collections::Vec as BumpVec;

use super::parser::Parser;
use crate::ast::error::{ParseError, ParseErrorKind};
use crate::ast::types::*;
use crate::lexer::TokenKind;

/// A parameter list entry before Go's grouping rules are applied.
#[derive(Clone, Copy)]
struct RawParam<'ast> {
    name: Option<Ident<'ast>>,
    ty: Option<TypeExpr<'ast>>,
    variadic: bool,
}

impl<'ast> Parser<'ast> {
    /// Parse a type expression.
    pub(super) fn parse_type(&mut self) -> Result<TypeExpr<'ast>, ParseError> {
        let start = self.peek().span;

        match self.peek().kind {
            TokenKind::Identifier => self.parse_named_type().map(TypeExpr::Named),
            TokenKind::Star => {
                self.advance();
                let elem = self.parse_type()?;
                Ok(TypeExpr::Pointer {
                    elem: self.alloc_type(elem),
                    span: self.span_from(start),
                })
            }
            TokenKind::LeftBracket => {
                self.advance();
                if self.eat(TokenKind::RightBracket).is_some() {
                    let elem = self.parse_type()?;
                    return Ok(TypeExpr::Slice {
                        elem: self.alloc_type(elem),
                        span: self.span_from(start),
                    });
                }
                let len = if self.check(TokenKind::Ellipsis) {
                    self.advance().lexeme
                } else {
                    self.skip_expression(&[])?
                };
                self.expect(TokenKind::RightBracket)?;
                let elem = self.parse_type()?;
                Ok(TypeExpr::Array {
                    len,
                    elem: self.alloc_type(elem),
                    span: self.span_from(start),
                })
            }
            TokenKind::Map => {
                self.advance();
                self.expect(TokenKind::LeftBracket)?;
                let key = self.parse_type()?;
                self.expect(TokenKind::RightBracket)?;
                let value = self.parse_type()?;
                Ok(TypeExpr::Map {
                    key: self.alloc_type(key),
                    value: self.alloc_type(value),
                    span: self.span_from(start),
                })
            }
            TokenKind::Chan => {
                self.advance();
                let dir = if self.eat(TokenKind::Arrow).is_some() {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                let elem = self.parse_type()?;
                Ok(TypeExpr::Chan {
                    dir,
                    elem: self.alloc_type(elem),
                    span: self.span_from(start),
                })
            }
            TokenKind::Arrow => {
                self.advance();
                self.expect(TokenKind::Chan)?;
                let elem = self.parse_type()?;
                Ok(TypeExpr::Chan {
                    dir: ChanDir::Recv,
                    elem: self.alloc_type(elem),
                    span: self.span_from(start),
                })
            }
            TokenKind::Func => {
                self.advance();
                let signature = self.parse_signature()?;
                Ok(TypeExpr::Func(self.arena.alloc(signature)))
            }
            TokenKind::Struct => self.parse_struct_type(),
            TokenKind::Interface => self.parse_interface_type(),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_type()?;
                self.expect(TokenKind::RightParen)?;
                Ok(TypeExpr::Paren {
                    inner: self.alloc_type(inner),
                    span: self.span_from(start),
                })
            }
            kind => Err(ParseError::new(
                ParseErrorKind::ExpectedType,
                start,
                format!("expected type, found {}", kind),
            )),
        }
    }

    /// `[ PackageName "." ] TypeName [ TypeArgs ]`
    fn parse_named_type(&mut self) -> Result<NamedType<'ast>, ParseError> {
        let first = self.expect_ident()?;

        let (package, name) = if self.eat(TokenKind::Dot).is_some() {
            (Some(first), self.expect_ident()?)
        } else {
            (None, first)
        };

        let args: &'ast [TypeExpr<'ast>] = if self.check(TokenKind::LeftBracket) {
            self.parse_type_args()?
        } else {
            &[]
        };

        Ok(NamedType {
            package,
            name,
            args,
            span: self.span_from(first.span),
        })
    }

    fn parse_type_args(&mut self) -> Result<&'ast [TypeExpr<'ast>], ParseError> {
        self.expect(TokenKind::LeftBracket)?;
        let mut args = BumpVec::new_in(self.arena);
        while !self.check(TokenKind::RightBracket) {
            args.push(self.parse_type()?);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RightBracket)?;
        Ok(args.into_bump_slice())
    }

    /// `Parameters [ Result ]`, after the `func` keyword and any name.
    pub(super) fn parse_signature(&mut self) -> Result<Signature<'ast>, ParseError> {
        let start = self.peek().span;
        let params = self.parse_params()?;
        let results = self.parse_results()?;
        Ok(Signature {
            type_params: &[],
            params,
            results,
            span: self.span_from(start),
        })
    }

    fn parse_results(&mut self) -> Result<&'ast [Param<'ast>], ParseError> {
        match self.peek().kind {
            TokenKind::LeftParen => self.parse_params(),
            TokenKind::Identifier
            | TokenKind::Star
            | TokenKind::LeftBracket
            | TokenKind::Map
            | TokenKind::Chan
            | TokenKind::Arrow
            | TokenKind::Func
            | TokenKind::Struct
            | TokenKind::Interface => {
                let ty = self.parse_type()?;
                Ok(self.arena.alloc_slice_copy(&[Param {
                    name: None,
                    ty,
                    variadic: false,
                }]))
            }
            _ => Ok(&[]),
        }
    }

    /// Parse a parenthesized parameter list.
    ///
    /// Either every entry is named (`a, b int, c string`) or none is
    /// (`int, string`). In the named form a bare identifier takes the type
    /// of the next typed entry; in the unnamed form it is a type name.
    pub(super) fn parse_params(&mut self) -> Result<&'ast [Param<'ast>], ParseError> {
        let open = self.expect(TokenKind::LeftParen)?.span;
        let mut raw: Vec<RawParam<'ast>> = Vec::new();

        while !self.check(TokenKind::RightParen) {
            raw.push(self.parse_raw_param()?);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RightParen)?;

        let named = raw.iter().any(|p| p.name.is_some() && p.ty.is_some());
        let mut params = BumpVec::with_capacity_in(raw.len(), self.arena);

        if named {
            let mut carried: Option<TypeExpr<'ast>> = None;
            let mut resolved = Vec::with_capacity(raw.len());
            for entry in raw.iter().rev() {
                let param = match (entry.name, entry.ty) {
                    (Some(name), Some(ty)) => {
                        carried = Some(ty);
                        Param {
                            name: Some(name),
                            ty,
                            variadic: entry.variadic,
                        }
                    }
                    (Some(name), None) => match carried {
                        Some(ty) => Param {
                            name: Some(name),
                            ty,
                            variadic: false,
                        },
                        None => {
                            return Err(ParseError::new(
                                ParseErrorKind::ExpectedType,
                                name.span,
                                format!("missing type for parameter '{}'", name.name),
                            ));
                        }
                    },
                    _ => {
                        return Err(ParseError::new(
                            ParseErrorKind::ExpectedIdentifier,
                            open,
                            "mixed named and unnamed parameters",
                        ));
                    }
                };
                resolved.push(param);
            }
            params.extend(resolved.into_iter().rev());
        } else {
            for entry in raw {
                let ty = match (entry.ty, entry.name) {
                    (Some(ty), _) => ty,
                    (None, Some(name)) => TypeExpr::Named(NamedType {
                        package: None,
                        name,
                        args: &[],
                        span: name.span,
                    }),
                    (None, None) => continue,
                };
                params.push(Param {
                    name: None,
                    ty,
                    variadic: entry.variadic,
                });
            }
        }

        Ok(params.into_bump_slice())
    }

    fn parse_raw_param(&mut self) -> Result<RawParam<'ast>, ParseError> {
        if self.eat(TokenKind::Ellipsis).is_some() {
            return Ok(RawParam {
                name: None,
                ty: Some(self.parse_type()?),
                variadic: true,
            });
        }

        if !self.check(TokenKind::Identifier) {
            return Ok(RawParam {
                name: None,
                ty: Some(self.parse_type()?),
                variadic: false,
            });
        }

        let is_type = match self.peek_nth(1).kind {
            TokenKind::Comma | TokenKind::RightParen => {
                let ident = self.expect_ident()?;
                return Ok(RawParam {
                    name: Some(ident),
                    ty: None,
                    variadic: false,
                });
            }
            TokenKind::Dot => true,
            // `List[int])` is an instantiated type, `xs []int` a named one.
            TokenKind::LeftBracket => matches!(
                self.kind_after_group(1),
                TokenKind::Comma | TokenKind::RightParen
            ),
            _ => false,
        };

        if is_type {
            return Ok(RawParam {
                name: None,
                ty: Some(self.parse_type()?),
                variadic: false,
            });
        }

        let name = self.expect_ident()?;
        let variadic = self.eat(TokenKind::Ellipsis).is_some();
        let ty = self.parse_type()?;
        Ok(RawParam {
            name: Some(name),
            ty: Some(ty),
            variadic,
        })
    }

    /// `[ K, V any, N ~int | ~float64 ]`
    pub(super) fn parse_type_params(&mut self) -> Result<&'ast [TypeParam<'ast>], ParseError> {
        self.expect(TokenKind::LeftBracket)?;
        let mut groups = BumpVec::new_in(self.arena);

        loop {
            let mut names = BumpVec::new_in(self.arena);
            names.push(self.expect_ident()?);
            while self.eat(TokenKind::Comma).is_some() {
                names.push(self.expect_ident()?);
            }
            let constraint = self.parse_constraint()?;
            groups.push(TypeParam {
                names: names.into_bump_slice(),
                constraint,
            });

            if self.eat(TokenKind::Comma).is_none() || self.check(TokenKind::RightBracket) {
                break;
            }
        }

        self.expect(TokenKind::RightBracket)?;
        Ok(groups.into_bump_slice())
    }

    fn parse_constraint(&mut self) -> Result<&'ast [ConstraintTerm<'ast>], ParseError> {
        let mut terms = BumpVec::new_in(self.arena);
        loop {
            let tilde = self.eat(TokenKind::Tilde).is_some();
            let ty = self.parse_type()?;
            terms.push(ConstraintTerm { tilde, ty });
            if self.eat(TokenKind::Pipe).is_none() {
                break;
            }
        }
        Ok(terms.into_bump_slice())
    }

    fn parse_struct_type(&mut self) -> Result<TypeExpr<'ast>, ParseError> {
        let start = self.expect(TokenKind::Struct)?.span;
        self.expect(TokenKind::LeftBrace)?;

        let mut fields = BumpVec::new_in(self.arena);
        while !self.check(TokenKind::RightBrace) && !self.check(TokenKind::Eof) {
            fields.push(self.parse_field()?);
            self.expect_semicolon()?;
        }
        self.expect(TokenKind::RightBrace)?;

        Ok(TypeExpr::Struct {
            fields: fields.into_bump_slice(),
            span: self.span_from(start),
        })
    }

    fn parse_field(&mut self) -> Result<Field<'ast>, ParseError> {
        let embedded = match self.peek().kind {
            TokenKind::Star => true,
            TokenKind::Identifier => match self.peek_nth(1).kind {
                TokenKind::Dot => true,
                TokenKind::LeftBracket => ends_field(self.kind_after_group(1)),
                kind => ends_field(kind),
            },
            kind => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedIdentifier,
                    self.peek().span,
                    format!("expected field name or embedded type, found {}", kind),
                ));
            }
        };

        let names: &'ast [Ident<'ast>] = if embedded {
            &[]
        } else {
            let mut names = BumpVec::new_in(self.arena);
            names.push(self.expect_ident()?);
            while self.eat(TokenKind::Comma).is_some() {
                names.push(self.expect_ident()?);
            }
            names.into_bump_slice()
        };

        let ty = self.parse_type()?;

        let tag = match self.peek().kind {
            TokenKind::StringLiteral | TokenKind::RawStringLiteral => Some(self.advance().lexeme),
            _ => None,
        };

        Ok(Field { names, ty, tag })
    }

    fn parse_interface_type(&mut self) -> Result<TypeExpr<'ast>, ParseError> {
        let start = self.expect(TokenKind::Interface)?.span;
        self.expect(TokenKind::LeftBrace)?;

        let mut elems = BumpVec::new_in(self.arena);
        while !self.check(TokenKind::RightBrace) && !self.check(TokenKind::Eof) {
            let elem = if self.check(TokenKind::Identifier)
                && self.peek_nth(1).kind == TokenKind::LeftParen
            {
                let name = self.expect_ident()?;
                InterfaceElem::Method {
                    name,
                    signature: self.parse_signature()?,
                }
            } else {
                InterfaceElem::Union(self.parse_constraint()?)
            };
            elems.push(elem);
            self.expect_semicolon()?;
        }
        self.expect(TokenKind::RightBrace)?;

        Ok(TypeExpr::Interface {
            elems: elems.into_bump_slice(),
            span: self.span_from(start),
        })
    }

    fn alloc_type(&self, ty: TypeExpr<'ast>) -> &'ast TypeExpr<'ast> {
        self.arena.alloc(ty)
    }
}

/// Whether `kind` can follow the type of an embedded field.
fn ends_field(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Semicolon
            | TokenKind::RightBrace
            | TokenKind::StringLiteral
            | TokenKind::RawStringLiteral
    )
}
