//! Core parser state and token navigation.
//!
//! The parser works on a pre-lexed token buffer (automatic semicolons
//! inserted, comments dropped). Declaration parsing lives in
//! `decl_parser.rs` and type parsing in `type_parser.rs`.

use bumpalo::Bump;

use crate::ast::decl::SourceFile;
use crate::ast::error::{ParseError, ParseErrorKind, ParseErrors};
use crate::ast::types::{Ident, TypeExpr};
use crate::lexer::{Lexer, Span, Token, TokenKind};

/// Parser for Go source files.
///
/// All AST nodes are allocated in the arena passed to the entry points and
/// stay valid for the arena's lifetime.
pub struct Parser<'ast> {
    /// Lexed tokens, always terminated by an `Eof` token.
    pub(super) buffer: Vec<Token<'ast>>,
    pub(super) position: usize,
    pub(super) arena: &'ast Bump,
}

impl<'ast> Parser<'ast> {
    /// Parse a complete source file.
    ///
    /// Lexer errors are all reported; parsing stops at the first syntax
    /// error.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn parse(source: &str, arena: &'ast Bump) -> Result<SourceFile<'ast>, ParseErrors> {
        let mut parser = Self::from_source(source, arena)?;
        parser.parse_file().map_err(ParseErrors::from)
    }

    /// Parse a standalone type expression, e.g. `map[string]*List[int]`.
    pub fn type_expr(source: &str, arena: &'ast Bump) -> Result<TypeExpr<'ast>, ParseErrors> {
        let mut parser = Self::from_source(source, arena)?;
        let ty = parser.parse_type()?;
        parser.eat(TokenKind::Semicolon);
        if !parser.check(TokenKind::Eof) {
            return Err(parser.unexpected("end of type").into());
        }
        Ok(ty)
    }

    fn from_source(source: &str, arena: &'ast Bump) -> Result<Self, ParseErrors> {
        let mut lexer = Lexer::new(source, arena);
        let mut buffer: Vec<Token<'ast>> = lexer.by_ref().collect();
        buffer.push(lexer.next_token());

        let errors = lexer.take_errors();
        if !errors.is_empty() {
            return Err(errors.into_iter().map(ParseError::from).collect());
        }

        Ok(Self {
            buffer,
            position: 0,
            arena,
        })
    }

    // =========================================
    // Token navigation
    // =========================================

    /// The current token. Past the end this is the `Eof` token.
    pub(super) fn peek(&self) -> &Token<'ast> {
        self.peek_nth(0)
    }

    pub(super) fn peek_nth(&self, n: usize) -> &Token<'ast> {
        let last = self.buffer.len() - 1;
        &self.buffer[(self.position + n).min(last)]
    }

    pub(super) fn advance(&mut self) -> Token<'ast> {
        let token = *self.peek();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> Option<Token<'ast>> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    pub(super) fn expect(&mut self, kind: TokenKind) -> Result<Token<'ast>, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.description()))
        }
    }

    pub(super) fn expect_ident(&mut self) -> Result<Ident<'ast>, ParseError> {
        let token = *self.peek();
        if token.kind == TokenKind::Identifier {
            self.advance();
            Ok(Ident::new(token.lexeme, token.span))
        } else {
            Err(ParseError::new(
                ParseErrorKind::ExpectedIdentifier,
                token.span,
                format!("expected identifier, found {}", token.kind),
            ))
        }
    }

    /// Expect the end of a declaration or spec.
    ///
    /// As in Go, the semicolon may be omitted before a closing `)` or `}`.
    pub(super) fn expect_semicolon(&mut self) -> Result<(), ParseError> {
        match self.peek().kind {
            TokenKind::Semicolon => {
                self.advance();
                Ok(())
            }
            TokenKind::RightParen | TokenKind::RightBrace | TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected("';' or newline")),
        }
    }

    /// Span of the most recently consumed token.
    pub(super) fn prev_span(&self) -> Span {
        self.position
            .checked_sub(1)
            .and_then(|i| self.buffer.get(i))
            .map(|t| t.span)
            .unwrap_or_default()
    }

    /// Span from `start` up to the most recently consumed token.
    pub(super) fn span_from(&self, start: Span) -> Span {
        start.merge(self.prev_span())
    }

    pub(super) fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        if token.kind == TokenKind::Eof {
            ParseError::new(
                ParseErrorKind::UnexpectedEof,
                token.span,
                format!("expected {}", expected),
            )
        } else {
            ParseError::new(
                ParseErrorKind::ExpectedToken,
                token.span,
                format!("expected {}, found {}", expected, token.kind),
            )
        }
    }

    // =========================================
    // Delimiter balancing
    // =========================================

    /// Skip a delimited group starting at the current opening token,
    /// e.g. a function body.
    pub(super) fn skip_group(&mut self) -> Result<(), ParseError> {
        let open = self.advance();
        let Some(close) = closer_of(open.kind) else {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedToken,
                open.span,
                format!("expected '(', '[' or '{{', found {}", open.kind),
            ));
        };

        let mut stack = vec![(close, open.span)];
        while let Some(&(expected, opened_at)) = stack.last() {
            let token = self.advance();
            match token.kind {
                TokenKind::Eof => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedEof,
                        opened_at,
                        format!("unclosed delimiter, expected {}", expected),
                    ));
                }
                kind if kind == expected => {
                    stack.pop();
                }
                kind => {
                    if let Some(close) = closer_of(kind) {
                        stack.push((close, token.span));
                    } else if is_closer(kind) {
                        return Err(mismatched(expected, token));
                    }
                }
            }
        }
        Ok(())
    }

    /// Skip an expression up to a `stop` token or an unmatched closing
    /// delimiter at nesting depth zero. Nothing past the expression is
    /// consumed.
    ///
    /// Returns the skipped source text with single spaces between tokens.
    pub(super) fn skip_expression(&mut self, stops: &[TokenKind]) -> Result<&'ast str, ParseError> {
        let start = self.position;
        let mut stack: Vec<TokenKind> = Vec::new();

        loop {
            let token = *self.peek();
            if token.kind == TokenKind::Eof {
                break;
            }
            if stack.is_empty() && (stops.contains(&token.kind) || is_closer(token.kind)) {
                break;
            }

            if let Some(close) = closer_of(token.kind) {
                stack.push(close);
            } else if is_closer(token.kind) {
                match stack.pop() {
                    Some(expected) if expected == token.kind => {}
                    Some(expected) => return Err(mismatched(expected, token)),
                    None => break,
                }
            }
            self.advance();
        }

        if self.position == start {
            return Err(self.unexpected("expression"));
        }

        let text = self.buffer[start..self.position]
            .iter()
            .map(|t| t.text())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(self.arena.alloc_str(&text))
    }

    /// Kind of the token following the group that opens `n` tokens ahead.
    pub(super) fn kind_after_group(&self, n: usize) -> TokenKind {
        let mut depth = 0usize;
        let mut i = n;
        loop {
            let kind = self.peek_nth(i).kind;
            match kind {
                TokenKind::Eof => return kind,
                k if closer_of(k).is_some() => depth += 1,
                k if is_closer(k) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return self.peek_nth(i + 1).kind;
                    }
                }
                _ => {}
            }
            i += 1;
        }
    }
}

fn closer_of(kind: TokenKind) -> Option<TokenKind> {
    match kind {
        TokenKind::LeftParen => Some(TokenKind::RightParen),
        TokenKind::LeftBracket => Some(TokenKind::RightBracket),
        TokenKind::LeftBrace => Some(TokenKind::RightBrace),
        _ => None,
    }
}

fn is_closer(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightBrace
    )
}

fn mismatched(expected: TokenKind, found: Token<'_>) -> ParseError {
    ParseError::new(
        ParseErrorKind::MismatchedDelimiter,
        found.span,
        format!("expected {}, found {}", expected, found.kind),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser<'ast>(source: &str, arena: &'ast Bump) -> Parser<'ast> {
        Parser::from_source(source, arena).expect("lexes")
    }

    #[test]
    fn peek_past_end_is_eof() {
        let arena = Bump::new();
        let mut p = parser("x", &arena);
        assert_eq!(p.advance().kind, TokenKind::Identifier);
        assert_eq!(p.advance().kind, TokenKind::Semicolon);
        assert_eq!(p.peek_nth(5).kind, TokenKind::Eof);
        assert_eq!(p.advance().kind, TokenKind::Eof);
        assert_eq!(p.advance().kind, TokenKind::Eof);
    }

    #[test]
    fn skip_group_balances_nested_delimiters() {
        let arena = Bump::new();
        let mut p = parser("{ if x { f(a[1]) } } y", &arena);
        p.skip_group().expect("balanced");
        assert_eq!(p.peek().lexeme, "y");
    }

    #[test]
    fn skip_group_reports_mismatch() {
        let arena = Bump::new();
        let mut p = parser("{ f(a] }", &arena);
        let error = p.skip_group().unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::MismatchedDelimiter);
    }

    #[test]
    fn skip_group_reports_unclosed() {
        let arena = Bump::new();
        let mut p = parser("{ f(a)", &arena);
        let error = p.skip_group().unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn skip_expression_stops_at_depth_zero() {
        let arena = Bump::new();
        let mut p = parser("New(1, 2) + x[3] )", &arena);
        let text = p.skip_expression(&[TokenKind::Semicolon]).expect("skips");
        assert_eq!(text, "New ( 1 , 2 ) + x [ 3 ]");
        assert!(p.check(TokenKind::RightParen));
    }

    #[test]
    fn skip_expression_requires_tokens() {
        let arena = Bump::new();
        let mut p = parser("]", &arena);
        assert!(p.skip_expression(&[]).is_err());
    }

    #[test]
    fn kind_after_group_looks_past_brackets() {
        let arena = Bump::new();
        let p = parser("List[Map[K]V] )", &arena);
        assert_eq!(p.kind_after_group(1), TokenKind::RightParen);
    }

    #[test]
    fn lexer_errors_are_all_reported() {
        let arena = Bump::new();
        let errors = Parser::parse("package a\nvar x = $ + $\n", &arena).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.errors()[0].kind, ParseErrorKind::InvalidToken);
    }

    #[test]
    fn standalone_type_expression() {
        let arena = Bump::new();
        let ty = Parser::type_expr("generic.Type", &arena).expect("parses");
        assert_eq!(ty.qualified_name(), Some(("generic", "Type")));
        assert!(Parser::type_expr("int int", &arena).is_err());
    }
}
