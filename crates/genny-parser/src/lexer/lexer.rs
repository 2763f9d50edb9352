//! Main lexer implementation for Go source.
//!
//! The [`Lexer`] converts source text into a stream of [`Token`]s.
//! It uses direct dispatch based on the first character.
//!
//! Two behaviours are switchable through [`LexMode`]:
//! - `COMMENTS`: comments are returned as [`TokenKind::Comment`] tokens
//!   instead of being skipped.
//! - `SEMICOLONS`: semicolons are inserted automatically at line ends, as
//!   the Go specification requires for parsing.
//!
//! The lexer copies all string content (identifiers, literals) into the arena,
//! allowing the source string to be freed after lexing completes.

use bitflags::bitflags;
use bumpalo::Bump;

use super::cursor::{Cursor, is_ident_continue, is_ident_start};
use super::error::LexerError;
use super::span::Span;
use super::token::{Token, TokenKind, lookup_keyword};

bitflags! {
    /// Scanning options for [`Lexer`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LexMode: u8 {
        /// Return comments as tokens.
        const COMMENTS = 1 << 0;
        /// Insert semicolons at line ends following the Go rules.
        const SEMICOLONS = 1 << 1;
    }
}

/// Start position of the token being scanned.
#[derive(Clone, Copy)]
struct Mark {
    line: u32,
    col: u32,
    offset: u32,
}

/// Lexer for Go source code.
///
/// The `'src` lifetime is the source string being lexed (temporary).
/// The `'ast` lifetime is the arena where token lexemes are allocated (persists).
pub struct Lexer<'src, 'ast> {
    /// Low-level character cursor.
    cursor: Cursor<'src>,
    /// Arena for allocating token lexemes.
    arena: &'ast Bump,
    mode: LexMode,
    /// Whether a newline at this point would end the statement.
    insert_semi: bool,
    /// Accumulated errors.
    errors: Vec<LexerError>,
}

impl<'src, 'ast> Lexer<'src, 'ast> {
    /// Create a lexer for parsing: comments skipped, semicolons inserted.
    pub fn new(source: &'src str, arena: &'ast Bump) -> Self {
        Self::with_mode(source, arena, LexMode::SEMICOLONS)
    }

    /// Create a lexer with explicit scanning options.
    pub fn with_mode(source: &'src str, arena: &'ast Bump, mode: LexMode) -> Self {
        Self {
            cursor: Cursor::new(source),
            arena,
            mode,
            insert_semi: false,
            errors: Vec::new(),
        }
    }

    /// Take accumulated errors, leaving an empty vec.
    pub fn take_errors(&mut self) -> Vec<LexerError> {
        std::mem::take(&mut self.errors)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> Token<'ast> {
        let token = self.scan_token();
        if !matches!(token.kind, TokenKind::Comment | TokenKind::Error) {
            self.insert_semi = token.kind.ends_statement();
        }
        token
    }

    // =========================================
    // Internal: Token scanning
    // =========================================

    fn scan_token(&mut self) -> Token<'ast> {
        if let Some(semicolon) = self.skip_whitespace() {
            return semicolon;
        }

        let mark = self.mark();

        if self.cursor.is_eof() {
            if self.pending_semicolon() {
                self.insert_semi = false;
                return self.make_auto_semicolon(mark);
            }
            return self.make_eof();
        }

        // A comment running to the end of the line ends the statement
        // before the comment itself is seen.
        if self.pending_semicolon() && self.comment_ends_line() {
            self.insert_semi = false;
            return self.make_auto_semicolon(mark);
        }

        let Some(c) = self.cursor.peek() else {
            return self.make_eof();
        };

        match c {
            '/' => self.scan_slash(mark),
            '"' => self.scan_string(mark),
            '`' => self.scan_raw_string(mark),
            '\'' => self.scan_rune(mark),
            c if c.is_ascii_digit() => self.scan_number(mark),
            '.' if self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.scan_number(mark)
            }
            c if is_ident_start(c) => self.scan_identifier(mark),
            _ => self.scan_operator(mark),
        }
    }

    /// Skip whitespace and BOM, producing an automatic semicolon when a
    /// newline ends a statement.
    fn skip_whitespace(&mut self) -> Option<Token<'ast>> {
        if self.cursor.check_str("\u{FEFF}") {
            self.cursor.advance_bytes(3);
        }

        while let Some(c) = self.cursor.peek() {
            match c {
                '\n' if self.pending_semicolon() => {
                    let mark = self.mark();
                    self.cursor.advance();
                    self.insert_semi = false;
                    return Some(self.make_auto_semicolon(mark));
                }
                ' ' | '\t' | '\r' | '\n' => {
                    self.cursor.advance();
                }
                _ => break,
            }
        }
        None
    }

    fn pending_semicolon(&self) -> bool {
        self.insert_semi && self.mode.contains(LexMode::SEMICOLONS)
    }

    /// Whether the comment starting here reaches a line end.
    fn comment_ends_line(&self) -> bool {
        let rest = self.cursor.rest();
        if rest.starts_with("//") {
            return true;
        }
        match rest.strip_prefix("/*") {
            Some(body) => match body.find("*/") {
                Some(end) => body[..end].contains('\n'),
                None => true,
            },
            None => false,
        }
    }

    fn mark(&self) -> Mark {
        Mark {
            line: self.cursor.line(),
            col: self.cursor.column(),
            offset: self.cursor.offset(),
        }
    }

    fn make_eof(&self) -> Token<'ast> {
        Token::new(
            TokenKind::Eof,
            "",
            Span::point(self.cursor.line(), self.cursor.column()),
        )
    }

    fn make_auto_semicolon(&self, mark: Mark) -> Token<'ast> {
        Token::new(TokenKind::Semicolon, "\n", Span::point(mark.line, mark.col))
    }

    /// Create a token from `mark` to the current position.
    /// Copies the lexeme into the arena.
    fn make_token(&self, kind: TokenKind, mark: Mark) -> Token<'ast> {
        let src_lexeme = self.cursor.slice_from(mark.offset);
        let span = Span::new(mark.line, mark.col, src_lexeme.len() as u32);
        Token::new(kind, self.arena.alloc_str(src_lexeme), span)
    }

    /// Create an error token and record the error.
    ///
    /// The token keeps the consumed text so callers re-emitting a line can
    /// pass it through untouched.
    fn make_error(&mut self, error: LexerError, mark: Mark) -> Token<'ast> {
        self.errors.push(error);
        self.make_token(TokenKind::Error, mark)
    }

    fn error_span(&self, mark: Mark) -> Span {
        Span::new(mark.line, mark.col, self.cursor.offset() - mark.offset)
    }

    // =========================================
    // Scanning: Comments and slash
    // =========================================

    /// Scan a slash, which could be `/`, `//`, `/*`, `/=`.
    fn scan_slash(&mut self, mark: Mark) -> Token<'ast> {
        self.cursor.advance();

        match self.cursor.peek() {
            Some('/') => {
                while self.cursor.peek().is_some_and(|c| c != '\n') && !self.cursor.check_str("\r\n") {
                    self.cursor.advance();
                }
                self.finish_comment(mark)
            }
            Some('*') => {
                self.cursor.advance();
                loop {
                    if self.cursor.is_eof() {
                        let error = LexerError::unterminated_comment(self.error_span(mark));
                        return self.make_error(error, mark);
                    }
                    if self.cursor.check_str("*/") {
                        self.cursor.advance_bytes(2);
                        return self.finish_comment(mark);
                    }
                    self.cursor.advance();
                }
            }
            Some('=') => {
                self.cursor.advance();
                self.make_token(TokenKind::SlashEqual, mark)
            }
            _ => self.make_token(TokenKind::Slash, mark),
        }
    }

    fn finish_comment(&mut self, mark: Mark) -> Token<'ast> {
        if self.mode.contains(LexMode::COMMENTS) {
            self.make_token(TokenKind::Comment, mark)
        } else {
            self.scan_token()
        }
    }

    // =========================================
    // Scanning: Strings and runes
    // =========================================

    /// Scan an interpreted string literal `"..."`.
    fn scan_string(&mut self, mark: Mark) -> Token<'ast> {
        self.cursor.advance();

        loop {
            match self.cursor.peek() {
                None | Some('\n') => {
                    let error = LexerError::unterminated_string(self.error_span(mark));
                    return self.make_error(error, mark);
                }
                Some('\\') => {
                    self.cursor.advance();
                    if self.cursor.check(|c| c != '\n') {
                        self.cursor.advance();
                    }
                }
                Some('"') => {
                    self.cursor.advance();
                    return self.make_token(TokenKind::StringLiteral, mark);
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// Scan a raw string literal, which may span lines.
    fn scan_raw_string(&mut self, mark: Mark) -> Token<'ast> {
        self.cursor.advance();

        loop {
            match self.cursor.advance() {
                None => {
                    let error = LexerError::unterminated_raw_string(self.error_span(mark));
                    return self.make_error(error, mark);
                }
                Some('`') => return self.make_token(TokenKind::RawStringLiteral, mark),
                Some(_) => {}
            }
        }
    }

    /// Scan a rune literal `'x'`.
    fn scan_rune(&mut self, mark: Mark) -> Token<'ast> {
        self.cursor.advance();

        loop {
            match self.cursor.peek() {
                None | Some('\n') => {
                    let error = LexerError::unterminated_rune(self.error_span(mark));
                    return self.make_error(error, mark);
                }
                Some('\\') => {
                    self.cursor.advance();
                    if self.cursor.check(|c| c != '\n') {
                        self.cursor.advance();
                    }
                }
                Some('\'') => {
                    self.cursor.advance();
                    return self.make_token(TokenKind::CharLiteral, mark);
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    // =========================================
    // Scanning: Numbers
    // =========================================

    fn scan_number(&mut self, mark: Mark) -> Token<'ast> {
        let mut kind = TokenKind::IntLiteral;

        if self.cursor.peek() == Some('0') {
            let radix = match self.cursor.peek_nth(1) {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };

            if let Some(radix) = radix {
                self.cursor.advance_bytes(2);
                let mut has_digits = self.consume_digits(radix);

                if radix == 16 {
                    if self.cursor.peek() == Some('.') {
                        self.cursor.advance();
                        has_digits |= self.consume_digits(16);
                        kind = TokenKind::FloatLiteral;
                    }
                    if let Some('p' | 'P') = self.cursor.peek() {
                        self.cursor.advance();
                        self.consume_exponent_sign();
                        self.consume_digits(10);
                        kind = TokenKind::FloatLiteral;
                    } else if kind == TokenKind::FloatLiteral {
                        let error = LexerError::invalid_number(
                            self.error_span(mark),
                            "hexadecimal mantissa requires a 'p' exponent",
                        );
                        return self.make_error(error, mark);
                    }
                }

                if !has_digits {
                    let error = LexerError::invalid_number(
                        self.error_span(mark),
                        "expected digits after radix prefix",
                    );
                    return self.make_error(error, mark);
                }

                return self.finish_number(kind, mark);
            }
        }

        // Integer part (may be empty for `.5`)
        self.consume_digits(10);

        if self.cursor.peek() == Some('.') && !self.cursor.check_str("...") {
            self.cursor.advance();
            self.consume_digits(10);
            kind = TokenKind::FloatLiteral;
        }

        if let Some('e' | 'E') = self.cursor.peek() {
            self.cursor.advance();
            self.consume_exponent_sign();
            if !self.consume_digits(10) {
                let error =
                    LexerError::invalid_number(self.error_span(mark), "exponent has no digits");
                return self.make_error(error, mark);
            }
            kind = TokenKind::FloatLiteral;
        }

        self.finish_number(kind, mark)
    }

    /// Apply the imaginary suffix, if any, and build the token.
    fn finish_number(&mut self, kind: TokenKind, mark: Mark) -> Token<'ast> {
        if self.cursor.eat('i') {
            return self.make_token(TokenKind::ImagLiteral, mark);
        }
        self.make_token(kind, mark)
    }

    /// Consume digits valid in `radix` plus `_` separators.
    ///
    /// Returns whether at least one digit was consumed.
    fn consume_digits(&mut self, radix: u32) -> bool {
        let mut has_digits = false;
        while let Some(c) = self.cursor.peek() {
            if c.is_digit(radix) {
                has_digits = true;
                self.cursor.advance();
            } else if c == '_' {
                self.cursor.advance();
            } else {
                break;
            }
        }
        has_digits
    }

    fn consume_exponent_sign(&mut self) {
        if matches!(self.cursor.peek(), Some('+' | '-')) {
            self.cursor.advance();
        }
    }

    // =========================================
    // Scanning: Identifiers and keywords
    // =========================================

    fn scan_identifier(&mut self, mark: Mark) -> Token<'ast> {
        self.cursor.eat_while(is_ident_continue);

        let lexeme = self.cursor.slice_from(mark.offset);
        let kind = lookup_keyword(lexeme).unwrap_or(TokenKind::Identifier);

        self.make_token(kind, mark)
    }

    // =========================================
    // Scanning: Operators
    // =========================================

    /// Scan an operator or punctuation token.
    ///
    /// Uses tuple matching on (first_char, peek) to minimize repeated peek() calls.
    fn scan_operator(&mut self, mark: Mark) -> Token<'ast> {
        let Some(c) = self.cursor.advance() else {
            return self.make_eof();
        };
        let next = self.cursor.peek();

        let kind = match (c, next) {
            ('(', _) => TokenKind::LeftParen,
            (')', _) => TokenKind::RightParen,
            ('[', _) => TokenKind::LeftBracket,
            (']', _) => TokenKind::RightBracket,
            ('{', _) => TokenKind::LeftBrace,
            ('}', _) => TokenKind::RightBrace,
            (';', _) => TokenKind::Semicolon,
            (',', _) => TokenKind::Comma,
            ('~', _) => TokenKind::Tilde,

            ('.', Some('.')) if self.cursor.check_str("..") => {
                self.cursor.advance_bytes(2);
                TokenKind::Ellipsis
            }
            ('.', _) => TokenKind::Dot,

            (':', Some('=')) => { self.cursor.advance(); TokenKind::ColonEqual }
            (':', _) => TokenKind::Colon,

            ('+', Some('+')) => { self.cursor.advance(); TokenKind::PlusPlus }
            ('+', Some('=')) => { self.cursor.advance(); TokenKind::PlusEqual }
            ('+', _) => TokenKind::Plus,

            ('-', Some('-')) => { self.cursor.advance(); TokenKind::MinusMinus }
            ('-', Some('=')) => { self.cursor.advance(); TokenKind::MinusEqual }
            ('-', _) => TokenKind::Minus,

            ('*', Some('=')) => { self.cursor.advance(); TokenKind::StarEqual }
            ('*', _) => TokenKind::Star,

            ('%', Some('=')) => { self.cursor.advance(); TokenKind::PercentEqual }
            ('%', _) => TokenKind::Percent,

            ('^', Some('=')) => { self.cursor.advance(); TokenKind::CaretEqual }
            ('^', _) => TokenKind::Caret,

            ('=', Some('=')) => { self.cursor.advance(); TokenKind::EqualEqual }
            ('=', _) => TokenKind::Equal,

            ('!', Some('=')) => { self.cursor.advance(); TokenKind::BangEqual }
            ('!', _) => TokenKind::Bang,

            ('<', Some('-')) => { self.cursor.advance(); TokenKind::Arrow }
            ('<', Some('=')) => { self.cursor.advance(); TokenKind::LessEqual }
            ('<', Some('<')) => {
                self.cursor.advance();
                if self.cursor.eat('=') {
                    TokenKind::LessLessEqual
                } else {
                    TokenKind::LessLess
                }
            }
            ('<', _) => TokenKind::Less,

            ('>', Some('=')) => { self.cursor.advance(); TokenKind::GreaterEqual }
            ('>', Some('>')) => {
                self.cursor.advance();
                if self.cursor.eat('=') {
                    TokenKind::GreaterGreaterEqual
                } else {
                    TokenKind::GreaterGreater
                }
            }
            ('>', _) => TokenKind::Greater,

            ('&', Some('&')) => { self.cursor.advance(); TokenKind::AmpAmp }
            ('&', Some('=')) => { self.cursor.advance(); TokenKind::AmpEqual }
            ('&', Some('^')) => {
                self.cursor.advance();
                if self.cursor.eat('=') {
                    TokenKind::AmpCaretEqual
                } else {
                    TokenKind::AmpCaret
                }
            }
            ('&', _) => TokenKind::Amp,

            ('|', Some('|')) => { self.cursor.advance(); TokenKind::PipePipe }
            ('|', Some('=')) => { self.cursor.advance(); TokenKind::PipeEqual }
            ('|', _) => TokenKind::Pipe,

            _ => {
                let error = LexerError::unexpected_char(c, self.error_span(mark));
                return self.make_error(error, mark);
            }
        };

        self.make_token(kind, mark)
    }
}

/// Implement Iterator for convenient token streaming.
impl<'src, 'ast> Iterator for Lexer<'src, 'ast> {
    type Item = Token<'ast>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}
