/// A cursor over Go source text that tracks position.
///
/// Provides low-level character access with peek/advance semantics.
/// Tracks byte offset, line number, and column number as it advances.
pub struct Cursor<'src> {
    /// The source text being scanned.
    source: &'src str,
    /// Remaining source text (slice starting at current position).
    rest: &'src str,
    /// Current byte offset from start of source.
    offset: u32,
    /// Current line number (1-indexed).
    line: u32,
    /// Current column number (1-indexed, byte-based).
    column: u32,
}

impl<'src> Cursor<'src> {
    /// Create a new cursor at the start of the source.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// The unscanned remainder of the source.
    #[inline]
    pub fn rest(&self) -> &'src str {
        self.rest
    }

    /// Current byte offset from start of source.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Current line number (1-indexed).
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Current column number (1-indexed, byte-based).
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.rest.is_empty()
    }

    /// Peek at the current character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        let first = *self.rest.as_bytes().first()?;
        if first < 128 {
            Some(first as char)
        } else {
            self.rest.chars().next()
        }
    }

    /// Peek at the nth character ahead (0 = current).
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    /// Check if the current character satisfies a predicate.
    #[inline]
    pub fn check(&self, f: impl Fn(char) -> bool) -> bool {
        self.peek().is_some_and(f)
    }

    /// Check if the upcoming bytes match the given string.
    #[inline]
    pub fn check_str(&self, s: &str) -> bool {
        self.rest.starts_with(s)
    }

    /// Consume the current character and advance.
    ///
    /// Returns the consumed character, or `None` if at EOF.
    /// Updates line/column tracking.
    #[inline]
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        let len = ch.len_utf8();

        self.rest = &self.rest[len..];
        self.offset += len as u32;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += len as u32;
        }

        Some(ch)
    }

    /// Advance by n bytes.
    ///
    /// `n` must land on a UTF-8 boundary.
    pub fn advance_bytes(&mut self, n: usize) {
        debug_assert!(self.rest.is_char_boundary(n));

        for ch in self.rest[..n].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += ch.len_utf8() as u32;
            }
        }

        self.rest = &self.rest[n..];
        self.offset += n as u32;
    }

    /// Consume if the current character matches.
    #[inline]
    pub fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters while the predicate matches.
    ///
    /// Returns the consumed slice.
    pub fn eat_while(&mut self, f: impl Fn(char) -> bool) -> &'src str {
        let start = self.offset as usize;
        while self.check(&f) {
            self.advance();
        }
        &self.source[start..self.offset as usize]
    }

    /// Get a slice of source from a starting offset to current position.
    #[inline]
    pub fn slice_from(&self, start: u32) -> &'src str {
        &self.source[start as usize..self.offset as usize]
    }
}

/// Check if a character can start a Go identifier.
///
/// Go identifiers may use any Unicode letter, not just ASCII.
#[inline]
pub fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

/// Check if a character can continue a Go identifier.
#[inline]
pub fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cursor = Cursor::new("func");
        assert_eq!(cursor.peek(), Some('f'));
        assert_eq!(cursor.offset(), 0);

        assert_eq!(cursor.advance(), Some('f'));
        assert_eq!(cursor.peek(), Some('u'));
        assert_eq!(cursor.offset(), 1);
        assert_eq!(cursor.rest(), "unc");
    }

    #[test]
    fn cursor_eat_while() {
        let mut cursor = Cursor::new("aaabbb");

        assert_eq!(cursor.eat_while(|c| c == 'a'), "aaa");
        assert_eq!(cursor.eat_while(|c| c == 'b'), "bbb");
        assert!(cursor.is_eof());
    }

    #[test]
    fn cursor_utf8() {
        let mut cursor = Cursor::new("héllo");

        cursor.advance();
        assert_eq!(cursor.offset(), 1);

        cursor.advance(); // é is 2 bytes
        assert_eq!(cursor.offset(), 3);
        assert_eq!(cursor.column(), 4);
    }

    #[test]
    fn cursor_line_and_column() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.advance_bytes(3);
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.column(), 1);
        assert_eq!(cursor.peek(), Some('c'));
    }

    #[test]
    fn cursor_slice_from() {
        let mut cursor = Cursor::new("package main");
        cursor.eat_while(is_ident_continue);
        assert_eq!(cursor.slice_from(0), "package");
        assert!(cursor.check_str(" main"));
    }

    #[test]
    fn unicode_identifiers() {
        assert!(is_ident_start('π'));
        assert!(is_ident_start('_'));
        assert!(!is_ident_start('1'));
        assert!(is_ident_continue('1'));
        assert!(!is_ident_continue('.'));
    }
}
