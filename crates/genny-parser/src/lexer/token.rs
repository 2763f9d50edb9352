//! Token types and definitions for the Go lexer.
//!
//! Follows the token set of the Go language specification
//! ("Lexical elements").

use super::span::Span;
use std::fmt;

/// A token from the source code.
///
/// The `'ast` lifetime refers to the arena where the lexeme string is allocated.
/// This allows the source string to be freed after lexing, since all string
/// content is copied into the arena.
#[derive(Clone, Copy, PartialEq)]
pub struct Token<'ast> {
    /// The type of token.
    pub kind: TokenKind,
    /// The source text of this token (allocated in arena).
    ///
    /// Automatically inserted semicolons carry `"\n"`.
    pub lexeme: &'ast str,
    /// Location in source.
    pub span: Span,
}

impl<'ast> Token<'ast> {
    #[inline]
    pub fn new(kind: TokenKind, lexeme: &'ast str, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    /// The text this token renders as when a line is re-emitted.
    ///
    /// Automatic semicolons render as `;`, everything else as its lexeme.
    pub fn text(&self) -> &'ast str {
        if self.kind == TokenKind::Semicolon && self.lexeme == "\n" {
            ";"
        } else {
            self.lexeme
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?} @ {:?})", self.kind, self.lexeme, self.span)
    }
}

/// All possible token types in Go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================
    // Literals
    // =========================================
    /// Integer literal: `42`, `0x1F`, `0o17`, `1_000`
    IntLiteral,
    /// Floating-point literal: `3.14`, `1e10`, `0x1p-2`
    FloatLiteral,
    /// Imaginary literal: `2i`, `1.5i`
    ImagLiteral,
    /// Rune literal: `'a'`, `'\n'`
    CharLiteral,
    /// Interpreted string literal: `"hello"`
    StringLiteral,
    /// Raw string literal: `` `raw` ``
    RawStringLiteral,

    /// User-defined identifier (includes predeclared names like `int`).
    Identifier,

    /// Line or general comment, only produced when comments are scanned.
    Comment,

    // =========================================
    // Keywords
    // =========================================
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,

    // =========================================
    // Operators
    // =========================================
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `<<`
    LessLess,
    /// `>>`
    GreaterGreater,
    /// `&^`
    AmpCaret,
    /// `+=`
    PlusEqual,
    /// `-=`
    MinusEqual,
    /// `*=`
    StarEqual,
    /// `/=`
    SlashEqual,
    /// `%=`
    PercentEqual,
    /// `&=`
    AmpEqual,
    /// `|=`
    PipeEqual,
    /// `^=`
    CaretEqual,
    /// `<<=`
    LessLessEqual,
    /// `>>=`
    GreaterGreaterEqual,
    /// `&^=`
    AmpCaretEqual,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
    /// `<-`
    Arrow,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
    /// `==`
    EqualEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `=`
    Equal,
    /// `!`
    Bang,
    /// `~`
    Tilde,
    /// `!=`
    BangEqual,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `:=`
    ColonEqual,
    /// `...`
    Ellipsis,

    // =========================================
    // Delimiters
    // =========================================
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `;`, explicit or automatically inserted
    Semicolon,
    /// `:`
    Colon,

    // =========================================
    // Special
    // =========================================
    /// End of file
    Eof,
    /// Lexer error (unrecognized or unterminated input)
    Error,
}

impl TokenKind {
    /// Check if this token kind is a keyword.
    pub fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Break
                | Case
                | Chan
                | Const
                | Continue
                | Default
                | Defer
                | Else
                | Fallthrough
                | For
                | Func
                | Go
                | Goto
                | If
                | Import
                | Interface
                | Map
                | Package
                | Range
                | Return
                | Select
                | Struct
                | Switch
                | Type
                | Var
        )
    }

    /// Check if this token kind is a literal in the Go sense: identifiers
    /// and basic literals.
    pub fn is_literal(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Identifier
                | IntLiteral
                | FloatLiteral
                | ImagLiteral
                | CharLiteral
                | StringLiteral
                | RawStringLiteral
        )
    }

    /// Check if this token kind is an operator.
    pub fn is_operator(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Plus | Minus
                | Star
                | Slash
                | Percent
                | Amp
                | Pipe
                | Caret
                | LessLess
                | GreaterGreater
                | AmpCaret
                | PlusEqual
                | MinusEqual
                | StarEqual
                | SlashEqual
                | PercentEqual
                | AmpEqual
                | PipeEqual
                | CaretEqual
                | LessLessEqual
                | GreaterGreaterEqual
                | AmpCaretEqual
                | AmpAmp
                | PipePipe
                | Arrow
                | PlusPlus
                | MinusMinus
                | EqualEqual
                | Less
                | Greater
                | Equal
                | Bang
                | Tilde
                | BangEqual
                | LessEqual
                | GreaterEqual
                | ColonEqual
                | Ellipsis
        )
    }

    /// Check if this token kind is a delimiter.
    pub fn is_delimiter(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            LeftParen
                | RightParen
                | LeftBracket
                | RightBracket
                | LeftBrace
                | RightBrace
                | Comma
                | Dot
                | Semicolon
                | Colon
        )
    }

    /// Whether a newline directly after this token ends the statement.
    ///
    /// This is the automatic semicolon rule of the Go specification.
    pub fn ends_statement(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Identifier
                | IntLiteral
                | FloatLiteral
                | ImagLiteral
                | CharLiteral
                | StringLiteral
                | RawStringLiteral
                | Break
                | Continue
                | Fallthrough
                | Return
                | PlusPlus
                | MinusMinus
                | RightParen
                | RightBracket
                | RightBrace
        )
    }

    /// Human-readable description used in diagnostics.
    pub fn description(self) -> &'static str {
        use TokenKind::*;
        match self {
            IntLiteral => "integer literal",
            FloatLiteral => "float literal",
            ImagLiteral => "imaginary literal",
            CharLiteral => "rune literal",
            StringLiteral => "string literal",
            RawStringLiteral => "raw string literal",
            Identifier => "identifier",
            Comment => "comment",

            Break => "'break'",
            Case => "'case'",
            Chan => "'chan'",
            Const => "'const'",
            Continue => "'continue'",
            Default => "'default'",
            Defer => "'defer'",
            Else => "'else'",
            Fallthrough => "'fallthrough'",
            For => "'for'",
            Func => "'func'",
            Go => "'go'",
            Goto => "'goto'",
            If => "'if'",
            Import => "'import'",
            Interface => "'interface'",
            Map => "'map'",
            Package => "'package'",
            Range => "'range'",
            Return => "'return'",
            Select => "'select'",
            Struct => "'struct'",
            Switch => "'switch'",
            Type => "'type'",
            Var => "'var'",

            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            Percent => "'%'",
            Amp => "'&'",
            Pipe => "'|'",
            Caret => "'^'",
            LessLess => "'<<'",
            GreaterGreater => "'>>'",
            AmpCaret => "'&^'",
            PlusEqual => "'+='",
            MinusEqual => "'-='",
            StarEqual => "'*='",
            SlashEqual => "'/='",
            PercentEqual => "'%='",
            AmpEqual => "'&='",
            PipeEqual => "'|='",
            CaretEqual => "'^='",
            LessLessEqual => "'<<='",
            GreaterGreaterEqual => "'>>='",
            AmpCaretEqual => "'&^='",
            AmpAmp => "'&&'",
            PipePipe => "'||'",
            Arrow => "'<-'",
            PlusPlus => "'++'",
            MinusMinus => "'--'",
            EqualEqual => "'=='",
            Less => "'<'",
            Greater => "'>'",
            Equal => "'='",
            Bang => "'!'",
            Tilde => "'~'",
            BangEqual => "'!='",
            LessEqual => "'<='",
            GreaterEqual => "'>='",
            ColonEqual => "':='",
            Ellipsis => "'...'",

            LeftParen => "'('",
            RightParen => "')'",
            LeftBracket => "'['",
            RightBracket => "']'",
            LeftBrace => "'{'",
            RightBrace => "'}'",
            Comma => "','",
            Dot => "'.'",
            Semicolon => "';'",
            Colon => "':'",

            Eof => "end of file",
            Error => "error",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Map a keyword string to its [`TokenKind`], or `None` if not a keyword.
///
/// Predeclared identifiers (`int`, `string`, `nil`, `true`...) are not
/// keywords in Go and stay identifiers.
pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match ident {
        "break" => Break,
        "case" => Case,
        "chan" => Chan,
        "const" => Const,
        "continue" => Continue,
        "default" => Default,
        "defer" => Defer,
        "else" => Else,
        "fallthrough" => Fallthrough,
        "for" => For,
        "func" => Func,
        "go" => Go,
        "goto" => Goto,
        "if" => If,
        "import" => Import,
        "interface" => Interface,
        "map" => Map,
        "package" => Package,
        "range" => Range,
        "return" => Return,
        "select" => Select,
        "struct" => Struct,
        "switch" => Switch,
        "type" => Type,
        "var" => Var,
        _ => return None,
    })
}
