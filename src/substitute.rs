//! Token-level substitution of a placeholder name in one line of Go.
//!
//! A line is re-tokenized and every literal token (identifiers, string,
//! rune and numeric literals) or comment word containing the placeholder is
//! rewritten. Tokens are re-joined with single spaces, so original spacing
//! is not preserved; the import normalizer reformats the final output.
//!
//! Matching is by substring, not word boundary: with placeholder `KeyType`
//! and replacement `int`, `KeyTypeList` becomes `IntList` and
//! `newKeyTypeList` becomes `newIntList`.

use bumpalo::Bump;
use genny_parser::{LexMode, Lexer, TokenKind};

/// Substitute `specific` for `generic` in a single source line.
///
/// The line is scanned without automatic semicolons. Tokens the lexer
/// cannot finish within the line, such as the start of a raw string that
/// continues below, are passed through as written.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn substitute_line(line: &str, generic: &str, specific: &str) -> String {
    let arena = Bump::new();
    let lexer = Lexer::with_mode(line, &arena, LexMode::COMMENTS);

    let words: Vec<String> = lexer
        .map(|token| match token.kind {
            TokenKind::Comment => subst_into_comment(token.lexeme, generic, specific),
            kind if kind.is_literal() => subst_into_literal(token.lexeme, generic, specific),
            _ => token.text().to_string(),
        })
        .collect();

    words.join(" ")
}

/// Apply the literal rule to each whitespace-separated word of a comment.
pub fn subst_into_comment(comment: &str, generic: &str, specific: &str) -> String {
    comment
        .split_whitespace()
        .map(|word| subst_into_literal(word, generic, specific))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Substitute into a single word.
///
/// - A word equal to `generic` becomes `specific` verbatim.
/// - A word containing `generic` gets every occurrence replaced by the
///   exported [`wordify`] form of `specific`. If the word was unexported
///   and now starts with that form, the leading occurrence is lower-cased
///   again.
/// - Anything else is returned unchanged.
pub fn subst_into_literal(word: &str, generic: &str, specific: &str) -> String {
    if word == generic {
        return specific.to_string();
    }
    if generic.is_empty() || !word.contains(generic) {
        return word.to_string();
    }

    let exported = wordify(specific, true);
    let unexported = wordify(specific, false);

    let result = word.replace(generic, &exported);
    if !exported.is_empty() && result.starts_with(&exported) && !is_exported(word) {
        return result.replacen(&exported, &unexported, 1);
    }
    result
}

/// Turn a type expression into something usable inside an identifier.
///
/// Strips trailing `{`/`}`, leading `*`/`&` and every `.`, then upper-cases
/// (`exported`) or lower-cases the first letter: `*pkg.Thing` becomes
/// `PkgThing` or `pkgThing`.
pub fn wordify(specific: &str, exported: bool) -> String {
    let trimmed = specific
        .trim_end_matches(['{', '}'])
        .trim_start_matches(['*', '&']);
    let word: String = trimmed.chars().filter(|&c| c != '.').collect();

    let mut chars = word.chars();
    match chars.next() {
        Some(first) if exported => first.to_uppercase().chain(chars).collect(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => word,
    }
}

/// Whether a Go identifier (or word) is exported: it starts with an
/// upper-case letter.
pub fn is_exported(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_verbatim() {
        assert_eq!(subst_into_literal("KeyType", "KeyType", "*pkg.Thing"), "*pkg.Thing");
        assert_eq!(subst_into_literal("KeyType", "KeyType", "[]byte"), "[]byte");
    }

    #[test]
    fn exported_word_keeps_exported_replacement() {
        assert_eq!(subst_into_literal("KeyTypeList", "KeyType", "int"), "IntList");
        assert_eq!(subst_into_literal("NewKeyTypeList", "KeyType", "int"), "NewIntList");
    }

    #[test]
    fn unexported_word_lowercases_leading_replacement() {
        assert_eq!(subst_into_literal("keyTypeMap", "keyType", "string"), "stringMap");
        assert_eq!(
            subst_into_literal("_KeyTypeHelper", "KeyType", "string"),
            "_StringHelper"
        );
    }

    #[test]
    fn only_the_leading_occurrence_is_lowercased() {
        assert_eq!(
            subst_into_literal("keyTypeOrkeyType", "keyType", "Foo"),
            "fooOrFoo"
        );
    }

    #[test]
    fn substring_matching_inside_literals() {
        assert_eq!(
            subst_into_literal("\"KeyType not found\"", "KeyType", "int"),
            "\"Int not found\""
        );
        assert_eq!(subst_into_literal("Other", "KeyType", "int"), "Other");
    }

    #[test]
    fn wordify_strips_decorations() {
        assert_eq!(wordify("*pkg.Thing", true), "PkgThing");
        assert_eq!(wordify("&Thing{}", false), "thing");
        assert_eq!(wordify("int", true), "Int");
        assert_eq!(wordify("MyType", false), "myType");
        assert_eq!(wordify("", true), "");
    }

    #[test]
    fn exported_check() {
        assert!(is_exported("KeyType"));
        assert!(!is_exported("keyType"));
        assert!(!is_exported(""));
        assert!(!is_exported("\"KeyType\""));
    }

    #[test]
    fn method_declaration_line() {
        assert_eq!(
            substitute_line("func (l *KeyTypeList) Push(v KeyType)", "KeyType", "int"),
            "func ( l * IntList ) Push ( v int )"
        );
    }

    #[test]
    fn comments_are_substituted_word_by_word() {
        assert_eq!(
            substitute_line("x := KeyType(1) // converts to a KeyType value", "KeyType", "float64"),
            "x := float64 ( 1 ) // converts to a float64 value"
        );
    }

    #[test]
    fn keywords_and_operators_pass_through() {
        assert_eq!(
            substitute_line("\tfor i := range keyTypes {", "keyType", "string"),
            "for i := range strings {"
        );
    }

    #[test]
    fn unfinished_tokens_pass_through() {
        assert_eq!(
            substitute_line("var doc = `KeyType docs", "KeyType", "int"),
            "var doc = `KeyType docs"
        );
    }

    #[test]
    fn no_trailing_separator() {
        assert_eq!(substitute_line("", "KeyType", "int"), "");
        assert_eq!(substitute_line("KeyType", "KeyType", "int"), "int");
    }
}
