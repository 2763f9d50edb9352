//! Generation of one instantiation per substitution set.

use std::io::{Read, Seek, SeekFrom};

use bumpalo::Bump;
use genny_parser::Parser;
use tracing::trace;

use crate::error::GenerateError;
use crate::merge::make_line;
use crate::substitute::substitute_line;
use crate::typeset::TypeSet;
use crate::validate::check_coverage;

/// Lines containing either marker are placeholder declarations and are
/// removed from the output.
pub const GENERIC_MARKERS: &[&str] = &["generic.Type", "generic.Number"];

/// Produce the instantiation of the template for one substitution set.
///
/// The template is read from its start, parsed, and checked so that every
/// placeholder it declares has a concrete type in `type_set`. It is then
/// rewritten line by line.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn generate_specific<R>(
    filename: &str,
    input: &mut R,
    type_set: &TypeSet,
) -> Result<String, GenerateError>
where
    R: Read + Seek + ?Sized,
{
    input.seek(SeekFrom::Start(0))?;
    let mut source = String::new();
    input.read_to_string(&mut source)?;

    let arena = Bump::new();
    let file = Parser::parse(&source, &arena).map_err(|errors| GenerateError::Source {
        filename: filename.to_string(),
        errors,
    })?;
    check_coverage(&file, type_set)?;

    Ok(specialize_lines(&source, type_set))
}

/// Rewrite the template text for one set.
///
/// A comment line is held back until the next line is known: if that line
/// declares a placeholder the comment is dropped with it. Only the most
/// recent comment line is held, so in a multi-line comment block the
/// earlier lines are always kept.
fn specialize_lines(source: &str, type_set: &TypeSet) -> String {
    let mut output = String::with_capacity(source.len());
    let mut pending_comment: Option<String> = None;

    for raw in source.lines() {
        if GENERIC_MARKERS.iter().any(|marker| raw.contains(marker)) {
            pending_comment = None;
            continue;
        }

        let mut line = raw.to_string();
        for (generic, specific) in type_set.iter() {
            if line.contains(generic) {
                line = substitute_line(&line, generic, specific);
                trace!(generic, specific, %line, "rewrote line");
            }
        }

        if let Some(comment) = pending_comment.take() {
            output.push_str(&make_line(&comment));
        }

        if line.starts_with("//") {
            pending_comment = Some(line);
            continue;
        }

        output.push_str(&make_line(&line));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn set(pairs: &[(&str, &str)]) -> TypeSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn placeholder_lines_and_their_comments_are_dropped() {
        let template = "package list\n\n// KeyType is the element type.\ntype KeyType generic.Type\n\nvar zero KeyType\n";
        let mut input = Cursor::new(template);
        let output = generate_specific("list.go", &mut input, &set(&[("KeyType", "int")])).unwrap();
        assert_eq!(output, "package list\n\n\nvar zero int\n");
    }

    #[test]
    fn comment_before_ordinary_line_is_kept() {
        let template = "package list\n\n// Push appends v.\nfunc (l *KeyTypeList) Push(v KeyType) {}\n";
        let mut input = Cursor::new(template);
        let output = generate_specific("list.go", &mut input, &set(&[("KeyType", "string")])).unwrap();
        assert_eq!(
            output,
            "package list\n\n// Push appends v.\nfunc ( l * StringList ) Push ( v string ) { }\n"
        );
    }

    #[test]
    fn only_last_line_of_a_comment_block_is_held_back() {
        let template = "package a\n\n// a\n// b\ntype T generic.Type\n\nvar x T\n";
        let mut input = Cursor::new(template);
        let output = generate_specific("a.go", &mut input, &set(&[("T", "int")])).unwrap();
        assert_eq!(output, "package a\n\n// a\n\nvar x int\n");
    }

    #[test]
    fn trailing_comment_is_dropped() {
        let template = "package list\n// dangling";
        let mut input = Cursor::new(template);
        let output = generate_specific("list.go", &mut input, &TypeSet::new()).unwrap();
        assert_eq!(output, "package list\n");
    }

    #[test]
    fn reads_from_the_start_each_time() {
        let template = "package list\n\ntype T generic.Type\n\nvar x T\n";
        let mut input = Cursor::new(template);
        let first = generate_specific("list.go", &mut input, &set(&[("T", "int")])).unwrap();
        let second = generate_specific("list.go", &mut input, &set(&[("T", "bool")])).unwrap();
        assert_eq!(first, "package list\n\n\nvar x int\n");
        assert_eq!(second, "package list\n\n\nvar x bool\n");
    }

    #[test]
    fn keys_apply_in_set_order() {
        let template = "package a\n\ntype K generic.Type\ntype V generic.Type\n\nvar m map[K]V\n";
        let mut input = Cursor::new(template);
        let output =
            generate_specific("a.go", &mut input, &set(&[("K", "string"), ("V", "int")])).unwrap();
        assert!(output.ends_with("var m map [ string ] int\n"));
    }

    #[test]
    fn missing_placeholder() {
        let template = "package a\n\ntype K generic.Type\ntype V generic.Type\n";
        let mut input = Cursor::new(template);
        let error = generate_specific("a.go", &mut input, &set(&[("K", "string")])).unwrap_err();
        assert!(matches!(
            error,
            GenerateError::MissingSpecificType { ref generic_type } if generic_type == "V"
        ));
    }

    #[test]
    fn invalid_source() {
        let mut input = Cursor::new("package a\n\nfunc {\n");
        let error = generate_specific("a.go", &mut input, &TypeSet::new()).unwrap_err();
        assert!(matches!(error, GenerateError::Source { ref filename, .. } if filename == "a.go"));
    }
}
