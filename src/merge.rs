//! Merging of per-set instantiations into a single unit.

use tracing::trace;

/// Provenance banner placed once at the top of the merged output.
pub const HEADER: &str = "

// This file was automatically generated by genny.
// Any changes will be lost if this file is regenerated.
// see https://github.com/cheekybits/genny

";

/// Lines starting with any of these prefixes never reach the output.
pub const DIRECTIVE_PREFIXES: &[&str] = &["//go:generate genny "];

const PACKAGE_KEYWORD: &str = "package";
const IMPORT_KEYWORD: &str = "import";

/// Strip trailing carriage returns and line feeds, then end the line with
/// exactly one `\n`.
pub fn make_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 1);
    out.push_str(line.trim_end_matches(['\r', '\n']));
    out.push('\n');
    out
}

/// Concatenate the banner and every instantiation, then clean the result.
///
/// Cleaning keeps only the first `package` line, drops every `import`
/// line together with the body of any `import (` block, and drops
/// self-invocation directives.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn merge<S: AsRef<str>>(instantiations: &[S]) -> String {
    let mut total = String::from(HEADER);
    for part in instantiations {
        total.push_str(part.as_ref());
    }

    let mut output = String::with_capacity(total.len());
    let mut package_found = false;
    let mut inside_import_block = false;

    for line in total.lines() {
        if inside_import_block {
            if line.ends_with(')') {
                inside_import_block = false;
            }
            continue;
        }

        if line.starts_with(PACKAGE_KEYWORD) {
            if package_found {
                trace!(line, "dropping repeated package clause");
                continue;
            }
            package_found = true;
        } else if line.starts_with(IMPORT_KEYWORD) {
            if line.ends_with('(') {
                inside_import_block = true;
            }
            continue;
        }

        if DIRECTIVE_PREFIXES
            .iter()
            .any(|prefix| line.starts_with(prefix))
        {
            continue;
        }

        output.push_str(&make_line(line));
    }

    output
}
