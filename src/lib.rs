//! genny: specialize Go templates for concrete types.
//!
//! A template is an ordinary Go file that declares placeholder types as
//! members of the `generic` package:
//!
//! ```go
//! type KeyType generic.Type
//! type ValueType generic.Number
//! ```
//!
//! Generation takes a list of substitution sets, each mapping every
//! placeholder to a concrete type, and produces one Go file holding an
//! instantiation per set:
//!
//! 1. For each set the template is parsed, checked for placeholder
//!    coverage, and rewritten line by line ([`generate_specific`]).
//! 2. The instantiations are merged behind a provenance banner with a
//!    single package clause and no import blocks ([`merge`]).
//! 3. The package is optionally renamed ([`change_package`]).
//! 4. Imports are recomputed by an [`ImportNormalizer`].
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use genny::{Options, Passthrough, generics, parse_type_sets};
//!
//! let template = "package list\n\ntype T generic.Type\n\ntype TList []T\n";
//! let sets = parse_type_sets("T=int,string").unwrap();
//! let options = Options::new("list.go");
//!
//! let output = generics(&options, &mut Cursor::new(template), &sets, &Passthrough).unwrap();
//! let output = String::from_utf8(output).unwrap();
//! assert!(output.contains("type IntList [ ] int\n"));
//! assert!(output.contains("type StringList [ ] string\n"));
//! ```

pub mod error;
pub mod generate;
pub mod imports;
pub mod merge;
pub mod package;
pub mod substitute;
pub mod typeset;
pub mod validate;

use std::io::{Read, Seek};
use std::path::PathBuf;

use tracing::{debug, warn};

pub use error::{GenerateError, TypeSetError};
pub use generate::generate_specific;
pub use imports::{GoImports, ImportNormalizer, NormalizeError, Passthrough};
pub use merge::{HEADER, merge};
pub use package::change_package;
pub use substitute::{subst_into_literal, substitute_line, wordify};
pub use typeset::{BUILTINS, NUMBERS, TypeSet, parse_type_sets};
pub use validate::required_placeholders;

/// Settings for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Name of the template, used in diagnostics.
    pub filename: String,
    /// Where the output will be written; passed to the import normalizer.
    pub output_filename: Option<PathBuf>,
    /// Rename the output package when set.
    pub package_name: Option<String>,
}

impl Options {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    pub fn with_output_filename(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_filename = Some(path.into());
        self
    }

    pub fn with_package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }
}

/// Generate and merge every instantiation, without import normalization.
///
/// Fails as a whole if any set fails; nothing is returned for the sets
/// that succeeded.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn specialize<R>(
    options: &Options,
    input: &mut R,
    type_sets: &[TypeSet],
) -> Result<String, GenerateError>
where
    R: Read + Seek + ?Sized,
{
    debug!(filename = %options.filename, sets = type_sets.len(), "specializing template");

    let mut instantiations = Vec::with_capacity(type_sets.len());
    for (index, type_set) in type_sets.iter().enumerate() {
        debug!(index, types = %type_set, "generating instantiation");
        instantiations.push(generate_specific(&options.filename, input, type_set)?);
    }

    let merged = merge(instantiations.as_slice());
    Ok(match options.package_name.as_deref() {
        Some(name) if !name.is_empty() => change_package(&merged, name),
        _ => merged,
    })
}

/// Run the full pipeline: [`specialize`], then import normalization.
pub fn generics<R, N>(
    options: &Options,
    input: &mut R,
    type_sets: &[TypeSet],
    normalizer: &N,
) -> Result<Vec<u8>, GenerateError>
where
    R: Read + Seek + ?Sized,
    N: ImportNormalizer + ?Sized,
{
    let source = specialize(options, input, type_sets)?;
    normalizer
        .normalize(options.output_filename.as_deref(), source.as_bytes())
        .map_err(|error| {
            warn!(filename = %options.filename, %error, "import normalization failed");
            GenerateError::Imports(error)
        })
}
