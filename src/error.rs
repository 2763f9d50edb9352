//! Error types for template specialization.
//!
//! ```text
//! GenerateError
//! ├── Source              - the template is not valid Go
//! ├── MissingSpecificType - a placeholder has no concrete type in a set
//! ├── Imports             - the import normalizer rejected the output
//! └── Io                  - the template could not be rewound or read
//!
//! TypeSetError            - malformed `Generic=Specific` arguments
//! NormalizeError          - see `imports`
//! ```

use genny_parser::ParseErrors;
use thiserror::Error;

use crate::imports::NormalizeError;

/// Errors that abort a generation run.
///
/// Every variant is terminal: no partial output is produced.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The template failed to parse.
    #[error("{filename}: {errors}")]
    Source {
        filename: String,
        errors: ParseErrors,
    },

    /// A placeholder declared in the template is not a key of the set.
    #[error("missing specific type for generic type {generic_type}")]
    MissingSpecificType { generic_type: String },

    /// Import normalization of the merged output failed.
    #[error("import normalization failed")]
    Imports(#[from] NormalizeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GenerateError {
    /// Render the error with a caret diagnostic when it points into the
    /// template source.
    pub fn display_with_source(&self, source: &str) -> String {
        match self {
            GenerateError::Source { filename, errors } => {
                let mut output = format!("{}:\n", filename);
                for error in errors.errors() {
                    output.push_str(&error.display_with_source(source));
                }
                output
            }
            other => other.to_string(),
        }
    }
}

/// Errors from parsing `Generic=Specific1,Specific2` type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeSetError {
    #[error("\"{arg}\" is bad: {message}")]
    BadTypeArgs { arg: String, message: String },
}

impl TypeSetError {
    pub(crate) fn bad(arg: &str, message: &str) -> Self {
        TypeSetError::BadTypeArgs {
            arg: arg.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genny_parser::{ParseError, ParseErrorKind, Span};

    #[test]
    fn missing_type_message() {
        let error = GenerateError::MissingSpecificType {
            generic_type: "ValueType".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "missing specific type for generic type ValueType"
        );
    }

    #[test]
    fn source_error_names_the_file() {
        let errors: ParseErrors =
            ParseError::new(ParseErrorKind::ExpectedPackage, Span::new(1, 1, 4), "").into();
        let error = GenerateError::Source {
            filename: "queue.go".to_string(),
            errors,
        };
        assert_eq!(error.to_string(), "queue.go: 1:1: expected package clause");
        let rendered = error.display_with_source("type X int\n");
        assert!(rendered.starts_with("queue.go:\n"));
        assert!(rendered.contains("  1 | type X int"));
    }

    #[test]
    fn bad_type_args_message() {
        let error = TypeSetError::bad("KeyType", "Generic=Specific expected");
        assert_eq!(
            error.to_string(),
            "\"KeyType\" is bad: Generic=Specific expected"
        );
    }
}
