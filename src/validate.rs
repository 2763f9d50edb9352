//! Placeholder discovery and coverage checks.

use genny_parser::SourceFile;
use rustc_hash::FxHashSet;

use crate::error::GenerateError;
use crate::typeset::TypeSet;

/// Package qualifier marking a placeholder declaration.
pub const GENERIC_PACKAGE: &str = "generic";

/// Names of all top-level types declared as `generic.<Member>`, in
/// declaration order.
///
/// Both definitions (`type T generic.Type`) and aliases
/// (`type T = generic.Type`) count, grouped or not.
pub fn required_placeholders<'ast>(file: &SourceFile<'ast>) -> Vec<&'ast str> {
    let mut seen = FxHashSet::default();
    file.type_specs()
        .filter(|spec| {
            spec.ty
                .qualified_name()
                .is_some_and(|(package, _)| package == GENERIC_PACKAGE)
        })
        .map(|spec| spec.name.name)
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Fail with [`GenerateError::MissingSpecificType`] for the first
/// placeholder `type_set` has no concrete type for.
pub fn check_coverage(file: &SourceFile<'_>, type_set: &TypeSet) -> Result<(), GenerateError> {
    match required_placeholders(file)
        .into_iter()
        .find(|name| !type_set.contains_key(name))
    {
        Some(missing) => Err(GenerateError::MissingSpecificType {
            generic_type: missing.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use genny_parser::Parser;

    const TEMPLATE: &str = "package pair

import \"github.com/cheekybits/genny/generic\"

type KeyType generic.Type

type (
\tValueType generic.Number
\tOther     = generic.Type
)

type KeyTypeValueTypePair struct {
\tKey   KeyType
\tValue ValueType
}

type Unrelated sync.Mutex
";

    #[test]
    fn finds_all_placeholder_forms() {
        let arena = Bump::new();
        let file = Parser::parse(TEMPLATE, &arena).unwrap();
        assert_eq!(
            required_placeholders(&file),
            vec!["KeyType", "ValueType", "Other"]
        );
    }

    #[test]
    fn coverage_reports_first_missing() {
        let arena = Bump::new();
        let file = Parser::parse(TEMPLATE, &arena).unwrap();

        let set: TypeSet = [("KeyType", "int"), ("Other", "string")].into_iter().collect();
        let error = check_coverage(&file, &set).unwrap_err();
        assert!(matches!(
            error,
            GenerateError::MissingSpecificType { ref generic_type } if generic_type == "ValueType"
        ));

        let full: TypeSet = [("KeyType", "int"), ("ValueType", "float64"), ("Other", "string")]
            .into_iter()
            .collect();
        assert!(check_coverage(&file, &full).is_ok());
    }

    #[test]
    fn extra_keys_are_allowed() {
        let arena = Bump::new();
        let file = Parser::parse("package a\n\ntype A generic.Type\n", &arena).unwrap();
        let set: TypeSet = [("A", "int"), ("B", "string")].into_iter().collect();
        assert!(check_coverage(&file, &set).is_ok());
    }

    #[test]
    fn template_without_placeholders() {
        let arena = Bump::new();
        let file = Parser::parse("package a\n\nfunc F() {}\n", &arena).unwrap();
        assert!(required_placeholders(&file).is_empty());
        assert!(check_coverage(&file, &TypeSet::new()).is_ok());
    }
}
