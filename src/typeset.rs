//! Substitution sets and parsing of `Generic=Specific` type arguments.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::error::TypeSetError;

/// Every predeclared Go type, selected with the `BUILTINS` keyword.
pub const BUILTINS: &[&str] = &[
    "bool",
    "byte",
    "complex128",
    "complex64",
    "error",
    "float32",
    "float64",
    "int",
    "int16",
    "int32",
    "int64",
    "int8",
    "rune",
    "string",
    "uint",
    "uint16",
    "uint32",
    "uint64",
    "uint8",
    "uintptr",
];

/// The numeric predeclared types, selected with the `NUMBERS` keyword.
pub const NUMBERS: &[&str] = &[
    "float32", "float64", "int", "int16", "int32", "int64", "int8", "uint", "uint16", "uint32",
    "uint64", "uint8",
];

/// One substitution set: placeholder name to concrete type expression.
///
/// Keys iterate in insertion order so generated output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSet {
    entries: Vec<(String, String)>,
}

impl TypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `generic` to `specific`, replacing an existing mapping in place.
    pub fn insert(&mut self, generic: impl Into<String>, specific: impl Into<String>) {
        let generic = generic.into();
        let specific = specific.into();
        match self.entries.iter_mut().find(|(key, _)| *key == generic) {
            Some(entry) => entry.1 = specific,
            None => self.entries.push((generic, specific)),
        }
    }

    pub fn get(&self, generic: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == generic)
            .map(|(_, specific)| specific.as_str())
    }

    pub fn contains_key(&self, generic: &str) -> bool {
        self.get(generic).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(generic, specific)| (generic.as_str(), specific.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TypeSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut set = TypeSet::new();
        for (generic, specific) in iter {
            set.insert(generic, specific);
        }
        set
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (generic, specific)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={}", generic, specific)?;
        }
        Ok(())
    }
}

/// Parse type arguments such as `"KeyType=string,int ValueType=int"` into
/// the cartesian product of substitution sets.
///
/// The first generic type varies slowest:
///
/// ```
/// use genny::parse_type_sets;
///
/// let sets = parse_type_sets("K=string,int V=bool").unwrap();
/// let rendered: Vec<String> = sets.iter().map(|set| set.to_string()).collect();
/// assert_eq!(rendered, ["K=string V=bool", "K=int V=bool"]);
/// ```
pub fn parse_type_sets(arg: &str) -> Result<Vec<TypeSet>, TypeSetError> {
    let mut seen = FxHashSet::default();
    let mut axes: Vec<(&str, Vec<&str>)> = Vec::new();

    for pair in arg.split(' ').filter(|pair| !pair.is_empty()) {
        let Some((generic, specifics)) = pair.split_once('=') else {
            return Err(TypeSetError::bad(pair, "Generic=Specific expected"));
        };
        if specifics.contains('=') || generic.is_empty() || specifics.is_empty() {
            return Err(TypeSetError::bad(pair, "Generic=Specific expected"));
        }
        if !seen.insert(generic) {
            return Err(TypeSetError::bad(pair, "generic type given more than once"));
        }

        let mut values = Vec::new();
        for specific in specifics.split(',') {
            match specific {
                "BUILTINS" => values.extend_from_slice(BUILTINS),
                "NUMBERS" => values.extend_from_slice(NUMBERS),
                "" => return Err(TypeSetError::bad(pair, "empty specific type")),
                other => values.push(other),
            }
        }
        axes.push((generic, values));
    }

    let mut sets = vec![TypeSet::new()];
    for (generic, values) in &axes {
        sets = sets
            .iter()
            .flat_map(|set| {
                values.iter().map(move |specific| {
                    let mut next = set.clone();
                    next.insert(*generic, *specific);
                    next
                })
            })
            .collect();
    }

    if axes.is_empty() {
        sets.clear();
    }
    Ok(sets)
}
