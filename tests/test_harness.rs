// tests/test_harness.rs
//! Test harness for running genny over the Go templates in
//! `tests/fixtures`.

use genny::{GenerateError, Options, Passthrough, generics, parse_type_sets};
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

/// Loads fixture templates and generates code from them.
pub struct TestHarness {
    fixtures_dir: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let fixtures_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures");
        Self { fixtures_dir }
    }

    pub fn path(&self, filename: &str) -> PathBuf {
        self.fixtures_dir.join(filename)
    }

    pub fn load(&self, filename: &str) -> String {
        let path = self.path(filename);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// Generate from a fixture without import normalization.
    pub fn generate(&self, filename: &str, type_args: &str) -> Result<String, GenerateError> {
        self.generate_with(Options::new(filename), type_args)
    }

    pub fn generate_with(&self, options: Options, type_args: &str) -> Result<String, GenerateError> {
        let source = self.load(&options.filename);
        let type_sets = parse_type_sets(type_args).expect("valid type arguments");
        let output = generics(&options, &mut Cursor::new(source), &type_sets, &Passthrough)?;
        Ok(String::from_utf8(output).expect("generated code is UTF-8"))
    }

    /// Generate and panic with a caret diagnostic on failure.
    pub fn assert_generates(&self, filename: &str, type_args: &str) -> String {
        match self.generate(filename, type_args) {
            Ok(output) => output,
            Err(error) => panic!(
                "Expected {} to generate, got:\n{}",
                filename,
                error.display_with_source(&self.load(filename))
            ),
        }
    }
}

/// Lines of generated output that start with `prefix`.
pub fn lines_starting_with<'a>(output: &'a str, prefix: &str) -> Vec<&'a str> {
    output
        .lines()
        .filter(|line| line.starts_with(prefix))
        .collect()
}
