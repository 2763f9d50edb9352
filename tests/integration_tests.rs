// tests/integration_tests.rs
//! Integration tests for genny
//!
//! These tests run the full generation pipeline over complete Go templates,
//! with import normalization disabled so the merged text can be checked
//! exactly.

mod test_harness;

use genny::{GenerateError, HEADER, Options};
use test_harness::{TestHarness, lines_starting_with};

#[test]
fn test_queue_single_type() {
    let harness = TestHarness::new();
    let output = harness.assert_generates("queue.go", "Something=int");

    assert!(output.starts_with(HEADER));
    assert!(output.contains("// IntQueue is a queue of Ints.\ntype IntQueue struct {\n"));
    assert!(output.contains("items [ ] int\n"));
    assert!(output.contains("func NewIntQueue ( ) * IntQueue {\n"));
    assert!(output.contains("return & IntQueue { items : make ( [ ] int , 0 ) }\n"));
    assert!(output.contains("func ( q * IntQueue ) Push ( item int ) {\n"));
    assert!(output.contains("func ( q * IntQueue ) Pop ( ) int {\n"));

    // Lines without a placeholder are copied untouched.
    assert!(output.contains("\tq.items = append(q.items, item)\n"));

    assert!(!output.contains("Something"));
    assert!(!output.contains("generic"));
}

#[test]
fn test_placeholder_declaration_drops_its_comment() {
    let harness = TestHarness::new();
    let output = harness.assert_generates("queue.go", "Something=int");
    assert!(!output.contains("element type"));
}

#[test]
fn test_generate_directive_removed() {
    let harness = TestHarness::new();
    assert!(harness.load("queue.go").contains("//go:generate genny "));

    let output = harness.assert_generates("queue.go", "Something=int,string");
    assert!(lines_starting_with(&output, "//go:generate").is_empty());
}

#[test]
fn test_pointer_specific_type() {
    let harness = TestHarness::new();
    let output = harness.assert_generates("queue.go", "Something=*pkg.Thing");

    assert!(output.contains("type PkgThingQueue struct {\n"));
    assert!(output.contains("func ( q * PkgThingQueue ) Push ( item *pkg.Thing ) {\n"));
}

#[test]
fn test_instantiations_in_set_order() {
    let harness = TestHarness::new();
    let output = harness.assert_generates("queue.go", "Something=string,int,bool");

    let positions: Vec<usize> = ["type StringQueue", "type IntQueue", "type BoolQueue"]
        .iter()
        .map(|needle| output.find(needle).expect("instantiation present"))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

    assert_eq!(output.matches("// Push adds an item to the queue.\n").count(), 3);
}

#[test]
fn test_single_package_clause_and_no_imports() {
    let harness = TestHarness::new();
    let output = harness.assert_generates("maps.go", "KeyType=string,int ValueType=int");

    assert_eq!(lines_starting_with(&output, "package"), vec!["package maps"]);
    assert!(lines_starting_with(&output, "import").is_empty());
    assert!(!output.contains("\"sync\""));
    assert!(!output.lines().any(|line| line == ")"));
}

#[test]
fn test_two_placeholders() {
    let harness = TestHarness::new();
    let output = harness.assert_generates("maps.go", "KeyType=string,int ValueType=int");

    assert!(output.contains("// StringIntMap is a map safe for concurrent use.\n"));
    assert!(output.contains("type StringIntMap struct {\n"));
    assert!(output.contains("type IntIntMap struct {\n"));
    assert!(output.contains("data map [ string ] int\n"));
    assert!(output.contains("data map [ int ] int\n"));
    assert!(output.contains("func ( m * StringIntMap ) Get ( key string ) ( int , bool ) {\n"));
    assert_eq!(output.matches("\tmu   sync.RWMutex\n").count(), 2);
}

#[test]
fn test_number_placeholder_expansion() {
    let harness = TestHarness::new();
    let output = harness.assert_generates("numbers.go", "NumberType=NUMBERS");

    assert_eq!(lines_starting_with(&output, "func Max").len(), genny::NUMBERS.len());
    assert!(output.contains("func MaxFloat32 ( a , b float32 ) float32 {\n"));
    assert!(output.contains("func MaxUint8 ( a , b uint8 ) uint8 {\n"));
    assert!(output.contains("// MaxInt64 returns the larger of a and b.\n"));
}

#[test]
fn test_package_rename() {
    let harness = TestHarness::new();
    let output = harness
        .generate_with(
            Options::new("queue.go").with_package_name("things"),
            "Something=int",
        )
        .unwrap();

    assert_eq!(lines_starting_with(&output, "package"), vec!["package things"]);
}

#[test]
fn test_missing_specific_type() {
    let harness = TestHarness::new();
    let error = harness.generate("maps.go", "KeyType=string").unwrap_err();

    match error {
        GenerateError::MissingSpecificType { generic_type } => {
            assert_eq!(generic_type, "ValueType")
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_invalid_template() {
    let harness = TestHarness::new();
    let error = harness.generate("invalid.go", "Item=int").unwrap_err();

    assert!(matches!(error, GenerateError::Source { ref filename, .. } if filename == "invalid.go"));
    let rendered = error.display_with_source(&harness.load("invalid.go"));
    assert!(rendered.contains("func (i Item) String( string {"));
}

#[test]
fn test_output_is_deterministic() {
    let harness = TestHarness::new();
    let first = harness.assert_generates("maps.go", "KeyType=string,int ValueType=int,bool");
    let second = harness.assert_generates("maps.go", "KeyType=string,int ValueType=int,bool");
    assert_eq!(first, second);
}
