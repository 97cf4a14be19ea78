//! End-to-end compilation scenarios
//!
//! Each case compiles a small document and checks the resulting value tree and the
//! recorded faults.

use cfgl::cfgl::diagnostics::{Fault, FaultClass};
use cfgl::{compile, CompileOptions, Map, Value};
use rstest::rstest;

fn int(i: i64) -> Value {
    Value::Integer(i)
}

fn map(entries: Vec<(&str, Value)>) -> Value {
    Value::Map(entries.into_iter().collect::<Map>())
}

fn seq(items: Vec<Value>) -> Value {
    Value::Sequence(items)
}

fn compile_clean(source: &str) -> Value {
    let compilation = compile(source, &CompileOptions::default()).expect("source to compile");
    assert!(
        compilation.faults.is_empty(),
        "unexpected faults: {:?}",
        compilation.faults
    );
    compilation.document
}

#[rstest]
#[case::declaration("x = 5;", map(vec![("x", int(5))]))]
#[case::reference_in_map("x = 5; { a: §x§ }", map(vec![("x", int(5)), ("a", int(5))]))]
#[case::sequence_alone("( 1, 2, 3 )", seq(vec![int(1), int(2), int(3)]))]
#[case::map_then_sequence(
    "{ a: 1 } ( 2, 3 )",
    seq(vec![map(vec![("a", int(1))]), seq(vec![int(2), int(3)])])
)]
#[case::later_keys_win(
    "{ a: 1, b: 2 } { b: 3 } a = 4;",
    map(vec![("a", int(4)), ("b", int(3))])
)]
#[case::floats_stay_floats(
    "{ f: 1.0, g: .5, h: 2e2, i: 7 }",
    map(vec![
        ("f", Value::Float(1.0)),
        ("g", Value::Float(0.5)),
        ("h", Value::Float(200.0)),
        ("i", int(7)),
    ])
)]
#[case::nested_constants(
    "base = { port: 80 }; list = ( §base§, §base§ ); { servers: §list§ }",
    map(vec![
        ("base", map(vec![("port", int(80))])),
        ("list", seq(vec![map(vec![("port", int(80))]), map(vec![("port", int(80))])])),
        ("servers", seq(vec![map(vec![("port", int(80))]), map(vec![("port", int(80))])])),
    ])
)]
#[case::comments_are_ignored(
    "--[[ header ]]\nx = 1; --[[ trailing\n comment ]] { y: -2 }",
    map(vec![("x", int(1)), ("y", int(-2))])
)]
#[case::empty_literals("{} ()", seq(vec![map(vec![]), seq(vec![])]))]
fn test_compiles_to(#[case] source: &str, #[case] expected: Value) {
    assert_eq!(compile_clean(source), expected);
}

#[test]
fn test_undefined_constant_becomes_null() {
    let compilation = compile("{ a: §missing§ }", &CompileOptions::default()).unwrap();
    assert_eq!(compilation.document, map(vec![("a", Value::Null)]));
    assert!(compilation.is_degraded());
    assert_eq!(compilation.faults.len(), 1);
    match &compilation.faults[0] {
        Fault::UndefinedConstant { name, line, .. } => {
            assert_eq!(name, "missing");
            assert_eq!(*line, 1);
        }
        other => panic!("expected an undefined constant fault, got {other:?}"),
    }
}

#[rstest]
#[case::empty("")]
#[case::spaces("   ")]
#[case::newlines("\n\n\t\n")]
fn test_empty_input_is_rejected(#[case] source: &str) {
    let error = compile(source, &CompileOptions::default()).unwrap_err();
    assert_eq!(error.faults, vec![Fault::EmptyInput]);
}

#[rstest]
#[case::bare_scalar("5")]
#[case::missing_semicolon("x = 5")]
#[case::trailing_comma("( 1, 2, )")]
#[case::unclosed_map("{ a: 1")]
#[case::name_as_value("{ a: b }")]
#[case::stray_token("x = 1; ;")]
fn test_syntax_errors_produce_no_document(#[case] source: &str) {
    let error = compile(source, &CompileOptions::default()).unwrap_err();
    assert!(error
        .faults
        .iter()
        .any(|fault| fault.class() == FaultClass::Syntax));
}

#[test]
fn test_reference_before_declaration() {
    let compilation = compile("{ a: §x§ } x = 1; { b: §x§ }", &CompileOptions::default()).unwrap();
    assert_eq!(
        compilation.document,
        map(vec![("a", Value::Null), ("x", int(1)), ("b", int(1))])
    );
    assert_eq!(compilation.faults.len(), 1);
}

#[test]
fn test_redeclaration_only_changes_later_references() {
    let document = compile_clean("x = 1; { a: §x§ } x = 2; { b: §x§ }");
    assert_eq!(
        document,
        map(vec![("x", int(2)), ("a", int(1)), ("b", int(2))])
    );
}

#[test]
fn test_declarations_surface_inside_mixed_documents() {
    let document = compile_clean("( 1 ) x = 2;");
    assert_eq!(document, seq(vec![seq(vec![int(1)]), map(vec![("x", int(2))])]));
}

#[test]
fn test_lexical_fault_on_reported_line() {
    let compilation = compile("x = 1;\n{ y: 2 } $", &CompileOptions::default()).unwrap();
    assert_eq!(
        compilation.faults[0].to_string(),
        "lexical error at line 2: unexpected character '$'"
    );
    assert_eq!(compilation.document, map(vec![("x", int(1)), ("y", int(2))]));
}

#[test]
fn test_syntax_fault_names_token() {
    let error = compile("{ a: 1 }\n( 2 ; )", &CompileOptions::default()).unwrap_err();
    assert_eq!(
        error.faults[0].to_string(),
        "syntax error at line 2: unexpected Semicolon (';')"
    );
}

#[test]
fn test_strict_mode_fails_on_any_fault() {
    let strict = CompileOptions::strict();
    assert!(compile("{ a: 1 }", &strict).is_ok());
    assert!(compile("{ a: 1 } ?", &strict).is_err());
    assert!(compile("{ a: §b§ }", &strict).is_err());
}

#[test]
fn test_deep_nesting_is_a_syntax_fault() {
    let depth = 20_000;
    let source = format!("{{ a: 1 }}\n{}{}", "(".repeat(depth), ")".repeat(depth));
    let error = compile(&source, &CompileOptions::default()).unwrap_err();
    assert_eq!(error.faults.len(), 1);
    assert_eq!(error.faults[0].class(), FaultClass::Syntax);
    assert_eq!(
        error.faults[0].to_string(),
        "syntax error at line 2: nesting exceeds 128 levels"
    );
}

#[test]
fn test_nesting_within_limit_compiles() {
    let depth = 100;
    let source = format!("{}{}", "(".repeat(depth), ")".repeat(depth));
    let mut document = compile_clean(&source);
    for _ in 1..depth {
        document = match document {
            Value::Sequence(mut items) if items.len() == 1 => items.remove(0),
            other => panic!("expected a one-item sequence, got {other:?}"),
        };
    }
    assert_eq!(document, seq(vec![]));
}
