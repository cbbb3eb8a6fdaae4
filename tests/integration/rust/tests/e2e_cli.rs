//! End-to-End CLI Integration Tests
//!
//! Tests the parser through the tdop_cli Driver API.
//! This is the highest level integration test - source text to printed tree.

use core_types::ErrorKind;
use tdop_cli::{CliError, Driver};
use tdop_parser::Node;

/// Test: single let with initializer
#[test]
fn test_e2e_let_answer() {
    let driver = Driver::new();
    let tree = driver.parse_string("let answer = 42;").expect("Parse failed");

    match tree {
        Some(Node::Assignment { target, value, .. }) => {
            assert_eq!(target.as_name(), Some("answer"));
            assert_eq!(value.as_literal(), Some("42"));
        }
        other => panic!("Expected assignment, got {:?}", other),
    }
}

/// Test: arithmetic precedence through the printed form
#[test]
fn test_e2e_arithmetic() {
    let output = Driver::new()
        .process("let x; x = 1+2*3/(4-5);")
        .expect("Parse failed");

    assert_eq!(output, "(statements (let) (= x (+ 1 (/ (* 2 3) (- 4 5)))))");
}

/// Test: if/else with calls in both branches
#[test]
fn test_e2e_if_else() {
    let output = Driver::new()
        .process("let x, y, z; if (x) { y(); } else { z(); }")
        .expect("Parse failed");

    assert_eq!(
        output,
        "(statements (let) (if x (block (call y)) (block (call z))))"
    );
}

/// Test: redeclaration
#[test]
fn test_e2e_redeclaration() {
    match Driver::new().process("let x; let x;") {
        Err(CliError::Parse(e)) => assert_eq!(e.kind, ErrorKind::AlreadyDefined),
        other => panic!("Expected AlreadyDefined, got {:?}", other),
    }
}

/// Test: JSON output of an if statement
#[test]
fn test_e2e_json_if() {
    let output = Driver::new()
        .with_json(true)
        .process("if (a) { b(); }")
        .expect("Parse failed");

    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["If"]["test"]["Name"], "a");
    assert_eq!(json["If"]["consequent"]["Block"][0]["Call"]["callee"]["Name"], "b");
    assert!(json["If"]["alternate"].is_null());
}

/// Test: a small program using every statement form
#[test]
fn test_e2e_program() {
    let source = r#"
        let count = 0, limit = 10;
        let step = function (n) {
            if (n < limit) {
                return n + 1;
            } else {
                return n;
            }
        };
        while (count < limit) {
            count = step(count);
            if (count === 5) { break; }
        }
        log("done", [count, limit]);
    "#;

    let output = Driver::new().process(source).expect("Parse failed");

    assert!(output.starts_with("(statements (let (= count 0) (= limit 10))"));
    assert!(output.contains("(= step (function (n) (if (< n limit)"));
    assert!(output.contains("(while (< count limit) (block (= count (call step count))"));
    assert!(output.ends_with("(call log \"done\" (array count limit)))"));
}
