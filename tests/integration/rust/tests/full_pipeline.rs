//! Full Pipeline Integration Tests
//!
//! Tests the complete flow: Source -> Lexer -> Lexemes -> Parser -> Node

use core_types::{ErrorKind, ParseError, SourcePosition};
use tdop_parser::{
    tokenize, Associativity, Lexeme, LexemeKind, LexemeStream, Lexer, Node, Parser, RuleTable,
};

/// Helper function to parse source through an explicit lexeme vector
fn parse_via_lexemes(source: &str) -> Result<Option<Node>, ParseError> {
    Parser::new().parse_lexemes(tokenize(source))
}

/// Test: the lazy scanner and a materialized lexeme vector give the same tree
#[test]
fn test_pipeline_sources_agree() {
    let programs = [
        "let answer = 42;",
        "let x; x = 1+2*3/(4-5);",
        "let x, y, z; if (x) { y(); } else { z(); }",
        "let f = function (a) { while (a) { a -= 1; } return a; };",
        r#"o = {name: "tdop", "power": [10, 20]};"#,
    ];

    let parser = Parser::new();
    for source in programs {
        let lazy = parser.parse(Lexer::new(source)).expect("lazy scan failed");
        let eager = parse_via_lexemes(source).expect("lexeme vector failed");
        assert_eq!(lazy, eager, "trees differ for {:?}", source);
    }
}

/// Test: lexeme positions flow through to error reports
#[test]
fn test_pipeline_error_position() {
    let err = parse_via_lexemes("let a;\n  let a;").unwrap_err();

    assert_eq!(err.kind, ErrorKind::AlreadyDefined);
    assert_eq!(err.text, "a");
    assert_eq!(err.position, SourcePosition::new(2, 7, 13));
    assert_eq!(err.to_string(), "Already defined at 2:7 (near 'a')");
}

/// Test: hand-built lexemes without an end sentinel
#[test]
fn test_pipeline_hand_built_lexemes() {
    let at = |column| SourcePosition::new(1, column, column as usize - 1);
    let lexemes = vec![
        Lexeme::new(LexemeKind::Name, "x", at(1)),
        Lexeme::new(LexemeKind::Punctuator, "=", at(3)),
        Lexeme::new(LexemeKind::Number, "7", at(5)),
        Lexeme::new(LexemeKind::Punctuator, ";", at(6)),
    ];

    let tree = Parser::new().parse(LexemeStream::new(lexemes)).unwrap();
    assert_eq!(tree.map(|n| n.to_string()), Some("(= x 7)".to_string()));
}

/// Test: a caller-built grammar drives the same engine
#[test]
fn test_pipeline_custom_grammar() {
    let mut rules = RuleTable::new();
    for spelling in [";", ")"] {
        rules.register(spelling, -1);
    }
    rules.define_assignment("=");
    rules.define_infix("+", 50, Associativity::Left, None);
    rules.define_infix("*", 50, Associativity::Left, None);
    rules.define_prefix("(", Some(tdop_parser::PrefixRule::Group));

    let parser = Parser::with_rules(rules);

    // Equal power: plain left-to-right grouping
    let tree = parser.parse_str("x = 1 + 2 * 3;").unwrap().unwrap();
    assert_eq!(tree.to_string(), "(= x (* (+ 1 2) 3))");

    // Keywords of the standard grammar are free names here
    let tree = parser.parse_str("while = 1;").unwrap().unwrap();
    assert_eq!(tree.to_string(), "(= while 1)");

    // Operators outside the custom table are rejected
    let err = parser.parse_str("x = 1 - 2;").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownOperator);
}

/// Test: nested functions with shadowed parameters
#[test]
fn test_pipeline_nested_scopes() {
    let source = "
        let make = function (x) {
            let inner = function (x) { return x; };
            return inner;
        };
        make(1)(2);
    ";

    let tree = Parser::new().parse_str(source).unwrap();
    match tree {
        Some(Node::StatementList(statements)) => {
            assert_eq!(statements.len(), 2);
            assert_eq!(statements[1].to_string(), "(call (call make 1) 2)");
            match &statements[0] {
                Node::Assignment { value, .. } => match value.as_ref() {
                    Node::Function { params, body, .. } => {
                        assert_eq!(params, &vec!["x".to_string()]);
                        assert_eq!(body.len(), 2);
                    }
                    other => panic!("expected function, got {:?}", other),
                },
                other => panic!("expected assignment, got {:?}", other),
            }
        }
        other => panic!("expected statement list, got {:?}", other),
    }
}

/// Test: the first error aborts the parse
#[test]
fn test_pipeline_first_error_wins() {
    let err = Parser::new()
        .parse_str("let x; let x; 1 = 2;")
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::AlreadyDefined);
}

/// Test: scanner error lexemes surface as parse failures
#[test]
fn test_pipeline_scanner_errors() {
    let lexemes = tokenize("x = \"unterminated;");
    assert!(lexemes.iter().any(|l| l.kind == LexemeKind::Invalid));

    let err = Parser::new().parse_lexemes(lexemes).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedLexeme);
}
