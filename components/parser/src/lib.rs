//! Top-down operator precedence parser for a small JavaScript-like language
//!
//! Provides the lexeme model and scanner, the spelling-keyed rule table, the
//! lexical scope stack and the parsing engine that turns a lexeme stream
//! into an immutable syntax tree.
//!
//! # Overview
//!
//! - [`Lexer`] - Scans source text into [`Lexeme`]s
//! - [`LexemeSource`] - Pull-based boundary the engine consumes
//! - [`RuleTable`] - Prefix, infix and statement rules keyed by spelling
//! - [`ScopeStack`] - Declared and reserved names per nesting level
//! - [`Parser`] - The precedence-climbing engine
//! - [`Node`] - Syntax tree node types
//!
//! # Example
//!
//! ```
//! use tdop_parser::{Node, Parser};
//!
//! let parser = Parser::new();
//! let tree = parser.parse_str("let answer = 42;").unwrap();
//!
//! match tree {
//!     Some(Node::Assignment { target, value, .. }) => {
//!         assert_eq!(target.as_name(), Some("answer"));
//!         assert_eq!(value.as_literal(), Some("42"));
//!     }
//!     other => panic!("unexpected tree: {:?}", other),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod rules;
pub mod scope;

pub use ast::{Associativity, Node, Property};
pub use lexer::{tokenize, Lexeme, LexemeKind, LexemeSource, LexemeStream, Lexer};
pub use parser::{Parser, MAX_NESTING_DEPTH};
pub use rules::{InfixRule, PrefixRule, Rule, RuleTable, StatementRule};
pub use scope::{Binding, ScopeFrame, ScopeStack};
