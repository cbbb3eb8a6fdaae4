//! Parse error types.
//!
//! Every structural violation found while parsing is unrecoverable: the
//! engine stops at the first one and hands a single [`ParseError`] back to
//! the caller, carrying the offending lexeme's text and position.

use crate::SourcePosition;
use serde::Serialize;
use thiserror::Error;

/// The category of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Spelling has no prefix meaning
    UndefinedPrefixUse,
    /// Spelling appeared where an infix continuation was expected but none is defined
    MissingOperator,
    /// Punctuator lexeme not present in the rule table
    UnknownOperator,
    /// Lexeme kind the classifier does not accept (scanner error lexemes)
    UnexpectedLexeme,
    /// A required literal spelling such as `;` or `)` was not found
    ExpectedSpelling,
    /// Assignment target is not a name, field access or index access
    BadLvalue,
    /// Bare expression statement is neither an assignment nor a call
    BadExpressionStatement,
    /// Field access not followed by an identifier
    ExpectedPropertyName,
    /// Formal parameter is not an identifier
    ExpectedParameterName,
    /// `let` declarator is not an identifier
    ExpectedVariableName,
    /// Object literal key is neither a name nor a literal
    BadPropertyName,
    /// Call applied to an operand that cannot evaluate to a callable
    BadCallee,
    /// Name already declared in the current scope frame
    AlreadyDefined,
    /// Name already reserved in the current scope frame
    AlreadyReserved,
    /// Statement follows `return` or `break` in the same block
    UnreachableStatement,
    /// Expressions or statements nested past the parser's depth limit
    NestingTooDeep,
}

impl ErrorKind {
    /// Human-readable category message
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::UndefinedPrefixUse => "Undefined",
            ErrorKind::MissingOperator => "Missing operator",
            ErrorKind::UnknownOperator => "Unknown operator",
            ErrorKind::UnexpectedLexeme => "Unexpected token",
            ErrorKind::ExpectedSpelling => "Expected token",
            ErrorKind::BadLvalue => "Bad lvalue",
            ErrorKind::BadExpressionStatement => "Bad expression statement",
            ErrorKind::ExpectedPropertyName => "Expected a property name",
            ErrorKind::ExpectedParameterName => "Expected a parameter name",
            ErrorKind::ExpectedVariableName => "Expected a new variable name",
            ErrorKind::BadPropertyName => "Bad property name",
            ErrorKind::BadCallee => "Expected a variable name",
            ErrorKind::AlreadyDefined => "Already defined",
            ErrorKind::AlreadyReserved => "Already reserved",
            ErrorKind::UnreachableStatement => "Unreachable statement",
            ErrorKind::NestingTooDeep => "Nesting too deep",
        }
    }
}

/// An unrecoverable parse failure.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, ParseError, SourcePosition};
///
/// let error = ParseError::new(
///     ErrorKind::AlreadyDefined,
///     "Already defined",
///     "x",
///     SourcePosition::new(1, 12, 11),
/// );
///
/// assert!(error.to_string().contains("Already defined"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message} at {position} (near '{text}')")]
pub struct ParseError {
    /// The category of failure
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Text of the offending lexeme
    pub text: String,
    /// Position of the offending lexeme
    pub position: SourcePosition,
}

impl ParseError {
    /// Create an error for the offending lexeme text at `position`
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        text: impl Into<String>,
        position: SourcePosition,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            text: text.into(),
            position,
        }
    }
}

/// Result alias used throughout the parser
pub type ParseResult<T> = Result<T, ParseError>;
