//! Parser error helpers

use crate::lexer::Lexeme;
use core_types::{ErrorKind, ParseError};

/// Create an error of `kind` at the offending lexeme, using the kind's category message
pub fn syntax_error(kind: ErrorKind, lexeme: &Lexeme) -> ParseError {
    syntax_error_with(kind, kind.description(), lexeme)
}

/// Create an error of `kind` at the offending lexeme with a specific message
pub fn syntax_error_with(kind: ErrorKind, message: impl Into<String>, lexeme: &Lexeme) -> ParseError {
    ParseError::new(kind, message, lexeme.text.clone(), lexeme.position)
}

/// Create an error for a required spelling that was not found
pub fn expected_spelling(spelling: &str, got: &Lexeme) -> ParseError {
    syntax_error_with(
        ErrorKind::ExpectedSpelling,
        format!("Expected '{}'", spelling),
        got,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::LexemeKind;
    use core_types::SourcePosition;

    fn lexeme(text: &str) -> Lexeme {
        Lexeme::new(LexemeKind::Punctuator, text, SourcePosition::new(3, 9, 40))
    }

    #[test]
    fn test_syntax_error() {
        let err = syntax_error(ErrorKind::BadLvalue, &lexeme("="));
        assert_eq!(err.kind, ErrorKind::BadLvalue);
        assert_eq!(err.message, "Bad lvalue");
        assert_eq!(err.text, "=");
        assert_eq!(err.position.line, 3);
    }

    #[test]
    fn test_expected_spelling() {
        let err = expected_spelling(";", &lexeme("}"));
        assert_eq!(err.kind, ErrorKind::ExpectedSpelling);
        assert!(err.message.contains("Expected ';'"));
    }
}
