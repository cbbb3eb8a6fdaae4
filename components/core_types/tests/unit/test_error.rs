//! Unit tests for ErrorKind and ParseError

use core_types::{ErrorKind, ParseError, ParseResult, SourcePosition};

#[cfg(test)]
mod parse_error_tests {
    use super::*;

    fn sample(kind: ErrorKind) -> ParseError {
        ParseError::new(kind, kind.description(), "x", SourcePosition::new(1, 5, 4))
    }

    #[test]
    fn test_error_carries_lexeme_text_and_position() {
        let error = sample(ErrorKind::AlreadyDefined);

        assert_eq!(error.kind, ErrorKind::AlreadyDefined);
        assert_eq!(error.text, "x");
        assert_eq!(error.position.line, 1);
        assert_eq!(error.position.column, 5);
    }

    #[test]
    fn test_error_display_format() {
        let error = sample(ErrorKind::UnreachableStatement);
        assert_eq!(
            error.to_string(),
            "Unreachable statement at 1:5 (near 'x')"
        );
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(sample(ErrorKind::BadLvalue));
        assert!(error.to_string().starts_with("Bad lvalue"));
    }

    #[test]
    fn test_kind_descriptions() {
        assert_eq!(ErrorKind::UndefinedPrefixUse.description(), "Undefined");
        assert_eq!(ErrorKind::MissingOperator.description(), "Missing operator");
        assert_eq!(ErrorKind::AlreadyReserved.description(), "Already reserved");
        assert_eq!(
            ErrorKind::BadExpressionStatement.description(),
            "Bad expression statement"
        );
    }

    #[test]
    fn test_parse_result_alias() {
        let ok: ParseResult<u32> = Ok(1);
        let err: ParseResult<u32> = Err(sample(ErrorKind::BadCallee));

        assert!(ok.is_ok());
        assert!(matches!(err, Err(ParseError { kind: ErrorKind::BadCallee, .. })));
    }
}
