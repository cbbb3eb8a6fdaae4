//! Lexemes and the regex scanner that produces them.
//!
//! The engine only depends on [`LexemeSource`]: a blocking pull of the next
//! lexeme that keeps returning an [`LexemeKind::End`] sentinel once the input
//! is exhausted. [`Lexer`] is the bundled producer for the JS-like grammar;
//! [`LexemeStream`] adapts any pre-built sequence.

use core_types::SourcePosition;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

/// Lexeme kinds distinguished by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LexemeKind {
    /// Alphanumeric identifier (keywords included)
    Name,
    /// Operator or delimiter
    Punctuator,
    /// Numeric literal
    Number,
    /// Double-quoted string literal, quotes included
    String,
    /// End-of-input sentinel
    End,
    /// Unterminated string or unrecognized character
    Invalid,
}

/// A lexical unit with its source position. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lexeme {
    /// Kind of lexeme
    pub kind: LexemeKind,
    /// Literal source text
    pub text: String,
    /// Where the lexeme starts
    pub position: SourcePosition,
}

impl Lexeme {
    /// Create a lexeme
    pub fn new(kind: LexemeKind, text: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    /// The end-of-input sentinel at `position`
    pub fn end(position: SourcePosition) -> Self {
        Self::new(LexemeKind::End, "(end)", position)
    }

    /// Whether this is the end-of-input sentinel
    pub fn is_end(&self) -> bool {
        self.kind == LexemeKind::End
    }
}

/// Pull-based producer of lexemes.
///
/// Once exhausted, implementations must return an `End` lexeme on every
/// further call.
pub trait LexemeSource {
    /// Give the next lexeme
    fn next_lexeme(&mut self) -> Lexeme;
}

const TOKEN_PATTERN: &str = concat!(
    r"(?P<space>\s+)",
    r"|(?P<comment>//[^\n]*)",
    r"|(?P<name>[a-zA-Z][a-zA-Z_0-9]*)",
    r"|(?P<float>\d+\.\d+[eE][+\-]?\d+|\d+[eE][+\-]?\d+|\d+\.\d+)",
    r"|(?P<int>\d+)",
    r#"|(?P<string>"(?:[^"\\]|\\(?:u[0-9a-fA-F]{4}|(?s:.)))*")"#,
    r"|(?P<punct>[(){}\[\]?.,:;~*/]|&&?|\|\|?|[+\-<>]=?|[!=](?:==)?)",
    r#"|(?P<unterminated>"(?:[^"\\]|\\(?:u[0-9a-fA-F]{4}|(?s:.)))*)"#,
    r"|(?P<error>.)",
);

static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(TOKEN_PATTERN).unwrap());

/// Lazy regex scanner for the JS-like grammar.
///
/// # Example
///
/// ```
/// use tdop_parser::{LexemeKind, Lexer, LexemeSource};
///
/// let mut lexer = Lexer::new("x += 1;");
/// assert_eq!(lexer.next_lexeme().kind, LexemeKind::Name);
/// assert_eq!(lexer.next_lexeme().text, "+=");
/// ```
pub struct Lexer<'a> {
    source: &'a str,
    offset: usize,
    /// Line and column of `offset`
    line: u32,
    column: u32,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column, self.offset)
    }

    /// Move the cursor to byte offset `end`, counting lines and columns on the way
    fn advance_to(&mut self, end: usize) {
        for c in self.source[self.offset..end].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = end;
    }

    fn classify(captures: &Captures<'_>) -> Option<LexemeKind> {
        if captures.name("space").is_some() || captures.name("comment").is_some() {
            None
        } else if captures.name("name").is_some() {
            Some(LexemeKind::Name)
        } else if captures.name("float").is_some() || captures.name("int").is_some() {
            Some(LexemeKind::Number)
        } else if captures.name("string").is_some() {
            Some(LexemeKind::String)
        } else if captures.name("punct").is_some() {
            Some(LexemeKind::Punctuator)
        } else {
            Some(LexemeKind::Invalid)
        }
    }
}

impl LexemeSource for Lexer<'_> {
    fn next_lexeme(&mut self) -> Lexeme {
        while self.offset < self.source.len() {
            let Some(captures) = TOKEN_REGEX.captures_at(self.source, self.offset) else {
                break;
            };
            let Some(matched) = captures.get(0) else {
                break;
            };
            self.advance_to(matched.start());
            let position = Lexer::position(self);
            self.advance_to(matched.end());

            if let Some(kind) = Self::classify(&captures) {
                return Lexeme::new(kind, matched.as_str(), position);
            }
        }

        self.advance_to(self.source.len());
        Lexeme::end(Lexer::position(self))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Lexeme;

    /// Yields every lexeme including the final `End`, then stops
    fn next(&mut self) -> Option<Lexeme> {
        if self.finished {
            return None;
        }
        let lexeme = self.next_lexeme();
        self.finished = lexeme.is_end();
        Some(lexeme)
    }
}

/// Adapts a finite lexeme sequence into a [`LexemeSource`].
///
/// Any `End` lexeme inside the sequence terminates it; when the sequence
/// runs out the sentinel is synthesized at the last known position.
pub struct LexemeStream<I> {
    lexemes: I,
    last_position: SourcePosition,
    exhausted: bool,
}

impl<I: Iterator<Item = Lexeme>> LexemeStream<I> {
    /// Wrap an iterator of lexemes
    pub fn new(lexemes: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            lexemes: lexemes.into_iter(),
            last_position: SourcePosition::new(1, 1, 0),
            exhausted: false,
        }
    }
}

impl<I: Iterator<Item = Lexeme>> LexemeSource for LexemeStream<I> {
    fn next_lexeme(&mut self) -> Lexeme {
        if !self.exhausted {
            if let Some(lexeme) = self.lexemes.next() {
                self.last_position = lexeme.position;
                self.exhausted = lexeme.is_end();
                return lexeme;
            }
            self.exhausted = true;
        }
        Lexeme::end(self.last_position)
    }
}

/// Scan `source` into a vector of lexemes ending with the `End` sentinel
pub fn tokenize(source: &str) -> Vec<Lexeme> {
    Lexer::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(source: &str) -> Vec<(LexemeKind, String)> {
        tokenize(source)
            .into_iter()
            .map(|l| (l.kind, l.text))
            .collect()
    }

    #[test]
    fn test_scans_simple_statement() {
        let lexemes = kinds_and_texts("let answer = 42;");
        assert_eq!(
            lexemes,
            vec![
                (LexemeKind::Name, "let".to_string()),
                (LexemeKind::Name, "answer".to_string()),
                (LexemeKind::Punctuator, "=".to_string()),
                (LexemeKind::Number, "42".to_string()),
                (LexemeKind::Punctuator, ";".to_string()),
                (LexemeKind::End, "(end)".to_string()),
            ]
        );
    }

    #[test]
    fn test_multi_character_punctuators() {
        let texts: Vec<String> = tokenize("a === b !== c && d || e <= f += -=")
            .into_iter()
            .filter(|l| l.kind == LexemeKind::Punctuator)
            .map(|l| l.text)
            .collect();
        assert_eq!(texts, vec!["===", "!==", "&&", "||", "<=", "+=", "-="]);
    }

    #[test]
    fn test_numbers() {
        let texts: Vec<String> = tokenize("1 2.5 3e10 4.0E-2")
            .into_iter()
            .filter(|l| l.kind == LexemeKind::Number)
            .map(|l| l.text)
            .collect();
        assert_eq!(texts, vec!["1", "2.5", "3e10", "4.0E-2"]);
    }

    #[test]
    fn test_strings_keep_quotes_and_escapes() {
        let lexemes = tokenize(r#""a \"b\" c""#);
        assert_eq!(lexemes[0].kind, LexemeKind::String);
        assert_eq!(lexemes[0].text, r#""a \"b\" c""#);
    }

    #[test]
    fn test_strings_may_span_lines() {
        let lexemes = tokenize("x = \"a\nb\";\n y");
        assert_eq!(lexemes[2].kind, LexemeKind::String);
        assert_eq!(lexemes[2].text, "\"a\nb\"");
        assert_eq!(lexemes[3].position, SourcePosition::new(2, 3, 9));
        assert_eq!(lexemes[4].position, SourcePosition::new(3, 2, 12));
    }

    #[test]
    fn test_columns_count_chars_not_bytes() {
        let lexemes = tokenize("s = \"\u{e9}\"; t");
        let t = &lexemes[4];
        assert_eq!(t.text, "t");
        assert_eq!(t.position, SourcePosition::new(1, 10, 10));
    }

    #[test]
    fn test_positions_on_a_long_line() {
        let source = "x = 1; ".repeat(5_000);
        let lexemes = tokenize(&source);
        let last_x = &lexemes[lexemes.len() - 5];
        assert_eq!(last_x.text, "x");
        assert_eq!(last_x.position.line, 1);
        assert_eq!(last_x.position.column, 4_999 * 7 + 1);
        assert_eq!(last_x.position.offset, 4_999 * 7);
    }

    #[test]
    fn test_unterminated_string_is_invalid() {
        let lexemes = tokenize(r#"x = "oops"#);
        assert_eq!(lexemes[2].kind, LexemeKind::Invalid);
    }

    #[test]
    fn test_stray_character_is_invalid() {
        let lexemes = tokenize("a @ b");
        assert_eq!(lexemes[1].kind, LexemeKind::Invalid);
        assert_eq!(lexemes[1].text, "@");
    }

    #[test]
    fn test_comments_are_skipped() {
        let lexemes = kinds_and_texts("x // the rest\ny");
        assert_eq!(lexemes.len(), 3);
        assert_eq!(lexemes[1].1, "y");
    }

    #[test]
    fn test_positions_track_lines_and_columns() {
        let lexemes = tokenize("let x;\n  x = 1;");
        let x = &lexemes[3];
        assert_eq!(x.text, "x");
        assert_eq!(x.position.line, 2);
        assert_eq!(x.position.column, 3);
        assert_eq!(x.position.offset, 9);
    }

    #[test]
    fn test_end_sentinel_repeats() {
        let mut lexer = Lexer::new("a");
        assert_eq!(lexer.next_lexeme().text, "a");
        assert!(lexer.next_lexeme().is_end());
        assert!(lexer.next_lexeme().is_end());
    }

    #[test]
    fn test_stream_synthesizes_end() {
        let pos = SourcePosition::new(4, 2, 30);
        let mut stream = LexemeStream::new(vec![Lexeme::new(LexemeKind::Name, "a", pos)]);
        assert_eq!(stream.next_lexeme().text, "a");
        let end = stream.next_lexeme();
        assert!(end.is_end());
        assert_eq!(end.position, pos);
        assert!(stream.next_lexeme().is_end());
    }
}
