//! Lexical scope stack used while parsing
//!
//! Frames are kept on an explicit stack and pushed and popped in strict LIFO
//! order matching block and function nesting. Each frame maps a spelling to
//! its defining occurrence, which is either a declaration (`let`, parameter,
//! function name) or a reservation (a keyword-like word consumed by the
//! grammar in this frame).

use crate::error::syntax_error;
use crate::lexer::{Lexeme, LexemeKind};
use crate::rules::{Rule, REFERENCE_RULE};
use core_types::{ErrorKind, ParseResult};
use log::debug;
use std::collections::HashMap;

/// Defining occurrence of a spelling within one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Declared local name
    Declared(Lexeme),
    /// Word consumed syntactically; occupies the slot without being a variable
    Reserved(Lexeme),
}

impl Binding {
    /// The occurrence that created the binding
    pub fn lexeme(&self) -> &Lexeme {
        match self {
            Binding::Declared(lexeme) | Binding::Reserved(lexeme) => lexeme,
        }
    }

    /// Whether the binding is a reservation
    pub fn is_reserved(&self) -> bool {
        matches!(self, Binding::Reserved(_))
    }

    /// Rule attached to a declared name; reservations defer to the rule table
    pub(crate) fn rule(&self) -> Option<&'static Rule> {
        match self {
            Binding::Declared(_) => Some(&REFERENCE_RULE),
            Binding::Reserved(_) => None,
        }
    }
}

/// One level of lexical nesting
#[derive(Debug, Clone, Default)]
pub struct ScopeFrame {
    definitions: HashMap<String, Binding>,
}

impl ScopeFrame {
    /// Binding for `spelling` in this frame only
    pub fn get(&self, spelling: &str) -> Option<&Binding> {
        self.definitions.get(spelling)
    }

    /// Number of bindings in this frame
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the frame has no bindings
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Stack of scope frames for one parse.
///
/// A new stack holds the global frame, which is never popped.
///
/// # Example
///
/// ```
/// use core_types::SourcePosition;
/// use tdop_parser::{Lexeme, LexemeKind, ScopeStack};
///
/// let x = Lexeme::new(LexemeKind::Name, "x", SourcePosition::new(1, 5, 4));
/// let mut scope = ScopeStack::new();
/// scope.define(&x).unwrap();
///
/// scope.push_frame();
/// assert!(scope.find("x").is_some());
/// scope.define(&x).unwrap(); // shadowing in a nested frame is legal
/// scope.pop_frame();
///
/// assert!(scope.define(&x).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
}

impl ScopeStack {
    /// Create a stack holding only the global frame
    pub fn new() -> Self {
        Self {
            frames: vec![ScopeFrame::default()],
        }
    }

    /// Enter a nested frame
    pub fn push_frame(&mut self) {
        self.frames.push(ScopeFrame::default());
        debug!("scope push: depth {}", self.frames.len());
    }

    /// Leave the innermost frame; the global frame stays
    pub fn pop_frame(&mut self) -> Option<ScopeFrame> {
        if self.frames.len() <= 1 {
            return None;
        }
        let frame = self.frames.pop();
        debug!("scope pop: depth {}", self.frames.len());
        frame
    }

    /// Number of frames, global frame included
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn current(&mut self) -> &mut ScopeFrame {
        let innermost = self.frames.len() - 1;
        &mut self.frames[innermost]
    }

    /// Declare `occurrence` in the innermost frame
    pub fn define(&mut self, occurrence: &Lexeme) -> ParseResult<()> {
        if occurrence.kind != LexemeKind::Name {
            return Err(syntax_error(ErrorKind::ExpectedVariableName, occurrence));
        }
        let frame = self.current();
        match frame.get(&occurrence.text).map(Binding::is_reserved) {
            Some(true) => Err(syntax_error(ErrorKind::AlreadyReserved, occurrence)),
            Some(false) => Err(syntax_error(ErrorKind::AlreadyDefined, occurrence)),
            None => {
                frame
                    .definitions
                    .insert(occurrence.text.clone(), Binding::Declared(occurrence.clone()));
                Ok(())
            }
        }
    }

    /// Reserve a keyword-like `occurrence` in the innermost frame.
    ///
    /// Non-name lexemes and already reserved spellings are left alone.
    pub fn reserve(&mut self, occurrence: &Lexeme) -> ParseResult<()> {
        if occurrence.kind != LexemeKind::Name {
            return Ok(());
        }
        let frame = self.current();
        match frame.get(&occurrence.text).map(Binding::is_reserved) {
            Some(true) => Ok(()),
            Some(false) => Err(syntax_error(ErrorKind::AlreadyDefined, occurrence)),
            None => {
                frame
                    .definitions
                    .insert(occurrence.text.clone(), Binding::Reserved(occurrence.clone()));
                Ok(())
            }
        }
    }

    /// Innermost binding for `spelling`, searching outward
    pub fn find(&self, spelling: &str) -> Option<&Binding> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(spelling))
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
