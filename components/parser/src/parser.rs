//! Top-down operator precedence parser
//!
//! The engine pulls one lexeme at a time, resolves it to a rule (through the
//! scope stack for identifiers, through the [`RuleTable`] otherwise) and
//! dispatches on the rule's prefix, infix or statement tag. Binding power
//! comparisons in [`Engine::parse_expression`] implement precedence; the
//! recursive bound chosen by each infix rule implements associativity.

use crate::ast::{Associativity, Node, Property};
use crate::error::{expected_spelling, syntax_error, syntax_error_with};
use crate::lexer::{Lexeme, LexemeKind, LexemeSource, LexemeStream, Lexer};
use crate::rules::{
    InfixRule, PrefixRule, Rule, RuleTable, StatementRule, END, LITERAL, NAME,
    PREFIX_OPERAND_POWER,
};
use crate::scope::{Binding, ScopeStack};
use core_types::{ErrorKind, ParseResult, SourcePosition};
use log::{debug, trace};

/// Deepest nesting of expressions and statements a parse accepts
pub const MAX_NESTING_DEPTH: usize = 128;

/// TDOP parser for the JS-like grammar.
///
/// The rule table is built once per parser; every call to [`Parser::parse`]
/// gets a fresh scope stack, so one parser can be reused for many inputs.
///
/// # Example
///
/// ```
/// use tdop_parser::Parser;
///
/// let parser = Parser::new();
/// let tree = parser.parse_str("let x; x = 1 + 2 * 3;").unwrap().unwrap();
/// assert_eq!(tree.to_string(), "(statements (let) (= x (+ 1 (* 2 3))))");
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    rules: RuleTable,
}

impl Parser {
    /// Create a parser for the standard grammar
    pub fn new() -> Self {
        Self::with_rules(RuleTable::standard())
    }

    /// Create a parser over a caller-built rule table
    pub fn with_rules(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// The rule table driving this parser
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Parse a lexeme stream into a statement tree.
    ///
    /// Returns `None` for an empty program, the statement itself when there
    /// is exactly one, and a [`Node::StatementList`] otherwise.
    pub fn parse<S: LexemeSource>(&self, source: S) -> ParseResult<Option<Node>> {
        Engine::new(&self.rules, source).parse_program()
    }

    /// Scan and parse source text
    pub fn parse_str(&self, source: &str) -> ParseResult<Option<Node>> {
        self.parse(Lexer::new(source))
    }

    /// Parse a pre-built lexeme sequence
    pub fn parse_lexemes(&self, lexemes: Vec<Lexeme>) -> ParseResult<Option<Node>> {
        self.parse(LexemeStream::new(lexemes))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Current parse token: an occurrence and the rule it resolved to
#[derive(Debug, Clone)]
struct Token<'t> {
    lexeme: Lexeme,
    rule: &'t Rule,
    /// Resolved as a plain identifier, declared or free
    is_name: bool,
}

impl Token<'_> {
    fn is(&self, spelling: &str) -> bool {
        self.rule.spelling == spelling
    }
}

/// Parsing state for one call to [`Parser::parse`]
struct Engine<'t, S> {
    rules: &'t RuleTable,
    source: S,
    scope: ScopeStack,
    token: Token<'t>,
    /// Active `parse_expression`/`parse_statement` calls
    depth: usize,
}

impl<'t, S: LexemeSource> Engine<'t, S> {
    fn new(rules: &'t RuleTable, source: S) -> Self {
        Self {
            rules,
            source,
            scope: ScopeStack::new(),
            token: Token {
                lexeme: Lexeme::end(SourcePosition::default()),
                rule: rules.pseudo(END),
                is_name: false,
            },
            depth: 0,
        }
    }

    fn parse_program(mut self) -> ParseResult<Option<Node>> {
        debug!("parse start");
        self.advance()?;
        let program = self.parse_statement_list()?;
        self.expect(END)?;
        debug!(
            "parse complete: {}",
            match &program {
                None => "empty program".to_string(),
                Some(Node::StatementList(statements)) => format!("{} statements", statements.len()),
                Some(_) => "1 statement".to_string(),
            }
        );
        Ok(program)
    }

    /// Pull the next lexeme, make it current, and return the previous token
    fn advance(&mut self) -> ParseResult<Token<'t>> {
        let lexeme = self.source.next_lexeme();
        trace!("lexeme {:?} {:?} at {}", lexeme.kind, lexeme.text, lexeme.position);

        let rules = self.rules;
        let (rule, is_name) = match lexeme.kind {
            LexemeKind::Name => self.resolve_name(&lexeme.text),
            LexemeKind::Punctuator => match rules.get(&lexeme.text) {
                Some(rule) => (rule, false),
                None => return Err(syntax_error(ErrorKind::UnknownOperator, &lexeme)),
            },
            LexemeKind::Number | LexemeKind::String => (rules.pseudo(LITERAL), false),
            LexemeKind::End => (rules.pseudo(END), false),
            LexemeKind::Invalid => return Err(syntax_error(ErrorKind::UnexpectedLexeme, &lexeme)),
        };

        let next = Token {
            lexeme,
            rule,
            is_name,
        };
        Ok(std::mem::replace(&mut self.token, next))
    }

    fn resolve_name(&self, spelling: &str) -> (&'t Rule, bool) {
        if let Some(rule) = self.scope.find(spelling).and_then(Binding::rule) {
            return (rule, true);
        }
        let rules = self.rules;
        match rules.get(spelling) {
            Some(rule) => (rule, false),
            None => (rules.pseudo(NAME), true),
        }
    }

    fn expect(&mut self, spelling: &str) -> ParseResult<Token<'t>> {
        if !self.token.is(spelling) {
            return Err(expected_spelling(spelling, &self.token.lexeme));
        }
        self.advance()
    }

    /// Run `parse` inside a new scope frame, popping it on every path
    fn scoped<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        self.scope.push_frame();
        let result = parse(self);
        self.scope.pop_frame();
        result
    }

    /// Run `parse` one nesting level deeper, failing past [`MAX_NESTING_DEPTH`]
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(syntax_error(ErrorKind::NestingTooDeep, &self.token.lexeme));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Comma-separated items up to and including `close`
    fn delimited<T>(
        &mut self,
        close: &str,
        mut item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        if !self.token.is(close) {
            loop {
                items.push(item(self)?);
                if !self.token.is(",") {
                    break;
                }
                self.advance()?;
            }
        }
        self.expect(close)?;
        Ok(items)
    }

    fn parse_expression(&mut self, right_binding_power: i32) -> ParseResult<Node> {
        self.nested(|engine| {
            let token = engine.advance()?;
            let mut left = engine.prefix(token)?;
            while right_binding_power < engine.token.rule.binding_power {
                let token = engine.advance()?;
                left = engine.infix(token, left)?;
            }
            Ok(left)
        })
    }

    fn prefix(&mut self, token: Token<'t>) -> ParseResult<Node> {
        let rule = token.rule;
        match &rule.prefix {
            PrefixRule::Undefined => Err(syntax_error(ErrorKind::UndefinedPrefixUse, &token.lexeme)),
            PrefixRule::Literal => Ok(Node::Literal(token.lexeme.text)),
            PrefixRule::FreeName | PrefixRule::Reference => Ok(Node::Name(token.lexeme.text)),
            PrefixRule::Constant(text) => {
                self.scope.reserve(&token.lexeme)?;
                Ok(Node::Literal(text.clone()))
            }
            PrefixRule::This => {
                self.scope.reserve(&token.lexeme)?;
                Ok(Node::This)
            }
            PrefixRule::Operator => {
                self.scope.reserve(&token.lexeme)?;
                let operand = self.parse_expression(PREFIX_OPERAND_POWER)?;
                Ok(Node::Unary {
                    op: token.lexeme.text,
                    operand: Box::new(operand),
                })
            }
            PrefixRule::Group => {
                let inner = self.parse_expression(0)?;
                self.expect(")")?;
                Ok(inner)
            }
            PrefixRule::Function => self.function_literal(),
            PrefixRule::Array => Ok(Node::Array(
                self.delimited("]", |engine| engine.parse_expression(0))?,
            )),
            PrefixRule::Object => self.object_literal(),
        }
    }

    fn infix(&mut self, token: Token<'t>, left: Node) -> ParseResult<Node> {
        let rule = token.rule;
        match rule.infix {
            InfixRule::MissingOperator => Err(syntax_error_with(
                ErrorKind::MissingOperator,
                format!("Missing operator; left: {}", left),
                &token.lexeme,
            )),
            InfixRule::Binary(assoc) => {
                let bound = match assoc {
                    Associativity::Left => rule.binding_power,
                    Associativity::Right => rule.binding_power - 1,
                };
                let right = self.parse_expression(bound)?;
                Ok(Node::Binary {
                    op: token.lexeme.text,
                    left: Box::new(left),
                    right: Box::new(right),
                    assoc,
                })
            }
            InfixRule::Assignment => {
                if !left.is_lvalue() {
                    return Err(syntax_error_with(
                        ErrorKind::BadLvalue,
                        format!("Bad lvalue: {}", left),
                        &token.lexeme,
                    ));
                }
                let value = self.parse_expression(rule.binding_power - 1)?;
                Ok(Node::Assignment {
                    op: token.lexeme.text,
                    target: Box::new(left),
                    value: Box::new(value),
                })
            }
            InfixRule::Ternary => {
                let consequent = self.parse_expression(0)?;
                self.expect(":")?;
                let alternate = self.parse_expression(0)?;
                Ok(Node::Ternary {
                    test: Box::new(left),
                    consequent: Box::new(consequent),
                    alternate: Box::new(alternate),
                })
            }
            InfixRule::Field => {
                if !self.token.is_name {
                    return Err(syntax_error(ErrorKind::ExpectedPropertyName, &self.token.lexeme));
                }
                let field = self.advance()?.lexeme.text;
                Ok(Node::Field {
                    object: Box::new(left),
                    field,
                })
            }
            InfixRule::Index => {
                let index = self.parse_expression(0)?;
                self.expect("]")?;
                Ok(Node::Index {
                    object: Box::new(left),
                    index: Box::new(index),
                })
            }
            InfixRule::Call => {
                if !left.is_callable() {
                    return Err(syntax_error_with(
                        ErrorKind::BadCallee,
                        format!("Expected a variable name; callee: {}", left),
                        &token.lexeme,
                    ));
                }
                let arguments = self.delimited(")", |engine| engine.parse_expression(0))?;
                Ok(Node::Call {
                    callee: Box::new(left),
                    arguments,
                })
            }
        }
    }

    fn function_literal(&mut self) -> ParseResult<Node> {
        let (name, params, body) = self.scoped(|engine| {
            let mut name = None;
            if engine.token.is_name {
                engine.scope.define(&engine.token.lexeme)?;
                name = Some(engine.advance()?.lexeme.text);
            }
            engine.expect("(")?;
            let params = engine.delimited(")", |engine| {
                if !engine.token.is_name {
                    return Err(syntax_error(
                        ErrorKind::ExpectedParameterName,
                        &engine.token.lexeme,
                    ));
                }
                engine.scope.define(&engine.token.lexeme)?;
                Ok(engine.advance()?.lexeme.text)
            })?;
            engine.expect("{")?;
            let body = engine.parse_statements()?;
            Ok((name, params, body))
        })?;
        self.expect("}")?;
        Ok(Node::Function { name, params, body })
    }

    fn object_literal(&mut self) -> ParseResult<Node> {
        let properties = self.delimited("}", |engine| {
            let key = &engine.token;
            let literal_key = matches!(key.lexeme.kind, LexemeKind::Number | LexemeKind::String);
            if !key.is_name && !literal_key {
                return Err(syntax_error(ErrorKind::BadPropertyName, &key.lexeme));
            }
            let key = engine.advance()?.lexeme.text;
            engine.expect(":")?;
            let value = engine.parse_expression(0)?;
            Ok(Property { key, value })
        })?;
        Ok(Node::Object(properties))
    }

    fn parse_statement(&mut self) -> ParseResult<Node> {
        self.nested(Self::statement_or_expression)
    }

    fn statement_or_expression(&mut self) -> ParseResult<Node> {
        if let Some(statement) = self.token.rule.statement {
            let keyword = self.advance()?;
            self.scope.reserve(&keyword.lexeme)?;
            return self.statement(statement);
        }

        let start = self.token.lexeme.clone();
        let expression = self.parse_expression(0)?;
        if !expression.is_assignment() && !expression.is_call() {
            return Err(syntax_error_with(
                ErrorKind::BadExpressionStatement,
                format!("Bad expression statement (toplevel is {})", expression),
                &start,
            ));
        }
        self.expect(";")?;
        Ok(expression)
    }

    fn statement(&mut self, rule: StatementRule) -> ParseResult<Node> {
        match rule {
            StatementRule::Block => self.block_body(),
            StatementRule::Let => self.let_statement(),
            StatementRule::If => self.if_statement(),
            StatementRule::While => self.while_statement(),
            StatementRule::Return => {
                let value = if self.token.is(";") {
                    None
                } else {
                    Some(Box::new(self.parse_expression(0)?))
                };
                self.expect(";")?;
                self.expect_block_end()?;
                Ok(Node::Return(value))
            }
            StatementRule::Break => {
                self.expect(";")?;
                self.expect_block_end()?;
                Ok(Node::Break)
            }
        }
    }

    /// `return` and `break` must be the last statement of their block
    fn expect_block_end(&self) -> ParseResult<()> {
        if self.token.is("}") {
            Ok(())
        } else {
            Err(syntax_error(ErrorKind::UnreachableStatement, &self.token.lexeme))
        }
    }

    /// Statements up to the closing brace, which the caller consumes
    fn parse_statements(&mut self) -> ParseResult<Vec<Node>> {
        let mut statements = Vec::new();
        while !self.token.is("}") && !self.token.is(END) {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_statement_list(&mut self) -> ParseResult<Option<Node>> {
        let mut statements = self.parse_statements()?;
        Ok(match statements.len() {
            0 => None,
            1 => statements.pop(),
            _ => Some(Node::StatementList(statements)),
        })
    }

    fn parse_block(&mut self) -> ParseResult<Node> {
        if self.token.rule.statement != Some(StatementRule::Block) {
            return Err(expected_spelling("{", &self.token.lexeme));
        }
        self.advance()?;
        self.block_body()
    }

    /// Block contents after the opening brace
    fn block_body(&mut self) -> ParseResult<Node> {
        let statements = self.scoped(Self::parse_statements)?;
        self.expect("}")?;
        Ok(Node::Block(statements))
    }

    fn let_statement(&mut self) -> ParseResult<Node> {
        let mut initializers = Vec::new();
        loop {
            if !self.token.is_name {
                return Err(syntax_error(ErrorKind::ExpectedVariableName, &self.token.lexeme));
            }
            self.scope.define(&self.token.lexeme)?;
            let name = self.advance()?.lexeme.text;
            if self.token.is("=") {
                let op = self.advance()?.lexeme.text;
                let value = self.parse_expression(0)?;
                initializers.push(Node::Assignment {
                    op,
                    target: Box::new(Node::Name(name)),
                    value: Box::new(value),
                });
            }
            if !self.token.is(",") {
                break;
            }
            self.advance()?;
        }
        self.expect(";")?;

        if initializers.len() == 1 {
            if let Some(only) = initializers.pop() {
                return Ok(only);
            }
        }
        Ok(Node::Let(initializers))
    }

    fn if_statement(&mut self) -> ParseResult<Node> {
        self.expect("(")?;
        let test = self.parse_expression(0)?;
        self.expect(")")?;
        let consequent = self.parse_block()?;

        let alternate = if self.token.is("else") {
            self.scope.reserve(&self.token.lexeme)?;
            self.advance()?;
            if self.token.is("if") {
                Some(Box::new(self.parse_statement()?))
            } else {
                Some(Box::new(self.parse_block()?))
            }
        } else {
            None
        };

        Ok(Node::If {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate,
        })
    }

    fn while_statement(&mut self) -> ParseResult<Node> {
        self.expect("(")?;
        let test = self.parse_expression(0)?;
        self.expect(")")?;
        let body = self.parse_block()?;
        Ok(Node::While {
            test: Box::new(test),
            body: Box::new(body),
        })
    }
}
