//! Rule table: the spelling-keyed parse rules ("parselets").
//!
//! Rules are plain data. The engine dispatches on the [`PrefixRule`],
//! [`InfixRule`] and [`StatementRule`] tags, so the table holds no parsing
//! state and is only written while a grammar is bootstrapped.

use crate::ast::Associativity;
use std::collections::HashMap;

/// Binding power of spellings that never continue an expression
pub const NO_BINDING: i32 = -1;

/// Binding power used to parse the operand of a prefix operator
pub const PREFIX_OPERAND_POWER: i32 = 70;

/// Pseudo-spelling of the end-of-input sentinel
pub const END: &str = "(end)";

/// Pseudo-spelling of the rule used for undeclared names
pub const NAME: &str = "(name)";

/// Pseudo-spelling of the rule used for number and string literals
pub const LITERAL: &str = "(literal)";

/// Behavior when a spelling begins an expression ("nud")
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixRule {
    /// Spelling has no prefix meaning
    Undefined,
    /// Number or string literal
    Literal,
    /// Identifier with no declaration in scope
    FreeName,
    /// Identifier bound to a declaration in scope
    Reference,
    /// Reserved word standing for a literal with this canonical text
    Constant(String),
    /// The `this` keyword
    This,
    /// Prefix operator applied to an operand parsed at [`PREFIX_OPERAND_POWER`]
    Operator,
    /// Parenthesized expression
    Group,
    /// Function literal
    Function,
    /// Array literal
    Array,
    /// Object literal
    Object,
}

/// Behavior when a spelling follows a parsed left operand ("led")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixRule {
    /// Spelling cannot continue an expression
    MissingOperator,
    /// Binary operator
    Binary(Associativity),
    /// Assignment operator; left operand must be an lvalue
    Assignment,
    /// `? :` conditional
    Ternary,
    /// `.` field access
    Field,
    /// `[` index access
    Index,
    /// `(` call
    Call,
}

/// Behavior when a spelling begins a statement ("std")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementRule {
    /// `{ ... }` block with its own scope frame
    Block,
    /// `let` declarations
    Let,
    /// `if` / `else`
    If,
    /// `while` loop
    While,
    /// `return`
    Return,
    /// `break`
    Break,
}

/// Parse rule registered for one spelling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Spelling the rule is registered under
    pub spelling: String,
    /// Prefix behavior
    pub prefix: PrefixRule,
    /// Infix behavior
    pub infix: InfixRule,
    /// Statement behavior, for keywords
    pub statement: Option<StatementRule>,
    /// Left binding power; [`NO_BINDING`] if never an infix continuation
    pub binding_power: i32,
}

impl Rule {
    fn new(spelling: &str, binding_power: i32) -> Self {
        Self {
            spelling: spelling.to_string(),
            prefix: PrefixRule::Undefined,
            infix: InfixRule::MissingOperator,
            statement: None,
            binding_power,
        }
    }
}

/// Rule attached to a declared name: yields a reference to that name
pub(crate) static REFERENCE_RULE: Rule = Rule {
    spelling: String::new(),
    prefix: PrefixRule::Reference,
    infix: InfixRule::MissingOperator,
    statement: None,
    binding_power: 0,
};

/// Spelling-keyed registry of parse rules.
///
/// # Example
///
/// ```
/// use tdop_parser::{Associativity, RuleTable};
///
/// let mut rules = RuleTable::new();
/// rules.define_infix("+", 50, Associativity::Left, None);
/// assert_eq!(rules.get("+").map(|r| r.binding_power), Some(50));
/// ```
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: HashMap<String, Rule>,
}

impl RuleTable {
    /// Create a table holding only the pseudo-spellings the engine needs
    pub fn new() -> Self {
        let mut table = Self {
            rules: HashMap::new(),
        };
        table.register(END, NO_BINDING);
        table.register(NAME, NO_BINDING).prefix = PrefixRule::FreeName;
        table.register(LITERAL, NO_BINDING).prefix = PrefixRule::Literal;
        table
    }

    /// Create a table with the JS-like grammar
    pub fn standard() -> Self {
        let mut table = Self::new();

        for spelling in [":", ";", ")", "]", "}", ",", "else"] {
            table.register(spelling, NO_BINDING);
        }

        table.define_constant("true", "true");
        table.define_constant("false", "false");
        table.define_constant("null", "null");
        table.define_constant("pi", "3.141592653589793");
        table.define_prefix("this", Some(PrefixRule::This));

        table.define_assignment("=");
        table.define_assignment("+=");
        table.define_assignment("-=");

        table.define_infix("?", 20, Associativity::Left, Some(InfixRule::Ternary));

        table.define_infix("&&", 30, Associativity::Right, None);
        table.define_infix("||", 30, Associativity::Right, None);

        for op in ["===", "!==", "<", "<=", ">", ">="] {
            table.define_infix(op, 40, Associativity::Right, None);
        }

        table.define_infix("+", 50, Associativity::Left, None);
        table.define_infix("-", 50, Associativity::Left, None);
        table.define_infix("*", 60, Associativity::Left, None);
        table.define_infix("/", 60, Associativity::Left, None);

        table.define_infix(".", 80, Associativity::Left, Some(InfixRule::Field));
        table.define_infix("[", 80, Associativity::Left, Some(InfixRule::Index));
        table.define_infix("(", 80, Associativity::Left, Some(InfixRule::Call));

        table.define_prefix("!", None);
        table.define_prefix("-", None);
        table.define_prefix("typeof", None);
        table.define_prefix("(", Some(PrefixRule::Group));
        table.define_prefix("function", Some(PrefixRule::Function));
        table.define_prefix("[", Some(PrefixRule::Array));
        table.define_prefix("{", Some(PrefixRule::Object));

        table.define_statement("{", StatementRule::Block);
        table.define_statement("let", StatementRule::Let);
        table.define_statement("if", StatementRule::If);
        table.define_statement("while", StatementRule::While);
        table.define_statement("return", StatementRule::Return);
        table.define_statement("break", StatementRule::Break);

        table
    }

    /// Register `spelling`, keeping the stronger binding power if it exists
    pub fn register(&mut self, spelling: &str, binding_power: i32) -> &mut Rule {
        let rule = self
            .rules
            .entry(spelling.to_string())
            .or_insert_with(|| Rule::new(spelling, binding_power));
        rule.binding_power = rule.binding_power.max(binding_power);
        rule
    }

    /// Register a reserved word that yields a literal with `canonical_text`
    pub fn define_constant(&mut self, spelling: &str, canonical_text: &str) -> &mut Rule {
        let rule = self.register(spelling, NO_BINDING);
        rule.prefix = PrefixRule::Constant(canonical_text.to_string());
        rule
    }

    /// Register an infix operator; without a custom rule it is a plain binary operator
    pub fn define_infix(
        &mut self,
        spelling: &str,
        power: i32,
        assoc: Associativity,
        custom: Option<InfixRule>,
    ) -> &mut Rule {
        let rule = self.register(spelling, power);
        rule.infix = custom.unwrap_or(InfixRule::Binary(assoc));
        rule
    }

    /// Register a right-associative assignment operator at power 10
    pub fn define_assignment(&mut self, spelling: &str) -> &mut Rule {
        self.define_infix(spelling, 10, Associativity::Right, Some(InfixRule::Assignment))
    }

    /// Register a prefix rule; without a custom rule it is a prefix operator
    pub fn define_prefix(&mut self, spelling: &str, custom: Option<PrefixRule>) -> &mut Rule {
        let rule = self.register(spelling, NO_BINDING);
        rule.prefix = custom.unwrap_or(PrefixRule::Operator);
        rule
    }

    /// Register a statement rule for a keyword
    pub fn define_statement(&mut self, spelling: &str, statement: StatementRule) -> &mut Rule {
        let rule = self.register(spelling, NO_BINDING);
        rule.statement = Some(statement);
        rule
    }

    /// Look up the rule for `spelling`
    pub fn get(&self, spelling: &str) -> Option<&Rule> {
        self.rules.get(spelling)
    }

    /// Rule for a pseudo-spelling registered by [`RuleTable::new`]
    pub(crate) fn pseudo(&self, spelling: &str) -> &Rule {
        &self.rules[spelling]
    }

    /// Whether `spelling` has a rule
    pub fn contains(&self, spelling: &str) -> bool {
        self.rules.contains_key(spelling)
    }

    /// Number of registered spellings
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The standard JS-like grammar
impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}
