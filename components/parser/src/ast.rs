//! Syntax tree node definitions
//!
//! Nodes are built once by the engine and never mutated afterwards. Each
//! variant carries only the fields meaningful for its construct.

use serde::Serialize;
use std::fmt;

/// Associativity of a binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Associativity {
    /// `a + b + c` groups as `(a + b) + c`
    Left,
    /// `a && b && c` groups as `a && (b && c)`
    Right,
}

/// One `key: value` entry of an object literal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    /// Property key, as written
    pub key: String,
    /// Property value
    pub value: Node,
}

/// Syntax tree node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    /// Number, string or constant literal text
    Literal(String),

    /// Identifier reference, declared or free
    Name(String),

    /// The `this` keyword
    This,

    /// Binary operator expression
    Binary {
        /// Operator spelling
        op: String,
        /// Left operand
        left: Box<Node>,
        /// Right operand
        right: Box<Node>,
        /// Associativity the operator was registered with
        assoc: Associativity,
    },

    /// Conditional expression `test ? consequent : alternate`
    Ternary {
        /// Condition
        test: Box<Node>,
        /// Value when the condition holds
        consequent: Box<Node>,
        /// Value otherwise
        alternate: Box<Node>,
    },

    /// Assignment (`=`, `+=`, `-=`), also produced by `let` initializers
    Assignment {
        /// Operator spelling
        op: String,
        /// Name, field access or index access
        target: Box<Node>,
        /// Assigned value
        value: Box<Node>,
    },

    /// Prefix operator expression
    Unary {
        /// Operator spelling
        op: String,
        /// Operand
        operand: Box<Node>,
    },

    /// `object.field`
    Field {
        /// Accessed object
        object: Box<Node>,
        /// Property name
        field: String,
    },

    /// `object[index]`
    Index {
        /// Accessed object
        object: Box<Node>,
        /// Index expression
        index: Box<Node>,
    },

    /// Function call
    Call {
        /// Called expression
        callee: Box<Node>,
        /// Argument expressions
        arguments: Vec<Node>,
    },

    /// `[a, b, ...]`
    Array(Vec<Node>),

    /// `{key: value, ...}`
    Object(Vec<Property>),

    /// Function literal
    Function {
        /// Optional function name
        name: Option<String>,
        /// Formal parameter names
        params: Vec<String>,
        /// Body statements
        body: Vec<Node>,
    },

    /// Brace-delimited block
    Block(Vec<Node>),

    /// `let` declaration with zero or several initializers
    Let(Vec<Node>),

    /// If statement
    If {
        /// Condition
        test: Box<Node>,
        /// Then branch
        consequent: Box<Node>,
        /// Else branch: a block or a chained `if`
        alternate: Option<Box<Node>>,
    },

    /// While loop
    While {
        /// Loop condition
        test: Box<Node>,
        /// Loop body
        body: Box<Node>,
    },

    /// Return statement
    Return(Option<Box<Node>>),

    /// Break statement
    Break,

    /// Two or more top-level statements
    StatementList(Vec<Node>),
}

impl Node {
    /// Whether this is an assignment expression
    pub fn is_assignment(&self) -> bool {
        matches!(self, Node::Assignment { .. })
    }

    /// Whether this is a call expression
    pub fn is_call(&self) -> bool {
        matches!(self, Node::Call { .. })
    }

    /// Whether this expression can be assigned to
    pub fn is_lvalue(&self) -> bool {
        matches!(self, Node::Name(_) | Node::Field { .. } | Node::Index { .. })
    }

    /// Identifier text if this is a name reference
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Node::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Literal text if this is a literal
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Node::Literal(text) => Some(text),
            _ => None,
        }
    }

    /// Whether a call may be applied to this expression
    pub(crate) fn is_callable(&self) -> bool {
        match self {
            Node::Name(_)
            | Node::Field { .. }
            | Node::Index { .. }
            | Node::Call { .. }
            | Node::Function { .. }
            | Node::Ternary { .. } => true,
            Node::Binary { op, .. } => op == "&&" || op == "||",
            _ => false,
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, head: &str, items: &[Node]) -> fmt::Result {
    write!(f, "({}", head)?;
    for item in items {
        write!(f, " {}", item)?;
    }
    write!(f, ")")
}

/// Single-line S-expression rendering
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(text) => write!(f, "{}", text),
            Node::Name(name) => write!(f, "{}", name),
            Node::This => write!(f, "this"),
            Node::Binary {
                op, left, right, ..
            } => write!(f, "({} {} {})", op, left, right),
            Node::Ternary {
                test,
                consequent,
                alternate,
            } => write!(f, "(? {} {} {})", test, consequent, alternate),
            Node::Assignment { op, target, value } => write!(f, "({} {} {})", op, target, value),
            Node::Unary { op, operand } => write!(f, "({} {})", op, operand),
            Node::Field { object, field } => write!(f, "(. {} {})", object, field),
            Node::Index { object, index } => write!(f, "([] {} {})", object, index),
            Node::Call { callee, arguments } => {
                write!(f, "(call {}", callee)?;
                for argument in arguments {
                    write!(f, " {}", argument)?;
                }
                write!(f, ")")
            }
            Node::Array(elements) => write_list(f, "array", elements),
            Node::Object(properties) => {
                write!(f, "(object")?;
                for property in properties {
                    write!(f, " ({} {})", property.key, property.value)?;
                }
                write!(f, ")")
            }
            Node::Function { name, params, body } => {
                write!(f, "(function ")?;
                if let Some(name) = name {
                    write!(f, "{} ", name)?;
                }
                write!(f, "({})", params.join(" "))?;
                for statement in body {
                    write!(f, " {}", statement)?;
                }
                write!(f, ")")
            }
            Node::Block(statements) => write_list(f, "block", statements),
            Node::Let(initializers) => write_list(f, "let", initializers),
            Node::If {
                test,
                consequent,
                alternate,
            } => {
                write!(f, "(if {} {}", test, consequent)?;
                if let Some(alternate) = alternate {
                    write!(f, " {}", alternate)?;
                }
                write!(f, ")")
            }
            Node::While { test, body } => write!(f, "(while {} {})", test, body),
            Node::Return(Some(value)) => write!(f, "(return {})", value),
            Node::Return(None) => write!(f, "(return)"),
            Node::Break => write!(f, "(break)"),
            Node::StatementList(statements) => write_list(f, "statements", statements),
        }
    }
}
