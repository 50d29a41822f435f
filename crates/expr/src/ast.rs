//! Defines the Abstract Syntax Tree (AST) for feature expressions.

use crate::value::Value;
use std::fmt;

/// The top-level expression that can be evaluated against a feature.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Value),
    /// A feature attribute, written `[name]`.
    Attribute(String),
    /// A context variable, written `@name`.
    Variable(String),
    FunctionCall {
        name: String,
        args: Vec<Expression>,
    },
    BinaryOp {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },
    UnaryOp {
        op: UnaryOperator,
        expr: Box<Expression>,
    },
}

impl Expression {
    /// True when the expression references neither feature attributes nor variables,
    /// so its value is the same for every feature.
    pub fn is_constant(&self) -> bool {
        match self {
            Expression::Literal(_) => true,
            Expression::Attribute(_) | Expression::Variable(_) => false,
            Expression::FunctionCall { args, .. } => args.iter().all(Expression::is_constant),
            Expression::BinaryOp { left, right, .. } => left.is_constant() && right.is_constant(),
            Expression::UnaryOp { expr, .. } => expr.is_constant(),
        }
    }

    /// Visits this expression and every sub-expression, depth first.
    pub fn walk<'e>(&'e self, visit: &mut impl FnMut(&'e Expression)) {
        visit(self);
        match self {
            Expression::FunctionCall { args, .. } => args.iter().for_each(|a| a.walk(visit)),
            Expression::BinaryOp { left, right, .. } => {
                left.walk(visit);
                right.walk(visit);
            }
            Expression::UnaryOp { expr, .. } => expr.walk(visit),
            Expression::Literal(_) | Expression::Attribute(_) | Expression::Variable(_) => {}
        }
    }

    /// Operands that would bind differently if printed bare.
    fn needs_parens(&self) -> bool {
        matches!(
            self,
            Expression::BinaryOp { .. }
                | Expression::UnaryOp {
                    op: UnaryOperator::Not,
                    ..
                }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Minus,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Logical
    Or,
    And,
    // Equality
    Equals,
    NotEquals,
    // Relational
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    // Additive
    Plus,
    Minus,
    // Multiplicative
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Or => "or",
            BinaryOperator::And => "and",
            BinaryOperator::Equals => "=",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        }
    }
}

/// Writes a string literal in the quoted form the parser accepts.
pub fn write_quoted(f: &mut impl fmt::Write, s: &str) -> fmt::Result {
    f.write_char('\'')?;
    for c in s.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('\'')
}

/// Canonical source form. Nested operations are parenthesized, so the output
/// parses back to the same tree.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operand = |f: &mut fmt::Formatter<'_>, e: &Expression| {
            if e.needs_parens() {
                write!(f, "({})", e)
            } else {
                write!(f, "{}", e)
            }
        };

        match self {
            Expression::Literal(Value::Null) => f.write_str("null"),
            Expression::Literal(Value::String(s)) => write_quoted(f, s),
            Expression::Literal(Value::Number(n)) if *n < 0.0 => write!(f, "({})", n),
            Expression::Literal(v) => write!(f, "{}", v),
            Expression::Attribute(name) => write!(f, "[{}]", name),
            Expression::Variable(name) => write!(f, "@{}", name),
            Expression::FunctionCall { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expression::BinaryOp { left, op, right } => {
                operand(f, left)?;
                write!(f, " {} ", op.symbol())?;
                operand(f, right)
            }
            Expression::UnaryOp { op, expr } => {
                f.write_str(match op {
                    UnaryOperator::Minus => "-",
                    UnaryOperator::Not => "not ",
                })?;
                operand(f, expr)
            }
        }
    }
}
