//! Operator enums for binary and unary expressions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators of the formula language.
///
/// Each operator is resolved against the operand datatypes to a concrete
/// operation; the enum itself carries no typing information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    /// Addition: `a + b`
    Add,
    /// Subtraction: `a - b`
    Sub,
    /// Multiplication: `a * b`
    Mul,
    /// Division: `a / b`
    Div,

    // Comparison
    /// Equal: `a = b`
    Eq,
    /// Not equal: `a != b`
    Ne,
    /// Less than: `a < b`
    Lt,
    /// Less than or equal: `a <= b`
    Le,
    /// Greater than: `a > b`
    Gt,
    /// Greater than or equal: `a >= b`
    Ge,
}

impl BinaryOp {
    /// All binary operators in declaration order.
    pub const ALL: [BinaryOp; 10] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Eq,
        BinaryOp::Ne,
        BinaryOp::Lt,
        BinaryOp::Le,
        BinaryOp::Gt,
        BinaryOp::Ge,
    ];

    /// Formula spelling of the operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }

    /// Whether the operator yields a boolean.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Identity: `+x`
    Plus,
    /// Negation: `-x`
    Minus,
    /// Logical not: `!x`
    Not,
}

impl UnaryOp {
    /// All unary operators in declaration order.
    pub const ALL: [UnaryOp; 3] = [UnaryOp::Plus, UnaryOp::Minus, UnaryOp::Not];

    /// Formula spelling of the operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
