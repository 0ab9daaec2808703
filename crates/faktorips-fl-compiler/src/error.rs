//! Rust-level errors of the compiler.
//!
//! Problems in a formula are never errors here; they are reported as
//! [`Message`](crate::message::Message)s. These types cover misconfigured
//! compilers and failures while evaluating a compiled formula.

use faktorips_fl_ast::{BinaryOp, MoneyError, UnaryOp};
use thiserror::Error;

/// A registration conflicts with an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("binary operation {lhs} {operator} {rhs} is already registered")]
    DuplicateBinaryOperation {
        operator: BinaryOp,
        lhs: String,
        rhs: String,
    },

    #[error("unary operation {operator}{operand} is already registered")]
    DuplicateUnaryOperation { operator: UnaryOp, operand: String },

    #[error("conversion from {from} to {to} is already registered")]
    DuplicateConversion { from: String, to: String },

    #[error("function {name}({params}) is already registered")]
    DuplicateFunction { name: String, params: String },

    #[error("identifier '{0}' is already registered")]
    DuplicateParameter(String),

    #[error("datatype '{0}' is already registered")]
    DuplicateDatatype(String),
}

/// Failure while evaluating a typed formula.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("parameter '{0}' is not bound")]
    UnboundParameter(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("{0} must not be null")]
    NullValue(String),

    #[error("{operation} expects {expected}, got {found}")]
    TypeMismatch {
        operation: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid argument for {operation}: {message}")]
    InvalidArgument { operation: String, message: String },

    #[error("arithmetic overflow in {0}")]
    Overflow(String),

    #[error("invalid literal '{0}'")]
    InvalidLiteral(String),

    #[error(transparent)]
    Money(#[from] MoneyError),
}
