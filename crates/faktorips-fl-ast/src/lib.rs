// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! AST types for the formula language
//!
//! This crate contains the untyped syntax tree produced by the parser and the
//! foundation types shared by parser, compiler and evaluator: spans,
//! operators, datatypes and runtime values.

pub mod ast;
pub mod foundation;

// Re-export commonly used types
pub use foundation::{
    BinaryOp, BuiltinValue, Currency, Datatype, DatatypeKind, DatatypeSet, EnumDatatype,
    GenericDatatype, Money, MoneyError, Span, UnaryOp, Value, compare_datatypes,
};

pub use ast::*;
