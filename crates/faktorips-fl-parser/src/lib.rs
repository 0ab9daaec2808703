// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Hand-written recursive descent parser for the formula language
//!
//! Turns the logos token stream into an untyped [`Expr`](faktorips_fl_ast::Expr)
//! tree. A formula is a single expression, so parsing stops at the first
//! error.

pub mod parser;

pub use parser::{ParseError, ParseErrorKind, parse_expr, parse_formula};

// Re-export lexer
pub use faktorips_fl_lexer::Token;
