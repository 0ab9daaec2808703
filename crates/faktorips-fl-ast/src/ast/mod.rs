//! Untyped formula syntax tree.
//!
//! - [`expr`]: expression nodes produced by the parser
//! - [`walk`]: pre-order traversal helper

pub mod expr;
pub mod walk;

pub use expr::{Expr, ExprKind, Literal};
pub use walk::walk_expr;
