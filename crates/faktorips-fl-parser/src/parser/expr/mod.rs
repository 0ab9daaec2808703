//! Expression parser using Pratt parsing (precedence climbing).
//!
//! ## Precedence Levels (lowest to highest)
//!
//! 1. `=`, `!=`, `<`, `<=`, `>`, `>=` (Comparison) - left associative
//! 2. `+`, `-` (Addition) - left associative
//! 3. `*`, `/` (Multiplication) - left associative
//! 4. Unary `+`, `-`, `!` - prefix
//! 5. Atoms: literals, identifiers, calls, parenthesized expressions
//!
//! ## Module Organization
//!
//! - `pratt` - Pratt parser core (precedence climbing, binary/unary ops)
//! - `atoms` - Atomic expressions (literals, identifiers, calls, parentheses)

mod atoms;
mod pratt;

use super::{ParseError, TokenStream};
use faktorips_fl_ast::Expr;

/// Parse an expression.
pub fn parse_expr(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    pratt::parse_pratt(stream, 0)
}
