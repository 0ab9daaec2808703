//! Expression tree walking.
//!
//! A single closure-based pre-order walk; passes that inspect the untyped
//! tree (identifier collection, function name listing) share it instead of
//! repeating the recursion.
//!
//! # Examples
//!
//! ```
//! # use faktorips_fl_ast::*;
//! let expr = Expr::new(ExprKind::Identifier("premium".into()), Span::default());
//! let mut names = Vec::new();
//! walk_expr(&expr, &mut |node| {
//!     if let ExprKind::Identifier(name) = &node.kind {
//!         names.push(name.clone());
//!     }
//! });
//! assert_eq!(names, vec!["premium"]);
//! ```

use super::{Expr, ExprKind};

/// Visit `expr` and then its children, left to right.
pub fn walk_expr<V>(expr: &Expr, visitor: &mut V)
where
    V: FnMut(&Expr),
{
    visitor(expr);

    match &expr.kind {
        ExprKind::Binary { left, right, .. } => {
            walk_expr(left, visitor);
            walk_expr(right, visitor);
        }
        ExprKind::Unary { operand, .. } => walk_expr(operand, visitor),
        ExprKind::Call { args, .. } => {
            for arg in args {
                walk_expr(arg, visitor);
            }
        }
        ExprKind::Parenthesized(inner) => walk_expr(inner, visitor),
        ExprKind::Literal(_) | ExprKind::Identifier(_) => {}
    }
}
