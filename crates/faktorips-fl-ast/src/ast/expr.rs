//! Expression nodes.
//!
//! The parser produces [`Expr`] trees that carry syntax only. Datatypes and
//! operations are attached later by the compiler, which builds a separate
//! typed tree instead of mutating this one.
//!
//! `Display` prints the canonical formula text: single spaces around binary
//! operators, `;` between call arguments, parentheses exactly where the
//! source had them.

use crate::foundation::{BinaryOp, Span, UnaryOp};
use std::fmt;

/// Expression node with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Literal as written in the formula.
///
/// Decimal and money literals keep their source text; the compiler emits
/// them verbatim into `Decimal.valueOf("…")` / `Money.valueOf("…")`.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i32),
    Decimal(String),
    Money(String),
    String(String),
    Boolean(bool),
    Null,
}

/// Expression variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Literal value
    Literal(Literal),

    /// Possibly qualified identifier, segments joined with `.`
    /// (e.g., `policy.premium`, `Gender.MALE`)
    Identifier(String),

    /// Binary operation: `left op right`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Unary prefix operation: `op operand`
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Function call: `NAME(arg; arg)`
    Call {
        name: String,
        name_span: Span,
        args: Vec<Expr>,
    },

    /// Expression in parentheses, kept so that emitted code mirrors the source
    Parenthesized(Box<Expr>),
}

impl Expr {
    /// Create a new expression node.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The expression without enclosing parentheses.
    pub fn unparenthesized(&self) -> &Expr {
        match &self.kind {
            ExprKind::Parenthesized(inner) => inner.unparenthesized(),
            _ => self,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Decimal(text) | Literal::Money(text) => f.write_str(text),
            Literal::String(s) => write!(f, "\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Null => f.write_str("null"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(literal) => write!(f, "{}", literal),
            ExprKind::Identifier(name) => f.write_str(name),
            ExprKind::Binary { op, left, right } => write!(f, "{} {} {}", left, op, right),
            ExprKind::Unary { op, operand } => write!(f, "{}{}", op, operand),
            ExprKind::Call { name, args, .. } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            ExprKind::Parenthesized(inner) => write!(f, "({})", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(n: i32) -> Expr {
        Expr::new(ExprKind::Literal(Literal::Integer(n)), Span::default())
    }

    #[test]
    fn test_display_nested() {
        let sum = Expr::new(
            ExprKind::Binary {
                op: BinaryOp::Add,
                left: Box::new(lit(1)),
                right: Box::new(lit(2)),
            },
            Span::default(),
        );
        let paren = Expr::new(ExprKind::Parenthesized(Box::new(sum)), Span::default());
        let call = Expr::new(
            ExprKind::Call {
                name: "MAX".into(),
                name_span: Span::default(),
                args: vec![paren.clone(), lit(3)],
            },
            Span::default(),
        );
        assert_eq!(call.to_string(), "MAX((1 + 2); 3)");
        assert!(matches!(
            paren.unparenthesized().kind,
            ExprKind::Binary { .. }
        ));
    }

    #[test]
    fn test_string_literal_display_escapes() {
        assert_eq!(Literal::String("a\"b".into()).to_string(), r#""a\"b""#);
    }
}
