//! Pratt parser core - precedence climbing for binary and unary operators.

use super::super::{ParseError, TokenStream};
use super::atoms;
use faktorips_fl_ast::{BinaryOp, Expr, ExprKind, Literal, UnaryOp};
use faktorips_fl_lexer::{INT_MIN_MAGNITUDE, Token};

/// Get binary operator metadata (precedence and operator enum).
///
/// Higher precedence binds tighter. All binary operators are left
/// associative.
fn binary_op_info(token: &Token) -> Option<(u8, BinaryOp)> {
    match token {
        Token::Eq => Some((10, BinaryOp::Eq)),
        Token::BangEq => Some((10, BinaryOp::Ne)),
        Token::Lt => Some((10, BinaryOp::Lt)),
        Token::LtEq => Some((10, BinaryOp::Le)),
        Token::Gt => Some((10, BinaryOp::Gt)),
        Token::GtEq => Some((10, BinaryOp::Ge)),
        Token::Plus => Some((20, BinaryOp::Add)),
        Token::Minus => Some((20, BinaryOp::Sub)),
        Token::Star => Some((30, BinaryOp::Mul)),
        Token::Slash => Some((30, BinaryOp::Div)),
        _ => None,
    }
}

/// Pratt parser - handles binary operators with precedence climbing.
pub(super) fn parse_pratt(stream: &mut TokenStream, min_prec: u8) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let mut left = parse_prefix(stream)?;

    while let Some(token) = stream.peek() {
        let Some((prec, op)) = binary_op_info(token) else {
            break;
        };
        if prec < min_prec {
            break;
        }

        stream.advance();
        let right = parse_pratt(stream, prec + 1)?;

        let span = stream.span_from(start);
        left = Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        );
    }

    Ok(left)
}

/// Parse prefix expressions (unary operators, atoms).
fn parse_prefix(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let op = match stream.peek() {
        Some(Token::Plus) => UnaryOp::Plus,
        Some(Token::Minus) => UnaryOp::Minus,
        Some(Token::Bang) => UnaryOp::Not,
        _ => return atoms::parse_atom(stream),
    };
    stream.advance();

    // `-2147483648` is the one literal whose magnitude does not fit an int
    if op == UnaryOp::Minus
        && let Some(Token::Integer(INT_MIN_MAGNITUDE)) = stream.peek()
    {
        stream.advance();
        return Ok(Expr::new(
            ExprKind::Literal(Literal::Integer(i32::MIN)),
            stream.span_from(start),
        ));
    }

    let operand = parse_prefix(stream)?;
    let span = stream.span_from(start);

    Ok(Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        span,
    ))
}
