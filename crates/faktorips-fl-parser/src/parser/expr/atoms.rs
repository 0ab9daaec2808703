//! Atomic expressions - literals, identifiers, calls, parenthesized expressions.

use super::super::{ParseError, TokenStream};
use faktorips_fl_ast::{Expr, ExprKind, Literal, Money};
use faktorips_fl_lexer::Token;

/// Parse atomic expressions.
pub(super) fn parse_atom(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let span = stream.current_span();

    let literal = match stream.peek() {
        Some(Token::True) => Literal::Boolean(true),
        Some(Token::False) => Literal::Boolean(false),
        Some(Token::Null) => Literal::Null,
        Some(Token::Integer(n)) => match i32::try_from(*n) {
            Ok(n) => Literal::Integer(n),
            Err(_) => return Err(ParseError::invalid_token(&n.to_string(), span)),
        },
        Some(Token::Decimal(text)) => Literal::Decimal(text.to_string()),
        Some(Token::Money(text)) => {
            if Money::parse(text).is_none() {
                return Err(ParseError::invalid_syntax(
                    format!("invalid money literal '{}'", text),
                    span,
                ));
            }
            Literal::Money(text.to_string())
        }
        Some(Token::String(s)) => Literal::String(s.to_string()),
        Some(Token::LParen) => return parse_parenthesized(stream),
        Some(Token::Ident(_)) => return parse_identifier_or_call(stream),
        other => {
            return Err(ParseError::unexpected_token(other, "in expression", span));
        }
    };

    stream.advance();
    Ok(Expr::new(ExprKind::Literal(literal), stream.span_from(start)))
}

/// Parse parenthesized expression, keeping the parentheses as a node.
fn parse_parenthesized(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::LParen)?;
    let inner = super::parse_expr(stream)?;
    stream.expect(Token::RParen)?;
    Ok(Expr::new(
        ExprKind::Parenthesized(Box::new(inner)),
        stream.span_from(start),
    ))
}

/// Parse a dotted identifier, or a function call if `(` follows.
fn parse_identifier_or_call(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let mut name = expect_ident(stream)?;

    while stream.check(&Token::Dot) {
        stream.advance();
        name.push('.');
        name.push_str(&expect_ident(stream)?);
    }

    if !stream.check(&Token::LParen) {
        return Ok(Expr::new(ExprKind::Identifier(name), stream.span_from(start)));
    }

    let name_span = stream.span_from(start);
    let args = parse_call_args(stream)?;
    Ok(Expr::new(
        ExprKind::Call {
            name,
            name_span,
            args,
        },
        stream.span_from(start),
    ))
}

fn expect_ident(stream: &mut TokenStream) -> Result<String, ParseError> {
    let span = stream.current_span();
    match stream.advance() {
        Some(Token::Ident(s)) => Ok(s.to_string()),
        other => Err(ParseError::unexpected_token(other, "where an identifier was expected", span)),
    }
}

/// Parse function call arguments: `( [expr ((";" | ",") expr)*] )`.
fn parse_call_args(stream: &mut TokenStream) -> Result<Vec<Expr>, ParseError> {
    stream.expect(Token::LParen)?;

    let mut args = Vec::new();
    if stream.check(&Token::RParen) {
        stream.advance();
        return Ok(args);
    }

    loop {
        args.push(super::parse_expr(stream)?);
        match stream.peek() {
            Some(Token::Semicolon) | Some(Token::Comma) => {
                stream.advance();
            }
            Some(Token::RParen) => {
                stream.advance();
                return Ok(args);
            }
            other => {
                return Err(ParseError::unexpected_token(
                    other,
                    "in argument list",
                    stream.current_span(),
                ));
            }
        }
    }
}
