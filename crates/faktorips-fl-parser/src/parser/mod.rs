//! Hand-written recursive descent parser for formulas.
//!
//! ## Architecture
//!
//! - `stream`: TokenStream wrapper with lookahead
//! - `error`: ParseError and its categories
//! - `expr`: Expression parser using Pratt parsing
//!
//! ## Public API
//!
//! ```rust,ignore
//! pub fn parse_expr(tokens: &[(Token, Range<usize>)]) -> Result<Expr, ParseError>
//! pub fn parse_formula(source: &str) -> Result<Expr, ParseError>
//! ```

mod error;
mod stream;

pub use error::{ParseError, ParseErrorKind};
use stream::TokenStream;

mod expr;

use faktorips_fl_ast::{Expr, Span};
use faktorips_fl_lexer::{Token, tokenize};
use std::ops::Range;

/// Parse a sequence of tokens with byte spans into a complete expression.
///
/// # Parameters
/// - `tokens`: Slice of (token, byte_span) pairs
///
/// # Returns
/// - `Ok(Expr)` if the tokens form exactly one expression
/// - `Err(ParseError)` on the first syntax error, including tokens left
///   over after a complete expression and empty input
pub fn parse_expr(tokens: &[(Token, Range<usize>)]) -> Result<Expr, ParseError> {
    let mut stream = TokenStream::new(tokens);
    let expr = expr::parse_expr(&mut stream)?;
    if !stream.at_end() {
        return Err(ParseError::unexpected_token(
            stream.peek(),
            "after end of expression",
            stream.current_span(),
        ));
    }
    Ok(expr)
}

/// Tokenize and parse formula source text.
///
/// # Returns
/// - `Ok(Expr)` if parsing succeeds
/// - `Err(ParseError)` with kind [`ParseErrorKind::InvalidToken`] for
///   lexical errors, or a syntax kind otherwise
pub fn parse_formula(source: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(source).map_err(|err| {
        ParseError::invalid_token(&err.text, Span::from_range(&err.span))
    })?;
    tracing::trace!(count = tokens.len(), "tokenized formula");
    parse_expr(&tokens)
}
