// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Lexical analysis for the formula language.
//!
//! This crate tokenizes formula source text using logos.
//!
//! # Design
//!
//! - `Token`: all formula token types (literals, operators, delimiters, identifiers)
//! - Whitespace is skipped; the formula language has no comments
//! - Numeric literals keep their source text so that decimal and money
//!   values are never routed through binary floating point
//! - [`tokenize`] pairs every token with its byte range for diagnostics
//!
//! # Examples
//!
//! ```
//! # use faktorips_fl_lexer::*;
//! # use logos::Logos;
//! let tokens: Vec<Result<Token, ()>> = Token::lexer("3.5 + 7.45").collect();
//! assert_eq!(tokens.len(), 3);
//! ```

use logos::Logos;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

/// Magnitude of `i32::MIN`, the largest integer literal the lexer accepts.
pub const INT_MIN_MAGNITUDE: u32 = i32::MIN.unsigned_abs();

/// Formula token.
///
/// Keywords and punctuation carry no data; literals carry their source text
/// (or the parsed value for `int` literals, which always fit an `i32`).
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // === Keywords ===
    /// Boolean literal `true`
    #[token("true")]
    True,
    /// Boolean literal `false`
    #[token("false")]
    False,
    /// Literal `null`
    #[token("null")]
    Null,

    // === Operators ===
    /// Operator `+`
    #[token("+")]
    Plus,
    /// Operator `-`
    #[token("-")]
    Minus,
    /// Operator `*`
    #[token("*")]
    Star,
    /// Operator `/`
    #[token("/")]
    Slash,
    /// Equality operator `=`
    #[token("=")]
    Eq,
    /// Operator `!=`
    #[token("!=")]
    BangEq,
    /// Operator `<`
    #[token("<")]
    Lt,
    /// Operator `<=`
    #[token("<=")]
    LtEq,
    /// Operator `>`
    #[token(">")]
    Gt,
    /// Operator `>=`
    #[token(">=")]
    GtEq,
    /// Operator `!` (logical not)
    #[token("!")]
    Bang,

    // === Delimiters ===
    /// Delimiter `(`
    #[token("(")]
    LParen,
    /// Delimiter `)`
    #[token(")")]
    RParen,
    /// Argument separator `;`
    #[token(";")]
    Semicolon,
    /// Argument separator `,`
    #[token(",")]
    Comma,
    /// Qualifier `.`
    #[token(".")]
    Dot,

    // === Literals ===
    /// Integer literal (e.g., 42, 0, 1000), unsigned.
    ///
    /// Magnitudes above 2147483648 fail the callback and surface as a lexer
    /// error, the same way the generated Java would fail to compile.
    /// 2147483648 itself is only valid after a unary minus, which the parser
    /// checks.
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u32>().ok().filter(|n| *n <= INT_MIN_MAGNITUDE))]
    Integer(u32),

    /// Decimal literal (e.g., 3.5, 7.45), kept as source text.
    #[regex(r"[0-9]+\.[0-9]+", |lex| Rc::from(lex.slice()))]
    Decimal(Rc<str>),

    /// Money literal: amount immediately followed by an ISO currency code
    /// (e.g., `10.50EUR`, `3USD`).
    #[regex(r"[0-9]+(\.[0-9]+)?[A-Z][A-Z][A-Z]", |lex| Rc::from(lex.slice()))]
    Money(Rc<str>),

    /// String literal (e.g., "hello"), unescaped.
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        unescape_string(&s[1..s.len() - 1]).map(|s| Rc::from(s.as_str()))
    })]
    String(Rc<str>),

    /// Identifier segment (e.g., `premium`, `Gender`, `MALE`).
    ///
    /// Qualified names are sequences of identifiers separated by `Dot`.
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*", |lex| Rc::from(lex.slice()))]
    Ident(Rc<str>),
}

/// Unescape a string literal content.
fn unescape_string(s: &str) -> Option<String> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                _ => return None,
            }
        } else {
            result.push(c);
        }
    }
    Some(result)
}

impl Token {
    /// Fixed spelling of keyword, operator and delimiter tokens.
    ///
    /// Returns `None` for tokens that carry data.
    pub fn as_str(&self) -> Option<&'static str> {
        Some(match self {
            Token::True => "true",
            Token::False => "false",
            Token::Null => "null",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Eq => "=",
            Token::BangEq => "!=",
            Token::Lt => "<",
            Token::LtEq => "<=",
            Token::Gt => ">",
            Token::GtEq => ">=",
            Token::Bang => "!",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Semicolon => ";",
            Token::Comma => ",",
            Token::Dot => ".",
            Token::Integer(_)
            | Token::Decimal(_)
            | Token::Money(_)
            | Token::String(_)
            | Token::Ident(_) => return None,
        })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(n) => write!(f, "{}", n),
            Token::Decimal(text) | Token::Money(text) => write!(f, "{}", text),
            Token::String(s) => write!(f, "\"{}\"", s),
            Token::Ident(id) => write!(f, "{}", id),
            other => f.write_str(other.as_str().unwrap_or_default()),
        }
    }
}

/// A character sequence no token matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// Byte range of the offending input
    pub span: Range<usize>,
    /// The offending source text
    pub text: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid token '{}' at {}..{}",
            self.text, self.span.start, self.span.end
        )
    }
}

impl std::error::Error for LexError {}

/// Tokenize a formula, pairing each token with its byte range.
///
/// Stops at the first lexical error.
///
/// # Errors
///
/// Returns [`LexError`] for input that is not a valid token, including
/// integer literals outside the `i32` range and unterminated strings.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                return Err(LexError {
                    text: source[span.clone()].to_string(),
                    span,
                });
            }
        }
    }

    Ok(tokens)
}
