//! Parse error types.

use faktorips_fl_ast::Span;
use faktorips_fl_lexer::Token;
use std::fmt;

/// Parse error with source location and context.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Kind of parse error
    pub kind: ParseErrorKind,
    /// Source location where error occurred
    pub span: Span,
    /// Human-readable error message
    pub message: String,
}

/// Category of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input that is not a token at all (unknown character, integer literal
    /// out of range, unterminated string).
    InvalidToken,

    /// A token appeared where the grammar does not allow it.
    ///
    /// Example: `a a + 8.1` (second identifier after a complete operand).
    UnexpectedToken,

    /// Input ended while an expression was incomplete.
    ///
    /// Example: `(1 + 2`, `3 *`, or an empty formula.
    UnexpectedEof,

    /// Tokens are individually valid but form an invalid literal or construct.
    ///
    /// Example: `10.555EUR` (more fraction digits than the currency allows).
    InvalidSyntax,
}

impl ParseError {
    /// Create an "expected token" error.
    pub fn expected_token(expected: Token, found: Option<&Token>, span: Span) -> Self {
        let message = match found {
            Some(token) => format!("expected '{}', found '{}'", expected, token),
            None => format!("expected '{}', found end of input", expected),
        };
        Self {
            kind: if found.is_none() {
                ParseErrorKind::UnexpectedEof
            } else {
                ParseErrorKind::UnexpectedToken
            },
            span,
            message,
        }
    }

    /// Create an "unexpected token" error.
    pub fn unexpected_token(found: Option<&Token>, context: &str, span: Span) -> Self {
        let message = match found {
            Some(token) => format!("unexpected '{}' {}", token, context),
            None => format!("unexpected end of input {}", context),
        };
        Self {
            kind: if found.is_none() {
                ParseErrorKind::UnexpectedEof
            } else {
                ParseErrorKind::UnexpectedToken
            },
            span,
            message,
        }
    }

    /// Create an "invalid token" error for lexer failures.
    pub fn invalid_token(text: &str, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::InvalidToken,
            span,
            message: format!("invalid token '{}'", text),
        }
    }

    /// Create an "invalid syntax" error.
    pub fn invalid_syntax(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::InvalidSyntax,
            span,
            message: message.into(),
        }
    }

    /// Whether this error comes from tokenizing rather than parsing.
    pub fn is_lexical(&self) -> bool {
        self.kind == ParseErrorKind::InvalidToken
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}..{}",
            self.message, self.span.start, self.span.end
        )
    }
}

impl std::error::Error for ParseError {}
