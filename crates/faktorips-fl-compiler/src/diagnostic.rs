//! Human-readable rendering of messages with formula context.

use crate::message::{Message, MessageList};
use std::fmt::Write;

/// Formats messages with the formula line and a caret underline.
///
/// ```text
/// error[FLC-SyntaxError]: Syntax error in formula: unexpected 'a' after end of expression.
///   --> premium:1:3
///    |
///  1 | a a + 8.1
///    |   ^
/// ```
///
/// # Examples
///
/// ```
/// # use faktorips_fl_compiler::*;
/// # use faktorips_fl_ast::Span;
/// let message = Message::error(
///     MessageCode::UndefinedIdentifier,
///     "The identifier foo is undefined.".to_string(),
///     Some(Span::new(4, 7)),
/// );
/// let formatter = DiagnosticFormatter::new("1 + foo", "formula");
/// assert!(formatter.format(&message).contains("    ^^^"));
/// ```
pub struct DiagnosticFormatter<'a> {
    formula: &'a str,
    name: &'a str,
}

impl<'a> DiagnosticFormatter<'a> {
    /// Creates a new diagnostic formatter.
    ///
    /// # Parameters
    ///
    /// * `formula` - Formula text the message spans point into
    /// * `name` - Label shown in the location line (e.g., the attribute name)
    pub fn new(formula: &'a str, name: &'a str) -> Self {
        Self { formula, name }
    }

    /// Formats a message as a string with formula context.
    pub fn format(&self, message: &Message) -> String {
        let mut output = String::new();

        // Header: severity, code and text
        let _ = writeln!(output, "{}", message);

        let Some(span) = message.span else {
            return output;
        };

        let (line, col) = span.line_col(self.formula);
        let _ = writeln!(output, "  --> {}:{}:{}", self.name, line, col);

        if let Some(source_line) = self.formula.lines().nth(line - 1) {
            let _ = writeln!(output, "   |");
            let _ = writeln!(output, "{:3} | {}", line, source_line);

            // Underline, clipped to the line
            let width = span.snippet(self.formula).chars().count();
            let line_len = source_line.chars().count();
            let end_col = (col + width).min(line_len + 1);
            let underline = " ".repeat(col.saturating_sub(1))
                + &"^".repeat(end_col.saturating_sub(col).max(1));
            let _ = writeln!(output, "   | {}", underline);
        }

        output
    }

    /// Formats all messages, separated by blank lines.
    pub fn format_all(&self, messages: &MessageList) -> String {
        messages
            .iter()
            .map(|m| self.format(m))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
