//! Compilation messages.
//!
//! Every problem found in a formula becomes a [`Message`] with a stable code
//! (e.g. `FLC-SyntaxError`), a severity, a localized text and the span of the
//! offending part of the formula. A [`MessageList`] keeps them in the order
//! they were found.
//!
//! # Design
//!
//! - `MessageCode`: one variant per kind of problem, spelled as the stable code
//! - `Severity`: info, warning, or error
//! - `MessageList`: ordered; a compilation failed iff it contains an error
//!
//! # Examples
//!
//! ```
//! # use faktorips_fl_compiler::message::*;
//! # use faktorips_fl_ast::Span;
//! let mut list = MessageList::new();
//! list.add(Message::error(
//!     MessageCode::UndefinedIdentifier,
//!     "The identifier foo is undefined.".to_string(),
//!     Some(Span::new(0, 3)),
//! ));
//! assert!(list.contains_error_msg());
//! assert_eq!(list.messages()[0].code.as_str(), "FLC-UndefinedIdentifier");
//! ```

use faktorips_fl_ast::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable code identifying the kind of a message.
///
/// # Invariant
///
/// The discriminant values must match the MESSAGE_CODE_NAMES array indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageCode {
    /// Input that is not a token
    #[serde(rename = "FLC-LexicalError")]
    LexicalError = 0,
    /// Formula does not follow the grammar
    #[serde(rename = "FLC-SyntaxError")]
    SyntaxError = 1,
    /// No operation for the operator and operand datatypes
    #[serde(rename = "FLC-UndefinedOperator")]
    UndefinedOperator = 2,
    /// Several operations reachable at equal conversion cost
    #[serde(rename = "FLC-AmbiguousOperation")]
    AmbiguousOperation = 3,
    /// No function with this name
    #[serde(rename = "FLC-UndefinedFunction")]
    UndefinedFunction = 4,
    /// Function exists but no overload accepts the arguments
    #[serde(rename = "FLC-WrongArgumentTypes")]
    WrongArgumentTypes = 5,
    /// Several overloads reachable at equal conversion cost
    #[serde(rename = "FLC-AmbiguousFunctionCall")]
    AmbiguousFunctionCall = 6,
    /// No resolver knows the identifier
    #[serde(rename = "FLC-UndefinedIdentifier")]
    UndefinedIdentifier = 7,
    /// Result cannot be converted to the expected datatype
    #[serde(rename = "FLC-WrongResultType")]
    WrongResultType = 8,
}

/// Stable spelling of message codes.
///
/// Index matches MessageCode discriminant.
const MESSAGE_CODE_NAMES: &[&str] = &[
    "FLC-LexicalError",          // 0: LexicalError
    "FLC-SyntaxError",           // 1: SyntaxError
    "FLC-UndefinedOperator",     // 2: UndefinedOperator
    "FLC-AmbiguousOperation",    // 3: AmbiguousOperation
    "FLC-UndefinedFunction",     // 4: UndefinedFunction
    "FLC-WrongArgumentTypes",    // 5: WrongArgumentTypes
    "FLC-AmbiguousFunctionCall", // 6: AmbiguousFunctionCall
    "FLC-UndefinedIdentifier",   // 7: UndefinedIdentifier
    "FLC-WrongResultType",       // 8: WrongResultType
];

impl MessageCode {
    /// All codes, in discriminant order.
    pub const ALL: [MessageCode; 9] = [
        MessageCode::LexicalError,
        MessageCode::SyntaxError,
        MessageCode::UndefinedOperator,
        MessageCode::AmbiguousOperation,
        MessageCode::UndefinedFunction,
        MessageCode::WrongArgumentTypes,
        MessageCode::AmbiguousFunctionCall,
        MessageCode::UndefinedIdentifier,
        MessageCode::WrongResultType,
    ];

    /// The stable code string.
    pub fn as_str(self) -> &'static str {
        MESSAGE_CODE_NAMES[self as usize]
    }
}

impl fmt::Display for MessageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational (not a problem)
    Info,
    /// Formula compiles but is suspicious
    Warning,
    /// Formula cannot be compiled
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub code: MessageCode,
    pub severity: Severity,
    /// Localized text
    pub text: String,
    /// Part of the formula the message refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Message {
    /// Creates an error message.
    pub fn error(code: MessageCode, text: String, span: Option<Span>) -> Self {
        Self::with_severity(code, Severity::Error, text, span)
    }

    /// Creates a warning message.
    pub fn warning(code: MessageCode, text: String, span: Option<Span>) -> Self {
        Self::with_severity(code, Severity::Warning, text, span)
    }

    /// Creates an informational message.
    pub fn info(code: MessageCode, text: String, span: Option<Span>) -> Self {
        Self::with_severity(code, Severity::Info, text, span)
    }

    fn with_severity(code: MessageCode, severity: Severity, text: String, span: Option<Span>) -> Self {
        Self {
            code,
            severity,
            text,
            span,
        }
    }

    /// Whether this message has error severity.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.text)
    }
}

/// Ordered list of messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageList {
    messages: Vec<Message>,
}

impl MessageList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.
    pub fn add(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append all messages of another list, keeping their order.
    pub fn add_all(&mut self, other: MessageList) {
        self.messages.extend(other.messages);
    }

    /// Whether any message has error severity.
    pub fn contains_error_msg(&self) -> bool {
        self.messages.iter().any(Message::is_error)
    }

    /// Highest severity in the list, `None` when empty.
    pub fn severity(&self) -> Option<Severity> {
        self.messages.iter().map(|m| m.severity).max()
    }

    /// Messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages with the given code.
    pub fn by_code(&self, code: MessageCode) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(move |m| m.code == code)
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a MessageList {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl fmt::Display for MessageList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_names_match_discriminants() {
        for code in MessageCode::ALL {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn test_list_without_errors() {
        let mut list = MessageList::new();
        list.add(Message::warning(MessageCode::WrongResultType, "w".into(), None));
        list.add(Message::info(MessageCode::SyntaxError, "i".into(), None));
        assert!(!list.contains_error_msg());
        assert_eq!(list.severity(), Some(Severity::Warning));
        assert_eq!(MessageList::new().severity(), None);
    }

    #[test]
    fn test_display_and_order() {
        let mut list = MessageList::new();
        list.add(Message::error(MessageCode::UndefinedIdentifier, "a".into(), None));
        list.add(Message::error(MessageCode::UndefinedFunction, "b".into(), None));
        assert_eq!(
            list.to_string(),
            "error[FLC-UndefinedIdentifier]: a\nerror[FLC-UndefinedFunction]: b"
        );
        assert_eq!(list.by_code(MessageCode::UndefinedFunction).count(), 1);
    }

    #[test]
    fn test_message_json_shape() {
        let message = Message::error(
            MessageCode::SyntaxError,
            "bad".into(),
            Some(Span::new(2, 3)),
        );
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["code"], "FLC-SyntaxError");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["span"]["start"], 2);
    }
}
