//! Localized message templates.
//!
//! Templates are keyed by message code and use positional placeholders
//! `{0}`, `{1}`, … that [`format_message`] fills in.

use crate::message::MessageCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Language of message texts and built-in function names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
}

impl Locale {
    /// Parse a language tag such as `en`, `de` or `de-CH`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let language = tag.split(['-', '_']).next().unwrap_or(tag);
        match language.to_ascii_lowercase().as_str() {
            "en" => Some(Locale::En),
            "de" => Some(Locale::De),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::De => write!(f, "de"),
        }
    }
}

/// Template for a code in a locale.
pub fn template(locale: Locale, code: MessageCode) -> &'static str {
    use MessageCode::*;
    match (locale, code) {
        (Locale::En, LexicalError) => "The formula contains an invalid token: {0}.",
        (Locale::De, LexicalError) => "Die Formel enthält ein ungültiges Zeichen: {0}.",
        (Locale::En, SyntaxError) => "Syntax error in formula: {0}.",
        (Locale::De, SyntaxError) => "Syntaxfehler in der Formel: {0}.",
        (Locale::En, UndefinedOperator) => "The operator {0} is undefined for the type(s) {1}.",
        (Locale::De, UndefinedOperator) => {
            "Der Operator {0} ist für den/die Typ(en) {1} nicht definiert."
        }
        (Locale::En, AmbiguousOperation) => {
            "The operator {0} is ambiguous for the type(s) {1}. Candidates: {2}."
        }
        (Locale::De, AmbiguousOperation) => {
            "Der Operator {0} ist für den/die Typ(en) {1} mehrdeutig. Kandidaten: {2}."
        }
        (Locale::En, UndefinedFunction) => "The function {0} is undefined.",
        (Locale::De, UndefinedFunction) => "Die Funktion {0} ist nicht definiert.",
        (Locale::En, WrongArgumentTypes) => {
            "The function {0} cannot be applied to arguments of type ({1})."
        }
        (Locale::De, WrongArgumentTypes) => {
            "Die Funktion {0} kann nicht auf Argumente vom Typ ({1}) angewendet werden."
        }
        (Locale::En, AmbiguousFunctionCall) => {
            "The call of {0} with arguments of type ({1}) is ambiguous. Candidates: {2}."
        }
        (Locale::De, AmbiguousFunctionCall) => {
            "Der Aufruf von {0} mit Argumenten vom Typ ({1}) ist mehrdeutig. Kandidaten: {2}."
        }
        (Locale::En, UndefinedIdentifier) => "The identifier {0} is undefined.",
        (Locale::De, UndefinedIdentifier) => "Der Bezeichner {0} ist nicht definiert.",
        (Locale::En, WrongResultType) => "The formula returns {0} but {1} is expected.",
        (Locale::De, WrongResultType) => {
            "Die Formel liefert {0}, erwartet wird jedoch {1}."
        }
    }
}

/// Fill the template for `code` with `args`.
///
/// Placeholders without a matching argument are left as written.
pub fn format_message(locale: Locale, code: MessageCode, args: &[&str]) -> String {
    let mut text = template(locale, code).to_string();
    for (i, arg) in args.iter().enumerate() {
        text = text.replace(&format!("{{{}}}", i), arg);
    }
    text
}
