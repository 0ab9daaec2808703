//! Java source fragments.
//!
//! A [`CodeFragment`] is a piece of Java expression source plus the set of
//! classes it needs imported. Fragments are built bottom-up: operations and
//! functions receive their operands' fragments and combine them, merging
//! imports along the way.
//!
//! # Examples
//!
//! ```
//! # use faktorips_fl_compiler::code::CodeFragment;
//! let mut code = CodeFragment::new();
//! code.append_class_name("org.faktorips.values.Decimal");
//! code.append(".valueOf(\"3.5\")");
//! assert_eq!(code.source(), "Decimal.valueOf(\"3.5\")");
//! assert!(code.imports().contains("org.faktorips.values.Decimal"));
//! ```

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Java expression source with its required imports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeFragment {
    source: String,
    imports: BTreeSet<String>,
}

impl CodeFragment {
    /// Create an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fragment from plain source without imports.
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            imports: BTreeSet::new(),
        }
    }

    /// Java source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Fully qualified classes to import, sorted.
    pub fn imports(&self) -> &BTreeSet<String> {
        &self.imports
    }

    /// Append raw source.
    pub fn append(&mut self, text: &str) -> &mut Self {
        self.source.push_str(text);
        self
    }

    /// Append another fragment's source and merge its imports.
    pub fn append_fragment(&mut self, other: &CodeFragment) -> &mut Self {
        self.source.push_str(&other.source);
        self.imports.extend(other.imports.iter().cloned());
        self
    }

    /// Append the simple name of a Java class and import it.
    ///
    /// Primitives and `java.lang` classes need no import.
    pub fn append_class_name(&mut self, qualified_class: &str) -> &mut Self {
        let simple = qualified_class
            .rsplit('.')
            .next()
            .unwrap_or(qualified_class);
        self.source.push_str(simple);
        self.add_import(qualified_class);
        self
    }

    /// Record an import without touching the source.
    pub fn add_import(&mut self, qualified_class: &str) -> &mut Self {
        if needs_import(qualified_class) {
            self.imports.insert(qualified_class.to_string());
        }
        self
    }

    /// Whether the source can be used as a method receiver or infix operand
    /// without parentheses.
    ///
    /// True for literals, names, and call chains; false as soon as a space,
    /// prefix operator, or conditional appears outside parentheses and
    /// string literals.
    pub fn is_simple(&self) -> bool {
        let src = self.source.trim();
        if src.is_empty() || src.starts_with('-') || src.starts_with('!') {
            return false;
        }
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        for c in src.chars() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                ' ' | '?' | ':' if depth == 0 => return false,
                _ => {}
            }
        }
        true
    }

    /// The fragment wrapped in parentheses.
    pub fn parenthesized(&self) -> CodeFragment {
        let mut code = CodeFragment::from_source("(");
        code.append_fragment(self).append(")");
        code
    }

    /// The fragment, parenthesized unless it is already simple.
    pub fn as_operand(&self) -> CodeFragment {
        if self.is_simple() {
            self.clone()
        } else {
            self.parenthesized()
        }
    }
}

fn needs_import(qualified_class: &str) -> bool {
    match qualified_class.rsplit_once('.') {
        Some(("java.lang", _)) | None => false,
        Some(_) => true,
    }
}

impl fmt::Display for CodeFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_java_lang_and_primitives_not_imported() {
        let mut code = CodeFragment::new();
        code.append_class_name("java.lang.Integer")
            .append_class_name("int")
            .append_class_name("java.math.RoundingMode");
        assert_eq!(code.source(), "IntegerintRoundingMode");
        assert_eq!(
            code.imports().iter().collect::<Vec<_>>(),
            vec!["java.math.RoundingMode"]
        );
    }

    #[test]
    fn test_append_fragment_merges_imports() {
        let mut a = CodeFragment::new();
        a.append_class_name("org.faktorips.values.Decimal");
        let mut b = CodeFragment::new();
        b.append_class_name("org.faktorips.values.Money");
        a.append_fragment(&b);
        assert_eq!(a.imports().len(), 2);
    }

    #[test]
    fn test_is_simple() {
        assert!(CodeFragment::from_source("Decimal.valueOf(\"3.5\").add(x)").is_simple());
        assert!(CodeFragment::from_source("(a + b)").is_simple());
        assert!(CodeFragment::from_source("\"a b\"").is_simple());
        assert!(!CodeFragment::from_source("a + b").is_simple());
        assert!(!CodeFragment::from_source("-x").is_simple());
        assert!(!CodeFragment::from_source("!flag").is_simple());
        assert!(!CodeFragment::from_source("c?a:b").is_simple());
    }

    #[test]
    fn test_as_operand() {
        assert_eq!(CodeFragment::from_source("a + b").as_operand().source(), "(a + b)");
        assert_eq!(CodeFragment::from_source("a").as_operand().source(), "a");
    }
}
