//! Source location tracking for diagnostics.
//!
//! A formula is a single short text, so a span is just a byte range into it.
//! Line and column information is computed on demand when a diagnostic is
//! rendered.
//!
//! # Examples
//!
//! ```
//! # use faktorips_fl_ast::foundation::span::*;
//! let span = Span::new(4, 7);
//! assert_eq!(span.snippet("a + 8.1"), "8.1");
//! assert_eq!(span.line_col("a + 8.1"), (1, 5));
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Byte range into the formula text (end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of start position
    pub start: u32,
    /// Byte offset of end position (exclusive)
    pub end: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a span from a lexer byte range.
    pub fn from_range(range: &Range<usize>) -> Self {
        Self::new(range.start as u32, range.end as u32)
    }

    /// Check if this span is zero-length.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Length of this span in bytes (zero for malformed spans).
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Merge two spans (returns span covering both).
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Byte range usable for slicing the formula.
    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Source text covered by this span, empty when out of bounds.
    pub fn snippet<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.range()).unwrap_or("")
    }

    /// 1-based line and column of the span start.
    ///
    /// Columns count characters, not bytes.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let offset = (self.start as usize).min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let col = before[line_start..].chars().count() + 1;
        (line, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge() {
        let a = Span::new(4, 7);
        let b = Span::new(0, 1);
        assert_eq!(a.merge(&b), Span::new(0, 7));
    }

    #[test]
    fn test_line_col_multiline() {
        let source = "1 +\n  foo";
        assert_eq!(Span::new(6, 9).line_col(source), (2, 3));
    }

    #[test]
    fn test_snippet_out_of_bounds_is_empty() {
        assert_eq!(Span::new(10, 12).snippet("abc"), "");
        assert!(Span::new(3, 3).is_empty());
    }
}
