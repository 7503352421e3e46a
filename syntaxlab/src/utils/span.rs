//! Source location tracking for syntaxlab
//!
//! Every analysis works on a *normalized* copy of the input in which line breaks and
//! tabs are replaced by single spaces. Normalization never changes the character count,
//! so a character offset into the normalized text is also an offset into the raw text,
//! and [`SourceText`] can map it back to a line and column for display.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Replace every `\n`, `\t` and `\r` with a single space
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\n' | '\t' | '\r' => ' ',
            other => other,
        })
        .collect()
}

/// A position in the raw text: character offset plus 1-based line and column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Character offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Inclusive range of character offsets `[start, end]` into the normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// First character (inclusive)
    pub start: usize,
    /// Last character (inclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Span start must not be after end");
        Self { start, end }
    }

    /// Single-character span
    pub fn point(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A span always covers at least one offset
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }

    /// 1-based inclusive range for human display
    pub fn display_range(&self) -> (usize, usize) {
        (self.start + 1, self.end + 1)
    }

    /// Text covered by this span, clamped to the available characters
    pub fn slice(&self, chars: &[char]) -> String {
        if self.start >= chars.len() {
            return String::new();
        }
        let end = self.end.min(chars.len() - 1);
        chars[self.start..=end].iter().collect()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = self.display_range();
        if start == end {
            write!(f, "char {}", start)
        } else {
            write!(f, "chars {}-{}", start, end)
        }
    }
}

/// Raw input text together with its normalized character buffer and line table
#[derive(Debug, Clone)]
pub struct SourceText {
    /// The original source text
    pub source: String,
    /// Normalized characters (analysis offsets index into this)
    chars: Vec<char>,
    /// Character offsets of line starts in the raw text
    line_starts: Vec<usize>,
}

impl SourceText {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        let mut previous = '\0';
        for (offset, ch) in source.chars().enumerate() {
            // "\r\n" counts as one break
            if ch == '\n' || (previous == '\r' && ch != '\n') {
                line_starts.push(if ch == '\n' { offset + 1 } else { offset });
            }
            previous = ch;
        }
        if previous == '\r' {
            line_starts.push(source.chars().count());
        }

        Self {
            source: source.to_string(),
            chars: normalize(source).chars().collect(),
            line_starts,
        }
    }

    pub fn normalized(&self) -> &[char] {
        &self.chars
    }

    pub fn normalized_string(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Get the line and column for a character offset
    pub fn position_at(&self, offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index.saturating_sub(1),
        };
        let column = offset - self.line_starts[line];
        Position::new(offset, (line + 1) as u32, (column + 1) as u32)
    }

    /// Get a line of raw text by line number (1-based), without its terminator
    pub fn get_line(&self, line_num: u32) -> Option<String> {
        let index = (line_num as usize).checked_sub(1)?;
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .copied()
            .unwrap_or(self.chars.len());

        Some(
            self.source
                .chars()
                .skip(start)
                .take(end - start)
                .filter(|ch| *ch != '\n' && *ch != '\r')
                .collect(),
        )
    }

    /// Get the normalized text covered by a span
    pub fn span_text(&self, span: &Span) -> String {
        span.slice(&self.chars)
    }

    /// Format a message with a caret excerpt of the offending line
    pub fn format_error(&self, span: &Span, message: &str) -> String {
        let mut result = String::new();
        let start = self.position_at(span.start);

        result.push_str(&format!("error: {}\n", message));
        result.push_str(&format!("  --> {}\n", start));

        if let Some(line) = self.get_line(start.line) {
            let line_num_str = format!("{}", start.line);
            let padding = " ".repeat(line_num_str.len());

            result.push_str(&format!(" {} |\n", padding));
            result.push_str(&format!(" {} | {}\n", line_num_str, line));

            let end = self.position_at(span.end);
            let caret_len = if end.line == start.line {
                (end.column - start.column + 1) as usize
            } else {
                line.chars().count().saturating_sub(start.column as usize - 1)
            };

            let mut underline = format!(" {} | ", padding);
            underline.push_str(&" ".repeat(start.column as usize - 1));
            underline.push_str(&"^".repeat(caret_len.max(1)));
            result.push_str(&underline);
            result.push('\n');
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_preserves_length() {
        let raw = "1 +\n2\t*\r\n3";
        let normalized = normalize(raw);
        assert_eq!(normalized.chars().count(), raw.chars().count());
        assert_eq!(normalized, "1 + 2 *  3");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("a\tb\nc");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_span_display_is_one_based() {
        assert_eq!(Span::new(0, 2).to_string(), "chars 1-3");
        assert_eq!(Span::point(4).to_string(), "char 5");
        assert_eq!(Span::new(3, 7).len(), 5);
    }

    #[test]
    fn test_span_slice_clamps() {
        let chars: Vec<char> = "abc".chars().collect();
        assert_eq!(Span::new(1, 2).slice(&chars), "bc");
        assert_eq!(Span::new(2, 9).slice(&chars), "c");
        assert_eq!(Span::point(3).slice(&chars), "");
    }

    #[test]
    fn test_position_lookup_across_lines() {
        let source = SourceText::new("ab\ncd\r\nef");
        assert_eq!(source.position_at(0), Position::new(0, 1, 1));
        assert_eq!(source.position_at(4), Position::new(4, 2, 2));
        assert_eq!(source.position_at(7), Position::new(7, 3, 1));
        assert_eq!(source.get_line(2).as_deref(), Some("cd"));
        assert_eq!(source.span_text(&Span::new(0, 3)), "ab c");
    }

    #[test]
    fn test_format_error_underlines_span() {
        let source = SourceText::new("sin(2 @ 3)");
        let rendered = source.format_error(&Span::point(6), "invalid fragment");
        assert!(rendered.contains("error: invalid fragment"));
        assert!(rendered.contains("--> 1:7"));
        assert!(rendered.contains("       ^"));
    }
}
