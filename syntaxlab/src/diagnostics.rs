//! Diagnostics reported by the analyzers
//!
//! A diagnostic never aborts an analysis; analyzers collect them and keep going.

use crate::logging::codes::{self, Code};
use crate::utils::Span;
use serde::Serialize;
use std::fmt;

/// Which phase produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Invalid characters or malformed tokens
    Lexical,
    /// A grammar rule could not be satisfied
    Syntactic,
    /// Characters discarded while neutralizing a keyword or identifier
    StructuralNoise,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Lexical => "lexical",
            DiagnosticKind::Syntactic => "syntactic",
            DiagnosticKind::StructuralNoise => "structural noise",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{kind} error {code}: {message} at {span}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub code: Code,
    pub message: String,
    /// The offending text, possibly empty
    pub fragment: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        code: Code,
        message: impl Into<String>,
        fragment: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
            fragment: fragment.into(),
            span,
        }
    }

    pub fn lexical(
        code: Code,
        message: impl Into<String>,
        fragment: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::new(DiagnosticKind::Lexical, code, message, fragment, span)
    }

    pub fn syntactic(
        code: Code,
        message: impl Into<String>,
        fragment: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::new(DiagnosticKind::Syntactic, code, message, fragment, span)
    }

    /// Discarded characters found inside an expected keyword or identifier
    pub fn noise(message: impl Into<String>, fragment: impl Into<String>, span: Span) -> Self {
        Self::new(
            DiagnosticKind::StructuralNoise,
            codes::structural::GARBAGE_RUN,
            message,
            fragment,
            span,
        )
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.code.as_str())
    }

    /// How to fix the input, from the code registry
    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.code.as_str())
    }
}

/// Stable sort by start offset; diagnostics at the same offset keep emission order
pub fn sort_by_position(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(|d| d.span.start);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_range() {
        let diagnostic = Diagnostic::lexical(
            codes::lexical::UNKNOWN_FUNCTION,
            "unknown function",
            "foo",
            Span::new(0, 2),
        );
        assert_eq!(
            diagnostic.to_string(),
            "lexical error E022: unknown function at chars 1-3"
        );
        assert_eq!(diagnostic.category(), "Lexical");
        assert_ne!(diagnostic.recommended_action(), "No specific action available");
    }

    #[test]
    fn test_noise_uses_garbage_code() {
        let diagnostic = Diagnostic::noise("expected data type 'int'", "!", Span::point(1));
        assert_eq!(diagnostic.kind, DiagnosticKind::StructuralNoise);
        assert_eq!(diagnostic.code, codes::structural::GARBAGE_RUN);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut diagnostics = vec![
            Diagnostic::syntactic(codes::syntax::TRAILING_TOKEN, "b", "", Span::point(4)),
            Diagnostic::lexical(codes::lexical::INVALID_FRAGMENT, "first", "", Span::point(1)),
            Diagnostic::lexical(codes::lexical::INVALID_FRAGMENT, "second", "", Span::point(1)),
        ];
        sort_by_position(&mut diagnostics);
        let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "b"]);
    }

    #[test]
    fn test_serializes_kind_and_code() {
        let diagnostic =
            Diagnostic::syntactic(codes::syntax::MISSING_CLOSE_PAREN, "m", ")", Span::point(3));
        let value = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(value["kind"], "syntactic");
        assert_eq!(value["code"], "E042");
        assert_eq!(value["span"]["start"], 3);
    }
}
