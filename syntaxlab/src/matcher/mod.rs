//! Structural matching with noise neutralization
//!
//! Recognizes an expected keyword or identifier inside a window of text that may
//! contain stray characters. Accepted characters are assembled into the value; every
//! rejected character examined along the way is reported as structural noise, grouped
//! into contiguous runs.
//!
//! One routine serves every structural element. What changes between callers is the
//! [`Pattern`] (which acceptors to try), the [`Delimiter`] that closes the window and
//! the category named in messages.

pub mod acceptor;
pub mod garbage;

pub use acceptor::{Acceptor, IdentifierAcceptor, KeywordAcceptor};
pub use garbage::{group_garbage, GarbageRun};

use crate::diagnostics::Diagnostic;
use crate::log_debug;
use crate::logging::codes::{self, Code};
use crate::utils::Span;

// ============================================================================
// EXPECTATIONS
// ============================================================================

/// Characters that close a match window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// A single space
    Space,
    /// An opening parenthesis
    OpenParen,
    /// Whitespace, `,`, `)` or `;`
    ParameterEnd,
}

impl Delimiter {
    pub fn matches(&self, ch: char) -> bool {
        match self {
            Delimiter::Space => ch == ' ',
            Delimiter::OpenParen => ch == '(',
            Delimiter::ParameterEnd => {
                ch.is_whitespace() || matches!(ch, ',' | ')' | ';')
            }
        }
    }

    /// Exclusive end of the window starting at `cursor`
    pub fn window_end(&self, text: &[char], cursor: usize) -> usize {
        let cursor = cursor.min(text.len());
        text[cursor..]
            .iter()
            .position(|&ch| self.matches(ch))
            .map_or(text.len(), |offset| cursor + offset)
    }
}

/// What the window is expected to contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// One of these lowercase keywords, tried in order
    Keywords(&'static [&'static str]),
    Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    pub pattern: Pattern,
    pub delimiter: Delimiter,
    /// Human name of the element, e.g. "data type"
    pub category: &'static str,
    pub rejection_code: Code,
    pub rejection_message: Option<String>,
}

impl Expectation {
    pub fn keywords(
        keywords: &'static [&'static str],
        delimiter: Delimiter,
        category: &'static str,
    ) -> Self {
        Self {
            pattern: Pattern::Keywords(keywords),
            delimiter,
            category,
            rejection_code: codes::prototype::EXPECTED_DATA_TYPE,
            rejection_message: None,
        }
    }

    pub fn identifier(delimiter: Delimiter, category: &'static str) -> Self {
        Self {
            pattern: Pattern::Identifier,
            delimiter,
            category,
            rejection_code: codes::prototype::EXPECTED_IDENTIFIER,
            rejection_message: None,
        }
    }

    /// Replace the default "expected {category}" rejection message
    pub fn with_rejection_message(mut self, message: impl Into<String>) -> Self {
        self.rejection_message = Some(message.into());
        self
    }

    fn rejection(&self) -> String {
        self.rejection_message
            .clone()
            .unwrap_or_else(|| format!("expected {}", self.category))
    }
}

// ============================================================================
// MATCHING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Keyword as written in the list, or the accepted identifier characters
    pub value: Option<String>,
    /// Exclusive offset where scanning resumes
    pub consumed_end: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl MatchOutcome {
    pub fn matched(&self) -> bool {
        self.value.is_some()
    }
}

/// Window characters split by the acceptor, as window-relative indices
struct Partition {
    accepted: Vec<(usize, char)>,
    garbage: Vec<(usize, char)>,
}

fn partition<A: Acceptor>(window: &[char], mut acceptor: A) -> Option<Partition> {
    let mut accepted = Vec::new();
    let mut garbage = Vec::new();

    for (index, &ch) in window.iter().enumerate() {
        if acceptor.is_complete() && acceptor.stops_when_complete() {
            break;
        }
        if acceptor.accept(ch) {
            accepted.push((index, ch));
        } else {
            garbage.push((index, ch));
        }
    }

    acceptor.is_complete().then_some(Partition { accepted, garbage })
}

/// Match `expectation` in the window that starts at `cursor`.
///
/// Keywords are assembled as case-insensitive subsequences; the first keyword that
/// completes wins and the cursor moves just past its last character. Identifiers
/// consume the whole window. A window that yields nothing produces one rejection
/// diagnostic covering the window (or the cursor when the window is empty) and the
/// cursor moves to the window end.
pub fn match_with_neutralization(
    text: &[char],
    cursor: usize,
    expectation: &Expectation,
) -> MatchOutcome {
    let cursor = cursor.min(text.len());
    let window_end = expectation.delimiter.window_end(text, cursor);
    let window = &text[cursor..window_end];

    let found = match expectation.pattern {
        Pattern::Keywords(keywords) => keywords.iter().find_map(|keyword| {
            partition(window, KeywordAcceptor::new(keyword)).map(|part| {
                let last = part.accepted.last().map_or(0, |&(index, _)| index);
                (keyword.to_string(), cursor + last + 1, part.garbage)
            })
        }),
        Pattern::Identifier => {
            partition(window, IdentifierAcceptor::new()).map(|part| {
                let value: String = part.accepted.iter().map(|&(_, ch)| ch).collect();
                (value, window_end, part.garbage)
            })
        }
    };

    match found {
        Some((value, consumed_end, garbage)) => {
            let message = match expectation.pattern {
                Pattern::Keywords(_) => format!("expected {} '{}'", expectation.category, value),
                Pattern::Identifier => format!("expected {}", expectation.category),
            };
            let diagnostics: Vec<Diagnostic> = group_garbage(cursor, &garbage)
                .into_iter()
                .map(|run| Diagnostic::noise(message.clone(), run.fragment, run.span))
                .collect();

            log_debug!("Structural match",
                "category" => expectation.category,
                "value" => &value,
                "noise_runs" => diagnostics.len()
            );

            MatchOutcome {
                value: Some(value),
                consumed_end,
                diagnostics,
            }
        }
        None => {
            let span = if window.is_empty() {
                Span::point(cursor)
            } else {
                Span::new(cursor, window_end - 1)
            };
            let fragment: String = window.iter().collect();

            MatchOutcome {
                value: None,
                consumed_end: window_end,
                diagnostics: vec![Diagnostic::syntactic(
                    expectation.rejection_code,
                    expectation.rejection(),
                    fragment,
                    span,
                )],
            }
        }
    }
}
