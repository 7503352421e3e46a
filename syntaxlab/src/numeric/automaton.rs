//! Greedy maximal-munch automaton for real-number literals in free text
//!
//! Recognizes `[+-]? (digits ('.' digits*)? | '.' digits) ([eE] [+-]? digits)?` anywhere
//! in the input. Each attempt remembers the end of the longest accepted prefix; when
//! no transition applies the attempt either yields that prefix or restarts one
//! character later.

use crate::utils::Span;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberState {
    Start,
    Sign,
    Integer,
    LeadingDot,
    Fraction,
    ExponentMarker,
    ExponentSign,
    Exponent,
}

impl NumberState {
    pub fn is_accepting(&self) -> bool {
        matches!(
            self,
            NumberState::Integer | NumberState::Fraction | NumberState::Exponent
        )
    }

    /// Transition on `ch`, `None` when the literal cannot continue
    pub fn step(self, ch: char) -> Option<NumberState> {
        let digit = ch.is_ascii_digit();
        match self {
            NumberState::Start => match ch {
                '+' | '-' => Some(NumberState::Sign),
                '.' => Some(NumberState::LeadingDot),
                _ if digit => Some(NumberState::Integer),
                _ => None,
            },
            NumberState::Sign => match ch {
                '.' => Some(NumberState::LeadingDot),
                _ if digit => Some(NumberState::Integer),
                _ => None,
            },
            NumberState::Integer => match ch {
                '.' => Some(NumberState::Fraction),
                'e' | 'E' => Some(NumberState::ExponentMarker),
                _ if digit => Some(NumberState::Integer),
                _ => None,
            },
            NumberState::LeadingDot => digit.then_some(NumberState::Fraction),
            NumberState::Fraction => match ch {
                'e' | 'E' => Some(NumberState::ExponentMarker),
                _ if digit => Some(NumberState::Fraction),
                _ => None,
            },
            NumberState::ExponentMarker => match ch {
                '+' | '-' => Some(NumberState::ExponentSign),
                _ if digit => Some(NumberState::Exponent),
                _ => None,
            },
            NumberState::ExponentSign | NumberState::Exponent => {
                digit.then_some(NumberState::Exponent)
            }
        }
    }
}

/// A literal found in free text; `start` is a character offset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberMatch {
    pub value: String,
    pub start: usize,
}

impl NumberMatch {
    /// Inclusive character span of the literal
    pub fn span(&self) -> Span {
        Span::new(self.start, self.start + self.value.chars().count() - 1)
    }
}

/// Longest accepted prefix of `chars[start..]`, as an exclusive end offset
fn longest_literal(chars: &[char], start: usize) -> Option<usize> {
    let mut state = NumberState::Start;
    let mut last_accepting = None;

    for (offset, &ch) in chars.iter().enumerate().skip(start) {
        match state.step(ch) {
            Some(next) => {
                state = next;
                if state.is_accepting() {
                    last_accepting = Some(offset + 1);
                }
            }
            None => break,
        }
    }

    last_accepting
}

/// All non-overlapping, leftmost-longest literals in `text`
pub fn find_all(text: &str) -> Vec<NumberMatch> {
    let chars: Vec<char> = text.chars().collect();
    let mut matches = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match longest_literal(&chars, i) {
            Some(end) => {
                matches.push(NumberMatch {
                    value: chars[i..end].iter().collect(),
                    start: i,
                });
                i = end;
            }
            None => i += 1,
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    const REFERENCE: &str = r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?";

    fn is_real_number(s: &str) -> bool {
        let chars: Vec<char> = s.chars().collect();
        !chars.is_empty() && longest_literal(&chars, 0) == Some(chars.len())
    }

    fn values(text: &str) -> Vec<String> {
        find_all(text).into_iter().map(|m| m.value).collect()
    }

    #[test]
    fn test_exponent_is_one_match() {
        let matches = find_all("2e10");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, "2e10");
        assert_eq!(matches[0].start, 0);
        assert_eq!(matches[0].span(), Span::new(0, 3));
    }

    #[test]
    fn test_sample_sentence() {
        assert_eq!(
            values("Real numbers: 3.14, -0.5, 2e10, +1.2E-4"),
            vec!["3.14", "-0.5", "2e10", "+1.2E-4"]
        );
    }

    #[test]
    fn test_backs_off_to_last_accepting_state() {
        assert_eq!(values("1e"), vec!["1"]);
        assert_eq!(values("7E+"), vec!["7"]);
        assert_eq!(values("3.x"), vec!["3."]);
    }

    #[test]
    fn test_retries_after_failed_prefix() {
        assert_eq!(values("+-5"), vec!["-5"]);
        assert_eq!(values("..5"), vec![".5"]);
        assert_eq!(values("e5"), vec!["5"]);
        assert!(values("+ . - e").is_empty());
    }

    #[test]
    fn test_offsets_are_characters() {
        let matches = find_all("π≈3.14159");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].start, 2);
    }

    #[test]
    fn test_is_real_number() {
        assert!(is_real_number("-0.5"));
        assert!(is_real_number(".5e-3"));
        assert!(is_real_number("4."));
        assert!(!is_real_number("."));
        assert!(!is_real_number("1e"));
        assert!(!is_real_number("1 "));
        assert!(!is_real_number(""));
    }

    #[test]
    fn test_agrees_with_reference_pattern() {
        let reference = Regex::new(REFERENCE).unwrap();

        for text in [
            "Real numbers: 3.14, -0.5, 2e10, +1.2E-4",
            "1.2.3 ..4 +-5 6e 7E+ 8e-9x .e1 --.5 1.e5",
            "version 10.0.19045, ratio -.75 and +3",
            "no digits here",
            "e+5E-5e5.5.5",
        ] {
            let expected: Vec<(usize, String)> = reference
                .find_iter(text)
                .map(|m| (m.start(), m.as_str().to_string()))
                .collect();
            let actual: Vec<(usize, String)> = find_all(text)
                .into_iter()
                .map(|m| (m.start, m.value))
                .collect();
            assert_eq!(actual, expected, "input {:?}", text);
        }
    }
}
