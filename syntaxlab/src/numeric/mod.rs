//! Real-number search over free text
//!
//! Independent of the token scanner: it reads raw text with no token boundaries
//! and reports every literal it can find.

pub mod automaton;

pub use automaton::{find_all, NumberMatch, NumberState};

use crate::log_success;
use crate::logging::codes;

/// Find literals and log the result count
pub fn search(text: &str) -> Vec<NumberMatch> {
    let matches = find_all(text);
    log_success!(codes::success::NUMBER_SEARCH_COMPLETE,
        "Real-number search completed",
        "matches" => matches.len()
    );
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_matches_find_all() {
        let text = "x = -3.5e2 + .25";
        assert_eq!(search(text), find_all(text));
        assert_eq!(search(text).len(), 2);
    }
}
