//! Acceptance predicates for the structural matcher

/// Decides, one character at a time, whether a window character belongs to the
/// expected content. Rejected characters become garbage.
pub trait Acceptor {
    /// Offer the next window character; `true` means it was accepted
    fn accept(&mut self, ch: char) -> bool;

    /// Whether enough has been accepted to count as a match
    fn is_complete(&self) -> bool;

    /// Whether scanning ends as soon as the match is complete
    fn stops_when_complete(&self) -> bool;
}

/// Assembles one keyword as a case-insensitive subsequence
#[derive(Debug, Clone)]
pub struct KeywordAcceptor {
    keyword: Vec<char>,
    index: usize,
}

impl KeywordAcceptor {
    pub fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.chars().collect(),
            index: 0,
        }
    }
}

impl Acceptor for KeywordAcceptor {
    fn accept(&mut self, ch: char) -> bool {
        match self.keyword.get(self.index) {
            Some(expected) if ch.to_ascii_lowercase() == *expected => {
                self.index += 1;
                true
            }
            _ => false,
        }
    }

    fn is_complete(&self) -> bool {
        self.index == self.keyword.len()
    }

    fn stops_when_complete(&self) -> bool {
        true
    }
}

/// ASCII letter first, then ASCII letters, digits and underscores
#[derive(Debug, Clone, Default)]
pub struct IdentifierAcceptor {
    started: bool,
}

impl IdentifierAcceptor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Acceptor for IdentifierAcceptor {
    fn accept(&mut self, ch: char) -> bool {
        if !self.started {
            self.started = ch.is_ascii_alphabetic();
            return self.started;
        }
        ch.is_ascii_alphanumeric() || ch == '_'
    }

    fn is_complete(&self) -> bool {
        self.started
    }

    fn stops_when_complete(&self) -> bool {
        false
    }
}
