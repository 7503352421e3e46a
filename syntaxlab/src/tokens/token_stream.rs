//! Cursor over scanned tokens for the expression parser
//!
//! Error tokens stay in the underlying list (they are part of the scan result) but
//! the cursor only ever sees significant tokens.

use crate::tokens::token::{Token, TokenKind};

#[derive(Debug, Clone)]
pub struct TokenStream {
    /// All tokens, including Error tokens
    all_tokens: Vec<Token>,
    /// Indices into all_tokens for significant tokens
    significant_indices: Vec<usize>,
    /// Current position in significant_indices
    position: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let significant_indices = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.kind.is_significant())
            .map(|(i, _)| i)
            .collect::<Vec<_>>();

        crate::log_debug!("Token stream built",
            "total_tokens" => tokens.len(),
            "significant_tokens" => significant_indices.len()
        );

        Self {
            all_tokens: tokens,
            significant_indices,
            position: 0,
        }
    }

    // === CORE NAVIGATION ===

    pub fn current(&self) -> Option<&Token> {
        self.peek_ahead(0)
    }

    pub fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|token| token.kind)
    }

    /// Peek ahead by n significant tokens without advancing
    pub fn peek_ahead(&self, n: usize) -> Option<&Token> {
        let index = self.position.checked_add(n)?;
        self.significant_indices
            .get(index)
            .and_then(|&original| self.all_tokens.get(original))
    }

    /// Token relative to the cursor, clamped to the stream.
    ///
    /// Past the end this is the last significant token; with no significant tokens
    /// at all it is the empty End placeholder at offset 0.
    pub fn relative(&self, offset: isize) -> Token {
        let last = match self.significant_indices.len().checked_sub(1) {
            Some(last) => last,
            None => return Token::end_placeholder(),
        };

        let index = if offset < 0 {
            self.position.checked_sub(offset.unsigned_abs())
        } else {
            self.position.checked_add(offset.unsigned_abs())
        };

        let index = match index {
            Some(i) if i <= last => i,
            Some(_) => last,
            None => 0,
        };

        self.all_tokens[self.significant_indices[index]].clone()
    }

    /// Consume the current token
    pub fn advance(&mut self) -> Option<&Token> {
        if self.is_at_end() {
            return None;
        }
        let index = self.significant_indices[self.position];
        self.position += 1;
        self.all_tokens.get(index)
    }

    /// Consume the current token if it has the given kind
    pub fn advance_if(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.significant_indices.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.significant_indices.len().saturating_sub(self.position)
    }

    pub fn significant_len(&self) -> usize {
        self.significant_indices.len()
    }

    /// Every token including Error tokens
    pub fn all_tokens(&self) -> &[Token] {
        &self.all_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Span;

    fn token(kind: TokenKind, lexeme: &str, at: usize) -> Token {
        let len = lexeme.chars().count().max(1);
        Token::new(kind, lexeme, Span::new(at, at + len - 1))
    }

    fn sample() -> TokenStream {
        TokenStream::new(vec![
            token(TokenKind::Number, "2", 0),
            token(TokenKind::Error, "@", 1),
            token(TokenKind::Plus, "+", 2),
            token(TokenKind::Number, "3", 3),
        ])
    }

    #[test]
    fn test_error_tokens_are_skipped() {
        let mut stream = sample();
        assert_eq!(stream.significant_len(), 3);
        assert_eq!(stream.all_tokens().len(), 4);

        assert!(stream.advance_if(TokenKind::Number));
        assert!(stream.check(TokenKind::Plus));
        assert_eq!(stream.peek_ahead(1).map(|t| t.lexeme.as_str()), Some("3"));
    }

    #[test]
    fn test_relative_clamps_to_stream() {
        let mut stream = sample();
        assert_eq!(stream.relative(-1).lexeme, "2");
        assert_eq!(stream.relative(10).lexeme, "3");

        stream.advance();
        stream.advance();
        stream.advance();
        assert!(stream.is_at_end());
        assert_eq!(stream.remaining(), 0);
        assert_eq!(stream.relative(0).lexeme, "3");
        assert_eq!(stream.relative(-1).lexeme, "3");
        assert_eq!(stream.relative(-2).lexeme, "+");
        assert!(stream.advance().is_none());
    }

    #[test]
    fn test_relative_on_empty_stream_is_placeholder() {
        let stream = TokenStream::new(vec![token(TokenKind::Error, "#", 0)]);
        assert!(stream.is_at_end());
        assert_eq!(stream.relative(-1), Token::end_placeholder());
    }
}
