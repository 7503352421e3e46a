//! Token model for arithmetic-expression analysis
//!
//! - **[`Token`]** - kind, exact lexeme and inclusive character span
//! - **[`TokenKind`]** - numbers, the closed set of [`Function`] names, operators,
//!   parentheses, the dot, the End placeholder and Error tokens
//! - **[`TokenStream`]** - parser cursor that skips Error tokens

pub mod token;
pub mod token_stream;

pub use token::{Function, Token, TokenKind};
pub use token_stream::TokenStream;

/// Token distribution of a scan
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenCounts {
    pub total: usize,
    pub numbers: usize,
    pub functions: usize,
    pub operators: usize,
    pub parentheses: usize,
    pub dots: usize,
    pub errors: usize,
}

impl TokenCounts {
    pub fn significant(&self) -> usize {
        self.total - self.errors
    }
}

pub fn get_token_counts(tokens: &[Token]) -> TokenCounts {
    let mut counts = TokenCounts::default();

    for token in tokens {
        counts.total += 1;
        match token.kind {
            TokenKind::Number => counts.numbers += 1,
            TokenKind::FunctionName(_) => counts.functions += 1,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Multiply | TokenKind::Divide => {
                counts.operators += 1
            }
            TokenKind::OpenParen | TokenKind::CloseParen => counts.parentheses += 1,
            TokenKind::Dot => counts.dots += 1,
            TokenKind::Error => counts.errors += 1,
            TokenKind::End => {}
        }
    }

    counts
}
