//! Token kinds produced by the lexical scanner
//!
//! Each kind has a stable numeric code and a human-readable category; the
//! command-line tool prints both in its token table.
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of recognized function names (case-sensitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Function {
    Sin,
    Cos,
    Tg,
    Ctg,
    Log,
    Ln,
}

impl Function {
    pub const ALL: [Function; 6] = [
        Function::Sin,
        Function::Cos,
        Function::Tg,
        Function::Ctg,
        Function::Log,
        Function::Ln,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tg => "tg",
            Function::Ctg => "ctg",
            Function::Log => "log",
            Function::Ln => "ln",
        }
    }

    /// Exact, case-sensitive lookup
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_str() == name)
    }

    fn code(&self) -> u8 {
        match self {
            Function::Sin => 10,
            Function::Cos => 11,
            Function::Tg => 12,
            Function::Ctg => 13,
            Function::Log => 14,
            Function::Ln => 15,
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Function {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown function '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Number,
    FunctionName(Function),
    Plus,     // +
    Minus,    // -
    Multiply, // *
    Divide,   // /
    Dot,      // .
    OpenParen,
    CloseParen,
    /// Empty placeholder returned when a parser looks past the token list
    End,
    /// A character that is not part of any valid token
    Error,
}

impl TokenKind {
    /// Stable numeric code
    pub fn code(&self) -> u8 {
        match self {
            TokenKind::Number => 1,
            TokenKind::FunctionName(function) => function.code(),
            TokenKind::Plus => 20,
            TokenKind::Minus => 21,
            TokenKind::Multiply => 22,
            TokenKind::Divide => 23,
            TokenKind::Dot => 24,
            TokenKind::OpenParen => 30,
            TokenKind::CloseParen => 31,
            TokenKind::End => 98,
            TokenKind::Error => 99,
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::FunctionName(_) => "function name",
            TokenKind::Plus | TokenKind::Minus | TokenKind::Multiply | TokenKind::Divide => {
                "operator"
            }
            TokenKind::Dot => "dot",
            TokenKind::OpenParen | TokenKind::CloseParen => "parenthesis",
            TokenKind::End => "end of input",
            TokenKind::Error => "invalid character",
        }
    }

    /// Kind for a single-character token, if `ch` is one
    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Multiply),
            '/' => Some(TokenKind::Divide),
            '.' => Some(TokenKind::Dot),
            '(' => Some(TokenKind::OpenParen),
            ')' => Some(TokenKind::CloseParen),
            _ => None,
        }
    }

    pub fn is_additive(&self) -> bool {
        matches!(self, TokenKind::Plus | TokenKind::Minus)
    }

    pub fn is_multiplicative(&self) -> bool {
        matches!(self, TokenKind::Multiply | TokenKind::Divide)
    }

    /// Tokens the parser looks at; Error tokens already carry a lexical diagnostic
    pub fn is_significant(&self) -> bool {
        !matches!(self, TokenKind::Error)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::FunctionName(function) => write!(f, "function name {}", function),
            other => f.write_str(other.category()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact characters of the normalized text covered by `span`
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// The empty placeholder token anchored at offset 0
    pub fn end_placeholder() -> Self {
        Self::new(TokenKind::End, "", Span::point(0))
    }

    pub fn code(&self) -> u8 {
        self.kind.code()
    }

    pub fn category(&self) -> &'static str {
        self.kind.category()
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' at {}", self.kind.category(), self.lexeme, self.span)
    }
}
