//! Finite-state scanner for arithmetic expressions
//!
//! The scanner is a short-lived value: it owns the normalized characters, the current
//! state, the accumulation buffers and the output collected so far. Every state has its
//! own transition function; none of them can fail, they only record diagnostics.

use crate::diagnostics::Diagnostic;
use crate::logging::codes;
use crate::tokens::{get_token_counts, Function, Token, TokenKind};
use crate::utils::{normalize, Span};
use crate::{log_debug, log_success};

/// Scanner states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Start,
    IntegerPart,
    /// Digits followed by a dot, waiting for the first fractional digit
    FractionStart,
    FractionPart,
    Identifier,
    /// Emit a one-character token at the cursor
    Emit(TokenKind),
    ErrorRun,
    Done,
}

/// Tokens and lexical diagnostics for one input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanResult {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A character that can neither start nor continue a valid token
pub fn is_error_char(ch: char) -> bool {
    !is_letter(ch) && !is_digit(ch) && TokenKind::from_symbol(ch).is_none()
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_letter(ch: char) -> bool {
    ch.is_alphabetic()
}

pub struct LexicalAnalyzer {
    chars: Vec<char>,
    state: ScanState,
    pos: usize,
    /// Start of the token under construction
    begin: usize,
    buffer: String,
    error_start: usize,
    error_fragment: String,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl LexicalAnalyzer {
    /// Normalizes `text` and prepares a scanner positioned at its first character
    pub fn new(text: &str) -> Self {
        Self {
            chars: normalize(text).chars().collect(),
            state: ScanState::Start,
            pos: 0,
            begin: 0,
            buffer: String::new(),
            error_start: 0,
            error_fragment: String::new(),
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Run the automaton to completion
    pub fn analyze(mut self) -> ScanResult {
        log_debug!("Starting lexical scan", "char_count" => self.chars.len());

        while self.state != ScanState::Done {
            let current = self.current();
            match self.state {
                ScanState::Start => self.on_start(current),
                ScanState::IntegerPart => self.on_integer_part(current),
                ScanState::FractionStart => self.on_fraction_start(current),
                ScanState::FractionPart => self.on_fraction_part(current),
                ScanState::Identifier => self.on_identifier(current),
                ScanState::Emit(kind) => self.on_emit(kind),
                ScanState::ErrorRun => self.on_error_run(current),
                ScanState::Done => {}
            }
        }

        let counts = get_token_counts(&self.tokens);
        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Lexical scan completed",
            "tokens" => counts.total,
            "error_tokens" => counts.errors,
            "diagnostics" => self.diagnostics.len()
        );

        ScanResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    /// Current character, `None` once the cursor is past the end
    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    // === TRANSITIONS ===

    fn on_start(&mut self, current: Option<char>) {
        let ch = match current {
            Some(ch) => ch,
            None => {
                self.state = ScanState::Done;
                return;
            }
        };

        if is_digit(ch) {
            self.begin = self.pos;
            self.state = ScanState::IntegerPart;
        } else if is_letter(ch) {
            self.begin = self.pos;
            self.state = ScanState::Identifier;
        } else if let Some(kind) = TokenKind::from_symbol(ch) {
            self.state = ScanState::Emit(kind);
        } else if ch == ' ' {
            self.pos += 1;
        } else {
            self.error_start = self.pos;
            self.error_fragment.clear();
            self.take_error_char(ch);
            self.state = ScanState::ErrorRun;
        }
    }

    fn on_integer_part(&mut self, current: Option<char>) {
        match current {
            Some(ch) if is_digit(ch) => self.accumulate(ch),
            Some('.') => {
                self.accumulate('.');
                self.state = ScanState::FractionStart;
            }
            _ => self.emit_number(),
        }
    }

    fn on_fraction_start(&mut self, current: Option<char>) {
        match current {
            Some(ch) if is_digit(ch) => {
                self.accumulate(ch);
                self.state = ScanState::FractionPart;
            }
            _ => {
                let fragment = std::mem::take(&mut self.buffer);
                self.diagnostics.push(Diagnostic::lexical(
                    codes::lexical::MISSING_FRACTION,
                    "fractional part expected after dot",
                    fragment,
                    Span::new(self.begin, self.pos - 1),
                ));
                self.state = ScanState::Start;
            }
        }
    }

    fn on_fraction_part(&mut self, current: Option<char>) {
        match current {
            Some(ch) if is_digit(ch) => self.accumulate(ch),
            _ => self.emit_number(),
        }
    }

    fn on_identifier(&mut self, current: Option<char>) {
        if let Some(ch) = current.filter(|ch| is_letter(*ch)) {
            self.accumulate(ch);
            return;
        }

        let name = std::mem::take(&mut self.buffer);
        let span = Span::new(self.begin, self.pos - 1);
        match Function::from_name(&name) {
            Some(function) => {
                self.tokens
                    .push(Token::new(TokenKind::FunctionName(function), name, span));
            }
            None => {
                self.diagnostics.push(Diagnostic::lexical(
                    codes::lexical::UNKNOWN_FUNCTION,
                    format!("unknown function '{}'", name),
                    name,
                    span,
                ));
            }
        }
        self.state = ScanState::Start;
    }

    fn on_emit(&mut self, kind: TokenKind) {
        if let Some(ch) = self.current() {
            self.tokens
                .push(Token::new(kind, ch.to_string(), Span::point(self.pos)));
        }
        self.pos += 1;
        self.state = ScanState::Start;
    }

    fn on_error_run(&mut self, current: Option<char>) {
        match current {
            Some(ch) if is_error_char(ch) => self.take_error_char(ch),
            _ => {
                let fragment = std::mem::take(&mut self.error_fragment);
                self.diagnostics.push(Diagnostic::lexical(
                    codes::lexical::INVALID_FRAGMENT,
                    "invalid fragment",
                    fragment,
                    Span::new(self.error_start, self.pos - 1),
                ));
                self.state = ScanState::Start;
            }
        }
    }

    // === HELPERS ===

    fn accumulate(&mut self, ch: char) {
        self.buffer.push(ch);
        self.pos += 1;
    }

    fn emit_number(&mut self) {
        let lexeme = std::mem::take(&mut self.buffer);
        self.tokens.push(Token::new(
            TokenKind::Number,
            lexeme,
            Span::new(self.begin, self.pos - 1),
        ));
        self.state = ScanState::Start;
    }

    /// Add a rejected character to the current run; whitespace gets no Error token
    fn take_error_char(&mut self, ch: char) {
        self.error_fragment.push(ch);
        if !ch.is_whitespace() {
            self.tokens
                .push(Token::new(TokenKind::Error, ch.to_string(), Span::point(self.pos)));
        }
        self.pos += 1;
    }
}
