//! Recursive-descent parser for arithmetic expressions
//!
//! ```text
//! Expression := Term { ('+'|'-') Term }
//! Term       := Factor { ('*'|'/') Factor }
//! Factor     := ['+'|'-'] (Number | Function | '(' Expression ')')
//! Function   := FunctionName '(' Expression ')'
//! ```
//!
//! The parser never stops at the first problem. Every rule records itself in an
//! append-only trace, errors become diagnostics and parsing continues from the next
//! sensible token.

use crate::config::compile_time::syntax::MAX_PARSE_DEPTH;
use crate::diagnostics::Diagnostic;
use crate::lexical;
use crate::logging::codes;
use crate::tokens::{Token, TokenKind, TokenStream};
use crate::{log_debug, log_success};
use serde::Serialize;
use std::fmt;

// ============================================================================
// TRACE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rule {
    Expression,
    Term,
    Factor,
    Number,
    IntegerPart,
    FractionPart,
    Digit,
    Function,
    FunctionName,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Expression => "Expression",
            Rule::Term => "Term",
            Rule::Factor => "Factor",
            Rule::Number => "Number",
            Rule::IntegerPart => "IntegerPart",
            Rule::FractionPart => "FractionPart",
            Rule::Digit => "Digit",
            Rule::Function => "Function",
            Rule::FunctionName => "FunctionName",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of the rule-invocation trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceEntry {
    /// A rule was entered
    Rule(Rule),
    /// A rule consumed a concrete value
    Terminal { rule: Rule, value: String },
    /// A literal symbol such as `'+'`, `'('` or `'unary -'`
    Symbol(String),
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEntry::Rule(rule) => write!(f, "{}", rule),
            TraceEntry::Terminal { rule, value } => write!(f, "{}={}", rule, value),
            TraceEntry::Symbol(text) => write!(f, "'{}'", text),
        }
    }
}

/// Join trace entries with arrows
pub fn render_trace(trace: &[TraceEntry]) -> String {
    trace
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" → ")
}

// ============================================================================
// PARSER
// ============================================================================

/// Trace and syntactic diagnostics of one parse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    pub trace: Vec<TraceEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct ExpressionParser {
    tokens: TokenStream,
    trace: Vec<TraceEntry>,
    diagnostics: Vec<Diagnostic>,
    detailed: bool,
    depth: usize,
}

impl ExpressionParser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: TokenStream::new(tokens),
            trace: Vec::new(),
            diagnostics: Vec::new(),
            detailed: false,
            depth: 0,
        }
    }

    /// Expand numbers into integer part, fraction part and digits
    pub fn with_detailed_trace(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }

    pub fn parse(mut self) -> ParseResult {
        self.expression();

        // Whatever follows a complete expression is reported token by token
        while let Some(token) = self.tokens.current().cloned() {
            let (code, message) = if token.is(TokenKind::CloseParen) {
                (
                    codes::syntax::UNMATCHED_CLOSE_PAREN,
                    "unmatched closing parenthesis ')'",
                )
            } else {
                (
                    codes::syntax::TRAILING_TOKEN,
                    "unexpected token after end of expression",
                )
            };
            self.error_at(code, message, &token);
            self.tokens.advance();
        }

        ParseResult {
            trace: self.trace,
            diagnostics: self.diagnostics,
        }
    }

    // === RULES ===

    fn expression(&mut self) {
        if self.depth >= MAX_PARSE_DEPTH {
            let token = self.tokens.relative(0);
            self.error_at(
                codes::syntax::MAX_DEPTH_EXCEEDED,
                "maximum nesting depth exceeded",
                &token,
            );
            self.tokens.advance();
            return;
        }

        self.depth += 1;
        self.enter(Rule::Expression);
        self.term();

        while let Some(token) = self.take_operator(TokenKind::is_additive) {
            self.trace.push(TraceEntry::Symbol(token.lexeme));
            self.term();
        }
        self.depth -= 1;
    }

    fn term(&mut self) {
        self.enter(Rule::Term);
        self.factor();

        while let Some(token) = self.take_operator(TokenKind::is_multiplicative) {
            self.trace.push(TraceEntry::Symbol(token.lexeme));
            self.factor();
        }
    }

    fn factor(&mut self) {
        self.enter(Rule::Factor);

        if let Some(sign) = self.take_operator(TokenKind::is_additive) {
            self.trace
                .push(TraceEntry::Symbol(format!("unary {}", sign.lexeme)));
        }

        let token = match self.tokens.current().cloned() {
            Some(token) => token,
            None => {
                let anchor = self.tokens.relative(0);
                self.error_at(
                    codes::syntax::UNEXPECTED_END,
                    "expected factor but reached end of input",
                    &anchor,
                );
                return;
            }
        };

        match token.kind {
            TokenKind::Number => {
                self.number(&token);
                self.tokens.advance();
            }
            TokenKind::FunctionName(_) => self.function(&token),
            TokenKind::OpenParen => {
                self.trace.push(TraceEntry::Symbol("(".to_string()));
                self.tokens.advance();
                self.expression();
                self.close_paren();
            }
            _ => {
                self.error_at(
                    codes::syntax::MISSING_FACTOR,
                    "expected factor (number, function or parenthesized expression)",
                    &token,
                );
                self.tokens.advance();
            }
        }
    }

    fn number(&mut self, token: &Token) {
        if !self.detailed {
            self.terminal(Rule::Number, &token.lexeme);
            return;
        }

        self.enter(Rule::Number);
        let (integer, fraction) = match token.lexeme.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (token.lexeme.as_str(), None),
        };

        self.enter(Rule::IntegerPart);
        self.digits(integer);

        if let Some(fraction) = fraction {
            self.trace.push(TraceEntry::Symbol(".".to_string()));
            self.enter(Rule::FractionPart);
            self.digits(fraction);
        }
    }

    fn digits(&mut self, digits: &str) {
        for digit in digits.chars() {
            self.terminal(Rule::Digit, &digit.to_string());
        }
    }

    fn function(&mut self, name: &Token) {
        self.enter(Rule::Function);
        self.terminal(Rule::FunctionName, &name.lexeme);
        self.tokens.advance();

        if self.tokens.advance_if(TokenKind::OpenParen) {
            self.trace.push(TraceEntry::Symbol("(".to_string()));
            self.expression();
            self.close_paren();
        } else {
            let anchor = self.tokens.relative(0);
            self.error_at(
                codes::syntax::MISSING_OPEN_PAREN,
                "expected opening parenthesis '(' after function name",
                &anchor,
            );
        }
    }

    fn close_paren(&mut self) {
        if self.tokens.advance_if(TokenKind::CloseParen) {
            self.trace.push(TraceEntry::Symbol(")".to_string()));
        } else {
            let anchor = self.tokens.relative(-1);
            self.error_at(
                codes::syntax::MISSING_CLOSE_PAREN,
                "expected closing parenthesis ')'",
                &anchor,
            );
        }
    }

    // === HELPERS ===

    fn enter(&mut self, rule: Rule) {
        self.trace.push(TraceEntry::Rule(rule));
    }

    fn terminal(&mut self, rule: Rule, value: &str) {
        self.trace.push(TraceEntry::Terminal {
            rule,
            value: value.to_string(),
        });
    }

    /// Consume the current token when its kind satisfies `predicate`
    fn take_operator(&mut self, predicate: fn(&TokenKind) -> bool) -> Option<Token> {
        let token = self.tokens.current().filter(|t| predicate(&t.kind))?.clone();
        self.tokens.advance();
        Some(token)
    }

    fn error_at(&mut self, code: codes::Code, message: &str, token: &Token) {
        log_debug!("Syntax error recorded",
            "code" => code,
            "position" => self.tokens.position()
        );
        self.diagnostics.push(Diagnostic::syntactic(
            code,
            message,
            token.lexeme.clone(),
            token.span,
        ));
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Tokens, trace and all diagnostics for one expression
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionAnalysis {
    pub tokens: Vec<Token>,
    pub trace: Vec<TraceEntry>,
    /// Lexical diagnostics first, then syntactic ones, each in emission order
    pub diagnostics: Vec<Diagnostic>,
}

impl ExpressionAnalysis {
    pub fn rendered_trace(&self) -> String {
        render_trace(&self.trace)
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Scan and parse `text` with the compact trace
pub fn parse_expression(text: &str) -> ExpressionAnalysis {
    parse_expression_with(text, false)
}

pub fn parse_expression_with(text: &str, detailed_trace: bool) -> ExpressionAnalysis {
    let scan = lexical::scan(text);
    let parsed = ExpressionParser::new(scan.tokens.clone())
        .with_detailed_trace(detailed_trace)
        .parse();

    log_success!(codes::success::EXPRESSION_PARSE_COMPLETE,
        "Expression parsed",
        "trace_entries" => parsed.trace.len(),
        "syntax_diagnostics" => parsed.diagnostics.len()
    );

    let mut diagnostics = scan.diagnostics;
    diagnostics.extend(parsed.diagnostics);

    ExpressionAnalysis {
        tokens: scan.tokens,
        trace: parsed.trace,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::utils::Span;
    use assert_matches::assert_matches;

    fn codes_of(analysis: &ExpressionAnalysis) -> Vec<&'static str> {
        analysis.diagnostics.iter().map(|d| d.code.as_str()).collect()
    }

    #[test]
    fn test_precedence_trace() {
        let analysis = parse_expression("2+3*4");
        assert!(analysis.is_clean());
        assert_eq!(
            analysis.rendered_trace(),
            "Expression → Term → Factor → Number=2 → '+' → Term → Factor → Number=3 → '*' → Factor → Number=4"
        );
    }

    #[test]
    fn test_function_and_unary_trace() {
        let analysis = parse_expression("-ln(8.9 - 4.5) / 3.0");
        assert!(analysis.is_clean());
        assert_eq!(
            analysis.rendered_trace(),
            "Expression → Term → Factor → 'unary -' → Function → FunctionName=ln → '(' → \
             Expression → Term → Factor → Number=8.9 → '-' → Term → Factor → Number=4.5 → ')' → \
             '/' → Factor → Number=3.0"
        );
    }

    #[test]
    fn test_detailed_number_trace() {
        let analysis = parse_expression_with("12.5", true);
        assert_eq!(
            analysis.rendered_trace(),
            "Expression → Term → Factor → Number → IntegerPart → Digit=1 → Digit=2 → '.' → \
             FractionPart → Digit=5"
        );
    }

    #[test]
    fn test_unclosed_function_call() {
        let analysis = parse_expression("sin(2");
        assert_eq!(analysis.diagnostics.len(), 1);
        let diagnostic = &analysis.diagnostics[0];
        assert_eq!(diagnostic.code, codes::syntax::MISSING_CLOSE_PAREN);
        assert_eq!(diagnostic.message, "expected closing parenthesis ')'");
        assert_eq!(diagnostic.fragment, "2");
        assert_eq!(diagnostic.span, Span::point(4));
        assert!(analysis
            .tokens
            .iter()
            .any(|t| t.kind == TokenKind::Number && t.lexeme == "2"));
    }

    #[test]
    fn test_missing_open_paren_after_function() {
        let analysis = parse_expression("cos 2");
        assert_eq!(codes_of(&analysis)[0], "E043");
        assert_eq!(analysis.diagnostics[0].fragment, "2");
    }

    #[test]
    fn test_reached_end_of_input() {
        let analysis = parse_expression("2*");
        assert_eq!(analysis.diagnostics.len(), 1);
        assert_eq!(analysis.diagnostics[0].code, codes::syntax::UNEXPECTED_END);
        assert_eq!(analysis.diagnostics[0].fragment, "*");

        let empty = parse_expression("");
        assert_eq!(empty.diagnostics.len(), 1);
        assert_eq!(empty.diagnostics[0].span, Span::point(0));
        assert_eq!(empty.diagnostics[0].fragment, "");
    }

    #[test]
    fn test_non_factor_token_is_consumed() {
        let analysis = parse_expression("*3");
        assert_eq!(codes_of(&analysis), vec!["E040", "E045"]);
        assert_eq!(analysis.diagnostics[1].fragment, "3");
    }

    #[test]
    fn test_trailing_tokens_each_reported() {
        let analysis = parse_expression("(1+2))3");
        assert_eq!(codes_of(&analysis), vec!["E044", "E045"]);
        assert_eq!(analysis.diagnostics[0].span, Span::point(5));
        assert_eq!(analysis.diagnostics[0].message, "unmatched closing parenthesis ')'");
    }

    #[test]
    fn test_error_tokens_are_skipped() {
        let analysis = parse_expression("2 @ + 3");
        assert_eq!(analysis.diagnostics.len(), 1);
        assert_eq!(analysis.diagnostics[0].kind, DiagnosticKind::Lexical);
        assert!(analysis.rendered_trace().contains("'+'"));
    }

    #[test]
    fn test_lexical_diagnostics_come_first() {
        let analysis = parse_expression("foo(1");
        assert_matches!(analysis.diagnostics[0].kind, DiagnosticKind::Lexical);
        assert_matches!(
            analysis.diagnostics.last().map(|d| d.kind),
            Some(DiagnosticKind::Syntactic)
        );
    }

    #[test]
    fn test_well_formed_inputs_fully_covered() {
        for text in ["2+3*4", "sin(1.5)/(2-3)", "-(+4)*ctg(0.5)", "log(tg(1))"] {
            let analysis = parse_expression(text);
            assert!(analysis.is_clean(), "{text} should parse cleanly");

            let mut covered = vec![false; text.chars().count()];
            for token in &analysis.tokens {
                for offset in token.span.start..=token.span.end {
                    assert!(!covered[offset], "offset {offset} covered twice");
                    covered[offset] = true;
                }
            }
            assert!(covered.iter().all(|c| *c), "{text} has uncovered offsets");
        }
    }

    #[test]
    fn test_depth_limit_reports_instead_of_overflowing() {
        let text = "(".repeat(MAX_PARSE_DEPTH + 1) + "1";
        let analysis = parse_expression(&text);
        assert!(analysis
            .diagnostics
            .iter()
            .any(|d| d.code == codes::syntax::MAX_DEPTH_EXCEEDED));
    }

    #[test]
    fn test_trace_entries_serialize() {
        let entry = TraceEntry::Terminal {
            rule: Rule::Number,
            value: "2".to_string(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["terminal"]["rule"], "Number");
        assert_eq!(value["terminal"]["value"], "2");
    }
}
