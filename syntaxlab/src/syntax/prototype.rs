//! Character-level parser for C-style function prototypes
//!
//! ```text
//! Prototype := TypeKeyword Whitespace Identifier '(' ParamList? ')' ';'
//! ParamList := Param {',' Param}
//! Param     := TypeKeyword Whitespace Identifier
//! ```
//!
//! Keywords and identifiers go through the neutralizing matcher, so stray characters
//! inside them are reported and skipped instead of derailing the declaration. When a
//! declaration cannot continue it is abandoned and parsing resumes at the next
//! non-whitespace character.

use crate::diagnostics::Diagnostic;
use crate::logging::codes::{self, Code};
use crate::matcher::{match_with_neutralization, Delimiter, Expectation};
use crate::utils::{normalize, Span};
use crate::{log_debug, log_success};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// SIGNATURE TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Int,
    Float,
    Char,
    String,
    Bool,
}

impl DataType {
    /// Keywords in the order the matcher tries them
    pub const KEYWORDS: &'static [&'static str] = &["int", "float", "char", "string", "bool"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Char => "char",
            DataType::String => "string",
            DataType::Bool => "bool",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "int" => Ok(DataType::Int),
            "float" => Ok(DataType::Float),
            "char" => Ok(DataType::Char),
            "string" => Ok(DataType::String),
            "bool" => Ok(DataType::Bool),
            other => Err(format!("unknown data type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub data_type: DataType,
    pub name: String,
}

/// A recognized declaration, possibly reconstructed from noisy text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prototype {
    pub return_type: DataType,
    pub name: String,
    pub params: Vec<Parameter>,
    pub span: Span,
}

impl fmt::Display for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.data_type, p.name))
            .collect();
        write!(f, "{} {}({});", self.return_type, self.name, params.join(", "))
    }
}

/// Result of one pass of the declaration rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrototypeOutcome {
    /// Characters consumed by this declaration attempt
    pub span: Span,
    pub signature: Option<Prototype>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PrototypeOutcome {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn is_recognized(&self) -> bool {
        self.signature.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrototypeAnalysis {
    pub declarations: Vec<PrototypeOutcome>,
}

impl PrototypeAnalysis {
    /// Every diagnostic, declaration by declaration
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.declarations
            .iter()
            .flat_map(|d| d.diagnostics.iter().cloned())
            .collect()
    }

    pub fn signatures(&self) -> impl Iterator<Item = &Prototype> {
        self.declarations.iter().filter_map(|d| d.signature.as_ref())
    }

    pub fn is_clean(&self) -> bool {
        self.declarations.iter().all(PrototypeOutcome::is_clean)
    }
}

// ============================================================================
// PARSER
// ============================================================================

const PARAM_TYPE_FIRST: &str = "expected parameter data type or closing parenthesis ')'";
const PARAM_TYPE_AFTER_COMMA: &str = "expected parameter data type";

struct PrototypeParser {
    text: Vec<char>,
    pos: usize,
    /// Diagnostics of the declaration being parsed
    diagnostics: Vec<Diagnostic>,
}

impl PrototypeParser {
    fn new(text: &str) -> Self {
        Self {
            text: normalize(text).chars().collect(),
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    fn run(mut self) -> PrototypeAnalysis {
        let mut declarations = Vec::new();

        self.skip_whitespace();
        while self.pos < self.text.len() {
            let start = self.pos;
            let signature = self.declaration();

            if self.pos == start {
                self.pos += 1;
            }

            log_debug!("Declaration parsed",
                "start" => start,
                "end" => self.pos,
                "recognized" => signature.is_some()
            );

            declarations.push(PrototypeOutcome {
                span: Span::new(start, self.pos - 1),
                signature,
                diagnostics: std::mem::take(&mut self.diagnostics),
            });
            self.skip_whitespace();
        }

        PrototypeAnalysis { declarations }
    }

    /// One declaration; `None` when it had to be abandoned
    fn declaration(&mut self) -> Option<Prototype> {
        let start = self.pos;

        let return_type = self.data_type(
            Expectation::keywords(DataType::KEYWORDS, Delimiter::Space, "data type"),
        )?;
        self.whitespace_after_type()?;

        let name = self.expect(&Expectation::identifier(
            Delimiter::OpenParen,
            "function identifier",
        ))?;

        if !self.match_char('(') {
            self.collect_garbage(
                codes::prototype::EXPECTED_OPEN_PAREN,
                "expected opening parenthesis '('",
            );
            return None;
        }

        self.skip_whitespace();
        let params = if self.match_char(')') {
            Vec::new()
        } else {
            let params = self.parameter_list()?;
            if !self.match_char(')') {
                self.collect_garbage(
                    codes::prototype::EXPECTED_PARAM_SEPARATOR,
                    "expected ',' or closing parenthesis ')'",
                );
                return None;
            }
            params
        };

        if !self.match_char(';') {
            self.collect_garbage(
                codes::prototype::EXPECTED_SEMICOLON,
                "expected end of statement ';'",
            );
        }

        Some(Prototype {
            return_type,
            name,
            params,
            span: Span::new(start, self.pos.max(start + 1) - 1),
        })
    }

    fn parameter_list(&mut self) -> Option<Vec<Parameter>> {
        let mut params = Vec::new();
        let mut after_comma = false;

        loop {
            self.skip_whitespace();

            let rejection = if after_comma {
                PARAM_TYPE_AFTER_COMMA
            } else {
                PARAM_TYPE_FIRST
            };
            let data_type = self.data_type(
                Expectation::keywords(DataType::KEYWORDS, Delimiter::Space, "parameter data type")
                    .with_rejection_message(rejection),
            )?;

            if !self.match_char(' ') {
                self.collect_garbage(
                    codes::prototype::EXPECTED_WHITESPACE,
                    "expected whitespace after parameter data type",
                );
                return None;
            }

            let name = self.expect(&Expectation::identifier(
                Delimiter::ParameterEnd,
                "parameter identifier",
            ))?;
            params.push(Parameter { data_type, name });

            self.skip_whitespace();
            if self.match_char(',') {
                after_comma = true;
                continue;
            }
            return Some(params);
        }
    }

    /// After the return type: skip to the next space, reporting anything in between
    fn whitespace_after_type(&mut self) -> Option<()> {
        let ws_start = self.pos;
        let found = self.text[ws_start..].iter().position(|&ch| ch == ' ');
        let message = "expected whitespace after data type";

        match found {
            Some(offset) => {
                if offset > 0 {
                    let junk: String = self.text[ws_start..ws_start + offset].iter().collect();
                    self.report(
                        codes::prototype::EXPECTED_WHITESPACE,
                        message,
                        junk,
                        Span::new(ws_start, ws_start + offset - 1),
                    );
                }
                self.pos = ws_start + offset + 1;
                Some(())
            }
            None => {
                let len = self.text.len();
                if ws_start < len {
                    let rest: String = self.text[ws_start..].iter().collect();
                    self.report(
                        codes::prototype::EXPECTED_WHITESPACE,
                        message,
                        rest,
                        Span::new(ws_start, len - 1),
                    );
                } else {
                    self.report(
                        codes::prototype::EXPECTED_WHITESPACE,
                        message,
                        String::new(),
                        Span::point(len),
                    );
                }
                self.pos = len;
                None
            }
        }
    }

    // === HELPERS ===

    fn expect(&mut self, expectation: &Expectation) -> Option<String> {
        let outcome = match_with_neutralization(&self.text, self.pos, expectation);
        self.pos = outcome.consumed_end;
        self.diagnostics.extend(outcome.diagnostics);
        outcome.value
    }

    fn data_type(&mut self, expectation: Expectation) -> Option<DataType> {
        self.expect(&expectation)?.parse().ok()
    }

    fn current(&self) -> Option<char> {
        self.text.get(self.pos).copied()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Report the run up to the next whitespace, `,`, `)` or `;`
    fn collect_garbage(&mut self, code: Code, message: &str) {
        let start = self.pos;
        while self
            .current()
            .is_some_and(|ch| !ch.is_whitespace() && !matches!(ch, ',' | ')' | ';'))
        {
            self.pos += 1;
        }

        if self.pos > start {
            let fragment: String = self.text[start..self.pos].iter().collect();
            self.report(code, message, fragment, Span::new(start, self.pos - 1));
        } else {
            self.report(code, message, String::new(), Span::point(start));
        }
    }

    fn report(&mut self, code: Code, message: &str, fragment: String, span: Span) {
        self.diagnostics
            .push(Diagnostic::syntactic(code, message, fragment, span));
    }
}

/// Parse every prototype in `text`
pub fn parse_prototypes(text: &str) -> PrototypeAnalysis {
    let analysis = PrototypeParser::new(text).run();

    log_success!(codes::success::PROTOTYPE_PARSE_COMPLETE,
        "Prototype parsing completed",
        "declarations" => analysis.declarations.len(),
        "recognized" => analysis.signatures().count()
    );

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use assert_matches::assert_matches;

    #[test]
    fn test_clean_sample() {
        let analysis = parse_prototypes("float calculateRectangleArea(float length, float width);");
        assert_eq!(analysis.declarations.len(), 1);
        assert!(analysis.is_clean());

        let signature = analysis.declarations[0].signature.as_ref().unwrap();
        assert_eq!(signature.return_type, DataType::Float);
        assert_eq!(signature.name, "calculateRectangleArea");
        assert_eq!(signature.params.len(), 2);
        assert_eq!(signature.params[1].name, "width");
        assert_eq!(
            signature.to_string(),
            "float calculateRectangleArea(float length, float width);"
        );
        assert_eq!(signature.span, Span::new(0, 55));
    }

    #[test]
    fn test_resynchronizes_after_broken_declaration() {
        let analysis = parse_prototypes("int f(; float g(float x);");
        assert_eq!(analysis.declarations.len(), 2);

        let first = &analysis.declarations[0];
        assert!(first.signature.is_none());
        assert_eq!(first.diagnostics.len(), 1);
        assert_eq!(first.diagnostics[0].message, PARAM_TYPE_FIRST);
        assert_eq!(first.diagnostics[0].fragment, ";");

        let second = &analysis.declarations[1];
        assert!(second.is_clean());
        let signature = second.signature.as_ref().unwrap();
        assert_eq!(signature.name, "g");
        assert_eq!(
            signature.params,
            vec![Parameter {
                data_type: DataType::Float,
                name: "x".to_string()
            }]
        );
    }

    #[test]
    fn test_noise_inside_keyword_keeps_signature() {
        let analysis = parse_prototypes("i!n@t foo();");
        let declaration = &analysis.declarations[0];

        assert!(!declaration.is_clean());
        assert!(declaration.is_recognized());
        assert_eq!(declaration.diagnostics.len(), 2);
        for diagnostic in &declaration.diagnostics {
            assert_eq!(diagnostic.kind, DiagnosticKind::StructuralNoise);
            assert_eq!(diagnostic.message, "expected data type 'int'");
        }
    }

    #[test]
    fn test_junk_before_space_after_type() {
        let analysis = parse_prototypes("intx f();");
        let declaration = &analysis.declarations[0];

        assert_eq!(declaration.diagnostics.len(), 1);
        assert_eq!(declaration.diagnostics[0].code, codes::prototype::EXPECTED_WHITESPACE);
        assert_eq!(declaration.diagnostics[0].fragment, "x");
        assert_eq!(declaration.diagnostics[0].span, Span::point(3));
        assert_eq!(declaration.signature.as_ref().map(|s| s.name.as_str()), Some("f"));
    }

    #[test]
    fn test_type_at_end_of_input() {
        let analysis = parse_prototypes("int");
        let declaration = &analysis.declarations[0];

        assert!(declaration.signature.is_none());
        assert_eq!(declaration.diagnostics[0].fragment, "");
        assert_eq!(declaration.diagnostics[0].span, Span::point(3));
    }

    #[test]
    fn test_missing_semicolon_still_recognized() {
        let analysis = parse_prototypes("bool ready()");
        let declaration = &analysis.declarations[0];

        assert!(declaration.is_recognized());
        assert_eq!(declaration.diagnostics.len(), 1);
        assert_eq!(declaration.diagnostics[0].code, codes::prototype::EXPECTED_SEMICOLON);
        assert_eq!(declaration.diagnostics[0].span, Span::point(12));
    }

    #[test]
    fn test_missing_separator_abandons_declaration() {
        let analysis = parse_prototypes("int f(int a b);");
        let first = &analysis.declarations[0];

        assert!(first.signature.is_none());
        assert_eq!(first.diagnostics[0].code, codes::prototype::EXPECTED_PARAM_SEPARATOR);
        assert_eq!(first.diagnostics[0].fragment, "b");
        assert_eq!(analysis.declarations.len(), 2);
    }

    #[test]
    fn test_parameter_type_after_comma() {
        let analysis = parse_prototypes("int f(int a, );");
        let first = &analysis.declarations[0];
        assert_eq!(first.diagnostics[0].message, PARAM_TYPE_AFTER_COMMA);
        assert_eq!(first.diagnostics[0].code, codes::prototype::EXPECTED_DATA_TYPE);
    }

    #[test]
    fn test_parameter_type_needs_single_space() {
        let analysis = parse_prototypes("int f(floatx);");
        let first = &analysis.declarations[0];
        assert_eq!(first.diagnostics[0].code, codes::prototype::EXPECTED_WHITESPACE);
        assert_eq!(first.diagnostics[0].fragment, "x");
    }

    #[test]
    fn test_multiple_lines_and_case() {
        let analysis = parse_prototypes("INT a();\n\tbool b(char c, string d);");
        assert_eq!(analysis.declarations.len(), 2);
        assert!(analysis.is_clean());
        assert_matches!(
            analysis.signatures().next(),
            Some(Prototype {
                return_type: DataType::Int,
                ..
            })
        );
    }

    #[test]
    fn test_every_iteration_makes_progress() {
        let analysis = parse_prototypes(") ; ,,, (((");
        assert!(!analysis.declarations.is_empty());
        assert!(analysis.signatures().next().is_none());
        let total: usize = analysis.declarations.iter().map(|d| d.span.len()).sum();
        assert!(total <= 11);
    }
}
