//! Consolidated diagnostic and event codes
//!
//! Single source of truth for every code the analyzers emit, together with the
//! behavioural metadata used when the codes surface in logs.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Input acceptance error codes
pub mod input {
    use super::Code;

    pub const EMPTY_INPUT: Code = Code::new("E005");
    pub const INPUT_TOO_LARGE: Code = Code::new("E006");
    pub const IO_ERROR: Code = Code::new("E007");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_FRAGMENT: Code = Code::new("E020");
    pub const MISSING_FRACTION: Code = Code::new("E021");
    pub const UNKNOWN_FUNCTION: Code = Code::new("E022");
}

/// Arithmetic expression syntax error codes
pub mod syntax {
    use super::Code;

    pub const MISSING_FACTOR: Code = Code::new("E040");
    pub const UNEXPECTED_END: Code = Code::new("E041");
    pub const MISSING_CLOSE_PAREN: Code = Code::new("E042");
    pub const MISSING_OPEN_PAREN: Code = Code::new("E043");
    pub const UNMATCHED_CLOSE_PAREN: Code = Code::new("E044");
    pub const TRAILING_TOKEN: Code = Code::new("E045");
    pub const MAX_DEPTH_EXCEEDED: Code = Code::new("E046");
}

/// Function prototype error codes
pub mod prototype {
    use super::Code;

    pub const EXPECTED_DATA_TYPE: Code = Code::new("E060");
    pub const EXPECTED_WHITESPACE: Code = Code::new("E061");
    pub const EXPECTED_IDENTIFIER: Code = Code::new("E062");
    pub const EXPECTED_OPEN_PAREN: Code = Code::new("E063");
    pub const EXPECTED_PARAM_SEPARATOR: Code = Code::new("E064");
    pub const EXPECTED_SEMICOLON: Code = Code::new("E065");
}

/// Structural matcher codes
pub mod structural {
    use super::Code;

    pub const GARBAGE_RUN: Code = Code::new("E080");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const NUMBER_SEARCH_COMPLETE: Code = Code::new("I030");
    pub const EXPRESSION_PARSE_COMPLETE: Code = Code::new("I040");
    pub const PROTOTYPE_PARSE_COMPLETE: Code = Code::new("I060");
    pub const ANALYSIS_COMPLETE: Code = Code::new("I090");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the input that triggered it",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check logging configuration and environment variables",
            ),
        );

        // Input errors
        registry.insert(
            "E005",
            ErrorMetadata::new(
                "E005",
                "Input",
                Severity::Medium,
                false,
                false,
                "Input text is empty or whitespace only",
                "Provide text to analyze",
            ),
        );
        registry.insert(
            "E006",
            ErrorMetadata::new(
                "E006",
                "Input",
                Severity::High,
                false,
                false,
                "Input text exceeds the configured maximum length",
                "Split the input or raise max_input_length in the build profile",
            ),
        );
        registry.insert(
            "E007",
            ErrorMetadata::new(
                "E007",
                "Input",
                Severity::High,
                false,
                false,
                "Input could not be read",
                "Check the path and file permissions",
            ),
        );

        // Lexical errors
        registry.insert(
            "E020",
            ErrorMetadata::new(
                "E020",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "Run of characters that cannot start any token",
                "Remove the highlighted characters",
            ),
        );
        registry.insert(
            "E021",
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "Number has a dot but no fractional digits",
                "Add digits after the dot or remove it",
            ),
        );
        registry.insert(
            "E022",
            ErrorMetadata::new(
                "E022",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "Word is not one of the recognized function names",
                "Use sin, cos, tg, ctg, log or ln",
            ),
        );

        // Expression syntax errors
        registry.insert(
            "E040",
            ErrorMetadata::new(
                "E040",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Token cannot start a factor",
                "Insert a number, a function call or a parenthesized expression",
            ),
        );
        registry.insert(
            "E041",
            ErrorMetadata::new(
                "E041",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Input ended where a factor was required",
                "Complete the expression",
            ),
        );
        registry.insert(
            "E042",
            ErrorMetadata::new(
                "E042",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Parenthesized expression is not closed",
                "Add the missing ')'",
            ),
        );
        registry.insert(
            "E043",
            ErrorMetadata::new(
                "E043",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Function name is not followed by '('",
                "Write the argument in parentheses",
            ),
        );
        registry.insert(
            "E044",
            ErrorMetadata::new(
                "E044",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Closing parenthesis without a matching '('",
                "Remove the extra ')'",
            ),
        );
        registry.insert(
            "E045",
            ErrorMetadata::new(
                "E045",
                "Syntax",
                Severity::Low,
                true,
                false,
                "Token follows a complete expression",
                "Join the tokens with an operator or remove them",
            ),
        );
        registry.insert(
            "E046",
            ErrorMetadata::new(
                "E046",
                "Syntax",
                Severity::High,
                true,
                false,
                "Expression nesting exceeds the configured depth",
                "Reduce parenthesis nesting or raise max_parse_depth",
            ),
        );

        // Prototype errors
        registry.insert(
            "E060",
            ErrorMetadata::new(
                "E060",
                "Prototype",
                Severity::Medium,
                true,
                false,
                "No data type keyword could be assembled",
                "Start the declaration with int, float, char, string or bool",
            ),
        );
        registry.insert(
            "E061",
            ErrorMetadata::new(
                "E061",
                "Prototype",
                Severity::Medium,
                true,
                false,
                "Data type is not followed by whitespace",
                "Separate the type from the name with a space",
            ),
        );
        registry.insert(
            "E062",
            ErrorMetadata::new(
                "E062",
                "Prototype",
                Severity::Medium,
                true,
                false,
                "No identifier could be assembled",
                "Identifiers start with a letter followed by letters, digits or '_'",
            ),
        );
        registry.insert(
            "E063",
            ErrorMetadata::new(
                "E063",
                "Prototype",
                Severity::Medium,
                true,
                false,
                "Function name is not followed by '('",
                "Open the parameter list with '('",
            ),
        );
        registry.insert(
            "E064",
            ErrorMetadata::new(
                "E064",
                "Prototype",
                Severity::Medium,
                true,
                false,
                "Parameter list is not continued with ',' or closed with ')'",
                "Separate parameters with ',' and close the list with ')'",
            ),
        );
        registry.insert(
            "E065",
            ErrorMetadata::new(
                "E065",
                "Prototype",
                Severity::Low,
                true,
                false,
                "Declaration is not terminated with ';'",
                "End the declaration with ';'",
            ),
        );

        // Structural noise
        registry.insert(
            "E080",
            ErrorMetadata::new(
                "E080",
                "Structural",
                Severity::Low,
                true,
                false,
                "Characters interleaved with an expected keyword or identifier",
                "Remove the discarded fragment",
            ),
        );

        // Success codes
        registry.insert(
            "I004",
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "Logging and pipeline initialization completed",
                "No action required",
            ),
        );
        registry.insert(
            "I090",
            ErrorMetadata::new(
                "I090",
                "Pipeline",
                Severity::Low,
                true,
                false,
                "Analysis of one input completed",
                "No action required",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

/// Every error code a diagnostic can carry
pub fn diagnostic_codes() -> [Code; 17] {
    [
        lexical::INVALID_FRAGMENT,
        lexical::MISSING_FRACTION,
        lexical::UNKNOWN_FUNCTION,
        syntax::MISSING_FACTOR,
        syntax::UNEXPECTED_END,
        syntax::MISSING_CLOSE_PAREN,
        syntax::MISSING_OPEN_PAREN,
        syntax::UNMATCHED_CLOSE_PAREN,
        syntax::TRAILING_TOKEN,
        syntax::MAX_DEPTH_EXCEEDED,
        prototype::EXPECTED_DATA_TYPE,
        prototype::EXPECTED_WHITESPACE,
        prototype::EXPECTED_IDENTIFIER,
        prototype::EXPECTED_OPEN_PAREN,
        prototype::EXPECTED_PARAM_SEPARATOR,
        prototype::EXPECTED_SEMICOLON,
        structural::GARBAGE_RUN,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_diagnostic_code_has_metadata() {
        for code in diagnostic_codes() {
            let metadata = get_error_metadata(code.as_str());
            assert!(metadata.is_some(), "missing metadata for {}", code);
            assert!(metadata.map(|m| m.recoverable).unwrap_or(false));
        }
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_category("X999"), "Unknown");
        assert_eq!(get_action("X999"), "No specific action available");
        assert!(get_error_metadata("X999").is_none());
    }

    #[test]
    fn test_system_errors_halt() {
        let metadata = get_error_metadata(system::INTERNAL_ERROR.as_str());
        assert_matches::assert_matches!(
            metadata,
            Some(ErrorMetadata { requires_halt: true, severity: Severity::Critical, .. })
        );
        assert_eq!(get_category(lexical::UNKNOWN_FUNCTION.as_str()), "Lexical");
        assert_eq!(get_action(prototype::EXPECTED_SEMICOLON.as_str()), "End the declaration with ';'");
    }

    #[test]
    fn test_code_serializes_as_string() {
        let json = serde_json::to_string(&structural::GARBAGE_RUN).unwrap();
        assert_eq!(json, "\"E080\"");
    }
}
