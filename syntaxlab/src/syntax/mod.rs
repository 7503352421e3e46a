//! Syntax analysis for the two grammars
//!
//! Arithmetic expressions are parsed over scanner tokens with a rule trace; function
//! prototypes are parsed directly over characters through the structural matcher.
//! Neither parser fails: problems come back as diagnostics alongside the result.

pub mod arithmetic;
pub mod prototype;

pub use arithmetic::{
    parse_expression, parse_expression_with, render_trace, ExpressionAnalysis,
    ExpressionParser, ParseResult, Rule, TraceEntry,
};
pub use prototype::{
    parse_prototypes, DataType, Parameter, Prototype, PrototypeAnalysis, PrototypeOutcome,
};

use crate::logging::codes;
use crate::{log_debug, log_info};

/// Check that every syntax and prototype code is registered with metadata
pub fn init_syntax_logging() -> Result<(), String> {
    let syntax_codes = [
        codes::syntax::MISSING_FACTOR,
        codes::syntax::UNEXPECTED_END,
        codes::syntax::MISSING_CLOSE_PAREN,
        codes::syntax::MISSING_OPEN_PAREN,
        codes::syntax::UNMATCHED_CLOSE_PAREN,
        codes::syntax::TRAILING_TOKEN,
        codes::syntax::MAX_DEPTH_EXCEEDED,
        codes::prototype::EXPECTED_DATA_TYPE,
        codes::prototype::EXPECTED_WHITESPACE,
        codes::prototype::EXPECTED_IDENTIFIER,
        codes::prototype::EXPECTED_OPEN_PAREN,
        codes::prototype::EXPECTED_PARAM_SEPARATOR,
        codes::prototype::EXPECTED_SEMICOLON,
        codes::structural::GARBAGE_RUN,
    ];

    for code in &syntax_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Syntax error code {} not found in metadata registry",
                code.as_str()
            ));
        }
        log_debug!("Syntax code registered", "code" => code);
    }

    log_info!("Syntax module logging validation completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_initialization() {
        assert!(init_syntax_logging().is_ok());
    }

    #[test]
    fn test_grammars_are_independent() {
        // The expression scanner rejects prototype text; the prototype parser accepts it
        let text = "float area(float w);";
        assert!(!parse_expression(text).is_clean());
        assert!(parse_prototypes(text).is_clean());
    }
}
