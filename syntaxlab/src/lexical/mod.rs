//! Lexical analysis for arithmetic expressions
//!
//! Converts raw text into tokens with exact character spans plus lexical
//! diagnostics. Input is normalized first, so spans index the normalized text.

pub mod analyzer;

pub use analyzer::{is_error_char, LexicalAnalyzer, ScanResult, ScanState};

/// Scan `text` into tokens and lexical diagnostics
pub fn scan(text: &str) -> ScanResult {
    LexicalAnalyzer::new(text).analyze()
}

/// Check that every lexical code carries registry metadata
pub fn validate_tokenization() -> Result<(), String> {
    let lexical_codes = [
        crate::logging::codes::lexical::INVALID_FRAGMENT,
        crate::logging::codes::lexical::MISSING_FRACTION,
        crate::logging::codes::lexical::UNKNOWN_FUNCTION,
    ];

    for code in &lexical_codes {
        let description = crate::logging::codes::get_description(code.as_str());
        if description == "Unknown error" {
            return Err(format!(
                "Lexical error code {} has no description",
                code.as_str()
            ));
        }
    }

    let sample = scan("sin(1.5)");
    if !sample.is_clean() || sample.tokens.len() != 4 {
        return Err("Scanner self-check failed on 'sin(1.5)'".to_string());
    }

    Ok(())
}
