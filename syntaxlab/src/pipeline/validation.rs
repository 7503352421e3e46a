use crate::logging::codes;
use crate::pipeline::{analyze, AnalysisMode};

/// Validate that the pipeline is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating analysis pipeline configuration");

    crate::logging::config::validate_config()?;

    for code in codes::diagnostic_codes() {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Diagnostic code {} has no metadata", code));
        }
    }

    crate::lexical::validate_tokenization()?;
    crate::syntax::init_syntax_logging()?;

    // Every built-in example must analyze without diagnostics
    for mode in AnalysisMode::ALL {
        let report = analyze(mode, mode.example()).map_err(|e| e.to_string())?;
        if !report.is_success() {
            return Err(format!(
                "Example for {} produced {} diagnostics",
                mode,
                report.diagnostics.len()
            ));
        }
    }

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Analysis pipeline validation succeeded",
        "modes_validated" => AnalysisMode::ALL.len(),
        "diagnostic_codes" => codes::diagnostic_codes().len()
    );

    Ok(())
}
