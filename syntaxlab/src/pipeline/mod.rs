//! Analysis pipeline: input checks, mode dispatch, diagnostic ordering and logging

mod error;
mod info;
mod mode;
mod result;
mod validation;

pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use mode::AnalysisMode;
pub use result::{AnalysisOutcome, AnalysisReport};
pub use validation::validate_pipeline;

use crate::config::compile_time::input::MAX_INPUT_LENGTH;
use crate::config::runtime::AnalysisPreferences;
use crate::diagnostics::{sort_by_position, Diagnostic};
use crate::logging;
use crate::utils::normalize;
use std::time::Instant;

/// Analyze `text` in `mode` with preferences read from the environment
pub fn analyze(mode: AnalysisMode, text: &str) -> Result<AnalysisReport, PipelineError> {
    analyze_with_preferences(mode, text, &AnalysisPreferences::default())
}

pub fn analyze_with_preferences(
    mode: AnalysisMode,
    text: &str,
    preferences: &AnalysisPreferences,
) -> Result<AnalysisReport, PipelineError> {
    let length = text.chars().count();

    logging::with_analysis_context(mode.as_str(), length, || {
        check_input(text, length)?;

        crate::log_info!("Starting analysis",
            "mode" => mode.name(),
            "length" => length,
            "detailed_trace" => preferences.detailed_trace
        );

        let start_time = Instant::now();
        let (outcome, mut diagnostics) = run_mode(mode, text, preferences);

        if preferences.sort_diagnostics {
            sort_by_position(&mut diagnostics);
        }
        if preferences.log_diagnostics {
            log_diagnostics(&diagnostics);
        }

        let report = AnalysisReport {
            mode,
            normalized_text: normalize(text),
            outcome,
            diagnostics,
            processing_duration: start_time.elapsed(),
        };
        report.log_success();

        Ok(report)
    })
}

fn check_input(text: &str, length: usize) -> Result<(), PipelineError> {
    if text.trim().is_empty() {
        let error = PipelineError::EmptyInput;
        crate::log_error!(error.error_code(), "Rejected empty input");
        return Err(error);
    }

    if length > MAX_INPUT_LENGTH {
        let error = PipelineError::InputTooLarge {
            length,
            max: MAX_INPUT_LENGTH,
        };
        crate::log_error!(error.error_code(), "Rejected oversized input",
            "length" => length,
            "max" => MAX_INPUT_LENGTH
        );
        return Err(error);
    }

    Ok(())
}

fn run_mode(
    mode: AnalysisMode,
    text: &str,
    preferences: &AnalysisPreferences,
) -> (AnalysisOutcome, Vec<Diagnostic>) {
    match mode {
        AnalysisMode::ArithmeticExpression => {
            let analysis = crate::syntax::parse_expression_with(text, preferences.detailed_trace);
            let rendered_trace = analysis.rendered_trace();
            (
                AnalysisOutcome::Expression {
                    tokens: analysis.tokens,
                    trace: analysis.trace,
                    rendered_trace,
                },
                analysis.diagnostics,
            )
        }
        AnalysisMode::FunctionPrototype => {
            let analysis = crate::syntax::parse_prototypes(text);
            let diagnostics = analysis.diagnostics();
            (
                AnalysisOutcome::Prototypes {
                    declarations: analysis.declarations,
                },
                diagnostics,
            )
        }
        AnalysisMode::RealNumberSearch => (
            AnalysisOutcome::Numbers {
                matches: crate::numeric::search(text),
            },
            Vec::new(),
        ),
    }
}

fn log_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        crate::log_warning!(code = diagnostic.code, &diagnostic.message,
            span = diagnostic.span,
            "kind" => diagnostic.kind,
            "fragment" => &diagnostic.fragment
        );
    }
}
