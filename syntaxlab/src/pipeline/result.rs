use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::numeric::NumberMatch;
use crate::pipeline::AnalysisMode;
use crate::syntax::{PrototypeOutcome, TraceEntry};
use crate::tokens::Token;
use serde::Serialize;
use std::time::Duration;

/// Mode-specific part of a report
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Expression {
        tokens: Vec<Token>,
        trace: Vec<TraceEntry>,
        rendered_trace: String,
    },
    Prototypes {
        declarations: Vec<PrototypeOutcome>,
    },
    Numbers {
        matches: Vec<NumberMatch>,
    },
}

/// Complete result of analyzing one input
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub mode: AnalysisMode,
    /// The text every span indexes into
    pub normalized_text: String,
    pub outcome: AnalysisOutcome,
    pub diagnostics: Vec<Diagnostic>,
    pub processing_duration: Duration,
}

impl AnalysisReport {
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostic_count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn log_success(&self) {
        crate::log_performance!(
            crate::logging::codes::success::ANALYSIS_COMPLETE,
            "Analysis completed",
            duration = self.processing_duration,
            "mode" => self.mode,
            "lexical" => self.diagnostic_count(DiagnosticKind::Lexical),
            "syntactic" => self.diagnostic_count(DiagnosticKind::Syntactic),
            "structural_noise" => self.diagnostic_count(DiagnosticKind::StructuralNoise)
        );
    }
}
