//! syntaxlab: error-tolerant lexical and syntactic analysis of short texts
//!
//! Three analyses share one diagnostic model: a finite-state scanner plus a
//! recursive-descent parser for arithmetic expressions, a character-level parser for
//! C-style function prototypes built on a noise-neutralizing matcher, and a greedy
//! automaton that finds real-number literals in free text.

// Internal modules
pub mod config;
pub mod diagnostics;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod matcher;
pub mod numeric;
pub mod pipeline;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use pipeline::{analyze, analyze_with_preferences, AnalysisMode, AnalysisReport, PipelineError};
pub use utils::{SourceText, Span};
