use crate::config::{build_info, compile_time};
use crate::pipeline::AnalysisMode;
use crate::syntax::DataType;
use crate::tokens::Function;

/// Information about pipeline capabilities
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub modes: Vec<&'static str>,
    pub functions: Vec<&'static str>,
    pub data_types: Vec<&'static str>,
    pub max_input_length: usize,
    pub max_parse_depth: usize,
    pub profile: &'static str,
    pub config_source: String,
    pub global_logging_enabled: bool,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        format!(
            "syntaxlab analysis pipeline:\n\
             - Modes: {}\n\
             - Functions: {}\n\
             - Data Types: {}\n\
             - Max Input Length: {} chars\n\
             - Max Parse Depth: {}\n\
             - Build Profile: {} ({})\n\
             - Global Logging: {}",
            self.modes.join(", "),
            self.functions.join(", "),
            self.data_types.join(", "),
            self.max_input_length,
            self.max_parse_depth,
            self.profile,
            self.config_source,
            self.global_logging_enabled
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "{} analysis modes, {} functions, {} data types ({} profile)",
            self.modes.len(),
            self.functions.len(),
            self.data_types.len(),
            self.profile
        )
    }
}

/// Get pipeline capabilities information
pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        modes: AnalysisMode::ALL.iter().map(|m| m.as_str()).collect(),
        functions: Function::ALL.iter().map(|f| f.as_str()).collect(),
        data_types: DataType::KEYWORDS.to_vec(),
        max_input_length: compile_time::input::MAX_INPUT_LENGTH,
        max_parse_depth: compile_time::syntax::MAX_PARSE_DEPTH,
        profile: build_info::profile(),
        config_source: build_info::source_info(),
        global_logging_enabled: crate::logging::is_initialized(),
    }
}
