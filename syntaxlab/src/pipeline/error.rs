use crate::logging::codes::{self, Code};

/// Failures that prevent an analysis from running at all
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("Input has {length} characters, the limit is {max}")]
    InputTooLarge { length: usize, max: usize },

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            PipelineError::EmptyInput => codes::input::EMPTY_INPUT,
            PipelineError::InputTooLarge { .. } => codes::input::INPUT_TOO_LARGE,
            PipelineError::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }
}
