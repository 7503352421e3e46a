//! Where the text to analyze comes from

use std::io::Read;
use std::path::{Path, PathBuf};
use syntaxlab::logging::codes::{self, Code};
use syntaxlab::AnalysisMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Text(String),
    File(PathBuf),
    /// The built-in sample for the selected mode
    Example,
    Stdin,
}

impl InputSource {
    pub fn from_args(text: Option<&str>, file: Option<&Path>, example: bool) -> Self {
        if example {
            InputSource::Example
        } else if let Some(path) = file {
            InputSource::File(path.to_path_buf())
        } else if let Some(text) = text {
            InputSource::Text(text.to_string())
        } else {
            InputSource::Stdin
        }
    }

    pub fn describe(&self) -> String {
        match self {
            InputSource::Text(_) => "command line".to_string(),
            InputSource::File(path) => path.display().to_string(),
            InputSource::Example => "built-in example".to_string(),
            InputSource::Stdin => "standard input".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Cannot read {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read standard input: {0}")]
    Stdin(#[source] std::io::Error),
}

impl InputError {
    pub fn error_code(&self) -> Code {
        codes::input::IO_ERROR
    }
}

pub fn read_input(source: &InputSource, mode: AnalysisMode) -> Result<String, InputError> {
    match source {
        InputSource::Text(text) => Ok(text.clone()),
        InputSource::Example => Ok(mode.example().to_string()),
        InputSource::File(path) => std::fs::read_to_string(path).map_err(|source| InputError::File {
            path: path.clone(),
            source,
        }),
        InputSource::Stdin => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(InputError::Stdin)?;
            Ok(buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_source_precedence() {
        assert_eq!(
            InputSource::from_args(Some("1+2"), None, true),
            InputSource::Example
        );
        assert_eq!(
            InputSource::from_args(Some("1+2"), Some(Path::new("a.txt")), false),
            InputSource::File(PathBuf::from("a.txt"))
        );
        assert_eq!(
            InputSource::from_args(Some("1+2"), None, false),
            InputSource::Text("1+2".to_string())
        );
        assert_eq!(InputSource::from_args(None, None, false), InputSource::Stdin);
    }

    #[test]
    fn test_reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "int f();\nbool g(char c);").unwrap();

        let source = InputSource::File(file.path().to_path_buf());
        let text = read_input(&source, AnalysisMode::FunctionPrototype).unwrap();
        assert_eq!(text, "int f();\nbool g(char c);");
    }

    #[test]
    fn test_missing_file_maps_to_io_code() {
        let dir = tempfile::tempdir().unwrap();
        let source = InputSource::File(dir.path().join("missing.txt"));

        let error = read_input(&source, AnalysisMode::ArithmeticExpression).unwrap_err();
        assert_eq!(error.error_code().as_str(), "E007");
        assert!(error.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_example_follows_mode() {
        let text = read_input(&InputSource::Example, AnalysisMode::RealNumberSearch).unwrap();
        assert_eq!(text, AnalysisMode::RealNumberSearch.example());
    }
}
