//! # syntaxlab CLI
//!
//! Runs one analysis over text from the command line, a file, standard input or the
//! built-in example, and prints the report as text or JSON. Logs go to stderr.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use syntaxlab::config::runtime::AnalysisPreferences;
use syntaxlab::{log_error, log_info, logging, pipeline, AnalysisMode, SourceText};

mod input;
mod render;

use input::InputSource;

/// Exit status when the analysis reported diagnostics
const EXIT_DIAGNOSTICS: u8 = 1;
/// Exit status when input could not be read or analyzed
const EXIT_FAILURE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "syntaxlab", version)]
#[command(about = "Error-tolerant scanner, parsers and number search for short texts")]
struct Args {
    /// Analysis to run: expression, prototype or numbers
    #[arg(short, long, default_value_t = AnalysisMode::ArithmeticExpression)]
    mode: AnalysisMode,

    /// Text to analyze; standard input is read when no source is given
    text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Analyze the built-in example for the selected mode
    #[arg(long, conflicts_with_all = ["text", "file"])]
    example: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Expand numbers into digits in the expression trace
    #[arg(long)]
    detailed_trace: bool,

    /// Print pipeline capabilities and exit
    #[arg(long)]
    info: bool,

    /// Debug-level logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_FAILURE);
    }

    match run(&args) {
        Ok(status) => ExitCode::from(status),
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn init_logging(verbose: bool) -> Result<(), String> {
    if verbose {
        logging::config::init_runtime_preferences(
            logging::config::get_development_preferences(),
        )?;
    }
    logging::init_global_logging()
}

/// Analyze and print; the result is the process exit status
fn run(args: &Args) -> Result<u8, String> {
    if args.info {
        println!("{}", pipeline::get_pipeline_info().report());
        return Ok(0);
    }

    let source = InputSource::from_args(args.text.as_deref(), args.file.as_deref(), args.example);
    log_info!("syntaxlab starting",
        "mode" => args.mode,
        "source" => source.describe()
    );

    let text = input::read_input(&source, args.mode).map_err(|e| {
        log_error!(e.error_code(), "Failed to read input", "error" => e.to_string());
        e.to_string()
    })?;

    let defaults = AnalysisPreferences::default();
    let preferences = AnalysisPreferences {
        detailed_trace: args.detailed_trace || defaults.detailed_trace,
        ..defaults
    };

    let report = syntaxlab::analyze_with_preferences(args.mode, &text, &preferences).map_err(|e| {
        log_error!(e.error_code(), "Analysis failed", "error" => e.to_string());
        e.to_string()
    })?;

    match args.format {
        OutputFormat::Text => print!("{}", render::render_text(&report, &SourceText::new(&text))),
        OutputFormat::Json => {
            let json = report.to_json().map_err(|e| e.to_string())?;
            println!("{}", json);
        }
    }

    if report.is_success() {
        Ok(0)
    } else {
        Ok(EXIT_DIAGNOSTICS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parses_mode_and_flags() {
        let args = Args::parse_from([
            "syntaxlab",
            "--mode",
            "prototype",
            "--format",
            "json",
            "--detailed-trace",
            "int f();",
        ]);
        assert_eq!(args.mode, AnalysisMode::FunctionPrototype);
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.detailed_trace);
        assert_eq!(args.text.as_deref(), Some("int f();"));
    }

    #[test]
    fn test_defaults_to_expression_text() {
        let args = Args::parse_from(["syntaxlab", "2+3"]);
        assert_eq!(args.mode, AnalysisMode::ArithmeticExpression);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.verbose);
    }

    #[test]
    fn test_example_conflicts_with_text() {
        assert!(Args::try_parse_from(["syntaxlab", "--example", "2+3"]).is_err());
        assert!(Args::try_parse_from(["syntaxlab", "--mode", "hex"]).is_err());
    }

    #[test]
    fn test_run_reports_diagnostics_status() {
        let clean = Args::parse_from(["syntaxlab", "--example", "-m", "numbers"]);
        assert_eq!(run(&clean), Ok(0));

        let broken = Args::parse_from(["syntaxlab", "sin(2"]);
        assert_eq!(run(&broken), Ok(EXIT_DIAGNOSTICS));

        let empty = Args::parse_from(["syntaxlab", "   "]);
        assert!(run(&empty).is_err());
    }
}
