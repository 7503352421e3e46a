//! Human-readable rendering of analysis reports

use std::fmt;
use syntaxlab::pipeline::AnalysisOutcome;
use syntaxlab::{AnalysisReport, SourceText, Span};

fn range(span: &Span) -> String {
    let (start, end) = span.display_range();
    format!("{}-{}", start, end)
}

pub fn render_text(report: &AnalysisReport, source: &SourceText) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut out, report, source);
    out
}

pub fn write_report(
    out: &mut impl fmt::Write,
    report: &AnalysisReport,
    source: &SourceText,
) -> fmt::Result {
    writeln!(out, "Mode: {}", report.mode.name())?;
    writeln!(out, "Input: {}", report.normalized_text)?;
    writeln!(out)?;

    match &report.outcome {
        AnalysisOutcome::Expression {
            tokens,
            rendered_trace,
            ..
        } => {
            writeln!(out, "Tokens ({}):", tokens.len())?;
            writeln!(
                out,
                "  {:<5} {:<18} {:<10} {}",
                "CODE", "CATEGORY", "LEXEME", "RANGE"
            )?;
            for token in tokens {
                writeln!(
                    out,
                    "  {:<5} {:<18} {:<10} {}",
                    token.code(),
                    token.category(),
                    token.lexeme,
                    range(&token.span)
                )?;
            }
            writeln!(out)?;
            writeln!(out, "Trace:\n  {}", rendered_trace)?;
        }
        AnalysisOutcome::Prototypes { declarations } => {
            writeln!(out, "Declarations ({}):", declarations.len())?;
            for (index, declaration) in declarations.iter().enumerate() {
                let status = match (&declaration.signature, declaration.is_clean()) {
                    (Some(_), true) => "ok".to_string(),
                    (Some(_), false) => format!("recovered, {} diagnostics", declaration.diagnostics.len()),
                    (None, _) => "not recognized".to_string(),
                };
                let signature = declaration
                    .signature
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| source.span_text(&declaration.span));
                writeln!(
                    out,
                    "  [{}] chars {}  {}  ({})",
                    index + 1,
                    range(&declaration.span),
                    signature,
                    status
                )?;
            }
        }
        AnalysisOutcome::Numbers { matches } => {
            writeln!(out, "Matches ({}):", matches.len())?;
            for number in matches {
                writeln!(out, "  {:<16} chars {}", number.value, range(&number.span()))?;
            }
        }
    }

    writeln!(out)?;
    if report.diagnostics.is_empty() {
        return writeln!(out, "No diagnostics.");
    }

    writeln!(out, "Diagnostics ({}):", report.diagnostics.len())?;
    for diagnostic in &report.diagnostics {
        let message = format!(
            "[{}] {} ({}, fragment '{}')",
            diagnostic.code, diagnostic.message, diagnostic.kind, diagnostic.fragment
        );
        out.write_str(&source.format_error(&diagnostic.span, &message))?;
        writeln!(out, "  = help: {}", diagnostic.recommended_action())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syntaxlab::config::runtime::AnalysisPreferences;
    use syntaxlab::{analyze_with_preferences, AnalysisMode};

    fn render(mode: AnalysisMode, text: &str) -> String {
        let preferences = AnalysisPreferences {
            detailed_trace: false,
            sort_diagnostics: true,
            log_diagnostics: false,
        };
        let report = analyze_with_preferences(mode, text, &preferences).unwrap();
        render_text(&report, &SourceText::new(text))
    }

    #[test]
    fn test_clean_expression() {
        let output = render(AnalysisMode::ArithmeticExpression, "2+3*4");
        assert!(output.contains("Mode: Arithmetic expression"));
        assert!(output.contains("Tokens (5):"));
        assert!(output.contains("Expression → Term → Factor → Number=2"));
        assert!(output.ends_with("No diagnostics.\n"));
    }

    #[test]
    fn test_diagnostic_excerpt() {
        let output = render(AnalysisMode::ArithmeticExpression, "sin(2");
        assert!(output.contains("Diagnostics (1):"));
        assert!(output.contains("[E042] expected closing parenthesis ')'"));
        assert!(output.contains("--> 1:5"));
        assert!(output.contains("    ^"));
        assert!(output.contains("  = help: Add the missing ')'"));
    }

    #[test]
    fn test_write_report_propagates_writer_errors() {
        struct Refusing;
        impl fmt::Write for Refusing {
            fn write_str(&mut self, _: &str) -> fmt::Result {
                Err(fmt::Error)
            }
        }

        let text = "2+3";
        let report = analyze_with_preferences(
            AnalysisMode::ArithmeticExpression,
            text,
            &AnalysisPreferences::default(),
        )
        .unwrap();
        assert!(write_report(&mut Refusing, &report, &SourceText::new(text)).is_err());
    }

    #[test]
    fn test_prototype_listing() {
        let output = render(AnalysisMode::FunctionPrototype, "int f(; float g(float x);");
        assert!(output.contains("Declarations (2):"));
        assert!(output.contains("not recognized"));
        assert!(output.contains("float g(float x);  (ok)"));
    }

    #[test]
    fn test_number_listing() {
        let output = render(AnalysisMode::RealNumberSearch, "x=2e10");
        assert!(output.contains("Matches (1):"));
        assert!(output.contains("chars 3-6"));
    }
}
