use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which analyzer a piece of text is run through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisMode {
    #[serde(rename = "expression")]
    ArithmeticExpression,
    #[serde(rename = "prototype")]
    FunctionPrototype,
    #[serde(rename = "numbers")]
    RealNumberSearch,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 3] = [
        AnalysisMode::ArithmeticExpression,
        AnalysisMode::FunctionPrototype,
        AnalysisMode::RealNumberSearch,
    ];

    /// Short identifier used on the command line and in JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::ArithmeticExpression => "expression",
            AnalysisMode::FunctionPrototype => "prototype",
            AnalysisMode::RealNumberSearch => "numbers",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisMode::ArithmeticExpression => "Arithmetic expression",
            AnalysisMode::FunctionPrototype => "Function prototype",
            AnalysisMode::RealNumberSearch => "Real number search",
        }
    }

    /// Sample input that exercises the mode
    pub fn example(&self) -> &'static str {
        match self {
            AnalysisMode::ArithmeticExpression => "-ln(8.9 - 4.5) / 3.0",
            AnalysisMode::FunctionPrototype => {
                "float calculateRectangleArea(float length, float width);"
            }
            AnalysisMode::RealNumberSearch => "Real numbers: 3.14, -0.5, 2e10, +1.2E-4",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "expression" | "expr" | "arithmetic" => Ok(AnalysisMode::ArithmeticExpression),
            "prototype" | "proto" | "function" => Ok(AnalysisMode::FunctionPrototype),
            "numbers" | "number" | "real" => Ok(AnalysisMode::RealNumberSearch),
            other => Err(format!(
                "unknown analysis mode '{}' (expected expression, prototype or numbers)",
                other
            )),
        }
    }
}
