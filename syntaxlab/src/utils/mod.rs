//! Shared primitive types used by the scanner, matcher and parsers

pub mod span;

pub use span::{normalize, Position, SourceText, Span};
