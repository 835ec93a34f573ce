//! Shared source-location types used by the lexer, parser and reports.

pub mod span;

pub use span::{Position, SourceMap, Span};
