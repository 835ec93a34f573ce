// Internal modules
pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::tokenize;
pub use pipeline::{analyze_source, PipelineError, PipelineOutput, PipelineResult};
pub use syntax::{parse, ParseTrace, SyntaxError, TraceEntry};
pub use tokens::{Token, TokenKind, TokenStream};
