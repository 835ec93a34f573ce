//! Token types shared by the lexer and the parser
//!
//! The lexer produces a [`TokenStream`]; the parser only ever looks at the
//! stream's current token and advances past it.

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenKind};
pub use token_stream::TokenStream;
