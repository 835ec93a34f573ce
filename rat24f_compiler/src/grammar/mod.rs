//! Rat24F grammar: vocabulary, productions and the LL(1) prediction table.

pub mod keywords;
pub mod productions;
pub mod symbols;
pub mod table;

pub use keywords::Keyword;
pub use productions::{NonTerminal, Production};
pub use table::{predict, starts};
