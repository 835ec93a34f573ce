//! Rat24F reserved words
use serde::{Deserialize, Serialize};

/// Every reserved word of Rat24F. Identifiers spelled like one of these
/// are lexed as Keyword tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    // === DEFINITIONS ===
    Function,

    // === QUALIFIERS ===
    Integer,
    Boolean,
    Real,

    // === CONTROL FLOW ===
    If,
    Else,
    Fi,
    While,
    Return,

    // === I/O ===
    Get,
    Put,

    // === BOOLEAN LITERALS ===
    True,
    False,
}

impl Keyword {
    pub const ALL: [Keyword; 13] = [
        Keyword::Function,
        Keyword::Integer,
        Keyword::Boolean,
        Keyword::Real,
        Keyword::If,
        Keyword::Else,
        Keyword::Fi,
        Keyword::While,
        Keyword::Return,
        Keyword::Get,
        Keyword::Put,
        Keyword::True,
        Keyword::False,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::Function => "function",
            Keyword::Integer => "integer",
            Keyword::Boolean => "boolean",
            Keyword::Real => "real",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::Fi => "fi",
            Keyword::While => "while",
            Keyword::Return => "return",
            Keyword::Get => "get",
            Keyword::Put => "put",
            Keyword::True => "true",
            Keyword::False => "false",
        }
    }

    /// Case-sensitive lookup
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|keyword| keyword.as_str() == s)
    }

    /// `integer`, `boolean` or `real`
    pub const fn is_qualifier(self) -> bool {
        matches!(self, Keyword::Integer | Keyword::Boolean | Keyword::Real)
    }

    /// Keywords that begin a statement
    pub const fn starts_statement(self) -> bool {
        matches!(
            self,
            Keyword::If | Keyword::Return | Keyword::Put | Keyword::Get | Keyword::While
        )
    }

    pub const fn is_boolean_literal(self) -> bool {
        matches!(self, Keyword::True | Keyword::False)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_reserved_keyword(word: &str) -> bool {
    Keyword::from_str(word).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_text() {
        for keyword in Keyword::ALL {
            assert_eq!(Keyword::from_str(keyword.as_str()), Some(keyword));
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(Keyword::from_str("While"), None);
        assert_eq!(Keyword::from_str("WHILE"), None);
        assert!(!is_reserved_keyword("endwhile"));
        assert!(is_reserved_keyword("fi"));
    }

    #[test]
    fn test_classification() {
        let qualifiers: Vec<_> = Keyword::ALL.into_iter().filter(|k| k.is_qualifier()).collect();
        assert_eq!(qualifiers, vec![Keyword::Integer, Keyword::Boolean, Keyword::Real]);
        assert!(Keyword::Put.starts_statement());
        assert!(!Keyword::Else.starts_statement());
        assert!(Keyword::False.is_boolean_literal());
    }
}
