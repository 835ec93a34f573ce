//! Operator and separator character sets

/// Every operator lexeme Rat24F accepts
pub const OPERATORS: [&str; 11] = ["+", "-", "*", "/", "=", "<", ">", "<=", ">=", "==", "!="];

/// Relational operators usable in a `<Condition>`
pub const RELATIONAL_OPERATORS: [&str; 6] = ["==", "!=", "<", ">", "<=", ">="];

/// Characters that start the operator scanner. `!` is only meaningful in `!=`.
pub const OPERATOR_LEADS: [char; 8] = ['+', '-', '*', '/', '=', '<', '>', '!'];

/// Single-character separators
pub const SEPARATORS: [char; 8] = ['(', ')', '{', '}', ';', ',', '@', '"'];

pub fn is_operator(lexeme: &str) -> bool {
    OPERATORS.contains(&lexeme)
}

pub fn is_relational_operator(lexeme: &str) -> bool {
    RELATIONAL_OPERATORS.contains(&lexeme)
}

pub fn is_operator_lead(ch: char) -> bool {
    OPERATOR_LEADS.contains(&ch)
}

pub fn is_separator(ch: char) -> bool {
    SEPARATORS.contains(&ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_sets() {
        assert!(is_operator("<="));
        assert!(is_operator("!="));
        assert!(!is_operator("!"));
        assert!(!is_operator("=>"));
        assert!(!is_operator("+="));
        assert!(is_relational_operator(">="));
        assert!(!is_relational_operator("="));
    }

    #[test]
    fn test_character_classes_are_disjoint() {
        for ch in OPERATOR_LEADS {
            assert!(!is_separator(ch), "{} is both lead and separator", ch);
        }
        assert!(is_operator_lead('!'));
        assert!(is_separator('"'));
        assert!(!is_separator('.'));
    }
}
