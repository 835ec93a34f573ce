//! LL(1) prediction table
//!
//! All alternative selection happens here: the parser asks which production
//! of a non-terminal the current token predicts and never inspects the
//! lookahead on its own to choose between alternatives.

use crate::grammar::keywords::Keyword;
use crate::grammar::productions::{NonTerminal, Production};
use crate::tokens::{Token, TokenKind};

/// Lookahead category a prediction is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookahead<'a> {
    Keyword(Keyword),
    Identifier,
    Integer,
    Real,
    Operator(&'a str),
    Separator(char),
    EndMarker,
    Unknown,
}

impl<'a> Lookahead<'a> {
    pub fn of(token: &'a Token) -> Self {
        match token.kind {
            TokenKind::Keyword => token
                .keyword()
                .map(Lookahead::Keyword)
                .unwrap_or(Lookahead::Unknown),
            TokenKind::Identifier => Lookahead::Identifier,
            TokenKind::Integer => Lookahead::Integer,
            TokenKind::Real => Lookahead::Real,
            TokenKind::Operator => Lookahead::Operator(&token.lexeme),
            TokenKind::Separator => {
                let mut chars = token.lexeme.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Lookahead::Separator(ch),
                    _ => Lookahead::Unknown,
                }
            }
            TokenKind::EndMarker => Lookahead::EndMarker,
            TokenKind::Unknown => Lookahead::Unknown,
        }
    }
}

/// Production of `nonterminal` predicted by `lookahead`, or `None` when no
/// alternative starts with it and the non-terminal cannot derive `<Empty>`.
pub fn predict(nonterminal: NonTerminal, lookahead: &Token) -> Option<Production> {
    use Lookahead as L;
    use NonTerminal as N;
    use Production as P;

    let category = Lookahead::of(lookahead);

    match (nonterminal, category) {
        (N::Rat24F, _) => Some(P::Rat24F),

        (N::OptFunctionDefinitions, L::Keyword(Keyword::Function)) => {
            Some(P::FunctionDefinitionsPresent)
        }
        (N::OptFunctionDefinitions, _) => Some(P::FunctionDefinitionsAbsent),
        (N::FunctionDefinitions, L::Keyword(Keyword::Function)) => Some(P::FunctionDefinitions),
        (N::Function, L::Keyword(Keyword::Function)) => Some(P::Function),

        (N::OptParameterList, _) if starts(N::Parameter, lookahead) => {
            Some(P::ParameterListPresent)
        }
        (N::OptParameterList, _) => Some(P::ParameterListAbsent),
        (N::ParameterList, _) if starts(N::Parameter, lookahead) => Some(P::ParameterList),
        (N::Parameter, L::Identifier) => Some(P::ParameterIdsThenQualifier),
        (N::Parameter, L::Keyword(k)) if k.is_qualifier() => {
            Some(P::ParameterQualifierThenIdentifier)
        }

        (N::Qualifier, L::Keyword(Keyword::Integer)) => Some(P::QualifierInteger),
        (N::Qualifier, L::Keyword(Keyword::Boolean)) => Some(P::QualifierBoolean),
        (N::Qualifier, L::Keyword(Keyword::Real)) => Some(P::QualifierReal),

        (N::Body, L::Separator('{')) => Some(P::Body),

        (N::OptDeclarationList, L::Keyword(k)) if k.is_qualifier() => {
            Some(P::DeclarationListPresent)
        }
        (N::OptDeclarationList, _) => Some(P::DeclarationListAbsent),
        (N::DeclarationList, L::Keyword(k)) if k.is_qualifier() => Some(P::DeclarationList),
        (N::Declaration, L::Keyword(k)) if k.is_qualifier() => Some(P::Declaration),

        (N::Ids, L::Identifier) => Some(P::Ids),

        (N::StatementList, _) if starts(N::Statement, lookahead) => {
            Some(P::StatementListPresent)
        }
        (N::StatementList, _) => Some(P::StatementListAbsent),

        (N::Statement, L::Separator('{')) => Some(P::StatementCompound),
        (N::Statement, L::Identifier) => Some(P::StatementAssign),
        (N::Statement, L::Keyword(Keyword::If)) => Some(P::StatementIf),
        (N::Statement, L::Keyword(Keyword::Return)) => Some(P::StatementReturn),
        (N::Statement, L::Keyword(Keyword::Put)) => Some(P::StatementPrint),
        (N::Statement, L::Keyword(Keyword::Get)) => Some(P::StatementScan),
        (N::Statement, L::Keyword(Keyword::While)) => Some(P::StatementWhile),

        (N::Compound, L::Separator('{')) => Some(P::Compound),
        (N::Assign, L::Identifier) => Some(P::Assign),
        (N::If, L::Keyword(Keyword::If)) => Some(P::If),
        (N::Return, L::Keyword(Keyword::Return)) => Some(P::Return),
        (N::Print, L::Keyword(Keyword::Put)) => Some(P::Print),
        (N::Scan, L::Keyword(Keyword::Get)) => Some(P::Scan),
        (N::While, L::Keyword(Keyword::While)) => Some(P::While),

        (N::Condition, _) if starts(N::Expression, lookahead) => Some(P::Condition),

        (N::Relop, L::Operator("==")) => Some(P::RelopEqual),
        (N::Relop, L::Operator("!=")) => Some(P::RelopNotEqual),
        (N::Relop, L::Operator("<")) => Some(P::RelopLess),
        (N::Relop, L::Operator(">")) => Some(P::RelopGreater),
        (N::Relop, L::Operator("<=")) => Some(P::RelopLessEqual),
        (N::Relop, L::Operator(">=")) => Some(P::RelopGreaterEqual),

        (N::Expression, _) if starts(N::Term, lookahead) => Some(P::Expression),
        (N::ExpressionPrime, L::Operator("+")) => Some(P::ExpressionPrimeAdd),
        (N::ExpressionPrime, L::Operator("-")) => Some(P::ExpressionPrimeSubtract),
        (N::ExpressionPrime, _) => Some(P::ExpressionPrimeEmpty),

        (N::Term, _) if starts(N::Factor, lookahead) => Some(P::Term),
        (N::TermPrime, L::Operator("*")) => Some(P::TermPrimeMultiply),
        (N::TermPrime, L::Operator("/")) => Some(P::TermPrimeDivide),
        (N::TermPrime, _) => Some(P::TermPrimeEmpty),

        (N::Factor, L::Operator("-")) => Some(P::FactorNegated),
        (N::Factor, _) if starts(N::Primary, lookahead) => Some(P::FactorPrimary),

        (N::Primary, L::Identifier) => Some(P::PrimaryIdentifier),
        (N::Primary, L::Integer) => Some(P::PrimaryInteger),
        (N::Primary, L::Real) => Some(P::PrimaryReal),
        (N::Primary, L::Separator('(')) => Some(P::PrimaryParenthesized),
        (N::Primary, L::Keyword(Keyword::True)) => Some(P::PrimaryTrue),
        (N::Primary, L::Keyword(Keyword::False)) => Some(P::PrimaryFalse),

        (N::Empty, _) => Some(P::Empty),

        _ => None,
    }
}

/// Whether `lookahead` is in FIRST(`nonterminal`), i.e. predicts an
/// alternative that consumes at least one token.
pub fn starts(nonterminal: NonTerminal, lookahead: &Token) -> bool {
    match predict(nonterminal, lookahead) {
        Some(Production::Empty) | None => false,
        Some(production) => !production.derives_empty(),
    }
}

/// Human-readable FIRST set, used in "no viable alternative" diagnostics
pub fn expected_description(nonterminal: NonTerminal) -> &'static str {
    use NonTerminal as N;
    match nonterminal {
        N::FunctionDefinitions | N::Function => "keyword 'function'",
        N::ParameterList | N::Parameter => "an identifier or a qualifier",
        N::Qualifier | N::DeclarationList | N::Declaration => "'integer', 'boolean' or 'real'",
        N::Body | N::Compound => "separator '{'",
        N::Ids | N::Assign => "an identifier",
        N::Statement => "a statement ('{', identifier, 'if', 'return', 'put', 'get' or 'while')",
        N::If => "keyword 'if'",
        N::Return => "keyword 'return'",
        N::Print => "keyword 'put'",
        N::Scan => "keyword 'get'",
        N::While => "keyword 'while'",
        N::Relop => "a relational operator (==, !=, <, >, <=, >=)",
        N::Condition | N::Expression | N::Term | N::Factor => {
            "an expression (identifier, integer, real, '(', '-', 'true' or 'false')"
        }
        N::Primary => "identifier, integer, real, '(', 'true' or 'false'",
        N::Rat24F
        | N::OptFunctionDefinitions
        | N::OptParameterList
        | N::OptDeclarationList
        | N::StatementList
        | N::ExpressionPrime
        | N::TermPrime
        | N::Empty => "any token",
    }
}

/// Token kinds that can begin `nonterminal`
pub fn expected_kinds(nonterminal: NonTerminal) -> &'static [TokenKind] {
    use NonTerminal as N;
    match nonterminal {
        N::FunctionDefinitions
        | N::Function
        | N::Qualifier
        | N::DeclarationList
        | N::Declaration
        | N::If
        | N::Return
        | N::Print
        | N::Scan
        | N::While => &[TokenKind::Keyword],
        N::ParameterList | N::Parameter => &[TokenKind::Identifier, TokenKind::Keyword],
        N::Body | N::Compound => &[TokenKind::Separator],
        N::Ids | N::Assign => &[TokenKind::Identifier],
        N::Statement => &[TokenKind::Separator, TokenKind::Identifier, TokenKind::Keyword],
        N::Relop => &[TokenKind::Operator],
        N::Condition | N::Expression | N::Term | N::Factor => &[
            TokenKind::Identifier,
            TokenKind::Integer,
            TokenKind::Real,
            TokenKind::Separator,
            TokenKind::Operator,
            TokenKind::Keyword,
        ],
        N::Primary => &[
            TokenKind::Identifier,
            TokenKind::Integer,
            TokenKind::Real,
            TokenKind::Separator,
            TokenKind::Keyword,
        ],
        N::Rat24F
        | N::OptFunctionDefinitions
        | N::OptParameterList
        | N::OptDeclarationList
        | N::StatementList
        | N::ExpressionPrime
        | N::TermPrime
        | N::Empty => TokenKind::all(),
    }
}
