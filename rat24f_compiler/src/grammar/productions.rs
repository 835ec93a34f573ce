//! Non-terminals and the productions the parser can apply
//!
//! Each [`Production`] is one alternative of one non-terminal. Optional and
//! repeated parts that are decided inside a procedure (`[else <Statement>]`,
//! `{, <Identifier>}`) are written in the rule text with `[]` and `{}`.

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NonTerminal {
    Rat24F,
    OptFunctionDefinitions,
    FunctionDefinitions,
    Function,
    OptParameterList,
    ParameterList,
    Parameter,
    Qualifier,
    Body,
    OptDeclarationList,
    DeclarationList,
    Declaration,
    Ids,
    StatementList,
    Statement,
    Compound,
    Assign,
    If,
    Return,
    Print,
    Scan,
    While,
    Condition,
    Relop,
    Expression,
    ExpressionPrime,
    Term,
    TermPrime,
    Factor,
    Primary,
    Empty,
}

impl NonTerminal {
    pub const fn name(self) -> &'static str {
        match self {
            NonTerminal::Rat24F => "<Rat24F>",
            NonTerminal::OptFunctionDefinitions => "<Opt Function Definitions>",
            NonTerminal::FunctionDefinitions => "<Function Definitions>",
            NonTerminal::Function => "<Function>",
            NonTerminal::OptParameterList => "<Opt Parameter List>",
            NonTerminal::ParameterList => "<Parameter List>",
            NonTerminal::Parameter => "<Parameter>",
            NonTerminal::Qualifier => "<Qualifier>",
            NonTerminal::Body => "<Body>",
            NonTerminal::OptDeclarationList => "<Opt Declaration List>",
            NonTerminal::DeclarationList => "<Declaration List>",
            NonTerminal::Declaration => "<Declaration>",
            NonTerminal::Ids => "<IDs>",
            NonTerminal::StatementList => "<Statement List>",
            NonTerminal::Statement => "<Statement>",
            NonTerminal::Compound => "<Compound>",
            NonTerminal::Assign => "<Assign>",
            NonTerminal::If => "<If>",
            NonTerminal::Return => "<Return>",
            NonTerminal::Print => "<Print>",
            NonTerminal::Scan => "<Scan>",
            NonTerminal::While => "<While>",
            NonTerminal::Condition => "<Condition>",
            NonTerminal::Relop => "<Relop>",
            NonTerminal::Expression => "<Expression>",
            NonTerminal::ExpressionPrime => "<Expression Prime>",
            NonTerminal::Term => "<Term>",
            NonTerminal::TermPrime => "<Term Prime>",
            NonTerminal::Factor => "<Factor>",
            NonTerminal::Primary => "<Primary>",
            NonTerminal::Empty => "<Empty>",
        }
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    Rat24F,
    FunctionDefinitionsPresent,
    FunctionDefinitionsAbsent,
    FunctionDefinitions,
    Function,
    ParameterListPresent,
    ParameterListAbsent,
    ParameterList,
    ParameterIdsThenQualifier,
    ParameterQualifierThenIdentifier,
    QualifierInteger,
    QualifierBoolean,
    QualifierReal,
    Body,
    DeclarationListPresent,
    DeclarationListAbsent,
    DeclarationList,
    Declaration,
    Ids,
    StatementListPresent,
    StatementListAbsent,
    StatementCompound,
    StatementAssign,
    StatementIf,
    StatementReturn,
    StatementPrint,
    StatementScan,
    StatementWhile,
    Compound,
    Assign,
    If,
    Return,
    Print,
    Scan,
    While,
    Condition,
    RelopEqual,
    RelopNotEqual,
    RelopLess,
    RelopGreater,
    RelopLessEqual,
    RelopGreaterEqual,
    Expression,
    ExpressionPrimeAdd,
    ExpressionPrimeSubtract,
    ExpressionPrimeEmpty,
    Term,
    TermPrimeMultiply,
    TermPrimeDivide,
    TermPrimeEmpty,
    FactorNegated,
    FactorPrimary,
    PrimaryIdentifier,
    PrimaryInteger,
    PrimaryReal,
    PrimaryParenthesized,
    PrimaryTrue,
    PrimaryFalse,
    Empty,
}

impl Production {
    /// Non-terminal on the left-hand side
    pub const fn lhs(self) -> NonTerminal {
        use Production::*;
        match self {
            Rat24F => NonTerminal::Rat24F,
            FunctionDefinitionsPresent | FunctionDefinitionsAbsent => {
                NonTerminal::OptFunctionDefinitions
            }
            FunctionDefinitions => NonTerminal::FunctionDefinitions,
            Function => NonTerminal::Function,
            ParameterListPresent | ParameterListAbsent => NonTerminal::OptParameterList,
            ParameterList => NonTerminal::ParameterList,
            ParameterIdsThenQualifier | ParameterQualifierThenIdentifier => NonTerminal::Parameter,
            QualifierInteger | QualifierBoolean | QualifierReal => NonTerminal::Qualifier,
            Body => NonTerminal::Body,
            DeclarationListPresent | DeclarationListAbsent => NonTerminal::OptDeclarationList,
            DeclarationList => NonTerminal::DeclarationList,
            Declaration => NonTerminal::Declaration,
            Ids => NonTerminal::Ids,
            StatementListPresent | StatementListAbsent => NonTerminal::StatementList,
            StatementCompound | StatementAssign | StatementIf | StatementReturn
            | StatementPrint | StatementScan | StatementWhile => NonTerminal::Statement,
            Compound => NonTerminal::Compound,
            Assign => NonTerminal::Assign,
            If => NonTerminal::If,
            Return => NonTerminal::Return,
            Print => NonTerminal::Print,
            Scan => NonTerminal::Scan,
            While => NonTerminal::While,
            Condition => NonTerminal::Condition,
            RelopEqual | RelopNotEqual | RelopLess | RelopGreater | RelopLessEqual
            | RelopGreaterEqual => NonTerminal::Relop,
            Expression => NonTerminal::Expression,
            ExpressionPrimeAdd | ExpressionPrimeSubtract | ExpressionPrimeEmpty => {
                NonTerminal::ExpressionPrime
            }
            Term => NonTerminal::Term,
            TermPrimeMultiply | TermPrimeDivide | TermPrimeEmpty => NonTerminal::TermPrime,
            FactorNegated | FactorPrimary => NonTerminal::Factor,
            PrimaryIdentifier | PrimaryInteger | PrimaryReal | PrimaryParenthesized
            | PrimaryTrue | PrimaryFalse => NonTerminal::Primary,
            Empty => NonTerminal::Empty,
        }
    }

    /// Rule text as it appears in the trace
    pub const fn rule(self) -> &'static str {
        use Production::*;
        match self {
            Rat24F => {
                "<Rat24F> -> <Opt Function Definitions> @ <Opt Declaration List> <Statement List> @"
            }
            FunctionDefinitionsPresent => "<Opt Function Definitions> -> <Function Definitions>",
            FunctionDefinitionsAbsent => "<Opt Function Definitions> -> <Empty>",
            FunctionDefinitions => "<Function Definitions> -> <Function> {<Function>}",
            Function => {
                "<Function> -> function <Identifier> ( <Opt Parameter List> ) <Opt Declaration List> <Body>"
            }
            ParameterListPresent => "<Opt Parameter List> -> <Parameter List>",
            ParameterListAbsent => "<Opt Parameter List> -> <Empty>",
            ParameterList => "<Parameter List> -> <Parameter> {, <Parameter>}",
            ParameterIdsThenQualifier => "<Parameter> -> <IDs> <Qualifier>",
            ParameterQualifierThenIdentifier => "<Parameter> -> <Qualifier> <Identifier>",
            QualifierInteger => "<Qualifier> -> integer",
            QualifierBoolean => "<Qualifier> -> boolean",
            QualifierReal => "<Qualifier> -> real",
            Body => "<Body> -> { <Statement List> }",
            DeclarationListPresent => "<Opt Declaration List> -> <Declaration List>",
            DeclarationListAbsent => "<Opt Declaration List> -> <Empty>",
            DeclarationList => "<Declaration List> -> <Declaration> ; {<Declaration> ;}",
            Declaration => "<Declaration> -> <Qualifier> <IDs>",
            Ids => "<IDs> -> <Identifier> {, <Identifier>}",
            StatementListPresent => "<Statement List> -> <Statement> {<Statement>}",
            StatementListAbsent => "<Statement List> -> <Empty>",
            StatementCompound => "<Statement> -> <Compound>",
            StatementAssign => "<Statement> -> <Assign>",
            StatementIf => "<Statement> -> <If>",
            StatementReturn => "<Statement> -> <Return>",
            StatementPrint => "<Statement> -> <Print>",
            StatementScan => "<Statement> -> <Scan>",
            StatementWhile => "<Statement> -> <While>",
            Compound => "<Compound> -> { <Statement List> }",
            Assign => "<Assign> -> <Identifier> = <Expression> ;",
            If => "<If> -> if ( <Condition> ) <Statement> [else <Statement>] fi",
            Return => "<Return> -> return [<Expression>] ;",
            Print => "<Print> -> put ( <Expression> ) ;",
            Scan => "<Scan> -> get ( <IDs> ) ;",
            While => "<While> -> while ( <Condition> ) <Statement>",
            Condition => "<Condition> -> <Expression> <Relop> <Expression>",
            RelopEqual => "<Relop> -> ==",
            RelopNotEqual => "<Relop> -> !=",
            RelopLess => "<Relop> -> <",
            RelopGreater => "<Relop> -> >",
            RelopLessEqual => "<Relop> -> <=",
            RelopGreaterEqual => "<Relop> -> >=",
            Expression => "<Expression> -> <Term> <Expression Prime>",
            ExpressionPrimeAdd => "<Expression Prime> -> + <Term> <Expression Prime>",
            ExpressionPrimeSubtract => "<Expression Prime> -> - <Term> <Expression Prime>",
            ExpressionPrimeEmpty => "<Expression Prime> -> <Empty>",
            Term => "<Term> -> <Factor> <Term Prime>",
            TermPrimeMultiply => "<Term Prime> -> * <Factor> <Term Prime>",
            TermPrimeDivide => "<Term Prime> -> / <Factor> <Term Prime>",
            TermPrimeEmpty => "<Term Prime> -> <Empty>",
            FactorNegated => "<Factor> -> - <Primary>",
            FactorPrimary => "<Factor> -> <Primary>",
            PrimaryIdentifier => "<Primary> -> <Identifier> [( <IDs> )]",
            PrimaryInteger => "<Primary> -> <Integer>",
            PrimaryReal => "<Primary> -> <Real>",
            PrimaryParenthesized => "<Primary> -> ( <Expression> )",
            PrimaryTrue => "<Primary> -> true",
            PrimaryFalse => "<Primary> -> false",
            Empty => "<Empty> -> ε",
        }
    }

    /// Whether the right-hand side is `<Empty>`
    pub const fn derives_empty(self) -> bool {
        use Production::*;
        matches!(
            self,
            FunctionDefinitionsAbsent
                | ParameterListAbsent
                | DeclarationListAbsent
                | StatementListAbsent
                | ExpressionPrimeEmpty
                | TermPrimeEmpty
        )
    }

    /// Operator terminal an operator-led alternative starts with
    pub const fn operator(self) -> Option<&'static str> {
        use Production::*;
        match self {
            RelopEqual => Some("=="),
            RelopNotEqual => Some("!="),
            RelopLess => Some("<"),
            RelopGreater => Some(">"),
            RelopLessEqual => Some("<="),
            RelopGreaterEqual => Some(">="),
            ExpressionPrimeAdd => Some("+"),
            ExpressionPrimeSubtract | FactorNegated => Some("-"),
            TermPrimeMultiply => Some("*"),
            TermPrimeDivide => Some("/"),
            _ => None,
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rule())
    }
}

/// Serialized as its rule text
impl Serialize for Production {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.rule())
    }
}
