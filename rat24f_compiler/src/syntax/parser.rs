//! Recursive-descent parser for Rat24F
//!
//! One procedure per non-terminal. Every procedure starts with [`Parser::enter`],
//! which asks the prediction table for the alternative to apply and records it
//! in the trace, then consumes the right-hand side in grammar order. The first
//! error unwinds the whole call tree through `?`; there is no recovery.

use crate::config::runtime::SyntaxPreferences;
use crate::grammar::keywords::Keyword;
use crate::grammar::productions::{NonTerminal, Production};
use crate::grammar::table;
use crate::logging::codes;
use crate::syntax::error::{Expected, SyntaxError, SyntaxResult};
use crate::syntax::trace::ParseTrace;
use crate::tokens::{TokenKind, TokenStream};
use crate::{log_debug, log_error, log_success};

pub struct Parser {
    tokens: TokenStream,
    trace: ParseTrace,
    /// Non-terminals whose procedures are active, innermost last
    context: Vec<NonTerminal>,
    preferences: SyntaxPreferences,
}

impl Parser {
    pub fn new(tokens: TokenStream) -> Self {
        Self::with_preferences(tokens, SyntaxPreferences::default())
    }

    pub fn with_preferences(tokens: TokenStream, preferences: SyntaxPreferences) -> Self {
        log_debug!("Creating Rat24F parser",
            "tokens" => tokens.len(),
            "max_depth" => preferences.effective_max_parse_depth()
        );

        Self {
            tokens,
            trace: ParseTrace::new(),
            context: Vec::new(),
            preferences,
        }
    }

    /// Run one parse attempt over the whole stream and return its trace
    pub fn parse(mut self) -> ParseTrace {
        let outcome = self.rat24f();

        match &outcome {
            Ok(()) => {
                log_success!(codes::success::PARSE_ACCEPTED, "Parse completed: input accepted",
                    "productions" => self.trace.productions().count(),
                    "tokens_matched" => self.trace.matched().count()
                );
            }
            Err(error) => {
                log_error!(error.error_code(), "Syntax error",
                    span = error.span(),
                    "nonterminal" => error.nonterminal(),
                    "error" => error,
                    "context" => self.context_path()
                );
            }
        }

        self.trace.finish(outcome);
        self.trace
    }

    // ------------------------------------------------------------------
    // Driver primitives
    // ------------------------------------------------------------------

    /// Push `nonterminal`, pick its alternative and record it
    fn enter(&mut self, nonterminal: NonTerminal) -> SyntaxResult<Production> {
        let limit = self.preferences.effective_max_parse_depth();
        if self.context.len() >= limit {
            return Err(SyntaxError::max_recursion_depth(
                nonterminal,
                self.tokens.current().span,
            ));
        }

        let production = table::predict(nonterminal, self.tokens.current()).ok_or_else(|| {
            SyntaxError::no_viable_alternative(nonterminal, self.tokens.current())
        })?;

        self.context.push(nonterminal);
        self.apply(production);
        if production.derives_empty() {
            self.apply(Production::Empty);
        }

        Ok(production)
    }

    fn leave(&mut self) {
        self.context.pop();
    }

    fn apply(&mut self, production: Production) {
        if self.preferences.log_productions {
            log_debug!("Applying production",
                "rule" => production,
                "position" => self.tokens.position()
            );
        }
        self.trace.record_production(production);
    }

    /// Consume the lookahead if it is `expected`, otherwise fail
    fn expect(&mut self, expected: Expected) -> SyntaxResult<()> {
        if !expected.matches(self.tokens.current()) {
            return Err(SyntaxError::unexpected_token(
                self.current_nonterminal(),
                expected,
                self.tokens.current(),
            ));
        }

        let token = self.tokens.advance();
        self.trace.record_match(token);
        Ok(())
    }

    fn at_separator(&self, separator: char) -> bool {
        self.tokens.current().is_separator(separator)
    }

    fn at_keyword(&self, keyword: Keyword) -> bool {
        self.tokens.current().is_keyword(keyword)
    }

    fn current_nonterminal(&self) -> NonTerminal {
        self.context.last().copied().unwrap_or(NonTerminal::Rat24F)
    }

    fn context_path(&self) -> String {
        self.context
            .iter()
            .map(|nonterminal| nonterminal.name())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// A production the table should never return for this procedure
    fn misprediction(&self, production: Production) -> SyntaxError {
        SyntaxError::no_viable_alternative(production.lhs(), self.tokens.current())
    }

    // ------------------------------------------------------------------
    // Program structure
    // ------------------------------------------------------------------

    fn rat24f(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::Rat24F)?;
        self.opt_function_definitions()?;
        self.expect(Expected::Separator('@'))?;
        self.opt_declaration_list()?;
        self.statement_list()?;
        self.expect(Expected::Separator('@'))?;
        self.expect(Expected::Kind(TokenKind::EndMarker))?;
        self.leave();
        Ok(())
    }

    fn opt_function_definitions(&mut self) -> SyntaxResult<()> {
        if self.enter(NonTerminal::OptFunctionDefinitions)? == Production::FunctionDefinitionsPresent
        {
            self.function_definitions()?;
        }
        self.leave();
        Ok(())
    }

    fn function_definitions(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::FunctionDefinitions)?;
        self.function()?;
        while self.at_keyword(Keyword::Function) {
            self.function()?;
        }
        self.leave();
        Ok(())
    }

    fn function(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::Function)?;
        self.expect(Expected::Keyword(Keyword::Function))?;
        self.expect(Expected::Kind(TokenKind::Identifier))?;
        self.expect(Expected::Separator('('))?;
        self.opt_parameter_list()?;
        self.expect(Expected::Separator(')'))?;
        self.opt_declaration_list()?;
        self.body()?;
        self.leave();
        Ok(())
    }

    fn opt_parameter_list(&mut self) -> SyntaxResult<()> {
        if self.enter(NonTerminal::OptParameterList)? == Production::ParameterListPresent {
            self.parameter_list()?;
        }
        self.leave();
        Ok(())
    }

    fn parameter_list(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::ParameterList)?;
        self.parameter()?;
        while self.at_separator(',') {
            self.expect(Expected::Separator(','))?;
            self.parameter()?;
        }
        self.leave();
        Ok(())
    }

    fn parameter(&mut self) -> SyntaxResult<()> {
        match self.enter(NonTerminal::Parameter)? {
            Production::ParameterIdsThenQualifier => {
                self.ids()?;
                self.qualifier()?;
            }
            Production::ParameterQualifierThenIdentifier => {
                self.qualifier()?;
                self.expect(Expected::Kind(TokenKind::Identifier))?;
            }
            other => return Err(self.misprediction(other)),
        }
        self.leave();
        Ok(())
    }

    fn qualifier(&mut self) -> SyntaxResult<()> {
        let keyword = match self.enter(NonTerminal::Qualifier)? {
            Production::QualifierInteger => Keyword::Integer,
            Production::QualifierBoolean => Keyword::Boolean,
            Production::QualifierReal => Keyword::Real,
            other => return Err(self.misprediction(other)),
        };
        self.expect(Expected::Keyword(keyword))?;
        self.leave();
        Ok(())
    }

    fn body(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::Body)?;
        self.expect(Expected::Separator('{'))?;
        self.statement_list()?;
        self.expect(Expected::Separator('}'))?;
        self.leave();
        Ok(())
    }

    fn opt_declaration_list(&mut self) -> SyntaxResult<()> {
        if self.enter(NonTerminal::OptDeclarationList)? == Production::DeclarationListPresent {
            self.declaration_list()?;
        }
        self.leave();
        Ok(())
    }

    fn declaration_list(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::DeclarationList)?;
        loop {
            self.declaration()?;
            self.expect(Expected::Separator(';'))?;
            if !table::starts(NonTerminal::Declaration, self.tokens.current()) {
                break;
            }
        }
        self.leave();
        Ok(())
    }

    fn declaration(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::Declaration)?;
        self.qualifier()?;
        self.ids()?;
        self.leave();
        Ok(())
    }

    fn ids(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::Ids)?;
        self.expect(Expected::Kind(TokenKind::Identifier))?;
        while self.at_separator(',') {
            self.expect(Expected::Separator(','))?;
            self.expect(Expected::Kind(TokenKind::Identifier))?;
        }
        self.leave();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn statement_list(&mut self) -> SyntaxResult<()> {
        if self.enter(NonTerminal::StatementList)? == Production::StatementListPresent {
            self.statement()?;
            while table::starts(NonTerminal::Statement, self.tokens.current()) {
                self.statement()?;
            }
        }
        self.leave();
        Ok(())
    }

    fn statement(&mut self) -> SyntaxResult<()> {
        match self.enter(NonTerminal::Statement)? {
            Production::StatementCompound => self.compound()?,
            Production::StatementAssign => self.assign()?,
            Production::StatementIf => self.if_statement()?,
            Production::StatementReturn => self.return_statement()?,
            Production::StatementPrint => self.print()?,
            Production::StatementScan => self.scan()?,
            Production::StatementWhile => self.while_statement()?,
            other => return Err(self.misprediction(other)),
        }
        self.leave();
        Ok(())
    }

    fn compound(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::Compound)?;
        self.expect(Expected::Separator('{'))?;
        self.statement_list()?;
        self.expect(Expected::Separator('}'))?;
        self.leave();
        Ok(())
    }

    fn assign(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::Assign)?;
        self.expect(Expected::Kind(TokenKind::Identifier))?;
        self.expect(Expected::Operator("="))?;
        self.expression()?;
        self.expect(Expected::Separator(';'))?;
        self.leave();
        Ok(())
    }

    fn if_statement(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::If)?;
        self.expect(Expected::Keyword(Keyword::If))?;
        self.expect(Expected::Separator('('))?;
        self.condition()?;
        self.expect(Expected::Separator(')'))?;
        self.statement()?;
        if self.at_keyword(Keyword::Else) {
            self.expect(Expected::Keyword(Keyword::Else))?;
            self.statement()?;
        }
        self.expect(Expected::Keyword(Keyword::Fi))?;
        self.leave();
        Ok(())
    }

    fn return_statement(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::Return)?;
        self.expect(Expected::Keyword(Keyword::Return))?;
        if table::starts(NonTerminal::Expression, self.tokens.current()) {
            self.expression()?;
        }
        self.expect(Expected::Separator(';'))?;
        self.leave();
        Ok(())
    }

    fn print(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::Print)?;
        self.expect(Expected::Keyword(Keyword::Put))?;
        self.expect(Expected::Separator('('))?;
        self.expression()?;
        self.expect(Expected::Separator(')'))?;
        self.expect(Expected::Separator(';'))?;
        self.leave();
        Ok(())
    }

    fn scan(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::Scan)?;
        self.expect(Expected::Keyword(Keyword::Get))?;
        self.expect(Expected::Separator('('))?;
        self.ids()?;
        self.expect(Expected::Separator(')'))?;
        self.expect(Expected::Separator(';'))?;
        self.leave();
        Ok(())
    }

    fn while_statement(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::While)?;
        self.expect(Expected::Keyword(Keyword::While))?;
        self.expect(Expected::Separator('('))?;
        self.condition()?;
        self.expect(Expected::Separator(')'))?;
        self.statement()?;
        self.leave();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn condition(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::Condition)?;
        self.expression()?;
        self.relop()?;
        self.expression()?;
        self.leave();
        Ok(())
    }

    fn relop(&mut self) -> SyntaxResult<()> {
        let production = self.enter(NonTerminal::Relop)?;
        let operator = production
            .operator()
            .ok_or_else(|| self.misprediction(production))?;
        self.expect(Expected::Operator(operator))?;
        self.leave();
        Ok(())
    }

    fn expression(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::Expression)?;
        self.term()?;
        self.expression_prime()?;
        self.leave();
        Ok(())
    }

    /// Right-recursive in the grammar; iterated here so chains of `+`/`-`
    /// do not count against the depth limit.
    fn expression_prime(&mut self) -> SyntaxResult<()> {
        loop {
            let production = self.enter(NonTerminal::ExpressionPrime)?;
            let Some(operator) = production.operator() else {
                self.leave();
                return Ok(());
            };
            self.expect(Expected::Operator(operator))?;
            self.term()?;
            self.leave();
        }
    }

    fn term(&mut self) -> SyntaxResult<()> {
        self.enter(NonTerminal::Term)?;
        self.factor()?;
        self.term_prime()?;
        self.leave();
        Ok(())
    }

    fn term_prime(&mut self) -> SyntaxResult<()> {
        loop {
            let production = self.enter(NonTerminal::TermPrime)?;
            let Some(operator) = production.operator() else {
                self.leave();
                return Ok(());
            };
            self.expect(Expected::Operator(operator))?;
            self.factor()?;
            self.leave();
        }
    }

    fn factor(&mut self) -> SyntaxResult<()> {
        if self.enter(NonTerminal::Factor)? == Production::FactorNegated {
            self.expect(Expected::Operator("-"))?;
        }
        self.primary()?;
        self.leave();
        Ok(())
    }

    fn primary(&mut self) -> SyntaxResult<()> {
        match self.enter(NonTerminal::Primary)? {
            Production::PrimaryIdentifier => {
                self.expect(Expected::Kind(TokenKind::Identifier))?;
                if self.at_separator('(') {
                    self.expect(Expected::Separator('('))?;
                    self.ids()?;
                    self.expect(Expected::Separator(')'))?;
                }
            }
            Production::PrimaryInteger => self.expect(Expected::Kind(TokenKind::Integer))?,
            Production::PrimaryReal => self.expect(Expected::Kind(TokenKind::Real))?,
            Production::PrimaryParenthesized => {
                self.expect(Expected::Separator('('))?;
                self.expression()?;
                self.expect(Expected::Separator(')'))?;
            }
            Production::PrimaryTrue => self.expect(Expected::Keyword(Keyword::True))?,
            Production::PrimaryFalse => self.expect(Expected::Keyword(Keyword::False))?,
            other => return Err(self.misprediction(other)),
        }
        self.leave();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize;
    use crate::syntax::trace::TraceEntry;
    use assert_matches::assert_matches;

    fn parse(source: &str) -> ParseTrace {
        Parser::new(tokenize(source)).parse()
    }

    fn parse_with_depth(source: &str, max_parse_depth: usize) -> ParseTrace {
        let preferences = SyntaxPreferences {
            log_productions: false,
            max_parse_depth,
        };
        Parser::with_preferences(tokenize(source), preferences).parse()
    }

    fn rejected_count(trace: &ParseTrace) -> usize {
        trace
            .entries()
            .iter()
            .filter(|entry| matches!(entry, TraceEntry::Rejected(_)))
            .count()
    }

    fn assert_accepted(source: &str) -> ParseTrace {
        let trace = parse(source);
        assert!(trace.is_accepted(), "rejected {source:?}: {:?}", trace.error());
        trace
    }

    #[test]
    fn test_function_program_accepted() {
        let source = "function f ( integer x ) { return x; } @ integer a; @";
        let trace = assert_accepted(source);
        let productions: Vec<Production> = trace.productions().collect();

        assert_eq!(productions[0], Production::Rat24F);
        assert!(productions.contains(&Production::ParameterQualifierThenIdentifier));
        assert!(productions.contains(&Production::StatementReturn));
        assert!(productions.contains(&Production::DeclarationListPresent));
        assert!(productions.contains(&Production::StatementListAbsent));
        assert_eq!(rejected_count(&trace), 0);

        // Every token, the end marker included, is matched exactly once
        assert_eq!(trace.matched().count(), tokenize(source).len());
    }

    #[test]
    fn test_missing_comma_rejected() {
        let trace = parse("integer a b; @");

        assert_eq!(rejected_count(&trace), 1);
        assert_matches!(trace.entries().last(), Some(TraceEntry::Rejected(_)));
        assert_matches!(
            trace.error(),
            Some(SyntaxError::UnexpectedToken {
                expected_kind: TokenKind::Separator,
                found_kind: TokenKind::Keyword,
                ..
            })
        );
        // Nothing after the function-definition decision was consumed
        assert_eq!(trace.matched().count(), 0);
    }

    #[test]
    fn test_missing_separator_between_identifiers() {
        let trace = parse("@ integer a b; @");

        let error = trace.error().cloned();
        assert_matches!(
            error,
            Some(SyntaxError::UnexpectedToken {
                nonterminal: NonTerminal::DeclarationList,
                expected_kind: TokenKind::Separator,
                found_kind: TokenKind::Identifier,
                ref found_lexeme,
                ..
            }) if found_lexeme == "b"
        );
        assert_eq!(rejected_count(&trace), 1);
        // `@ integer a` were matched before stopping
        assert_eq!(trace.matched().count(), 3);
    }

    #[test]
    fn test_missing_closing_marker() {
        let trace = parse("@ integer a;\na = 1;");

        let error = trace.error().cloned();
        assert_matches!(
            error,
            Some(SyntaxError::UnexpectedToken {
                nonterminal: NonTerminal::Rat24F,
                found_kind: TokenKind::EndMarker,
                ..
            })
        );
        assert_eq!(trace.error().map(SyntaxError::line), Some(2));
        assert_eq!(rejected_count(&trace), 1);
    }

    #[test]
    fn test_empty_alternatives_consume_nothing() {
        let mut parser = Parser::new(tokenize("{ a = 1; }"));
        parser.context.push(NonTerminal::Rat24F);

        let before = parser.tokens.position();
        assert!(parser.opt_declaration_list().is_ok());
        assert!(parser.opt_function_definitions().is_ok());
        assert_eq!(parser.tokens.position(), before);
        assert_eq!(parser.context, vec![NonTerminal::Rat24F]);

        let productions: Vec<Production> = parser.trace.productions().collect();
        assert_eq!(
            productions,
            vec![
                Production::DeclarationListAbsent,
                Production::Empty,
                Production::FunctionDefinitionsAbsent,
                Production::Empty,
            ]
        );
        assert_eq!(parser.trace.matched().count(), 0);
    }

    #[test]
    fn test_empty_trace_rendering() {
        let trace = assert_accepted("@ @");
        let lines: Vec<String> = trace.entries().iter().map(ToString::to_string).collect();

        assert_eq!(lines[1], "<Opt Function Definitions> -> <Empty>");
        assert_eq!(lines[2], "<Empty> -> ε");
        assert_eq!(lines[3], "Token: SEPARATOR Lexeme: @");
        assert_eq!(lines.last().map(String::as_str), Some("Parse complete: input accepted"));
    }

    #[test]
    fn test_control_flow_statements() {
        assert_accepted(
            "@ integer a, b;
             if (a < b) put(a); else put(b); fi
             if (a >= 1) { } fi
             while (a != 0) a = a - 1;
             { get(a, b); return; }
             @",
        );
    }

    #[test]
    fn test_expressions_and_calls() {
        let trace = assert_accepted(
            "@ real r; boolean ok;
             r = -(r + 2.5) * f(a, b) / 3. - 1;
             ok = true;
             ok = false;
             return ((((r))));
             @",
        );

        let productions: Vec<Production> = trace.productions().collect();
        assert!(productions.contains(&Production::FactorNegated));
        assert!(productions.contains(&Production::PrimaryParenthesized));
        assert!(productions.contains(&Production::TermPrimeDivide));
        assert!(productions.contains(&Production::PrimaryTrue));
        assert!(productions.contains(&Production::PrimaryFalse));
    }

    #[test]
    fn test_every_relational_operator() {
        for relop in ["==", "!=", "<", ">", "<=", ">="] {
            assert_accepted(&format!("@ while (a {relop} 1) a = 0; @"));
        }
    }

    #[test]
    fn test_functions_with_parameters() {
        assert_accepted(
            "function add (x, y integer, real z) integer t; { t = x + y; return t; }
             function nop () { }
             @ @",
        );
    }

    #[test]
    fn test_missing_relop() {
        let trace = parse("@ if (a) put(a); fi @");
        assert_matches!(
            trace.error(),
            Some(SyntaxError::NoViableAlternative {
                nonterminal: NonTerminal::Relop,
                found_kind: TokenKind::Separator,
                ..
            })
        );
    }

    #[test]
    fn test_statement_without_valid_start() {
        let trace = parse("@ a = 1; else @");
        assert_matches!(
            trace.error(),
            Some(SyntaxError::UnexpectedToken {
                nonterminal: NonTerminal::Rat24F,
                found_kind: TokenKind::Keyword,
                ..
            })
        );
    }

    #[test]
    fn test_unknown_token_is_a_syntax_error() {
        let trace = parse("@ a = 1 $ 2; @");
        assert_eq!(trace.error().and_then(SyntaxError::found_kind), Some(TokenKind::Unknown));
        assert_eq!(trace.error().and_then(SyntaxError::found_lexeme), Some("$"));
    }

    #[test]
    fn test_trailing_input_rejected() {
        let trace = parse("@ @ x");
        assert_matches!(
            trace.error(),
            Some(SyntaxError::UnexpectedToken {
                expected_kind: TokenKind::EndMarker,
                found_kind: TokenKind::Identifier,
                ..
            })
        );
    }

    #[test]
    fn test_depth_limit() {
        let trace = parse_with_depth("@ a = 1; @", 4);
        assert_matches!(
            trace.error(),
            Some(SyntaxError::MaxRecursionDepth {
                nonterminal: NonTerminal::Expression,
                ..
            })
        );
        assert_eq!(rejected_count(&trace), 1);

        assert!(parse_with_depth("@ a = 1; @", 8).is_accepted());
    }

    #[test]
    fn test_long_operator_chains_do_not_deepen() {
        let chain = vec!["a"; 200].join(" + ");
        let trace = parse_with_depth(&format!("@ b = {chain}; @"), 16);
        assert!(trace.is_accepted(), "{:?}", trace.error());
    }
}
