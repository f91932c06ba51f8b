pub mod error;
pub mod expressions;
pub mod statements;

use tracing::{debug, trace};

use crate::ast::{Identifier, Program};
use crate::lexer::{Token, TokenKind, Tokenizer};
pub use error::{Expected, ParseError};
pub use expressions::Precedence;
use expressions::infix_parsing_function;
use statements::parse_statement;

pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    pub(crate) current: Token,
    pub(crate) peek: Token,
    // Braces opened and not yet closed up to `current`.
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(mut tokenizer: Tokenizer<'a>) -> Self {
        let current = tokenizer.next_token();
        let peek = tokenizer.next_token();
        let mut parser = Self {
            tokenizer,
            current,
            peek,
            depth: 0,
        };
        parser.track_depth();
        parser
    }

    pub(crate) fn next_token(&mut self) {
        let next = self.tokenizer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
        self.track_depth();
    }

    fn track_depth(&mut self) {
        match self.current.kind {
            TokenKind::LBrace => self.depth += 1,
            TokenKind::RBrace => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
    }

    pub(crate) fn current_is(&self, kind: &TokenKind) -> bool {
        self.current.is(kind)
    }

    pub(crate) fn peek_is(&self, kind: &TokenKind) -> bool {
        self.peek.is(kind)
    }

    // On mismatch the unexpected token stays in `peek`.
    pub(crate) fn expect_peek(&mut self, token_kind: TokenKind) -> Result<(), ParseError> {
        if self.peek_is(&token_kind) {
            self.next_token();
            Ok(())
        } else {
            Err(ParseError::unexpected_token(token_kind, self.peek.clone()))
        }
    }

    pub(crate) fn expect_peek_ident(&mut self) -> Result<Identifier, ParseError> {
        let TokenKind::Ident(name) = &self.peek.kind else {
            return Err(ParseError::UnexpectedToken {
                expected: Expected::Identifier,
                got: self.peek.clone(),
            });
        };
        let name = name.clone();
        self.next_token();
        Ok(Identifier { name })
    }

    pub(crate) fn skip_semicolon(&mut self) {
        if self.peek_is(&TokenKind::SemiColon) {
            self.next_token();
        }
    }

    // Skip the remainder of a broken top-level statement: up to a `;` outside
    // any block, or the `}` closing its last block when nothing follows it.
    fn synchronize(&mut self) {
        loop {
            match self.current.kind {
                TokenKind::Eof => return,
                TokenKind::SemiColon if self.depth == 0 => return,
                TokenKind::RBrace if self.depth == 0 && !self.peek_continues_statement() => {
                    self.skip_semicolon();
                    return;
                }
                _ => self.next_token(),
            }
        }
    }

    fn peek_continues_statement(&self) -> bool {
        self.peek_is(&TokenKind::Else) || infix_parsing_function(&self.peek.kind).is_some()
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program_with_diagnostics(&mut self) -> (Program, Vec<ParseError>) {
        let mut statements = Vec::new();
        let mut errors = Vec::new();

        while !self.current_is(&TokenKind::Eof) {
            match parse_statement(self) {
                Ok(statement) => {
                    trace!(%statement, "parsed statement");
                    statements.push(statement);
                }
                Err(err) => {
                    debug!(error = %err, span = ?err.span(), "statement skipped");
                    errors.push(err);
                    self.synchronize();
                }
            }
            self.next_token();
        }

        debug!(
            statements = statements.len(),
            errors = errors.len(),
            "finished parsing"
        );
        (Program { statements }, errors)
    }

    pub fn parse_program(&mut self) -> Result<Program, Vec<ParseError>> {
        let (program, errors) = self.parse_program_with_diagnostics();
        if errors.is_empty() {
            Ok(program)
        } else {
            Err(errors)
        }
    }
}
