use std::fmt::Display;
use std::num::ParseIntError;
use std::ops::Range;

use thiserror::Error;

use crate::token::{Token, TokenKind};

#[derive(Debug, PartialEq, Clone, Error)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {} instead", .got.kind)]
    UnexpectedToken { expected: Expected, got: Token },
    #[error("no prefix parse function for {} found", .0.kind)]
    NoPrefixFunction(Token),
    #[error("illegal token `{}`", .0.literal())]
    IllegalToken(Token),
    #[error("could not parse `{}` as integer", .token.literal())]
    InvalidInteger {
        token: Token,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expected {
    Token(TokenKind),
    Identifier,
}

impl Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::Identifier => write!(f, "IDENT"),
        }
    }
}

impl ParseError {
    pub fn unexpected_token(expected: TokenKind, got: Token) -> ParseError {
        ParseError::UnexpectedToken {
            expected: Expected::Token(expected),
            got,
        }
    }

    pub fn token(&self) -> &Token {
        match self {
            ParseError::UnexpectedToken { got, .. } => got,
            ParseError::NoPrefixFunction(token) | ParseError::IllegalToken(token) => token,
            ParseError::InvalidInteger { token, .. } => token,
        }
    }

    pub fn span(&self) -> Range<usize> {
        let token = self.token();
        token.start..token.end
    }
}
