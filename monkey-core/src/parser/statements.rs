use crate::ast::{BlockStatement, Expression, LetStatement, ReturnStatement, Statement};
use crate::lexer::TokenKind;
use crate::parser::expressions::{parse_expression, Precedence};
use crate::parser::{ParseError, Parser};

pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    match parser.current.kind {
        TokenKind::Let => Ok(Statement::Let(parse_let_statement(parser)?)),
        TokenKind::Return => Ok(Statement::Return(parse_return_statement(parser)?)),
        _ => Ok(Statement::Expression(parse_expression_statement(parser)?)),
    }
}

fn parse_let_statement(parser: &mut Parser) -> Result<LetStatement, ParseError> {
    let identifier = parser.expect_peek_ident()?;
    parser.expect_peek(TokenKind::Assign)?;
    parser.next_token();
    let value = parse_expression(parser, Precedence::Lowest)?;
    parser.skip_semicolon();

    Ok(LetStatement { identifier, value })
}

fn parse_return_statement(parser: &mut Parser) -> Result<ReturnStatement, ParseError> {
    parser.next_token();
    let value = parse_expression(parser, Precedence::Lowest)?;
    parser.skip_semicolon();

    Ok(ReturnStatement { value })
}

fn parse_expression_statement(parser: &mut Parser) -> Result<Expression, ParseError> {
    let expression = parse_expression(parser, Precedence::Lowest)?;
    parser.skip_semicolon();

    Ok(expression)
}

/// Parses the statements between the current `{` and its matching `}`,
/// leaving the parser on the `}`.
pub fn parse_block_statement(parser: &mut Parser) -> Result<BlockStatement, ParseError> {
    let mut statements = Vec::new();
    parser.next_token();

    while !parser.current_is(&TokenKind::RBrace) {
        if parser.current_is(&TokenKind::Eof) {
            return Err(ParseError::unexpected_token(
                TokenKind::RBrace,
                parser.current.clone(),
            ));
        }
        statements.push(parse_statement(parser)?);
        parser.next_token();
    }

    Ok(BlockStatement { statements })
}
