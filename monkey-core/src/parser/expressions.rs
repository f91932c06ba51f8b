use std::rc::Rc;

use tracing::trace;

use super::error::ParseError;
use super::statements::parse_block_statement;
use crate::ast::{Expression, Identifier, InfixOperationKind, PrefixOperationKind};
use crate::lexer::TokenKind;
use crate::parser::Parser;

#[derive(PartialOrd, PartialEq, Debug, Clone, Copy)]
pub enum Precedence {
    Lowest = 0,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

pub fn precedence_of(token: &TokenKind) -> Precedence {
    match token {
        TokenKind::Equal => Precedence::Equals,
        TokenKind::NotEqual => Precedence::Equals,
        TokenKind::LessThan => Precedence::LessGreater,
        TokenKind::GreaterThan => Precedence::LessGreater,
        TokenKind::Plus => Precedence::Sum,
        TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk => Precedence::Product,
        TokenKind::Slash => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

pub fn parse_expression(
    parser: &mut Parser,
    precedence: Precedence,
) -> Result<Expression, ParseError> {
    trace!(token = %parser.current.kind, ?precedence, "parse expression");
    let mut left_expression = prefix_parsing(parser)?;

    while !parser.peek_is(&TokenKind::SemiColon) && precedence < precedence_of(&parser.peek.kind)
    {
        let Some(infix_parse_function) = infix_parsing_function(&parser.peek.kind) else {
            break;
        };
        parser.next_token();
        left_expression = infix_parse_function(left_expression, parser)?;
    }

    Ok(left_expression)
}

fn prefix_operation(
    kind: PrefixOperationKind,
) -> impl FnOnce(&mut Parser) -> Result<Expression, ParseError> {
    move |parser| {
        parser.next_token();
        Ok(Expression::PrefixOperation(
            kind,
            Box::new(parse_expression(parser, Precedence::Prefix)?),
        ))
    }
}

fn parse_grouped_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.next_token();
    let expression = parse_expression(parser, Precedence::Lowest)?;
    parser.expect_peek(TokenKind::RParen)?;

    Ok(expression)
}

// `element (, element)* terminator`, or just `terminator`.
fn parse_sequence<'a, T>(
    parser: &mut Parser<'a>,
    parse_element: impl Fn(&mut Parser<'a>) -> Result<T, ParseError>,
    terminator: TokenKind,
) -> Result<Vec<T>, ParseError> {
    let mut elements = Vec::new();

    if parser.peek_is(&terminator) {
        parser.next_token();
        return Ok(elements);
    }

    elements.push(parse_element(parser)?);
    while parser.peek_is(&TokenKind::Comma) {
        parser.next_token();
        elements.push(parse_element(parser)?);
    }
    parser.expect_peek(terminator)?;

    Ok(elements)
}

fn parse_if_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.expect_peek(TokenKind::LParen)?;
    parser.next_token();
    let condition = Box::new(parse_expression(parser, Precedence::Lowest)?);
    parser.expect_peek(TokenKind::RParen)?;

    parser.expect_peek(TokenKind::LBrace)?;
    let consequence = parse_block_statement(parser)?;

    let alternative = if parser.peek_is(&TokenKind::Else) {
        parser.next_token();
        parser.expect_peek(TokenKind::LBrace)?;
        Some(parse_block_statement(parser)?)
    } else {
        None
    };

    Ok(Expression::IfExpression {
        condition,
        consequence,
        alternative,
    })
}

fn parse_function_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.expect_peek(TokenKind::LParen)?;
    let parameters = parse_parameters(parser)?;

    parser.expect_peek(TokenKind::LBrace)?;
    let body = Rc::new(parse_block_statement(parser)?);

    Ok(Expression::FunctionLiteral { parameters, body })
}

fn parse_parameters(parser: &mut Parser) -> Result<Vec<Identifier>, ParseError> {
    parse_sequence(parser, Parser::expect_peek_ident, TokenKind::RParen)
}

fn parse_integer_literal(parser: &Parser) -> Result<Expression, ParseError> {
    let token = &parser.current;
    token
        .literal()
        .parse()
        .map(Expression::IntegerLiteral)
        .map_err(|source| ParseError::InvalidInteger {
            token: token.clone(),
            source,
        })
}

pub fn prefix_parsing(parser: &mut Parser) -> Result<Expression, ParseError> {
    match &parser.current.kind {
        TokenKind::Ident(name) => Ok(Expression::Identifier(Identifier { name: name.clone() })),
        TokenKind::Int(_) => parse_integer_literal(parser),
        TokenKind::True => Ok(Expression::BooleanLiteral(true)),
        TokenKind::False => Ok(Expression::BooleanLiteral(false)),
        TokenKind::Bang => prefix_operation(PrefixOperationKind::Bang)(parser),
        TokenKind::Minus => prefix_operation(PrefixOperationKind::Minus)(parser),
        TokenKind::LParen => parse_grouped_expression(parser),
        TokenKind::If => parse_if_expression(parser),
        TokenKind::Function => parse_function_literal(parser),
        TokenKind::Illegal(_) => Err(ParseError::IllegalToken(parser.current.clone())),
        _ => Err(ParseError::NoPrefixFunction(parser.current.clone())),
    }
}

type InfixFunction = Box<dyn FnOnce(Expression, &mut Parser) -> Result<Expression, ParseError>>;

fn infix_operation(kind: InfixOperationKind) -> InfixFunction {
    Box::new(
        move |left: Expression, parser: &mut Parser| -> Result<Expression, ParseError> {
            let new_precedence = precedence_of(&parser.current.kind);
            parser.next_token();

            Ok(Expression::InfixOperation(
                kind,
                Box::new(left),
                Box::new(parse_expression(parser, new_precedence)?),
            ))
        },
    )
}

fn parse_call_function(left: Expression, parser: &mut Parser) -> Result<Expression, ParseError> {
    let arguments = parse_sequence(
        parser,
        |parser| {
            parser.next_token();
            parse_expression(parser, Precedence::Lowest)
        },
        TokenKind::RParen,
    )?;

    Ok(Expression::CallExpression {
        function: Box::new(left),
        arguments,
    })
}

pub fn infix_parsing_function(token: &TokenKind) -> Option<InfixFunction> {
    use InfixOperationKind as InfixKind;

    match token {
        TokenKind::Plus => Some(infix_operation(InfixKind::Plus)),
        TokenKind::Minus => Some(infix_operation(InfixKind::Minus)),
        TokenKind::LessThan => Some(infix_operation(InfixKind::LessThan)),
        TokenKind::GreaterThan => Some(infix_operation(InfixKind::GreaterThan)),
        TokenKind::Equal => Some(infix_operation(InfixKind::Equal)),
        TokenKind::NotEqual => Some(infix_operation(InfixKind::NotEqual)),
        TokenKind::Asterisk => Some(infix_operation(InfixKind::Multiply)),
        TokenKind::Slash => Some(infix_operation(InfixKind::Divide)),
        TokenKind::LParen => Some(Box::new(parse_call_function)),
        _ => None,
    }
}
