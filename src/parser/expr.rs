//! Expression rules.
//!
//! Each binary tier applies its operator at most once and recurses into the
//! same tier for the right operand, so every tier is right-associative:
//! `a - b - c` is `a - (b - c)`. Comparisons sit below the multiplicative
//! tier, so `a * b = c` is `a * (b = c)`.

use crate::{
    ast::ast::{NodeId, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::parser::Parser;

// expr := term ( ( '+' | '-' | 'or' ) expr )?
pub fn parse_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let left = parse_term(parser)?;

    let operator_kind = parser.current_token_kind();
    let kind = match operator_kind {
        TokenKind::Plus => NodeKind::Plus,
        TokenKind::Minus => NodeKind::Minus,
        TokenKind::Or => NodeKind::Or,
        _ => return Ok(left),
    };

    let operator = parser.eat(operator_kind)?;
    let right = parse_expr(parser)?;
    Ok(parser.add_node(kind, operator.span, vec![left, right]))
}

// term := comparison ( ( '*' | 'div' | '/' | 'mod' | 'and' ) term )?
pub fn parse_term(parser: &mut Parser) -> Result<NodeId, Error> {
    let left = parse_comparison(parser)?;

    let operator_kind = parser.current_token_kind();
    let kind = match operator_kind {
        TokenKind::Star => NodeKind::Multiplication,
        TokenKind::Div => NodeKind::IntegerDivision,
        TokenKind::Slash => NodeKind::RealDivision,
        TokenKind::Mod => NodeKind::Mod,
        TokenKind::And => NodeKind::And,
        _ => return Ok(left),
    };

    let operator = parser.eat(operator_kind)?;
    let right = parse_term(parser)?;
    Ok(parser.add_node(kind, operator.span, vec![left, right]))
}

// comparison := factor ( ( '=' | '<>' | '>' | '<' | '>=' | '<=' ) comparison )?
pub fn parse_comparison(parser: &mut Parser) -> Result<NodeId, Error> {
    let left = parse_factor(parser)?;

    let operator_kind = parser.current_token_kind();
    let kind = match operator_kind {
        TokenKind::Equals => NodeKind::Equals,
        TokenKind::NotEquals => NodeKind::NotEquals,
        TokenKind::Greater => NodeKind::GreaterThan,
        TokenKind::Less => NodeKind::LessThan,
        TokenKind::GreaterEquals => NodeKind::GreaterEquals,
        TokenKind::LessEquals => NodeKind::LessEquals,
        _ => return Ok(left),
    };

    let operator = parser.eat(operator_kind)?;
    let right = parse_comparison(parser)?;
    Ok(parser.add_node(kind, operator.span, vec![left, right]))
}

// factor := ( '+' | '-' | 'not' ) factor
//         | literal | '(' expr ')' | call | variable
pub fn parse_factor(parser: &mut Parser) -> Result<NodeId, Error> {
    match parser.current_token_kind() {
        TokenKind::Plus => parse_unary(parser, TokenKind::Plus, NodeKind::UnaryPlus),
        TokenKind::Minus => parse_unary(parser, TokenKind::Minus, NodeKind::UnaryMinus),
        TokenKind::Not => parse_unary(parser, TokenKind::Not, NodeKind::Not),
        TokenKind::IntegerConst => {
            let token = parser.eat(TokenKind::IntegerConst)?;
            let value = token.value.parse::<i64>().map_err(|_| invalid_number(&token))?;
            Ok(parser.add_node(NodeKind::IntegerConstant(value), token.span, vec![]))
        }
        TokenKind::RealConst => {
            let token = parser.eat(TokenKind::RealConst)?;
            let value = token.value.parse::<f64>().map_err(|_| invalid_number(&token))?;
            Ok(parser.add_node(NodeKind::RealConstant(value), token.span, vec![]))
        }
        TokenKind::CharConst => {
            let token = parser.eat(TokenKind::CharConst)?;
            let mut chars = token.value.chars();
            match (chars.next(), chars.next()) {
                (Some(value), None) => Ok(parser.add_node(NodeKind::CharConstant(value), token.span, vec![])),
                _ => Err(Error::new(
                    ErrorImpl::SyntaxError {
                        expected: String::from("a single character"),
                        found: token.value.clone(),
                    },
                    token.span.start.clone(),
                )),
            }
        }
        TokenKind::True => {
            let token = parser.eat(TokenKind::True)?;
            Ok(parser.add_node(NodeKind::True, token.span, vec![]))
        }
        TokenKind::False => {
            let token = parser.eat(TokenKind::False)?;
            Ok(parser.add_node(NodeKind::False, token.span, vec![]))
        }
        TokenKind::OpenParen => {
            parser.eat(TokenKind::OpenParen)?;
            let expr = parse_expr(parser)?;
            parser.eat(TokenKind::CloseParen)?;
            Ok(expr)
        }
        TokenKind::Identifier if parser.peek_token_kind() == TokenKind::OpenParen => parse_call(parser),
        _ => parse_variable(parser),
    }
}

fn parse_unary(parser: &mut Parser, token_kind: TokenKind, kind: NodeKind) -> Result<NodeId, Error> {
    let operator = parser.eat(token_kind)?;
    let operand = parse_factor(parser)?;

    Ok(parser.add_node(kind, operator.span, vec![operand]))
}

fn invalid_number(token: &Token) -> Error {
    Error::new(
        ErrorImpl::InvalidNumber { token: token.value.clone() },
        token.span.start.clone(),
    )
}

// variable := Id
pub fn parse_variable(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.eat(TokenKind::Identifier)?;

    Ok(parser.add_node(NodeKind::Variable { name: token.value }, token.span, vec![]))
}

// call := Id '(' ( expr ( ',' expr )* )? ')'
pub fn parse_call(parser: &mut Parser) -> Result<NodeId, Error> {
    let callee = parser.eat(TokenKind::Identifier)?;
    parser.eat(TokenKind::OpenParen)?;

    let mut arguments = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser)?);
        while parser.current_token_kind() == TokenKind::Comma {
            parser.eat(TokenKind::Comma)?;
            arguments.push(parse_expr(parser)?);
        }
    }

    parser.eat(TokenKind::CloseParen)?;

    Ok(parser.add_node(NodeKind::Call { name: callee.value }, callee.span, arguments))
}
