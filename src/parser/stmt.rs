use crate::{
    ast::ast::{NodeId, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_call, parse_expr, parse_variable},
    parser::{ErrorLocation, Parser},
};

// compound_statement := 'begin' statement_list 'end'
pub fn parse_compound_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let start = parser.eat(TokenKind::Begin)?.span;
    let statements = parse_statement_list(parser)?;
    parser.eat(TokenKind::End)?;

    Ok(parser.add_node(NodeKind::Compound, start, statements))
}

// statement_list := statement ( ';' statement )*
pub fn parse_statement_list(parser: &mut Parser) -> Result<Vec<NodeId>, Error> {
    let mut statements = vec![parse_stmt(parser)?];

    while parser.current_token_kind() == TokenKind::Semicolon {
        parser.eat(TokenKind::Semicolon)?;
        statements.push(parse_stmt(parser)?);
    }

    // A list ends at 'end'/'until'; anything else after a statement that was
    // not followed by ';' means the separator is missing.
    let terminated = matches!(parser.current_token_kind(), TokenKind::End | TokenKind::Until);
    let after_separator = parser
        .previous_token()
        .map(|token| token.kind == TokenKind::Semicolon)
        .unwrap_or(false);
    if !terminated && !after_separator {
        return Err(Error::new(
            ErrorImpl::MissingSeparator { found: parser.current_token().value.clone() },
            parser.error_position(ErrorLocation::AfterPrevious),
        ));
    }

    Ok(statements)
}

pub fn parse_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    match parser.current_token_kind() {
        TokenKind::Begin => parse_compound_stmt(parser),
        TokenKind::Identifier => match parser.peek_token_kind() {
            TokenKind::OpenParen => parse_call(parser),
            TokenKind::Assign => parse_assignment_stmt(parser),
            _ => {
                let token = parser.current_token();
                Err(Error::new(
                    ErrorImpl::InvalidStatement { token: token.value.clone() },
                    token.span.start.clone(),
                ))
            }
        },
        TokenKind::If => parse_if_chain(parser),
        TokenKind::For => parse_for_stmt(parser),
        TokenKind::While => parse_while_stmt(parser),
        TokenKind::Repeat => parse_repeat_stmt(parser),
        _ => {
            let span = parser.current_token().span.clone();
            Ok(parser.add_node(NodeKind::Empty, span, vec![]))
        }
    }
}

// assignment := variable ':=' expr
pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let start = parser.current_token().span.clone();
    let variable = parse_variable(parser)?;
    parser.eat(TokenKind::Assign)?;
    let value = parse_expr(parser)?;

    Ok(parser.add_node(NodeKind::Assignment, start, vec![variable, value]))
}

// if_chain := if ( 'else' ( if | statement ) )*
//
// Each alternative is appended to the previous one as its `next` child.
pub fn parse_if_chain(parser: &mut Parser) -> Result<NodeId, Error> {
    let first = parse_if_stmt(parser)?;
    let mut last = first;

    while parser.current_token_kind() == TokenKind::Else {
        parser.eat(TokenKind::Else)?;

        if parser.current_token_kind() == TokenKind::If {
            let alternative = parse_if_stmt(parser)?;
            parser.add_child(last, &[alternative])?;
            last = alternative;
        } else {
            let alternative = parse_stmt(parser)?;
            parser.add_child(last, &[alternative])?;
            break;
        }
    }

    Ok(first)
}

// if := 'if' expr 'then' statement
fn parse_if_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let start = parser.eat(TokenKind::If)?.span;
    let condition = parse_expr(parser)?;
    parser.eat_separator(TokenKind::Then)?;
    let consequence = parse_stmt(parser)?;

    Ok(parser.add_node(NodeKind::If, start, vec![condition, consequence]))
}

// for := 'for' assignment ( 'to' | 'downto' ) expr 'do' statement
pub fn parse_for_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let start = parser.eat(TokenKind::For)?.span;
    let init = parse_assignment_stmt(parser)?;

    let downto = match parser.current_token_kind() {
        TokenKind::Downto => {
            parser.eat(TokenKind::Downto)?;
            true
        }
        _ => {
            parser.eat(TokenKind::To)?;
            false
        }
    };

    let limit = parse_expr(parser)?;
    parser.eat_separator(TokenKind::Do)?;
    let body = parse_stmt(parser)?;

    Ok(parser.add_node(NodeKind::For { downto }, start, vec![init, limit, body]))
}

// while := 'while' expr 'do' statement
pub fn parse_while_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let start = parser.eat(TokenKind::While)?.span;
    let condition = parse_expr(parser)?;
    parser.eat_separator(TokenKind::Do)?;
    let body = parse_stmt(parser)?;

    Ok(parser.add_node(NodeKind::While, start, vec![condition, body]))
}

// repeat := 'repeat' statement_list 'until' expr
pub fn parse_repeat_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let start = parser.eat(TokenKind::Repeat)?.span;
    let mut children = parse_statement_list(parser)?;
    parser.eat_separator(TokenKind::Until)?;
    children.push(parse_expr(parser)?);

    Ok(parser.add_node(NodeKind::Repeat, start, children))
}
