use log::debug;

use crate::{
    ast::ast::{NodeId, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{parser::Parser, stmt::parse_compound_stmt};

// program := 'program' Id ';' block '.'
pub fn parse_program(parser: &mut Parser) -> Result<NodeId, Error> {
    let start = parser.eat(TokenKind::Program)?.span;
    let name = parser.eat(TokenKind::Identifier)?.value;
    parser.eat_separator(TokenKind::Semicolon)?;

    let block = parse_block(parser)?;
    parser.eat_separator(TokenKind::Dot)?;

    Ok(parser.add_node(NodeKind::Program { name }, start, vec![block]))
}

// block := declarations compound_statement
pub fn parse_block(parser: &mut Parser) -> Result<NodeId, Error> {
    let start = parser.current_token().span.clone();

    let mut children = parse_declarations(parser)?;
    children.push(parse_compound_stmt(parser)?);

    Ok(parser.add_node(NodeKind::Block, start, children))
}

// declarations := ( var_section | procedure_declaration )*
fn parse_declarations(parser: &mut Parser) -> Result<Vec<NodeId>, Error> {
    let mut declarations = vec![];

    loop {
        match parser.current_token_kind() {
            TokenKind::Var => declarations.extend(parse_var_section(parser)?),
            TokenKind::Procedure => declarations.push(parse_procedure_decl(parser)?),
            _ => break,
        }
    }

    Ok(declarations)
}

// var_section := 'var' ( var_decl_group ';' )+
fn parse_var_section(parser: &mut Parser) -> Result<Vec<NodeId>, Error> {
    parser.eat(TokenKind::Var)?;

    let mut declarations = vec![];
    loop {
        declarations.extend(parse_var_decl_group(parser)?);
        parser.eat_separator(TokenKind::Semicolon)?;

        if parser.current_token_kind() != TokenKind::Identifier {
            break;
        }
    }

    Ok(declarations)
}

// var_decl_group := Id ( ',' Id )* ':' type
//
// Yields one VariableDeclaration per identifier, each with its own type marker.
fn parse_var_decl_group(parser: &mut Parser) -> Result<Vec<NodeId>, Error> {
    let mut names = vec![parser.eat(TokenKind::Identifier)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.eat(TokenKind::Comma)?;
        names.push(parser.eat(TokenKind::Identifier)?);
    }

    parser.eat(TokenKind::Colon)?;
    let (type_kind, type_span) = parse_type(parser)?;

    let mut declarations = vec![];
    for name in names {
        debug!("declaring variable {} as {:?}", name.value, type_kind);
        let variable = parser.add_node(NodeKind::Variable { name: name.value }, name.span.clone(), vec![]);
        let marker = parser.add_node(type_kind.clone(), type_span.clone(), vec![]);
        declarations.push(parser.add_node(NodeKind::VariableDeclaration, name.span, vec![variable, marker]));
    }

    Ok(declarations)
}

// procedure_declaration := 'procedure' Id ( '(' params ')' )? ';' block ';'
fn parse_procedure_decl(parser: &mut Parser) -> Result<NodeId, Error> {
    let start = parser.eat(TokenKind::Procedure)?.span;
    let name = parser.eat(TokenKind::Identifier)?.value;
    debug!("declaring procedure {}", name);

    let mut children = vec![];
    if parser.current_token_kind() == TokenKind::OpenParen {
        parser.eat(TokenKind::OpenParen)?;
        children.extend(parse_params(parser)?);
        parser.eat(TokenKind::CloseParen)?;
    }
    parser.eat_separator(TokenKind::Semicolon)?;

    children.push(parse_block(parser)?);
    parser.eat_separator(TokenKind::Semicolon)?;

    Ok(parser.add_node(NodeKind::ProcedureDeclaration { name }, start, children))
}

// params := var_decl_group ( ';' var_decl_group )*
fn parse_params(parser: &mut Parser) -> Result<Vec<NodeId>, Error> {
    let mut params = parse_var_decl_group(parser)?;
    while parser.current_token_kind() == TokenKind::Semicolon {
        parser.eat(TokenKind::Semicolon)?;
        params.extend(parse_var_decl_group(parser)?);
    }

    Ok(params)
}

// type := 'integer' | 'real' | 'boolean' | 'char'
pub fn parse_type(parser: &mut Parser) -> Result<(NodeKind, Span), Error> {
    let token_kind = parser.current_token_kind();
    let kind = match token_kind {
        TokenKind::Integer => NodeKind::Integer,
        TokenKind::Real => NodeKind::Real,
        TokenKind::Boolean => NodeKind::Boolean,
        TokenKind::Char => NodeKind::Char,
        _ => {
            let token = parser.current_token();
            return Err(Error::new(
                ErrorImpl::UnknownType { type_: token.value.clone() },
                token.span.start.clone(),
            ));
        }
    };

    let token = parser.eat(token_kind)?;
    Ok((kind, token.span))
}
