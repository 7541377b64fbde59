use log::{debug, info};

use crate::{
    ast::ast::{NodeId, NodeKind, Tree},
    errors::errors::{Error, ErrorImpl},
    values::value::DataType,
    Position,
};

use super::{
    scope::{ScopeId, ScopeTree},
    symbols::{ProcedureSymbol, Symbol, VariableSymbol},
};

/// Walks a parsed program and declares everything it names.
///
/// The global scope takes the program's name. Each procedure gets a child
/// scope of the same name holding its parameters and local declarations.
pub fn build_scopes(tree: &Tree) -> Result<ScopeTree, Error> {
    let root = tree.root().ok_or_else(|| {
        Error::new(ErrorImpl::InternalTree { message: String::from("tree has no root") }, Position::null())
    })?;

    let NodeKind::Program { name } = tree.kind(root) else {
        return Err(malformed(tree, root, "root is not a program"));
    };

    let mut scopes = ScopeTree::new(name);
    let global = scopes.global();
    let block = *tree.children(root).first().ok_or_else(|| malformed(tree, root, "program has no block"))?;

    declare_block(tree, &mut scopes, global, block)?;

    info!("Built {} scope(s) for program {}", scopes.len(), name);
    Ok(scopes)
}

fn declare_block(tree: &Tree, scopes: &mut ScopeTree, scope: ScopeId, block: NodeId) -> Result<(), Error> {
    for &child in tree.children(block) {
        match tree.kind(child) {
            NodeKind::VariableDeclaration => {
                let variable = variable_symbol(tree, child)?;
                scopes.insert(scope, Symbol::Variable(variable))?;
            }
            NodeKind::ProcedureDeclaration { name } => declare_procedure(tree, scopes, scope, child, name)?,
            _ => {}
        }
    }

    Ok(())
}

fn declare_procedure(
    tree: &Tree,
    scopes: &mut ScopeTree,
    scope: ScopeId,
    declaration: NodeId,
    name: &str,
) -> Result<(), Error> {
    let Some((&body, params)) = tree.children(declaration).split_last() else {
        return Err(malformed(tree, declaration, "procedure has no block"));
    };

    let params = params
        .iter()
        .map(|&param| variable_symbol(tree, param))
        .collect::<Result<Vec<_>, Error>>()?;

    let procedure = ProcedureSymbol::new(name.to_string(), params.clone(), body, tree.span(declaration).clone());
    scopes.insert(scope, Symbol::Procedure(procedure))?;

    let inner = scopes.add_child(scope, name);
    debug!("{} holds procedure {} with {} parameter(s)", inner, name, params.len());
    for param in params {
        scopes.insert(inner, Symbol::Variable(param))?;
    }

    declare_block(tree, scopes, inner, body)
}

fn variable_symbol(tree: &Tree, declaration: NodeId) -> Result<VariableSymbol, Error> {
    let [variable, marker] = tree.children(declaration) else {
        return Err(malformed(tree, declaration, "declaration needs a variable and a type"));
    };

    let NodeKind::Variable { name } = tree.kind(*variable) else {
        return Err(malformed(tree, *variable, "declared name is not a variable"));
    };

    let data_type = match tree.kind(*marker) {
        NodeKind::Integer => DataType::Integer,
        NodeKind::Real => DataType::Real,
        NodeKind::Boolean => DataType::Boolean,
        NodeKind::Char => DataType::Char,
        _ => return Err(malformed(tree, *marker, "not a type marker")),
    };

    Ok(VariableSymbol::new(name.clone(), data_type, tree.span(declaration).clone()))
}

fn malformed(tree: &Tree, node: NodeId, message: &str) -> Error {
    Error::new(
        ErrorImpl::InternalTree { message: format!("{} at node {}", message, node) },
        tree.span(node).start.clone(),
    )
}
