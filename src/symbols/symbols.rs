use std::fmt::Display;

use crate::{ast::ast::NodeId, values::value::DataType, Span};

use super::scope::ScopeId;

/// Variant tag of a [`Symbol`], used to filter lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Procedure,
}

/// A declared name's static description.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Variable(VariableSymbol),
    Procedure(ProcedureSymbol),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableSymbol {
    pub name: String,
    pub data_type: DataType,
    pub span: Span,
    owner: Option<ScopeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureSymbol {
    pub name: String,
    pub params: Vec<VariableSymbol>,
    /// The procedure's `Block` node.
    pub body: NodeId,
    pub span: Span,
    owner: Option<ScopeId>,
}

impl VariableSymbol {
    pub fn new(name: String, data_type: DataType, span: Span) -> Self {
        VariableSymbol { name, data_type, span, owner: None }
    }
}

impl ProcedureSymbol {
    pub fn new(name: String, params: Vec<VariableSymbol>, body: NodeId, span: Span) -> Self {
        ProcedureSymbol { name, params, body, span, owner: None }
    }
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Variable(symbol) => &symbol.name,
            Symbol::Procedure(symbol) => &symbol.name,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Symbol::Variable(symbol) => &symbol.span,
            Symbol::Procedure(symbol) => &symbol.span,
        }
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Variable(_) => SymbolKind::Variable,
            Symbol::Procedure(_) => SymbolKind::Procedure,
        }
    }

    /// The scope this symbol was inserted into; `None` until inserted.
    pub fn owner(&self) -> Option<ScopeId> {
        match self {
            Symbol::Variable(symbol) => symbol.owner,
            Symbol::Procedure(symbol) => symbol.owner,
        }
    }

    pub(super) fn set_owner(&mut self, scope: ScopeId) {
        match self {
            Symbol::Variable(symbol) => symbol.owner = Some(scope),
            Symbol::Procedure(symbol) => symbol.owner = Some(scope),
        }
    }

    pub fn matches(&self, filter: Option<SymbolKind>) -> bool {
        filter.map_or(true, |kind| self.kind() == kind)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Variable(symbol) => write!(f, "var {}: {}", symbol.name, symbol.data_type),
            Symbol::Procedure(symbol) => {
                write!(f, "procedure {}(", symbol.name)?;
                for (i, param) in symbol.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}: {}", param.name, param.data_type)?;
                }
                write!(f, ")")
            }
        }
    }
}
