//! Nested scopes holding declarations and current variable values.
//!
//! Scopes live in a [`ScopeTree`] arena and are addressed by [`ScopeId`].
//! Every name is case-insensitive: keys are lowercased on insert and on
//! lookup, while symbols keep the spelling they were declared with.

use std::{collections::HashMap, fmt::Display};

use log::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    values::value::{Value, ValueKind},
    Position,
};

use super::symbols::{Symbol, SymbolKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

#[derive(Debug)]
pub struct Scope {
    name: String,
    parent: Option<ScopeId>,
    /// Declarations in insertion order
    symbols: Vec<Symbol>,
    /// Lowercased name -> index into `symbols`
    lookup: HashMap<String, usize>,
    /// Lowercased name -> current value
    values: HashMap<String, Value>,
    /// Nested scopes in creation order
    children: Vec<ScopeId>,
    child_lookup: HashMap<String, ScopeId>,
}

impl Scope {
    fn new(name: String, parent: Option<ScopeId>) -> Self {
        Scope {
            name,
            parent,
            symbols: vec![],
            lookup: HashMap::new(),
            values: HashMap::new(),
            children: vec![],
            child_lookup: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    fn symbol(&self, key: &str) -> Option<&Symbol> {
        self.lookup.get(key).map(|&index| &self.symbols[index])
    }
}

fn key(name: &str) -> String {
    name.to_lowercase()
}

fn undeclared(name: &str) -> Error {
    Error::new(ErrorImpl::UndeclaredIdentifier { name: name.to_string() }, Position::null())
}

#[derive(Debug)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    /// Creates a tree holding only the global scope.
    pub fn new(global_name: &str) -> Self {
        debug!("creating global scope {}", global_name);
        ScopeTree {
            scopes: vec![Scope::new(global_name.to_string(), None)],
        }
    }

    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn name(&self, id: ScopeId) -> &str {
        self.scope(id).name()
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.scope(id).parent
    }

    /// Creates a scope nested in `parent`, reachable through [`ScopeTree::child`].
    pub fn add_child(&mut self, parent: ScopeId, name: &str) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        debug!("creating scope {} inside {}", name, self.name(parent));

        self.scopes.push(Scope::new(name.to_string(), Some(parent)));
        let parent_scope = &mut self.scopes[parent.0];
        parent_scope.children.push(id);
        parent_scope.child_lookup.insert(key(name), id);
        id
    }

    pub fn child(&self, parent: ScopeId, name: &str) -> Option<ScopeId> {
        self.scope(parent).child_lookup.get(&key(name)).copied()
    }

    /// Declares `symbol` in `scope`.
    ///
    /// Fails if the name is already declared in this very scope; shadowing an
    /// outer declaration is allowed. Variables whose type has a default get
    /// that value seeded into the scope's value table.
    pub fn insert(&mut self, scope: ScopeId, mut symbol: Symbol) -> Result<(), Error> {
        let name = key(symbol.name());
        let target = &mut self.scopes[scope.0];

        if target.lookup.contains_key(&name) {
            return Err(Error::new(
                ErrorImpl::Redeclaration { name: symbol.name().to_string() },
                symbol.span().start.clone(),
            ));
        }

        if let Symbol::Variable(variable) = &symbol {
            if let Some(default) = variable.data_type.default_value() {
                target.values.insert(name.clone(), default);
            }
        }

        debug!("declaring {} in {}", symbol, target.name);
        symbol.set_owner(scope);
        target.lookup.insert(name, target.symbols.len());
        target.symbols.push(symbol);
        Ok(())
    }

    /// Scopes from `scope` outward to the global one.
    fn ancestry(&self, scope: ScopeId) -> impl Iterator<Item = &Scope> + '_ {
        std::iter::successors(Some(scope), move |&id| self.parent(id)).map(move |id| self.scope(id))
    }

    /// Finds the nearest declaration of `name` visible from `scope`.
    ///
    /// With a filter, declarations of another kind are skipped and the walk
    /// carries on outward.
    pub fn resolve(&self, scope: ScopeId, name: &str, filter: Option<SymbolKind>) -> Option<&Symbol> {
        let name = key(name);
        self.ancestry(scope)
            .filter_map(|scope| scope.symbol(&name))
            .find(|symbol| symbol.matches(filter))
    }

    pub fn resolve_value(&self, scope: ScopeId, name: &str, filter: Option<ValueKind>) -> Option<&Value> {
        let name = key(name);
        self.ancestry(scope)
            .filter_map(|scope| scope.values.get(&name))
            .find(|value| filter.map_or(true, |kind| value.kind() == kind))
    }

    pub fn resolve_value_this_scope_only(
        &self,
        scope: ScopeId,
        name: &str,
        filter: Option<ValueKind>,
    ) -> Option<&Value> {
        self.scope(scope)
            .values
            .get(&key(name))
            .filter(|value| filter.map_or(true, |kind| value.kind() == kind))
    }

    /// Scope that declares the variable `name` as seen from `scope`.
    ///
    /// The nearest declaration decides: a procedure hides any variable of
    /// the same name further out.
    fn declaring_scope(&self, scope: ScopeId, name: &str) -> Result<ScopeId, Error> {
        match self.resolve(scope, name, None) {
            Some(symbol @ Symbol::Variable(_)) => symbol.owner().ok_or_else(|| undeclared(name)),
            Some(Symbol::Procedure(_)) => Err(Error::new(
                ErrorImpl::NotAVariable { name: name.to_string() },
                Position::null(),
            )),
            None => Err(undeclared(name)),
        }
    }

    /// Overwrites the value of the variable `name` in the scope declaring it.
    pub fn change_value(&mut self, scope: ScopeId, name: &str, value: Value) -> Result<(), Error> {
        let owner = self.declaring_scope(scope, name)?;
        debug!("{} := {} in {}", name, value, self.name(owner));

        self.scopes[owner.0].values.insert(key(name), value);
        Ok(())
    }

    /// Writes one element of the array variable `name` in place.
    pub fn change_array_value(
        &mut self,
        scope: ScopeId,
        name: &str,
        accessors: &[Value],
        value: Value,
    ) -> Result<(), Error> {
        let owner = self.declaring_scope(scope, name)?;

        match self.scopes[owner.0].values.get_mut(&key(name)) {
            Some(Value::Array(array)) => array.set(accessors, value),
            Some(_) => Err(Error::new(ErrorImpl::NotAnArray { name: name.to_string() }, Position::null())),
            None => Err(Error::new(
                ErrorImpl::IndexError { message: format!("{} holds no elements", name) },
                Position::null(),
            )),
        }
    }

    fn render(&self, id: ScopeId, depth: usize, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let indent = "  ".repeat(depth);
        let scope = self.scope(id);

        writeln!(f, "{}scope {}", indent, scope.name)?;
        for symbol in &scope.symbols {
            match scope.values.get(&key(symbol.name())) {
                Some(value) => writeln!(f, "{}  {} = {}", indent, symbol, value)?,
                None => writeln!(f, "{}  {}", indent, symbol)?,
            }
        }
        for &child in &scope.children {
            self.render(child, depth + 1, f)?;
        }
        Ok(())
    }
}

impl Display for ScopeTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.render(self.global(), 0, f)
    }
}
