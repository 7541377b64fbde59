/// AST (Abstract Syntax Tree) module
///
/// The tree is an arena of nodes addressed by `NodeId`. Every node keeps the
/// span of the token that started its grammar rule, its children and a
/// back-link to its parent, which lets later passes rewrite the tree in place
/// with `Tree::replace`.
pub mod ast;

#[cfg(test)]
mod tests;
