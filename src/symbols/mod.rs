//! Symbols and the nested scope model.
//!
//! [`builder::build_scopes`] fills a [`scope::ScopeTree`] from a parsed
//! program; later passes resolve names and read or change variable values
//! through it.

pub mod builder;
pub mod scope;
pub mod symbols;

#[cfg(test)]
mod tests;
