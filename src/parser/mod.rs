//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms a
//! stream of tokens into a [`crate::ast::ast::Tree`]. It handles:
//!
//! - Program, block, variable and procedure declarations
//! - Statements: compound, assignment, call, if/else chains, for, while, repeat
//! - Expressions on three right-recursive binary tiers plus unary factors
//! - Positioned syntax errors, with missing separators reported right
//!   after the token that should have been followed by one
//!
//! The first error aborts the parse.

pub mod decl;
pub mod expr;
pub mod parser;
pub mod stmt;
