//! Lexical analysis module.
//!
//! This module contains the tokenizer that converts Pascal source text into
//! a stream of tokens for parsing. It handles:
//!
//! - Tokenization using anchored regex patterns tried in order
//! - Case-insensitive keywords, identifiers, integer/real/char literals
//! - `{ }`, `(* *)` and `//` comments and whitespace
//! - Line/column tracking for every token
//!
//! [`stream::TokenSource`] is the contract the parser consumes;
//! [`stream::TokenStream`] implements it over a tokenized buffer.

pub mod lexer;
pub mod stream;
pub mod tokens;
