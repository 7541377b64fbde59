//! Error types and error handling for the front end.
//!
//! Every failure in the crate is an [`errors::Error`]: an [`errors::ErrorImpl`]
//! kind paired with the source position the diagnostic should point at.
//! Lexing, parsing, tree rewriting and scope mutation all fail fast and
//! hand the error back to the caller.

pub mod errors;
