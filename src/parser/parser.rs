//! Parser implementation for building the Abstract Syntax Tree.
//!
//! [`Parser`] owns the token source, the current token, the last consumed
//! token and the tree under construction. Every grammar rule lives in a
//! free `parse_*` function in one of the sibling modules and pulls tokens
//! through [`Parser::eat`] or [`Parser::eat_separator`].

use log::{debug, info};

use crate::{
    ast::ast::{NodeId, NodeKind, Tree},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        stream::{TokenSource, TokenStream},
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::decl::parse_program;

/// Where a failed [`Parser::eat_with`] points its diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLocation {
    /// At the start of the token that did not match.
    Current,
    /// Just after the last consumed token; used for missing separators.
    AfterPrevious,
}

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Where the tokens come from
    source: Box<dyn TokenSource>,
    /// The token being looked at
    current: Token,
    /// The last token consumed by `eat`
    previous: Option<Token>,
    /// The tree nodes are added to
    tree: Tree,
}

impl Parser {
    /// Creates a parser primed with the first token of `source`.
    pub fn new<S: TokenSource + 'static>(mut source: S) -> Self {
        let current = source.next_token();
        Parser {
            source: Box::new(source),
            current,
            previous: None,
            tree: Tree::new(),
        }
    }

    /// Parses the whole token stream into a tree rooted at `Program`.
    pub fn run(mut self) -> Result<Tree, Error> {
        info!("Beginning parse at {}", self.current.span.start);

        let program = parse_program(&mut self)?;

        if self.current_token_kind() != TokenKind::EOF {
            return Err(self.syntax_error(TokenKind::EOF, ErrorLocation::Current));
        }

        self.tree.set_root(program);
        info!("Parsed program into {} nodes", self.tree.len());
        Ok(self.tree)
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Kind of the token after the current one.
    pub fn peek_token_kind(&self) -> TokenKind {
        self.source.peek_token().kind
    }

    /// The last token consumed, if any.
    pub fn previous_token(&self) -> Option<&Token> {
        self.previous.as_ref()
    }

    /// Consumes the current token if it has the expected kind, reporting a
    /// mismatch at the current token.
    pub fn eat(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.eat_with(expected_kind, ErrorLocation::Current)
    }

    /// Like [`Parser::eat`], but a mismatch is reported right after the
    /// previous token, where the separator should have been.
    pub fn eat_separator(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.eat_with(expected_kind, ErrorLocation::AfterPrevious)
    }

    pub fn eat_with(&mut self, expected_kind: TokenKind, location: ErrorLocation) -> Result<Token, Error> {
        if self.current.kind != expected_kind {
            return Err(self.syntax_error(expected_kind, location));
        }

        let next = self.source.next_token();
        let consumed = std::mem::replace(&mut self.current, next);
        debug!("ate {}", consumed);
        self.previous = Some(consumed.clone());
        Ok(consumed)
    }

    fn syntax_error(&self, expected_kind: TokenKind, location: ErrorLocation) -> Error {
        Error::new(
            ErrorImpl::SyntaxError {
                expected: expected_kind.spelling().to_string(),
                found: self.current.value.clone(),
            },
            self.error_position(location),
        )
    }

    pub fn error_position(&self, location: ErrorLocation) -> Position {
        match (location, &self.previous) {
            (ErrorLocation::AfterPrevious, Some(previous)) => previous.span.end.shifted_back(1),
            _ => self.current.span.start.clone(),
        }
    }

    pub fn add_node(&mut self, kind: NodeKind, span: Span, children: Vec<NodeId>) -> NodeId {
        self.tree.add_node(kind, span, children)
    }

    pub fn add_child(&mut self, parent: NodeId, children: &[NodeId]) -> Result<(), Error> {
        self.tree.add_child(parent, children)
    }
}

/// Parses a token buffer into a tree.
///
/// This is the main entry point for parsing.
pub fn parse(tokens: Vec<Token>) -> Result<Tree, Error> {
    Parser::new(TokenStream::new(tokens)).run()
}
