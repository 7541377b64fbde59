use std::rc::Rc;

use crate::{Position, Span, MK_TOKEN};

use super::tokens::{Token, TokenKind};

/// A sequential token supply with one token of lookahead.
///
/// Once exhausted a source keeps handing out its `EOF` token.
pub trait TokenSource {
    /// Consumes and returns the next token.
    fn next_token(&mut self) -> Token;
    /// Returns the next token without consuming it.
    fn peek_token(&self) -> &Token;
}

/// A [`TokenSource`] over an already tokenized buffer.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let terminated = tokens.last().map(|t| t.kind == TokenKind::EOF).unwrap_or(false);
        if !terminated {
            let end = tokens
                .last()
                .map(|t| t.span.end.clone())
                .unwrap_or_else(|| Position::new(1, 1, Rc::new(String::from("shell"))));
            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span { start: end.clone(), end }
            ));
        }

        TokenStream { tokens, pos: 0 }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    fn current(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn peek_token(&self) -> &Token {
        self.current()
    }
}
