use std::rc::Rc;

use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        // Every pattern is anchored so a match always starts at the lexer's offset.
        let regex = Regex::new(&format!("^(?:{})", pattern)).expect("lexer pattern must compile");
        RegexPattern { regex, handler }
    }
}

#[derive(Clone)]
pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            line: 1,
            column: 1,
            tokens: vec![],
            patterns: vec![
                RegexPattern::new("\\s+", skip_handler),
                RegexPattern::new("\\{[^}]*\\}", skip_handler),
                RegexPattern::new("\\(\\*(?s:.)*?\\*\\)", skip_handler),
                RegexPattern::new("//[^\\n]*", skip_handler),
                RegexPattern::new("[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
                RegexPattern::new("[0-9]+\\.[0-9]+([eE][+-]?[0-9]+)?", real_handler),
                RegexPattern::new("[0-9]+", integer_handler),
                RegexPattern::new("'([^']|'')'", char_handler),
                RegexPattern::new(":=", MK_DEFAULT_HANDLER!(TokenKind::Assign, ":=")),
                RegexPattern::new(":", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
                RegexPattern::new(";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
                RegexPattern::new(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
                RegexPattern::new("\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
                RegexPattern::new("\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
                RegexPattern::new("\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
                RegexPattern::new("<>", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "<>")),
                RegexPattern::new("<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
                RegexPattern::new(">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
                RegexPattern::new("<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
                RegexPattern::new(">", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
                RegexPattern::new("=", MK_DEFAULT_HANDLER!(TokenKind::Equals, "=")),
                RegexPattern::new("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
                RegexPattern::new("-", MK_DEFAULT_HANDLER!(TokenKind::Minus, "-")),
                RegexPattern::new("\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
                RegexPattern::new("/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
            ],
            source,
            file: file_name,
        }
    }

    /// Moves past `n` bytes of source, keeping line and column in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for ch in self.source[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, Rc::clone(&self.file))
    }

    /// Span of `text` if it starts at the current offset and stays on one line.
    pub fn span_of(&self, text: &str) -> Span {
        Span {
            start: self.position(),
            end: Position::new(
                self.line,
                self.column + text.chars().count() as u32,
                Rc::clone(&self.file),
            ),
        }
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex).len();
    lexer.advance_n(matched);
}

fn integer_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(&matched);

    lexer.push(MK_TOKEN!(TokenKind::IntegerConst, matched.clone(), span));
    lexer.advance_n(matched.len());
}

fn real_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(&matched);

    lexer.push(MK_TOKEN!(TokenKind::RealConst, matched.clone(), span));
    lexer.advance_n(matched.len());
}

fn char_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(&matched);

    // Either 'c' or the doubled quote ''''
    let inner = &matched[1..matched.len() - 1];
    let value = if inner == "''" { String::from("'") } else { inner.to_string() };

    lexer.push(MK_TOKEN!(TokenKind::CharConst, value, span));
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = lexer.matched(regex);
    let span = lexer.span_of(&value);

    if let Some(kind) = RESERVED_LOOKUP.get(value.to_lowercase().as_str()) {
        lexer.push(MK_TOKEN!(*kind, value.clone(), span));
    } else {
        lexer.push(MK_TOKEN!(TokenKind::Identifier, value.clone(), span));
    }

    lexer.advance_n(value.len());
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let patterns = lex.patterns.clone();

    while !lex.at_eof() {
        let pattern = patterns.iter().find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken { token: lex.at().to_string() },
                    lex.position(),
                ));
            }
        }
    }

    let span = Span { start: lex.position(), end: lex.position() };
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    Ok(lex.tokens)
}
