use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Keywords, keyed in lowercase; source spelling is case-insensitive.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("program", TokenKind::Program);
        map.insert("var", TokenKind::Var);
        map.insert("procedure", TokenKind::Procedure);
        map.insert("begin", TokenKind::Begin);
        map.insert("end", TokenKind::End);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("for", TokenKind::For);
        map.insert("to", TokenKind::To);
        map.insert("downto", TokenKind::Downto);
        map.insert("do", TokenKind::Do);
        map.insert("while", TokenKind::While);
        map.insert("repeat", TokenKind::Repeat);
        map.insert("until", TokenKind::Until);
        map.insert("div", TokenKind::Div);
        map.insert("mod", TokenKind::Mod);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("not", TokenKind::Not);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("integer", TokenKind::Integer);
        map.insert("real", TokenKind::Real);
        map.insert("boolean", TokenKind::Boolean);
        map.insert("char", TokenKind::Char);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,
    IntegerConst,
    RealConst,
    CharConst,

    OpenParen,
    CloseParen,

    Assign, // :=
    Colon,
    Semicolon,
    Comma,
    Dot,

    Plus,
    Minus,
    Star,
    Slash,

    Equals,
    NotEquals, // <>
    Greater,
    Less,
    GreaterEquals,
    LessEquals,

    // Reserved
    Program,
    Var,
    Procedure,
    Begin,
    End,
    If,
    Then,
    Else,
    For,
    To,
    Downto,
    Do,
    While,
    Repeat,
    Until,
    Div,
    Mod,
    And,
    Or,
    Not,
    True,
    False,

    // Type keywords
    Integer,
    Real,
    Boolean,
    Char,
}

impl TokenKind {
    /// How the token is written in source, or what it stands for when its
    /// text varies. Used in diagnostics.
    pub fn spelling(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of file",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerConst => "integer constant",
            TokenKind::RealConst => "real constant",
            TokenKind::CharConst => "character constant",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Assign => ":=",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Equals => "=",
            TokenKind::NotEquals => "<>",
            TokenKind::Greater => ">",
            TokenKind::Less => "<",
            TokenKind::GreaterEquals => ">=",
            TokenKind::LessEquals => "<=",
            TokenKind::Program => "program",
            TokenKind::Var => "var",
            TokenKind::Procedure => "procedure",
            TokenKind::Begin => "begin",
            TokenKind::End => "end",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::To => "to",
            TokenKind::Downto => "downto",
            TokenKind::Do => "do",
            TokenKind::While => "while",
            TokenKind::Repeat => "repeat",
            TokenKind::Until => "until",
            TokenKind::Div => "div",
            TokenKind::Mod => "mod",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Integer => "integer",
            TokenKind::Real => "real",
            TokenKind::Boolean => "boolean",
            TokenKind::Char => "char",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_one_of_many(&[
            TokenKind::Identifier,
            TokenKind::IntegerConst,
            TokenKind::RealConst,
            TokenKind::CharConst,
        ]) {
            write!(
                f,
                "{}:{} {} ({})",
                self.span.start.line, self.span.start.column, self.kind, self.value
            )
        } else {
            write!(
                f,
                "{}:{} {}",
                self.span.start.line, self.span.start.column, self.kind
            )
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}
