#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod symbols;
pub mod values;

extern crate regex;

/// A 1-based line/column location inside a named source.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(line: u32, column: u32, file: Rc<String>) -> Self {
        Position { line, column, file }
    }

    pub fn null() -> Self {
        Position::new(0, 0, Rc::new(String::from("<null>")))
    }

    /// The location `n` columns to the left, clamped at column 1.
    pub fn shifted_back(&self, n: u32) -> Self {
        Position::new(self.line, self.column.saturating_sub(n).max(1), Rc::clone(&self.file))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Start is the first character of a token, end is the column just past its last one.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

pub fn get_line_at_position(source: &str, position: &Position) -> Option<(usize, String, usize)> {
    let line_number = position.line as usize;
    let line = source.lines().nth(line_number.checked_sub(1)?)?;
    let line_pos = (position.column as usize).saturating_sub(1);

    Some((line_number, line.to_string(), line_pos))
}


pub fn display_error(error: &Error, source: &str) {
    /*
        Error: SyntaxError (expected `;`, found `begin`)
        -> final.pas:1:9
           |
         1 | program p begin
           | --------^
    */

    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    eprintln!("-> {}", position);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position) else {
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
