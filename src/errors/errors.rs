use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::SyntaxError { .. } => "SyntaxError",
            ErrorImpl::MissingSeparator { .. } => "MissingSeparatorError",
            ErrorImpl::UnknownType { .. } => "UnknownTypeError",
            ErrorImpl::InvalidStatement { .. } => "InvalidStatementError",
            ErrorImpl::InvalidNumber { .. } => "InvalidNumberError",
            ErrorImpl::Redeclaration { .. } => "RedeclarationError",
            ErrorImpl::UndeclaredIdentifier { .. } => "UndeclaredIdentifierError",
            ErrorImpl::NotAnArray { .. } => "NotAnArrayError",
            ErrorImpl::NotAVariable { .. } => "NotAVariableError",
            ErrorImpl::IndexError { .. } => "IndexError",
            ErrorImpl::InternalTree { .. } => "InternalTreeError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::SyntaxError { expected, found } => ErrorTip::Suggestion(format!(
                "expected `{}`, found `{}`",
                expected, found
            )),
            ErrorImpl::MissingSeparator { found } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                found
            )),
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown data type `{}`", type_))
            }
            ErrorImpl::InvalidStatement { token } => ErrorTip::Suggestion(format!(
                "`{}` starts neither an assignment nor a procedure call",
                token
            )),
            ErrorImpl::InvalidNumber { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::Redeclaration { name } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in this scope", name))
            }
            ErrorImpl::UndeclaredIdentifier { name } => {
                ErrorTip::Suggestion(format!("`{}` is not declared", name))
            }
            ErrorImpl::NotAnArray { name } => {
                ErrorTip::Suggestion(format!("`{}` does not hold an array", name))
            }
            ErrorImpl::NotAVariable { name } => {
                ErrorTip::Suggestion(format!("`{}` names a procedure here, not a variable", name))
            }
            ErrorImpl::IndexError { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::InternalTree { message } => ErrorTip::Suggestion(format!(
                "internal error, please report it: {}",
                message
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("syntax error: expected {expected}, found {found:?}")]
    SyntaxError { expected: String, found: String },
    #[error("missing separator before {found:?}")]
    MissingSeparator { found: String },
    #[error("unknown data type {type_:?}")]
    UnknownType { type_: String },
    #[error("invalid statement starting at {token:?}")]
    InvalidStatement { token: String },
    #[error("error parsing number: {token:?}")]
    InvalidNumber { token: String },
    #[error("{name:?} already declared")]
    Redeclaration { name: String },
    #[error("{name:?} not declared")]
    UndeclaredIdentifier { name: String },
    #[error("{name:?} is not an array")]
    NotAnArray { name: String },
    #[error("{name:?} is not a variable")]
    NotAVariable { name: String },
    #[error("index error: {message}")]
    IndexError { message: String },
    #[error("internal tree error: {message}")]
    InternalTree { message: String },
}
