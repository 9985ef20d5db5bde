//! Expression errors.
//!
//! Every variant surfaces as `SYNTAXERROR` at the statement boundary; the
//! structured kind exists for logs and tests.

use std::fmt;

pub type ExprResult = Result<f64, ExprError>;

#[derive(Clone, Debug, PartialEq)]
pub enum ExprErrorKind {
    UnexpectedChar(char),
    UnexpectedToken { found: String },
    UnexpectedEnd,
    InvalidNumber(String),
    UnknownFunction(String),
    ArityMismatch {
        function: &'static str,
        expected: &'static str,
        got: usize,
    },
    DivisionByZero,
    EmptyRange { start: f64, stop: f64 },
    TooDeep { limit: usize },
}

impl fmt::Display for ExprErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedChar(c) => write!(f, "unexpected character `{c}`"),
            Self::UnexpectedToken { found } => write!(f, "unexpected `{found}`"),
            Self::UnexpectedEnd => write!(f, "unexpected end of expression"),
            Self::InvalidNumber(text) => write!(f, "invalid number literal `{text}`"),
            Self::UnknownFunction(name) => write!(f, "unknown function `{name}`"),
            Self::ArityMismatch {
                function,
                expected,
                got,
            } => write!(f, "{function} expects {expected} arguments, got {got}"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::EmptyRange { start, stop } => {
                write!(f, "empty range for RAND({start}, {stop})")
            }
            Self::TooDeep { limit } => write!(f, "nesting deeper than {limit} levels"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprError {
    pub kind: ExprErrorKind,
    /// Byte offset into the expression text, when known.
    pub offset: Option<usize>,
}

impl ExprError {
    pub fn new(kind: ExprErrorKind) -> Self {
        ExprError { kind, offset: None }
    }

    pub fn at(kind: ExprErrorKind, offset: usize) -> Self {
        ExprError {
            kind,
            offset: Some(offset),
        }
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{} at offset {offset}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for ExprError {}
