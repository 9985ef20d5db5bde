use std::fmt;

/// A cursor value as carried by conditions.
///
/// Immediate lines and handlers run on a detached cursor, so conditions
/// raised there report [`DETACHED_LINE`].
pub type Line = i64;

/// Line reported for conditions raised outside a program run.
pub const DETACHED_LINE: Line = -1;

/// Name of a condition.
///
/// Built-ins are raised by the interpreter itself; anything else comes from
/// `FIRE <name>` and is only meaningful to user `ON` handlers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConditionName {
    /// `SYNTAXERROR`: a statement did not match its grammar.
    SyntaxError,
    /// `EOF`: the active input stream is exhausted.
    Eof,
    /// `NOMATCH`: an `EXPLODE` template did not match.
    NoMatch,
    /// `LISTERROR`: a `LIST` interval ends before it starts.
    ListError,
    /// `UNDEFINED`: a variable or stream name is not bound.
    Undefined,
    /// `CTRLC`: the process received an interrupt.
    CtrlC,
    /// `FAIL`: an external command exited unsuccessfully.
    Fail,
    /// Any other name, raised with `FIRE`.
    User(String),
}

impl ConditionName {
    /// Resolve a condition name as written in `ON`/`FIRE`.
    ///
    /// Built-in spellings map to their variants so that `FIRE EOF` and an
    /// `EOF` raised by `READ` are the same condition.
    pub fn from_name(name: &str) -> Self {
        match name {
            "SYNTAXERROR" => Self::SyntaxError,
            "EOF" => Self::Eof,
            "NOMATCH" => Self::NoMatch,
            "LISTERROR" => Self::ListError,
            "UNDEFINED" => Self::Undefined,
            "CTRLC" => Self::CtrlC,
            "FAIL" => Self::Fail,
            other => Self::User(other.to_string()),
        }
    }

    /// The spelling used by `ON`, `FIRE` and diagnostics.
    pub fn as_str(&self) -> &str {
        match self {
            Self::SyntaxError => "SYNTAXERROR",
            Self::Eof => "EOF",
            Self::NoMatch => "NOMATCH",
            Self::ListError => "LISTERROR",
            Self::Undefined => "UNDEFINED",
            Self::CtrlC => "CTRLC",
            Self::Fail => "FAIL",
            Self::User(name) => name,
        }
    }

    #[inline]
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::User(_))
    }
}

impl fmt::Display for ConditionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raised condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Condition {
    pub name: ConditionName,
    /// Cursor value at the point the condition was raised.
    pub line: Line,
    /// Name of the input stream, recorded for `EOF` diagnostics.
    pub source: Option<String>,
}

impl Condition {
    pub fn new(name: ConditionName, line: Line) -> Self {
        Condition {
            name,
            line,
            source: None,
        }
    }

    /// Raise a condition by its written name (the `FIRE` statement).
    pub fn fire(name: &str, line: Line) -> Self {
        Self::new(ConditionName::from_name(name), line)
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on line {}", self.name, self.line)
    }
}

// Built-in condition factories

pub fn syntax_error(line: Line) -> Condition {
    Condition::new(ConditionName::SyntaxError, line)
}

pub fn end_of_file(line: Line, source: impl Into<String>) -> Condition {
    Condition::new(ConditionName::Eof, line).with_source(source)
}

pub fn no_match(line: Line) -> Condition {
    Condition::new(ConditionName::NoMatch, line)
}

pub fn list_error(line: Line) -> Condition {
    Condition::new(ConditionName::ListError, line)
}

pub fn undefined(line: Line) -> Condition {
    Condition::new(ConditionName::Undefined, line)
}

pub fn ctrl_c(line: Line) -> Condition {
    Condition::new(ConditionName::CtrlC, line)
}

pub fn fail(line: Line) -> Condition {
    Condition::new(ConditionName::Fail, line)
}
