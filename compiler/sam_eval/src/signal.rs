//! Statement outcomes.

use std::io;
use std::path::PathBuf;

use sam_diagnostic::Condition;

/// Why a statement did not complete normally.
#[derive(Debug)]
pub enum Signal {
    /// A condition unwinding to the outermost scope.
    Raise(Condition),
    /// `EXIT n`: end the current continuation.
    Exit(i32),
    /// An internal failure; ends in a crash dump.
    Fatal(RuntimeError),
}

pub type ExecResult = Result<(), Signal>;

impl From<Condition> for Signal {
    fn from(condition: Condition) -> Self {
        Signal::Raise(condition)
    }
}

impl From<RuntimeError> for Signal {
    fn from(err: RuntimeError) -> Self {
        Signal::Fatal(err)
    }
}

/// Failures of the interpreter itself rather than of the program.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("cannot open `{}`: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot close `{}`: {source}", path.display())]
    Close {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write to {target}: {source}")]
    Write {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot read from {target}: {source}")]
    Read {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot start branch: {0}")]
    Spawn(#[source] io::Error),
}
