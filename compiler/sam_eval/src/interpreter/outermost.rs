//! The outermost scope: where raised conditions are finally looked at.
//!
//! Immediate lines, the implicit `RUN` of a file and every branch start
//! here. A condition that reaches this point runs its `ON` handler on a
//! fresh detached cursor, or else its built-in action. Handlers are never
//! re-handled.

use sam_diagnostic::{builtin_termination, handler_failed, unhandled, Condition, Line, Termination};

use super::{Cursor, Interpreter};
use crate::signal::{ExecResult, RuntimeError, Signal};

/// How an outermost execution ended.
#[derive(Debug)]
pub enum Outcome {
    /// Completed, or a handler dealt with the condition.
    Continue,
    /// The continuation ends with this status.
    Exit(i32),
    /// An internal failure that calls for a crash dump.
    Fatal(FatalReport),
}

/// An internal failure together with the variable state at the time.
#[derive(Debug)]
pub struct FatalReport {
    pub error: RuntimeError,
    /// Rendered variable tables, see [`crate::Environment::dump`].
    pub dump: String,
}

impl Interpreter {
    /// Execute an immediate line as an outermost scope.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn execute_outermost(&mut self, text: &str) -> Outcome {
        let mut cursor = Cursor::detached();
        let result = self.dispatch(text, &mut cursor);
        self.settle(result)
    }

    /// Raise `CTRLC` at the outermost scope if an interrupt is pending.
    pub fn take_interrupt(&mut self) -> Outcome {
        let result = self.check_interrupt(&Cursor::detached());
        self.settle(result)
    }

    /// Run a branch from `start` to completion.
    #[tracing::instrument(level = "debug", skip(self))]
    pub(crate) fn run_branch(mut self, start: Line) -> Outcome {
        let result = self.run_from(start);
        self.settle(result)
    }

    /// Turn the result of an outermost execution into an outcome.
    pub fn settle(&mut self, result: ExecResult) -> Outcome {
        match result {
            Ok(()) => Outcome::Continue,
            Err(Signal::Exit(status)) => Outcome::Exit(status),
            Err(Signal::Fatal(error)) => Outcome::Fatal(self.fatal_report(error)),
            Err(Signal::Raise(condition)) => self.handle_condition(&condition),
        }
    }

    pub fn fatal_report(&self, error: RuntimeError) -> FatalReport {
        FatalReport {
            error,
            dump: self.env.dump(),
        }
    }

    fn handle_condition(&mut self, condition: &Condition) -> Outcome {
        let Some(handler) = self.handlers.get(&condition.name).cloned() else {
            let termination =
                builtin_termination(condition).unwrap_or_else(|| unhandled(condition));
            tracing::debug!(%condition, status = termination.status, "unhandled condition");
            return self.terminate(&termination);
        };

        tracing::debug!(%condition, handler = %handler, "running handler");
        let mut cursor = Cursor::detached();
        match self.dispatch(&handler, &mut cursor) {
            Ok(()) => Outcome::Continue,
            Err(Signal::Raise(inner)) => {
                tracing::warn!(%condition, failure = %inner, "condition handler failed");
                self.terminate(&handler_failed(&inner))
            }
            Err(Signal::Exit(status)) => Outcome::Exit(status),
            Err(Signal::Fatal(error)) => Outcome::Fatal(self.fatal_report(error)),
        }
    }

    fn terminate(&self, termination: &Termination) -> Outcome {
        if let Some(message) = &termination.message {
            if let Err(error) = self.write_console(message) {
                return Outcome::Fatal(self.fatal_report(error));
            }
        }
        Outcome::Exit(termination.status)
    }
}
