//! `ON` and `FIRE`.

use sam_diagnostic::{Condition, ConditionName};

use super::Args;
use crate::interpreter::{Cursor, Interpreter};
use crate::signal::ExecResult;

impl Interpreter {
    /// `ON NAME[(...)] statement` registers `statement` as the handler for
    /// `NAME`, replacing any earlier one. The parenthesised part is accepted
    /// and ignored.
    pub(crate) fn exec_on(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let mut parsed = Args::new(args);
        let name = parsed.word().ok_or_else(|| self.syntax(cursor))?;
        let mut rest = parsed.rest();
        if rest.starts_with('(') {
            let close = rest.find(')').ok_or_else(|| self.syntax(cursor))?;
            rest = &rest[close + 1..];
        }
        let handler = rest.trim_start();

        tracing::debug!(condition = name, handler, "registering handler");
        self.handlers
            .insert(ConditionName::from_name(name), handler.to_string());
        Ok(())
    }

    /// `FIRE NAME` raises a condition at the current line.
    pub(crate) fn exec_fire(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let mut parsed = Args::new(args);
        let name = parsed.word().ok_or_else(|| self.syntax(cursor))?;
        Err(self.raise(Condition::fire(name, cursor.line())))
    }
}
