//! Control flow: `RUN`, `GOTO`, `LIST`, `IF`, `WHILE`, `FOR`, `EXIT`.

use std::fmt::Write as _;

use sam_diagnostic::{list_error, Line};

use super::guard::parse_guard;
use super::Args;
use crate::interpreter::{Cursor, Interpreter};
use crate::signal::{ExecResult, Signal};

/// Widest `FOR` range, 2^53. Beyond it consecutive integers are no longer
/// distinct `f64` values.
const MAX_FOR_SPAN: f64 = 9_007_199_254_740_992.0;

impl Interpreter {
    #[tracing::instrument(level = "debug", skip(self))]
    pub(crate) fn exec_run(&mut self) -> ExecResult {
        self.run_from(0)
    }

    pub(crate) fn exec_goto(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let target: Line = args.trim().parse().map_err(|_| self.syntax(cursor))?;
        if target < 0 {
            return Err(self.syntax(cursor));
        }
        cursor.jump(target);
        Ok(())
    }

    /// `LIST [start[:end]]`
    pub(crate) fn exec_list(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let interval = args.trim();
        let parse = |text: &str| -> Result<usize, Signal> {
            let text = text.trim();
            if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
                return Err(self.syntax(cursor));
            }
            text.parse().map_err(|_| self.syntax(cursor))
        };

        let (start, end) = if interval.is_empty() {
            (0, None)
        } else if let Some((start, end)) = interval.split_once(':') {
            (parse(start)?, Some(parse(end)?))
        } else {
            (parse(interval)?, None)
        };
        if let Some(end) = end {
            if end < start {
                return Err(self.raise(list_error(cursor.line())));
            }
        }

        let mut listing = String::new();
        for (number, text) in self.program.range(start, end) {
            let _ = writeln!(listing, "{number} {text}");
        }
        self.write_raw(&listing)
    }

    pub(crate) fn exec_if(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let guard = parse_guard(args).ok_or_else(|| self.syntax(cursor))?;
        if self.test_guard(&guard, cursor)? {
            self.dispatch(guard.statement, cursor)?;
        }
        Ok(())
    }

    /// The guard is re-evaluated before every iteration.
    pub(crate) fn exec_while(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let guard = parse_guard(args).ok_or_else(|| self.syntax(cursor))?;
        while self.test_guard(&guard, cursor)? {
            self.dispatch(guard.statement, cursor)?;
        }
        Ok(())
    }

    /// `FOR [#var] [start,] end statement`
    pub(crate) fn exec_for(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let mut parsed = Args::new(args);
        let var = parsed.sigil_name('#').map(str::to_string);
        parsed.skip_ws();
        let (start, end, statement) =
            split_for_bounds(parsed.rest()).ok_or_else(|| self.syntax(cursor))?;

        let start = match start {
            Some(text) => self.evaluate(text, cursor)?,
            None => 0.0,
        };
        let end = self.evaluate(end, cursor)?;
        if end - start >= MAX_FOR_SPAN {
            tracing::debug!(start, end, "FOR range too wide to count");
            return Err(self.syntax(cursor));
        }
        let saved = var.as_deref().and_then(|name| self.env.get_num(name));

        // Counting in integers keeps the loop finite where `value + 1.0`
        // would round back to `value`.
        let mut count = 0_u64;
        let mut value = start;
        while value < end {
            if let Some(name) = &var {
                self.env.set_num(name.as_str(), value);
            }
            self.dispatch(statement, cursor)?;
            count += 1;
            value = start + count as f64;
        }

        if let (Some(name), Some(previous)) = (var, saved) {
            self.env.set_num(name, previous);
        }
        Ok(())
    }

    pub(crate) fn exec_exit(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let text = self.interpolate(args, cursor)?;
        let status: i32 = text.trim().parse().map_err(|_| self.syntax(cursor))?;
        tracing::debug!(status, "exit requested");
        Err(Signal::Exit(status))
    }
}

/// Split `[start,] end statement`.
///
/// The first comma that still leaves an `end statement` pair behind it
/// separates the start bound; the end bound runs to the first whitespace.
fn split_for_bounds(text: &str) -> Option<(Option<&str>, &str, &str)> {
    for (comma, _) in text.match_indices(',') {
        if let Some((end, statement)) = split_end_bound(&text[comma + 1..]) {
            return Some((Some(&text[..comma]), end, statement));
        }
    }
    split_end_bound(text).map(|(end, statement)| (None, end, statement))
}

fn split_end_bound(text: &str) -> Option<(&str, &str)> {
    let first = text.chars().next()?.len_utf8();
    let gap = first + text[first..].find(char::is_whitespace)?;
    Some((&text[..gap], text[gap..].trim_start()))
}

#[cfg(test)]
mod tests;
