//! `SUBP` and `FORK`.

use std::process::Command;
use std::thread;

use sam_diagnostic::{fail, Line};

use crate::interpolate::literal_text;
use crate::interpreter::{Cursor, Interpreter};
use crate::signal::{ExecResult, RuntimeError, Signal};

/// Spellings of the flag that stores the branch identifier in `$CHILD`.
const CHILD_FLAGS: [&str; 2] = ["$(CHILD)", "$CHILD"];

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut shell = Command::new("cmd");
    shell.arg("/C").arg(command);
    shell
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut shell = Command::new("sh");
    shell.arg("-c").arg(command);
    shell
}

/// Split a trailing `$CHILD` flag off `FORK` arguments.
fn strip_child_flag(args: &str) -> (&str, bool) {
    let trimmed = args.trim_end();
    for flag in CHILD_FLAGS {
        if let Some(rest) = trimmed.strip_suffix(flag) {
            let rest = rest.strip_suffix('\\').unwrap_or(rest);
            return (rest, true);
        }
    }
    (trimmed, false)
}

/// Parse `childLine [parentLine]`.
fn parse_fork_lines(text: &str) -> Option<(Line, Option<Line>)> {
    let mut numbers = text.split_whitespace().map(|token| {
        if token.bytes().all(|b| b.is_ascii_digit()) {
            token.parse::<Line>().ok()
        } else {
            None
        }
    });
    let child = numbers.next()??;
    let parent = match numbers.next() {
        Some(parent) => Some(parent?),
        None => None,
    };
    if numbers.next().is_some() {
        return None;
    }
    Some((child, parent))
}

impl Interpreter {
    /// `SUBP command` runs the command through the platform shell.
    pub(crate) fn exec_subp(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let command = self.interpolate(literal_text(args), cursor)?;
        let status = shell(&command).status();
        self.check_interrupt(cursor)?;

        match status {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => {
                tracing::debug!(command = %command, %status, "command failed");
                Err(self.raise(fail(cursor.line())))
            }
            Err(err) => {
                tracing::debug!(command = %command, %err, "command did not start");
                Err(self.raise(fail(cursor.line())))
            }
        }
    }

    /// `FORK childLine [parentLine] [$CHILD]`
    ///
    /// The branch starts from a snapshot of this context and runs the
    /// program from `childLine` as its own outermost scope.
    pub(crate) fn exec_fork(&mut self, args: &str, cursor: &mut Cursor) -> ExecResult {
        let (args, store_id) = strip_child_flag(args);
        let text = self.interpolate(args, cursor)?;
        let (child_line, parent_line) =
            parse_fork_lines(&text).ok_or_else(|| self.syntax(cursor))?;

        let id = self.branches.next_id();
        let branch = self.clone();
        let handle = thread::Builder::new()
            .name(format!("branch-{id}"))
            .spawn(move || branch.run_branch(child_line))
            .map_err(|err| Signal::Fatal(RuntimeError::Spawn(err)))?;
        self.branches.register(id, handle);
        tracing::debug!(branch = id, child_line, ?parent_line, "forked");

        if let Some(line) = parent_line {
            cursor.jump(line);
        }
        if store_id {
            self.env.set_str("CHILD", id.to_string());
        }
        Ok(())
    }
}
