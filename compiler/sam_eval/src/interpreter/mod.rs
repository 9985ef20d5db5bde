//! Execution contexts and statement dispatch.
//!
//! # Cursor threading
//!
//! The cursor is the "next line" cell of whatever loop owns it. `GOTO`
//! writes `target - 1` and the owning loop advances by one afterwards.
//! Trailing statements of `IF`, `WHILE` and `FOR` and the body of a
//! handler receive the caller's cursor by `&mut`, so a `GOTO` nested
//! anywhere below a `RUN` redirects that `RUN`.

mod builder;
mod cursor;
mod outermost;

pub use builder::InterpreterBuilder;
pub use cursor::Cursor;
pub use outermost::{FatalReport, Outcome};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use sam_diagnostic::{ctrl_c, syntax_error, undefined, Condition, ConditionName, Line};
use sam_patterns::syntax::is_word_char;
use sam_stack::ensure_sufficient_stack;

use crate::branch::BranchRegistry;
use crate::environment::Environment;
use crate::interpolate::{interpolate, substitute_numbers, InterpolateError};
use crate::program::ProgramStore;
use crate::signal::{ExecResult, RuntimeError, Signal};
use crate::sink::Sink;
use crate::streams::Input;

/// Statement keywords.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Keyword {
    Print,
    Write,
    Run,
    List,
    Spr,
    Let,
    Read,
    Goto,
    If,
    While,
    Rem,
    Exit,
    Open,
    Close,
    Source,
    Output,
    Append,
    Explode,
    On,
    Clear,
    Up,
    Down,
    Left,
    Right,
    Home,
    Color,
    Fire,
    Line,
    For,
    Subp,
    Atoi,
    Fork,
}

impl Keyword {
    fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "PRINT" => Keyword::Print,
            "WRITE" => Keyword::Write,
            "RUN" => Keyword::Run,
            "LIST" => Keyword::List,
            "SPR" => Keyword::Spr,
            "LET" => Keyword::Let,
            "READ" => Keyword::Read,
            "GOTO" => Keyword::Goto,
            "IF" => Keyword::If,
            "WHILE" => Keyword::While,
            "REM" => Keyword::Rem,
            "EXIT" => Keyword::Exit,
            "OPEN" => Keyword::Open,
            "CLOSE" => Keyword::Close,
            "SOURCE" => Keyword::Source,
            "OUTPUT" => Keyword::Output,
            "APPEND" => Keyword::Append,
            "EXPLODE" => Keyword::Explode,
            "ON" => Keyword::On,
            "CLEAR" => Keyword::Clear,
            "UP" => Keyword::Up,
            "DOWN" => Keyword::Down,
            "LEFT" => Keyword::Left,
            "RIGHT" => Keyword::Right,
            "HOME" => Keyword::Home,
            "COLOR" => Keyword::Color,
            "FIRE" => Keyword::Fire,
            "LINE" => Keyword::Line,
            "FOR" => Keyword::For,
            "SUBP" => Keyword::Subp,
            "ATOI" => Keyword::Atoi,
            "FORK" => Keyword::Fork,
            _ => return None,
        })
    }
}

/// Split a statement into its leading keyword and argument tail.
fn split_statement(text: &str) -> Option<(&str, &str)> {
    let len = text.find(|c: char| !is_word_char(c)).unwrap_or(text.len());
    if len == 0 {
        return None;
    }
    Some((&text[..len], text[len..].trim_start()))
}

/// One execution context.
///
/// Cloning takes a snapshot: variables, handlers and stream bindings are
/// copied, while the program text, open files, the interrupt flag and the
/// branch registry stay shared.
#[derive(Clone, Debug)]
pub struct Interpreter {
    pub(crate) program: Arc<ProgramStore>,
    pub(crate) env: Environment,
    pub(crate) handlers: FxHashMap<ConditionName, String>,
    pub(crate) input: Input,
    pub(crate) output: Sink,
    /// What `SOURCE STDIN` restores.
    pub(crate) default_input: Input,
    /// What `OUTPUT STDOUT` restores.
    pub(crate) default_output: Sink,
    /// Diagnostics for unhandled conditions.
    pub(crate) console: Sink,
    pub(crate) interrupt: Arc<AtomicBool>,
    pub(crate) branches: BranchRegistry,
}

impl Interpreter {
    /// An interpreter on standard input and output.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn program(&self) -> &ProgramStore {
        &self.program
    }

    /// Store a numbered program line.
    pub fn define_line(&mut self, number: usize, text: impl Into<String>) {
        Arc::make_mut(&mut self.program).define(number, text);
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// The flag the host's interrupt handler sets.
    pub fn interrupt(&self) -> &AtomicBool {
        &self.interrupt
    }

    pub fn console(&self) -> &Sink {
        &self.console
    }

    pub fn branches(&self) -> &BranchRegistry {
        &self.branches
    }

    /// The registered handler statement for a condition.
    pub fn handler(&self, name: &ConditionName) -> Option<&str> {
        self.handlers.get(name).map(String::as_str)
    }

    /// Execute one statement against `cursor`.
    #[tracing::instrument(level = "trace", skip(self, cursor), fields(line = cursor.line()))]
    pub fn dispatch(&mut self, text: &str, cursor: &mut Cursor) -> ExecResult {
        ensure_sufficient_stack(|| self.dispatch_inner(text, cursor))
    }

    fn dispatch_inner(&mut self, text: &str, cursor: &mut Cursor) -> ExecResult {
        self.check_interrupt(cursor)?;
        if text.trim().is_empty() {
            return Ok(());
        }
        let Some((word, args)) = split_statement(text) else {
            return Err(self.syntax(cursor));
        };
        let Some(keyword) = Keyword::from_word(word) else {
            tracing::debug!(keyword = word, "unknown statement");
            return Err(self.syntax(cursor));
        };

        match keyword {
            Keyword::Print => self.exec_print(args, cursor),
            Keyword::Write => self.exec_write(args, cursor),
            Keyword::Run => self.exec_run(),
            Keyword::List => self.exec_list(args, cursor),
            Keyword::Spr => self.exec_spr(args, cursor),
            Keyword::Let => self.exec_let(args, cursor),
            Keyword::Read => self.exec_read(args, cursor),
            Keyword::Goto => self.exec_goto(args, cursor),
            Keyword::If => self.exec_if(args, cursor),
            Keyword::While => self.exec_while(args, cursor),
            Keyword::Rem => Ok(()),
            Keyword::Exit => self.exec_exit(args, cursor),
            Keyword::Open => self.exec_open(args, cursor),
            Keyword::Close => self.exec_close(args, cursor),
            Keyword::Source => self.exec_source(args, cursor),
            Keyword::Output => self.exec_output(args, cursor, crate::streams::Mode::Write),
            Keyword::Append => self.exec_output(args, cursor, crate::streams::Mode::Append),
            Keyword::Explode => self.exec_explode(args, cursor),
            Keyword::On => self.exec_on(args, cursor),
            Keyword::Clear => self.write_raw(crate::terminal::CLEAR),
            Keyword::Up => self.exec_move(args, cursor, crate::terminal::Direction::Up),
            Keyword::Down => self.exec_move(args, cursor, crate::terminal::Direction::Down),
            Keyword::Left => self.exec_move(args, cursor, crate::terminal::Direction::Left),
            Keyword::Right => self.exec_move(args, cursor, crate::terminal::Direction::Right),
            Keyword::Home => self.exec_home(args, cursor),
            Keyword::Color => self.exec_color(args, cursor),
            Keyword::Fire => self.exec_fire(args, cursor),
            Keyword::Line => self.exec_line(args, cursor),
            Keyword::For => self.exec_for(args, cursor),
            Keyword::Subp => self.exec_subp(args, cursor),
            Keyword::Atoi => self.exec_atoi(args, cursor),
            Keyword::Fork => self.exec_fork(args, cursor),
        }
    }

    /// Run the program from `start` on a fresh cursor until it runs off the
    /// end. Absent lines are skipped.
    pub(crate) fn run_from(&mut self, start: Line) -> ExecResult {
        let program = Arc::clone(&self.program);
        let mut cursor = Cursor::at(start);
        loop {
            let from = usize::try_from(cursor.line()).unwrap_or(0);
            let Some((number, text)) = program.next_line(from) else {
                return Ok(());
            };
            cursor.set(Line::try_from(number).unwrap_or(Line::MAX));
            self.dispatch(text, &mut cursor)?;
            cursor.advance();
        }
    }

    /// Raise `CTRLC` if an interrupt arrived since the last check.
    pub(crate) fn check_interrupt(&self, cursor: &Cursor) -> ExecResult {
        if self.interrupt.swap(false, Ordering::SeqCst) {
            tracing::debug!(line = cursor.line(), "interrupted");
            return Err(ctrl_c(cursor.line()).into());
        }
        Ok(())
    }

    // Helpers shared by the statement implementations

    pub(crate) fn syntax(&self, cursor: &Cursor) -> Signal {
        syntax_error(cursor.line()).into()
    }

    pub(crate) fn raise(&self, condition: Condition) -> Signal {
        tracing::debug!(%condition, "raising condition");
        Signal::Raise(condition)
    }

    fn interpolate_error(&self, err: &InterpolateError, cursor: &Cursor) -> Signal {
        tracing::debug!(%err, "interpolation failed");
        match err {
            InterpolateError::Undefined { .. } => undefined(cursor.line()).into(),
            InterpolateError::UnknownEscape(_) => self.syntax(cursor),
        }
    }

    /// All three interpolation passes.
    pub(crate) fn interpolate(&self, text: &str, cursor: &Cursor) -> Result<String, Signal> {
        interpolate(text, &self.env).map_err(|err| self.interpolate_error(&err, cursor))
    }

    /// Numeric substitution followed by expression evaluation.
    pub(crate) fn evaluate(&self, text: &str, cursor: &Cursor) -> Result<f64, Signal> {
        let source = self.substitute(text, cursor)?;
        self.evaluate_source(&source, cursor)
    }

    /// Numeric substitution only.
    pub(crate) fn substitute(&self, text: &str, cursor: &Cursor) -> Result<String, Signal> {
        substitute_numbers(text, &self.env).map_err(|err| self.interpolate_error(&err, cursor))
    }

    /// Evaluate already interpolated expression text.
    pub(crate) fn evaluate_source(&self, source: &str, cursor: &Cursor) -> Result<f64, Signal> {
        sam_expr::evaluate(source).map_err(|err| {
            tracing::debug!(%err, source, "expression failed");
            self.syntax(cursor)
        })
    }

    /// Write `text` to the active output without interpolation.
    pub fn write_raw(&self, text: &str) -> ExecResult {
        self.output.write_str(text).map_err(|source| {
            Signal::Fatal(RuntimeError::Write {
                target: self.output.describe(),
                source,
            })
        })
    }

    pub(crate) fn write_console(&self, text: &str) -> Result<(), RuntimeError> {
        self.console
            .write_line(text)
            .map_err(|source| RuntimeError::Write {
                target: self.console.describe(),
                source,
            })
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
