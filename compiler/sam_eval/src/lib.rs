//! SamBasic statement interpreter.
//!
//! # Architecture
//!
//! An [`Interpreter`] is one execution context: the program store, the four
//! variable tables, the condition handler table and the active input and
//! output streams. Statements run through [`Interpreter::dispatch`], which
//! splits a line into keyword and argument tail and hands both, together with
//! the caller's [`Cursor`], to the matching `exec` routine.
//!
//! Statements report failure through [`Signal`]. Conditions unwind to the
//! outermost scope untouched; [`Interpreter::execute_outermost`] is the only
//! place that consults the handler table.
//!
//! - `environment`: variable tables
//! - `interpolate`: the three-pass text pipeline
//! - `program`: numbered program lines
//! - `sink`, `streams`: output sinks, input sources and lazily opened files
//! - `line_reader`: standard input on a helper thread, so `READ` sees interrupts
//! - `terminal`: escape sequences and glyphs
//! - `branch`: threads created by `FORK`

mod branch;
mod environment;
mod exec;
mod interpolate;
pub mod interpreter;
mod line_reader;
mod program;
mod signal;
mod sink;
mod streams;
pub mod terminal;

#[cfg(test)]
mod testing;

pub use branch::BranchRegistry;
pub use environment::Environment;
pub use interpolate::{
    interpolate, literal_text, render_number, substitute_numbers, InterpolateError,
};
pub use interpreter::{Cursor, FatalReport, Interpreter, InterpreterBuilder, Outcome};
pub use line_reader::LineReader;
pub use program::ProgramStore;
pub use signal::{ExecResult, RuntimeError, Signal};
pub use sink::{SharedBuffer, Sink};
pub use streams::{Input, Mode, SharedLines, StreamError, StreamHandle};
