//! Statement implementations, grouped by concern.
//!
//! Each module adds `exec_*` methods to [`Interpreter`](crate::Interpreter);
//! `Interpreter::dispatch` routes keywords to them.
//!
//! - `control`: `RUN`, `GOTO`, `LIST`, `IF`, `WHILE`, `FOR`, `EXIT`
//! - `vars`: `PRINT`, `WRITE`, `SPR`, `LET`, `READ`, `ATOI`
//! - `conditions`: `ON`, `FIRE`
//! - `explode`: `EXPLODE`
//! - `io`: `OPEN`, `CLOSE`, `SOURCE`, `OUTPUT`, `APPEND`
//! - `screen`: `CLEAR`, `UP`, `DOWN`, `LEFT`, `RIGHT`, `HOME`, `COLOR`, `LINE`
//! - `process`: `FORK`, `SUBP`

mod args;
mod conditions;
mod control;
mod explode;
mod guard;
mod io;
mod process;
mod screen;
mod vars;

pub(crate) use args::Args;
