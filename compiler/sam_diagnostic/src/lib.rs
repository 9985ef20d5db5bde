//! Condition system for SamBasic.
//!
//! A *condition* is a named signal that replaces exceptions: statements raise
//! one as their failure outcome and it unwinds untouched to the outermost
//! execution scope. This crate owns the vocabulary shared by every layer:
//!
//! - [`ConditionName`]: the built-in conditions plus user names from `FIRE`
//! - [`Condition`]: a raised condition and the line it was raised on
//! - [`Termination`]: what an unhandled condition does to the process
//!
//! Factory functions ([`syntax_error`], [`undefined`], ...) are the public way
//! to raise built-ins so that call sites read like the condition they signal.

mod condition;
mod termination;

pub use condition::{
    ctrl_c, end_of_file, fail, list_error, no_match, syntax_error, undefined, Condition,
    ConditionName, Line, DETACHED_LINE,
};
pub use termination::{
    builtin_termination, handler_failed, unhandled, Termination, EXIT_FATAL, EXIT_OK,
    EXIT_UNHANDLED,
};
