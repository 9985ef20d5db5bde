//! `IF` / `WHILE` guards.
//!
//! ```text
//! guard := ["NOT"] "(" lhs op rhs ")" statement
//!        | ["NOT"] "?" name statement
//! op    := "==" | ">=" | "<=" | "=" | "<" | ">"
//! ```
//!
//! The comparison ends at its matching close paren and the operator is the
//! first one outside nested parentheses and quotes.

use sam_diagnostic::undefined;

use super::Args;
use crate::interpolate::literal_text;
use crate::interpreter::{Cursor, Interpreter};
use crate::signal::Signal;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum CompareOp {
    /// `==`: compares interpolated text.
    TextEq,
    /// `=`: numeric equality.
    NumEq,
    Lt,
    Gt,
    Le,
    Ge,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Test<'a> {
    Compare {
        lhs: &'a str,
        op: CompareOp,
        rhs: &'a str,
    },
    Flag(&'a str),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Guard<'a> {
    pub(crate) negated: bool,
    pub(crate) test: Test<'a>,
    /// The statement run when the guard holds.
    pub(crate) statement: &'a str,
}

pub(crate) fn parse_guard(text: &str) -> Option<Guard<'_>> {
    let mut args = Args::new(text);
    let negated = args.eat("NOT");
    args.skip_ws();
    let rest = args.rest();

    if rest.starts_with('(') {
        let (lhs, op, rhs, after) = split_comparison(rest)?;
        return Some(Guard {
            negated,
            test: Test::Compare { lhs, op, rhs },
            statement: after.trim_start(),
        });
    }

    let name = args.sigil_name('?')?;
    args.skip_ws();
    Some(Guard {
        negated,
        test: Test::Flag(name),
        statement: args.rest(),
    })
}

/// Split `(lhs op rhs) rest` into its parts.
fn split_comparison(text: &str) -> Option<(&str, CompareOp, &str, &str)> {
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut operator: Option<(usize, usize, CompareOp)> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            _ if in_quotes => {}
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    let (start, end, op) = operator?;
                    let lhs = text[1..start].trim();
                    let rhs = text[end..i].trim();
                    return Some((lhs, op, rhs, &text[i + 1..]));
                }
            }
            '=' | '<' | '>' if depth == 1 && operator.is_none() => {
                let doubled = chars.peek().is_some_and(|&(_, next)| next == '=');
                let op = match (c, doubled) {
                    ('=', true) => CompareOp::TextEq,
                    ('>', true) => CompareOp::Ge,
                    ('<', true) => CompareOp::Le,
                    ('=', false) => CompareOp::NumEq,
                    ('>', false) => CompareOp::Gt,
                    _ => CompareOp::Lt,
                };
                let len = if doubled {
                    chars.next();
                    2
                } else {
                    1
                };
                operator = Some((i, i + len, op));
            }
            _ => {}
        }
    }
    None
}

impl Interpreter {
    /// Evaluate a guard's test, `NOT` included.
    pub(crate) fn test_guard(&self, guard: &Guard<'_>, cursor: &Cursor) -> Result<bool, Signal> {
        let holds = match guard.test {
            Test::Flag(name) => self
                .env
                .get_bool(name)
                .ok_or_else(|| Signal::from(undefined(cursor.line())))?,
            Test::Compare {
                lhs,
                op: CompareOp::TextEq,
                rhs,
            } => {
                let lhs = self.interpolate(literal_text(lhs), cursor)?;
                let rhs = self.interpolate(literal_text(rhs), cursor)?;
                lhs == rhs
            }
            Test::Compare { lhs, op, rhs } => {
                let lhs = self.evaluate_source(&self.interpolate(lhs, cursor)?, cursor)?;
                let rhs = self.evaluate_source(&self.interpolate(rhs, cursor)?, cursor)?;
                compare(lhs, op, rhs)
            }
        };
        Ok(holds != guard.negated)
    }
}

#[allow(clippy::float_cmp, reason = "language equality is exact")]
fn compare(lhs: f64, op: CompareOp, rhs: f64) -> bool {
    match op {
        CompareOp::NumEq | CompareOp::TextEq => lhs == rhs,
        CompareOp::Lt => lhs < rhs,
        CompareOp::Gt => lhs > rhs,
        CompareOp::Le => lhs <= rhs,
        CompareOp::Ge => lhs >= rhs,
    }
}
