//! Interpolation of literal text.
//!
//! Three passes, in order:
//!
//! 1. `#name` / `#(name)` become the numeric variable's rendering.
//! 2. `$c` (one character) / `$(name)` become the string variable's value.
//! 3. Escape pairs `\X` become their character.
//!
//! Substituted values are opaque to later passes, and the variable passes
//! step over escape pairs, so `\#` and `\$` survive as literal sigils.

use std::fmt;

use sam_patterns::syntax::{resolve_escape, scan_name, scan_parenthesised_name, strip_quotes};

use crate::environment::Environment;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InterpolateError {
    /// A referenced variable is not bound. Carries the sigil and name.
    Undefined { sigil: char, name: String },
    /// `\X` with `X` outside the escape table.
    UnknownEscape(char),
}

impl fmt::Display for InterpolateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpolateError::Undefined { sigil, name } => {
                write!(f, "undefined variable `{sigil}{name}`")
            }
            InterpolateError::UnknownEscape(c) => write!(f, "unknown escape `\\{c}`"),
        }
    }
}

impl std::error::Error for InterpolateError {}

/// Text still subject to later passes, or a substituted value.
enum Piece {
    Raw(String),
    Value(String),
}

/// Run all three passes over `text`.
pub fn interpolate(text: &str, env: &Environment) -> Result<String, InterpolateError> {
    let pieces = vec![Piece::Raw(text.to_string())];
    let pieces = substitute_pass(pieces, '#', scan_name, |name| {
        env.get_num(name).map(render_number)
    })?;
    let pieces = substitute_pass(pieces, '$', scan_string_key, |name| {
        env.get_str(name).map(str::to_string)
    })?;

    let mut out = String::with_capacity(text.len());
    for piece in pieces {
        match piece {
            Piece::Raw(raw) => unescape_into(&raw, &mut out)?,
            Piece::Value(value) => out.push_str(&value),
        }
    }
    Ok(out)
}

/// Numeric substitution only. Escape pairs are left as written.
///
/// This is what expression arguments (`LET`, `FOR`, the terminal
/// statements) see before evaluation.
pub fn substitute_numbers(text: &str, env: &Environment) -> Result<String, InterpolateError> {
    let pieces = vec![Piece::Raw(text.to_string())];
    let pieces = substitute_pass(pieces, '#', scan_name, |name| {
        env.get_num(name).map(render_number)
    })?;
    Ok(pieces
        .into_iter()
        .map(|piece| match piece {
            Piece::Raw(text) | Piece::Value(text) => text,
        })
        .collect())
}

/// Shortest decimal form that reads back as the same value.
pub fn render_number(value: f64) -> String {
    format!("{value}")
}

/// Remove the optional quotes around a literal text argument.
///
/// Surrounding whitespace is ignored when looking for the quotes; unquoted
/// text is returned untouched.
pub fn literal_text(text: &str) -> &str {
    let trimmed = text.trim();
    let stripped = strip_quotes(trimmed);
    if stripped.len() == trimmed.len() {
        text
    } else {
        stripped
    }
}

/// `$(name)`, or else the single character after `$`.
fn scan_string_key(text: &str) -> Option<(&str, usize)> {
    scan_parenthesised_name(text).or_else(|| {
        let c = text.chars().next()?;
        Some((&text[..c.len_utf8()], c.len_utf8()))
    })
}

fn substitute_pass(
    pieces: Vec<Piece>,
    sigil: char,
    scan: impl Fn(&str) -> Option<(&str, usize)>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Vec<Piece>, InterpolateError> {
    let mut out = Vec::with_capacity(pieces.len());
    for piece in pieces {
        let text = match piece {
            Piece::Raw(text) => text,
            value @ Piece::Value(_) => {
                out.push(value);
                continue;
            }
        };

        let mut raw = String::new();
        let mut rest = text.as_str();
        while let Some(c) = rest.chars().next() {
            let after = &rest[c.len_utf8()..];
            if c == '\\' {
                raw.push(c);
                rest = after;
                if let Some(code) = rest.chars().next() {
                    raw.push(code);
                    rest = &rest[code.len_utf8()..];
                }
                continue;
            }
            if c == sigil {
                if let Some((name, consumed)) = scan(after) {
                    let value = lookup(name).ok_or_else(|| InterpolateError::Undefined {
                        sigil,
                        name: name.to_string(),
                    })?;
                    if !raw.is_empty() {
                        out.push(Piece::Raw(std::mem::take(&mut raw)));
                    }
                    out.push(Piece::Value(value));
                    rest = &after[consumed..];
                    continue;
                }
            }
            raw.push(c);
            rest = after;
        }
        if !raw.is_empty() {
            out.push(Piece::Raw(raw));
        }
    }
    Ok(out)
}

fn unescape_into(text: &str, out: &mut String) -> Result<(), InterpolateError> {
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(code) => {
                out.push(resolve_escape(code).ok_or(InterpolateError::UnknownEscape(code))?);
            }
            None => out.push('\\'),
        }
    }
    Ok(())
}
