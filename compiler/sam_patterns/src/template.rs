//! `EXPLODE` template compilation.
//!
//! A template is literal text with placeholders:
//!
//! | template text          | matches                        | binds             |
//! |------------------------|--------------------------------|-------------------|
//! | run of whitespace      | one or more whitespace chars   |                   |
//! | `$name`, `$(name)`     | shortest run of any characters | string variable   |
//! | `#name`, `#(name)`     | `\d+\.?\d*`                    | numeric variable  |
//! | `\X` escape pair       | the escaped character          |                   |
//! | anything else          | itself                         |                   |
//!
//! The compiled pattern is anchored at both ends.

use std::fmt;

use regex::Regex;

use crate::syntax::{resolve_escape, scan_name};

const STRING_CAPTURE: &str = "(.*?)";
const NUMBER_CAPTURE: &str = r"([0-9]+\.?[0-9]*)";
const WHITESPACE_RUN: &str = r"\s+";

/// Which variable table a placeholder writes to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    Str,
    Num,
}

/// A placeholder's target variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub namespace: Namespace,
    pub name: String,
}

/// One captured value, ready to store.
#[derive(Clone, Debug, PartialEq)]
pub enum Capture<'t> {
    Str { name: &'t str, value: String },
    Num { name: &'t str, value: f64 },
}

#[derive(Clone, Debug)]
pub enum TemplateError {
    /// `\X` where `X` is not in the escape table.
    UnknownEscape(char),
    /// The generated pattern was rejected by the regex engine.
    InvalidPattern(regex::Error),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UnknownEscape(c) => write!(f, "unknown escape `\\{c}` in template"),
            TemplateError::InvalidPattern(err) => write!(f, "invalid template pattern: {err}"),
        }
    }
}

impl std::error::Error for TemplateError {}

/// A compiled template.
#[derive(Clone, Debug)]
pub struct Template {
    regex: Regex,
    bindings: Vec<Binding>,
}

impl Template {
    /// Compile template text. Quotes must already be stripped.
    pub fn compile(text: &str) -> Result<Self, TemplateError> {
        let mut pattern = String::with_capacity(text.len() * 2 + 2);
        let mut bindings = Vec::new();
        pattern.push('^');

        let mut rest = text;
        while let Some(c) = rest.chars().next() {
            let after = &rest[c.len_utf8()..];
            match c {
                c if c.is_whitespace() => {
                    pattern.push_str(WHITESPACE_RUN);
                    rest = after.trim_start();
                }
                '\\' => match after.chars().next() {
                    Some(code) => {
                        let literal =
                            resolve_escape(code).ok_or(TemplateError::UnknownEscape(code))?;
                        push_literal(&mut pattern, literal);
                        rest = &after[code.len_utf8()..];
                    }
                    None => {
                        push_literal(&mut pattern, '\\');
                        rest = after;
                    }
                },
                '$' | '#' => {
                    if let Some((name, consumed)) = scan_name(after) {
                        let namespace = if c == '$' {
                            pattern.push_str(STRING_CAPTURE);
                            Namespace::Str
                        } else {
                            pattern.push_str(NUMBER_CAPTURE);
                            Namespace::Num
                        };
                        bindings.push(Binding {
                            namespace,
                            name: name.to_string(),
                        });
                        rest = &after[consumed..];
                    } else {
                        push_literal(&mut pattern, c);
                        rest = after;
                    }
                }
                _ => {
                    push_literal(&mut pattern, c);
                    rest = after;
                }
            }
        }

        pattern.push('$');
        let regex = Regex::new(&pattern).map_err(TemplateError::InvalidPattern)?;
        tracing::trace!(template = text, pattern = %regex, "compiled template");
        Ok(Template { regex, bindings })
    }

    /// Capture targets in template order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Match `subject` as a whole and return the captured values in
    /// template order, or `None` when it does not match.
    pub fn extract(&self, subject: &str) -> Option<Vec<Capture<'_>>> {
        let caps = self.regex.captures(subject)?;
        self.bindings
            .iter()
            .enumerate()
            .map(|(i, binding)| {
                let text = caps.get(i + 1).map_or("", |m| m.as_str());
                let name = binding.name.as_str();
                match binding.namespace {
                    Namespace::Str => Some(Capture::Str {
                        name,
                        value: text.to_string(),
                    }),
                    Namespace::Num => text
                        .parse::<f64>()
                        .ok()
                        .map(|value| Capture::Num { name, value }),
                }
            })
            .collect()
    }
}

fn push_literal(pattern: &mut String, c: char) {
    let mut buf = [0u8; 4];
    pattern.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}
