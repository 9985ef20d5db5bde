//! Numbered program lines.

use std::collections::BTreeMap;

/// Sparse, ordered program text keyed by line number.
///
/// A later definition of a line replaces the earlier one; lines are never
/// removed.
#[derive(Clone, Debug, Default)]
pub struct ProgramStore {
    lines: BTreeMap<usize, String>,
}

impl ProgramStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, number: usize, text: impl Into<String>) {
        self.lines.insert(number, text.into());
    }

    pub fn get(&self, number: usize) -> Option<&str> {
        self.lines.get(&number).map(String::as_str)
    }

    /// One past the highest defined line, or 0 for an empty program.
    pub fn end(&self) -> usize {
        self.lines.last_key_value().map_or(0, |(n, _)| n + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The first defined line at or after `from`.
    pub fn next_line(&self, from: usize) -> Option<(usize, &str)> {
        self.lines
            .range(from..)
            .next()
            .map(|(n, text)| (*n, text.as_str()))
    }

    /// Defined lines in `[start, end)`, ascending. `None` means no upper bound.
    pub fn range(&self, start: usize, end: Option<usize>) -> impl Iterator<Item = (usize, &str)> {
        let upper = end.unwrap_or(usize::MAX);
        self.lines
            .range(start..)
            .take_while(move |(n, _)| **n < upper)
            .map(|(n, text)| (*n, text.as_str()))
    }
}

#[cfg(test)]
mod tests;
