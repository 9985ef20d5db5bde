//! A small cursor over a statement's argument tail.

use sam_patterns::syntax::{is_word_char, scan_name};

#[derive(Copy, Clone, Debug)]
pub(crate) struct Args<'a> {
    rest: &'a str,
}

impl<'a> Args<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Args { rest: text }
    }

    /// Everything not consumed yet.
    pub(crate) fn rest(&self) -> &'a str {
        self.rest
    }

    /// Skip whitespace; `true` if there was any.
    pub(crate) fn skip_ws(&mut self) -> bool {
        let trimmed = self.rest.trim_start();
        let skipped = trimmed.len() != self.rest.len();
        self.rest = trimmed;
        skipped
    }

    /// Consume `prefix` if the text starts with it.
    pub(crate) fn eat(&mut self, prefix: &str) -> bool {
        match self.rest.strip_prefix(prefix) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    /// Consume `keyword` when it is a whole word.
    pub(crate) fn keyword(&mut self, keyword: &str) -> bool {
        match self.rest.strip_prefix(keyword) {
            Some(rest) if !rest.starts_with(is_word_char) => {
                self.rest = rest;
                true
            }
            _ => false,
        }
    }

    /// Consume a run of word characters.
    pub(crate) fn word(&mut self) -> Option<&'a str> {
        let len = self
            .rest
            .find(|c: char| !is_word_char(c))
            .unwrap_or(self.rest.len());
        if len == 0 {
            return None;
        }
        let (word, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some(word)
    }

    /// Consume `sigil` followed by `name` or `(name)`.
    pub(crate) fn sigil_name(&mut self, sigil: char) -> Option<&'a str> {
        let after = self.rest.strip_prefix(sigil)?;
        let (name, consumed) = scan_name(after)?;
        self.rest = &after[consumed..];
        Some(name)
    }

    /// Whether only whitespace is left.
    pub(crate) fn is_blank(&self) -> bool {
        self.rest.trim().is_empty()
    }
}

/// Split `text` at commas outside parentheses.
pub(crate) fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
