//! Sigil and escape scanning shared by interpolation and templates.

/// Resolve the character after a backslash.
///
/// Returns `None` for codes outside the table; callers raise
/// `SYNTAXERROR` for those.
#[inline]
pub fn resolve_escape(c: char) -> Option<char> {
    match c {
        'N' => Some('\n'),
        'T' => Some('\t'),
        'R' => Some('\r'),
        ' ' => Some(' '),
        '"' => Some('"'),
        '$' => Some('$'),
        '#' => Some('#'),
        '!' => Some('!'),
        _ => None,
    }
}

/// Identifier characters: letters, digits and underscore.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Length in bytes of the identifier at the start of `text`.
#[inline]
fn word_len(text: &str) -> usize {
    text.find(|c: char| !is_word_char(c)).unwrap_or(text.len())
}

/// Scan the name that follows a sigil.
///
/// Accepts `name` and `(name)`. Returns the bare name and the number of
/// bytes consumed from `text`, or `None` when no name follows.
pub fn scan_name(text: &str) -> Option<(&str, usize)> {
    if let Some(inner) = text.strip_prefix('(') {
        let len = word_len(inner);
        if len > 0 && inner[len..].starts_with(')') {
            return Some((&inner[..len], len + 2));
        }
        return None;
    }
    let len = word_len(text);
    (len > 0).then_some((&text[..len], len))
}

/// Scan only the parenthesised form `(name)`.
pub fn scan_parenthesised_name(text: &str) -> Option<(&str, usize)> {
    if text.starts_with('(') {
        scan_name(text)
    } else {
        None
    }
}

/// Remove one pair of surrounding double quotes, if present.
///
/// A closing quote written as the escape `\"` does not count.
pub fn strip_quotes(text: &str) -> &str {
    let inner = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'));
    match inner {
        Some(inner) if !ends_with_escape(inner) => inner,
        _ => text,
    }
}

/// Whether `text` ends in an unpaired backslash.
fn ends_with_escape(text: &str) -> bool {
    let trailing = text.chars().rev().take_while(|&c| c == '\\').count();
    trailing % 2 == 1
}
