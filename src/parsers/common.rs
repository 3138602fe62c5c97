//! Byte-offset helpers for scanning HDL text without a grammar.
//!
//! Every helper takes the full text plus an offset and returns another
//! offset (or span), so callers compose them into small hand-written
//! matchers. Offsets always land on ASCII bytes, which keeps them valid
//! `str` slice boundaries.

/// Byte range into the scanned text, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

pub fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

pub fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// True when the byte before `pos` cannot continue an identifier.
pub fn at_ident_boundary(text: &str, pos: usize) -> bool {
    pos == 0 || !is_ident_char(text.as_bytes()[pos - 1])
}

/// First offset at or after `pos` that is not ASCII whitespace.
pub fn skip_whitespace(text: &str, pos: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = pos;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Identifier `[A-Za-z_][A-Za-z0-9_]*` starting exactly at `pos`.
pub fn identifier_at(text: &str, pos: usize) -> Option<Span> {
    let bytes = text.as_bytes();
    if pos >= bytes.len() || !is_ident_start(bytes[pos]) {
        return None;
    }
    let mut end = pos + 1;
    while end < bytes.len() && is_ident_char(bytes[end]) {
        end += 1;
    }
    Some(Span::new(pos, end))
}

/// Matching `)` for the `(` at `open`, counting nesting.
///
/// Returns the offset just past the closing paren, or `None` when the
/// text ends before the nesting returns to zero.
pub fn balanced_parens(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    debug_assert_eq!(bytes.get(open), Some(&b'('));
    let mut depth = 0usize;
    for (offset, &b) in bytes[open..].iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Shortest `( ... )` starting at `open` that is followed by optional
/// whitespace and `;`. Parens inside are not balanced.
///
/// Returns the offset just past the `;`. When `stop` is given, a candidate
/// whose parenthesized span contains that token is rejected.
pub fn paren_list_then_semicolon(text: &str, open: usize, stop: Option<&str>) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return None;
    }
    let limit = stop
        .and_then(|token| text[open + 1..].find(token).map(|i| open + 1 + i))
        .unwrap_or(bytes.len());
    let mut search = open + 1;
    while let Some(rel) = text[search..limit].find(')') {
        let close = search + rel;
        let after = skip_whitespace(text, close + 1);
        if bytes.get(after) == Some(&b';') {
            return Some(after + 1);
        }
        search = close + 1;
    }
    None
}

/// Number of newlines before `pos`, i.e. the zero-based line of `pos`.
pub fn line_of(text: &str, pos: usize) -> usize {
    text.as_bytes()[..pos].iter().filter(|&&b| b == b'\n').count()
}

/// Offsets of `needle` in `haystack`, stepping past each hit.
pub fn occurrences<'a>(haystack: &'a str, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
    let mut from = 0usize;
    std::iter::from_fn(move || {
        if needle.is_empty() || from > haystack.len() {
            return None;
        }
        let hit = haystack[from..].find(needle)? + from;
        from = hit + needle.len();
        Some(hit)
    })
}
