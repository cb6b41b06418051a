//! Per-line classification.
//!
//! Everything here is a pure function of one line's bytes, the config and
//! whether a continuation target exists. The scanner owns all state.

use memchr::{memchr, memchr2};

use crate::config::Config;
use crate::error::MalformedKind;

/// UTF-8 byte-order mark.
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// C-locale `isspace`: space, `\t`, `\n`, `\v`, `\f`, `\r`.
#[inline]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Strip trailing whitespace.
#[inline]
pub fn rstrip(s: &[u8]) -> &[u8] {
    let end = s.iter().rposition(|&b| !is_space(b)).map_or(0, |i| i + 1);
    &s[..end]
}

/// Skip leading whitespace.
#[inline]
pub fn lskip(s: &[u8]) -> &[u8] {
    let start = s.iter().position(|&b| !is_space(b)).unwrap_or(s.len());
    &s[start..]
}

/// Index of the first byte in `chars`, or of the first inline comment
/// prefix that directly follows whitespace; `s.len()` if neither occurs.
///
/// A prefix glued to text (`a;b`) is not a comment.
pub fn find_chars_or_comment(s: &[u8], chars: &[u8], config: &Config) -> usize {
    if !config.inline_comments {
        let found = match *chars {
            [] => None,
            [a] => memchr(a, s),
            [a, b] => memchr2(a, b, s),
            _ => s.iter().position(|b| chars.contains(b)),
        };
        return found.unwrap_or(s.len());
    }

    let mut was_space = false;
    for (i, &b) in s.iter().enumerate() {
        if chars.contains(&b) || (was_space && config.is_inline_prefix(b)) {
            return i;
        }
        was_space = is_space(b);
    }
    s.len()
}

/// Whether any inline comment prefix byte occurs in `s`, glued or not.
///
/// Only feeds the "comment after a broken line" flag, which front ends use
/// to tell truncated input from corrupt input.
pub fn has_comment_prefix(s: &[u8], config: &Config) -> bool {
    s.iter().any(|b| config.inline_comment_prefixes.contains(b))
}

/// One stripped line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Content with surrounding whitespace removed.
    pub text: &'a [u8],
    /// Leading whitespace was present before stripping.
    pub had_indent: bool,
}

impl<'a> Line<'a> {
    /// Strip a raw line, optionally skipping a leading byte-order mark first.
    pub fn new(raw: &'a [u8], skip_bom: bool) -> Self {
        let raw = if skip_bom { raw.strip_prefix(BOM).unwrap_or(raw) } else { raw };
        let trimmed = rstrip(raw);
        let text = lskip(trimmed);
        Self {
            text,
            had_indent: text.len() < trimmed.len(),
        }
    }
}

/// What a line turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record<'a> {
    /// Blank, or starts with a start-of-line comment prefix.
    CommentOrBlank,
    /// Indented text extending the previous pair.
    Continuation(&'a [u8]),
    /// `[name]`
    Section(&'a [u8]),
    /// `name = value` or `name: value`
    Pair { name: &'a [u8], value: &'a [u8] },
    Malformed {
        kind: MalformedKind,
        /// An inline comment prefix appears after the broken construct.
        trailing_comment: bool,
    },
}

impl Record<'_> {
    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Record::CommentOrBlank => "comment-or-blank",
            Record::Continuation(_) => "continuation",
            Record::Section(_) => "section",
            Record::Pair { .. } => "pair",
            Record::Malformed { kind, .. } => kind.message(),
        }
    }
}

/// Classify a stripped line. First match wins.
pub fn classify<'a>(line: &Line<'a>, has_previous_name: bool, config: &Config) -> Record<'a> {
    let s = line.text;
    let Some(&first) = s.first() else {
        return Record::CommentOrBlank;
    };

    if config.start_comment_prefixes.contains(&first) {
        return Record::CommentOrBlank;
    }

    if config.multiline && has_previous_name && line.had_indent {
        return Record::Continuation(s);
    }

    if first == b'[' {
        let body = &s[1..];
        let end = find_chars_or_comment(body, b"]", config);
        return match body.get(end) {
            Some(b']') => Record::Section(&body[..end]),
            _ => Record::Malformed {
                kind: MalformedKind::UnclosedSection,
                trailing_comment: has_comment_prefix(body, config),
            },
        };
    }

    let end = find_chars_or_comment(s, b"=:", config);
    match s.get(end) {
        Some(b'=' | b':') => {
            let name = rstrip(&s[..end]);
            let mut value = &s[end + 1..];
            if config.inline_comments {
                value = &value[..find_chars_or_comment(value, b"", config)];
            }
            Record::Pair {
                name,
                value: rstrip(lskip(value)),
            }
        }
        _ => Record::Malformed {
            kind: MalformedKind::MissingSeparator,
            trailing_comment: has_comment_prefix(&s[1..], config),
        },
    }
}
