//! Entries delivered to the handler.
//!
//! Like a SAX parser, the scanner hands each name/value pair to the caller
//! as soon as its line is classified and keeps nothing around afterwards.
//! All byte slices borrow from the scanner's line buffer or section state,
//! so they are only valid for the duration of the handler call.
//!
//! Entry sequence for:
//! ```text
//! [server]
//! motd = hello
//!   world
//! ```
//! is:
//! ```text
//! Pair         { section: "server", name: "motd", value: "hello" }
//! Continuation { section: "server", name: "motd", value: "world" }
//! ```

use std::borrow::Cow;

/// How the entry's line was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntryKind {
    /// `name = value` or `name: value`
    Pair,
    /// Indented line extending the previous pair's value
    Continuation,
}

/// One `(section, name, value)` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// Current section, empty before the first header.
    pub section: &'a [u8],
    pub name: &'a [u8],
    pub value: &'a [u8],
    /// 1-based line number the entry came from.
    pub line: usize,
    pub kind: EntryKind,
}

impl<'a> Entry<'a> {
    #[inline]
    pub fn section_str(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.section)
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.name)
    }

    #[inline]
    pub fn value_str(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.value)
    }

    /// Check if this entry continues an earlier value.
    #[inline]
    pub fn is_continuation(&self) -> bool {
        self.kind == EntryKind::Continuation
    }
}

/// Receives entries; returning `false` rejects the line.
///
/// A rejection is bookkept exactly like a syntax error (first one wins)
/// but nothing is rolled back and scanning continues unless the config
/// says to stop on the first error.
pub trait Handler {
    fn entry(&mut self, entry: &Entry<'_>) -> bool;
}

impl<F> Handler for F
where
    F: FnMut(&Entry<'_>) -> bool,
{
    #[inline]
    fn entry(&mut self, entry: &Entry<'_>) -> bool {
        self(entry)
    }
}

/// Owned copy of an [`Entry`], handy for collecting.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnedEntry {
    pub section: String,
    pub name: String,
    pub value: String,
    pub line: usize,
    pub kind: EntryKind,
}

impl From<&Entry<'_>> for OwnedEntry {
    fn from(entry: &Entry<'_>) -> Self {
        Self {
            section: entry.section_str().into_owned(),
            name: entry.name_str().into_owned(),
            value: entry.value_str().into_owned(),
            line: entry.line,
            kind: entry.kind,
        }
    }
}
