//! Error types.
//!
//! Two disjoint classes of failure exist. Fatal ones stop the scan before
//! it can finish and come back as `Err(ScanError)`. Line-level problems
//! (a broken header, a missing separator, a handler rejection) are not
//! errors in the `Result` sense: they are recorded in the
//! [`Outcome`](crate::Outcome) and the scan carries on.

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

/// Legacy result code for an I/O failure (file could not be opened or read).
pub const IO_ERROR_CODE: i32 = -1;

/// Legacy result code for a failed line buffer allocation.
pub const ALLOC_ERROR_CODE: i32 = -2;

/// A failure that prevents the scan from completing.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The line buffer could not be allocated or grown.
    #[error("could not allocate a line buffer of {requested} bytes")]
    Alloc {
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    /// The line source failed to deliver input.
    #[error("failed to read input")]
    Io(#[from] io::Error),
}

impl ScanError {
    pub(crate) fn alloc(requested: usize, source: TryReserveError) -> Self {
        Self::Alloc { requested, source }
    }

    /// Negative code matching the C-style integer return contract.
    pub fn code(&self) -> i32 {
        match self {
            Self::Alloc { .. } => ALLOC_ERROR_CODE,
            Self::Io(_) => IO_ERROR_CODE,
        }
    }
}

/// Why a line was classified as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MalformedKind {
    /// `[` with no closing `]` before end of line (or before an inline comment)
    UnclosedSection = 0,
    /// Neither `=` nor `:` found on a non-blank, non-header line
    MissingSeparator,
}

impl MalformedKind {
    /// Get a human-readable message for this error kind.
    pub fn message(self) -> &'static str {
        match self {
            Self::UnclosedSection => "missing closing square bracket",
            Self::MissingSeparator => "expected '=' or ':'",
        }
    }
}
