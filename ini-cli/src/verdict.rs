//! Whole-input classification.
//!
//! The scanner reports the first bad line; whether that means the input
//! was cut short or is corrupt depends on where that line sits relative to
//! the end of the input.

use ini_core::Outcome;
use serde::Serialize;

/// Overall judgement of one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// No malformed line.
    Valid,
    /// The only problem is on the final line, as if the input were cut off.
    Incomplete,
    /// A problem before the final line, or a fatal scan error.
    Incorrect,
}

impl Verdict {
    /// Classify `outcome` against the input's physical line count.
    ///
    /// An error on (or past) the last line is `Incomplete` unless an inline
    /// comment followed the broken construct, which means the line was
    /// complete and simply wrong.
    pub fn from_outcome(outcome: &Outcome, total_lines: usize) -> Self {
        match outcome.first_error {
            None => Self::Valid,
            Some(line) if line >= total_lines => {
                if outcome.comment_after_error {
                    Self::Incorrect
                } else {
                    Self::Incomplete
                }
            }
            Some(_) => Self::Incorrect,
        }
    }

    /// Process exit status; `Incomplete` keeps the legacy `-1` (255).
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Valid => 0,
            Self::Incorrect => 1,
            Self::Incomplete => 255,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Incomplete => "incomplete",
            Self::Incorrect => "incorrect",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of `\n` bytes plus one: a trailing newline opens an empty last line.
pub fn physical_lines(input: &[u8]) -> usize {
    input.iter().filter(|&&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use ini_core::{parse_bytes, Config, Entry};
    use pretty_assertions::assert_eq;

    fn judge(input: &str) -> Verdict {
        let outcome = parse_bytes(input.as_bytes(), |_: &Entry<'_>| true, &Config::default()).unwrap();
        Verdict::from_outcome(&outcome, physical_lines(input.as_bytes()))
    }

    #[test]
    fn test_physical_lines() {
        assert_eq!(physical_lines(b""), 1);
        assert_eq!(physical_lines(b"a"), 1);
        assert_eq!(physical_lines(b"a\n"), 2);
        assert_eq!(physical_lines(b"a\nb"), 2);
    }

    #[test]
    fn test_valid() {
        assert_eq!(judge(""), Verdict::Valid);
        assert_eq!(judge("[a]\nx=1\n"), Verdict::Valid);
    }

    #[test]
    fn test_cut_off_last_line_is_incomplete() {
        assert_eq!(judge("[a]\nx=1\n[b"), Verdict::Incomplete);
        assert_eq!(judge("[a]\nx"), Verdict::Incomplete);
    }

    #[test]
    fn test_comment_after_broken_last_line_is_incorrect() {
        assert_eq!(judge("[a]\nx ; note"), Verdict::Incorrect);
        assert_eq!(judge("[b ;c"), Verdict::Incorrect);
    }

    #[test]
    fn test_error_mid_file_is_incorrect() {
        assert_eq!(judge("[a\nx=1\n"), Verdict::Incorrect);
        // Terminated last line: the empty line after it is the real end
        assert_eq!(judge("x=1\n[b\n"), Verdict::Incorrect);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Verdict::Valid.exit_code(), 0);
        assert_eq!(Verdict::Incorrect.exit_code(), 1);
        assert_eq!(Verdict::Incomplete.exit_code(), 255);
        assert_eq!(Verdict::Incomplete.to_string(), "incomplete");
    }
}
