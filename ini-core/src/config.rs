//! Parser configuration.
//!
//! Every option is independent. Named presets ("dialects") live in a
//! compile-time map so front ends can select them by string.

use phf::phf_map;
use thiserror::Error;

/// Usable size of the stack line buffer.
pub const STACK_LINE_LEN: usize = 200;

/// Starting size of the growable line buffer.
pub const INITIAL_LINE_CAPACITY: usize = 200;

/// Hard cap on a single logical line in growable mode.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 32 * 1024;

/// Longest stored section name; longer names are silently truncated.
pub const MAX_SECTION_LEN: usize = 499;

/// Longest stored continuation target name; longer names are silently truncated.
pub const MAX_NAME_LEN: usize = 499;

/// Which line buffer the scanner uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BufferMode {
    /// Fixed stack array of [`STACK_LINE_LEN`] bytes, never grows.
    Fixed,
    /// Heap buffer doubled on demand up to `max_line_length`.
    #[default]
    Growable,
}

/// Invalid configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("start-of-line comment prefixes must not be empty")]
    NoCommentPrefixes,

    #[error("{name} must be greater than zero")]
    ZeroSize { name: &'static str },

    #[error("initial line capacity {initial} exceeds max line length {max}")]
    InitialExceedsMax { initial: usize, max: usize },

    #[error("unknown dialect {0:?} (expected one of: {list})", list = Dialect::names().join(", "))]
    UnknownDialect(String),
}

/// Options recognized by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Indented lines after a name/value pair continue its value.
    pub multiline: bool,
    /// Strip whitespace-preceded inline comments from values.
    pub inline_comments: bool,
    /// Bytes that start an inline comment.
    pub inline_comment_prefixes: Vec<u8>,
    /// Bytes that mark a whole line as a comment when they come first.
    pub start_comment_prefixes: Vec<u8>,
    /// Skip a UTF-8 byte-order mark at the start of the first line.
    pub allow_bom: bool,
    /// Stop scanning right after the first malformed or rejected line.
    pub stop_on_first_error: bool,
    pub buffer: BufferMode,
    pub initial_line_capacity: usize,
    pub max_line_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            multiline: true,
            inline_comments: true,
            inline_comment_prefixes: b";".to_vec(),
            start_comment_prefixes: b";#".to_vec(),
            allow_bom: true,
            stop_on_first_error: false,
            buffer: BufferMode::Growable,
            initial_line_capacity: INITIAL_LINE_CAPACITY,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

impl Config {
    pub fn multiline(mut self, on: bool) -> Self {
        self.multiline = on;
        self
    }

    pub fn inline_comments(mut self, on: bool) -> Self {
        self.inline_comments = on;
        self
    }

    pub fn inline_comment_prefixes(mut self, prefixes: impl Into<Vec<u8>>) -> Self {
        self.inline_comment_prefixes = prefixes.into();
        self
    }

    pub fn start_comment_prefixes(mut self, prefixes: impl Into<Vec<u8>>) -> Self {
        self.start_comment_prefixes = prefixes.into();
        self
    }

    pub fn allow_bom(mut self, on: bool) -> Self {
        self.allow_bom = on;
        self
    }

    pub fn stop_on_first_error(mut self, on: bool) -> Self {
        self.stop_on_first_error = on;
        self
    }

    pub fn buffer(mut self, mode: BufferMode) -> Self {
        self.buffer = mode;
        self
    }

    pub fn initial_line_capacity(mut self, bytes: usize) -> Self {
        self.initial_line_capacity = bytes;
        self
    }

    pub fn max_line_length(mut self, bytes: usize) -> Self {
        self.max_line_length = bytes;
        self
    }

    /// Check the options for combinations the scanner cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_comment_prefixes.is_empty() {
            return Err(ConfigError::NoCommentPrefixes);
        }
        if self.max_line_length == 0 {
            return Err(ConfigError::ZeroSize { name: "max_line_length" });
        }
        if self.buffer == BufferMode::Growable {
            if self.initial_line_capacity == 0 {
                return Err(ConfigError::ZeroSize { name: "initial_line_capacity" });
            }
            if self.initial_line_capacity > self.max_line_length {
                return Err(ConfigError::InitialExceedsMax {
                    initial: self.initial_line_capacity,
                    max: self.max_line_length,
                });
            }
        }
        Ok(())
    }

    /// Whether `b` opens an inline comment (only meaningful after whitespace).
    #[inline]
    pub(crate) fn is_inline_prefix(&self, b: u8) -> bool {
        self.inline_comments && self.inline_comment_prefixes.contains(&b)
    }
}

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Library defaults of the classic C parser: 200-byte stack buffer,
    /// `;#` comments. Unlike that parser, the rest of an overlong line is
    /// dropped rather than read back as further lines, so line numbers
    /// always match physical lines.
    Inih,
    /// Same syntax as `Inih`, growable line buffer.
    Default,
    /// No continuations, no inline comments, stop on first error.
    Strict,
    /// Python configparser flavor: `#` and `;` comments, no inline comments.
    Python,
}

static DIALECTS: phf::Map<&'static str, Dialect> = phf_map! {
    "inih" => Dialect::Inih,
    "default" => Dialect::Default,
    "strict" => Dialect::Strict,
    "python" => Dialect::Python,
};

impl Dialect {
    /// Look up a preset by name.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        DIALECTS
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownDialect(name.to_string()))
    }

    /// All preset names, sorted.
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<_> = DIALECTS.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn config(self) -> Config {
        match self {
            Self::Inih => Config::default()
                .buffer(BufferMode::Fixed)
                .max_line_length(STACK_LINE_LEN),
            Self::Default => Config::default(),
            Self::Strict => Config::default()
                .multiline(false)
                .inline_comments(false)
                .stop_on_first_error(true),
            Self::Python => Config::default()
                .start_comment_prefixes(&b"#;"[..])
                .inline_comments(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Config::default().validate().is_ok());
        for name in Dialect::names() {
            let dialect = Dialect::from_name(name).unwrap();
            assert!(dialect.config().validate().is_ok(), "dialect {name}");
        }
    }

    #[test]
    fn test_unknown_dialect() {
        let err = Dialect::from_name("toml").unwrap_err();
        assert_eq!(err, ConfigError::UnknownDialect("toml".into()));
        assert!(err.to_string().contains("inih"));
    }

    #[test]
    fn test_invalid_combinations() {
        assert_eq!(
            Config::default().start_comment_prefixes(Vec::new()).validate(),
            Err(ConfigError::NoCommentPrefixes)
        );
        assert_eq!(
            Config::default().max_line_length(0).validate(),
            Err(ConfigError::ZeroSize { name: "max_line_length" })
        );
        assert_eq!(
            Config::default().initial_line_capacity(512).max_line_length(256).validate(),
            Err(ConfigError::InitialExceedsMax { initial: 512, max: 256 })
        );
        // Initial capacity is irrelevant to the fixed buffer
        assert!(Config::default()
            .buffer(BufferMode::Fixed)
            .initial_line_capacity(0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_inline_prefix_gated_by_flag() {
        let on = Config::default();
        let off = Config::default().inline_comments(false);
        assert!(on.is_inline_prefix(b';'));
        assert!(!on.is_inline_prefix(b'#'));
        assert!(!off.is_inline_prefix(b';'));
    }
}
