//! The scanning state machine.
//!
//! # Example
//!
//! ```
//! use ini_core::{Config, Entry, parse_str};
//!
//! let mut pairs = Vec::new();
//! let outcome = parse_str("[a]\nx=1\ny=2\n", |e: &Entry<'_>| {
//!     pairs.push((e.section_str().into_owned(), e.name_str().into_owned(), e.value_str().into_owned()));
//!     true
//! }, &Config::default()).unwrap();
//!
//! assert!(outcome.is_clean());
//! assert_eq!(pairs[1], ("a".into(), "y".into(), "2".into()));
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, trace};

use crate::buffer::{FixedBuffer, GrowableBuffer, LineBuffer};
use crate::config::{BufferMode, Config, MAX_NAME_LEN, MAX_SECTION_LEN, STACK_LINE_LEN};
use crate::error::{MalformedKind, ScanError};
use crate::event::{Entry, EntryKind, Handler};
use crate::line::{classify, Line, Record};
use crate::source::{LineSource, ReaderSource, SliceSource};

/// Why the first error line was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCause {
    Malformed(MalformedKind),
    /// The handler returned `false`.
    Rejected,
}

/// Result of a completed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    /// 1-based number of the first malformed or rejected line.
    pub first_error: Option<usize>,
    pub cause: Option<ErrorCause>,
    /// Lines consumed before the scan ended.
    pub lines: usize,
    /// An inline comment prefix followed the first broken construct.
    pub comment_after_error: bool,
}

impl Outcome {
    /// No line was malformed or rejected.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.first_error.is_none()
    }

    /// `0` for a clean scan, otherwise the first error's line number.
    pub fn code(&self) -> i32 {
        self.first_error
            .map_or(0, |line| i32::try_from(line).unwrap_or(i32::MAX))
    }
}

/// Mutable state of one scan.
#[derive(Debug)]
pub struct ParserState {
    section: Vec<u8>,
    previous_name: Vec<u8>,
    line_number: usize,
    first_error: Option<usize>,
    cause: Option<ErrorCause>,
    comment_after_error: bool,
    stop_requested: bool,
}

impl ParserState {
    /// Fresh state with section and name storage reserved up front.
    pub fn new() -> Result<Self, ScanError> {
        let mut section = Vec::new();
        section
            .try_reserve_exact(MAX_SECTION_LEN)
            .map_err(|e| ScanError::alloc(MAX_SECTION_LEN, e))?;
        let mut previous_name = Vec::new();
        previous_name
            .try_reserve_exact(MAX_NAME_LEN)
            .map_err(|e| ScanError::alloc(MAX_NAME_LEN, e))?;
        Ok(Self {
            section,
            previous_name,
            line_number: 0,
            first_error: None,
            cause: None,
            comment_after_error: false,
            stop_requested: false,
        })
    }

    pub fn section(&self) -> &[u8] {
        &self.section
    }

    pub fn previous_name(&self) -> &[u8] {
        &self.previous_name
    }

    /// Number of the line most recently consumed (0 before the first).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn first_error(&self) -> Option<usize> {
        self.first_error
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Classify the next raw line and dispatch it.
    pub fn process_line<H: Handler>(&mut self, raw: &[u8], handler: &mut H, config: &Config) {
        self.line_number += 1;
        let line = Line::new(raw, config.allow_bom && self.line_number == 1);
        let record = classify(&line, !self.previous_name.is_empty(), config);
        trace!(line = self.line_number, kind = record.label(), "classified line");

        match record {
            Record::CommentOrBlank => {}
            Record::Continuation(value) => {
                let accepted = handler.entry(&Entry {
                    section: &self.section,
                    name: &self.previous_name,
                    value,
                    line: self.line_number,
                    kind: EntryKind::Continuation,
                });
                if !accepted {
                    self.record_error(ErrorCause::Rejected, false);
                }
            }
            Record::Section(name) => {
                set_bounded(&mut self.section, name, MAX_SECTION_LEN);
                self.previous_name.clear();
            }
            Record::Pair { name, value } => {
                set_bounded(&mut self.previous_name, name, MAX_NAME_LEN);
                let accepted = handler.entry(&Entry {
                    section: &self.section,
                    name,
                    value,
                    line: self.line_number,
                    kind: EntryKind::Pair,
                });
                if !accepted {
                    self.record_error(ErrorCause::Rejected, false);
                }
            }
            Record::Malformed { kind, trailing_comment } => {
                self.record_error(ErrorCause::Malformed(kind), trailing_comment);
            }
        }

        if config.stop_on_first_error && self.first_error.is_some() {
            self.stop_requested = true;
        }
    }

    /// First error wins; later ones leave the state untouched.
    fn record_error(&mut self, cause: ErrorCause, trailing_comment: bool) {
        if self.first_error.is_some() {
            return;
        }
        debug!(line = self.line_number, ?cause, trailing_comment, "first error");
        self.first_error = Some(self.line_number);
        self.cause = Some(cause);
        self.comment_after_error = trailing_comment;
    }

    pub fn outcome(&self) -> Outcome {
        Outcome {
            first_error: self.first_error,
            cause: self.cause,
            lines: self.line_number,
            comment_after_error: self.comment_after_error,
        }
    }
}

/// Replace `dst` with at most `max` bytes of `src`.
#[inline]
fn set_bounded(dst: &mut Vec<u8>, src: &[u8], max: usize) {
    dst.clear();
    dst.extend_from_slice(&src[..src.len().min(max)]);
}

/// Assemble one logical line in `buffer`, growing it while the source
/// keeps filling it without reaching a terminator.
///
/// Past the buffer's limit the rest of the physical line is discarded so
/// line numbers stay aligned with the input.
fn read_line<S, B>(source: &mut S, buffer: &mut B) -> Result<Option<usize>, ScanError>
where
    S: LineSource,
    B: LineBuffer,
{
    let Some(mut len) = source.fill(buffer.bytes_mut())? else {
        return Ok(None);
    };

    while len == buffer.capacity() && buffer.bytes(len).last() != Some(&b'\n') {
        let old = buffer.capacity();
        if buffer.ensure_capacity(old.saturating_mul(2))? == old {
            debug!(len, "line exceeds buffer limit, truncating");
            source.discard_line()?;
            break;
        }
        match source.fill(&mut buffer.bytes_mut()[len..])? {
            Some(n) => len += n,
            None => break,
        }
    }
    Ok(Some(len))
}

/// Scan `source` with an explicit line buffer.
pub fn scan_with_buffer<S, H, B>(
    mut source: S,
    mut handler: H,
    config: &Config,
    mut buffer: B,
) -> Result<Outcome, ScanError>
where
    S: LineSource,
    H: Handler,
    B: LineBuffer,
{
    let mut state = ParserState::new()?;
    debug!(capacity = buffer.capacity(), "scan started");

    while let Some(len) = read_line(&mut source, &mut buffer)? {
        state.process_line(buffer.bytes(len), &mut handler, config);
        if state.stop_requested() {
            debug!(line = state.line_number(), "stopping on first error");
            break;
        }
    }

    let outcome = state.outcome();
    debug!(lines = outcome.lines, first_error = ?outcome.first_error, "scan finished");
    Ok(outcome)
}

/// Scan `source`, picking the line buffer from `config.buffer`.
///
/// Degenerate sizes are clamped rather than rejected; front ends wanting
/// strict checking call [`Config::validate`] first.
pub fn scan<S, H>(source: S, handler: H, config: &Config) -> Result<Outcome, ScanError>
where
    S: LineSource,
    H: Handler,
{
    match config.buffer {
        BufferMode::Fixed => {
            let buffer = FixedBuffer::<STACK_LINE_LEN>::with_limit(config.max_line_length);
            scan_with_buffer(source, handler, config, buffer)
        }
        BufferMode::Growable => {
            let buffer = GrowableBuffer::new(config.initial_line_capacity, config.max_line_length)?;
            scan_with_buffer(source, handler, config, buffer)
        }
    }
}

/// Scan an in-memory byte slice.
pub fn parse_bytes<H: Handler>(input: &[u8], handler: H, config: &Config) -> Result<Outcome, ScanError> {
    scan(SliceSource::new(input), handler, config)
}

/// Scan a string.
pub fn parse_str<H: Handler>(input: &str, handler: H, config: &Config) -> Result<Outcome, ScanError> {
    parse_bytes(input.as_bytes(), handler, config)
}

/// Scan any reader; it is buffered internally.
pub fn parse_reader<R: Read, H: Handler>(reader: R, handler: H, config: &Config) -> Result<Outcome, ScanError> {
    scan(ReaderSource::new(BufReader::new(reader)), handler, config)
}

/// Open and scan a file.
pub fn parse_file<P: AsRef<Path>, H: Handler>(path: P, handler: H, config: &Config) -> Result<Outcome, ScanError> {
    let file = File::open(path.as_ref())?;
    parse_reader(file, handler, config)
}

/// A reusable configuration bundled with the scan entry points.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: Config,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scan<S: LineSource, H: Handler>(&self, source: S, handler: H) -> Result<Outcome, ScanError> {
        scan(source, handler, &self.config)
    }

    pub fn parse_bytes<H: Handler>(&self, input: &[u8], handler: H) -> Result<Outcome, ScanError> {
        parse_bytes(input, handler, &self.config)
    }

    pub fn parse_str<H: Handler>(&self, input: &str, handler: H) -> Result<Outcome, ScanError> {
        parse_str(input, handler, &self.config)
    }

    pub fn parse_reader<R: Read, H: Handler>(&self, reader: R, handler: H) -> Result<Outcome, ScanError> {
        parse_reader(reader, handler, &self.config)
    }

    pub fn parse_file<P: AsRef<Path>, H: Handler>(&self, path: P, handler: H) -> Result<Outcome, ScanError> {
        parse_file(path, handler, &self.config)
    }
}
