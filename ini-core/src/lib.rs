//! INI Core Parser
//!
//! Streaming, line-oriented parser for INI-style configuration text.
//! Emits `(section, name, value)` entries to a handler without building
//! a document, and reports the first malformed or rejected line.
//!
//! # Architecture
//!
//! - **source.rs** - Line sources over slices and buffered readers
//! - **buffer.rs** - Fixed and growable line buffers
//! - **line.rs** - Whitespace/comment primitives and per-line classification
//! - **parser.rs** - Scan loop, per-scan state, outcome
//! - **event.rs** - Entry type and handler trait
//! - **config.rs** - Options and named dialects

pub mod buffer;
pub mod config;
pub mod error;
pub mod event;
pub mod line;
pub mod parser;
pub mod source;

pub use buffer::{FixedBuffer, GrowableBuffer, LineBuffer};
pub use config::{BufferMode, Config, ConfigError, Dialect, MAX_NAME_LEN, MAX_SECTION_LEN};
pub use error::{MalformedKind, ScanError};
pub use event::{Entry, EntryKind, Handler, OwnedEntry};
pub use parser::{parse_bytes, parse_file, parse_reader, parse_str, scan, scan_with_buffer, ErrorCause, Outcome, Parser, ParserState};
pub use source::{LineSource, ReaderSource, SliceSource};
