//! Line sources.
//!
//! A [`LineSource`] behaves like `fgets`: each call copies bytes into the
//! caller's buffer up to and including the next `\n`, never more than the
//! buffer holds. A line that does not fit is delivered over several calls,
//! which is how the scanner assembles lines longer than its buffer.

use std::io::{self, BufRead};

use memchr::memchr;

/// Supplies raw line bytes on demand.
pub trait LineSource {
    /// Copy the next run of bytes into `dst`, stopping after a `\n` or when
    /// `dst` is full. Returns `Ok(None)` at end of input.
    fn fill(&mut self, dst: &mut [u8]) -> io::Result<Option<usize>>;

    /// Throw away the remainder of the current line, terminator included.
    fn discard_line(&mut self) -> io::Result<()> {
        let mut scratch = [0u8; 256];
        while let Some(n) = self.fill(&mut scratch)? {
            if n == 0 || scratch[n - 1] == b'\n' {
                break;
            }
        }
        Ok(())
    }
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    #[inline]
    fn fill(&mut self, dst: &mut [u8]) -> io::Result<Option<usize>> {
        (**self).fill(dst)
    }

    #[inline]
    fn discard_line(&mut self) -> io::Result<()> {
        (**self).discard_line()
    }
}

/// Lines from an in-memory byte slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }
}

impl<'a> From<&'a str> for SliceSource<'a> {
    fn from(input: &'a str) -> Self {
        Self::new(input.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for SliceSource<'a> {
    fn from(input: &'a [u8]) -> Self {
        Self::new(input)
    }
}

impl LineSource for SliceSource<'_> {
    fn fill(&mut self, dst: &mut [u8]) -> io::Result<Option<usize>> {
        let rest = self.remaining();
        if rest.is_empty() {
            return Ok(None);
        }
        let line_len = memchr(b'\n', rest).map_or(rest.len(), |i| i + 1);
        let n = line_len.min(dst.len());
        dst[..n].copy_from_slice(&rest[..n]);
        self.pos += n;
        Ok(Some(n))
    }

    fn discard_line(&mut self) -> io::Result<()> {
        let rest = self.remaining();
        self.pos += memchr(b'\n', rest).map_or(rest.len(), |i| i + 1);
        Ok(())
    }
}

/// Lines from any buffered reader (files, stdin, sockets).
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn fill(&mut self, dst: &mut [u8]) -> io::Result<Option<usize>> {
        if dst.is_empty() {
            return Ok(Some(0));
        }
        let mut written = 0;
        while written < dst.len() {
            let available = match self.reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }
            let room = dst.len() - written;
            let (take, done) = match memchr(b'\n', available) {
                Some(i) if i < room => (i + 1, true),
                _ => (available.len().min(room), false),
            };
            dst[written..written + take].copy_from_slice(&available[..take]);
            self.reader.consume(take);
            written += take;
            if done {
                break;
            }
        }
        Ok((written > 0).then_some(written))
    }
}
