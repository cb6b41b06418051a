//! Line buffer strategies.
//!
//! The scanner asks its line source to fill a buffer and, when a line does
//! not fit, asks the buffer to grow. Both strategies sit behind
//! [`LineBuffer`] so the scan loop is written once:
//!
//! - [`FixedBuffer`] is an inline array that never grows. Lines longer than
//!   it are truncated.
//! - [`GrowableBuffer`] starts small on the heap and doubles up to a hard
//!   cap. Allocation goes through `try_reserve`, so running out of memory
//!   surfaces as [`ScanError::Alloc`] instead of an abort.

use crate::config::STACK_LINE_LEN;
use crate::error::ScanError;

/// Storage for one logical line.
pub trait LineBuffer {
    /// Current writable region. Its length is the capacity.
    fn bytes_mut(&mut self) -> &mut [u8];

    /// Filled line bytes, given how many the source wrote.
    fn bytes(&self, len: usize) -> &[u8];

    /// Current capacity in bytes.
    fn capacity(&self) -> usize;

    /// Grow to at least `n` bytes, clamped to the buffer's limit.
    ///
    /// Returns the capacity afterwards; equal to the old capacity when the
    /// limit was already reached.
    fn ensure_capacity(&mut self, n: usize) -> Result<usize, ScanError>;
}

impl<B: LineBuffer + ?Sized> LineBuffer for &mut B {
    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        (**self).bytes_mut()
    }

    #[inline]
    fn bytes(&self, len: usize) -> &[u8] {
        (**self).bytes(len)
    }

    #[inline]
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    #[inline]
    fn ensure_capacity(&mut self, n: usize) -> Result<usize, ScanError> {
        (**self).ensure_capacity(n)
    }
}

/// Inline, non-growing buffer of `N` bytes.
#[derive(Debug)]
pub struct FixedBuffer<const N: usize = STACK_LINE_LEN> {
    data: [u8; N],
    /// Usable prefix of `data`
    limit: usize,
}

impl<const N: usize> FixedBuffer<N> {
    /// Buffer using all `N` bytes.
    pub fn new() -> Self {
        Self::with_limit(N)
    }

    /// Buffer using at most `limit` of its `N` bytes.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            data: [0; N],
            limit: limit.clamp(1, N),
        }
    }
}

impl<const N: usize> Default for FixedBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineBuffer for FixedBuffer<N> {
    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data[..self.limit]
    }

    #[inline]
    fn bytes(&self, len: usize) -> &[u8] {
        &self.data[..len.min(self.limit)]
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.limit
    }

    #[inline]
    fn ensure_capacity(&mut self, _n: usize) -> Result<usize, ScanError> {
        Ok(self.limit)
    }
}

/// Heap buffer doubled on demand, capped at `max` bytes.
#[derive(Debug)]
pub struct GrowableBuffer {
    /// Always zero-filled up to its length; length is the capacity
    data: Vec<u8>,
    max: usize,
}

impl GrowableBuffer {
    /// Allocate `initial` bytes (clamped to `max`).
    pub fn new(initial: usize, max: usize) -> Result<Self, ScanError> {
        let max = max.max(1);
        let mut buffer = Self { data: Vec::new(), max };
        buffer.ensure_capacity(initial.clamp(1, max))?;
        Ok(buffer)
    }

    /// Hard cap in bytes.
    pub fn max(&self) -> usize {
        self.max
    }
}

impl LineBuffer for GrowableBuffer {
    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    fn bytes(&self, len: usize) -> &[u8] {
        &self.data[..len.min(self.data.len())]
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.data.len()
    }

    fn ensure_capacity(&mut self, n: usize) -> Result<usize, ScanError> {
        let target = n.min(self.max);
        let current = self.data.len();
        if target > current {
            self.data
                .try_reserve_exact(target - current)
                .map_err(|e| ScanError::alloc(target, e))?;
            self.data.resize(target, 0);
            tracing::debug!(from = current, to = target, "grew line buffer");
        }
        Ok(self.data.len())
    }
}
